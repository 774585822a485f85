//! Roster CSV: `Name,Team,Wins,Losses`, header row first.

use crate::models::{Competitor, Roster};
use chrono::NaiveDate;
use std::io::{Read, Write};

const HEADER: [&str; 4] = ["Name", "Team", "Wins", "Losses"];

/// Errors from roster import/export.
#[derive(Debug)]
pub enum RosterCsvError {
    /// Nothing to export.
    EmptyRoster,
    /// The file had no usable competitor rows.
    NoRows,
    Csv(csv::Error),
    Io(std::io::Error),
}

impl std::fmt::Display for RosterCsvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterCsvError::EmptyRoster => write!(f, "No competitors to save"),
            RosterCsvError::NoRows => write!(f, "Invalid CSV file: no competitor rows"),
            RosterCsvError::Csv(e) => write!(f, "CSV error: {}", e),
            RosterCsvError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for RosterCsvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterCsvError::Csv(e) => Some(e),
            RosterCsvError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for RosterCsvError {
    fn from(e: csv::Error) -> Self {
        RosterCsvError::Csv(e)
    }
}

impl From<std::io::Error> for RosterCsvError {
    fn from(e: std::io::Error) -> Self {
        RosterCsvError::Io(e)
    }
}

/// Download file name for a roster saved on `date`.
pub fn roster_file_name(date: NaiveDate) -> String {
    format!("roster_{}.csv", date.format("%Y-%m-%d"))
}

/// Write the roster as CSV. Text fields are quoted, counts are not.
pub fn write_roster<W: Write>(roster: &Roster, writer: W) -> Result<(), RosterCsvError> {
    if roster.is_empty() {
        return Err(RosterCsvError::EmptyRoster);
    }
    let mut w = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_writer(writer);
    w.write_record(HEADER)?;
    for c in roster.competitors() {
        let wins = c.wins.to_string();
        let losses = c.losses.to_string();
        w.write_record([c.name.as_str(), c.team.as_str(), wins.as_str(), losses.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

pub fn roster_to_csv(roster: &Roster) -> Result<String, RosterCsvError> {
    let mut buf = Vec::new();
    write_roster(roster, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Read a roster. The first row is the header and is skipped. Rows with fewer than four
/// fields, an empty name, or a repeated name are skipped; unparsable counts become 0.
pub fn read_roster<R: Read>(reader: R) -> Result<Roster, RosterCsvError> {
    let mut r = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut competitors = Vec::new();
    for (line, record) in r.records().enumerate() {
        let record = match record {
            Ok(rec) => rec,
            Err(e) => {
                log::warn!("Skipping unreadable roster row {}: {}", line + 2, e);
                continue;
            }
        };
        if record.len() < HEADER.len() {
            log::warn!("Skipping roster row {}: expected 4 fields", line + 2);
            continue;
        }
        let name = &record[0];
        if name.is_empty() {
            log::warn!("Skipping roster row {}: empty name", line + 2);
            continue;
        }
        competitors.push(Competitor {
            name: name.to_string(),
            team: record[1].to_string(),
            wins: parse_count(&record[2]),
            losses: parse_count(&record[3]),
        });
    }

    if competitors.is_empty() {
        return Err(RosterCsvError::NoRows);
    }
    Ok(Roster::from_competitors(competitors))
}

pub fn roster_from_csv(text: &str) -> Result<Roster, RosterCsvError> {
    read_roster(text.as_bytes())
}

fn parse_count(field: &str) -> u32 {
    field.parse().unwrap_or(0)
}
