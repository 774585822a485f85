//! Roster: the owned list of competitors and its CRUD operations.

use crate::models::competitor::Competitor;
use serde::{Deserialize, Serialize};

/// Errors from roster edits.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RosterError {
    /// Name was empty after trimming.
    NameRequired,
    /// A competitor with this name already exists.
    DuplicateName(String),
    /// No competitor with this name.
    CompetitorNotFound(String),
    /// Sample teams can only be added to an empty roster.
    RosterNotEmpty,
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::NameRequired => write!(f, "Name is required"),
            RosterError::DuplicateName(name) => write!(f, "Competitor {} already exists", name),
            RosterError::CompetitorNotFound(name) => write!(f, "Competitor {} not found", name),
            RosterError::RosterNotEmpty => write!(f, "Roster already has competitors"),
        }
    }
}

impl std::error::Error for RosterError {}

const SAMPLE_TEAMS: usize = 2;
const SAMPLE_PER_TEAM: usize = 10;

/// Ordered list of competitors. Names are unique.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    competitors: Vec<Competitor>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from records, keeping the first of any duplicated name.
    pub fn from_competitors(competitors: impl IntoIterator<Item = Competitor>) -> Self {
        let mut roster = Self::new();
        for c in competitors {
            if roster.get(&c.name).is_none() {
                roster.competitors.push(c);
            } else {
                log::warn!("Dropping duplicate competitor {}", c.name);
            }
        }
        roster
    }

    pub fn competitors(&self) -> &[Competitor] {
        &self.competitors
    }

    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Competitor> {
        self.competitors.iter_mut().find(|c| c.name == name)
    }

    /// Add a competitor with a clean record. Name and team are trimmed.
    pub fn add(&mut self, name: &str, team: &str) -> Result<(), RosterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::NameRequired);
        }
        if self.get(name).is_some() {
            return Err(RosterError::DuplicateName(name.to_string()));
        }
        self.competitors.push(Competitor::new(name, team.trim()));
        Ok(())
    }

    /// Remove a competitor by name.
    pub fn remove(&mut self, name: &str) -> Result<Competitor, RosterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::NameRequired);
        }
        let idx = self
            .competitors
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| RosterError::CompetitorNotFound(name.to_string()))?;
        Ok(self.competitors.remove(idx))
    }

    pub fn erase(&mut self) {
        self.competitors.clear();
    }

    /// Zero every competitor's wins and losses.
    pub fn reset_scores(&mut self) {
        self.competitors.iter_mut().for_each(Competitor::reset);
    }

    /// Fill an empty roster with two ten-member teams plus ten team-less competitors.
    pub fn add_sample_teams(&mut self) -> Result<(), RosterError> {
        if !self.is_empty() {
            return Err(RosterError::RosterNotEmpty);
        }
        for team in 1..=SAMPLE_TEAMS {
            for i in 1..=SAMPLE_PER_TEAM {
                let number = (team - 1) * SAMPLE_PER_TEAM + i;
                self.competitors.push(Competitor::new(
                    format!("Competitor {} ({})", number, team),
                    format!("Team {}", team),
                ));
            }
        }
        for i in 1..=SAMPLE_PER_TEAM {
            let number = SAMPLE_TEAMS * SAMPLE_PER_TEAM + i;
            self.competitors
                .push(Competitor::new(format!("Competitor {}", number), ""));
        }
        Ok(())
    }

    /// Competitors in display order: fewer losses first, then more wins.
    pub fn standings(&self) -> Vec<&Competitor> {
        let mut sorted: Vec<_> = self.competitors.iter().collect();
        sorted.sort_by(|a, b| a.losses.cmp(&b.losses).then(b.wins.cmp(&a.wins)));
        sorted
    }

    pub fn eligible_count(&self) -> usize {
        self.competitors.iter().filter(|c| c.is_eligible()).count()
    }
}
