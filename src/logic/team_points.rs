//! Team standings: read-only aggregation over the roster.

use crate::models::{Competitor, TeamPointsFormula};
use std::collections::BTreeMap;

/// Points per team, keyed by team name. Team-less competitors are left out.
pub fn team_points(competitors: &[Competitor], formula: TeamPointsFormula) -> BTreeMap<String, i64> {
    let mut totals: BTreeMap<String, i64> = BTreeMap::new();
    for c in competitors {
        let Some(team) = c.team() else { continue };
        let points = match formula {
            TeamPointsFormula::NetWins => i64::from(c.wins) - i64::from(c.losses),
            TeamPointsFormula::Wins => i64::from(c.wins),
        };
        *totals.entry(team.to_string()).or_insert(0) += points;
    }
    totals
}
