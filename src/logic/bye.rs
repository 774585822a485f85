//! Bye assignment for loss groups of odd size.

use crate::logic::matching::{match_group, Matching, Pair, Strategy};
use crate::models::{ByePolicy, Competitor};

/// Pairs for one loss group plus the member sitting out, if any.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupPairing<'a> {
    pub pairs: Vec<Pair<'a>>,
    pub bye: Option<&'a Competitor>,
    pub penalty: usize,
}

impl<'a> GroupPairing<'a> {
    fn new(matching: Matching<'a>, bye: Option<&'a Competitor>) -> Self {
        Self {
            pairs: matching.pairs,
            bye,
            penalty: matching.penalty,
        }
    }
}

/// Pair a whole loss group. Even groups are matched directly; odd groups first pick a bye
/// with `policy`, then match the rest.
pub fn pair_group<'a>(
    group: &[&'a Competitor],
    policy: ByePolicy,
    strategy: Strategy,
) -> GroupPairing<'a> {
    if group.len() % 2 == 0 {
        return GroupPairing::new(match_group(group, strategy), None);
    }
    match policy {
        ByePolicy::HighestWins => {
            let idx = highest_wins_index(group);
            let rest = without(group, idx);
            GroupPairing::new(match_group(&rest, strategy), Some(group[idx]))
        }
        ByePolicy::SearchOptimal => search_optimal_bye(group, strategy),
    }
}

/// Index of the member with the most wins; the earliest one wins ties.
pub fn highest_wins_index(group: &[&Competitor]) -> usize {
    let mut best = 0;
    for (i, c) in group.iter().enumerate().skip(1) {
        if c.wins > group[best].wins {
            best = i;
        }
    }
    best
}

/// Try every member as the bye and keep the lowest total penalty. Candidates are tried in
/// group order, so ties go to the earliest (highest-ranked) member.
fn search_optimal_bye<'a>(group: &[&'a Competitor], strategy: Strategy) -> GroupPairing<'a> {
    let mut best: Option<GroupPairing<'a>> = None;
    for idx in 0..group.len() {
        let rest = without(group, idx);
        let candidate = GroupPairing::new(match_group(&rest, strategy), Some(group[idx]));
        let better = best.as_ref().map_or(true, |b| candidate.penalty < b.penalty);
        if better {
            let done = candidate.penalty == 0;
            best = Some(candidate);
            if done {
                break;
            }
        }
    }
    best.unwrap_or_default()
}

fn without<'a>(group: &[&'a Competitor], idx: usize) -> Vec<&'a Competitor> {
    group
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != idx)
        .map(|(_, &c)| c)
        .collect()
}
