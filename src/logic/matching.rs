//! Within-group matching: pair up competitors with the same loss count while keeping
//! teammates apart.
//!
//! This is a minimum-weight perfect matching on the complete graph of the group where an
//! edge costs 1 if both ends share a non-empty team and 0 otherwise. Two strategies:
//!
//! - [`exhaustive_matching`]: backtracking over "first remaining competitor takes each
//!   possible partner", pruning any partial pairing whose penalty already reaches the best
//!   complete one. Optimal; ties resolve to the first pairing found in search order.
//! - [`greedy_matching`]: each unpaired competitor takes the first later one who is not a
//!   teammate (or simply the first if everyone left is). O(n²), not always optimal.
//!
//! Both expect an even-sized group. With an odd size one member is left unpaired.

use crate::models::Competitor;

pub type Pair<'a> = (&'a Competitor, &'a Competitor);

/// A set of disjoint pairs and its conflict penalty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Matching<'a> {
    pub pairs: Vec<Pair<'a>>,
    pub penalty: usize,
}

/// Matching strategy for one group.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strategy {
    Exhaustive,
    Greedy,
}

impl Strategy {
    /// Exhaustive up to `limit` members, greedy beyond.
    pub fn for_group_size(size: usize, limit: usize) -> Self {
        if size <= limit {
            Strategy::Exhaustive
        } else {
            Strategy::Greedy
        }
    }
}

/// Number of pairs whose members are teammates.
pub fn conflict_penalty(pairs: &[Pair<'_>]) -> usize {
    pairs.iter().filter(|(a, b)| a.is_teammate_of(b)).count()
}

/// Match a group with the given strategy.
pub fn match_group<'a>(group: &[&'a Competitor], strategy: Strategy) -> Matching<'a> {
    match strategy {
        Strategy::Exhaustive => exhaustive_matching(group),
        Strategy::Greedy => greedy_matching(group),
    }
}

pub fn greedy_matching<'a>(group: &[&'a Competitor]) -> Matching<'a> {
    let mut remaining: Vec<&Competitor> = group.to_vec();
    let mut pairs = Vec::with_capacity(group.len() / 2);

    while remaining.len() > 1 {
        let competitor = remaining.remove(0);
        let idx = remaining
            .iter()
            .position(|c| !c.is_teammate_of(competitor))
            .unwrap_or(0);
        let partner = remaining.remove(idx);
        pairs.push((competitor, partner));
    }

    let penalty = conflict_penalty(&pairs);
    Matching { pairs, penalty }
}

pub fn exhaustive_matching<'a>(group: &[&'a Competitor]) -> Matching<'a> {
    let mut search = Search {
        group,
        current: Vec::with_capacity(group.len() / 2),
        best: None,
    };
    let mut remaining: Vec<usize> = (0..group.len()).collect();
    search.run(&mut remaining, 0);

    match search.best {
        Some((penalty, indices)) => Matching {
            pairs: indices.into_iter().map(|(a, b)| (group[a], group[b])).collect(),
            penalty,
        },
        None => Matching::default(),
    }
}

/// Backtracking state over indices into `group`.
struct Search<'g, 'a> {
    group: &'g [&'a Competitor],
    current: Vec<(usize, usize)>,
    best: Option<(usize, Vec<(usize, usize)>)>,
}

impl Search<'_, '_> {
    fn run(&mut self, remaining: &mut Vec<usize>, penalty: usize) {
        if matches!(&self.best, Some((best, _)) if penalty >= *best) {
            return;
        }
        if remaining.len() < 2 {
            self.best = Some((penalty, self.current.clone()));
            return;
        }

        let first = remaining.remove(0);
        for k in 0..remaining.len() {
            let partner = remaining.remove(k);
            let cost = usize::from(self.group[first].is_teammate_of(self.group[partner]));
            self.current.push((first, partner));
            self.run(remaining, penalty + cost);
            self.current.pop();
            remaining.insert(k, partner);
        }
        remaining.insert(0, first);
    }
}
