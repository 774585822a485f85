//! Eligibility filter, first-round shuffle, and grouping by loss count.

use crate::models::Competitor;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Competitors still below the elimination threshold, in roster order.
pub fn eligible_competitors(competitors: &[Competitor]) -> Vec<&Competitor> {
    competitors.iter().filter(|c| c.is_eligible()).collect()
}

/// True when no eligible competitor has a recorded result yet.
pub fn is_first_round(eligible: &[&Competitor]) -> bool {
    eligible.iter().all(|c| c.is_fresh())
}

/// Order eligible competitors for pairing.
///
/// 1. First round only: uniform shuffle, so roster order carries no bias.
/// 2. Stable sort by wins (descending), then losses (ascending).
pub fn order_for_pairing<R: Rng + ?Sized>(eligible: &mut [&Competitor], rng: &mut R) {
    if is_first_round(eligible) {
        eligible.shuffle(rng);
    }
    eligible.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.losses.cmp(&b.losses)));
}

/// Group ordered competitors by loss count. Iteration is in ascending loss order and
/// each group keeps the input order.
pub fn group_by_losses<'a>(ordered: &[&'a Competitor]) -> BTreeMap<u32, Vec<&'a Competitor>> {
    let mut groups: BTreeMap<u32, Vec<&Competitor>> = BTreeMap::new();
    for &c in ordered {
        groups.entry(c.losses).or_default().push(c);
    }
    groups
}
