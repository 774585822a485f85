//! Round generation: eligible competitors → ordered list of matchups.

use crate::logic::bye::pair_group;
use crate::logic::eligibility::{eligible_competitors, group_by_losses, order_for_pairing};
use crate::logic::matching::Strategy;
use crate::models::{ByePolicy, Competitor, Matchup, PairingOptions};
use rand::Rng;
use std::collections::BTreeMap;

/// Generate the next round's matchups.
///
/// 1. Keep competitors below the elimination threshold.
/// 2. First round: shuffle. Then sort by wins desc, losses asc.
/// 3. Group by losses. A lone 0-loss and lone 1-loss competitor play each other.
/// 4. Otherwise pair each group in ascending loss order; odd groups produce one bye.
///
/// Returns an empty list when fewer than two competitors are eligible (tournament complete).
/// Each pair's first slot is the higher-ranked competitor; byes come last within their group.
pub fn pair_competitors<R: Rng + ?Sized>(
    competitors: &[Competitor],
    options: &PairingOptions,
    rng: &mut R,
) -> Vec<Matchup> {
    let mut eligible = eligible_competitors(competitors);
    if eligible.len() < 2 {
        log::info!("{} eligible competitor(s): nothing to pair", eligible.len());
        return Vec::new();
    }

    order_for_pairing(&mut eligible, rng);
    let groups = group_by_losses(&eligible);

    if let Some(matchup) = cross_group_pair(&groups) {
        log::debug!("Pairing lone leader across loss groups: {}", matchup);
        return vec![matchup];
    }

    let limit = options.effective_limit();
    let mut matchups = Vec::with_capacity((eligible.len() + 1) / 2);
    for (losses, group) in &groups {
        let strategy = Strategy::for_group_size(group.len(), limit);
        let policy = match strategy {
            Strategy::Exhaustive => options.bye_policy,
            Strategy::Greedy => {
                log::warn!(
                    "Group with {} loss(es) has {} members (limit {}); using greedy matching",
                    losses,
                    group.len(),
                    limit
                );
                ByePolicy::HighestWins
            }
        };

        let paired = pair_group(group, policy, strategy);
        log::debug!(
            "Group with {} loss(es): {} pair(s), {} teammate conflict(s), bye: {}",
            losses,
            paired.pairs.len(),
            paired.penalty,
            paired.bye.map_or("none", |c| c.name.as_str())
        );

        matchups.extend(
            paired
                .pairs
                .iter()
                .map(|(a, b)| Matchup::new(a.name.as_str(), b.name.as_str())),
        );
        if let Some(c) = paired.bye {
            matchups.push(Matchup::bye(c.name.as_str()));
        }
    }
    matchups
}

/// The only eligible competitors are one with no losses and one with a single loss.
fn cross_group_pair(groups: &BTreeMap<u32, Vec<&Competitor>>) -> Option<Matchup> {
    let leaders = groups.get(&0)?;
    let chasers = groups.get(&1)?;
    (groups.len() == 2 && leaders.len() == 1 && chasers.len() == 1)
        .then(|| Matchup::new(leaders[0].name.as_str(), chasers[0].name.as_str()))
}
