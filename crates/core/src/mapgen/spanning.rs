//! Road selection: Kruskal spanning tree, random interest roads, and cleanup.

use tracing::warn;

use super::model::{Zone, ZoneId};
use super::seed::StageRng;

/// Outcome of the spanning pass, for logging and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SpanningSummary {
    pub(crate) candidates: usize,
    pub(crate) unions: usize,
}

/// Road handle: owning zone and index into its road list.
type RoadRef = (ZoneId, usize);

/// Marks the roads of a minimum spanning forest as kept and tree.
pub(crate) fn select_spanning_tree(zones: &mut [Zone]) -> SpanningSummary {
    let candidates = sorted_candidates(zones);
    let mut components: Vec<usize> = (0..zones.len()).collect();
    let needed = zones.len().saturating_sub(1);
    let mut unions = 0;

    for &(owner, index) in &candidates {
        if unions == needed {
            break;
        }
        let target = zones[owner.0].roads[index].to;
        let (keep, absorbed) = (components[owner.0], components[target.0]);
        if keep == absorbed {
            continue;
        }
        for label in &mut components {
            if *label == absorbed {
                *label = keep;
            }
        }
        mark_kept(zones, (owner, index), true);
        unions += 1;
    }

    if unions < needed {
        warn!(
            zones = zones.len(),
            unions, "road candidates exhausted before every zone was connected"
        );
    }
    SpanningSummary { candidates: candidates.len(), unions }
}

/// One road per unordered pair, ascending by length; ties keep discovery order.
fn sorted_candidates(zones: &[Zone]) -> Vec<RoadRef> {
    let mut candidates: Vec<RoadRef> = Vec::new();
    for (zone_index, zone) in zones.iter().enumerate() {
        for (road_index, road) in zone.roads.iter().enumerate() {
            if road.to.0 < zone_index {
                continue;
            }
            let at = candidates.partition_point(|&(owner, index)| {
                zones[owner.0].roads[index].length <= road.length
            });
            candidates.insert(at, (zone.id, road_index));
        }
    }
    candidates
}

/// Gives each zone with roads a `1 / chance` shot at keeping one random road.
pub(crate) fn add_interest_roads(zones: &mut [Zone], chance: u32, rng: &mut StageRng) -> usize {
    let mut added = 0;
    for zone_index in 0..zones.len() {
        if !rng.one_in(chance) || zones[zone_index].roads.is_empty() {
            continue;
        }
        let road_index = rng.index(zones[zone_index].roads.len());
        if !zones[zone_index].roads[road_index].kept {
            added += 1;
        }
        mark_kept(zones, (ZoneId(zone_index), road_index), false);
    }
    added
}

/// Drops every road neither pass kept.
pub(crate) fn discard_unkept(zones: &mut [Zone]) {
    for zone in zones {
        zone.roads.retain(|road| road.kept);
    }
}

fn mark_kept(zones: &mut [Zone], (owner, index): RoadRef, tree: bool) {
    let road = &mut zones[owner.0].roads[index];
    road.kept = true;
    road.tree |= tree;
    let partner = road.to;
    if let Some(mirror) = zones[partner.0].roads.iter_mut().find(|mirror| mirror.to == owner) {
        mirror.kept = true;
        mirror.tree |= tree;
    }
}
