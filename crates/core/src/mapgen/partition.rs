//! Recursive binary space partition of the level region into leaf zones.

use super::model::ZoneRect;
use super::seed::StageRng;

/// Splits `region` until no leaf exceeds `max_zone_size` on either axis.
/// Leaves come out depth-first, lower half before upper half.
pub(crate) fn partition_region(
    region: ZoneRect,
    max_zone_size: i32,
    rng: &mut StageRng,
) -> Vec<ZoneRect> {
    let mut leaves = Vec::new();
    split(region, max_zone_size, rng, &mut leaves);
    leaves
}

fn split(rect: ZoneRect, max_zone_size: i32, rng: &mut StageRng, leaves: &mut Vec<ZoneRect>) {
    if rect.width > max_zone_size && rect.width > rect.height {
        let cut = split_offset(rect.width, rng);
        split(ZoneRect { width: cut, ..rect }, max_zone_size, rng, leaves);
        split(
            ZoneRect { x: rect.x + cut, width: rect.width - cut, ..rect },
            max_zone_size,
            rng,
            leaves,
        );
    } else if rect.height > max_zone_size {
        let cut = split_offset(rect.height, rng);
        split(ZoneRect { height: cut, ..rect }, max_zone_size, rng, leaves);
        split(
            ZoneRect { y: rect.y + cut, height: rect.height - cut, ..rect },
            max_zone_size,
            rng,
            leaves,
        );
    } else {
        leaves.push(rect);
    }
}

/// A third of the axis plus up to another third, so neither half is a sliver.
fn split_offset(length: i32, rng: &mut StageRng) -> i32 {
    let third = length / 3;
    third + rng.range_inclusive(0, third as usize) as i32
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::mapgen::seed::Stream;

    fn coverage_counts(region: ZoneRect, leaves: &[ZoneRect]) -> Vec<u32> {
        let mut counts = vec![0_u32; (region.width * region.height) as usize];
        for leaf in leaves {
            for x in leaf.x..leaf.right() {
                for y in leaf.y..leaf.top() {
                    assert!(
                        x >= region.x && x < region.right() && y >= region.y && y < region.top(),
                        "leaf {leaf:?} leaves region {region:?}"
                    );
                    let index = ((y - region.y) * region.width + (x - region.x)) as usize;
                    counts[index] += 1;
                }
            }
        }
        counts
    }

    #[test]
    fn default_region_splits_into_bounded_zones() {
        let region = ZoneRect { x: 0, y: 0, width: 256, height: 256 };
        let mut rng = StageRng::new(42, Stream::Partition);
        let leaves = partition_region(region, 50, &mut rng);

        assert!(leaves.len() >= 25, "256x256 with max 50 needs many zones, got {}", leaves.len());
        for leaf in &leaves {
            assert!(leaf.width <= 50 && leaf.height <= 50, "oversized leaf {leaf:?}");
            assert!(leaf.width > 50 / 3 && leaf.height > 50 / 3, "sliver leaf {leaf:?}");
        }
        assert!(coverage_counts(region, &leaves).iter().all(|&count| count == 1));
    }

    #[test]
    fn region_within_bounds_is_a_single_leaf() {
        let region = ZoneRect { x: 3, y: 4, width: 20, height: 30 };
        let mut rng = StageRng::new(1, Stream::Partition);
        assert_eq!(partition_region(region, 30, &mut rng), vec![region]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn leaves_tile_the_region_without_gaps_or_overlaps(
            seed in any::<u64>(),
            x in 0_i32..64,
            y in 0_i32..64,
            width in 1_i32..=192,
            height in 1_i32..=192,
            max_zone_size in 3_i32..=80,
        ) {
            let region = ZoneRect { x, y, width, height };
            let mut rng = StageRng::new(seed, Stream::Partition);
            let leaves = partition_region(region, max_zone_size, &mut rng);
            // Every cut halves an axis longer than the maximum into pieces of at least a third.
            let min_cut_side = (max_zone_size + 1) / 3;

            for leaf in &leaves {
                prop_assert!(leaf.width > 0 && leaf.height > 0, "empty leaf {:?}", leaf);
                prop_assert!(leaf.width <= max_zone_size || leaf.width == region.width);
                prop_assert!(leaf.height <= max_zone_size || leaf.height == region.height);
                if leaf.width != region.width {
                    prop_assert!(leaf.width >= min_cut_side, "sliver leaf {:?}", leaf);
                }
                if leaf.height != region.height {
                    prop_assert!(leaf.height >= min_cut_side, "sliver leaf {:?}", leaf);
                }
                if max_zone_size % 3 == 2 {
                    prop_assert!(leaf.width == region.width || 3 * leaf.width > max_zone_size);
                    prop_assert!(leaf.height == region.height || 3 * leaf.height > max_zone_size);
                }
            }
            let area: i64 = leaves.iter().map(|leaf| leaf.area()).sum();
            prop_assert_eq!(area, region.area());
            prop_assert!(coverage_counts(region, &leaves).iter().all(|&count| count == 1));
        }
    }
}
