//! Candidate roads between zones that share a long enough border.

use crate::types::{Direction, GridPos};

use super::model::{Road, Zone, ZoneId, ZoneRect};

/// Shared borders of this length or less get no road.
const MIN_SHARED_BORDER: i32 = 4;

/// Adds a mirrored road pair for every adjacent zone pair, scanning `i < j` in arena order.
pub(crate) fn build_road_graph(zones: &mut [Zone]) {
    for i in 0..zones.len() {
        for j in i + 1..zones.len() {
            let (a, b) = (zones[i].rect, zones[j].rect);
            let link = if a.y == b.top() {
                x_overlap_mid(a, b).map(|mid| (i, j, Direction::Down, GridPos::new(mid, a.y)))
            } else if b.y == a.top() {
                x_overlap_mid(a, b).map(|mid| (j, i, Direction::Down, GridPos::new(mid, b.y)))
            } else if a.x == b.right() {
                y_overlap_mid(a, b).map(|mid| (i, j, Direction::Left, GridPos::new(a.x, mid)))
            } else if b.x == a.right() {
                y_overlap_mid(a, b).map(|mid| (j, i, Direction::Left, GridPos::new(b.x, mid)))
            } else {
                None
            };
            if let Some((from, to, side, crossing)) = link {
                add_road_pair(zones, ZoneId(from), ZoneId(to), side, crossing);
            }
        }
    }
}

/// Center-to-center distance adjusted for zone sizes; `/ 2` truncates toward zero.
pub fn road_length(from: ZoneRect, to: ZoneRect) -> i32 {
    ((from.width - to.width) / 2 + from.x - to.x).abs()
        + ((from.height - to.height) / 2 + from.y - to.y).abs()
}

fn x_overlap_mid(a: ZoneRect, b: ZoneRect) -> Option<i32> {
    overlap_mid(a.x, a.right(), b.x, b.right())
}

fn y_overlap_mid(a: ZoneRect, b: ZoneRect) -> Option<i32> {
    overlap_mid(a.y, a.top(), b.y, b.top())
}

fn overlap_mid(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> Option<i32> {
    let (start, end) = (a_start.max(b_start), a_end.min(b_end));
    (end - start > MIN_SHARED_BORDER).then_some((start + end) / 2)
}

/// `from` gets the road leaving through `side` at `crossing`; `to` gets the mirror.
fn add_road_pair(
    zones: &mut [Zone],
    from: ZoneId,
    to: ZoneId,
    side: Direction,
    crossing: GridPos,
) {
    let length = road_length(zones[from.0].rect, zones[to.0].rect);
    let road = Road { from, to, length, side, crossing, kept: false, tree: false };
    let mirror = Road {
        from: to,
        to: from,
        length: road_length(zones[to.0].rect, zones[from.0].rect),
        side: side.opposite(),
        crossing: road.mirror_crossing(),
        kept: false,
        tree: false,
    };
    zones[from.0].roads.push(road);
    zones[to.0].roads.push(mirror);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones(rects: &[ZoneRect]) -> Vec<Zone> {
        rects.iter().enumerate().map(|(index, rect)| Zone::new(ZoneId(index), *rect)).collect()
    }

    #[test]
    fn vertically_stacked_zones_get_a_down_up_pair() {
        let mut arena = zones(&[
            ZoneRect { x: 0, y: 20, width: 30, height: 20 },
            ZoneRect { x: 10, y: 0, width: 30, height: 20 },
        ]);
        build_road_graph(&mut arena);

        let down = &arena[0].roads[0];
        assert_eq!((down.to, down.side), (ZoneId(1), Direction::Down));
        // Shared X span is 10..30.
        assert_eq!(down.crossing, GridPos::new(20, 20));
        let up = &arena[1].roads[0];
        assert_eq!((up.to, up.side), (ZoneId(0), Direction::Up));
        assert_eq!(up.crossing, GridPos::new(20, 19));
        assert_eq!(down.length, 30);
        assert_eq!(up.length, 30);
    }

    #[test]
    fn pair_order_follows_which_zone_lies_above() {
        let mut arena = zones(&[
            ZoneRect { x: 0, y: 0, width: 20, height: 20 },
            ZoneRect { x: 0, y: 20, width: 20, height: 20 },
        ]);
        build_road_graph(&mut arena);

        // Zone 1 sits above zone 0, so zone 1 owns the originating Down road.
        assert_eq!(arena[1].roads[0].side, Direction::Down);
        assert_eq!(arena[1].roads[0].crossing, GridPos::new(10, 20));
        assert_eq!(arena[0].roads[0].side, Direction::Up);
        assert_eq!(arena[0].roads[0].crossing, GridPos::new(10, 19));
    }

    #[test]
    fn side_by_side_zones_get_a_left_right_pair() {
        let mut arena = zones(&[
            ZoneRect { x: 25, y: 0, width: 25, height: 40 },
            ZoneRect { x: 0, y: 10, width: 25, height: 20 },
        ]);
        build_road_graph(&mut arena);

        let left = &arena[0].roads[0];
        assert_eq!((left.side, left.crossing), (Direction::Left, GridPos::new(25, 20)));
        let right = &arena[1].roads[0];
        assert_eq!((right.side, right.crossing), (Direction::Right, GridPos::new(24, 20)));
    }

    #[test]
    fn short_shared_border_and_corner_contact_are_not_linked() {
        let mut arena = zones(&[
            ZoneRect { x: 0, y: 0, width: 20, height: 20 },
            ZoneRect { x: 16, y: 20, width: 20, height: 20 },
            ZoneRect { x: 20, y: -20, width: 20, height: 20 },
        ]);
        build_road_graph(&mut arena);
        assert!(arena.iter().all(|zone| zone.roads.is_empty()));
    }

    #[test]
    fn mirrors_sit_one_step_across_the_border() {
        let mut arena = zones(&[
            ZoneRect { x: 0, y: 0, width: 20, height: 20 },
            ZoneRect { x: 20, y: 0, width: 20, height: 20 },
            ZoneRect { x: 0, y: 20, width: 40, height: 20 },
        ]);
        build_road_graph(&mut arena);

        for zone in &arena {
            for road in &zone.roads {
                assert!(Direction::CARDINAL.contains(&road.side));
                let mirror = arena[road.to.0].road_to(zone.id).expect("mirror exists");
                assert_eq!(mirror.side, road.side.opposite());
                assert_eq!(mirror.crossing, road.mirror_crossing());
                assert!(zone.rect.contains(road.crossing), "crossing inside owner {road:?}");
            }
        }
    }
}
