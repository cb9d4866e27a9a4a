//! Pairwise exchange of delivery stops.

use std::collections::HashMap;

use hauler_universe::LocationGraph;

use super::{RouteStop, StopKind, respects_precedence, stop_cost};

/// Swap delivery stops while the edges around them get cheaper.
///
/// Pickup stops never move. A swap that would bring a delivery forward to or
/// past the pickup of one of its legs is skipped. Returns the number of
/// accepted swaps.
pub(crate) fn refine(graph: &LocationGraph, stops: &mut [RouteStop], max_passes: usize) -> usize {
    let deliveries: Vec<usize> = stops
        .iter()
        .enumerate()
        .filter(|(_, stop)| stop.kind == StopKind::Delivery)
        .map(|(index, _)| index)
        .collect();
    if deliveries.len() < 2 {
        return 0;
    }

    let mut pickup_at: HashMap<usize, usize> = HashMap::new();
    for (index, stop) in stops.iter().enumerate() {
        if stop.kind == StopKind::Pickup {
            for item in &stop.items {
                pickup_at.insert(item.pickup, index);
            }
        }
    }

    let mut accepted = 0;
    for pass in 0..max_passes {
        let mut improved = false;
        for (a, &i) in deliveries.iter().enumerate() {
            for &j in &deliveries[a + 1..] {
                if !can_move_forward(&stops[j], i, &pickup_at) {
                    continue;
                }
                let before = adjacent_cost(graph, stops, i, j);
                stops.swap(i, j);
                let after = adjacent_cost(graph, stops, i, j);
                if after < before {
                    improved = true;
                    accepted += 1;
                    log::debug!(
                        "pass {pass}: swapped {} and {} ({before:.1} -> {after:.1})",
                        stops[i].id,
                        stops[j].id
                    );
                    debug_assert!(respects_precedence(stops));
                } else {
                    stops.swap(i, j);
                }
            }
        }
        if !improved {
            break;
        }
    }
    accepted
}

/// Whether every leg of `stop` is picked up strictly before `position`.
fn can_move_forward(stop: &RouteStop, position: usize, pickup_at: &HashMap<usize, usize>) -> bool {
    stop.items.iter().all(|item| {
        pickup_at
            .get(&item.pickup)
            .is_some_and(|&pickup| pickup < position)
    })
}

/// Sum of the distinct edges touching positions `i` and `j`.
fn adjacent_cost(graph: &LocationGraph, stops: &[RouteStop], i: usize, j: usize) -> f64 {
    let mut starts: Vec<usize> = [i.checked_sub(1), Some(i), j.checked_sub(1), Some(j)]
        .into_iter()
        .flatten()
        .filter(|&start| start + 1 < stops.len())
        .collect();
    starts.sort_unstable();
    starts.dedup();
    starts
        .into_iter()
        .map(|start| stop_cost(graph, &stops[start], &stops[start + 1]))
        .sum()
}
