//! Property tests comparing both strategies against a reference shortest-path
//! implementation on random geographic graphs.

use std::collections::{HashMap, HashSet};

use proptest::collection::vec;
use proptest::prelude::*;

use super::*;
use crate::domain::{Coordinate, NodeId, WeightMode};
use crate::geo::haversine;
use crate::graph::{Graph, Positions};

/// A random graph over real-looking coordinates whose weights never beat
/// great-circle distance, so the distance heuristic is admissible.
#[derive(Debug, Clone)]
struct GeoGraph {
    graph: Graph,
    positions: Positions,
    ids: Vec<NodeId>,
}

fn node_name(i: usize) -> String {
    format!("N{i:02}")
}

fn geo_graph() -> impl Strategy<Value = GeoGraph> {
    (2usize..12).prop_flat_map(|n| {
        (
            vec((10.70f64..10.90, 106.60f64..106.80), n),
            vec((0..n, 0..n, 1.0f64..3.0), 0..(n * 4)),
        )
            .prop_map(move |(coords, edges)| {
                let ids: Vec<NodeId> = (0..n).map(|i| NodeId::new(node_name(i))).collect();
                let positions: Positions = ids
                    .iter()
                    .cloned()
                    .zip(coords.iter().map(|&(lat, lng)| Coordinate::new(lat, lng)))
                    .collect();

                let mut graph = Graph::new();
                for id in &ids {
                    graph.add_node(id.clone());
                }
                for (from, to, factor) in edges {
                    let a = positions.position(&ids[from]).unwrap();
                    let b = positions.position(&ids[to]).unwrap();
                    graph
                        .add_edge(ids[from].clone(), ids[to].clone(), haversine(a, b) * factor)
                        .unwrap();
                }

                GeoGraph {
                    graph,
                    positions,
                    ids,
                }
            })
    })
}

/// Reference single-source shortest paths (quadratic Dijkstra).
fn reference_distances(graph: &Graph, source: &NodeId) -> HashMap<NodeId, f64> {
    let mut dist: HashMap<NodeId, f64> = HashMap::new();
    let mut done: HashSet<NodeId> = HashSet::new();
    dist.insert(source.clone(), 0.0);

    loop {
        let next = dist
            .iter()
            .filter(|(id, _)| !done.contains(*id))
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(id, d)| (id.clone(), *d));

        let Some((u, du)) = next else {
            break;
        };
        done.insert(u.clone());

        for (v, w) in graph.neighbors(&u) {
            let candidate = du + w;
            if dist.get(v).is_none_or(|&dv| candidate < dv) {
                dist.insert(v.clone(), candidate);
            }
        }
    }

    dist
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn astar_matches_reference(g in geo_graph(), s in 0usize..12, t in 0usize..12) {
        let start = &g.ids[s % g.ids.len()];
        let goal = &g.ids[t % g.ids.len()];

        let result = astar(&g.graph, &g.positions, start, goal, WeightMode::Distance, 1.0).unwrap();
        let reference = reference_distances(&g.graph, start);

        match reference.get(goal) {
            Some(&expected) => {
                prop_assert!(result.found);
                let cost = result.cost.unwrap();
                prop_assert!(close(cost, expected), "a* {} vs reference {}", cost, expected);
                prop_assert_eq!(result.path.first(), Some(start));
                prop_assert_eq!(result.path.last(), Some(goal));
            }
            None => {
                prop_assert!(!result.found);
                prop_assert!(result.path.is_empty());
                prop_assert_eq!(result.cost, None);
                // Every reachable node is finalised exactly once
                prop_assert_eq!(result.expanded, reference.len());
            }
        }
    }

    #[test]
    fn path_cost_round_trips(g in geo_graph(), s in 0usize..12, t in 0usize..12) {
        let start = &g.ids[s % g.ids.len()];
        let goal = &g.ids[t % g.ids.len()];
        let config = SearchConfig::default().with_seed(3);

        let a = astar(&g.graph, &g.positions, start, goal, WeightMode::Distance, 1.0).unwrap();
        let h = hill_climbing(&g.graph, &g.positions, start, goal, &config).unwrap();

        for result in [&a, &h] {
            prop_assert_eq!(result.cost.is_some(), result.found);
            if let Some(cost) = result.cost {
                let summed = g.graph.path_cost(&result.path).unwrap();
                prop_assert!(close(summed, cost));
            }
        }
    }

    #[test]
    fn heuristic_is_admissible(g in geo_graph(), t in 0usize..12) {
        let goal = &g.ids[t % g.ids.len()];
        let goal_pos = g.positions.position(goal).unwrap();

        for node in &g.ids {
            let remaining = reference_distances(&g.graph, node);
            if let Some(&true_cost) = remaining.get(goal) {
                let estimate = haversine(g.positions.position(node).unwrap(), goal_pos);
                prop_assert!(estimate <= true_cost + 1e-6, "{} > {}", estimate, true_cost);
            }
        }
    }

    #[test]
    fn hill_climbing_never_beats_astar(
        g in geo_graph(),
        s in 0usize..12,
        t in 0usize..12,
        seed in any::<u64>(),
    ) {
        let start = &g.ids[s % g.ids.len()];
        let goal = &g.ids[t % g.ids.len()];
        let config = SearchConfig::default().with_seed(seed);

        let a = astar(&g.graph, &g.positions, start, goal, WeightMode::Distance, 1.0).unwrap();
        let h = hill_climbing(&g.graph, &g.positions, start, goal, &config).unwrap();

        prop_assert_eq!(h.attempts.as_ref().map(Vec::len), Some(config.restarts));
        if let Some(hc_cost) = h.cost {
            let optimal = a.cost.unwrap();
            prop_assert!(hc_cost + 1e-6 >= optimal, "hc {} < a* {}", hc_cost, optimal);
        }
    }

    #[test]
    fn chain_has_single_optimum(n in 2usize..10, factor in 1.0f64..2.0, seed in any::<u64>()) {
        let ids: Vec<NodeId> = (0..n).map(|i| NodeId::new(node_name(i))).collect();
        let positions: Positions = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), Coordinate::new(10.7 + i as f64 * 0.01, 106.7)))
            .collect();
        let mut graph = Graph::new();
        for pair in ids.windows(2) {
            let d = haversine(
                positions.position(&pair[0]).unwrap(),
                positions.position(&pair[1]).unwrap(),
            );
            graph.add_edge(pair[0].clone(), pair[1].clone(), d * factor).unwrap();
        }
        let config = SearchConfig {
            allow_sideways: n,
            ..SearchConfig::default().with_seed(seed)
        };

        let start = &ids[0];
        let goal = &ids[n - 1];
        let a = astar(&graph, &positions, start, goal, WeightMode::Distance, 1.0).unwrap();
        let h = hill_climbing(&graph, &positions, start, goal, &config).unwrap();

        prop_assert!(h.found);
        prop_assert_eq!(&h.path, &a.path);
        prop_assert!(close(h.cost.unwrap(), a.cost.unwrap()));
    }

    #[test]
    fn start_equals_goal_for_both(g in geo_graph(), s in 0usize..12) {
        let node = &g.ids[s % g.ids.len()];
        let config = SearchConfig::default().with_seed(9);

        let a = astar(&g.graph, &g.positions, node, node, WeightMode::Distance, 1.0).unwrap();
        let h = hill_climbing(&g.graph, &g.positions, node, node, &config).unwrap();

        for result in [a, h] {
            prop_assert!(result.found);
            prop_assert_eq!(&result.path, &vec![node.clone()]);
            prop_assert_eq!(result.cost, Some(0.0));
        }
    }
}

#[test]
fn duration_mode_matches_reference_when_speed_bounds_edges() {
    // Edges travelled at 8 m/s, heuristic assumes 10 m/s: admissible.
    let coords = [
        ("A", 10.770, 106.690),
        ("B", 10.775, 106.700),
        ("C", 10.785, 106.705),
        ("D", 10.790, 106.720),
    ];
    let positions: Positions = coords
        .iter()
        .map(|(n, lat, lng)| (NodeId::new(*n), Coordinate::new(*lat, *lng)))
        .collect();
    let time = |a: &str, b: &str| {
        haversine(
            positions.position(&NodeId::new(a)).unwrap(),
            positions.position(&NodeId::new(b)).unwrap(),
        ) / 8.0
    };
    let graph = Graph::from_edges([
        ("A", "B", time("A", "B")),
        ("B", "C", time("B", "C")),
        ("C", "D", time("C", "D")),
        ("A", "C", time("A", "C") * 1.5),
        ("B", "D", time("B", "D") * 1.2),
    ])
    .unwrap();

    let start = NodeId::new("A");
    let goal = NodeId::new("D");
    let result = astar(&graph, &positions, &start, &goal, WeightMode::Duration, 10.0).unwrap();
    let expected = reference_distances(&graph, &start)[&goal];

    assert!(result.found);
    assert!(close(result.cost.unwrap(), expected));
}
