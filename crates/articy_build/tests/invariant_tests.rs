//! Invariant tests for build-graph resolution
//!
//! These verify properties that must hold for every resolvable input, not
//! just the shipped tables.

use articy_build::{detect_cycle, BuildGraph, BuildRequest, DependencyEdge, LinkVisibility};
use articy_core::{LinkTarget, ModuleName, KNOWN_VERSIONS};
use proptest::prelude::*;

/// INVARIANT: the shipped tables form a DAG at every known engine version.
#[test]
fn invariant_shipped_tables_are_acyclic_at_every_known_version() {
    for &version in KNOWN_VERSIONS {
        let request = BuildRequest::new(version).with_standard_layout("Source");
        let graph = BuildGraph::resolve(&request).unwrap();

        let edges: Vec<DependencyEdge> = graph
            .modules()
            .iter()
            .flat_map(|m| m.dependencies().iter().copied())
            .collect();
        assert_eq!(detect_cycle(&edges), None, "cycle at {version}");
    }
}

/// INVARIANT: resolution is deterministic at every known engine version.
#[test]
fn invariant_resolution_is_deterministic_at_every_known_version() {
    for &version in KNOWN_VERSIONS {
        let request = BuildRequest::new(version).with_standard_layout("Source");
        let a = BuildGraph::resolve(&request).unwrap();
        let b = BuildGraph::resolve(&request).unwrap();
        assert_eq!(a, b, "non-deterministic resolution at {version}");
    }
}

fn module(index: usize) -> ModuleName {
    ModuleName::ALL[index % ModuleName::ALL.len()]
}

fn arb_edge() -> impl Strategy<Value = DependencyEdge> {
    (0..4usize, 0..4usize, 0..3usize).prop_map(|(from, to, visibility)| DependencyEdge {
        from: module(from),
        to: LinkTarget::Plugin(module(to)),
        visibility: match visibility {
            0 => LinkVisibility::Public,
            1 => LinkVisibility::Private,
            _ => LinkVisibility::Dynamic,
        },
    })
}

/// Brute-force oracle: a link cycle exists iff some unit reaches itself
/// through the transitive closure of non-dynamic edges.
fn has_cycle_by_closure(edges: &[DependencyEdge]) -> bool {
    let n = ModuleName::ALL.len();
    let index = |m: ModuleName| ModuleName::ALL.iter().position(|&x| x == m).unwrap();

    let mut reach = [[false; 4]; 4];
    for edge in edges {
        if edge.visibility == LinkVisibility::Dynamic {
            continue;
        }
        if let LinkTarget::Plugin(to) = edge.to {
            reach[index(edge.from)][index(to)] = true;
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                reach[i][j] = reach[i][j] || (reach[i][k] && reach[k][j]);
            }
        }
    }
    (0..n).any(|i| reach[i][i])
}

proptest! {
    /// INVARIANT: the three-color detector agrees with the transitive-closure
    /// oracle on arbitrary edge sets.
    #[test]
    fn invariant_cycle_detector_matches_closure_oracle(
        edges in proptest::collection::vec(arb_edge(), 0..16)
    ) {
        prop_assert_eq!(detect_cycle(&edges).is_some(), has_cycle_by_closure(&edges));
    }

    /// INVARIANT: a reported cycle is a real closed path of non-dynamic edges.
    #[test]
    fn invariant_reported_cycle_is_a_real_path(
        edges in proptest::collection::vec(arb_edge(), 0..16)
    ) {
        if let Some(cycle) = detect_cycle(&edges) {
            prop_assert!(cycle.len() >= 2);
            prop_assert_eq!(cycle.first(), cycle.last());
            for pair in cycle.windows(2) {
                let exists = edges.iter().any(|e| {
                    e.from == pair[0]
                        && e.to == LinkTarget::Plugin(pair[1])
                        && e.visibility != LinkVisibility::Dynamic
                });
                prop_assert!(exists, "edge {} -> {} not declared", pair[0], pair[1]);
            }
        }
    }
}
