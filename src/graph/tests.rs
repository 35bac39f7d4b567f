//! Contract tests run against every mutable layout.

use super::*;
use crate::collections::element_set::{IndexRemoval, IndexRemoveListener};
use crate::error::GraphError;
use crate::options::{GraphOptions, Representation};

const LAYOUTS: [Representation; 4] = [
    Representation::Array,
    Representation::Hashmap,
    Representation::Matrix,
    Representation::Linked,
];

fn empty(repr: Representation, caps: Capabilities) -> Graph {
    Graph::new(&GraphOptions::new(caps).representation(repr)).unwrap()
}

fn sorted(mut v: Vec<usize>) -> Vec<usize> {
    v.sort_unstable();
    v
}

#[derive(Default)]
struct Recorder(Vec<IndexRemoval>);

impl IndexRemoveListener for Recorder {
    fn removed_last(&mut self, removed: usize) {
        self.0.push(IndexRemoval::RemovedLast(removed));
    }

    fn swapped_and_removed(&mut self, removed: usize, swapped: usize) {
        self.0.push(IndexRemoval::SwappedAndRemoved { removed, swapped });
    }
}

#[test]
fn test_vertex_removal_renames_last_vertex() {
    for repr in LAYOUTS {
        let mut g = empty(repr, Capabilities::directed());
        g.add_vertices(3).unwrap();
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(0, 2).unwrap();

        g.remove_vertex(1).unwrap();
        assert_eq!(g.num_vertices(), 2, "{repr}");
        assert_eq!(g.num_edges(), 1, "{repr}");
        assert_eq!(g.edge_source(0).unwrap(), 0, "{repr}");
        assert_eq!(g.edge_target(0).unwrap(), 1, "{repr}");
        assert_eq!(g.get_edge(0, 1).unwrap(), Some(0), "{repr}");
        assert_eq!(g.in_edges(1).unwrap().to_vec(), vec![0], "{repr}");
        assert!(g.out_edges(1).unwrap().is_empty(), "{repr}");
    }
}

#[test]
fn test_self_edge_of_moved_vertex_stays_addressable() {
    for repr in LAYOUTS {
        let mut g = empty(repr, Capabilities::directed().with_self_edges(true));
        g.add_vertices(2).unwrap();
        g.add_edge(1, 1).unwrap();

        g.remove_vertex(0).unwrap();
        assert_eq!(g.get_edge(0, 0).unwrap(), Some(0), "{repr}");
        assert_eq!(g.out_edges(0).unwrap().to_vec(), vec![0], "{repr}");
        assert_eq!(g.in_edges(0).unwrap().to_vec(), vec![0], "{repr}");
        assert!(g.add_edge(0, 0).is_err(), "{repr}");
        assert_eq!(g.num_edges(), 1, "{repr}");
    }
}

#[test]
fn test_capabilities_are_enforced() {
    for repr in LAYOUTS {
        let mut g = empty(repr, Capabilities::undirected());
        g.add_vertices(2).unwrap();
        g.add_edge(0, 1).unwrap();

        assert_eq!(
            g.add_edge(1, 0),
            Err(GraphError::EdgeAlreadyExists {
                source_vertex: 1,
                target_vertex: 0
            }),
            "{repr}"
        );
        assert_eq!(
            g.add_edge(1, 1),
            Err(GraphError::SelfEdgesNotAllowed { vertex: 1 }),
            "{repr}"
        );
        assert_eq!(g.add_edge(0, 2), Err(GraphError::NoSuchVertex(2)), "{repr}");
        assert_eq!(g.num_edges(), 1, "{repr}");
        assert_eq!(g.remove_edge(1), Err(GraphError::NoSuchEdge(1)), "{repr}");
    }
}

#[test]
fn test_undirected_incidence_is_symmetric() {
    for repr in LAYOUTS {
        let caps = Capabilities::undirected().with_self_edges(true);
        let mut g = empty(repr, caps);
        g.add_vertices(3).unwrap();
        let a = g.add_edge(0, 1).unwrap();
        let b = g.add_edge(2, 0).unwrap();
        let lp = g.add_edge(2, 2).unwrap();

        assert_eq!(sorted(g.out_edges(0).unwrap().to_vec()), vec![a, b], "{repr}");
        assert_eq!(sorted(g.in_edges(0).unwrap().to_vec()), vec![a, b], "{repr}");
        assert_eq!(sorted(g.out_edges(2).unwrap().to_vec()), vec![b, lp], "{repr}");
        assert_eq!(g.get_edge(0, 2).unwrap(), Some(b), "{repr}");
        assert_eq!(g.edge_endpoint(b, 0).unwrap(), 2, "{repr}");
        assert!(g.edge_endpoint(b, 1).is_err(), "{repr}");
    }
}

#[test]
fn test_weights_follow_swapped_elements() {
    for repr in LAYOUTS {
        let mut g = empty(repr, Capabilities::directed());
        g.add_vertices(4).unwrap();
        let color = g.vertex_weights_mut().add("color", 0u8).unwrap();
        for v in 0..4 {
            color.set(v, 10 + v as u8).unwrap();
        }
        for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            g.add_edge(u, v).unwrap();
        }
        let cost = g.edge_weights_mut().add("cost", -1i64).unwrap();
        for e in 0..4 {
            cost.set(e, e as i64 * 100).unwrap();
        }

        g.remove_edge(1).unwrap();
        let cost = g.edge_weights().get::<i64>("cost").unwrap();
        assert_eq!(cost.get(1), Ok(&300), "{repr}");
        assert_eq!(cost.len(), 3, "{repr}");

        g.remove_vertex(0).unwrap();
        let color = g.vertex_weights().get::<u8>("color").unwrap();
        assert_eq!(color.values(), &[13, 11, 12], "{repr}");
        // only (2, 3) survives and vertex 3 is now 0
        assert_eq!(g.num_edges(), 1, "{repr}");
        assert_eq!(g.edge_source(0).unwrap(), 2, "{repr}");
        assert_eq!(g.edge_target(0).unwrap(), 0, "{repr}");
        assert_eq!(g.edge_weights().get::<i64>("cost").unwrap().get(0), Ok(&200), "{repr}");

        let v = g.add_vertex().unwrap();
        assert_eq!(g.vertex_weights().get::<u8>("color").unwrap().get(v), Ok(&0), "{repr}");
    }
}

#[test]
fn test_listeners_see_every_removal() {
    for repr in LAYOUTS {
        let mut g = empty(repr, Capabilities::directed());
        let key = g.edge_listeners().add(Recorder::default());
        g.add_vertices(3).unwrap();
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 0).unwrap();

        g.remove_edge(0).unwrap();
        g.remove_edge(1).unwrap();
        g.clear_edges().unwrap();

        let events = &g.edges().listener(&key).unwrap().0;
        assert_eq!(
            events,
            &vec![
                IndexRemoval::SwappedAndRemoved { removed: 0, swapped: 2 },
                IndexRemoval::RemovedLast(1),
                IndexRemoval::RemovedLast(0),
            ],
            "{repr}"
        );
        let recorder = g.edge_listeners().remove(key).unwrap();
        assert_eq!(recorder.0.len(), 3);
        assert_eq!(g.edges().listener_count(), 0);
    }
}

#[test]
fn test_clear_removes_last_first() {
    for repr in LAYOUTS {
        let mut g = empty(repr, Capabilities::undirected());
        let key = g.vertex_listeners().add(Recorder::default());
        g.add_vertices(3).unwrap();
        g.add_edge(0, 2).unwrap();
        g.clear().unwrap();

        let events = &g.vertices().listener(&key).unwrap().0;
        assert_eq!(
            events,
            &vec![
                IndexRemoval::RemovedLast(2),
                IndexRemoval::RemovedLast(1),
                IndexRemoval::RemovedLast(0),
            ],
            "{repr}"
        );
        assert_eq!(g.num_vertices(), 0);
        assert_eq!(g.num_edges(), 0);
        assert_eq!(g.add_vertex(), Ok(0));
    }
}

#[test]
fn test_reverse_and_move_edge() {
    for repr in LAYOUTS {
        let mut g = empty(repr, Capabilities::directed());
        g.add_vertices(3).unwrap();
        let e = g.add_edge(0, 1).unwrap();
        let f = g.add_edge(1, 0).unwrap();

        // reversing would duplicate f
        assert!(matches!(g.reverse_edge(e), Err(GraphError::EdgeAlreadyExists { .. })));
        assert_eq!(g.edge_source(e).unwrap(), 0, "{repr}");

        g.move_edge(f, 2, 0).unwrap();
        g.reverse_edge(e).unwrap();
        assert_eq!((g.edge_source(e).unwrap(), g.edge_target(e).unwrap()), (1, 0));
        assert_eq!(g.get_edge(2, 0).unwrap(), Some(f), "{repr}");
        assert_eq!(g.get_edge(1, 0).unwrap(), Some(e), "{repr}");
        assert_eq!(sorted(g.in_edges(0).unwrap().to_vec()), vec![e, f], "{repr}");
        assert!(g.out_edges(0).unwrap().is_empty(), "{repr}");

        assert_eq!(g.move_edge(f, 2, 2), Err(GraphError::SelfEdgesNotAllowed { vertex: 2 }));
        assert_eq!(g.move_edge(f, 1, 0).unwrap_err().to_string(), "edge (1, 0) already exists");
        // moving an edge onto its own endpoints is a no-op
        g.move_edge(f, 2, 0).unwrap();
        assert_eq!(g.get_edge(2, 0).unwrap(), Some(f), "{repr}");
    }
}

#[test]
fn test_remove_directional_edges_of() {
    for repr in LAYOUTS {
        let caps = Capabilities::directed().with_self_edges(true);
        let mut g = empty(repr, caps);
        g.add_vertices(3).unwrap();
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 0).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(1, 1).unwrap();
        g.add_edge(2, 0).unwrap();

        g.remove_out_edges_of(1).unwrap();
        assert_eq!(g.num_edges(), 2, "{repr}");
        assert!(g.out_edges(1).unwrap().is_empty(), "{repr}");
        assert!(g.get_edge(0, 1).unwrap().is_some(), "{repr}");

        g.remove_in_edges_of(0).unwrap();
        assert_eq!(g.num_edges(), 1, "{repr}");
        g.remove_edges_of(1).unwrap();
        assert_eq!(g.num_edges(), 0, "{repr}");
        assert_eq!(g.num_vertices(), 3, "{repr}");
    }
}

#[test]
fn test_copy_preserves_indices() {
    let caps = Capabilities::undirected().with_self_edges(true);
    let mut source = empty(Representation::Linked, caps);
    source.add_vertices(4).unwrap();
    for (u, v) in [(3, 1), (0, 0), (2, 3), (1, 0)] {
        source.add_edge(u, v).unwrap();
    }
    source.edge_weights_mut().add("w", 0i32).unwrap().set(2, 5).unwrap();

    for repr in LAYOUTS {
        let options = GraphOptions::new(caps).representation(repr);
        let copy = Graph::copy_of(&source, &options, true).unwrap();
        assert_eq!(copy.endpoints().as_slice(), source.endpoints().as_slice(), "{repr}");
        assert_eq!(copy.edge_weights().get::<i32>("w").unwrap().get(2), Ok(&5), "{repr}");

        let bare = Graph::copy_of(&source, &options, false).unwrap();
        assert!(!bare.edge_weights().contains("w"), "{repr}");
        assert_eq!(bare.edge_weights().len(), 4, "{repr}");
    }

    let directed = GraphOptions::new(Capabilities::directed());
    assert_eq!(
        Graph::copy_of(&source, &directed, false).unwrap_err(),
        GraphError::DirectednessMismatch {
            expected: true,
            found: false
        }
    );
    let strict = GraphOptions::new(Capabilities::undirected());
    assert!(matches!(
        Graph::copy_of(&source, &strict, false),
        Err(GraphError::SelfEdgesNotAllowed { vertex: 0 })
    ));
}

#[test]
fn test_immutable_copy_round_trip() {
    let mut g = empty(Representation::Array, Capabilities::directed());
    g.add_vertices(3).unwrap();
    g.add_edge(2, 1).unwrap();
    g.add_edge(0, 1).unwrap();
    let snapshot = g.immutable_copy(true);
    assert!(snapshot.is_immutable());
    assert_eq!(snapshot.representation(), None);
    assert!(snapshot.as_csr().unwrap().has_fast_lookup());
    assert_eq!(snapshot.get_edge(0, 1).unwrap(), Some(1));

    let options = GraphOptions::new(Capabilities::directed()).representation(Representation::Matrix);
    let back = Graph::copy_of(&snapshot, &options, true).unwrap();
    assert_eq!(back.representation(), Some(Representation::Matrix));
    assert_eq!(back.endpoints().as_slice(), g.endpoints().as_slice());
}
