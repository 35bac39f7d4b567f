use indexgraph::{
    Capabilities, CsrGraph, CsrOptions, ElementKind, Graph, GraphOptions, IndexGraph,
    IndexGraphBuilder, MutableIndexGraph, Representation,
};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use proptest::prelude::*;

fn edge_list() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..12).prop_flat_map(|n| {
        (
            Just(n),
            proptest::collection::vec((0..n, 0..n), 0..40),
        )
    })
}

fn builder(directed: bool, n: usize, edges: &[(usize, usize)]) -> IndexGraphBuilder {
    let mut b = IndexGraphBuilder::new(directed);
    b.add_vertices(n).unwrap();
    b.edge_weights_mut().add("tag", 0usize).unwrap();
    for (i, &(u, v)) in edges.iter().enumerate() {
        let e = b.add_edge(u, v).unwrap();
        assert_eq!(e, i);
    }
    for i in 0..edges.len() {
        b.edge_weights_mut().get_mut::<usize>("tag").unwrap().set(i, i * 3 + 1).unwrap();
    }
    b
}

/// Sorted `(opposite, tag)` pairs of the edges leaving `v`.
fn incidence<G: IndexGraph>(g: &G, v: usize) -> Vec<(usize, usize)> {
    let tags = g.edge_weights().get::<usize>("tag").unwrap();
    let mut pairs: Vec<_> = g
        .out_edges(v)
        .unwrap()
        .iter()
        .map(|e| (g.edge_endpoint(e, v).unwrap(), *tags.get(e).unwrap()))
        .collect();
    pairs.sort_unstable();
    pairs
}

proptest! {
    #[test]
    fn test_csr_matches_mutable_graph((n, edges) in edge_list(), directed in any::<bool>(), fast in any::<bool>()) {
        let caps = Capabilities { directed, self_edges: true, parallel_edges: true };
        let options = GraphOptions::new(caps).representation(Representation::Array);
        let b = builder(directed, n, &edges);
        let mutable = b.build_mutable(&options).unwrap();

        let snapshot = CsrGraph::copy_of(&mutable, fast, true);
        let reindexed = CsrGraph::reindexed_copy_of(
            &mutable,
            CsrOptions { fast_lookup: fast, reindex_edges: true },
            true,
        );
        prop_assert_eq!(reindexed.graph.num_edges(), edges.len());

        for v in 0..n {
            let expected = incidence(&mutable, v);
            prop_assert_eq!(&incidence(&snapshot, v), &expected);
            prop_assert_eq!(&incidence(&reindexed.graph, v), &expected);
            prop_assert_eq!(
                snapshot.in_edges(v).unwrap().len(),
                mutable.in_edges(v).unwrap().len()
            );
            for u in 0..n {
                let mut want = mutable.get_edges(v, u).unwrap();
                want.sort_unstable();
                let mut got = snapshot.get_edges(v, u).unwrap();
                got.sort_unstable();
                prop_assert_eq!(&got, &want);
                prop_assert_eq!(snapshot.get_edge(v, u).unwrap().is_some(), !want.is_empty());
            }
        }

        if let Some(map) = &reindexed.edges_reindexing {
            let expected: Vec<u32> = (0..edges.len() as u32).collect();
            if directed {
                prop_assert_eq!(reindexed.graph.out_edge_array(), &expected[..]);
            }
            for orig in 0..edges.len() {
                let re = map.orig_to_reindexed(ElementKind::Edge, orig).unwrap();
                prop_assert_eq!(map.reindexed_to_orig(ElementKind::Edge, re).unwrap(), orig);
                prop_assert_eq!(reindexed.graph.edge_source(re).unwrap(), edges[orig].0);
                prop_assert_eq!(reindexed.graph.edge_target(re).unwrap(), edges[orig].1);
            }
        }

        // back to a mutable layout
        let back = Graph::copy_of(&reindexed.graph, &options, true).unwrap();
        for v in 0..n {
            prop_assert_eq!(incidence(&back, v), incidence(&mutable, v));
        }
    }

    #[test]
    fn test_csr_degrees_match_petgraph((n, edges) in edge_list()) {
        let mut reference = DiGraph::<(), ()>::new();
        let nodes: Vec<NodeIndex> = (0..n).map(|_| reference.add_node(())).collect();
        for &(u, v) in &edges {
            reference.add_edge(nodes[u], nodes[v], ());
        }
        let csr = builder(true, n, &edges).build();

        for v in 0..n {
            prop_assert_eq!(
                csr.out_edges(v).unwrap().len(),
                reference.neighbors_directed(nodes[v], Direction::Outgoing).count()
            );
            prop_assert_eq!(
                csr.in_edges(v).unwrap().len(),
                reference.neighbors_directed(nodes[v], Direction::Incoming).count()
            );
            for u in 0..n {
                prop_assert_eq!(
                    csr.get_edges(v, u).unwrap().len(),
                    reference.edges_connecting(nodes[v], nodes[u]).count()
                );
            }
        }
    }
}

#[test]
fn test_fast_lookup_over_five_vertices() {
    let edges = [(0, 1), (0, 4), (1, 2), (3, 0), (0, 3), (2, 4)];
    let mut b = IndexGraphBuilder::directed();
    b.add_vertices(5).unwrap();
    for &(u, v) in &edges {
        b.add_edge(u, v).unwrap();
    }
    let scan = b.build();
    b.set_fast_lookup(true);
    let fast = b.build();
    assert!(fast.has_fast_lookup());
    assert!(!scan.has_fast_lookup());

    for (e, &(u, v)) in edges.iter().enumerate() {
        assert_eq!(fast.get_edge(u, v).unwrap(), Some(e));
        assert_eq!(fast.get_edge(u, v).unwrap(), scan.get_edge(u, v).unwrap());
    }
    assert_eq!(fast.get_edge(4, 0).unwrap(), None);
    assert_eq!(fast.get_edge(1, 0).unwrap(), None);
    assert!(!fast.contains_parallel_edges());
    assert!(!fast.contains_self_edges());
}

#[test]
fn test_snapshot_survives_source_mutation() {
    let options = GraphOptions::new(Capabilities::undirected());
    let mut g = Graph::new(&options).unwrap();
    g.add_vertices(3).unwrap();
    g.add_edge(0, 1).unwrap();
    g.add_edge(1, 2).unwrap();
    let snapshot = g.immutable_copy(false);

    g.remove_vertex(1).unwrap();
    g.add_edge(0, 1).unwrap();
    assert_eq!(snapshot.num_vertices(), 3);
    assert_eq!(snapshot.num_edges(), 2);
    assert_eq!(snapshot.out_edges(1).unwrap().len(), 2);

    let shared = std::sync::Arc::new(snapshot);
    let readers: Vec<_> = (0..3)
        .map(|v| {
            let graph = std::sync::Arc::clone(&shared);
            std::thread::spawn(move || graph.out_edges(v).unwrap().len())
        })
        .collect();
    let degrees: Vec<_> = readers.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(degrees, vec![1, 2, 1]);
}
