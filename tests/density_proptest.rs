use std::collections::BTreeMap;

use indexgraph::{
    Capabilities, Graph, GraphOptions, IndexGraph, MutableIndexGraph, Representation,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Operation {
    AddVertex,
    AddEdge(usize, usize),
    RemoveEdge(usize),
    RemoveVertex(usize),
    ReverseEdge(usize),
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => Just(Operation::AddVertex),
        5 => (any::<usize>(), any::<usize>()).prop_map(|(u, v)| Operation::AddEdge(u, v)),
        2 => any::<usize>().prop_map(Operation::RemoveEdge),
        1 => any::<usize>().prop_map(Operation::RemoveVertex),
        1 => any::<usize>().prop_map(Operation::ReverseEdge),
    ]
}

fn layout() -> impl Strategy<Value = Representation> {
    prop_oneof![
        Just(Representation::Array),
        Just(Representation::Hashmap),
        Just(Representation::Matrix),
        Just(Representation::Linked),
    ]
}

/// Index-free model: vertices and edges are named by labels stored in weights.
#[derive(Default)]
struct Model {
    directed: bool,
    vertices: Vec<u32>,
    edges: BTreeMap<u32, (u32, u32)>,
    next_label: u32,
}

impl Model {
    fn label(&mut self) -> u32 {
        self.next_label += 1;
        self.next_label
    }

    fn connects(&self, u: u32, v: u32) -> bool {
        self.edges
            .values()
            .any(|&(s, t)| (s, t) == (u, v) || (!self.directed && (t, s) == (u, v)))
    }
}

fn vertex_label(g: &Graph, v: usize) -> u32 {
    *g.vertex_weights().get::<u32>("label").unwrap().get(v).unwrap()
}

fn edge_label(g: &Graph, e: usize) -> u32 {
    *g.edge_weights().get::<u32>("label").unwrap().get(e).unwrap()
}

fn check(g: &Graph, model: &Model) {
    assert_eq!(g.num_vertices(), model.vertices.len(), "vertex count");
    assert_eq!(g.num_edges(), model.edges.len(), "edge count");

    let mut labels: Vec<_> = (0..g.num_vertices()).map(|v| vertex_label(g, v)).collect();
    labels.sort_unstable();
    let mut expected = model.vertices.clone();
    expected.sort_unstable();
    assert_eq!(labels, expected, "vertex labels");

    let mut found = BTreeMap::new();
    for e in g.edges() {
        let s = vertex_label(g, g.edge_source(e).unwrap());
        let t = vertex_label(g, g.edge_target(e).unwrap());
        found.insert(edge_label(g, e), (s, t));
    }
    assert_eq!(found, model.edges, "edge endpoints");

    for v in g.vertices() {
        let mut out = g.out_edges(v).unwrap().to_vec();
        out.sort_unstable();
        let mut incident: Vec<_> = g
            .edges()
            .iter()
            .filter(|&e| {
                let (s, t) = (g.edge_source(e).unwrap(), g.edge_target(e).unwrap());
                s == v || (!g.is_directed() && t == v)
            })
            .collect();
        incident.sort_unstable();
        assert_eq!(out, incident, "out edges of {v}");
        for &e in &out {
            assert!(
                g.get_edge(v, g.edge_endpoint(e, v).unwrap()).unwrap().is_some(),
                "lookup of edge {e}"
            );
        }
    }
}

fn run(repr: Representation, directed: bool, ops: Vec<Operation>) {
    let caps = Capabilities {
        directed,
        self_edges: true,
        parallel_edges: repr.supports_parallel_edges(),
    };
    let mut g = Graph::new(&GraphOptions::new(caps).representation(repr)).unwrap();
    g.vertex_weights_mut().add("label", 0u32).unwrap();
    g.edge_weights_mut().add("label", 0u32).unwrap();
    let mut model = Model {
        directed,
        ..Model::default()
    };

    for op in ops {
        let n = g.num_vertices();
        let m = g.num_edges();
        match op {
            Operation::AddVertex => {
                let label = model.label();
                let v = g.add_vertex().unwrap();
                assert_eq!(v, n, "new vertex index");
                g.vertex_weights_mut().get_mut::<u32>("label").unwrap().set(v, label).unwrap();
                model.vertices.push(label);
            }
            Operation::AddEdge(u, v) if n > 0 => {
                let (u, v) = (u % n, v % n);
                let (lu, lv) = (vertex_label(&g, u), vertex_label(&g, v));
                let duplicate = !caps.parallel_edges && model.connects(lu, lv);
                match g.add_edge(u, v) {
                    Ok(e) => {
                        assert!(!duplicate, "duplicate accepted");
                        assert_eq!(e, m, "new edge index");
                        let label = model.label();
                        g.edge_weights_mut().get_mut::<u32>("label").unwrap().set(e, label).unwrap();
                        model.edges.insert(label, (lu, lv));
                    }
                    Err(err) => {
                        assert!(duplicate, "unexpected error {err}");
                        assert_eq!(g.num_edges(), m);
                    }
                }
            }
            Operation::RemoveEdge(e) if m > 0 => {
                let e = e % m;
                model.edges.remove(&edge_label(&g, e));
                g.remove_edge(e).unwrap();
            }
            Operation::RemoveVertex(v) if n > 0 => {
                let v = v % n;
                let label = vertex_label(&g, v);
                model.vertices.retain(|&l| l != label);
                model.edges.retain(|_, &mut (s, t)| s != label && t != label);
                g.remove_vertex(v).unwrap();
            }
            Operation::ReverseEdge(e) if m > 0 => {
                let e = e % m;
                let label = edge_label(&g, e);
                let (s, t) = model.edges[&label];
                let blocked = directed && !caps.parallel_edges && s != t && model.connects(t, s);
                match g.reverse_edge(e) {
                    Ok(()) => {
                        assert!(!blocked, "reverse onto an existing edge");
                        model.edges.insert(label, (t, s));
                    }
                    Err(err) => assert!(blocked, "unexpected error {err}"),
                }
            }
            _ => {}
        }
        check(&g, &model);
    }

    let snapshot = g.immutable_copy(true);
    check(&snapshot, &model);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_indices_stay_dense_directed(
        repr in layout(),
        ops in proptest::collection::vec(operation(), 1..80),
    ) {
        run(repr, true, ops);
    }

    #[test]
    fn test_indices_stay_dense_undirected(
        repr in layout(),
        ops in proptest::collection::vec(operation(), 1..80),
    ) {
        run(repr, false, ops);
    }
}
