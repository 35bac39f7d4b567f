use indexgraph::{
    Capabilities, Graph, GraphError, GraphOptions, Hints, IndexGraph, MutableIndexGraph,
    Representation,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_options_load_from_json() {
    init_tracing();
    let json = r#"{
        "capabilities": { "directed": false, "self_edges": true, "parallel_edges": true },
        "hints": { "fast_edge_removal": true },
        "expected_vertices": 16
    }"#;
    let options: GraphOptions = serde_json::from_str(json).unwrap();
    assert_eq!(options.representation, None);
    assert_eq!(options.expected_edges, 0);
    assert!(!options.fast_lookup);
    assert_eq!(options.resolve_representation().unwrap(), Representation::Linked);

    let g = Graph::new(&options).unwrap();
    assert_eq!(g.representation(), Some(Representation::Linked));
    assert!(!g.is_directed());

    let round_trip: GraphOptions =
        serde_json::from_str(&serde_json::to_string(&options).unwrap()).unwrap();
    assert_eq!(round_trip, options);
}

#[test]
fn test_explicit_representation_must_fit_capabilities() {
    init_tracing();
    let multi = Capabilities::directed().with_parallel_edges(true);
    for repr in [Representation::Hashmap, Representation::Matrix] {
        let options = GraphOptions::new(multi).representation(repr);
        assert!(matches!(
            Graph::new(&options),
            Err(GraphError::UnsupportedCapability {
                capability: "parallel edges",
                ..
            })
        ));
    }
    let options: GraphOptions =
        serde_json::from_str(r#"{ "representation": "matrix" }"#).unwrap();
    assert_eq!(Graph::new(&options).unwrap().representation(), Some(Representation::Matrix));
}

#[test]
fn test_dense_hint_picks_matrix() {
    init_tracing();
    let options = GraphOptions::new(Capabilities::directed())
        .hints(Hints {
            dense_graph: true,
            ..Hints::default()
        })
        .expected(8, 64);
    let mut g = Graph::new(&options).unwrap();
    assert_eq!(g.representation(), Some(Representation::Matrix));
    g.add_vertices(8).unwrap();
    for u in 0..8 {
        for v in 0..8 {
            if u != v {
                g.add_edge(u, v).unwrap();
            }
        }
    }
    assert_eq!(g.num_edges(), 56);
    assert_eq!(g.out_edges(3).unwrap().len(), 7);
    assert_eq!(g.in_edges(3).unwrap().len(), 7);
}

#[test]
fn test_errors_render_readably() {
    assert_eq!(GraphError::NoSuchVertex(3).to_string(), "no such vertex: 3");
    assert_eq!(
        GraphError::Immutable("add edge").to_string(),
        "graph is immutable, can't add edge"
    );
    assert_eq!(
        GraphError::DirectednessMismatch {
            expected: true,
            found: false
        }
        .to_string(),
        "directedness mismatch: expected directed, found undirected"
    );
}
