//! # `indexgraph` - Dense Index Graph Storage
//!
//! Storage layer for graph algorithms: vertices and edges are dense integer
//! indices `0..n` and `0..m`, removal keeps them dense by moving the last
//! element into the freed slot, and every structure that keys data by index
//! follows those moves synchronously.
//!
//! ## Layers
//!
//! 1. **Element sets** ([`ElementSet`]):
//!    - The gap-free index space of one element kind
//!    - Swap-and-remove retirement with two removal events
//!    - Owned listeners reached through typed keys
//!
//! 2. **Weights** ([`Weights`], [`WeightsManager`]):
//!    - Columnar values keyed by index, with an explicit default
//!    - Named columns kept aligned with the element set
//!
//! 3. **Index graphs** ([`IndexGraph`], [`MutableIndexGraph`]):
//!    - Array, hashmap, matrix and linked-list mutable layouts
//!    - An immutable CSR snapshot built by counting sort
//!    - A closed [`Graph`] enum chosen once from [`GraphOptions`]
//!
//! 4. **Identifiers** ([`IdMap`], [`IdGraph`]):
//!    - Caller-chosen ids mirrored through removal events
//!
//! ## Guarantees
//!
//! - Live indices are always exactly `0..len()`.
//! - Every public mutation either succeeds completely or returns an error and
//!   leaves the graph untouched.
//! - Capabilities (directedness, self edges, parallel edges) fixed at
//!   construction are enforced on every mutation path.
//! - CSR snapshots share no state with their source.
//!
//! ## Example
//!
//! ```rust
//! use indexgraph::{Capabilities, Graph, GraphOptions, IndexGraph, MutableIndexGraph};
//!
//! let mut g = Graph::new(&GraphOptions::new(Capabilities::directed())).unwrap();
//! g.add_vertices(3).unwrap();
//! g.add_edge(0, 1).unwrap();
//! g.add_edge(1, 2).unwrap();
//! g.add_edge(0, 2).unwrap();
//!
//! // vertex 2 moves into slot 1, edge (0, 2) moves into slot 0
//! g.remove_vertex(1).unwrap();
//! assert_eq!(g.num_vertices(), 2);
//! assert_eq!(g.num_edges(), 1);
//! assert_eq!((g.edge_source(0).unwrap(), g.edge_target(0).unwrap()), (0, 1));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod collections;
pub mod error;
pub mod graph;
pub mod options;

pub use collections::{
    EdgeEndpoints,
    ElementSet,
    EndpointStore,
    GraphId,
    IdMap,
    IndexRemoval,
    IndexRemoveListener,
    ListenerKey,
    Listeners,
    WeightKind,
    Weights,
    WeightsManager,
};
pub use error::{ElementKind, GraphError, Result};
pub use graph::{
    ArrayGraph,
    CsrGraph,
    CsrOptions,
    EdgeSet,
    Graph,
    HashmapGraph,
    IdGraph,
    IndexGraph,
    IndexGraphBuilder,
    LinkedGraph,
    MatrixGraph,
    MutableGraph,
    MutableIndexGraph,
    ReIndexedGraph,
    ReIndexingMap,
};
pub use options::{Capabilities, GraphOptions, Hints, Representation};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // Endpoint records pack into a single 64-bit word.
    assert!(mem::size_of::<EdgeEndpoints>() == 8);
    assert!(mem::align_of::<EdgeEndpoints>() == 4);
};
