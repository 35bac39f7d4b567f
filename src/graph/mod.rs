//! Index graphs: the read contract, the mutation contract and their layouts.
//!
//! Layouts are organized into categories:
//! - `basic`: the mutable adjacency layouts (array, hashmap, matrix, linked)
//! - `compressed`: the immutable CSR snapshot
//!
//! [`Graph`] is the closed set of all of them; the layout is picked once, when
//! the graph is created, from its [`GraphOptions`](crate::GraphOptions).

use core::ops::Range;

pub mod basic;
mod builder;
pub mod compressed;
mod edge_set;
mod id_graph;
mod index_graph;

pub use basic::{
    Adjacency, ArrayGraph, HashmapGraph, LinkedGraph, MatrixGraph, MutableGraph,
};
pub use builder::IndexGraphBuilder;
pub use compressed::{CsrGraph, CsrOptions, ReIndexedGraph, ReIndexingMap};
pub use edge_set::{EdgeIter, EdgeSet};
pub use id_graph::IdGraph;
pub use index_graph::Graph;

use crate::collections::element_set::{ElementSet, Listeners};
use crate::collections::endpoints::EndpointStore;
use crate::collections::weights::WeightsManager;
use crate::error::Result;
use crate::options::Capabilities;

/// Read access shared by every layout.
pub trait IndexGraph {
    /// Capabilities fixed at construction.
    fn capabilities(&self) -> Capabilities;

    /// Returns `true` for directed graphs.
    fn is_directed(&self) -> bool {
        self.capabilities().directed
    }

    /// The vertex index space.
    fn vertices(&self) -> &ElementSet;

    /// The edge index space.
    fn edges(&self) -> &ElementSet;

    /// Number of vertices.
    fn num_vertices(&self) -> usize {
        self.vertices().len()
    }

    /// Number of edges.
    fn num_edges(&self) -> usize {
        self.edges().len()
    }

    /// Endpoint records of every edge, in edge order.
    fn endpoints(&self) -> &EndpointStore;

    /// Source of `edge`.
    ///
    /// # Errors
    /// [`GraphError::NoSuchEdge`](crate::GraphError::NoSuchEdge).
    fn edge_source(&self, edge: usize) -> Result<usize> {
        Ok(self.endpoints().get(edge)?.source())
    }

    /// Target of `edge`.
    ///
    /// # Errors
    /// [`GraphError::NoSuchEdge`](crate::GraphError::NoSuchEdge).
    fn edge_target(&self, edge: usize) -> Result<usize> {
        Ok(self.endpoints().get(edge)?.target())
    }

    /// The endpoint of `edge` other than `vertex`.
    ///
    /// # Errors
    /// "no such edge", or "no such vertex" if `vertex` is not an endpoint.
    fn edge_endpoint(&self, edge: usize, vertex: usize) -> Result<usize> {
        self.endpoints().endpoint(edge, vertex)
    }

    /// Edges leaving `vertex`; for undirected graphs, all incident edges.
    ///
    /// # Errors
    /// [`GraphError::NoSuchVertex`](crate::GraphError::NoSuchVertex).
    fn out_edges(&self, vertex: usize) -> Result<EdgeSet<'_>>;

    /// Edges entering `vertex`; for undirected graphs, all incident edges.
    ///
    /// # Errors
    /// [`GraphError::NoSuchVertex`](crate::GraphError::NoSuchVertex).
    fn in_edges(&self, vertex: usize) -> Result<EdgeSet<'_>>;

    /// Some edge from `source` to `target`, if any.
    ///
    /// # Errors
    /// "no such vertex" for either endpoint.
    fn get_edge(&self, source: usize, target: usize) -> Result<Option<usize>>;

    /// Every edge from `source` to `target`.
    ///
    /// # Errors
    /// "no such vertex" for either endpoint.
    fn get_edges(&self, source: usize, target: usize) -> Result<Vec<usize>> {
        self.vertices().check(target)?;
        let endpoints = self.endpoints();
        Ok(self
            .out_edges(source)?
            .iter()
            .filter(|&e| endpoints.record(e).opposite(source) == Some(target))
            .collect())
    }

    /// Attribute columns keyed by vertex.
    fn vertex_weights(&self) -> &WeightsManager;

    /// Attribute columns keyed by edge.
    fn edge_weights(&self) -> &WeightsManager;
}

/// Mutation contract.
///
/// Every method either succeeds completely or returns an error and leaves the
/// graph unchanged. Immutable layouts implement it by failing every structural
/// mutation with [`GraphError::Immutable`](crate::GraphError::Immutable);
/// listener registration is always allowed.
pub trait MutableIndexGraph: IndexGraph {
    /// Adds a vertex and returns its index, `num_vertices()` before the call.
    ///
    /// # Errors
    /// `Immutable` or `CapacityExceeded`.
    fn add_vertex(&mut self) -> Result<usize>;

    /// Adds `count` vertices.
    ///
    /// # Errors
    /// As [`MutableIndexGraph::add_vertex`]; nothing is added on failure.
    fn add_vertices(&mut self, count: usize) -> Result<Range<usize>>;

    /// Removes every edge incident to `vertex`, then the vertex itself. The
    /// last vertex takes over index `vertex`.
    ///
    /// # Errors
    /// `NoSuchVertex` or `Immutable`.
    fn remove_vertex(&mut self, vertex: usize) -> Result<()>;

    /// Adds an edge and returns its index.
    ///
    /// # Errors
    /// `NoSuchVertex`, `SelfEdgesNotAllowed`, `EdgeAlreadyExists`,
    /// `CapacityExceeded` or `Immutable`.
    fn add_edge(&mut self, source: usize, target: usize) -> Result<usize>;

    /// Removes `edge`. The last edge takes over index `edge`.
    ///
    /// # Errors
    /// `NoSuchEdge` or `Immutable`.
    fn remove_edge(&mut self, edge: usize) -> Result<()>;

    /// Removes every edge incident to `vertex`.
    ///
    /// # Errors
    /// `NoSuchVertex` or `Immutable`.
    fn remove_edges_of(&mut self, vertex: usize) -> Result<()>;

    /// Removes every edge leaving `vertex`.
    ///
    /// # Errors
    /// `NoSuchVertex` or `Immutable`.
    fn remove_out_edges_of(&mut self, vertex: usize) -> Result<()>;

    /// Removes every edge entering `vertex`.
    ///
    /// # Errors
    /// `NoSuchVertex` or `Immutable`.
    fn remove_in_edges_of(&mut self, vertex: usize) -> Result<()>;

    /// Exchanges the source and target of `edge`.
    ///
    /// # Errors
    /// `NoSuchEdge`, `EdgeAlreadyExists` or `Immutable`.
    fn reverse_edge(&mut self, edge: usize) -> Result<()>;

    /// Re-attaches `edge` to `(source, target)`, keeping its index and weights.
    ///
    /// # Errors
    /// As [`MutableIndexGraph::add_edge`], plus `NoSuchEdge`.
    fn move_edge(&mut self, edge: usize, source: usize, target: usize) -> Result<()>;

    /// Removes every edge.
    ///
    /// # Errors
    /// `Immutable`.
    fn clear_edges(&mut self) -> Result<()>;

    /// Removes every edge and every vertex.
    ///
    /// # Errors
    /// `Immutable`.
    fn clear(&mut self) -> Result<()>;

    /// Pre-allocates room for `capacity` vertices.
    ///
    /// # Errors
    /// `Immutable`.
    fn ensure_vertex_capacity(&mut self, capacity: usize) -> Result<()>;

    /// Pre-allocates room for `capacity` edges.
    ///
    /// # Errors
    /// `Immutable`.
    fn ensure_edge_capacity(&mut self, capacity: usize) -> Result<()>;

    /// Attribute columns keyed by vertex, for adding and writing.
    fn vertex_weights_mut(&mut self) -> &mut WeightsManager;

    /// Attribute columns keyed by edge, for adding and writing.
    fn edge_weights_mut(&mut self) -> &mut WeightsManager;

    /// Removal listeners of the vertex set.
    fn vertex_listeners(&mut self) -> Listeners<'_>;

    /// Removal listeners of the edge set.
    fn edge_listeners(&mut self) -> Listeners<'_>;
}

#[cfg(test)]
mod tests;
