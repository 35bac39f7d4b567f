//! Staging area for bulk loading.
//!
//! The builder records vertices, edge endpoints and weights without building
//! any incidence structure, then produces a graph in one pass.

use core::ops::Range;

use tracing::debug;

use crate::collections::element_set::ElementSet;
use crate::collections::endpoints::EndpointStore;
use crate::collections::weights::WeightsManager;
use crate::error::{ElementKind, Result};
use crate::graph::compressed::{CsrGraph, CsrOptions, ReIndexedGraph};
use crate::graph::{Graph, IndexGraph};
use crate::options::{Capabilities, GraphOptions};

/// Collects a graph's elements before it is built.
#[derive(Debug)]
pub struct IndexGraphBuilder {
    directed: bool,
    fast_lookup: bool,
    vertices: ElementSet,
    edges: ElementSet,
    endpoints: EndpointStore,
    vertex_weights: WeightsManager,
    edge_weights: WeightsManager,
}

impl IndexGraphBuilder {
    /// Empty builder.
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            fast_lookup: false,
            vertices: ElementSet::new(ElementKind::Vertex),
            edges: ElementSet::new(ElementKind::Edge),
            endpoints: EndpointStore::new(),
            vertex_weights: WeightsManager::new(ElementKind::Vertex, 0),
            edge_weights: WeightsManager::new(ElementKind::Edge, 0),
        }
    }

    /// Empty builder for graphs described by `options`: directedness and
    /// CSR fast lookup come from the options, storage is pre-sized to the
    /// expected element counts.
    pub fn from_options(options: &GraphOptions) -> Self {
        let mut builder = Self::new(options.capabilities.directed);
        builder.fast_lookup = options.fast_lookup;
        builder.ensure_capacity(options.expected_vertices, options.expected_edges);
        builder
    }

    /// Empty builder for a directed graph.
    pub fn directed() -> Self {
        Self::new(true)
    }

    /// Empty builder for an undirected graph.
    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// Builder pre-loaded with `graph`'s vertices and edges, at the same
    /// indices.
    pub fn copy_of<G: IndexGraph + ?Sized>(graph: &G, copy_weights: bool) -> Self {
        let mut builder = Self::new(graph.is_directed());
        builder.vertices = ElementSet::with_len(ElementKind::Vertex, graph.num_vertices());
        builder.edges = ElementSet::with_len(ElementKind::Edge, graph.num_edges());
        builder.endpoints = graph.endpoints().clone();
        if copy_weights {
            builder.vertex_weights = graph.vertex_weights().copy(false);
            builder.edge_weights = graph.edge_weights().copy(false);
        } else {
            builder.vertex_weights.set_len(graph.num_vertices());
            builder.edge_weights.set_len(graph.num_edges());
        }
        builder
    }

    /// Returns `true` if the built graph will be directed.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Requests binary-search lookup in built snapshots.
    pub fn set_fast_lookup(&mut self, enabled: bool) {
        self.fast_lookup = enabled;
    }

    /// Number of staged vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of staged edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Staged endpoints, in edge order.
    pub fn endpoints(&self) -> &EndpointStore {
        &self.endpoints
    }

    /// Stages a vertex.
    ///
    /// # Errors
    /// [`GraphError::CapacityExceeded`](crate::GraphError::CapacityExceeded).
    pub fn add_vertex(&mut self) -> Result<usize> {
        let vertex = self.vertices.new_index()?;
        self.vertex_weights.set_len(vertex + 1);
        Ok(vertex)
    }

    /// Stages `count` vertices.
    ///
    /// # Errors
    /// [`GraphError::CapacityExceeded`](crate::GraphError::CapacityExceeded).
    pub fn add_vertices(&mut self, count: usize) -> Result<Range<usize>> {
        let range = self.vertices.add_indices(count)?;
        self.vertex_weights.set_len(range.end);
        Ok(range)
    }

    /// Stages an edge between two staged vertices.
    ///
    /// # Errors
    /// [`GraphError::NoSuchVertex`](crate::GraphError::NoSuchVertex) or
    /// [`GraphError::CapacityExceeded`](crate::GraphError::CapacityExceeded).
    pub fn add_edge(&mut self, source: usize, target: usize) -> Result<usize> {
        self.vertices.check(source)?;
        self.vertices.check(target)?;
        let edge = self.edges.new_index()?;
        self.endpoints.push(source, target);
        self.edge_weights.set_len(edge + 1);
        Ok(edge)
    }

    /// Pre-allocates room for `vertices` and `edges` elements.
    pub fn ensure_capacity(&mut self, vertices: usize, edges: usize) {
        self.vertex_weights.ensure_capacity(vertices);
        self.edge_weights.ensure_capacity(edges);
        self.endpoints.ensure_capacity(edges);
    }

    /// Columns keyed by staged vertex.
    pub fn vertex_weights_mut(&mut self) -> &mut WeightsManager {
        &mut self.vertex_weights
    }

    /// Columns keyed by staged edge.
    pub fn edge_weights_mut(&mut self) -> &mut WeightsManager {
        &mut self.edge_weights
    }

    /// Columns keyed by staged vertex.
    pub fn vertex_weights(&self) -> &WeightsManager {
        &self.vertex_weights
    }

    /// Columns keyed by staged edge.
    pub fn edge_weights(&self) -> &WeightsManager {
        &self.edge_weights
    }

    /// Drops every staged element; weight columns stay registered.
    pub fn clear(&mut self) {
        self.vertices = ElementSet::new(ElementKind::Vertex);
        self.edges = ElementSet::new(ElementKind::Edge);
        self.endpoints.clear();
        self.vertex_weights.clear();
        self.edge_weights.clear();
    }

    fn snapshot_caps(&self) -> Capabilities {
        Capabilities {
            directed: self.directed,
            self_edges: true,
            parallel_edges: true,
        }
    }

    /// Builds an immutable snapshot with the staged indices.
    pub fn build(&self) -> CsrGraph {
        self.build_csr(CsrOptions {
            fast_lookup: self.fast_lookup,
            reindex_edges: false,
        })
        .graph
    }

    /// Builds an immutable snapshot, renumbering edges into scatter order when
    /// `reindex_edges` is set.
    pub fn reindex_and_build(&self, reindex_edges: bool) -> ReIndexedGraph {
        self.build_csr(CsrOptions {
            fast_lookup: self.fast_lookup,
            reindex_edges,
        })
    }

    fn build_csr(&self, options: CsrOptions) -> ReIndexedGraph {
        debug!(
            vertices = self.num_vertices(),
            edges = self.num_edges(),
            "builder.build"
        );
        CsrGraph::build(
            self.snapshot_caps(),
            self.num_vertices(),
            &self.endpoints,
            Some((&self.vertex_weights, &self.edge_weights)),
            options,
        )
    }

    /// Builds a mutable graph with the staged indices.
    ///
    /// # Errors
    /// [`GraphError::DirectednessMismatch`] if `options` disagree on
    /// directedness, or whatever `add_edge` reports for staged edges the
    /// capabilities reject.
    ///
    /// [`GraphError::DirectednessMismatch`]: crate::GraphError::DirectednessMismatch
    pub fn build_mutable(&self, options: &GraphOptions) -> Result<Graph> {
        // the snapshot is only a readable view of the staged elements
        let staged = self.build_csr(CsrOptions::default()).graph;
        Graph::copy_of(&staged, options, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MutableIndexGraph;
    use crate::options::Representation;
    use crate::GraphError;

    fn triangle() -> IndexGraphBuilder {
        let mut builder = IndexGraphBuilder::directed();
        builder.add_vertices(3).unwrap();
        builder.add_edge(0, 1).unwrap();
        builder.add_edge(1, 2).unwrap();
        builder.add_edge(2, 0).unwrap();
        builder
    }

    #[test]
    fn test_edges_need_staged_vertices() {
        let mut builder = IndexGraphBuilder::undirected();
        builder.add_vertex().unwrap();
        assert_eq!(builder.add_edge(0, 1), Err(GraphError::NoSuchVertex(1)));
        assert_eq!(builder.num_edges(), 0);
        assert_eq!(builder.add_edge(0, 0), Ok(0));
    }

    #[test]
    fn test_build_keeps_indices_and_weights() {
        let mut builder = triangle();
        let cost = builder.edge_weights_mut().add("cost", 0u32).unwrap();
        cost.set(2, 7).unwrap();

        let csr = builder.build();
        assert_eq!(csr.num_vertices(), 3);
        assert_eq!(csr.edge_source(2).unwrap(), 2);
        assert_eq!(csr.edge_target(2).unwrap(), 0);
        assert_eq!(csr.get_edge(1, 2).unwrap(), Some(1));
        assert_eq!(csr.edge_weights().get::<u32>("cost").unwrap().get(2), Ok(&7));
        assert!(csr.edge_weights().is_frozen());
    }

    #[test]
    fn test_reindex_and_build_reports_the_map() {
        let mut builder = IndexGraphBuilder::directed();
        builder.add_vertices(2).unwrap();
        builder.add_edge(1, 0).unwrap();
        builder.add_edge(0, 1).unwrap();

        let reindexed = builder.reindex_and_build(true);
        let map = reindexed.edges_reindexing.expect("edges were permuted");
        assert_eq!(map.orig_to_reindexed_slice(), &[1, 0]);
        assert_eq!(reindexed.graph.edge_source(0).unwrap(), 0);
    }

    #[test]
    fn test_build_mutable_honours_capabilities() {
        let mut builder = triangle();
        builder.add_edge(0, 0).unwrap();

        let strict = GraphOptions::new(Capabilities::directed());
        assert_eq!(
            builder.build_mutable(&strict).unwrap_err(),
            GraphError::SelfEdgesNotAllowed { vertex: 0 }
        );

        let loose = GraphOptions::new(Capabilities::directed().with_self_edges(true))
            .representation(Representation::Linked);
        let mut graph = builder.build_mutable(&loose).unwrap();
        assert_eq!(graph.representation(), Some(Representation::Linked));
        assert_eq!(graph.num_edges(), 4);
        graph.remove_edge(0).unwrap();
        assert_eq!(graph.edge_source(0).unwrap(), 0);
        assert_eq!(graph.edge_target(0).unwrap(), 0);

        let undirected = GraphOptions::new(Capabilities::undirected());
        assert!(matches!(
            builder.build_mutable(&undirected),
            Err(GraphError::DirectednessMismatch { .. })
        ));
    }

    #[test]
    fn test_from_options_reads_directedness_and_fast_lookup() {
        let options = GraphOptions::new(Capabilities::undirected())
            .fast_lookup(true)
            .expected(4, 8);
        let mut builder = IndexGraphBuilder::from_options(&options);
        assert!(!builder.is_directed());
        builder.add_vertices(3).unwrap();
        builder.add_edge(2, 0).unwrap();
        builder.add_edge(1, 2).unwrap();

        let csr = builder.build();
        assert!(csr.has_fast_lookup());
        assert!(!csr.is_directed());
        assert_eq!(csr.get_edge(0, 2).unwrap(), Some(0));
        assert_eq!(csr.get_edge(2, 1).unwrap(), Some(1));

        let plain = IndexGraphBuilder::from_options(&GraphOptions::new(Capabilities::directed()));
        assert!(plain.is_directed());
        assert!(!plain.build().has_fast_lookup());
    }

    #[test]
    fn test_copy_of_then_clear() {
        let source = triangle().build();
        let mut builder = IndexGraphBuilder::copy_of(&source, false);
        assert_eq!(builder.num_edges(), 3);
        builder.add_edge(0, 2).unwrap();
        assert_eq!(builder.build().get_edge(0, 2).unwrap(), Some(3));

        builder.clear();
        assert_eq!(builder.num_vertices(), 0);
        assert!(builder.endpoints().is_empty());
    }
}
