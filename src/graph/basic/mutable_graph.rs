//! The state every mutable layout shares, and the removal choreography.
//!
//! [`MutableGraph`] owns the vertex and edge index spaces, the endpoint table
//! and both weight managers; an [`Adjacency`] layout only keeps the incidence
//! structure. Removals are always performed here in the same order:
//!
//! 1. unthread the doomed edge (or strip every edge of the doomed vertex),
//! 2. move the last element's data into the freed slot,
//! 3. retire the index, which notifies the external listeners.
//!
//! Internal structures are therefore already consistent when a listener runs.

use core::ops::Range;

use tracing::{debug, trace};

use crate::collections::element_set::{ElementSet, Listeners};
use crate::collections::endpoints::EndpointStore;
use crate::collections::weights::WeightsManager;
use crate::error::{ElementKind, GraphError, Result};
use crate::graph::{EdgeSet, IndexGraph, MutableIndexGraph};
use crate::options::{Capabilities, GraphOptions, Representation};

/// Incidence layout plugged into a [`MutableGraph`].
///
/// Hooks receive indices the graph already validated. Endpoint records are
/// written by the graph before `add_edge` and read-only afterwards, except in
/// `remove_vertex`, where the graph rewrites the moved vertex's endpoints
/// before calling `move_vertex`.
pub trait Adjacency: Sized {
    /// The layout's tag.
    const REPRESENTATION: Representation;

    /// Empty incidence structure for `caps`.
    ///
    /// # Errors
    /// [`GraphError::UnsupportedCapability`] if the layout cannot honour `caps`.
    fn new(caps: Capabilities, vertex_capacity: usize, edge_capacity: usize) -> Result<Self>;

    /// Pre-allocates per-vertex storage.
    fn ensure_vertex_capacity(&mut self, capacity: usize);

    /// Pre-allocates per-edge storage.
    fn ensure_edge_capacity(&mut self, _capacity: usize) {}

    /// `vertex` was just allocated as the last vertex.
    fn add_vertex(&mut self, vertex: usize);

    /// Threads `edge` into the structures of both its endpoints.
    fn add_edge(&mut self, endpoints: &EndpointStore, edge: usize);

    /// Unthreads `edge` from both endpoints.
    fn unlink_edge(&mut self, endpoints: &EndpointStore, edge: usize);

    /// The linked edge `from` now has index `to`; `to` was unlinked before.
    fn rename_edge(&mut self, endpoints: &EndpointStore, from: usize, to: usize);

    /// Per-edge storage of the last edge `edge` can be dropped.
    fn pop_edge(&mut self, _edge: usize) {}

    /// The last vertex `from` moves to the isolated slot `to`.
    fn move_vertex(&mut self, from: usize, to: usize);

    /// The isolated last vertex is dropped.
    fn pop_vertex(&mut self, vertex: usize);

    /// Edges leaving `vertex` (all incident edges when undirected).
    fn out_edges<'a>(&'a self, endpoints: &'a EndpointStore, vertex: usize) -> EdgeSet<'a>;

    /// Edges entering `vertex` (all incident edges when undirected).
    fn in_edges<'a>(&'a self, endpoints: &'a EndpointStore, vertex: usize) -> EdgeSet<'a>;

    /// Some edge from `source` to `target`.
    fn find_edge(&self, endpoints: &EndpointStore, source: usize, target: usize) -> Option<usize> {
        self.out_edges(endpoints, source)
            .iter()
            .find(|&e| endpoints.record(e).opposite(source) == Some(target))
    }

    /// Every edge from `source` to `target`.
    fn find_edges(&self, endpoints: &EndpointStore, source: usize, target: usize) -> Vec<usize> {
        self.out_edges(endpoints, source)
            .iter()
            .filter(|&e| endpoints.record(e).opposite(source) == Some(target))
            .collect()
    }

    /// Drops every edge; `num_vertices` vertices stay.
    fn clear_edges(&mut self, num_vertices: usize);

    /// Drops everything.
    fn clear(&mut self);
}

/// A mutable graph over the incidence layout `A`.
pub struct MutableGraph<A> {
    caps: Capabilities,
    vertices: ElementSet,
    edges: ElementSet,
    endpoints: EndpointStore,
    vertex_weights: WeightsManager,
    edge_weights: WeightsManager,
    adjacency: A,
}

impl<A: Adjacency> MutableGraph<A> {
    /// Empty graph with the given capabilities.
    ///
    /// # Errors
    /// [`GraphError::UnsupportedCapability`] if the layout cannot honour `caps`.
    pub fn new(caps: Capabilities) -> Result<Self> {
        Self::with_capacity(caps, 0, 0)
    }

    /// Empty graph with storage for the expected number of elements.
    ///
    /// # Errors
    /// As [`MutableGraph::new`].
    pub fn with_capacity(caps: Capabilities, vertices: usize, edges: usize) -> Result<Self> {
        let adjacency = A::new(caps, vertices, edges)?;
        debug!(
            representation = %A::REPRESENTATION,
            directed = caps.directed,
            vertices,
            edges,
            "graph.mutable.created"
        );
        Ok(Self {
            caps,
            vertices: ElementSet::new(ElementKind::Vertex),
            edges: ElementSet::new(ElementKind::Edge),
            endpoints: EndpointStore::with_capacity(edges),
            vertex_weights: WeightsManager::new(ElementKind::Vertex, vertices),
            edge_weights: WeightsManager::new(ElementKind::Edge, edges),
            adjacency,
        })
    }

    /// Empty graph configured from `options`; the representation in `options`
    /// is not consulted.
    ///
    /// # Errors
    /// As [`MutableGraph::new`].
    pub fn from_options(options: &GraphOptions) -> Result<Self> {
        Self::with_capacity(
            options.capabilities,
            options.expected_vertices,
            options.expected_edges,
        )
    }

    /// The layout's tag.
    pub fn representation(&self) -> Representation {
        A::REPRESENTATION
    }

    /// The incidence structure.
    pub fn adjacency(&self) -> &A {
        &self.adjacency
    }

    pub(crate) fn set_weights(&mut self, vertex_weights: WeightsManager, edge_weights: WeightsManager) {
        debug_assert_eq!(vertex_weights.len(), self.vertices.len());
        debug_assert_eq!(edge_weights.len(), self.edges.len());
        self.vertex_weights = vertex_weights;
        self.edge_weights = edge_weights;
    }

    fn check_new_edge(&self, source: usize, target: usize, moving: Option<usize>) -> Result<()> {
        self.vertices.check(source)?;
        self.vertices.check(target)?;
        if source == target && !self.caps.self_edges {
            return Err(GraphError::SelfEdgesNotAllowed { vertex: source });
        }
        if !self.caps.parallel_edges {
            if let Some(existing) = self.adjacency.find_edge(&self.endpoints, source, target) {
                if Some(existing) != moving {
                    return Err(GraphError::EdgeAlreadyExists {
                        source_vertex: source,
                        target_vertex: target,
                    });
                }
            }
        }
        Ok(())
    }

    fn first_out_edge(&self, vertex: usize) -> Option<usize> {
        self.adjacency.out_edges(&self.endpoints, vertex).iter().next()
    }

    fn first_in_edge(&self, vertex: usize) -> Option<usize> {
        self.adjacency.in_edges(&self.endpoints, vertex).iter().next()
    }

    fn remove_edge_unchecked(&mut self, edge: usize) -> Result<()> {
        self.adjacency.unlink_edge(&self.endpoints, edge);
        let last = self.edges.len() - 1;
        if edge == last {
            self.endpoints.remove_last(edge);
            self.edge_weights.remove_last(edge);
        } else {
            self.adjacency.rename_edge(&self.endpoints, last, edge);
            self.endpoints.swap_and_remove(edge, last);
            self.edge_weights.swap_and_remove(edge, last);
        }
        self.adjacency.pop_edge(last);
        self.edges.remove_index(edge)?;
        Ok(())
    }

    fn remove_incident_edges(&mut self, vertex: usize) -> Result<()> {
        while let Some(edge) = self.first_out_edge(vertex) {
            self.remove_edge_unchecked(edge)?;
        }
        if self.caps.directed {
            while let Some(edge) = self.first_in_edge(vertex) {
                self.remove_edge_unchecked(edge)?;
            }
        }
        Ok(())
    }

    fn incident_edges(&self, vertex: usize) -> Vec<usize> {
        let mut edges = self.adjacency.out_edges(&self.endpoints, vertex).to_vec();
        if self.caps.directed {
            edges.extend(self.adjacency.in_edges(&self.endpoints, vertex));
        }
        edges
    }
}

impl<A: Adjacency> IndexGraph for MutableGraph<A> {
    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn vertices(&self) -> &ElementSet {
        &self.vertices
    }

    fn edges(&self) -> &ElementSet {
        &self.edges
    }

    fn endpoints(&self) -> &EndpointStore {
        &self.endpoints
    }

    fn out_edges(&self, vertex: usize) -> Result<EdgeSet<'_>> {
        self.vertices.check(vertex)?;
        Ok(self.adjacency.out_edges(&self.endpoints, vertex))
    }

    fn in_edges(&self, vertex: usize) -> Result<EdgeSet<'_>> {
        self.vertices.check(vertex)?;
        Ok(self.adjacency.in_edges(&self.endpoints, vertex))
    }

    fn get_edge(&self, source: usize, target: usize) -> Result<Option<usize>> {
        self.vertices.check(source)?;
        self.vertices.check(target)?;
        Ok(self.adjacency.find_edge(&self.endpoints, source, target))
    }

    fn get_edges(&self, source: usize, target: usize) -> Result<Vec<usize>> {
        self.vertices.check(source)?;
        self.vertices.check(target)?;
        Ok(self.adjacency.find_edges(&self.endpoints, source, target))
    }

    fn vertex_weights(&self) -> &WeightsManager {
        &self.vertex_weights
    }

    fn edge_weights(&self) -> &WeightsManager {
        &self.edge_weights
    }
}

impl<A: Adjacency> MutableIndexGraph for MutableGraph<A> {
    fn add_vertex(&mut self) -> Result<usize> {
        let vertex = self.vertices.new_index()?;
        self.vertex_weights.set_len(vertex + 1);
        self.adjacency.add_vertex(vertex);
        Ok(vertex)
    }

    fn add_vertices(&mut self, count: usize) -> Result<Range<usize>> {
        let range = self.vertices.add_indices(count)?;
        self.adjacency.ensure_vertex_capacity(range.end);
        self.vertex_weights.set_len(range.end);
        for vertex in range.clone() {
            self.adjacency.add_vertex(vertex);
        }
        Ok(range)
    }

    fn remove_vertex(&mut self, vertex: usize) -> Result<()> {
        self.vertices.check(vertex)?;
        trace!(vertex, "graph.vertex.remove");
        self.remove_incident_edges(vertex)?;
        let last = self.vertices.len() - 1;
        if vertex == last {
            self.adjacency.pop_vertex(vertex);
            self.vertex_weights.remove_last(vertex);
        } else {
            for edge in self.incident_edges(last) {
                self.endpoints.replace_endpoint(edge, last, vertex);
            }
            self.adjacency.move_vertex(last, vertex);
            self.vertex_weights.swap_and_remove(vertex, last);
        }
        self.vertices.remove_index(vertex)?;
        Ok(())
    }

    fn add_edge(&mut self, source: usize, target: usize) -> Result<usize> {
        self.check_new_edge(source, target, None)?;
        let edge = self.edges.new_index()?;
        self.endpoints.push(source, target);
        self.edge_weights.set_len(edge + 1);
        self.adjacency.add_edge(&self.endpoints, edge);
        Ok(edge)
    }

    fn remove_edge(&mut self, edge: usize) -> Result<()> {
        self.edges.check(edge)?;
        self.remove_edge_unchecked(edge)
    }

    fn remove_edges_of(&mut self, vertex: usize) -> Result<()> {
        self.vertices.check(vertex)?;
        self.remove_incident_edges(vertex)
    }

    fn remove_out_edges_of(&mut self, vertex: usize) -> Result<()> {
        self.vertices.check(vertex)?;
        while let Some(edge) = self.first_out_edge(vertex) {
            self.remove_edge_unchecked(edge)?;
        }
        Ok(())
    }

    fn remove_in_edges_of(&mut self, vertex: usize) -> Result<()> {
        self.vertices.check(vertex)?;
        while let Some(edge) = self.first_in_edge(vertex) {
            self.remove_edge_unchecked(edge)?;
        }
        Ok(())
    }

    fn reverse_edge(&mut self, edge: usize) -> Result<()> {
        let record = self.endpoints.get(edge)?;
        if record.is_self_edge() {
            return Ok(());
        }
        if self.caps.directed {
            self.check_new_edge(record.target(), record.source(), Some(edge))?;
        }
        self.adjacency.unlink_edge(&self.endpoints, edge);
        self.endpoints.reverse(edge);
        self.adjacency.add_edge(&self.endpoints, edge);
        Ok(())
    }

    fn move_edge(&mut self, edge: usize, source: usize, target: usize) -> Result<()> {
        self.edges.check(edge)?;
        self.check_new_edge(source, target, Some(edge))?;
        self.adjacency.unlink_edge(&self.endpoints, edge);
        self.endpoints.set(edge, source, target);
        self.adjacency.add_edge(&self.endpoints, edge);
        Ok(())
    }

    fn clear_edges(&mut self) -> Result<()> {
        debug!(edges = self.edges.len(), "graph.edges.clear");
        self.adjacency.clear_edges(self.vertices.len());
        self.endpoints.clear();
        self.edge_weights.clear();
        self.edges.clear()
    }

    fn clear(&mut self) -> Result<()> {
        self.clear_edges()?;
        self.adjacency.clear();
        self.vertex_weights.clear();
        self.vertices.clear()
    }

    fn ensure_vertex_capacity(&mut self, capacity: usize) -> Result<()> {
        self.adjacency.ensure_vertex_capacity(capacity);
        self.vertex_weights.ensure_capacity(capacity);
        Ok(())
    }

    fn ensure_edge_capacity(&mut self, capacity: usize) -> Result<()> {
        self.adjacency.ensure_edge_capacity(capacity);
        self.endpoints.ensure_capacity(capacity);
        self.edge_weights.ensure_capacity(capacity);
        Ok(())
    }

    fn vertex_weights_mut(&mut self) -> &mut WeightsManager {
        &mut self.vertex_weights
    }

    fn edge_weights_mut(&mut self) -> &mut WeightsManager {
        &mut self.edge_weights
    }

    fn vertex_listeners(&mut self) -> Listeners<'_> {
        Listeners::new(&mut self.vertices)
    }

    fn edge_listeners(&mut self) -> Listeners<'_> {
        Listeners::new(&mut self.edges)
    }
}

impl<A> core::fmt::Debug for MutableGraph<A>
where
    A: Adjacency,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MutableGraph")
            .field("representation", &A::REPRESENTATION)
            .field("capabilities", &self.caps)
            .field("vertices", &self.vertices.len())
            .field("edges", &self.endpoints.as_slice())
            .finish()
    }
}
