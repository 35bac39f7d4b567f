//! Graphs addressed by caller-chosen identifiers.
//!
//! [`IdGraph`] pairs an index [`Graph`] with one [`IdMap`] per element kind.
//! The maps are registered as remove listeners on the graph's element sets,
//! so every swap-and-remove the graph performs is mirrored in the maps before
//! the removing call returns.

use tracing::debug;

use crate::collections::element_set::ListenerKey;
use crate::collections::id_map::{GraphId, IdMap};
use crate::collections::weights::WeightsManager;
use crate::error::{ElementKind, Result};
use crate::graph::compressed::{CsrGraph, CsrOptions};
use crate::graph::{Graph, IndexGraph, MutableIndexGraph};
use crate::options::GraphOptions;

/// A graph whose vertices and edges are named by identifiers of type `K`.
///
/// ```
/// use indexgraph::{Capabilities, GraphOptions, IdGraph};
///
/// let mut g = IdGraph::<u64>::new(&GraphOptions::new(Capabilities::directed())).unwrap();
/// g.add_vertex(10).unwrap();
/// g.add_vertex(20).unwrap();
/// g.add_edge(10, 20, 7).unwrap();
/// assert_eq!(g.get_edge(10, 20).unwrap(), Some(7));
///
/// g.remove_vertex(10).unwrap();
/// assert_eq!(g.num_edges(), 0);
/// assert_eq!(g.vertex_index_map().index_of(20).unwrap(), 0);
/// ```
#[derive(Debug)]
pub struct IdGraph<K: GraphId> {
    graph: Graph,
    vertex_ids: ListenerKey<IdMap<K>>,
    edge_ids: ListenerKey<IdMap<K>>,
}

impl<K: GraphId> IdGraph<K> {
    /// Empty graph built from `options`.
    ///
    /// # Errors
    /// As [`Graph::new`].
    pub fn new(options: &GraphOptions) -> Result<Self> {
        let graph = Graph::new(options)?;
        Ok(Self::attach(
            graph,
            IdMap::with_capacity(ElementKind::Vertex, options.expected_vertices),
            IdMap::with_capacity(ElementKind::Edge, options.expected_edges),
        ))
    }

    fn attach(mut graph: Graph, vertex_map: IdMap<K>, edge_map: IdMap<K>) -> Self {
        debug_assert_eq!(vertex_map.len(), graph.num_vertices());
        debug_assert_eq!(edge_map.len(), graph.num_edges());
        let vertex_ids = graph.vertex_listeners().add(vertex_map);
        let edge_ids = graph.edge_listeners().add(edge_map);
        Self {
            graph,
            vertex_ids,
            edge_ids,
        }
    }

    /// The underlying index graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Identifier map of the vertices.
    pub fn vertex_index_map(&self) -> &IdMap<K> {
        self.graph
            .vertices()
            .listener(&self.vertex_ids)
            .expect("vertex id map stays registered")
    }

    /// Identifier map of the edges.
    pub fn edge_index_map(&self) -> &IdMap<K> {
        self.graph
            .edges()
            .listener(&self.edge_ids)
            .expect("edge id map stays registered")
    }

    fn vertex_map_mut(&mut self) -> &mut IdMap<K> {
        let key = self.vertex_ids;
        self.graph
            .vertex_listeners()
            .get_mut(&key)
            .expect("vertex id map stays registered")
    }

    fn edge_map_mut(&mut self) -> &mut IdMap<K> {
        let key = self.edge_ids;
        self.graph
            .edge_listeners()
            .get_mut(&key)
            .expect("edge id map stays registered")
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.graph.num_vertices()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.graph.num_edges()
    }

    /// Vertex identifiers, in index order.
    pub fn vertices(&self) -> &[K] {
        self.vertex_index_map().ids()
    }

    /// Edge identifiers, in index order.
    pub fn edges(&self) -> &[K] {
        self.edge_index_map().ids()
    }

    /// Adds a vertex named `id`.
    ///
    /// # Errors
    /// [`GraphError::NegativeId`](crate::GraphError::NegativeId),
    /// [`GraphError::DuplicateId`](crate::GraphError::DuplicateId), or whatever
    /// the graph reports (e.g. `Immutable` for snapshots).
    pub fn add_vertex(&mut self, id: K) -> Result<()> {
        self.vertex_index_map().check_new_id(id)?;
        let index = self.graph.add_vertex()?;
        let mapped = self.vertex_map_mut().push(id)?;
        debug_assert_eq!(index, mapped);
        Ok(())
    }

    /// Adds one vertex per identifier. Either every vertex is added or none is.
    ///
    /// # Errors
    /// As [`IdGraph::add_vertex`], including duplicates within `ids`.
    pub fn add_vertices<I: IntoIterator<Item = K>>(&mut self, ids: I) -> Result<()> {
        let start = self.vertex_index_map().len();
        let count = self.vertex_map_mut().push_all(ids)?;
        if let Err(err) = self.graph.add_vertices(count) {
            self.vertex_map_mut().truncate(start);
            return Err(err);
        }
        Ok(())
    }

    /// Removes the vertex named `id` and every edge touching it.
    ///
    /// # Errors
    /// [`GraphError::NoSuchId`](crate::GraphError::NoSuchId) or whatever the
    /// graph reports.
    pub fn remove_vertex(&mut self, id: K) -> Result<()> {
        let index = self.vertex_index_map().index_of(id)?;
        self.graph.remove_vertex(index)
    }

    /// Adds an edge named `id` from `source` to `target`.
    ///
    /// # Errors
    /// [`GraphError::NoSuchId`](crate::GraphError::NoSuchId) for unknown
    /// vertices, identifier errors for `id`, and any capability violation.
    pub fn add_edge(&mut self, source: K, target: K, id: K) -> Result<()> {
        let vertices = self.vertex_index_map();
        let u = vertices.index_of(source)?;
        let v = vertices.index_of(target)?;
        self.edge_index_map().check_new_id(id)?;
        let index = self.graph.add_edge(u, v)?;
        let mapped = self.edge_map_mut().push(id)?;
        debug_assert_eq!(index, mapped);
        Ok(())
    }

    /// Removes the edge named `id`.
    ///
    /// # Errors
    /// [`GraphError::NoSuchId`](crate::GraphError::NoSuchId) or whatever the
    /// graph reports.
    pub fn remove_edge(&mut self, id: K) -> Result<()> {
        let index = self.edge_index_map().index_of(id)?;
        self.graph.remove_edge(index)
    }

    /// Source vertex of the edge named `id`.
    ///
    /// # Errors
    /// [`GraphError::NoSuchId`](crate::GraphError::NoSuchId).
    pub fn edge_source(&self, id: K) -> Result<K> {
        let edge = self.edge_index_map().index_of(id)?;
        self.vertex_index_map().id_of(self.graph.edge_source(edge)?)
    }

    /// Target vertex of the edge named `id`.
    ///
    /// # Errors
    /// [`GraphError::NoSuchId`](crate::GraphError::NoSuchId).
    pub fn edge_target(&self, id: K) -> Result<K> {
        let edge = self.edge_index_map().index_of(id)?;
        self.vertex_index_map().id_of(self.graph.edge_target(edge)?)
    }

    /// Some edge from `source` to `target`, if one exists.
    ///
    /// # Errors
    /// [`GraphError::NoSuchId`](crate::GraphError::NoSuchId) for unknown
    /// vertices.
    pub fn get_edge(&self, source: K, target: K) -> Result<Option<K>> {
        let vertices = self.vertex_index_map();
        let u = vertices.index_of(source)?;
        let v = vertices.index_of(target)?;
        let edges = self.edge_index_map().ids();
        Ok(self.graph.get_edge(u, v)?.map(|e| edges[e]))
    }

    /// Identifiers of the edges leaving `vertex`.
    ///
    /// # Errors
    /// [`GraphError::NoSuchId`](crate::GraphError::NoSuchId).
    pub fn out_edges(&self, vertex: K) -> Result<impl Iterator<Item = K> + '_> {
        let index = self.vertex_index_map().index_of(vertex)?;
        let edges = self.edge_index_map().ids();
        Ok(self.graph.out_edges(index)?.into_iter().map(move |e| edges[e]))
    }

    /// Identifiers of the edges entering `vertex`.
    ///
    /// # Errors
    /// [`GraphError::NoSuchId`](crate::GraphError::NoSuchId).
    pub fn in_edges(&self, vertex: K) -> Result<impl Iterator<Item = K> + '_> {
        let index = self.vertex_index_map().index_of(vertex)?;
        let edges = self.edge_index_map().ids();
        Ok(self.graph.in_edges(index)?.into_iter().map(move |e| edges[e]))
    }

    /// Renames a vertex; its index and incident edges are unaffected.
    ///
    /// # Errors
    /// As [`IdMap::rename`].
    pub fn rename_vertex(&mut self, old: K, new: K) -> Result<()> {
        self.vertex_map_mut().rename(old, new)
    }

    /// Renames an edge; its index and endpoints are unaffected.
    ///
    /// # Errors
    /// As [`IdMap::rename`].
    pub fn rename_edge(&mut self, old: K, new: K) -> Result<()> {
        self.edge_map_mut().rename(old, new)
    }

    /// Columns keyed by vertex index.
    pub fn vertex_weights(&self) -> &WeightsManager {
        self.graph.vertex_weights()
    }

    /// Columns keyed by edge index.
    pub fn edge_weights(&self) -> &WeightsManager {
        self.graph.edge_weights()
    }

    /// Mutable columns keyed by vertex index.
    pub fn vertex_weights_mut(&mut self) -> &mut WeightsManager {
        self.graph.vertex_weights_mut()
    }

    /// Mutable columns keyed by edge index.
    pub fn edge_weights_mut(&mut self) -> &mut WeightsManager {
        self.graph.edge_weights_mut()
    }

    /// Removes every edge.
    ///
    /// # Errors
    /// `Immutable` on snapshots.
    pub fn clear_edges(&mut self) -> Result<()> {
        self.graph.clear_edges()
    }

    /// Removes every vertex and edge.
    ///
    /// # Errors
    /// `Immutable` on snapshots.
    pub fn clear(&mut self) -> Result<()> {
        self.graph.clear()
    }

    /// Read-only snapshot with the same identifiers.
    ///
    /// Indices may differ from this graph's when `options.reindex_edges` is
    /// set; identifiers always name the same elements. The snapshot's id maps
    /// are frozen.
    pub fn immutable_copy(&self, options: CsrOptions) -> IdGraph<K> {
        let reindexed = CsrGraph::reindexed_copy_of(&self.graph, options, true);
        debug!(
            vertices = self.num_vertices(),
            edges = self.num_edges(),
            reindexed_edges = reindexed.edges_reindexing.is_some(),
            "id_graph.immutable_copy"
        );
        let vertex_map = IdMap::copy_of(
            self.vertex_index_map(),
            reindexed
                .vertices_reindexing
                .as_ref()
                .map(|map| map.reindexed_to_orig_slice()),
            true,
        );
        let edge_map = IdMap::copy_of(
            self.edge_index_map(),
            reindexed
                .edges_reindexing
                .as_ref()
                .map(|map| map.reindexed_to_orig_slice()),
            true,
        );
        IdGraph::attach(Graph::Csr(reindexed.graph), vertex_map, edge_map)
    }
}
