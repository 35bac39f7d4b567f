//! The closed set of graph layouts behind one [`Graph`] value.

use core::ops::Range;

use tracing::debug;

use crate::collections::element_set::{ElementSet, Listeners};
use crate::collections::endpoints::EndpointStore;
use crate::collections::weights::WeightsManager;
use crate::error::{GraphError, Result};
use crate::graph::basic::{Adjacency, ArrayGraph, HashmapGraph, LinkedGraph, MatrixGraph, MutableGraph};
use crate::graph::compressed::CsrGraph;
use crate::graph::{EdgeSet, IndexGraph, MutableIndexGraph};
use crate::options::{Capabilities, GraphOptions, Representation};

/// Any index graph: one of the mutable layouts or a CSR snapshot.
#[derive(Debug)]
pub enum Graph {
    /// Per-vertex edge arrays.
    Array(ArrayGraph),
    /// Per-vertex neighbor maps.
    Hashmap(HashmapGraph),
    /// Dense edge table.
    Matrix(MatrixGraph),
    /// Intrusive incidence lists.
    Linked(LinkedGraph),
    /// Immutable CSR snapshot.
    Csr(CsrGraph),
}

macro_rules! dispatch {
    ($graph:expr, $g:ident => $body:expr) => {
        match $graph {
            Graph::Array($g) => $body,
            Graph::Hashmap($g) => $body,
            Graph::Matrix($g) => $body,
            Graph::Linked($g) => $body,
            Graph::Csr($g) => $body,
        }
    };
}

fn copy_into<A: Adjacency, G: IndexGraph + ?Sized>(
    source: &G,
    options: &GraphOptions,
    copy_weights: bool,
) -> Result<MutableGraph<A>> {
    let mut graph = MutableGraph::<A>::with_capacity(
        options.capabilities,
        source.num_vertices(),
        source.num_edges(),
    )?;
    graph.add_vertices(source.num_vertices())?;
    for record in source.endpoints().as_slice() {
        graph.add_edge(record.source(), record.target())?;
    }
    if copy_weights {
        graph.set_weights(source.vertex_weights().copy(false), source.edge_weights().copy(false));
    }
    Ok(graph)
}

impl Graph {
    /// Empty graph whose layout is chosen by
    /// [`GraphOptions::resolve_representation`].
    ///
    /// # Errors
    /// [`GraphError::UnsupportedCapability`] for an explicit layout that cannot
    /// honour the capabilities.
    pub fn new(options: &GraphOptions) -> Result<Self> {
        Ok(match options.resolve_representation()? {
            Representation::Array => Graph::Array(MutableGraph::from_options(options)?),
            Representation::Hashmap => Graph::Hashmap(MutableGraph::from_options(options)?),
            Representation::Matrix => Graph::Matrix(MutableGraph::from_options(options)?),
            Representation::Linked => Graph::Linked(MutableGraph::from_options(options)?),
        })
    }

    /// Mutable copy of `source` with identical vertex and edge indices.
    ///
    /// # Errors
    /// [`GraphError::DirectednessMismatch`] if `options` and `source` disagree
    /// on directedness; any error `add_edge` reports when `source` holds edges
    /// the new capabilities reject.
    pub fn copy_of<G: IndexGraph + ?Sized>(
        source: &G,
        options: &GraphOptions,
        copy_weights: bool,
    ) -> Result<Self> {
        if options.capabilities.directed != source.is_directed() {
            return Err(GraphError::DirectednessMismatch {
                expected: options.capabilities.directed,
                found: source.is_directed(),
            });
        }
        let representation = options.resolve_representation()?;
        debug!(
            %representation,
            vertices = source.num_vertices(),
            edges = source.num_edges(),
            copy_weights,
            "graph.copy"
        );
        Ok(match representation {
            Representation::Array => Graph::Array(copy_into(source, options, copy_weights)?),
            Representation::Hashmap => Graph::Hashmap(copy_into(source, options, copy_weights)?),
            Representation::Matrix => Graph::Matrix(copy_into(source, options, copy_weights)?),
            Representation::Linked => Graph::Linked(copy_into(source, options, copy_weights)?),
        })
    }

    /// CSR snapshot of this graph with the same indices and weights.
    pub fn immutable_copy(&self, fast_lookup: bool) -> Graph {
        Graph::Csr(CsrGraph::copy_of(self, fast_lookup, true))
    }

    /// The mutable layout, or `None` for CSR snapshots.
    pub fn representation(&self) -> Option<Representation> {
        match self {
            Graph::Array(g) => Some(g.representation()),
            Graph::Hashmap(g) => Some(g.representation()),
            Graph::Matrix(g) => Some(g.representation()),
            Graph::Linked(g) => Some(g.representation()),
            Graph::Csr(_) => None,
        }
    }

    /// Returns `true` for CSR snapshots.
    pub fn is_immutable(&self) -> bool {
        matches!(self, Graph::Csr(_))
    }

    /// The snapshot, if this is one.
    pub fn as_csr(&self) -> Option<&CsrGraph> {
        match self {
            Graph::Csr(g) => Some(g),
            _ => None,
        }
    }
}

impl IndexGraph for Graph {
    fn capabilities(&self) -> Capabilities {
        dispatch!(self, g => g.capabilities())
    }

    fn vertices(&self) -> &ElementSet {
        dispatch!(self, g => g.vertices())
    }

    fn edges(&self) -> &ElementSet {
        dispatch!(self, g => g.edges())
    }

    fn endpoints(&self) -> &EndpointStore {
        dispatch!(self, g => g.endpoints())
    }

    fn out_edges(&self, vertex: usize) -> Result<EdgeSet<'_>> {
        dispatch!(self, g => g.out_edges(vertex))
    }

    fn in_edges(&self, vertex: usize) -> Result<EdgeSet<'_>> {
        dispatch!(self, g => g.in_edges(vertex))
    }

    fn get_edge(&self, source: usize, target: usize) -> Result<Option<usize>> {
        dispatch!(self, g => g.get_edge(source, target))
    }

    fn get_edges(&self, source: usize, target: usize) -> Result<Vec<usize>> {
        dispatch!(self, g => g.get_edges(source, target))
    }

    fn vertex_weights(&self) -> &WeightsManager {
        dispatch!(self, g => g.vertex_weights())
    }

    fn edge_weights(&self) -> &WeightsManager {
        dispatch!(self, g => g.edge_weights())
    }
}

impl MutableIndexGraph for Graph {
    fn add_vertex(&mut self) -> Result<usize> {
        dispatch!(self, g => g.add_vertex())
    }

    fn add_vertices(&mut self, count: usize) -> Result<Range<usize>> {
        dispatch!(self, g => g.add_vertices(count))
    }

    fn remove_vertex(&mut self, vertex: usize) -> Result<()> {
        dispatch!(self, g => g.remove_vertex(vertex))
    }

    fn add_edge(&mut self, source: usize, target: usize) -> Result<usize> {
        dispatch!(self, g => g.add_edge(source, target))
    }

    fn remove_edge(&mut self, edge: usize) -> Result<()> {
        dispatch!(self, g => g.remove_edge(edge))
    }

    fn remove_edges_of(&mut self, vertex: usize) -> Result<()> {
        dispatch!(self, g => g.remove_edges_of(vertex))
    }

    fn remove_out_edges_of(&mut self, vertex: usize) -> Result<()> {
        dispatch!(self, g => g.remove_out_edges_of(vertex))
    }

    fn remove_in_edges_of(&mut self, vertex: usize) -> Result<()> {
        dispatch!(self, g => g.remove_in_edges_of(vertex))
    }

    fn reverse_edge(&mut self, edge: usize) -> Result<()> {
        dispatch!(self, g => g.reverse_edge(edge))
    }

    fn move_edge(&mut self, edge: usize, source: usize, target: usize) -> Result<()> {
        dispatch!(self, g => g.move_edge(edge, source, target))
    }

    fn clear_edges(&mut self) -> Result<()> {
        dispatch!(self, g => g.clear_edges())
    }

    fn clear(&mut self) -> Result<()> {
        dispatch!(self, g => g.clear())
    }

    fn ensure_vertex_capacity(&mut self, capacity: usize) -> Result<()> {
        dispatch!(self, g => g.ensure_vertex_capacity(capacity))
    }

    fn ensure_edge_capacity(&mut self, capacity: usize) -> Result<()> {
        dispatch!(self, g => g.ensure_edge_capacity(capacity))
    }

    fn vertex_weights_mut(&mut self) -> &mut WeightsManager {
        dispatch!(self, g => g.vertex_weights_mut())
    }

    fn edge_weights_mut(&mut self) -> &mut WeightsManager {
        dispatch!(self, g => g.edge_weights_mut())
    }

    fn vertex_listeners(&mut self) -> Listeners<'_> {
        dispatch!(self, g => g.vertex_listeners())
    }

    fn edge_listeners(&mut self) -> Listeners<'_> {
        dispatch!(self, g => g.edge_listeners())
    }
}

impl From<ArrayGraph> for Graph {
    fn from(graph: ArrayGraph) -> Self {
        Graph::Array(graph)
    }
}

impl From<HashmapGraph> for Graph {
    fn from(graph: HashmapGraph) -> Self {
        Graph::Hashmap(graph)
    }
}

impl From<MatrixGraph> for Graph {
    fn from(graph: MatrixGraph) -> Self {
        Graph::Matrix(graph)
    }
}

impl From<LinkedGraph> for Graph {
    fn from(graph: LinkedGraph) -> Self {
        Graph::Linked(graph)
    }
}

impl From<CsrGraph> for Graph {
    fn from(graph: CsrGraph) -> Self {
        Graph::Csr(graph)
    }
}
