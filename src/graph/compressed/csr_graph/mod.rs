//! An immutable CSR (compressed sparse row) snapshot of an index graph.
//!
//! Construction is a counting sort over the endpoint table: one pass counts
//! degrees, a prefix sum turns them into begin offsets and a second pass
//! scatters edge indices into a single flat array. Directed graphs get a
//! second array grouped by target. Nothing is compared, so building is
//! \(O(n + m)\) with or without fast lookup.
//!
//! Memory layout:
//! - `out.begin`: `Vec<usize>` of length `n + 1`
//! - `out.edges`: `Vec<u32>` of length `m` (directed) or `2m - loops` (undirected)
//! - `inc`: the same, grouped by target (directed only)
//! - `endpoints`: one 8-byte record per edge
//!
//! With fast lookup every out-slice is ordered by the opposite endpoint, and
//! `get_edge` is a binary search; the order comes from a second counting-sort
//! pass keyed by that endpoint, run before the grouping pass.

mod bucketing;
mod reindexing;

pub use reindexing::{ReIndexedGraph, ReIndexingMap};

use core::ops::Range;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use self::bucketing::{bucket, Buckets, Incidence};
use crate::collections::element_set::{ElementSet, Listeners};
use crate::collections::endpoints::{EndpointStore, NONE};
use crate::collections::weights::WeightsManager;
use crate::error::{ElementKind, GraphError, Result};
use crate::graph::{EdgeSet, IndexGraph, MutableIndexGraph};
use crate::options::Capabilities;

/// Options for building a [`CsrGraph`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CsrOptions {
    /// Order out-slices by opposite endpoint for binary-search lookup.
    pub fast_lookup: bool,
    /// Renumber edges into scatter order.
    pub reindex_edges: bool,
}

/// Immutable CSR graph.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | build | \(O(n + m)\) | counting sort, also with fast lookup |
/// | `out_edges` / `in_edges` | \(O(1)\) | contiguous slice |
/// | `get_edge` | \(O(\log \deg)\) | with fast lookup, \(O(\deg)\) otherwise |
/// | `contains_parallel_edges` | \(O(n + m)\) once | cached |
pub struct CsrGraph {
    caps: Capabilities,
    vertices: ElementSet,
    edges: ElementSet,
    endpoints: EndpointStore,
    out: Buckets,
    inc: Buckets,
    fast_lookup: bool,
    vertex_weights: WeightsManager,
    edge_weights: WeightsManager,
    self_edges: OnceLock<bool>,
    parallel_edges: OnceLock<bool>,
}

impl CsrGraph {
    /// Snapshot of `graph` keeping its vertex and edge indices.
    pub fn copy_of<G: IndexGraph + ?Sized>(graph: &G, fast_lookup: bool, copy_weights: bool) -> Self {
        let options = CsrOptions {
            fast_lookup,
            reindex_edges: false,
        };
        Self::reindexed_copy_of(graph, options, copy_weights).graph
    }

    /// Snapshot of `graph`, renumbering edges when `options.reindex_edges`.
    pub fn reindexed_copy_of<G: IndexGraph + ?Sized>(
        graph: &G,
        options: CsrOptions,
        copy_weights: bool,
    ) -> ReIndexedGraph {
        let weights = copy_weights.then(|| (graph.vertex_weights(), graph.edge_weights()));
        Self::build(
            graph.capabilities(),
            graph.num_vertices(),
            graph.endpoints(),
            weights,
            options,
        )
    }

    pub(crate) fn build(
        caps: Capabilities,
        n: usize,
        endpoints: &EndpointStore,
        weights: Option<(&WeightsManager, &WeightsManager)>,
        options: CsrOptions,
    ) -> ReIndexedGraph {
        let m = endpoints.len();
        let records = endpoints.as_slice();

        let mut outgoing = Vec::with_capacity(if caps.directed { m } else { 2 * m });
        for (e, record) in records.iter().enumerate() {
            let (u, v, e) = (record.source() as u32, record.target() as u32, e as u32);
            outgoing.push(Incidence { owner: u, other: v, edge: e });
            if !caps.directed && u != v {
                outgoing.push(Incidence { owner: v, other: u, edge: e });
            }
        }
        let mut out = bucket(n, &outgoing, options.fast_lookup);
        drop(outgoing);

        let mut inc = if caps.directed {
            let incoming: Vec<Incidence> = records
                .iter()
                .enumerate()
                .map(|(e, record)| Incidence {
                    owner: record.target() as u32,
                    other: record.source() as u32,
                    edge: e as u32,
                })
                .collect();
            bucket(n, &incoming, options.fast_lookup)
        } else {
            Buckets::default()
        };

        let edges_reindexing = options
            .reindex_edges
            .then(|| scatter_order(m, &out.edges));

        let (endpoints, mut vertex_weights, mut edge_weights) = match &edges_reindexing {
            Some(map) => {
                let orig_to_re = map.orig_to_reindexed_slice();
                for e in out.edges.iter_mut().chain(inc.edges.iter_mut()) {
                    *e = orig_to_re[*e as usize] as u32;
                }
                let re_to_orig = map.reindexed_to_orig_slice();
                let (vw, ew) = match weights {
                    Some((vw, ew)) => (vw.copy(true), ew.permuted(re_to_orig, true)),
                    None => empty_weights(n, m),
                };
                (endpoints.permuted(re_to_orig), vw, ew)
            }
            None => {
                let (vw, ew) = match weights {
                    Some((vw, ew)) => (vw.copy(true), ew.copy(true)),
                    None => empty_weights(n, m),
                };
                (endpoints.clone(), vw, ew)
            }
        };
        vertex_weights.freeze();
        edge_weights.freeze();

        debug!(
            vertices = n,
            edges = m,
            directed = caps.directed,
            fast_lookup = options.fast_lookup,
            reindexed = edges_reindexing.is_some(),
            "csr.built"
        );

        let graph = CsrGraph {
            caps,
            vertices: ElementSet::fixed(ElementKind::Vertex, n),
            edges: ElementSet::fixed(ElementKind::Edge, m),
            endpoints,
            out,
            inc,
            fast_lookup: options.fast_lookup,
            vertex_weights,
            edge_weights,
            self_edges: OnceLock::new(),
            parallel_edges: OnceLock::new(),
        };
        ReIndexedGraph {
            graph,
            vertices_reindexing: None,
            edges_reindexing,
        }
    }

    /// Returns `true` if out-slices are ordered for binary search.
    pub fn has_fast_lookup(&self) -> bool {
        self.fast_lookup
    }

    /// Begin offsets of the out-slices, length `n + 1`.
    pub fn out_offsets(&self) -> &[usize] {
        &self.out.begin
    }

    /// The flat out-incidence array.
    pub fn out_edge_array(&self) -> &[u32] {
        &self.out.edges
    }

    /// Returns `true` if some edge is a self edge. Computed once.
    pub fn contains_self_edges(&self) -> bool {
        if !self.caps.self_edges {
            return false;
        }
        *self.self_edges.get_or_init(|| {
            self.endpoints
                .as_slice()
                .iter()
                .any(|record| record.is_self_edge())
        })
    }

    /// Returns `true` if two edges connect the same pair. Computed once.
    pub fn contains_parallel_edges(&self) -> bool {
        if !self.caps.parallel_edges {
            return false;
        }
        *self.parallel_edges.get_or_init(|| {
            let n = self.vertices.len();
            let mut last_seen = vec![NONE; n];
            (0..n).any(|u| {
                self.out.slice(u).iter().any(|&e| {
                    let w = self.opposite(e as usize, u);
                    let seen = last_seen[w] == u as u32;
                    last_seen[w] = u as u32;
                    seen
                })
            })
        })
    }

    #[inline]
    fn opposite(&self, edge: usize, vertex: usize) -> usize {
        let record = self.endpoints.record(edge);
        if record.source() == vertex {
            record.target()
        } else {
            record.source()
        }
    }

    /// Range of `slice` holding edges to `target`; `slice` must be ordered.
    fn equal_range(&self, slice: &[u32], source: usize, target: usize) -> Range<usize> {
        let lo = slice.partition_point(|&e| self.opposite(e as usize, source) < target);
        let hi = lo + slice[lo..].partition_point(|&e| self.opposite(e as usize, source) <= target);
        lo..hi
    }
}

fn empty_weights(n: usize, m: usize) -> (WeightsManager, WeightsManager) {
    let mut vw = WeightsManager::new(ElementKind::Vertex, n);
    vw.set_len(n);
    let mut ew = WeightsManager::new(ElementKind::Edge, m);
    ew.set_len(m);
    (vw, ew)
}

/// Edge renaming that makes edges appear in first-occurrence order of the
/// out-incidence array.
fn scatter_order(m: usize, out_edges: &[u32]) -> ReIndexingMap {
    let mut orig_to_reindexed = vec![usize::MAX; m];
    let mut reindexed_to_orig = Vec::with_capacity(m);
    for &e in out_edges {
        let slot = &mut orig_to_reindexed[e as usize];
        if *slot == usize::MAX {
            *slot = reindexed_to_orig.len();
            reindexed_to_orig.push(e as usize);
        }
    }
    ReIndexingMap::from_parts(orig_to_reindexed, reindexed_to_orig)
}

impl IndexGraph for CsrGraph {
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
        Ok(EdgeSet::slice(self.out.slice(vertex)))
    }

    fn in_edges(&self, vertex: usize) -> Result<EdgeSet<'_>> {
        self.vertices.check(vertex)?;
        if self.caps.directed {
            Ok(EdgeSet::slice(self.inc.slice(vertex)))
        } else {
            Ok(EdgeSet::slice(self.out.slice(vertex)))
        }
    }

    fn get_edge(&self, source: usize, target: usize) -> Result<Option<usize>> {
        self.vertices.check(source)?;
        self.vertices.check(target)?;
        let slice = self.out.slice(source);
        let found = if self.fast_lookup {
            let range = self.equal_range(slice, source, target);
            slice[range].first().copied()
        } else {
            slice
                .iter()
                .copied()
                .find(|&e| self.opposite(e as usize, source) == target)
        };
        Ok(found.map(|e| e as usize))
    }

    fn get_edges(&self, source: usize, target: usize) -> Result<Vec<usize>> {
        self.vertices.check(source)?;
        self.vertices.check(target)?;
        let slice = self.out.slice(source);
        let edges = if self.fast_lookup {
            slice[self.equal_range(slice, source, target)]
                .iter()
                .map(|&e| e as usize)
                .collect()
        } else {
            slice
                .iter()
                .map(|&e| e as usize)
                .filter(|&e| self.opposite(e, source) == target)
                .collect()
        };
        Ok(edges)
    }

    fn vertex_weights(&self) -> &WeightsManager {
        &self.vertex_weights
    }

    fn edge_weights(&self) -> &WeightsManager {
        &self.edge_weights
    }
}

impl MutableIndexGraph for CsrGraph {
    fn add_vertex(&mut self) -> Result<usize> {
        Err(GraphError::Immutable("add vertex"))
    }

    fn add_vertices(&mut self, _count: usize) -> Result<Range<usize>> {
        Err(GraphError::Immutable("add vertices"))
    }

    fn remove_vertex(&mut self, _vertex: usize) -> Result<()> {
        Err(GraphError::Immutable("remove vertex"))
    }

    fn add_edge(&mut self, _source: usize, _target: usize) -> Result<usize> {
        Err(GraphError::Immutable("add edge"))
    }

    fn remove_edge(&mut self, _edge: usize) -> Result<()> {
        Err(GraphError::Immutable("remove edge"))
    }

    fn remove_edges_of(&mut self, _vertex: usize) -> Result<()> {
        Err(GraphError::Immutable("remove edges"))
    }

    fn remove_out_edges_of(&mut self, _vertex: usize) -> Result<()> {
        Err(GraphError::Immutable("remove edges"))
    }

    fn remove_in_edges_of(&mut self, _vertex: usize) -> Result<()> {
        Err(GraphError::Immutable("remove edges"))
    }

    fn reverse_edge(&mut self, _edge: usize) -> Result<()> {
        Err(GraphError::Immutable("reverse edge"))
    }

    fn move_edge(&mut self, _edge: usize, _source: usize, _target: usize) -> Result<()> {
        Err(GraphError::Immutable("move edge"))
    }

    fn clear_edges(&mut self) -> Result<()> {
        Err(GraphError::Immutable("clear edges"))
    }

    fn clear(&mut self) -> Result<()> {
        Err(GraphError::Immutable("clear"))
    }

    fn ensure_vertex_capacity(&mut self, _capacity: usize) -> Result<()> {
        Err(GraphError::Immutable("grow vertex storage"))
    }

    fn ensure_edge_capacity(&mut self, _capacity: usize) -> Result<()> {
        Err(GraphError::Immutable("grow edge storage"))
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

impl core::fmt::Debug for CsrGraph {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CsrGraph")
            .field("capabilities", &self.caps)
            .field("vertices", &self.vertices.len())
            .field("edges", &self.edges.len())
            .field("fast_lookup", &self.fast_lookup)
            .finish()
    }
}
