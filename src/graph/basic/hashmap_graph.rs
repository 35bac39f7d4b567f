//! Hashmap layout: per-vertex maps from neighbor to edge.
//!
//! A vertex without edges holds no map at all; its [`NeighborSlot`] stays
//! empty until the first edge is threaded in. Undirected
//! graphs store every edge in the maps of both endpoints (a self edge once,
//! keyed by its own vertex). Parallel edges are not supported.

use rustc_hash::FxHashMap;

use crate::collections::endpoints::EndpointStore;
use crate::error::{GraphError, Result};
use crate::graph::basic::mutable_graph::{Adjacency, MutableGraph};
use crate::graph::EdgeSet;
use crate::options::{Capabilities, Representation};

/// A [`MutableGraph`] over per-vertex neighbor maps.
pub type HashmapGraph = MutableGraph<HashmapAdjacency>;

type NeighborMap = FxHashMap<u32, u32>;

/// Neighbor map of one vertex, allocated on first write.
///
/// The slot stays empty until the first edge is threaded in, and again after
/// [`clear_edges`](crate::MutableIndexGraph::clear_edges).
#[derive(Debug, Clone, Default)]
pub struct NeighborSlot(Option<NeighborMap>);

impl NeighborSlot {
    fn get(&self) -> Option<&NeighborMap> {
        self.0.as_ref()
    }

    fn get_mut(&mut self) -> Option<&mut NeighborMap> {
        self.0.as_mut()
    }

    fn make_mut(&mut self) -> &mut NeighborMap {
        self.0.get_or_insert_with(NeighborMap::default)
    }

    fn insert(&mut self, neighbor: usize, edge: usize) {
        self.make_mut().insert(neighbor as u32, edge as u32);
    }

    fn remove(&mut self, neighbor: usize) {
        if let Some(map) = self.get_mut() {
            map.remove(&(neighbor as u32));
        }
    }

    fn relabel(&mut self, neighbor: usize, edge: usize) {
        if let Some(slot) = self.get_mut().and_then(|map| map.get_mut(&(neighbor as u32))) {
            *slot = edge as u32;
        }
    }

    fn rekey(&mut self, from: usize, to: usize) {
        if let Some(map) = self.get_mut() {
            if let Some(edge) = map.remove(&(from as u32)) {
                map.insert(to as u32, edge);
            }
        }
    }

    /// Returns `true` if the slot owns a map.
    pub fn is_allocated(&self) -> bool {
        self.0.is_some()
    }
}

/// Neighbor maps of a [`HashmapGraph`].
#[derive(Debug, Clone, Default)]
pub struct HashmapAdjacency {
    directed: bool,
    out: Vec<NeighborSlot>,
    inc: Vec<NeighborSlot>,
}

impl HashmapAdjacency {
    /// Out-map slot of `vertex`.
    pub fn out_slot(&self, vertex: usize) -> Option<&NeighborSlot> {
        self.out.get(vertex)
    }
}

impl Adjacency for HashmapAdjacency {
    const REPRESENTATION: Representation = Representation::Hashmap;

    fn new(caps: Capabilities, vertex_capacity: usize, _edge_capacity: usize) -> Result<Self> {
        if caps.parallel_edges {
            return Err(GraphError::UnsupportedCapability {
                representation: Self::REPRESENTATION.name(),
                capability: "parallel edges",
            });
        }
        let mut adjacency = Self {
            directed: caps.directed,
            ..Self::default()
        };
        adjacency.ensure_vertex_capacity(vertex_capacity);
        Ok(adjacency)
    }

    fn ensure_vertex_capacity(&mut self, capacity: usize) {
        self.out.reserve(capacity.saturating_sub(self.out.len()));
        if self.directed {
            self.inc.reserve(capacity.saturating_sub(self.inc.len()));
        }
    }

    fn add_vertex(&mut self, vertex: usize) {
        debug_assert_eq!(vertex, self.out.len());
        self.out.push(NeighborSlot::default());
        if self.directed {
            self.inc.push(NeighborSlot::default());
        }
    }

    fn add_edge(&mut self, endpoints: &EndpointStore, edge: usize) {
        let record = endpoints.record(edge);
        let (u, v) = (record.source(), record.target());
        self.out[u].insert(v, edge);
        if self.directed {
            self.inc[v].insert(u, edge);
        } else if u != v {
            self.out[v].insert(u, edge);
        }
    }

    fn unlink_edge(&mut self, endpoints: &EndpointStore, edge: usize) {
        let record = endpoints.record(edge);
        let (u, v) = (record.source(), record.target());
        self.out[u].remove(v);
        if self.directed {
            self.inc[v].remove(u);
        } else if u != v {
            self.out[v].remove(u);
        }
    }

    fn rename_edge(&mut self, endpoints: &EndpointStore, from: usize, to: usize) {
        let record = endpoints.record(from);
        let (u, v) = (record.source(), record.target());
        self.out[u].relabel(v, to);
        if self.directed {
            self.inc[v].relabel(u, to);
        } else if u != v {
            self.out[v].relabel(u, to);
        }
    }

    fn move_vertex(&mut self, from: usize, to: usize) {
        debug_assert_eq!(from + 1, self.out.len());
        if self.directed {
            if let Some(targets) = self.out[from].get() {
                for &w in targets.keys().filter(|&&w| w as usize != from) {
                    self.inc[w as usize].rekey(from, to);
                }
            }
            if let Some(sources) = self.inc[from].get() {
                for &w in sources.keys().filter(|&&w| w as usize != from) {
                    self.out[w as usize].rekey(from, to);
                }
            }
            // a self edge is keyed by `from` in both own maps
            self.out[from].rekey(from, to);
            self.inc[from].rekey(from, to);
            self.inc.swap_remove(to);
        } else {
            let neighbors: Vec<u32> = self.out[from]
                .get()
                .map(|map| map.keys().copied().collect())
                .unwrap_or_default();
            for w in neighbors {
                self.out[w as usize].rekey(from, to);
            }
        }
        self.out.swap_remove(to);
    }

    fn pop_vertex(&mut self, vertex: usize) {
        debug_assert_eq!(vertex + 1, self.out.len());
        self.out.pop();
        if self.directed {
            self.inc.pop();
        }
    }

    fn out_edges<'a>(&'a self, _endpoints: &'a EndpointStore, vertex: usize) -> EdgeSet<'a> {
        EdgeSet::map(self.out[vertex].get())
    }

    fn in_edges<'a>(&'a self, _endpoints: &'a EndpointStore, vertex: usize) -> EdgeSet<'a> {
        let slots = if self.directed { &self.inc } else { &self.out };
        EdgeSet::map(slots[vertex].get())
    }

    fn find_edge(&self, _endpoints: &EndpointStore, source: usize, target: usize) -> Option<usize> {
        self.out[source]
            .get()
            .and_then(|map| map.get(&(target as u32)))
            .map(|&e| e as usize)
    }

    fn find_edges(&self, endpoints: &EndpointStore, source: usize, target: usize) -> Vec<usize> {
        self.find_edge(endpoints, source, target).into_iter().collect()
    }

    fn clear_edges(&mut self, _num_vertices: usize) {
        for slot in self.out.iter_mut().chain(self.inc.iter_mut()) {
            *slot = NeighborSlot::default();
        }
    }

    fn clear(&mut self) {
        self.out.clear();
        self.inc.clear();
    }
}
