//! Array layout: per-vertex growable arrays of incident edge indices.
//!
//! Directed graphs keep an out-array and an in-array per vertex; undirected
//! graphs keep one incidence array per vertex, in which a self edge appears
//! once. Arrays are unordered; removal swaps the last entry into the hole.
//!
//! ### Performance Characteristics
//! | Operation | Complexity |
//! |-----------|------------|
//! | `add_edge` | \(O(1)\) amortized, \(O(\deg)\) without parallel edges |
//! | `remove_edge` | \(O(\deg(u) + \deg(v))\) |
//! | `get_edge` | \(O(\deg(u))\) |
//! | `out_edges` | \(O(1)\) |

use crate::collections::endpoints::EndpointStore;
use crate::error::Result;
use crate::graph::basic::mutable_graph::{Adjacency, MutableGraph};
use crate::graph::EdgeSet;
use crate::options::{Capabilities, Representation};

/// A [`MutableGraph`] over per-vertex edge arrays.
pub type ArrayGraph = MutableGraph<ArrayAdjacency>;

/// Incidence arrays of an [`ArrayGraph`].
#[derive(Debug, Clone, Default)]
pub struct ArrayAdjacency {
    directed: bool,
    out: Vec<Vec<u32>>,
    inc: Vec<Vec<u32>>,
}

fn remove_from(list: &mut Vec<u32>, edge: usize) {
    if let Some(pos) = list.iter().position(|&e| e as usize == edge) {
        list.swap_remove(pos);
    }
}

fn rename_in(list: &mut [u32], from: usize, to: usize) {
    if let Some(slot) = list.iter_mut().find(|e| **e as usize == from) {
        *slot = to as u32;
    }
}

impl Adjacency for ArrayAdjacency {
    const REPRESENTATION: Representation = Representation::Array;

    fn new(caps: Capabilities, vertex_capacity: usize, _edge_capacity: usize) -> Result<Self> {
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
        self.out.push(Vec::new());
        if self.directed {
            self.inc.push(Vec::new());
        }
    }

    fn add_edge(&mut self, endpoints: &EndpointStore, edge: usize) {
        let record = endpoints.record(edge);
        let (u, v) = (record.source(), record.target());
        self.out[u].push(edge as u32);
        if self.directed {
            self.inc[v].push(edge as u32);
        } else if u != v {
            self.out[v].push(edge as u32);
        }
    }

    fn unlink_edge(&mut self, endpoints: &EndpointStore, edge: usize) {
        let record = endpoints.record(edge);
        let (u, v) = (record.source(), record.target());
        remove_from(&mut self.out[u], edge);
        if self.directed {
            remove_from(&mut self.inc[v], edge);
        } else if u != v {
            remove_from(&mut self.out[v], edge);
        }
    }

    fn rename_edge(&mut self, endpoints: &EndpointStore, from: usize, to: usize) {
        let record = endpoints.record(from);
        let (u, v) = (record.source(), record.target());
        rename_in(&mut self.out[u], from, to);
        if self.directed {
            rename_in(&mut self.inc[v], from, to);
        } else if u != v {
            rename_in(&mut self.out[v], from, to);
        }
    }

    fn move_vertex(&mut self, from: usize, to: usize) {
        debug_assert_eq!(from + 1, self.out.len());
        debug_assert!(self.out[to].is_empty());
        self.out.swap_remove(to);
        if self.directed {
            self.inc.swap_remove(to);
        }
    }

    fn pop_vertex(&mut self, vertex: usize) {
        debug_assert_eq!(vertex + 1, self.out.len());
        self.out.pop();
        if self.directed {
            self.inc.pop();
        }
    }

    fn out_edges<'a>(&'a self, _endpoints: &'a EndpointStore, vertex: usize) -> EdgeSet<'a> {
        EdgeSet::slice(&self.out[vertex])
    }

    fn in_edges<'a>(&'a self, _endpoints: &'a EndpointStore, vertex: usize) -> EdgeSet<'a> {
        if self.directed {
            EdgeSet::slice(&self.inc[vertex])
        } else {
            EdgeSet::slice(&self.out[vertex])
        }
    }

    fn clear_edges(&mut self, _num_vertices: usize) {
        self.out.iter_mut().chain(self.inc.iter_mut()).for_each(Vec::clear);
    }

    fn clear(&mut self) {
        self.out.clear();
        self.inc.clear();
    }
}
