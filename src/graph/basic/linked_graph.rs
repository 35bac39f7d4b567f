//! Linked layout: intrusive doubly-linked incidence lists.
//!
//! Every edge carries `next`/`prev` links for two roles: its place in the list
//! of its source and its place in the list of its target. Directed graphs use
//! the source role for out-lists and the target role for in-lists. Undirected
//! graphs keep one list per vertex and pick the role by comparing the vertex
//! with the edge's source; a self edge is threaded once, in the source role.
//!
//! ### Performance Characteristics
//! | Operation | Complexity |
//! |-----------|------------|
//! | `add_edge` | \(O(1)\), \(O(\deg)\) without parallel edges |
//! | `remove_edge` | \(O(1)\) |
//! | `get_edge` | \(O(\deg(u))\) |

use crate::collections::endpoints::{EndpointStore, NONE};
use crate::error::Result;
use crate::graph::basic::mutable_graph::{Adjacency, MutableGraph};
use crate::graph::edge_set::LinkedWalk;
use crate::graph::EdgeSet;
use crate::options::{Capabilities, Representation};

/// A [`MutableGraph`] over intrusive incidence lists.
pub type LinkedGraph = MutableGraph<LinkedAdjacency>;

pub(crate) const SOURCE: usize = 0;
pub(crate) const TARGET: usize = 1;

const OUT: usize = 0;
const IN: usize = 1;

/// List links of one edge, indexed by role.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeLinks {
    pub(crate) next: [u32; 2],
    pub(crate) prev: [u32; 2],
}

impl EdgeLinks {
    const UNLINKED: EdgeLinks = EdgeLinks {
        next: [NONE; 2],
        prev: [NONE; 2],
    };
}

/// Which links of an edge a list walks through.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Role {
    Fixed(usize),
    ByEndpoint,
}

impl Role {
    #[inline]
    pub(crate) fn at(self, endpoints: &EndpointStore, edge: usize, vertex: usize) -> usize {
        match self {
            Role::Fixed(role) => role,
            Role::ByEndpoint => {
                if endpoints.source(edge) == vertex {
                    SOURCE
                } else {
                    TARGET
                }
            }
        }
    }
}

/// Incidence lists of a [`LinkedGraph`].
#[derive(Debug, Clone, Default)]
pub struct LinkedAdjacency {
    directed: bool,
    head: Vec<[u32; 2]>,
    degree: Vec<[u32; 2]>,
    links: Vec<EdgeLinks>,
}

impl LinkedAdjacency {
    fn role(&self, list: usize) -> Role {
        if self.directed {
            Role::Fixed(list)
        } else {
            Role::ByEndpoint
        }
    }

    fn push_front(&mut self, endpoints: &EndpointStore, edge: usize, vertex: usize, list: usize) {
        let role = self.role(list);
        let old_head = self.head[vertex][list];
        let r = role.at(endpoints, edge, vertex);
        self.links[edge].next[r] = old_head;
        self.links[edge].prev[r] = NONE;
        if old_head != NONE {
            let h = old_head as usize;
            let hr = role.at(endpoints, h, vertex);
            self.links[h].prev[hr] = edge as u32;
        }
        self.head[vertex][list] = edge as u32;
        self.degree[vertex][list] += 1;
    }

    fn unlink(&mut self, endpoints: &EndpointStore, edge: usize, vertex: usize, list: usize) {
        let role = self.role(list);
        let r = role.at(endpoints, edge, vertex);
        let EdgeLinks { next, prev } = self.links[edge];
        let (next, prev) = (next[r], prev[r]);
        if prev == NONE {
            self.head[vertex][list] = next;
        } else {
            let p = prev as usize;
            self.links[p].next[role.at(endpoints, p, vertex)] = next;
        }
        if next != NONE {
            let n = next as usize;
            self.links[n].prev[role.at(endpoints, n, vertex)] = prev;
        }
        self.degree[vertex][list] -= 1;
    }

    /// Points the neighbors of `from` in one list at `to`, whose links are
    /// already a copy of `from`'s.
    fn relink(&mut self, endpoints: &EndpointStore, from: usize, to: usize, vertex: usize, list: usize) {
        let role = self.role(list);
        let r = role.at(endpoints, from, vertex);
        let EdgeLinks { next, prev } = self.links[to];
        let (next, prev) = (next[r], prev[r]);
        if prev == NONE {
            self.head[vertex][list] = to as u32;
        } else {
            let p = prev as usize;
            self.links[p].next[role.at(endpoints, p, vertex)] = to as u32;
        }
        if next != NONE {
            let n = next as usize;
            self.links[n].prev[role.at(endpoints, n, vertex)] = to as u32;
        }
    }

    /// `(vertex, list)` pairs `edge` is threaded into.
    fn lists_of(&self, endpoints: &EndpointStore, edge: usize) -> [Option<(usize, usize)>; 2] {
        let record = endpoints.record(edge);
        let (u, v) = (record.source(), record.target());
        if self.directed {
            [Some((u, OUT)), Some((v, IN))]
        } else if u == v {
            [Some((u, OUT)), None]
        } else {
            [Some((u, OUT)), Some((v, OUT))]
        }
    }

    fn walk<'a>(&'a self, endpoints: &'a EndpointStore, vertex: usize, list: usize) -> EdgeSet<'a> {
        let walk = LinkedWalk {
            links: &self.links,
            endpoints,
            vertex,
            head: self.head[vertex][list],
            role: self.role(list),
        };
        EdgeSet::linked(walk, self.degree[vertex][list] as usize)
    }
}

impl Adjacency for LinkedAdjacency {
    const REPRESENTATION: Representation = Representation::Linked;

    fn new(caps: Capabilities, vertex_capacity: usize, edge_capacity: usize) -> Result<Self> {
        let mut adjacency = Self {
            directed: caps.directed,
            ..Self::default()
        };
        adjacency.ensure_vertex_capacity(vertex_capacity);
        adjacency.ensure_edge_capacity(edge_capacity);
        Ok(adjacency)
    }

    fn ensure_vertex_capacity(&mut self, capacity: usize) {
        let additional = capacity.saturating_sub(self.head.len());
        self.head.reserve(additional);
        self.degree.reserve(additional);
    }

    fn ensure_edge_capacity(&mut self, capacity: usize) {
        self.links.reserve(capacity.saturating_sub(self.links.len()));
    }

    fn add_vertex(&mut self, vertex: usize) {
        debug_assert_eq!(vertex, self.head.len());
        self.head.push([NONE; 2]);
        self.degree.push([0; 2]);
    }

    fn add_edge(&mut self, endpoints: &EndpointStore, edge: usize) {
        if edge == self.links.len() {
            self.links.push(EdgeLinks::UNLINKED);
        } else {
            self.links[edge] = EdgeLinks::UNLINKED;
        }
        for (vertex, list) in self.lists_of(endpoints, edge).into_iter().flatten() {
            self.push_front(endpoints, edge, vertex, list);
        }
    }

    fn unlink_edge(&mut self, endpoints: &EndpointStore, edge: usize) {
        for (vertex, list) in self.lists_of(endpoints, edge).into_iter().flatten() {
            self.unlink(endpoints, edge, vertex, list);
        }
        self.links[edge] = EdgeLinks::UNLINKED;
    }

    fn rename_edge(&mut self, endpoints: &EndpointStore, from: usize, to: usize) {
        self.links[to] = self.links[from];
        for (vertex, list) in self.lists_of(endpoints, from).into_iter().flatten() {
            self.relink(endpoints, from, to, vertex, list);
        }
    }

    fn pop_edge(&mut self, edge: usize) {
        debug_assert_eq!(edge + 1, self.links.len());
        self.links.truncate(edge);
    }

    fn move_vertex(&mut self, from: usize, to: usize) {
        debug_assert_eq!(from + 1, self.head.len());
        debug_assert_eq!(self.degree[to], [0; 2]);
        self.head.swap_remove(to);
        self.degree.swap_remove(to);
    }

    fn pop_vertex(&mut self, vertex: usize) {
        debug_assert_eq!(vertex + 1, self.head.len());
        self.head.pop();
        self.degree.pop();
    }

    fn out_edges<'a>(&'a self, endpoints: &'a EndpointStore, vertex: usize) -> EdgeSet<'a> {
        self.walk(endpoints, vertex, OUT)
    }

    fn in_edges<'a>(&'a self, endpoints: &'a EndpointStore, vertex: usize) -> EdgeSet<'a> {
        self.walk(endpoints, vertex, if self.directed { IN } else { OUT })
    }

    fn clear_edges(&mut self, _num_vertices: usize) {
        self.head.fill([NONE; 2]);
        self.degree.fill([0; 2]);
        self.links.clear();
    }

    fn clear(&mut self) {
        self.head.clear();
        self.degree.clear();
        self.links.clear();
    }
}
