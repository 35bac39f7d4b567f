//! Borrowed, restartable views over the edges incident to one vertex.

use core::iter::FusedIterator;
use core::slice;
use std::collections::hash_map;

use rustc_hash::FxHashMap;

use crate::collections::endpoints::{EndpointStore, NONE};
use crate::graph::basic::linked_graph::{EdgeLinks, Role};

/// Edges incident to a vertex, in one direction.
///
/// An `EdgeSet` is a cheap `Copy` view into the graph's incidence structure;
/// every call to [`EdgeSet::iter`] starts a fresh pass over the same edges.
#[derive(Clone, Copy)]
pub struct EdgeSet<'a> {
    repr: Repr<'a>,
    len: usize,
}

#[derive(Clone, Copy)]
enum Repr<'a> {
    Empty,
    Slice(&'a [u32]),
    Map(&'a FxHashMap<u32, u32>),
    Row(&'a [u32]),
    Column { rows: &'a [Vec<u32>], column: usize },
    Linked(LinkedWalk<'a>),
}

#[derive(Clone, Copy)]
pub(crate) struct LinkedWalk<'a> {
    pub(crate) links: &'a [EdgeLinks],
    pub(crate) endpoints: &'a EndpointStore,
    pub(crate) vertex: usize,
    pub(crate) head: u32,
    pub(crate) role: Role,
}

impl<'a> EdgeSet<'a> {
    pub(crate) const fn empty() -> Self {
        Self {
            repr: Repr::Empty,
            len: 0,
        }
    }

    pub(crate) fn slice(edges: &'a [u32]) -> Self {
        Self {
            repr: Repr::Slice(edges),
            len: edges.len(),
        }
    }

    pub(crate) fn map(map: Option<&'a FxHashMap<u32, u32>>) -> Self {
        match map {
            Some(map) => Self {
                repr: Repr::Map(map),
                len: map.len(),
            },
            None => Self::empty(),
        }
    }

    /// A matrix row; `NONE` cells are skipped.
    pub(crate) fn row(row: &'a [u32], len: usize) -> Self {
        Self {
            repr: Repr::Row(row),
            len,
        }
    }

    /// Column `column` of `rows`; `NONE` cells are skipped.
    pub(crate) fn column(rows: &'a [Vec<u32>], column: usize, len: usize) -> Self {
        Self {
            repr: Repr::Column { rows, column },
            len,
        }
    }

    pub(crate) fn linked(walk: LinkedWalk<'a>, len: usize) -> Self {
        Self {
            repr: Repr::Linked(walk),
            len,
        }
    }

    /// Number of edges in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vertex has no edges in this direction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A fresh pass over the edges.
    pub fn iter(&self) -> EdgeIter<'a> {
        let state = match self.repr {
            Repr::Empty => IterState::Empty,
            Repr::Slice(edges) => IterState::Slice(edges.iter()),
            Repr::Map(map) => IterState::Map(map.values()),
            Repr::Row(row) => IterState::Row(row.iter()),
            Repr::Column { rows, column } => IterState::Column {
                rows: rows.iter(),
                column,
            },
            Repr::Linked(walk) => IterState::Linked {
                walk,
                next: walk.head,
            },
        };
        EdgeIter {
            state,
            remaining: self.len,
        }
    }

    /// Returns `true` if `edge` is in the set. \(O(len)\).
    pub fn contains(&self, edge: usize) -> bool {
        self.iter().any(|e| e == edge)
    }

    /// Collects the edges.
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for EdgeSet<'a> {
    type Item = usize;
    type IntoIter = EdgeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &EdgeSet<'a> {
    type Item = usize;
    type IntoIter = EdgeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl core::fmt::Debug for EdgeSet<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over an [`EdgeSet`].
pub struct EdgeIter<'a> {
    state: IterState<'a>,
    remaining: usize,
}

enum IterState<'a> {
    Empty,
    Slice(slice::Iter<'a, u32>),
    Map(hash_map::Values<'a, u32, u32>),
    Row(slice::Iter<'a, u32>),
    Column {
        rows: slice::Iter<'a, Vec<u32>>,
        column: usize,
    },
    Linked {
        walk: LinkedWalk<'a>,
        next: u32,
    },
}

impl Iterator for EdgeIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let edge = match &mut self.state {
            IterState::Empty => None,
            IterState::Slice(it) => it.next().copied(),
            IterState::Map(it) => it.next().copied(),
            IterState::Row(it) => it.find(|&&e| e != NONE).copied(),
            IterState::Column { rows, column } => rows
                .find_map(|row| Some(row[*column]).filter(|&e| e != NONE)),
            IterState::Linked { walk, next } => {
                let edge = *next;
                if edge == NONE {
                    None
                } else {
                    let role = walk.role.at(walk.endpoints, edge as usize, walk.vertex);
                    *next = walk.links[edge as usize].next[role];
                    Some(edge)
                }
            }
        }?;
        self.remaining -= 1;
        Some(edge as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for EdgeIter<'_> {}

impl FusedIterator for EdgeIter<'_> {}
