//! Packed `(source, target)` records for every edge.

use crate::error::{GraphError, Result};

/// Placeholder stored in freed or unused slots.
pub(crate) const NONE: u32 = u32::MAX;

/// Both endpoints of one edge, packed into a single 8-byte record.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeEndpoints {
    source: u32,
    target: u32,
}

impl EdgeEndpoints {
    #[inline(always)]
    pub(crate) fn new(source: usize, target: usize) -> Self {
        debug_assert!(source < NONE as usize && target < NONE as usize);
        Self {
            source: source as u32,
            target: target as u32,
        }
    }

    /// Source vertex.
    #[inline(always)]
    pub fn source(self) -> usize {
        self.source as usize
    }

    /// Target vertex.
    #[inline(always)]
    pub fn target(self) -> usize {
        self.target as usize
    }

    /// Returns `true` for `(v, v)`.
    #[inline(always)]
    pub fn is_self_edge(self) -> bool {
        self.source == self.target
    }

    /// The endpoint opposite to `vertex`, if `vertex` is an endpoint.
    #[inline]
    pub fn opposite(self, vertex: usize) -> Option<usize> {
        if self.source() == vertex {
            Some(self.target())
        } else if self.target() == vertex {
            Some(self.source())
        } else {
            None
        }
    }

    /// Same edge with the endpoints exchanged.
    #[must_use]
    #[inline(always)]
    pub fn reversed(self) -> Self {
        Self {
            source: self.target,
            target: self.source,
        }
    }
}

/// Dense table of [`EdgeEndpoints`], indexed by edge.
#[derive(Debug, Clone, Default)]
pub struct EndpointStore {
    records: Vec<EdgeEndpoints>,
}

impl EndpointStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with room for `capacity` edges.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Number of recorded edges.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no edge is recorded.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in edge order.
    #[inline]
    pub fn as_slice(&self) -> &[EdgeEndpoints] {
        &self.records
    }

    /// Endpoints of `edge`.
    ///
    /// # Errors
    /// [`GraphError::NoSuchEdge`] if `edge` is not recorded.
    #[inline]
    pub fn get(&self, edge: usize) -> Result<EdgeEndpoints> {
        self.records
            .get(edge)
            .copied()
            .ok_or(GraphError::NoSuchEdge(edge))
    }

    /// Source of an edge already known to be live.
    #[inline(always)]
    pub(crate) fn source(&self, edge: usize) -> usize {
        self.records[edge].source()
    }

    #[inline(always)]
    pub(crate) fn record(&self, edge: usize) -> EdgeEndpoints {
        self.records[edge]
    }

    /// The endpoint of `edge` that is not `vertex`.
    ///
    /// # Errors
    /// [`GraphError::NoSuchEdge`], or [`GraphError::NoSuchVertex`] if `vertex`
    /// is not an endpoint of `edge`.
    pub fn endpoint(&self, edge: usize, vertex: usize) -> Result<usize> {
        self.get(edge)?
            .opposite(vertex)
            .ok_or(GraphError::NoSuchVertex(vertex))
    }

    pub(crate) fn ensure_capacity(&mut self, capacity: usize) {
        if capacity > self.records.len() {
            self.records.reserve(capacity - self.records.len());
        }
    }

    /// Appends the record of the newest edge.
    pub(crate) fn push(&mut self, source: usize, target: usize) {
        self.records.push(EdgeEndpoints::new(source, target));
    }

    pub(crate) fn set(&mut self, edge: usize, source: usize, target: usize) {
        self.records[edge] = EdgeEndpoints::new(source, target);
    }

    pub(crate) fn reverse(&mut self, edge: usize) {
        self.records[edge] = self.records[edge].reversed();
    }

    /// Rewrites every occurrence of `from` in `edge` to `to`.
    pub(crate) fn replace_endpoint(&mut self, edge: usize, from: usize, to: usize) {
        let record = &mut self.records[edge];
        let (from, to) = (from as u32, to as u32);
        if record.source == from {
            record.source = to;
        }
        if record.target == from {
            record.target = to;
        }
    }

    /// Drops the last record; the caller has already moved it if needed.
    pub(crate) fn swap_and_remove(&mut self, removed: usize, swapped: usize) {
        debug_assert_eq!(swapped + 1, self.records.len());
        self.records.swap_remove(removed);
    }

    pub(crate) fn remove_last(&mut self, edge: usize) {
        debug_assert_eq!(edge + 1, self.records.len());
        self.records.truncate(edge);
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    /// Records in the order given by `reindexed_to_orig`.
    pub(crate) fn permuted(&self, reindexed_to_orig: &[usize]) -> Self {
        Self {
            records: reindexed_to_orig.iter().map(|&orig| self.records[orig]).collect(),
        }
    }
}

impl FromIterator<(usize, usize)> for EndpointStore {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self {
            records: iter
                .into_iter()
                .map(|(source, target)| EdgeEndpoints::new(source, target))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_two_u32() {
        assert_eq!(core::mem::size_of::<EdgeEndpoints>(), 8);
        let e = EdgeEndpoints::new(3, 9);
        assert_eq!((e.source(), e.target()), (3, 9));
        assert_eq!(e.reversed().source(), 9);
        assert_eq!(e.opposite(9), Some(3));
        assert_eq!(e.opposite(4), None);
        assert!(EdgeEndpoints::new(2, 2).is_self_edge());
    }

    #[test]
    fn test_swap_and_remove_moves_last_record() {
        let mut store: EndpointStore = [(0, 1), (1, 2), (2, 0)].into_iter().collect();
        store.swap_and_remove(0, 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap(), EdgeEndpoints::new(2, 0));
        assert_eq!(store.get(2), Err(GraphError::NoSuchEdge(2)));
    }

    #[test]
    fn test_replace_endpoint_rewrites_both_roles() {
        let mut store: EndpointStore = [(4, 4), (4, 1)].into_iter().collect();
        store.replace_endpoint(0, 4, 0);
        store.replace_endpoint(1, 4, 0);
        assert_eq!(store.get(0).unwrap(), EdgeEndpoints::new(0, 0));
        assert_eq!(store.get(1).unwrap(), EdgeEndpoints::new(0, 1));
        assert_eq!(store.endpoint(1, 1).unwrap(), 0);
        assert_eq!(store.endpoint(1, 7), Err(GraphError::NoSuchVertex(7)));
    }
}
