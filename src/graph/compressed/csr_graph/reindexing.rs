use serde::{Deserialize, Serialize};

use super::CsrGraph;
use crate::error::{ElementKind, GraphError, Result};

/// A bijection between original indices and the indices of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReIndexingMap {
    orig_to_reindexed: Vec<usize>,
    reindexed_to_orig: Vec<usize>,
}

impl ReIndexingMap {
    /// Builds the map from its forward direction.
    ///
    /// # Errors
    /// [`GraphError::InvalidOptions`] if `orig_to_reindexed` is not a
    /// permutation of `0..len`.
    pub fn from_orig_to_reindexed(orig_to_reindexed: Vec<usize>) -> Result<Self> {
        let n = orig_to_reindexed.len();
        let mut reindexed_to_orig = vec![usize::MAX; n];
        for (orig, &re) in orig_to_reindexed.iter().enumerate() {
            match reindexed_to_orig.get_mut(re) {
                Some(slot) if *slot == usize::MAX => *slot = orig,
                _ => {
                    return Err(GraphError::InvalidOptions(format!(
                        "index {re} appears twice or is out of range in a reindexing of {n}"
                    )))
                }
            }
        }
        Ok(Self {
            orig_to_reindexed,
            reindexed_to_orig,
        })
    }

    pub(crate) fn from_parts(orig_to_reindexed: Vec<usize>, reindexed_to_orig: Vec<usize>) -> Self {
        debug_assert_eq!(orig_to_reindexed.len(), reindexed_to_orig.len());
        Self {
            orig_to_reindexed,
            reindexed_to_orig,
        }
    }

    /// Number of mapped indices.
    pub fn len(&self) -> usize {
        self.orig_to_reindexed.len()
    }

    /// Returns `true` if nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.orig_to_reindexed.is_empty()
    }

    /// New index of original index `orig`.
    ///
    /// # Errors
    /// "no such element" if `orig` is out of range.
    pub fn orig_to_reindexed(&self, kind: ElementKind, orig: usize) -> Result<usize> {
        self.orig_to_reindexed
            .get(orig)
            .copied()
            .ok_or_else(|| GraphError::no_such_element(kind, orig))
    }

    /// Original index of new index `reindexed`.
    ///
    /// # Errors
    /// "no such element" if `reindexed` is out of range.
    pub fn reindexed_to_orig(&self, kind: ElementKind, reindexed: usize) -> Result<usize> {
        self.reindexed_to_orig
            .get(reindexed)
            .copied()
            .ok_or_else(|| GraphError::no_such_element(kind, reindexed))
    }

    /// The forward direction as a slice.
    pub fn orig_to_reindexed_slice(&self) -> &[usize] {
        &self.orig_to_reindexed
    }

    /// The backward direction as a slice.
    pub fn reindexed_to_orig_slice(&self) -> &[usize] {
        &self.reindexed_to_orig
    }

    /// Returns `true` if every index maps to itself.
    pub fn is_identity(&self) -> bool {
        self.orig_to_reindexed.iter().enumerate().all(|(i, &r)| i == r)
    }
}

/// A snapshot together with the index renamings applied while building it.
#[derive(Debug)]
pub struct ReIndexedGraph {
    /// The snapshot.
    pub graph: CsrGraph,
    /// Vertex renaming; vertices are never renumbered, so this is `None`.
    pub vertices_reindexing: Option<ReIndexingMap>,
    /// Edge renaming, present when edge reindexing was requested.
    pub edges_reindexing: Option<ReIndexingMap>,
}
