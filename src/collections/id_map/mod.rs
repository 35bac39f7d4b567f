//! Bidirectional map between caller-chosen identifiers and dense indices.
//!
//! The map registers itself as an [`IndexRemoveListener`] on the element set it
//! mirrors, so index renames done by swap-and-remove are applied to both
//! directions inside the notification itself.
//!
//! ### Performance Characteristics
//! | Operation | Complexity |
//! |-----------|------------|
//! | `id_to_index` | \(O(1)\) average |
//! | `index_to_id` | \(O(1)\) |
//! | `rename` | \(O(1)\) average |
//! | swap notification | \(O(1)\) average |

use core::fmt;
use core::hash::Hash;

use num_traits::PrimInt;
use rustc_hash::FxHashMap;

use crate::collections::element_set::IndexRemoveListener;
use crate::error::{ElementKind, GraphError, Result};

/// Identifier types accepted by [`IdMap`]: any primitive integer.
pub trait GraphId: PrimInt + Hash + fmt::Debug + Send + Sync + 'static {}

impl<K: PrimInt + Hash + fmt::Debug + Send + Sync + 'static> GraphId for K {}

/// Identifier/index bijection for one element kind.
#[derive(Clone)]
pub struct IdMap<K> {
    kind: ElementKind,
    id_to_index: FxHashMap<K, usize>,
    index_to_id: Vec<K>,
    frozen: bool,
}

impl<K: GraphId> IdMap<K> {
    /// Empty, mutable map.
    pub fn new(kind: ElementKind) -> Self {
        Self::with_capacity(kind, 0)
    }

    /// Empty map with room for `capacity` identifiers.
    pub fn with_capacity(kind: ElementKind, capacity: usize) -> Self {
        Self {
            kind,
            id_to_index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            index_to_id: Vec::with_capacity(capacity),
            frozen: false,
        }
    }

    /// Copy of `orig`. With `reindexed_to_orig`, slot `i` of the copy holds the
    /// identifier of `orig`'s slot `reindexed_to_orig[i]`.
    pub fn copy_of(orig: &IdMap<K>, reindexed_to_orig: Option<&[usize]>, frozen: bool) -> Self {
        let index_to_id: Vec<K> = match reindexed_to_orig {
            Some(order) => {
                debug_assert_eq!(order.len(), orig.len());
                order.iter().map(|&i| orig.index_to_id[i]).collect()
            }
            None => orig.index_to_id.clone(),
        };
        let id_to_index = index_to_id.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        Self {
            kind: orig.kind,
            id_to_index,
            index_to_id,
            frozen,
        }
    }

    /// Element kind of the identifiers.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Number of mapped identifiers.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.index_to_id.len()
    }

    /// Returns `true` if nothing is mapped.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.index_to_id.is_empty()
    }

    /// Returns `true` if identifiers cannot be renamed.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Identifiers in index order.
    pub fn ids(&self) -> &[K] {
        &self.index_to_id
    }

    /// Returns `true` if `id` is mapped.
    pub fn contains(&self, id: K) -> bool {
        self.id_to_index.contains_key(&id)
    }

    /// Index of `id`, if mapped.
    #[inline]
    pub fn id_to_index(&self, id: K) -> Option<usize> {
        self.id_to_index.get(&id).copied()
    }

    /// Identifier at `index`, if live.
    #[inline]
    pub fn index_to_id(&self, index: usize) -> Option<K> {
        self.index_to_id.get(index).copied()
    }

    /// Index of `id`.
    ///
    /// # Errors
    /// [`GraphError::NoSuchId`] if `id` is not mapped.
    #[inline]
    pub fn index_of(&self, id: K) -> Result<usize> {
        self.id_to_index(id).ok_or_else(|| self.no_such_id(id))
    }

    /// Identifier at `index`.
    ///
    /// # Errors
    /// "no such vertex/edge" if `index` is not live.
    #[inline]
    pub fn id_of(&self, index: usize) -> Result<K> {
        self.index_to_id(index)
            .ok_or_else(|| GraphError::no_such_element(self.kind, index))
    }

    fn no_such_id(&self, id: K) -> GraphError {
        GraphError::NoSuchId {
            kind: self.kind,
            id: format!("{id:?}"),
        }
    }

    fn duplicate_id(&self, id: K) -> GraphError {
        GraphError::DuplicateId {
            kind: self.kind,
            id: format!("{id:?}"),
        }
    }

    /// Fails unless `id` could be added right now.
    ///
    /// # Errors
    /// [`GraphError::NegativeId`] or [`GraphError::DuplicateId`].
    pub fn check_new_id(&self, id: K) -> Result<()> {
        if id < K::zero() {
            return Err(GraphError::NegativeId {
                kind: self.kind,
                id: format!("{id:?}"),
            });
        }
        if self.contains(id) {
            return Err(self.duplicate_id(id));
        }
        Ok(())
    }

    /// Maps `id` to the next index (`len()`).
    ///
    /// # Errors
    /// As [`IdMap::check_new_id`].
    pub(crate) fn push(&mut self, id: K) -> Result<usize> {
        self.check_new_id(id)?;
        let index = self.index_to_id.len();
        self.id_to_index.insert(id, index);
        self.index_to_id.push(id);
        Ok(index)
    }

    /// Maps every id of `ids` to consecutive new indices. On the first invalid
    /// id every identifier added by this call is dropped again.
    ///
    /// # Errors
    /// As [`IdMap::check_new_id`].
    pub(crate) fn push_all<I: IntoIterator<Item = K>>(&mut self, ids: I) -> Result<usize> {
        let start = self.len();
        for id in ids {
            if let Err(err) = self.push(id) {
                self.truncate(start);
                return Err(err);
            }
        }
        Ok(self.len() - start)
    }

    /// Drops every identifier at index `len` and beyond.
    pub(crate) fn truncate(&mut self, len: usize) {
        for id in self.index_to_id.drain(len..) {
            self.id_to_index.remove(&id);
        }
    }

    /// Gives the element named `old` the identifier `new`.
    ///
    /// # Errors
    /// [`GraphError::Immutable`] on frozen maps, [`GraphError::NoSuchId`] if
    /// `old` is unmapped, [`GraphError::NegativeId`] or
    /// [`GraphError::DuplicateId`] for an unusable `new`. The map is unchanged
    /// on failure.
    pub fn rename(&mut self, old: K, new: K) -> Result<()> {
        if self.frozen {
            return Err(GraphError::Immutable("rename id"));
        }
        let index = self.index_of(old)?;
        if old == new {
            return Ok(());
        }
        self.check_new_id(new)?;
        self.id_to_index.remove(&old);
        self.id_to_index.insert(new, index);
        self.index_to_id[index] = new;
        Ok(())
    }
}

impl<K: GraphId> IndexRemoveListener for IdMap<K> {
    fn removed_last(&mut self, removed: usize) {
        debug_assert_eq!(removed + 1, self.index_to_id.len());
        if let Some(id) = self.index_to_id.pop() {
            self.id_to_index.remove(&id);
        }
    }

    fn swapped_and_removed(&mut self, removed: usize, swapped: usize) {
        debug_assert_eq!(swapped + 1, self.index_to_id.len());
        let removed_id = self.index_to_id.swap_remove(removed);
        self.id_to_index.remove(&removed_id);
        let moved_id = self.index_to_id[removed];
        self.id_to_index.insert(moved_id, removed);
    }
}

impl<K: fmt::Debug> fmt::Debug for IdMap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdMap")
            .field("kind", &self.kind)
            .field("ids", &self.index_to_id)
            .field("frozen", &self.frozen)
            .finish()
    }
}
