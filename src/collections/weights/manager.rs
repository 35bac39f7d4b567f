use std::collections::BTreeMap;

use tracing::trace;

use super::{ErasedWeights, WeightKind, Weights};
use crate::error::{ElementKind, GraphError, Result};

/// All weight columns registered against one element set.
///
/// Keeps every column at the set's length and at one shared capacity, and
/// applies removals to all of them at once.
pub struct WeightsManager {
    kind: ElementKind,
    size: usize,
    capacity: usize,
    frozen: bool,
    columns: BTreeMap<String, Box<dyn ErasedWeights>>,
}

impl WeightsManager {
    /// Creates an empty manager for `kind` elements.
    pub fn new(kind: ElementKind, expected_capacity: usize) -> Self {
        Self {
            kind,
            size: 0,
            capacity: expected_capacity,
            frozen: false,
            columns: BTreeMap::new(),
        }
    }

    /// Element kind the columns are keyed by.
    pub fn element_kind(&self) -> ElementKind {
        self.kind
    }

    /// Number of covered elements.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if no element is covered.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if columns may not be added, removed or written.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Registered keys, in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.keys().map(String::as_str)
    }

    /// Returns `true` if a column is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.columns.contains_key(key)
    }

    /// Value family of the column under `key`.
    pub fn value_kind(&self, key: &str) -> Option<WeightKind> {
        self.columns.get(key).map(|column| column.value_kind())
    }

    fn check_mutable(&self, op: &'static str) -> Result<()> {
        if self.frozen {
            Err(GraphError::Immutable(op))
        } else {
            Ok(())
        }
    }

    /// Registers a new column of `T` under `key`.
    ///
    /// # Errors
    /// [`GraphError::DuplicateWeights`] if the key is taken,
    /// [`GraphError::Immutable`] on frozen managers.
    pub fn add<T: Clone + Send + Sync + 'static>(&mut self, key: &str, default: T) -> Result<&mut Weights<T>> {
        self.check_mutable("add weights")?;
        if self.columns.contains_key(key) {
            return Err(GraphError::DuplicateWeights(key.to_owned()));
        }
        let column = Weights::with_len(self.kind, default, self.size, self.capacity);
        self.columns.insert(key.to_owned(), Box::new(column));
        self.get_mut(key)
    }

    /// Column of `T` under `key`.
    ///
    /// # Errors
    /// [`GraphError::NoSuchWeights`] or [`GraphError::WeightTypeMismatch`].
    pub fn get<T: Clone + Send + Sync + 'static>(&self, key: &str) -> Result<&Weights<T>> {
        let column = self
            .columns
            .get(key)
            .ok_or_else(|| GraphError::NoSuchWeights(key.to_owned()))?;
        column
            .as_any()
            .downcast_ref::<Weights<T>>()
            .ok_or_else(|| GraphError::WeightTypeMismatch {
                key: key.to_owned(),
                expected: core::any::type_name::<T>(),
            })
    }

    /// Mutable column of `T` under `key`.
    ///
    /// # Errors
    /// As [`WeightsManager::get`], plus [`GraphError::Immutable`] on frozen
    /// managers.
    pub fn get_mut<T: Clone + Send + Sync + 'static>(&mut self, key: &str) -> Result<&mut Weights<T>> {
        self.check_mutable("set weights")?;
        let column = self
            .columns
            .get_mut(key)
            .ok_or_else(|| GraphError::NoSuchWeights(key.to_owned()))?;
        column
            .as_any_mut()
            .downcast_mut::<Weights<T>>()
            .ok_or_else(|| GraphError::WeightTypeMismatch {
                key: key.to_owned(),
                expected: core::any::type_name::<T>(),
            })
    }

    /// Drops the column under `key`.
    ///
    /// # Errors
    /// [`GraphError::NoSuchWeights`], or [`GraphError::Immutable`] on frozen
    /// managers.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.check_mutable("remove weights")?;
        self.columns
            .remove(key)
            .map(drop)
            .ok_or_else(|| GraphError::NoSuchWeights(key.to_owned()))
    }

    /// Type name of the column under `key`, for diagnostics.
    pub fn type_name(&self, key: &str) -> Option<&'static str> {
        self.columns.get(key).map(|column| column.type_name())
    }

    pub(crate) fn freeze(&mut self) {
        self.frozen = true;
    }

    pub(crate) fn ensure_capacity(&mut self, capacity: usize) {
        if capacity <= self.capacity {
            return;
        }
        self.capacity = capacity.max(self.capacity * 2);
        for column in self.columns.values_mut() {
            column.expand(self.capacity);
        }
    }

    /// Grows coverage to `len` elements, new slots holding defaults.
    pub(crate) fn set_len(&mut self, len: usize) {
        debug_assert!(len >= self.size);
        self.ensure_capacity(len);
        self.size = len;
        for column in self.columns.values_mut() {
            column.set_len(len);
        }
    }

    /// Drops the last element.
    pub(crate) fn remove_last(&mut self, index: usize) {
        debug_assert_eq!(index + 1, self.size);
        for column in self.columns.values_mut() {
            column.clear_slot(index);
            column.set_len(index);
        }
        self.size = index;
    }

    /// Moves `swapped` (the last element) into `removed` and drops `swapped`.
    pub(crate) fn swap_and_remove(&mut self, removed: usize, swapped: usize) {
        debug_assert_eq!(swapped + 1, self.size);
        for column in self.columns.values_mut() {
            column.swap_and_clear_slot(removed, swapped);
            column.set_len(swapped);
        }
        self.size = swapped;
    }

    pub(crate) fn clear(&mut self) {
        for column in self.columns.values_mut() {
            column.clear_all();
        }
        self.size = 0;
    }

    /// Independent deep copy.
    pub(crate) fn copy(&self, frozen: bool) -> Self {
        Self {
            kind: self.kind,
            size: self.size,
            capacity: self.capacity,
            frozen,
            columns: self
                .columns
                .iter()
                .map(|(key, column)| (key.clone(), column.boxed_copy()))
                .collect(),
        }
    }

    /// Deep copy whose element `i` holds this manager's element
    /// `reindexed_to_orig[i]`.
    pub(crate) fn permuted(&self, reindexed_to_orig: &[usize], frozen: bool) -> Self {
        trace!(kind = %self.kind, columns = self.columns.len(), "weights.permute");
        Self {
            kind: self.kind,
            size: self.size,
            capacity: self.size,
            frozen,
            columns: self
                .columns
                .iter()
                .map(|(key, column)| (key.clone(), column.boxed_permuted(reindexed_to_orig)))
                .collect(),
        }
    }
}

impl core::fmt::Debug for WeightsManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let columns: Vec<_> = self
            .columns
            .iter()
            .map(|(key, column)| (key.as_str(), column.type_name()))
            .collect();
        f.debug_struct("WeightsManager")
            .field("kind", &self.kind)
            .field("len", &self.size)
            .field("frozen", &self.frozen)
            .field("columns", &columns)
            .finish()
    }
}
