//! Columnar per-element attribute storage ("weights").
//!
//! A [`Weights<T>`] column maps every live index of one element set to a value,
//! handing out a default for indices that were never written. Columns never
//! watch the element set themselves: the owning graph applies the matching
//! `swap_and_clear` / `clear` at the moment it retires an index, through the
//! [`WeightsManager`] that keeps all columns of a set at the same length and
//! capacity.
//!
//! Memory layout: `data` is a single `Vec<T>` whose length is the *capacity*;
//! slots in `len()..capacity()` always hold the default value.

mod manager;

pub use manager::WeightsManager;

use core::any::{type_name, Any, TypeId};
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::collections::element_set::ElementSet;
use crate::error::{ElementKind, GraphError, Result};

/// The value families a column can be specialised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightKind {
    /// Any cloneable value.
    Obj,
    /// `i32` values.
    Int,
    /// `i64` values.
    Long,
}

impl WeightKind {
    /// Classifies a value type.
    pub fn of<T: 'static>() -> Self {
        let id = TypeId::of::<T>();
        if id == TypeId::of::<i32>() {
            WeightKind::Int
        } else if id == TypeId::of::<i64>() {
            WeightKind::Long
        } else {
            WeightKind::Obj
        }
    }
}

/// A growable column of per-element values with a default.
#[derive(Clone)]
pub struct Weights<T> {
    kind: ElementKind,
    data: Vec<T>,
    size: usize,
    default: T,
}

impl<T: Clone + 'static> Weights<T> {
    /// Creates an empty column for `kind` elements.
    pub fn new(kind: ElementKind, default: T) -> Self {
        Self {
            kind,
            data: Vec::new(),
            size: 0,
            default,
        }
    }

    /// Creates a column covering `0..len` with room for `capacity` elements,
    /// every slot holding `default`.
    pub fn with_len(kind: ElementKind, default: T, len: usize, capacity: usize) -> Self {
        let mut weights = Self::new(kind, default);
        weights.expand(capacity.max(len));
        weights.size = len;
        weights
    }

    /// Element kind this column is keyed by.
    pub fn element_kind(&self) -> ElementKind {
        self.kind
    }

    /// Value family of `T`.
    pub fn value_kind(&self) -> WeightKind {
        WeightKind::of::<T>()
    }

    /// Number of covered elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if no element is covered.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Allocated slots.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Value returned for never-written slots.
    pub fn default_value(&self) -> &T {
        &self.default
    }

    #[inline]
    fn check(&self, index: usize) -> Result<()> {
        if index < self.size {
            Ok(())
        } else {
            Err(GraphError::no_such_element(self.kind, index))
        }
    }

    /// The value of `index`.
    ///
    /// # Errors
    /// "no such vertex/edge" if `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T> {
        self.check(index)?;
        Ok(&self.data[index])
    }

    /// Overwrites the value of `index`, returning the previous one.
    ///
    /// # Errors
    /// "no such vertex/edge" if `index >= len()`.
    #[inline]
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        self.check(index)?;
        Ok(core::mem::replace(&mut self.data[index], value))
    }

    /// Values of `0..len()` in index order.
    pub fn values(&self) -> &[T] {
        &self.data[..self.size]
    }

    /// Grows the backing storage to at least `capacity` slots, back-filling
    /// the default. Never shrinks.
    pub fn expand(&mut self, capacity: usize) {
        if capacity > self.data.len() {
            let target = capacity.max(self.data.len() * 2);
            self.data.resize(target, self.default.clone());
        }
    }

    /// Exchanges the values of two covered indices.
    ///
    /// # Errors
    /// "no such vertex/edge" if either index is not covered.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.check(i)?;
        self.check(j)?;
        self.data.swap(i, j);
        Ok(())
    }

    /// Resets `index` to the default value.
    ///
    /// # Errors
    /// "no such vertex/edge" if `index >= len()`.
    pub fn clear(&mut self, index: usize) -> Result<()> {
        self.check(index)?;
        self.data[index] = self.default.clone();
        Ok(())
    }

    /// Deep copy bound to `set`, which must have the same kind and length.
    ///
    /// # Errors
    /// [`GraphError::InvalidOptions`] if `set` does not match.
    pub fn copy_for(&self, set: &ElementSet) -> Result<Self> {
        if set.kind() != self.kind || set.len() != self.size {
            return Err(GraphError::InvalidOptions(format!(
                "weights of {} {}s cannot be bound to a set of {} {}s",
                self.size,
                self.kind,
                set.len(),
                set.kind()
            )));
        }
        let mut copy = Self::new(self.kind, self.default.clone());
        copy.data = self.values().to_vec();
        copy.size = self.size;
        Ok(copy)
    }

    pub(crate) fn set_len(&mut self, len: usize) {
        self.expand(len);
        self.size = len;
    }

    pub(crate) fn clear_slot(&mut self, index: usize) {
        self.data[index] = self.default.clone();
    }

    pub(crate) fn swap_and_clear_slot(&mut self, removed: usize, swapped: usize) {
        let value = core::mem::replace(&mut self.data[swapped], self.default.clone());
        self.data[removed] = value;
    }

    pub(crate) fn clear_all(&mut self) {
        for slot in &mut self.data[..self.size] {
            *slot = self.default.clone();
        }
        self.size = 0;
    }

    /// Column whose slot `i` holds this column's slot `reindexed_to_orig[i]`.
    pub(crate) fn permuted(&self, reindexed_to_orig: &[usize]) -> Self {
        debug_assert_eq!(reindexed_to_orig.len(), self.size);
        let mut copy = Self::new(self.kind, self.default.clone());
        copy.data = reindexed_to_orig.iter().map(|&orig| self.data[orig].clone()).collect();
        copy.size = self.size;
        copy
    }
}

impl<T: fmt::Debug> fmt::Debug for Weights<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Weights")
            .field("kind", &self.kind)
            .field("values", &&self.data[..self.size])
            .field("default", &self.default)
            .finish()
    }
}

/// Type-erased column operations used by [`WeightsManager`].
pub(crate) trait ErasedWeights: Send + Sync {
    fn value_kind(&self) -> WeightKind;
    fn type_name(&self) -> &'static str;
    fn expand(&mut self, capacity: usize);
    fn set_len(&mut self, len: usize);
    fn clear_slot(&mut self, index: usize);
    fn swap_and_clear_slot(&mut self, removed: usize, swapped: usize);
    fn clear_all(&mut self);
    fn boxed_copy(&self) -> Box<dyn ErasedWeights>;
    fn boxed_permuted(&self, reindexed_to_orig: &[usize]) -> Box<dyn ErasedWeights>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Clone + Send + Sync + 'static> ErasedWeights for Weights<T> {
    fn value_kind(&self) -> WeightKind {
        WeightKind::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn expand(&mut self, capacity: usize) {
        Weights::expand(self, capacity);
    }

    fn set_len(&mut self, len: usize) {
        Weights::set_len(self, len);
    }

    fn clear_slot(&mut self, index: usize) {
        Weights::clear_slot(self, index);
    }

    fn swap_and_clear_slot(&mut self, removed: usize, swapped: usize) {
        Weights::swap_and_clear_slot(self, removed, swapped);
    }

    fn clear_all(&mut self) {
        Weights::clear_all(self);
    }

    fn boxed_copy(&self) -> Box<dyn ErasedWeights> {
        Box::new(self.clone())
    }

    fn boxed_permuted(&self, reindexed_to_orig: &[usize]) -> Box<dyn ErasedWeights> {
        Box::new(self.permuted(reindexed_to_orig))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
