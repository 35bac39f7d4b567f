//! The dense, gap-free index space of vertices or edges.
//!
//! The live indices are always exactly `0..len()`. Removal keeps them dense by
//! moving the last index into the freed slot ("swap-and-remove"). The set does
//! not own any per-element data: whoever owns the data migrates it, then asks
//! the set to retire the index, and the set tells every registered listener
//! which of the two removal shapes happened.
//!
//! Listeners are owned by the set. Registration hands back a typed
//! [`ListenerKey`] through which the listener can be borrowed again or taken
//! back out.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `new_index` | \(O(1)\) | |
//! | `remove_index` | \(O(L)\) | one callback per listener |
//! | `clear` | \(O(n \cdot L)\) | `removed_last` for every index, last first |

use core::any::Any;
use core::fmt;
use core::marker::PhantomData;
use core::ops::Range;

use crate::error::{ElementKind, GraphError, Result};

/// Largest number of elements an index space may hold.
///
/// Indices are stored as `u32` in incidence structures; `u32::MAX` itself is
/// reserved as the "no element" sentinel.
pub const MAX_ELEMENTS: usize = u32::MAX as usize;

/// Observer of index removals.
///
/// Exactly one of the two callbacks fires for every removed index, before
/// `remove_index` returns.
pub trait IndexRemoveListener: Send + Sync + 'static {
    /// `removed` was the last index and is simply gone.
    fn removed_last(&mut self, removed: usize);

    /// The element at `swapped` (the former last index) now lives at `removed`,
    /// and index `swapped` is gone.
    fn swapped_and_removed(&mut self, removed: usize, swapped: usize);
}

/// The shape of a single removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRemoval {
    /// The last index was removed.
    RemovedLast(usize),
    /// The last index moved into `removed`.
    SwappedAndRemoved {
        /// The freed slot, now holding the former last element.
        removed: usize,
        /// The former last index, no longer live.
        swapped: usize,
    },
}

impl IndexRemoval {
    fn deliver(self, listener: &mut dyn IndexRemoveListener) {
        match self {
            IndexRemoval::RemovedLast(removed) => listener.removed_last(removed),
            IndexRemoval::SwappedAndRemoved { removed, swapped } => {
                listener.swapped_and_removed(removed, swapped);
            }
        }
    }
}

/// Handle to a listener registered on an [`ElementSet`].
pub struct ListenerKey<L> {
    id: u64,
    _marker: PhantomData<fn() -> L>,
}

impl<L> ListenerKey<L> {
    fn new(id: u64) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

impl<L> Clone for ListenerKey<L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L> Copy for ListenerKey<L> {}

impl<L> PartialEq for ListenerKey<L> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<L> Eq for ListenerKey<L> {}

impl<L> fmt::Debug for ListenerKey<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ListenerKey").field(&self.id).finish()
    }
}

/// Object-safe view of a registered listener that can also be downcast.
trait StoredListener: Send + Sync {
    fn notify(&mut self, event: IndexRemoval);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<L: IndexRemoveListener> StoredListener for L {
    fn notify(&mut self, event: IndexRemoval) {
        event.deliver(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A dense index space `{0, …, len-1}`.
pub struct ElementSet {
    kind: ElementKind,
    size: usize,
    fixed: bool,
    listeners: Vec<(u64, Box<dyn StoredListener>)>,
    next_listener_id: u64,
}

impl ElementSet {
    /// Creates an empty, growable set.
    pub fn new(kind: ElementKind) -> Self {
        Self::with_len(kind, 0)
    }

    /// Creates a growable set that already holds `0..len`.
    pub fn with_len(kind: ElementKind, len: usize) -> Self {
        Self {
            kind,
            size: len,
            fixed: false,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Creates a set frozen at `0..len`; adding or removing fails.
    pub fn fixed(kind: ElementKind, len: usize) -> Self {
        Self {
            fixed: true,
            ..Self::with_len(kind, len)
        }
    }

    /// Vertex or edge set.
    #[inline(always)]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Number of live elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if there are no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` for fixed-size sets.
    #[inline(always)]
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Returns `true` if `index` is live.
    #[inline(always)]
    pub fn contains(&self, index: usize) -> bool {
        index < self.size
    }

    /// The live indices.
    #[inline]
    pub fn iter(&self) -> Range<usize> {
        0..self.size
    }

    /// Fails with "no such vertex/edge" unless `index` is live.
    ///
    /// # Errors
    /// [`GraphError::NoSuchVertex`] or [`GraphError::NoSuchEdge`].
    #[inline]
    pub fn check(&self, index: usize) -> Result<()> {
        if index < self.size {
            Ok(())
        } else {
            Err(GraphError::no_such_element(self.kind, index))
        }
    }

    fn check_mutable(&self, op: &'static str) -> Result<()> {
        if self.fixed {
            Err(GraphError::Immutable(op))
        } else {
            Ok(())
        }
    }

    /// Allocates the next index (`len()` before the call).
    ///
    /// # Errors
    /// [`GraphError::Immutable`] on fixed sets and
    /// [`GraphError::CapacityExceeded`] when the index space is full.
    pub fn new_index(&mut self) -> Result<usize> {
        self.check_mutable("add element")?;
        if self.size >= MAX_ELEMENTS {
            return Err(GraphError::CapacityExceeded { kind: self.kind });
        }
        let index = self.size;
        self.size += 1;
        Ok(index)
    }

    /// Allocates `count` consecutive indices.
    ///
    /// # Errors
    /// As [`ElementSet::new_index`]; nothing is allocated on failure.
    pub fn add_indices(&mut self, count: usize) -> Result<Range<usize>> {
        self.check_mutable("add elements")?;
        let end = self
            .size
            .checked_add(count)
            .filter(|&end| end <= MAX_ELEMENTS)
            .ok_or(GraphError::CapacityExceeded { kind: self.kind })?;
        let start = self.size;
        self.size = end;
        Ok(start..end)
    }

    /// Retires `index`, moving the last index into its slot if needed.
    ///
    /// The caller must already have migrated any data it keeps for the last
    /// element. Every listener sees the returned event before this returns.
    ///
    /// # Errors
    /// [`GraphError::Immutable`] on fixed sets, "no such element" if `index`
    /// is not live.
    pub fn remove_index(&mut self, index: usize) -> Result<IndexRemoval> {
        self.check_mutable("remove element")?;
        self.check(index)?;
        let last = self.size - 1;
        let event = if index == last {
            IndexRemoval::RemovedLast(index)
        } else {
            IndexRemoval::SwappedAndRemoved {
                removed: index,
                swapped: last,
            }
        };
        self.size = last;
        self.notify(event);
        Ok(event)
    }

    /// Removes every index, last first, notifying listeners for each.
    ///
    /// # Errors
    /// [`GraphError::Immutable`] on fixed sets.
    pub fn clear(&mut self) -> Result<()> {
        self.check_mutable("clear")?;
        while self.size > 0 {
            self.size -= 1;
            self.notify(IndexRemoval::RemovedLast(self.size));
        }
        Ok(())
    }

    fn notify(&mut self, event: IndexRemoval) {
        for (_, listener) in &mut self.listeners {
            listener.notify(event);
        }
    }

    /// Registers a listener; the set takes ownership of it.
    pub fn add_remove_listener<L: IndexRemoveListener>(&mut self, listener: L) -> ListenerKey<L> {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        ListenerKey::new(id)
    }

    /// Unregisters a listener and hands it back.
    pub fn remove_remove_listener<L: IndexRemoveListener>(&mut self, key: ListenerKey<L>) -> Option<L> {
        let pos = self.listeners.iter().position(|(id, _)| *id == key.id)?;
        let (_, stored) = self.listeners.remove(pos);
        stored.into_any().downcast::<L>().ok().map(|boxed| *boxed)
    }

    /// Borrows a registered listener.
    pub fn listener<L: IndexRemoveListener>(&self, key: &ListenerKey<L>) -> Option<&L> {
        self.listeners
            .iter()
            .find(|(id, _)| *id == key.id)
            .and_then(|(_, stored)| stored.as_any().downcast_ref::<L>())
    }

    /// Mutably borrows a registered listener.
    pub fn listener_mut<L: IndexRemoveListener>(&mut self, key: &ListenerKey<L>) -> Option<&mut L> {
        self.listeners
            .iter_mut()
            .find(|(id, _)| *id == key.id)
            .and_then(|(_, stored)| stored.as_any_mut().downcast_mut::<L>())
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Listener-only access to an [`ElementSet`] owned by a graph.
///
/// Graphs hand this out instead of `&mut ElementSet`, so callers can subscribe
/// to removals without being able to allocate or retire indices directly.
pub struct Listeners<'a> {
    set: &'a mut ElementSet,
}

impl<'a> Listeners<'a> {
    pub(crate) fn new(set: &'a mut ElementSet) -> Self {
        Self { set }
    }

    /// See [`ElementSet::add_remove_listener`].
    pub fn add<L: IndexRemoveListener>(self, listener: L) -> ListenerKey<L> {
        self.set.add_remove_listener(listener)
    }

    /// See [`ElementSet::remove_remove_listener`].
    pub fn remove<L: IndexRemoveListener>(self, key: ListenerKey<L>) -> Option<L> {
        self.set.remove_remove_listener(key)
    }

    /// See [`ElementSet::listener_mut`].
    pub fn get_mut<L: IndexRemoveListener>(self, key: &ListenerKey<L>) -> Option<&'a mut L> {
        self.set.listener_mut(key)
    }
}

impl fmt::Debug for ElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementSet")
            .field("kind", &self.kind)
            .field("len", &self.size)
            .field("fixed", &self.fixed)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<'a> IntoIterator for &'a ElementSet {
    type Item = usize;
    type IntoIter = Range<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
