//! Immutable compressed layouts.
//!
//! [`CsrGraph`] is a frozen, compact snapshot; it shares no state with the
//! graph or builder it was built from and can be read from many threads.

pub mod csr_graph;

pub use csr_graph::{CsrGraph, CsrOptions, ReIndexedGraph, ReIndexingMap};
