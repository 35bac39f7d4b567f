//! Mutable graph layouts.
//!
//! All of them share [`MutableGraph`], which owns the index spaces, endpoints
//! and weights; each layout only contributes an [`Adjacency`] structure.

pub mod array_graph;
pub mod hashmap_graph;
pub mod linked_graph;
pub mod matrix_graph;
pub mod mutable_graph;

pub use array_graph::{ArrayAdjacency, ArrayGraph};
pub use hashmap_graph::{HashmapAdjacency, HashmapGraph, NeighborSlot};
pub use linked_graph::{LinkedAdjacency, LinkedGraph};
pub use matrix_graph::{MatrixAdjacency, MatrixGraph};
pub use mutable_graph::{Adjacency, MutableGraph};
