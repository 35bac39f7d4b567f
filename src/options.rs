//! Construction-time configuration: capabilities, representation choice and hints.
//!
//! Everything here is fixed once a graph is built. The types derive serde so
//! callers can keep graph configuration next to the rest of their settings.

use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GraphError, Result};

/// Structural properties of a graph instance, enforced by every mutation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities {
    /// Edges have a distinguished source and target.
    pub directed: bool,
    /// Edges `(v, v)` are accepted.
    pub self_edges: bool,
    /// More than one edge may connect the same ordered (directed) or unordered pair.
    pub parallel_edges: bool,
}

impl Capabilities {
    /// Directed graph, no self edges, no parallel edges.
    pub const fn directed() -> Self {
        Self {
            directed: true,
            self_edges: false,
            parallel_edges: false,
        }
    }

    /// Undirected graph, no self edges, no parallel edges.
    pub const fn undirected() -> Self {
        Self {
            directed: false,
            self_edges: false,
            parallel_edges: false,
        }
    }

    /// Returns a copy accepting self edges.
    #[must_use]
    pub const fn with_self_edges(mut self, allowed: bool) -> Self {
        self.self_edges = allowed;
        self
    }

    /// Returns a copy accepting parallel edges.
    #[must_use]
    pub const fn with_parallel_edges(mut self, allowed: bool) -> Self {
        self.parallel_edges = allowed;
        self
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::directed()
    }
}

/// The mutable adjacency layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Representation {
    /// Per-vertex growable arrays of incident edges.
    Array,
    /// Per-vertex map from neighbor to edge.
    Hashmap,
    /// Dense `n x n` table of edge indices.
    Matrix,
    /// Intrusive doubly-linked incidence lists.
    Linked,
}

impl Representation {
    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Representation::Array => "array",
            Representation::Hashmap => "hashmap",
            Representation::Matrix => "matrix",
            Representation::Linked => "linked",
        }
    }

    /// Whether this layout can store more than one edge per vertex pair.
    pub const fn supports_parallel_edges(self) -> bool {
        matches!(self, Representation::Array | Representation::Linked)
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Workload hints consulted when no representation is requested explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Hints {
    /// Most vertex pairs will be connected.
    pub dense_graph: bool,
    /// Edges are removed frequently.
    pub fast_edge_removal: bool,
}

/// Full set of options for building a graph.
///
/// ```
/// use indexgraph::{Capabilities, GraphOptions, Representation};
///
/// let options = GraphOptions::new(Capabilities::undirected());
/// assert_eq!(options.resolve_representation().unwrap(), Representation::Hashmap);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Capabilities of the built graph.
    pub capabilities: Capabilities,
    /// Explicit layout; overrides `hints` when set.
    pub representation: Option<Representation>,
    /// Layout selection hints.
    pub hints: Hints,
    /// Expected number of vertices, used to pre-size storage.
    pub expected_vertices: usize,
    /// Expected number of edges, used to pre-size storage.
    pub expected_edges: usize,
    /// Keep CSR incidence slices sorted for `O(log deg)` lookup in graphs
    /// built through [`IndexGraphBuilder::from_options`](crate::IndexGraphBuilder::from_options).
    pub fast_lookup: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self::new(Capabilities::default())
    }
}

impl GraphOptions {
    /// Options with the given capabilities and no hints.
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            representation: None,
            hints: Hints::default(),
            expected_vertices: 0,
            expected_edges: 0,
            fast_lookup: false,
        }
    }

    /// Sets an explicit representation.
    #[must_use]
    pub fn representation(mut self, representation: Representation) -> Self {
        self.representation = Some(representation);
        self
    }

    /// Replaces the hints.
    #[must_use]
    pub fn hints(mut self, hints: Hints) -> Self {
        self.hints = hints;
        self
    }

    /// Sets the expected element counts.
    #[must_use]
    pub fn expected(mut self, vertices: usize, edges: usize) -> Self {
        self.expected_vertices = vertices;
        self.expected_edges = edges;
        self
    }

    /// Requests binary-search lookup in CSR snapshots.
    #[must_use]
    pub fn fast_lookup(mut self, enabled: bool) -> Self {
        self.fast_lookup = enabled;
        self
    }

    /// Picks the layout for these options.
    ///
    /// # Errors
    /// Returns [`GraphError::UnsupportedCapability`] when an explicit layout
    /// cannot store parallel edges but the capabilities require them.
    pub fn resolve_representation(&self) -> Result<Representation> {
        let caps = self.capabilities;
        let chosen = match self.representation {
            Some(explicit) => explicit,
            None if caps.parallel_edges => {
                if self.hints.fast_edge_removal {
                    Representation::Linked
                } else {
                    Representation::Array
                }
            }
            None if self.hints.dense_graph => Representation::Matrix,
            None => Representation::Hashmap,
        };
        if caps.parallel_edges && !chosen.supports_parallel_edges() {
            return Err(GraphError::UnsupportedCapability {
                representation: chosen.name(),
                capability: "parallel edges",
            });
        }
        debug!(representation = %chosen, ?caps, "graph.representation.resolved");
        Ok(chosen)
    }
}
