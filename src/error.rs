//! Error type shared by every storage component.

use core::fmt;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, GraphError>;

/// Which kind of element an index or identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ElementKind {
    /// Vertex index space.
    Vertex,
    /// Edge index space.
    Edge,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Vertex => f.write_str("vertex"),
            ElementKind::Edge => f.write_str("edge"),
        }
    }
}

/// Errors reported by graph storage operations.
///
/// Every mutation that returns an error leaves the structure exactly as it was
/// before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex index outside `[0, n)`.
    #[error("no such vertex: {0}")]
    NoSuchVertex(usize),
    /// An edge index outside `[0, m)`.
    #[error("no such edge: {0}")]
    NoSuchEdge(usize),
    /// An external identifier that is not mapped to any index.
    #[error("no such {kind} id: {id}")]
    NoSuchId {
        /// Element kind of the identifier.
        kind: ElementKind,
        /// Rendered identifier.
        id: String,
    },
    /// `add_edge(v, v)` on a graph without self edges.
    #[error("self edges are not allowed (vertex {vertex})")]
    SelfEdgesNotAllowed {
        /// The vertex of the rejected loop.
        vertex: usize,
    },
    /// A second edge between the same pair on a graph without parallel edges.
    #[error("edge ({source_vertex}, {target_vertex}) already exists")]
    EdgeAlreadyExists {
        /// Source endpoint.
        source_vertex: usize,
        /// Target endpoint.
        target_vertex: usize,
    },
    /// An identifier that is already in use.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId {
        /// Element kind of the identifier.
        kind: ElementKind,
        /// Rendered identifier.
        id: String,
    },
    /// Identifiers must be non-negative.
    #[error("negative {kind} id: {id}")]
    NegativeId {
        /// Element kind of the identifier.
        kind: ElementKind,
        /// Rendered identifier.
        id: String,
    },
    /// A mutating operation on an immutable (CSR) graph or frozen id map.
    #[error("graph is immutable, can't {0}")]
    Immutable(&'static str),
    /// A representation that cannot honour the requested capability.
    #[error("{representation} representation does not support {capability}")]
    UnsupportedCapability {
        /// Representation name.
        representation: &'static str,
        /// Offending capability.
        capability: &'static str,
    },
    /// Copying between a directed and an undirected graph.
    #[error("directedness mismatch: expected {}, found {}", direction(.expected), direction(.found))]
    DirectednessMismatch {
        /// Directedness of the receiving graph.
        expected: bool,
        /// Directedness of the source graph.
        found: bool,
    },
    /// The index space is limited to `u32::MAX` elements.
    #[error("{kind} index space exhausted")]
    CapacityExceeded {
        /// The exhausted index space.
        kind: ElementKind,
    },
    /// No weights container registered under the key.
    #[error("no weights registered under key {0:?}")]
    NoSuchWeights(String),
    /// A weights container is already registered under the key.
    #[error("weights already registered under key {0:?}")]
    DuplicateWeights(String),
    /// The container under the key holds a different value type.
    #[error("weights {key:?} do not hold values of type {expected}")]
    WeightTypeMismatch {
        /// Weights key.
        key: String,
        /// Requested value type.
        expected: &'static str,
    },
    /// Inconsistent graph options.
    #[error("invalid graph options: {0}")]
    InvalidOptions(String),
}

fn direction(directed: &bool) -> &'static str {
    if *directed {
        "directed"
    } else {
        "undirected"
    }
}

impl GraphError {
    pub(crate) fn no_such_element(kind: ElementKind, index: usize) -> Self {
        match kind {
            ElementKind::Vertex => GraphError::NoSuchVertex(index),
            ElementKind::Edge => GraphError::NoSuchEdge(index),
        }
    }
}
