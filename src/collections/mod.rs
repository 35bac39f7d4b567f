//! Storage primitives shared by every graph layout.
//!
//! - `element_set`: the dense index space and its removal listeners
//! - `weights`: per-element attribute columns and their manager
//! - `endpoints`: packed edge endpoint records
//! - `id_map`: identifier/index bijection kept current by removal events

pub mod element_set;
pub mod endpoints;
pub mod id_map;
pub mod weights;

pub use element_set::{
    ElementSet, IndexRemoval, IndexRemoveListener, ListenerKey, Listeners, MAX_ELEMENTS,
};
pub use endpoints::{EdgeEndpoints, EndpointStore};
pub use id_map::{GraphId, IdMap};
pub use weights::{WeightKind, Weights, WeightsManager};
