//! # Catador
//!
//! Wine quality inference server: a pre-trained gradient-boosted regression
//! model and its fitted feature scaler are loaded read-only at startup and
//! served over a small REST API.
//!
//! Catador (Spanish: "wine taster") does one thing: accept 11 named
//! physicochemical measurements of a wine sample, validate them against the
//! fixed feature schema, run the scale-then-predict pipeline, and return a
//! quality score rounded to two decimals alongside an echo of the input.
//!
//! ## Example
//!
//! ```rust
//! use catador::schema::{validate_payload, FEATURE_NAMES};
//! use serde_json::{json, Map};
//!
//! let mut payload = Map::new();
//! for name in FEATURE_NAMES {
//!     payload.insert(name.to_string(), json!(1.0));
//! }
//!
//! let values = validate_payload(&payload).unwrap();
//! assert_eq!(values.len(), 11);
//! ```
//!
//! ## Architecture
//!
//! A single linear request path with no internal queueing:
//! validation -> scaling -> inference -> rounding -> response. Artifacts
//! are loaded exactly once, before the listener binds, and shared
//! read-only by every in-flight request; the failure mode for a missing
//! artifact is fail-soft so diagnostics endpoints stay reachable.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
// Clippy allows (MUST come after deny/warn to override them)
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::float_cmp)] // Exact comparisons against handcrafted artifacts in tests
#![allow(clippy::uninlined_format_args)] // Prefer explicit format args

pub mod api;
/// Artifact loading with the fail-soft startup policy
pub mod artifact;
pub mod error;
/// Request metrics and Prometheus exposition
pub mod metrics;
pub mod model;
/// Scale-then-predict pipeline and the rounding policy
pub mod pipeline;
pub mod scaler;
/// The fixed 11-feature schema and pure payload validation
pub mod schema;

// Re-exports for convenience
pub use error::{CatadorError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
