//! rl-core: stable foundation for radline.
//!
//! Contains:
//! - units (uom SI types + constructors + radiation constants)
//! - numeric (Real + tolerances + float helpers)
//! - ids (positional slot ids for the participant line)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{RlError, RlResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
