//! cm-core: stable foundation for convmon.
//!
//! Contains:
//! - quantity (monitored physical quantities and their display groups)
//! - series (append-only value series and the per-run series set)
//! - error (shared error types)

pub mod error;
pub mod quantity;
pub mod series;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use quantity::{Quantity, SeriesGroup};
pub use series::{Series, SeriesSet};
