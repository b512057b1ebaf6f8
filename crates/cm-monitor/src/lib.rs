//! Convergence monitoring for iterative CFD solver logs.
//!
//! This crate turns the standard output of an OpenFOAM-style solver into
//! per-iteration series of residuals, force components and force
//! coefficients, and hands complete snapshots of those series to sinks.
//!
//! # Architecture
//!
//! - [`rules`] is a static table mapping trigger tokens to target series and
//!   token positions
//! - [`ConvergenceParser`] owns the per-run [`cm_core::SeriesSet`] and the
//!   timestep counter, and applies the table line by line
//! - [`SeriesSink`] is the synchronous display callback; closures qualify
//! - [`MonitorConfig`] gates the force and coefficient groups based on the
//!   function objects configured for the run

pub mod config;
pub mod error;
pub mod parser;
pub mod rules;
pub mod sink;

pub use config::{FunctionObjectDef, FunctionObjectKind, MonitorConfig};
pub use error::{ParseError, ParseResult};
pub use parser::ConvergenceParser;
pub use rules::{Field, RULES, Strip, TriggerRule};
pub use sink::{GroupRouter, NamedSeries, SeriesSink, SeriesUpdate, UpdateLog};
