//! Shared application service layer for convmon.
//!
//! This crate connects the log parser to the outside world: case files that
//! describe how a solver is launched, the host interface that supplies the
//! run command and environment, stream reassembly for live output, and
//! summaries/exports of the collected series. The CLI is a thin shell over it.

pub mod case;
pub mod error;
pub mod host;
pub mod query;
pub mod session;
pub mod stream;

// Re-export key types for convenience
pub use case::{CaseConfig, load_case, save_case};
pub use error::{AppError, AppResult};
pub use host::{CaseHost, RunCommand, SolverHost};
pub use query::{ConvergenceSummary, QuantitySummary, group_csv, group_json, summarize};
pub use session::{MonitorSession, PreparedRun};
pub use stream::{LineAssembler, ReplayStats, replay_reader};
