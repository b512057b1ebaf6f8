//! Run lifecycle around a [`ConvergenceParser`].

use std::collections::BTreeMap;
use std::path::Path;

use cm_monitor::{ConvergenceParser, FunctionObjectKind, MonitorConfig, SeriesSink};
use tracing::{debug, info};

use crate::error::AppResult;
use crate::host::{RunCommand, SolverHost};
use crate::query::{ConvergenceSummary, summarize};

/// Everything the host needs to start the solver for a prepared run.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    pub command: RunCommand,
    pub environment: BTreeMap<String, String>,
    pub config: MonitorConfig,
}

/// Owns the parser for one run at a time.
#[derive(Debug, Default)]
pub struct MonitorSession {
    parser: ConvergenceParser,
    runs_prepared: usize,
}

impl MonitorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a new run and fetch its launch command.
    ///
    /// Must be called before the solver starts, so no output of the new run
    /// can reach the previous run's series.
    pub fn prepare(&mut self, host: &dyn SolverHost, case_dir: &Path) -> AppResult<PreparedRun> {
        let function_objects = host.function_objects();
        for def in &function_objects {
            if let FunctionObjectKind::Other(kind) = &def.kind {
                debug!(name = %def.name, kind = %kind, "function object has no plot");
            }
        }
        let config = MonitorConfig::from_function_objects(&function_objects);
        self.parser.reset_for_new_run(config);
        self.runs_prepared += 1;

        let command = host.run_command(case_dir)?;
        info!(
            command = %command.display(),
            workdir = %command.workdir.display(),
            forces = config.forces_enabled,
            force_coefficients = config.force_coefficients_enabled,
            "solver run command"
        );

        Ok(PreparedRun {
            command,
            environment: host.run_environment(),
            config,
        })
    }

    /// Start a run without a host, e.g. when replaying a finished log.
    pub fn start(&mut self, config: MonitorConfig) {
        self.parser.reset_for_new_run(config);
        self.runs_prepared += 1;
    }

    pub fn feed<S>(&mut self, text: &str, sink: &mut S) -> AppResult<()>
    where
        S: SeriesSink + ?Sized,
    {
        self.parser.process_output(text, sink)?;
        Ok(())
    }

    pub fn parser(&self) -> &ConvergenceParser {
        &self.parser
    }

    pub fn runs_prepared(&self) -> usize {
        self.runs_prepared
    }

    pub fn summary(&self) -> ConvergenceSummary {
        summarize(&self.parser)
    }
}
