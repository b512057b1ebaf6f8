//! The host side of a run: how the solver is launched and what it monitors.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cm_monitor::FunctionObjectDef;
use serde::Serialize;

use crate::case::{CaseConfig, load_case};
use crate::error::AppResult;

/// Command line and working directory for a solver launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunCommand {
    pub argv: Vec<String>,
    pub workdir: PathBuf,
}

impl RunCommand {
    pub fn display(&self) -> String {
        self.argv.join(" ")
    }
}

/// Collaborator that knows how to launch the solver for a case.
///
/// Launching and supervising the process is the host's business; the monitor
/// only asks for these three things when a run is prepared.
pub trait SolverHost {
    fn run_command(&self, case_dir: &Path) -> AppResult<RunCommand>;

    fn run_environment(&self) -> BTreeMap<String, String>;

    fn function_objects(&self) -> Vec<FunctionObjectDef>;
}

/// [`SolverHost`] backed by a case file.
#[derive(Debug, Clone)]
pub struct CaseHost {
    case: CaseConfig,
    base_dir: PathBuf,
}

impl CaseHost {
    pub fn new(case: CaseConfig, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            case,
            base_dir: base_dir.into(),
        }
    }

    /// Load a case file; relative paths inside it resolve against its directory.
    pub fn load(path: &Path) -> AppResult<Self> {
        let case = load_case(path)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self::new(case, base_dir))
    }

    pub fn case(&self) -> &CaseConfig {
        &self.case
    }

    pub fn case_dir(&self) -> PathBuf {
        if self.case.case_dir.is_absolute() {
            self.case.case_dir.clone()
        } else {
            self.base_dir.join(&self.case.case_dir)
        }
    }
}

impl SolverHost for CaseHost {
    fn run_command(&self, case_dir: &Path) -> AppResult<RunCommand> {
        // The run script sources the solver environment itself.
        Ok(RunCommand {
            argv: vec![self.case.run_script.clone()],
            workdir: case_dir.to_path_buf(),
        })
    }

    fn run_environment(&self) -> BTreeMap<String, String> {
        // Entries that are not valid Unicode cannot be represented; skip them.
        let mut env: BTreeMap<String, String> = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        env.extend(
            self.case
                .environment
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        env
    }

    fn function_objects(&self) -> Vec<FunctionObjectDef> {
        self.case.function_objects.clone()
    }
}
