//! Case description files.
//!
//! A case file names the solver case directory, the script that launches the
//! solver, extra environment variables, and the function objects configured
//! for the run. YAML is the default; files ending in `.json` are read as JSON.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cm_monitor::{FunctionObjectDef, FunctionObjectKind, MonitorConfig};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const DEFAULT_RUN_SCRIPT: &str = "./Allrun";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseConfig {
    pub name: String,
    /// Solver case directory, relative to the case file.
    #[serde(default = "default_case_dir")]
    pub case_dir: PathBuf,
    #[serde(default = "default_run_script")]
    pub run_script: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
    #[serde(default)]
    pub function_objects: Vec<FunctionObjectDef>,
}

fn default_case_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_run_script() -> String {
    DEFAULT_RUN_SCRIPT.to_string()
}

impl CaseConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            case_dir: default_case_dir(),
            run_script: default_run_script(),
            environment: BTreeMap::new(),
            function_objects: Vec::new(),
        }
    }

    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig::from_function_objects(&self.function_objects)
    }

    /// Function objects that do not enable any plot group.
    pub fn unplotted_function_objects(&self) -> impl Iterator<Item = &FunctionObjectDef> {
        self.function_objects
            .iter()
            .filter(|def| matches!(def.kind, FunctionObjectKind::Other(_)))
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("case name is empty".to_string()));
        }
        if self.run_script.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "case '{}' has an empty run_script",
                self.name
            )));
        }
        if let Some(key) = self.environment.keys().find(|k| k.is_empty() || k.contains('=')) {
            return Err(AppError::Validation(format!(
                "invalid environment variable name {key:?}"
            )));
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

pub fn load_case(path: &Path) -> AppResult<CaseConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::CaseFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let case: CaseConfig = if is_json(path) {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    case.validate()?;
    Ok(case)
}

pub fn save_case(path: &Path, case: &CaseConfig) -> AppResult<()> {
    case.validate()?;
    let content = if is_json(path) {
        serde_json::to_string_pretty(case)?
    } else {
        serde_yaml::to_string(case)?
    };
    std::fs::write(path, content).map_err(|source| AppError::CaseFileWrite {
        path: path.to_path_buf(),
        source,
    })
}
