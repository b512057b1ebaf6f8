//! Which optional plot groups a run produces.

use serde::{Deserialize, Serialize};

/// Type of a solver-side post-processing function object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FunctionObjectKind {
    Force,
    ForceCoefficients,
    /// Any other function object; it does not enable a plot group.
    Other(String),
}

impl From<String> for FunctionObjectKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Force" => FunctionObjectKind::Force,
            "ForceCoefficients" => FunctionObjectKind::ForceCoefficients,
            _ => FunctionObjectKind::Other(value),
        }
    }
}

impl From<FunctionObjectKind> for String {
    fn from(kind: FunctionObjectKind) -> Self {
        match kind {
            FunctionObjectKind::Force => "Force".to_string(),
            FunctionObjectKind::ForceCoefficients => "ForceCoefficients".to_string(),
            FunctionObjectKind::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionObjectDef {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FunctionObjectKind,
}

impl FunctionObjectDef {
    pub fn new(name: impl Into<String>, kind: FunctionObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Plot gating for one run. Fixed once the run starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub forces_enabled: bool,
    #[serde(default)]
    pub force_coefficients_enabled: bool,
}

impl MonitorConfig {
    pub fn new(forces_enabled: bool, force_coefficients_enabled: bool) -> Self {
        Self {
            forces_enabled,
            force_coefficients_enabled,
        }
    }

    pub fn from_function_objects<'a, I>(defs: I) -> Self
    where
        I: IntoIterator<Item = &'a FunctionObjectDef>,
    {
        let mut config = Self::default();
        for def in defs {
            match def.kind {
                FunctionObjectKind::Force => config.forces_enabled = true,
                FunctionObjectKind::ForceCoefficients => config.force_coefficients_enabled = true,
                FunctionObjectKind::Other(_) => {}
            }
        }
        config
    }
}
