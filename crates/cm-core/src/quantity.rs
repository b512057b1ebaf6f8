//! Monitored quantities and the display groups they belong to.
//!
//! Declaration order is display order: the residual group is emitted as
//! density, Ux, Uy, Uz, p, E, k, epsilon, nuTilda, omega, gammaInt, ReTheta.

use core::fmt;
use core::str::FromStr;

use crate::error::CoreError;

/// A single physical quantity whose per-iteration value is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quantity {
    Density,
    Ux,
    Uy,
    Uz,
    Pressure,
    Energy,
    TurbulentKineticEnergy,
    Epsilon,
    NuTilda,
    Omega,
    GammaInt,
    ReThetat,
    PressureForceX,
    PressureForceY,
    PressureForceZ,
    ViscousForceX,
    ViscousForceY,
    ViscousForceZ,
    DragCoefficient,
    LiftCoefficient,
}

impl Quantity {
    pub const COUNT: usize = 20;

    pub const ALL: [Quantity; Self::COUNT] = [
        Quantity::Density,
        Quantity::Ux,
        Quantity::Uy,
        Quantity::Uz,
        Quantity::Pressure,
        Quantity::Energy,
        Quantity::TurbulentKineticEnergy,
        Quantity::Epsilon,
        Quantity::NuTilda,
        Quantity::Omega,
        Quantity::GammaInt,
        Quantity::ReThetat,
        Quantity::PressureForceX,
        Quantity::PressureForceY,
        Quantity::PressureForceZ,
        Quantity::ViscousForceX,
        Quantity::ViscousForceY,
        Quantity::ViscousForceZ,
        Quantity::DragCoefficient,
        Quantity::LiftCoefficient,
    ];

    /// All quantities in display order.
    pub fn all() -> &'static [Quantity] {
        &Self::ALL
    }

    /// Dense 0-based index, stable for the lifetime of the crate.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short label used as the key in sink updates and exports.
    pub fn label(self) -> &'static str {
        match self {
            Quantity::Density => "density",
            Quantity::Ux => "Ux",
            Quantity::Uy => "Uy",
            Quantity::Uz => "Uz",
            Quantity::Pressure => "p",
            Quantity::Energy => "E",
            Quantity::TurbulentKineticEnergy => "k",
            Quantity::Epsilon => "epsilon",
            Quantity::NuTilda => "nuTilda",
            Quantity::Omega => "omega",
            Quantity::GammaInt => "gammaInt",
            Quantity::ReThetat => "ReTheta",
            Quantity::PressureForceX => "Pressure_x",
            Quantity::PressureForceY => "Pressure_y",
            Quantity::PressureForceZ => "Pressure_z",
            Quantity::ViscousForceX => "Viscous_x",
            Quantity::ViscousForceY => "Viscous_y",
            Quantity::ViscousForceZ => "Viscous_z",
            Quantity::DragCoefficient => "Cd",
            Quantity::LiftCoefficient => "Cl",
        }
    }

    /// TeX label for plot legends.
    pub fn tex_label(self) -> &'static str {
        match self {
            Quantity::Density => "$\\rho$",
            Quantity::Ux => "$U_x$",
            Quantity::Uy => "$U_y$",
            Quantity::Uz => "$U_z$",
            Quantity::Pressure => "$p$",
            Quantity::Energy => "$E$",
            Quantity::TurbulentKineticEnergy => "$k$",
            Quantity::Epsilon => "$\\epsilon$",
            Quantity::NuTilda => "$\\tilde{\\nu}$",
            Quantity::Omega => "$\\omega$",
            Quantity::GammaInt => "$\\gamma$",
            Quantity::ReThetat => "$Re_{\\theta}$",
            Quantity::PressureForceX => "$Pressure_x$",
            Quantity::PressureForceY => "$Pressure_y$",
            Quantity::PressureForceZ => "$Pressure_z$",
            Quantity::ViscousForceX => "$Viscous_x$",
            Quantity::ViscousForceY => "$Viscous_y$",
            Quantity::ViscousForceZ => "$Viscous_z$",
            Quantity::DragCoefficient => "$C_D$",
            Quantity::LiftCoefficient => "$C_L$",
        }
    }

    pub fn group(self) -> SeriesGroup {
        match self {
            Quantity::PressureForceX
            | Quantity::PressureForceY
            | Quantity::PressureForceZ
            | Quantity::ViscousForceX
            | Quantity::ViscousForceY
            | Quantity::ViscousForceZ => SeriesGroup::Forces,
            Quantity::DragCoefficient | Quantity::LiftCoefficient => {
                SeriesGroup::ForceCoefficients
            }
            _ => SeriesGroup::Residuals,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Quantity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quantity::all()
            .iter()
            .copied()
            .find(|q| q.label() == s)
            .ok_or_else(|| CoreError::UnknownQuantity {
                label: s.to_string(),
            })
    }
}

/// Logical display group; each group is delivered to sinks as one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SeriesGroup {
    Residuals,
    Forces,
    ForceCoefficients,
}

impl SeriesGroup {
    pub const ALL: [SeriesGroup; 3] = [
        SeriesGroup::Residuals,
        SeriesGroup::Forces,
        SeriesGroup::ForceCoefficients,
    ];

    /// Members of the group in display order.
    pub fn members(self) -> &'static [Quantity] {
        match self {
            SeriesGroup::Residuals => &Quantity::all()[..12],
            SeriesGroup::Forces => &Quantity::all()[12..18],
            SeriesGroup::ForceCoefficients => &Quantity::all()[18..],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SeriesGroup::Residuals => "residuals",
            SeriesGroup::Forces => "forces",
            SeriesGroup::ForceCoefficients => "coefficients",
        }
    }
}

impl fmt::Display for SeriesGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for SeriesGroup {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "residuals" => Ok(SeriesGroup::Residuals),
            "forces" => Ok(SeriesGroup::Forces),
            "coefficients" | "force_coefficients" => Ok(SeriesGroup::ForceCoefficients),
            other => Err(CoreError::UnknownGroup {
                name: other.to_string(),
            }),
        }
    }
}
