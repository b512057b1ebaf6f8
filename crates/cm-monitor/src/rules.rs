//! Trigger table: which token selects which series, and where its value sits.
//!
//! Rules are evaluated in table order for every line. A rule fires when its
//! trigger is one of the line's whitespace-separated tokens and its guard
//! series still lags the timestep counter (see [`crate::ConvergenceParser`]).

use cm_core::Quantity;

use crate::error::{ParseError, ParseResult};

/// Text removed from a token before it is parsed as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strip {
    /// Keep the token as is.
    Nothing,
    /// Keep only the text before the first comma (`1.2e-05,` -> `1.2e-05`).
    BeforeComma,
    /// Drop leading `(`.
    LeadingParen,
    /// Drop trailing `)`.
    TrailingParen,
}

impl Strip {
    pub fn apply(self, token: &str) -> &str {
        match self {
            Strip::Nothing => token,
            Strip::BeforeComma => token.split(',').next().unwrap_or(token),
            Strip::LeadingParen => token.trim_start_matches('('),
            Strip::TrailingParen => token.trim_end_matches(')'),
        }
    }
}

/// One value taken from a fixed token position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub position: usize,
    pub target: Quantity,
    pub strip: Strip,
}

impl Field {
    /// Decode this field from a tokenized line.
    pub fn decode(&self, tokens: &[&str], line: &str) -> ParseResult<f64> {
        let raw = tokens
            .get(self.position)
            .ok_or_else(|| ParseError::MissingToken {
                quantity: self.target,
                position: self.position,
                line: line.to_string(),
            })?;
        self.strip
            .apply(raw)
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidNumber {
                quantity: self.target,
                position: self.position,
                token: raw.to_string(),
                line: line.to_string(),
            })
    }
}

/// A trigger token and the fields it appends when it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerRule {
    pub trigger: &'static str,
    /// Series whose length decides whether the rule may append.
    pub guard: Quantity,
    pub fields: &'static [Field],
}

impl TriggerRule {
    pub fn matches(&self, tokens: &[&str]) -> bool {
        tokens.contains(&self.trigger)
    }

    /// Decode every field, or none.
    pub fn decode(&self, tokens: &[&str], line: &str) -> ParseResult<Vec<(Quantity, f64)>> {
        self.fields
            .iter()
            .map(|field| Ok((field.target, field.decode(tokens, line)?)))
            .collect()
    }
}

const fn trigger(trigger: &'static str, fields: &'static [Field]) -> TriggerRule {
    TriggerRule {
        trigger,
        guard: fields[0].target,
        fields,
    }
}

// Struct literal, so the field arrays below are promoted to 'static.
macro_rules! field {
    ($position:expr, $target:expr, $strip:expr) => {
        Field {
            position: $position,
            target: $target,
            strip: $strip,
        }
    };
}

// Segregated solver summary: "<solver>:  Solving for Ux, Initial residual = 0.1, ..."
// The initial residual is token 7.
const RESIDUAL_POS: usize = 7;

use Quantity::*;
use Strip::*;

pub static RULES: &[TriggerRule] = &[
    trigger("Ux,", &[field!(RESIDUAL_POS, Ux, BeforeComma)]),
    trigger("Uy,", &[field!(RESIDUAL_POS, Uy, BeforeComma)]),
    trigger("Uz,", &[field!(RESIDUAL_POS, Uz, BeforeComma)]),
    trigger("p,", &[field!(RESIDUAL_POS, Pressure, BeforeComma)]),
    trigger("p_rgh,", &[field!(RESIDUAL_POS, Pressure, BeforeComma)]),
    trigger("h,", &[field!(RESIDUAL_POS, Energy, BeforeComma)]),
    // Coupled (HiSA) summary: "... Residual: <rho> (<Ux> <Uy> <Uz>) <E>"
    trigger(
        "Residual:",
        &[
            field!(4, Density, Nothing),
            field!(5, Ux, LeadingParen),
            field!(6, Uy, Nothing),
            field!(7, Uz, TrailingParen),
            field!(8, Energy, Nothing),
        ],
    ),
    trigger("k,", &[field!(RESIDUAL_POS, TurbulentKineticEnergy, BeforeComma)]),
    trigger("epsilon,", &[field!(RESIDUAL_POS, Epsilon, BeforeComma)]),
    trigger("omega,", &[field!(RESIDUAL_POS, Omega, BeforeComma)]),
    trigger("nuTilda,", &[field!(RESIDUAL_POS, NuTilda, BeforeComma)]),
    trigger("gammaInt,", &[field!(RESIDUAL_POS, GammaInt, BeforeComma)]),
    trigger("ReThetat,", &[field!(RESIDUAL_POS, ReThetat, BeforeComma)]),
    // Force function object: "Pressure : (<x> <y> <z>)"
    trigger(
        "Pressure",
        &[
            field!(2, PressureForceX, LeadingParen),
            field!(3, PressureForceY, Nothing),
            field!(4, PressureForceZ, TrailingParen),
        ],
    ),
    trigger(
        "Viscous",
        &[
            field!(2, ViscousForceX, LeadingParen),
            field!(3, ViscousForceY, Nothing),
            field!(4, ViscousForceZ, TrailingParen),
        ],
    ),
    // Force coefficient function object: "Cd    : <value>"
    trigger("Cd", &[field!(2, DragCoefficient, Nothing)]),
    trigger("Cl", &[field!(2, LiftCoefficient, Nothing)]),
];
