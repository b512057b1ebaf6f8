//! Display sinks and the snapshot payload they receive.

use cm_core::{Quantity, SeriesGroup};
use serde::Serialize;

/// One labelled series inside an update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedSeries {
    pub label: &'static str,
    pub quantity: Quantity,
    pub values: Vec<f64>,
}

/// Full snapshot of one display group, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesUpdate {
    pub group: SeriesGroup,
    /// Timestep counter at the time of the snapshot.
    pub iteration: usize,
    pub series: Vec<NamedSeries>,
}

impl SeriesUpdate {
    pub fn get(&self, label: &str) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.values.as_slice())
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.series.iter().map(|s| s.label)
    }

    /// Length of the longest series in the snapshot.
    pub fn max_len(&self) -> usize {
        self.series.iter().map(|s| s.values.len()).max().unwrap_or(0)
    }
}

/// Receiver of series snapshots. Called synchronously from the parser.
pub trait SeriesSink {
    fn update(&mut self, update: SeriesUpdate);
}

impl<F> SeriesSink for F
where
    F: FnMut(SeriesUpdate),
{
    fn update(&mut self, update: SeriesUpdate) {
        self(update)
    }
}

/// Routes each group to its own sink; groups without a sink are dropped.
#[derive(Default)]
pub struct GroupRouter<'a> {
    residuals: Option<Box<dyn SeriesSink + 'a>>,
    forces: Option<Box<dyn SeriesSink + 'a>>,
    force_coefficients: Option<Box<dyn SeriesSink + 'a>>,
}

impl<'a> GroupRouter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, group: SeriesGroup, sink: impl SeriesSink + 'a) -> Self {
        let slot = match group {
            SeriesGroup::Residuals => &mut self.residuals,
            SeriesGroup::Forces => &mut self.forces,
            SeriesGroup::ForceCoefficients => &mut self.force_coefficients,
        };
        *slot = Some(Box::new(sink));
        self
    }

    pub fn has(&self, group: SeriesGroup) -> bool {
        match group {
            SeriesGroup::Residuals => self.residuals.is_some(),
            SeriesGroup::Forces => self.forces.is_some(),
            SeriesGroup::ForceCoefficients => self.force_coefficients.is_some(),
        }
    }
}

impl SeriesSink for GroupRouter<'_> {
    fn update(&mut self, update: SeriesUpdate) {
        let slot = match update.group {
            SeriesGroup::Residuals => &mut self.residuals,
            SeriesGroup::Forces => &mut self.forces,
            SeriesGroup::ForceCoefficients => &mut self.force_coefficients,
        };
        if let Some(sink) = slot {
            sink.update(update);
        }
    }
}

/// Sink that records every update it receives.
#[derive(Debug, Clone, Default)]
pub struct UpdateLog {
    updates: Vec<SeriesUpdate>,
}

impl UpdateLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> &[SeriesUpdate] {
        &self.updates
    }

    pub fn count(&self, group: SeriesGroup) -> usize {
        self.updates.iter().filter(|u| u.group == group).count()
    }

    /// Most recent snapshot of a group.
    pub fn latest(&self, group: SeriesGroup) -> Option<&SeriesUpdate> {
        self.updates.iter().rev().find(|u| u.group == group)
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

impl SeriesSink for UpdateLog {
    fn update(&mut self, update: SeriesUpdate) {
        self.updates.push(update);
    }
}
