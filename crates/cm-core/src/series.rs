//! Append-only value series and the per-run set of them.

use crate::quantity::{Quantity, SeriesGroup};

/// Ordered per-iteration values for one quantity.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Series(Vec<f64>);

impl Series {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, value: f64) {
        self.0.push(value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn last(&self) -> Option<f64> {
        self.0.last().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.clone()
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// One series per [`Quantity`], indexed by the quantity itself.
///
/// Every quantity always has a (possibly empty) series, so lookups never fail.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSet {
    series: [Series; Quantity::COUNT],
}

impl Default for SeriesSet {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesSet {
    pub fn new() -> Self {
        Self {
            series: core::array::from_fn(|_| Series::new()),
        }
    }

    pub fn get(&self, quantity: Quantity) -> &Series {
        &self.series[quantity.index()]
    }

    pub fn len(&self, quantity: Quantity) -> usize {
        self.get(quantity).len()
    }

    pub fn push(&mut self, quantity: Quantity, value: f64) {
        self.series[quantity.index()].push(value);
    }

    /// Drop all values, keeping one empty series per quantity.
    pub fn clear(&mut self) {
        for s in &mut self.series {
            *s = Series::new();
        }
    }

    /// Total number of stored values across all quantities.
    pub fn total_values(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Quantity, &Series)> {
        Quantity::all().iter().map(move |&q| (q, self.get(q)))
    }

    /// Series of one group in display order.
    pub fn group(&self, group: SeriesGroup) -> impl Iterator<Item = (Quantity, &Series)> {
        group.members().iter().map(move |&q| (q, self.get(q)))
    }
}
