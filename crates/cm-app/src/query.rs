//! Summaries and exports of collected series.

use cm_core::{Quantity, SeriesGroup};
use cm_monitor::{ConvergenceParser, MonitorConfig, SeriesUpdate};
use serde::Serialize;

use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantitySummary {
    pub quantity: Quantity,
    pub label: &'static str,
    pub group: SeriesGroup,
    pub points: usize,
    pub last: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceSummary {
    pub iteration: usize,
    pub config: MonitorConfig,
    pub quantities: Vec<QuantitySummary>,
}

impl ConvergenceSummary {
    /// Quantities that received at least one value.
    pub fn populated(&self) -> impl Iterator<Item = &QuantitySummary> {
        self.quantities.iter().filter(|q| q.points > 0)
    }

    pub fn get(&self, quantity: Quantity) -> Option<&QuantitySummary> {
        self.quantities.iter().find(|q| q.quantity == quantity)
    }
}

pub fn summarize(parser: &ConvergenceParser) -> ConvergenceSummary {
    let quantities = parser
        .series()
        .iter()
        .map(|(quantity, series)| QuantitySummary {
            quantity,
            label: quantity.label(),
            group: quantity.group(),
            points: series.len(),
            last: series.last(),
        })
        .collect();

    ConvergenceSummary {
        iteration: parser.iteration(),
        config: parser.config(),
        quantities,
    }
}

/// CSV with an `index` column and one column per series of the group.
///
/// Series shorter than the longest one leave their trailing cells empty.
pub fn group_csv(update: &SeriesUpdate) -> String {
    let mut out = String::from("index");
    for label in update.labels() {
        out.push(',');
        out.push_str(label);
    }
    out.push('\n');

    for row in 0..update.max_len() {
        out.push_str(&row.to_string());
        for series in &update.series {
            out.push(',');
            if let Some(value) = series.values.get(row) {
                out.push_str(&value.to_string());
            }
        }
        out.push('\n');
    }
    out
}

pub fn group_json(update: &SeriesUpdate) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(update)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_monitor::UpdateLog;

    fn parsed() -> ConvergenceParser {
        let mut parser = ConvergenceParser::new(MonitorConfig::new(false, true));
        let text = "Time = 1\nTime = 2\n    Cd       : 0.5\n    Cl       : 0.1\nTime = 3\n    Cd       : 0.25\n";
        parser.process_output(text, &mut UpdateLog::new()).unwrap();
        parser
    }

    #[test]
    fn summary_reports_counts_and_last_values() {
        let summary = summarize(&parsed());
        assert_eq!(summary.iteration, 3);
        let cd = summary.get(Quantity::DragCoefficient).unwrap();
        assert_eq!(cd.points, 2);
        assert_eq!(cd.last, Some(0.25));
        assert_eq!(cd.group, SeriesGroup::ForceCoefficients);
        assert_eq!(summary.populated().count(), 2);
    }

    #[test]
    fn csv_pads_short_series() {
        let update = parsed().snapshot(SeriesGroup::ForceCoefficients);
        assert_eq!(group_csv(&update), "index,Cd,Cl\n0,0.5,0.1\n1,0.25,\n");
    }

    #[test]
    fn csv_of_empty_group_is_header_only() {
        let update = ConvergenceParser::default().snapshot(SeriesGroup::Forces);
        assert_eq!(
            group_csv(&update),
            "index,Pressure_x,Pressure_y,Pressure_z,Viscous_x,Viscous_y,Viscous_z\n"
        );
    }

    #[test]
    fn json_carries_labels_and_group() {
        let update = parsed().snapshot(SeriesGroup::ForceCoefficients);
        let value: serde_json::Value = serde_json::from_str(&group_json(&update).unwrap()).unwrap();
        assert_eq!(value["group"], "force_coefficients");
        assert_eq!(value["series"][0]["label"], "Cd");
        assert_eq!(value["series"][0]["values"][1], 0.25);
    }
}
