//! Incremental solver-log parser.

use cm_core::{SeriesGroup, SeriesSet};
use tracing::{debug, trace};

use crate::config::MonitorConfig;
use crate::error::ParseResult;
use crate::rules::{RULES, TriggerRule};
use crate::sink::{NamedSeries, SeriesSink, SeriesUpdate};

/// Prefix of the line the solver prints when a new timestep begins.
pub const TIMESTEP_MARKER: &str = "Time = ";

/// Stateful consumer of solver output for a single run.
///
/// Chunks are assumed to be line aligned: a trailing partial line is parsed
/// as if it were complete. Stream readers that cannot guarantee this should
/// reassemble lines before calling [`ConvergenceParser::process_output`].
///
/// # Lag guard
///
/// A rule appends only while its guard series is at least two entries behind
/// the timestep counter (`iteration - 1 > len`). In practice this keeps the
/// first value printed after each marker and drops the rest. Values printed
/// before the second marker are never stored, and a quantity that misses a
/// timestep does not catch up later.
#[derive(Debug, Clone, Default)]
pub struct ConvergenceParser {
    series: SeriesSet,
    iteration: usize,
    config: MonitorConfig,
}

impl ConvergenceParser {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            series: SeriesSet::new(),
            iteration: 0,
            config,
        }
    }

    /// Clear all series and the counter, and adopt the configuration of the next run.
    pub fn reset_for_new_run(&mut self, config: MonitorConfig) {
        self.series.clear();
        self.iteration = 0;
        self.config = config;
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn series(&self) -> &SeriesSet {
        &self.series
    }

    pub fn config(&self) -> MonitorConfig {
        self.config
    }

    /// Groups delivered to sinks for this run, in emission order.
    pub fn enabled_groups(&self) -> Vec<SeriesGroup> {
        let mut groups = vec![SeriesGroup::Residuals];
        if self.config.forces_enabled {
            groups.push(SeriesGroup::Forces);
        }
        if self.config.force_coefficients_enabled {
            groups.push(SeriesGroup::ForceCoefficients);
        }
        groups
    }

    /// Parse a chunk of solver output and notify `sink` with fresh snapshots.
    ///
    /// On a decode error, lines before the failing one stay applied and no
    /// snapshot is emitted for the chunk.
    pub fn process_output<S>(&mut self, text: &str, sink: &mut S) -> ParseResult<()>
    where
        S: SeriesSink + ?Sized,
    {
        for line in text.split('\n') {
            self.process_line(line)?;
        }

        if self.iteration > 1 {
            for group in self.enabled_groups() {
                let update = self.snapshot(group);
                debug!(
                    group = %group,
                    iteration = self.iteration,
                    points = update.max_len(),
                    "series update"
                );
                sink.update(update);
            }
        }
        Ok(())
    }

    /// Apply a single log line without notifying sinks.
    pub fn process_line(&mut self, line: &str) -> ParseResult<()> {
        if line.starts_with(TIMESTEP_MARKER) {
            self.iteration += 1;
            trace!(iteration = self.iteration, "timestep");
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        for rule in RULES {
            if rule.matches(&tokens) && self.lag_allows(rule) {
                for (quantity, value) in rule.decode(&tokens, line)? {
                    self.series.push(quantity, value);
                }
            }
        }
        Ok(())
    }

    fn lag_allows(&self, rule: &TriggerRule) -> bool {
        self.iteration > self.series.len(rule.guard) + 1
    }

    /// Current values of one group, labelled and in display order.
    pub fn snapshot(&self, group: SeriesGroup) -> SeriesUpdate {
        SeriesUpdate {
            group,
            iteration: self.iteration,
            series: self
                .series
                .group(group)
                .map(|(quantity, series)| NamedSeries {
                    label: quantity.label(),
                    quantity,
                    values: series.to_vec(),
                })
                .collect(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::sink::UpdateLog;
    use proptest::prelude::*;

    fn log_line() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Time = 1".to_string()),
            (0.0_f64..1.0).prop_map(|v| format!(
                "smoothSolver:  Solving for Ux, Initial residual = {v}, Final residual = 0, No Iterations 1"
            )),
            (0.0_f64..1.0).prop_map(|v| format!(
                "GAMG:  Solving for p, Initial residual = {v}, Final residual = 0, No Iterations 1"
            )),
            (0.0_f64..1.0).prop_map(|v| format!("    Cd       : {v}")),
            Just("ExecutionTime = 0.1 s  ClockTime = 0 s".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn replay_is_idempotent(lines in prop::collection::vec(log_line(), 0..40)) {
            let text = lines.join("\n");
            let mut parser = ConvergenceParser::new(MonitorConfig::new(true, true));
            parser.process_output(&text, &mut UpdateLog::new()).unwrap();
            let first = parser.series().clone();
            let first_iteration = parser.iteration();

            parser.reset_for_new_run(MonitorConfig::new(true, true));
            parser.process_output(&text, &mut UpdateLog::new()).unwrap();
            prop_assert_eq!(parser.series(), &first);
            prop_assert_eq!(parser.iteration(), first_iteration);
        }

        #[test]
        fn series_never_outgrow_counter(lines in prop::collection::vec(log_line(), 0..40)) {
            let mut parser = ConvergenceParser::default();
            for line in &lines {
                parser.process_output(line, &mut UpdateLog::new()).unwrap();
                for (_, series) in parser.series().iter() {
                    prop_assert!(series.len() < parser.iteration().max(1));
                }
            }
        }

        #[test]
        fn text_without_marker_is_inert(lines in prop::collection::vec(log_line(), 0..40)) {
            let text = lines
                .into_iter()
                .filter(|l| !l.starts_with(TIMESTEP_MARKER))
                .collect::<Vec<_>>()
                .join("\n");
            let mut parser = ConvergenceParser::default();
            let mut log = UpdateLog::new();
            parser.process_output(&text, &mut log).unwrap();
            prop_assert_eq!(parser.iteration(), 0);
            prop_assert_eq!(parser.series().total_values(), 0);
            prop_assert!(log.is_empty());
        }
    }
}
