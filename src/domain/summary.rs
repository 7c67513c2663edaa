// Summary aggregator - reduces evaluated records to per-parameter statistics
use super::evaluator::{AnomalyCause, EvaluatedRecord};
use super::telemetry::Parameter;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Overall health label derived from aggregate anomaly percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Nominal,
    Warning,
    Critical,
}

/// Percentage marks driving the health classification. These are
/// configuration constants, loaded alongside the rest of the service config.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HealthThresholds {
    pub warning_percent: f64,
    pub critical_percent: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            warning_percent: 5.0,
            critical_percent: 20.0,
        }
    }
}

/// Anomaly statistics for one parameter across a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterStats {
    pub parameter: Parameter,
    /// Records with a numeric value outside the bounds.
    pub out_of_range: usize,
    /// Records with no usable value, reported separately from out-of-range.
    pub missing: usize,
    /// Total flagged records for this parameter.
    pub anomalous: usize,
    /// `anomalous` as a percentage of all records, 0 for an empty dataset.
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Aggregate view of one dataset under one profile. Derived, recomputed on
/// demand; never cached across profile switches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub total_records: usize,
    pub time_range: Option<TimeRange>,
    pub parameters: Vec<ParameterStats>,
    pub health: HealthStatus,
}

impl AnalysisSummary {
    pub fn stats(&self, parameter: Parameter) -> &ParameterStats {
        self.parameters
            .iter()
            .find(|s| s.parameter == parameter)
            .expect("summary covers all parameters")
    }
}

/// Reduce evaluated records to per-parameter counts and an overall health
/// label. Critical if any parameter's anomaly percentage exceeds the critical
/// mark, warning if any exceeds the warning mark, else nominal ("exceeds" is
/// strict, so a percentage sitting exactly on a mark does not escalate).
pub fn summarize(
    evaluated: &[EvaluatedRecord],
    thresholds: HealthThresholds,
) -> AnalysisSummary {
    let total_records = evaluated.len();

    let parameters: Vec<ParameterStats> = Parameter::ALL
        .into_iter()
        .map(|parameter| {
            let mut out_of_range = 0;
            let mut missing = 0;
            for record in evaluated {
                match record.finding(parameter).map(|f| f.cause) {
                    Some(AnomalyCause::Missing) => missing += 1,
                    Some(_) => out_of_range += 1,
                    None => {}
                }
            }
            let anomalous = out_of_range + missing;
            let percentage = if total_records == 0 {
                0.0
            } else {
                anomalous as f64 / total_records as f64 * 100.0
            };
            ParameterStats {
                parameter,
                out_of_range,
                missing,
                anomalous,
                percentage,
            }
        })
        .collect();

    let worst = parameters
        .iter()
        .map(|s| s.percentage)
        .fold(0.0_f64, f64::max);
    let health = if worst > thresholds.critical_percent {
        HealthStatus::Critical
    } else if worst > thresholds.warning_percent {
        HealthStatus::Warning
    } else {
        HealthStatus::Nominal
    };

    let time_range = time_range(evaluated);

    AnalysisSummary {
        total_records,
        time_range,
        parameters,
        health,
    }
}

fn time_range(evaluated: &[EvaluatedRecord]) -> Option<TimeRange> {
    let timestamps = evaluated.iter().map(|e| e.record.timestamp);
    let start = timestamps.clone().min()?;
    let end = timestamps.max()?;
    Some(TimeRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evaluator::evaluate_all;
    use crate::domain::profile::builtin_profiles;
    use crate::domain::telemetry::TelemetryRecord;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 25)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn record(hour: u32, temperature: f64) -> TelemetryRecord {
        TelemetryRecord::new(
            at(hour),
            Some(temperature),
            Some(1.0),
            Some(1200.0),
            Some(80.0),
            Some(70.0),
        )
    }

    #[test]
    fn test_empty_dataset_yields_zero_percentages() {
        let summary = summarize(&[], HealthThresholds::default());
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.time_range, None);
        assert_eq!(summary.health, HealthStatus::Nominal);
        for stats in &summary.parameters {
            assert_eq!(stats.percentage, 0.0);
        }
    }

    #[test]
    fn test_counts_and_percentages() {
        let profile = builtin_profiles().remove(0);
        let records = vec![
            record(9, 20.0),
            record(10, 55.0), // above 40
            record(11, -5.0), // below 0
            record(12, 25.0),
        ];
        let summary = summarize(&evaluate_all(&records, &profile), HealthThresholds::default());

        let temperature = summary.stats(Parameter::Temperature);
        assert_eq!(temperature.out_of_range, 2);
        assert_eq!(temperature.missing, 0);
        assert_eq!(temperature.percentage, 50.0);
        assert_eq!(summary.total_records, 4);
        assert_eq!(
            summary.time_range,
            Some(TimeRange {
                start: at(9),
                end: at(12),
            })
        );
        for stats in &summary.parameters {
            assert!(stats.anomalous <= summary.total_records);
            assert!((0.0..=100.0).contains(&stats.percentage));
        }
    }

    #[test]
    fn test_missing_counted_separately_from_out_of_range() {
        let profile = builtin_profiles().remove(0);
        let mut bad = record(10, 20.0);
        bad.fuel = None;
        let mut low = record(11, 20.0);
        low.fuel = Some(5.0);
        let records = vec![record(9, 20.0), bad, low];

        let summary = summarize(&evaluate_all(&records, &profile), HealthThresholds::default());
        let fuel = summary.stats(Parameter::Fuel);
        assert_eq!(fuel.missing, 1);
        assert_eq!(fuel.out_of_range, 1);
        assert_eq!(fuel.anomalous, 2);
    }

    #[test]
    fn test_health_classification_marks_are_strict() {
        let thresholds = HealthThresholds::default();
        let profile = builtin_profiles().remove(0);

        // 1 anomaly in 20 records = exactly 5%: still nominal
        let mut records: Vec<TelemetryRecord> = (0..19).map(|i| record(i % 24, 20.0)).collect();
        records.push(record(20, 55.0));
        let summary = summarize(&evaluate_all(&records, &profile), thresholds);
        assert_eq!(summary.health, HealthStatus::Nominal);

        // 2 in 20 = 10%: warning
        records[0].temperature = Some(-10.0);
        let summary = summarize(&evaluate_all(&records, &profile), thresholds);
        assert_eq!(summary.health, HealthStatus::Warning);

        // 6 in 20 = 30%: critical
        for r in records.iter_mut().take(5) {
            r.temperature = Some(99.0);
        }
        let summary = summarize(&evaluate_all(&records, &profile), thresholds);
        assert_eq!(summary.health, HealthStatus::Critical);
    }

    #[test]
    fn test_profile_switch_changes_summary() {
        // Two records; switching from wide to narrow temperature bounds flags
        // the second and reports a 50% temperature anomaly rate.
        use crate::domain::profile::{MissionProfile, ParamRange};
        use std::collections::BTreeMap;

        let records = vec![
            TelemetryRecord::new(at(9), Some(24.0), Some(0.97), Some(7071.0), Some(60.0), Some(97.0)),
            TelemetryRecord::new(at(10), Some(-3.0), Some(0.67), Some(7172.0), Some(57.0), Some(96.0)),
        ];

        let temperature_only = |min: f64, max: f64| {
            let mut bounds: BTreeMap<_, _> = Parameter::ALL
                .into_iter()
                .map(|p| (p, ParamRange::UNBOUNDED))
                .collect();
            bounds.insert(Parameter::Temperature, ParamRange::bounded(min, max));
            MissionProfile::new("Scenario", bounds).unwrap()
        };

        let wide = summarize(
            &evaluate_all(&records, &temperature_only(-40.0, 50.0)),
            HealthThresholds::default(),
        );
        assert_eq!(wide.stats(Parameter::Temperature).anomalous, 0);

        let narrow = summarize(
            &evaluate_all(&records, &temperature_only(0.0, 50.0)),
            HealthThresholds::default(),
        );
        assert_eq!(narrow.stats(Parameter::Temperature).anomalous, 1);
        assert_eq!(narrow.stats(Parameter::Temperature).percentage, 50.0);
    }
}
