// Anomaly evaluator - pure threshold checks over records and profiles
use super::profile::MissionProfile;
use super::telemetry::{Parameter, TelemetryRecord};
use serde::Serialize;

/// Why a parameter was flagged.
///
/// `Missing` is kept distinct from the numeric causes so summaries never
/// conflate unreadable values with out-of-bounds ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyCause {
    BelowMinimum,
    AboveMaximum,
    Missing,
}

/// One flagged parameter within a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Finding {
    pub parameter: Parameter,
    pub cause: AnomalyCause,
    /// The offending value; absent for `Missing`.
    pub value: Option<f64>,
}

/// A record annotated with its anomaly findings under one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedRecord {
    pub record: TelemetryRecord,
    pub findings: Vec<Finding>,
}

impl EvaluatedRecord {
    pub fn is_anomalous(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn finding(&self, parameter: Parameter) -> Option<&Finding> {
        self.findings.iter().find(|f| f.parameter == parameter)
    }
}

/// Check one record against a profile.
///
/// A present, finite value is anomalous iff it lies strictly outside the
/// inclusive bounds for its parameter. A missing or non-finite value is
/// flagged `Missing`: unknown is unsafe. Pure function; identical inputs
/// always yield identical findings.
pub fn evaluate(record: &TelemetryRecord, profile: &MissionProfile) -> Vec<Finding> {
    let mut findings = Vec::new();
    for parameter in Parameter::ALL {
        let range = profile.range(parameter);
        match record.value(parameter) {
            None => findings.push(Finding {
                parameter,
                cause: AnomalyCause::Missing,
                value: None,
            }),
            Some(value) if !value.is_finite() => findings.push(Finding {
                parameter,
                cause: AnomalyCause::Missing,
                value: None,
            }),
            Some(value) => {
                if let Some(min) = range.min {
                    if value < min {
                        findings.push(Finding {
                            parameter,
                            cause: AnomalyCause::BelowMinimum,
                            value: Some(value),
                        });
                        continue;
                    }
                }
                if let Some(max) = range.max {
                    if value > max {
                        findings.push(Finding {
                            parameter,
                            cause: AnomalyCause::AboveMaximum,
                            value: Some(value),
                        });
                    }
                }
            }
        }
    }
    findings
}

/// Evaluate a whole dataset in input order.
pub fn evaluate_all(records: &[TelemetryRecord], profile: &MissionProfile) -> Vec<EvaluatedRecord> {
    records
        .iter()
        .map(|record| EvaluatedRecord {
            record: record.clone(),
            findings: evaluate(record, profile),
        })
        .collect()
}
