// Analysis service - one full evaluate + summarize pass over a dataset
use crate::domain::evaluator::{evaluate_all, AnomalyCause, EvaluatedRecord};
use crate::domain::profile::MissionProfile;
use crate::domain::summary::{summarize, AnalysisSummary, HealthThresholds};
use crate::domain::telemetry::{Parameter, TelemetryRecord};

/// Stateless analysis use-case. Every user interaction (upload, profile
/// switch, simulation run) triggers one full pass; nothing is cached across
/// profile switches.
#[derive(Clone)]
pub struct AnalysisService {
    health: HealthThresholds,
}

impl AnalysisService {
    pub fn new(health: HealthThresholds) -> Self {
        Self { health }
    }

    pub fn analyze(
        &self,
        records: &[TelemetryRecord],
        profile: &MissionProfile,
    ) -> (Vec<EvaluatedRecord>, AnalysisSummary) {
        let evaluated = evaluate_all(records, profile);
        let summary = summarize(&evaluated, self.health);
        (evaluated, summary)
    }

    /// Alert banner messages: one per parameter and side with out-of-range
    /// findings, carrying the worst offending value, plus one per parameter
    /// with missing readings (reported distinctly).
    pub fn alerts(&self, evaluated: &[EvaluatedRecord]) -> Vec<String> {
        let mut alerts = Vec::new();
        for parameter in Parameter::ALL {
            let mut worst_low: Option<f64> = None;
            let mut worst_high: Option<f64> = None;
            let mut missing = 0usize;

            for record in evaluated {
                match record.finding(parameter) {
                    Some(finding) => match (finding.cause, finding.value) {
                        (AnomalyCause::BelowMinimum, Some(v)) => {
                            worst_low = Some(worst_low.map_or(v, |w| w.min(v)));
                        }
                        (AnomalyCause::AboveMaximum, Some(v)) => {
                            worst_high = Some(worst_high.map_or(v, |w| w.max(v)));
                        }
                        (AnomalyCause::Missing, _) => missing += 1,
                        _ => {}
                    },
                    None => {}
                }
            }

            if let Some(value) = worst_low {
                alerts.push(low_alert(parameter, value));
            }
            if let Some(value) = worst_high {
                alerts.push(high_alert(parameter, value));
            }
            if missing > 0 {
                alerts.push(format!(
                    "Missing {} readings in {missing} record(s)",
                    parameter.label().to_lowercase()
                ));
            }
        }
        alerts
    }
}

fn format_value(parameter: Parameter, value: f64) -> String {
    format!(
        "{value:.prec$}{unit}",
        prec = parameter.precision().max(0) as usize,
        unit = parameter.unit()
    )
}

fn low_alert(parameter: Parameter, value: f64) -> String {
    match parameter {
        Parameter::Battery => format!("Battery critically low: {}", format_value(parameter, value)),
        Parameter::Fuel => format!("Fuel critically low: {}", format_value(parameter, value)),
        _ => format!(
            "Low {} detected: {}",
            parameter.label().to_lowercase(),
            format_value(parameter, value)
        ),
    }
}

fn high_alert(parameter: Parameter, value: f64) -> String {
    format!(
        "High {} detected: {}",
        parameter.label().to_lowercase(),
        format_value(parameter, value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::builtin_profiles;
    use crate::domain::summary::HealthStatus;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 25)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn service() -> AnalysisService {
        AnalysisService::new(HealthThresholds::default())
    }

    #[test]
    fn test_analyze_is_deterministic_across_calls() {
        let profile = builtin_profiles().remove(0);
        let records = vec![
            TelemetryRecord::new(at(9), Some(45.0), Some(1.0), Some(1200.0), Some(80.0), Some(70.0)),
            TelemetryRecord::new(at(10), Some(20.0), None, Some(1250.0), Some(78.0), Some(69.0)),
        ];
        let service = service();

        let (first_eval, first_summary) = service.analyze(&records, &profile);
        let (second_eval, second_summary) = service.analyze(&records, &profile);
        assert_eq!(first_eval, second_eval);
        assert_eq!(first_summary, second_summary);
        assert_eq!(first_summary.health, HealthStatus::Critical);
    }

    #[test]
    fn test_alert_messages() {
        let profile = builtin_profiles().remove(0);
        let records = vec![
            // Temperature high twice: alert carries the worst value
            TelemetryRecord::new(at(9), Some(41.5), Some(1.0), Some(1200.0), Some(80.0), Some(70.0)),
            TelemetryRecord::new(at(10), Some(48.0), Some(1.0), Some(1200.0), Some(12.0), Some(70.0)),
            TelemetryRecord::new(at(11), Some(20.0), None, Some(1200.0), Some(80.0), Some(70.0)),
        ];
        let service = service();
        let (evaluated, _) = service.analyze(&records, &profile);
        let alerts = service.alerts(&evaluated);

        assert!(alerts.contains(&"High temperature detected: 48.0°C".to_string()));
        assert!(alerts.contains(&"Battery critically low: 12%".to_string()));
        assert!(alerts.contains(&"Missing pressure readings in 1 record(s)".to_string()));
        // Nominal fuel produced no alert
        assert!(!alerts.iter().any(|a| a.contains("uel")));
    }

    #[test]
    fn test_no_alerts_for_clean_dataset() {
        let profile = builtin_profiles().remove(0);
        let records = vec![TelemetryRecord::new(
            at(9),
            Some(20.0),
            Some(1.0),
            Some(1200.0),
            Some(80.0),
            Some(70.0),
        )];
        let service = service();
        let (evaluated, _) = service.analyze(&records, &profile);
        assert!(service.alerts(&evaluated).is_empty());
    }
}
