// Dashboard service - Use case for assembling the dashboard view
use crate::domain::dashboard::{ChartData, Dashboard, GaugeData, SeriesData, TimeSeriesPoint};
use crate::domain::evaluator::EvaluatedRecord;
use crate::domain::profile::{MissionProfile, ParamRange};
use crate::domain::summary::{AnalysisSummary, HealthStatus};
use crate::domain::telemetry::Parameter;

/// Fraction of the bounded range width treated as the "approaching a bound"
/// warning band on gauges.
const GAUGE_WARNING_FRACTION: f64 = 0.1;

#[derive(Clone)]
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    pub fn build(
        &self,
        evaluated: &[EvaluatedRecord],
        profile: &MissionProfile,
        summary: AnalysisSummary,
        alerts: Vec<String>,
    ) -> Dashboard {
        let title = format!("Spacecraft Telemetry ({} records)", evaluated.len());
        let gauges = self.build_gauges(evaluated, profile);
        let charts = self.build_charts(evaluated, profile);
        Dashboard::new(
            title,
            profile.name().to_string(),
            gauges,
            charts,
            alerts,
            summary,
        )
    }

    /// One gauge per parameter showing the latest reading. Critical when the
    /// latest record flags the parameter, warning when the value sits inside
    /// the band next to a bound, else nominal.
    fn build_gauges(
        &self,
        evaluated: &[EvaluatedRecord],
        profile: &MissionProfile,
    ) -> Vec<GaugeData> {
        let latest = evaluated.last();
        Parameter::ALL
            .into_iter()
            .map(|parameter| {
                let value = latest.and_then(|record| record.record.value(parameter));
                let status = match latest {
                    None => HealthStatus::Nominal,
                    Some(record) if record.finding(parameter).is_some() => HealthStatus::Critical,
                    Some(_) => match value {
                        Some(v) if near_bound(v, profile.range(parameter)) => {
                            HealthStatus::Warning
                        }
                        _ => HealthStatus::Nominal,
                    },
                };
                GaugeData::new(
                    parameter.key().to_string(),
                    parameter.label().to_string(),
                    parameter.unit().to_string(),
                    value,
                    parameter.precision(),
                    status,
                )
            })
            .collect()
    }

    /// One chart per parameter with the full time series and the profile
    /// bounds for threshold overlays. Charts without a single usable point
    /// are skipped.
    fn build_charts(
        &self,
        evaluated: &[EvaluatedRecord],
        profile: &MissionProfile,
    ) -> Vec<ChartData> {
        let mut charts = Vec::new();
        for parameter in Parameter::ALL {
            let points: Vec<TimeSeriesPoint> = evaluated
                .iter()
                .filter_map(|record| {
                    let value = record.record.value(parameter)?;
                    value.is_finite().then(|| {
                        TimeSeriesPoint::new(
                            record.record.timestamp.and_utc().timestamp_millis(),
                            value,
                        )
                    })
                })
                .collect();

            if points.is_empty() {
                continue;
            }

            let range = profile.range(parameter);
            let series = SeriesData::new(
                parameter.key().to_string(),
                parameter.label().to_string(),
                points,
            );
            charts.push(ChartData::new(
                parameter.key().to_string(),
                format!("{} Over Time", parameter.label()),
                parameter.unit().to_string(),
                range.min,
                range.max,
                parameter.precision(),
                vec![series],
            ));
        }
        charts
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a nominal value lies within the warning band next to a bound.
/// For a fully bounded range the band is a fraction of the range width; for
/// half-bounded ranges a fraction of the bound's magnitude is used.
fn near_bound(value: f64, range: ParamRange) -> bool {
    let margin = match (range.min, range.max) {
        (Some(min), Some(max)) => (max - min) * GAUGE_WARNING_FRACTION,
        (Some(bound), None) | (None, Some(bound)) => bound.abs() * GAUGE_WARNING_FRACTION,
        (None, None) => return false,
    };
    if margin <= 0.0 {
        return false;
    }
    if let Some(min) = range.min {
        if value <= min + margin {
            return true;
        }
    }
    if let Some(max) = range.max {
        if value >= max - margin {
            return true;
        }
    }
    false
}
