// Dashboard domain model - read-only structures served to the browser UI
use super::summary::{AnalysisSummary, HealthStatus};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub time_ms: i64,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self { time_ms, value }
    }
}

/// One health gauge: the latest reading of a parameter plus its status.
#[derive(Debug, Clone, Serialize)]
pub struct GaugeData {
    pub id: String,
    pub title: String,
    pub unit: String,
    /// Latest value; absent when the dataset is empty or the reading is
    /// missing.
    pub value: Option<f64>,
    pub precision: i32,
    pub status: HealthStatus,
}

impl GaugeData {
    pub fn new(
        id: String,
        title: String,
        unit: String,
        value: Option<f64>,
        precision: i32,
        status: HealthStatus,
    ) -> Self {
        Self {
            id,
            title,
            unit,
            value,
            precision,
            status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub points: Vec<TimeSeriesPoint>,
}

impl SeriesData {
    pub fn new(id: String, name: String, points: Vec<TimeSeriesPoint>) -> Self {
        Self { id, name, points }
    }
}

/// One per-parameter chart. The active profile's bounds ride along so the UI
/// can draw threshold overlay lines and scale the y axis.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    pub fraction_digits: i32,
    pub series: Vec<SeriesData>,
}

impl ChartData {
    pub fn new(
        id: String,
        title: String,
        unit: String,
        lower_bound: Option<f64>,
        upper_bound: Option<f64>,
        fraction_digits: i32,
        series: Vec<SeriesData>,
    ) -> Self {
        Self {
            id,
            title,
            unit,
            lower_bound,
            upper_bound,
            fraction_digits,
            series,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub profile: String,
    pub gauges: Vec<GaugeData>,
    pub charts: Vec<ChartData>,
    pub alerts: Vec<String>,
    pub summary: AnalysisSummary,
}

impl Dashboard {
    pub fn new(
        title: String,
        profile: String,
        gauges: Vec<GaugeData>,
        charts: Vec<ChartData>,
        alerts: Vec<String>,
        summary: AnalysisSummary,
    ) -> Self {
        Self {
            title,
            profile,
            gauges,
            charts,
            alerts,
            summary,
        }
    }
}
