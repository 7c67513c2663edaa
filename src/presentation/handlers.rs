// HTTP request handlers
use crate::application::simulation_service::{self, SimulationSettings};
use crate::domain::dashboard::Dashboard;
use crate::domain::error::TelemetryError;
use crate::domain::evaluator::EvaluatedRecord;
use crate::domain::profile::{MissionProfile, ParamRange};
use crate::domain::summary::AnalysisSummary;
use crate::infrastructure::csv_import::parse_csv;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Every core error is recoverable at this boundary: map it to a status and
/// a user-facing message.
fn error_response(err: TelemetryError) -> Response {
    let status = match err {
        TelemetryError::NotFound { .. } => StatusCode::NOT_FOUND,
        TelemetryError::Parse { .. } | TelemetryError::Validation { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// One full recomputation pass over the session dataset under its active
/// profile. Re-invoked on every interaction; nothing is cached.
async fn analyze_session(
    state: &AppState,
) -> Result<(Vec<EvaluatedRecord>, AnalysisSummary, MissionProfile), TelemetryError> {
    let session = state.session.read().await;
    let profiles = state.profiles.read().await;
    let profile = profiles.get(&session.active_profile)?.clone();
    let (evaluated, summary) = state.analysis.analyze(&session.records, &profile);
    Ok((evaluated, summary, profile))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List profile names: built-ins first, then user-defined in creation order
pub async fn list_profiles(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let profiles = state.profiles.read().await;
    Json(profiles.names().into_iter().map(str::to_string).collect())
}

/// Fetch one profile with its bounds
pub async fn get_profile(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let profiles = state.profiles.read().await;
    match profiles.get(&name) {
        Ok(profile) => Json(profile.clone()).into_response(),
        Err(e) => error_response(e),
    }
}

/// Create or overwrite a user-defined profile
pub async fn save_profile(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(bounds): Json<BTreeMap<String, ParamRange>>,
) -> Response {
    let mut profiles = state.profiles.write().await;
    match profiles.save(&name, bounds).await {
        Ok(profile) => {
            tracing::info!("saved user profile '{name}'");
            Json(profile.clone()).into_response()
        }
        Err(e) => error_response(e),
    }
}

#[derive(Deserialize)]
pub struct ProfileSelect {
    pub name: String,
}

/// Switch the active profile and recompute the summary under it
pub async fn set_active_profile(
    State(state): State<Arc<AppState>>,
    Json(select): Json<ProfileSelect>,
) -> Response {
    {
        let profiles = state.profiles.read().await;
        if let Err(e) = profiles.get(&select.name) {
            return error_response(e);
        }
    }
    state.session.write().await.active_profile = select.name.clone();
    tracing::info!("active profile switched to '{}'", select.name);
    match analyze_session(&state).await {
        Ok((_, summary, _)) => Json(summary).into_response(),
        Err(e) => error_response(e),
    }
}

/// Upload a telemetry CSV; replaces the session dataset
pub async fn upload_dataset(State(state): State<Arc<AppState>>, body: String) -> Response {
    let records = match parse_csv(&body) {
        Ok(records) => records,
        Err(e) => return error_response(e),
    };
    tracing::info!("loaded {} telemetry records", records.len());
    state.session.write().await.records = records;
    match analyze_session(&state).await {
        Ok((_, summary, _)) => Json(summary).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Deserialize)]
pub struct SimulationRequest {
    pub count: Option<usize>,
    pub start: Option<NaiveDateTime>,
    pub interval_minutes: Option<u32>,
    pub seed: Option<u64>,
    pub anomaly_rate: Option<f64>,
}

/// Generate a simulated dataset; replaces the session dataset
pub async fn simulate_dataset(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimulationRequest>,
) -> Response {
    let defaults = &state.simulation_defaults;
    let settings = SimulationSettings {
        count: request.count.unwrap_or(defaults.count),
        start: request
            .start
            .unwrap_or_else(|| Utc::now().naive_utc()),
        interval_minutes: request.interval_minutes.unwrap_or(defaults.interval_minutes),
        seed: request.seed.unwrap_or(defaults.seed),
        anomaly_rate: request.anomaly_rate.unwrap_or(defaults.anomaly_rate),
    };

    let records = match simulation_service::generate(&settings) {
        Ok(records) => records,
        Err(e) => return error_response(e),
    };
    tracing::info!(
        "generated {} simulated records (seed {})",
        records.len(),
        settings.seed
    );
    state.session.write().await.records = records;
    match analyze_session(&state).await {
        Ok((_, summary, _)) => Json(summary).into_response(),
        Err(e) => error_response(e),
    }
}

/// Assembled dashboard for the session dataset and active profile
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Response {
    match analyze_session(&state).await {
        Ok((evaluated, summary, profile)) => {
            let alerts = state.analysis.alerts(&evaluated);
            let dashboard: Dashboard =
                state
                    .dashboards
                    .build(&evaluated, &profile, summary, alerts);
            Json(dashboard).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Analysis summary only, for gauges and alert banners
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Response {
    match analyze_session(&state).await {
        Ok((_, summary, _)) => Json(summary).into_response(),
        Err(e) => error_response(e),
    }
}

/// Evaluated records for the styled table view
pub async fn get_records(State(state): State<Arc<AppState>>) -> Response {
    match analyze_session(&state).await {
        Ok((evaluated, _, _)) => Json(evaluated).into_response(),
        Err(e) => error_response(e),
    }
}
