// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::application::analysis_service::AnalysisService;
use crate::application::dashboard_service::DashboardService;
use crate::application::profile_store::ProfileStore;
use crate::infrastructure::config::load_config;
use crate::infrastructure::profile_file_repository::TomlProfileRepository;
use crate::presentation::app_state::{AppState, Session};
use crate::presentation::handlers::{
    get_dashboard, get_profile, get_records, get_summary, health_check, list_profiles,
    save_profile, set_active_profile, simulate_dataset, upload_dataset,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(TomlProfileRepository::new(&config.profiles.path));

    // Create services (application layer)
    let profiles = ProfileStore::load(repository).await;
    let default_profile = profiles
        .names()
        .first()
        .copied()
        .unwrap_or("Baseline")
        .to_string();
    let analysis = AnalysisService::new(config.health);
    let dashboards = DashboardService::new();

    // Create application state
    let state = Arc::new(AppState {
        profiles: RwLock::new(profiles),
        session: RwLock::new(Session::new(default_profile)),
        analysis,
        dashboards,
        simulation_defaults: config.simulation.clone(),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/profiles", get(list_profiles))
        .route("/profiles/:name", get(get_profile).put(save_profile))
        .route("/session/profile", put(set_active_profile))
        .route("/datasets", post(upload_dataset))
        .route("/datasets/simulated", post(simulate_dataset))
        .route("/dashboard", get(get_dashboard))
        .route("/summary", get(get_summary))
        .route("/records", get(get_records))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.listen.parse()?;
    tracing::info!("Starting spacecraft-telemetry service on {addr}");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
