// Application state for HTTP handlers
use crate::application::analysis_service::AnalysisService;
use crate::application::dashboard_service::DashboardService;
use crate::application::profile_store::ProfileStore;
use crate::domain::telemetry::TelemetryRecord;
use crate::infrastructure::config::SimulationDefaults;
use tokio::sync::RwLock;

/// One analysis session: the loaded dataset and the active profile name.
/// The core stays parameter-threaded; this is the only mutable state, and it
/// lives here at the presentation boundary.
pub struct Session {
    pub records: Vec<TelemetryRecord>,
    pub active_profile: String,
}

impl Session {
    pub fn new(active_profile: String) -> Self {
        Self {
            records: Vec::new(),
            active_profile,
        }
    }
}

pub struct AppState {
    pub profiles: RwLock<ProfileStore>,
    pub session: RwLock<Session>,
    pub analysis: AnalysisService,
    pub dashboards: DashboardService,
    pub simulation_defaults: SimulationDefaults,
}
