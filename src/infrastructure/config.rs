// Service configuration loading
use crate::domain::summary::HealthThresholds;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyzerConfig {
    pub server: ServerSettings,
    pub health: HealthThresholds,
    pub simulation: SimulationDefaults,
    pub profiles: ProfileSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub listen: String,
}

/// Defaults applied when a simulation request leaves fields unset.
#[derive(Debug, Deserialize, Clone)]
pub struct SimulationDefaults {
    pub count: usize,
    pub interval_minutes: u32,
    pub seed: u64,
    pub anomaly_rate: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProfileSettings {
    /// Where user-defined profiles are persisted.
    pub path: String,
}

/// Load `config/analyzer.toml`, falling back to coded defaults for anything
/// absent. A missing file is not an error.
pub fn load_config() -> anyhow::Result<AnalyzerConfig> {
    let settings = config::Config::builder()
        .set_default("server.listen", "0.0.0.0:8080")?
        .set_default("health.warning_percent", 5.0)?
        .set_default("health.critical_percent", 20.0)?
        .set_default("simulation.count", 180)?
        .set_default("simulation.interval_minutes", 5)?
        .set_default("simulation.seed", 42)?
        .set_default("simulation.anomaly_rate", 0.2)?
        .set_default("profiles.path", "config/profiles.toml")?
        .add_source(config::File::with_name("config/analyzer").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}
