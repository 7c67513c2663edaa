// TOML-file-backed persistence for user-defined mission profiles
use crate::application::profile_store::ProfileRepository;
use crate::domain::profile::{MissionProfile, ParamRange};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    profiles: Vec<StoredProfile>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredProfile {
    name: String,
    bounds: BTreeMap<String, ParamRange>,
}

pub struct TomlProfileRepository {
    path: PathBuf,
}

impl TomlProfileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProfileRepository for TomlProfileRepository {
    /// Read user profiles from the file. A missing file is an empty set;
    /// entries that no longer validate are skipped with a warning rather
    /// than poisoning startup.
    async fn load(&self) -> anyhow::Result<Vec<MissionProfile>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = tokio::fs::read_to_string(&self.path).await?;
        let file: ProfileFile = toml::from_str(&text)?;

        let mut profiles = Vec::new();
        for stored in file.profiles {
            match MissionProfile::from_named_bounds(stored.name.clone(), stored.bounds) {
                Ok(profile) => profiles.push(profile),
                Err(e) => {
                    tracing::warn!("skipping stored profile '{}': {e}", stored.name);
                }
            }
        }
        Ok(profiles)
    }

    async fn store(&self, profiles: &[MissionProfile]) -> anyhow::Result<()> {
        let file = ProfileFile {
            profiles: profiles
                .iter()
                .map(|profile| StoredProfile {
                    name: profile.name().to_string(),
                    bounds: profile
                        .bounds()
                        .iter()
                        .map(|(parameter, range)| (parameter.key().to_string(), *range))
                        .collect(),
                })
                .collect(),
        };
        let text = toml::to_string_pretty(&file)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}
