// Mission profile store - built-ins plus user-defined profiles
use crate::domain::error::{TelemetryError, TelemetryResult};
use crate::domain::profile::{builtin_profiles, MissionProfile, ParamRange};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Persistence seam for user-defined profiles. The storage mechanism is an
/// external collaborator; the store only needs load/save.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn load(&self) -> anyhow::Result<Vec<MissionProfile>>;
    async fn store(&self, profiles: &[MissionProfile]) -> anyhow::Result<()>;
}

/// In-memory profile registry: read-only built-ins in fixed presentation
/// order, then user-defined profiles in creation order.
pub struct ProfileStore {
    builtins: Vec<MissionProfile>,
    user: Vec<MissionProfile>,
    repository: Arc<dyn ProfileRepository>,
}

impl ProfileStore {
    /// Seed the store from built-in constants plus whatever the repository
    /// holds. A repository failure degrades to built-ins only.
    pub async fn load(repository: Arc<dyn ProfileRepository>) -> Self {
        let builtins = builtin_profiles();
        let user = match repository.load().await {
            Ok(profiles) => {
                // User profiles may not shadow built-in names
                profiles
                    .into_iter()
                    .filter(|p| {
                        let shadows = builtins.iter().any(|b| b.name() == p.name());
                        if shadows {
                            tracing::warn!(
                                "ignoring stored profile '{}': shadows a built-in",
                                p.name()
                            );
                        }
                        !shadows
                    })
                    .collect()
            }
            Err(e) => {
                tracing::warn!("could not load stored profiles: {e}");
                Vec::new()
            }
        };
        Self {
            builtins,
            user,
            repository,
        }
    }

    pub fn get(&self, name: &str) -> TelemetryResult<&MissionProfile> {
        self.iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| TelemetryError::not_found(name))
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(MissionProfile::name).collect()
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtins.iter().any(|p| p.name() == name)
    }

    /// Validate and insert (or overwrite) a user-defined profile. Built-in
    /// names are read-only. The bounds map must cover exactly the five
    /// recognized parameters with ordered bounds. Persistence is best-effort;
    /// a repository failure is logged and the in-memory save stands.
    pub async fn save(
        &mut self,
        name: &str,
        bounds: BTreeMap<String, ParamRange>,
    ) -> TelemetryResult<&MissionProfile> {
        if self.is_builtin(name) {
            return Err(TelemetryError::validation(format!(
                "'{name}' is a built-in profile and cannot be overwritten"
            )));
        }
        let profile = MissionProfile::from_named_bounds(name, bounds)?;

        match self.user.iter_mut().find(|p| p.name() == name) {
            Some(existing) => *existing = profile,
            None => self.user.push(profile),
        }

        if let Err(e) = self.repository.store(&self.user).await {
            tracing::warn!("could not persist user profiles: {e}");
        }

        Ok(self
            .user
            .iter()
            .find(|p| p.name() == name)
            .expect("profile was just inserted"))
    }

    fn iter(&self) -> impl Iterator<Item = &MissionProfile> {
        self.builtins.iter().chain(self.user.iter())
    }
}
