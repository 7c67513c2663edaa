// Mission profile domain model
use super::error::{TelemetryError, TelemetryResult};
use super::telemetry::Parameter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inclusive acceptable range for one parameter.
///
/// A `None` bound means "no check on that side". Both bounds absent is the
/// unbounded sentinel: the parameter is never flagged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ParamRange {
    pub const UNBOUNDED: ParamRange = ParamRange {
        min: None,
        max: None,
    };

    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn bounded(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Bounds must be finite and ordered.
    pub fn validate(&self, parameter: Parameter) -> TelemetryResult<()> {
        for bound in [self.min, self.max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(TelemetryError::validation(format!(
                    "{parameter}: bounds must be finite numbers"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(TelemetryError::validation(format!(
                    "{parameter}: lower bound {min} exceeds upper bound {max}"
                )));
            }
        }
        Ok(())
    }

    /// Inclusive containment. Boundary values are inside.
    pub fn contains(&self, value: f64) -> bool {
        if let Some(min) = self.min {
            if value < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return false;
            }
        }
        true
    }
}

/// Named set of per-parameter acceptable ranges.
///
/// Profiles are immutable once constructed; editing one means building a new
/// profile under a new name (copy-on-edit), so an active profile is never
/// mutated mid-analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionProfile {
    name: String,
    bounds: BTreeMap<Parameter, ParamRange>,
}

impl MissionProfile {
    /// Build a profile from a complete bounds map. Every recognized parameter
    /// must be present and every range valid.
    pub fn new(
        name: impl Into<String>,
        bounds: BTreeMap<Parameter, ParamRange>,
    ) -> TelemetryResult<Self> {
        for parameter in Parameter::ALL {
            match bounds.get(&parameter) {
                Some(range) => range.validate(parameter)?,
                None => {
                    return Err(TelemetryError::validation(format!(
                        "missing bounds for parameter '{parameter}'"
                    )));
                }
            }
        }
        Ok(Self {
            name: name.into(),
            bounds,
        })
    }

    /// Build a profile from a name-keyed bounds map, as submitted over the
    /// API or read back from the profile file. Unknown parameter names are
    /// rejected.
    pub fn from_named_bounds(
        name: impl Into<String>,
        bounds: BTreeMap<String, ParamRange>,
    ) -> TelemetryResult<Self> {
        let mut typed = BTreeMap::new();
        for (key, range) in bounds {
            let parameter = Parameter::from_key(&key).ok_or_else(|| {
                TelemetryError::validation(format!("unknown parameter '{key}'"))
            })?;
            typed.insert(parameter, range);
        }
        Self::new(name, typed)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self, parameter: Parameter) -> ParamRange {
        self.bounds
            .get(&parameter)
            .copied()
            .unwrap_or(ParamRange::UNBOUNDED)
    }

    pub fn bounds(&self) -> &BTreeMap<Parameter, ParamRange> {
        &self.bounds
    }
}

fn profile(name: &str, ranges: [(Parameter, ParamRange); 5]) -> MissionProfile {
    MissionProfile {
        name: name.to_string(),
        bounds: BTreeMap::from(ranges),
    }
}

/// The read-only built-in profiles, in presentation order. `Baseline` carries
/// the analyzer's default thresholds; the rest are the stock mission types.
/// Velocity is unbounded in every built-in.
pub fn builtin_profiles() -> Vec<MissionProfile> {
    vec![
        profile(
            "Baseline",
            [
                (Parameter::Temperature, ParamRange::bounded(0.0, 40.0)),
                (Parameter::Pressure, ParamRange::bounded(0.8, 1.2)),
                (Parameter::Velocity, ParamRange::UNBOUNDED),
                (Parameter::Battery, ParamRange::at_least(20.0)),
                (Parameter::Fuel, ParamRange::at_least(20.0)),
            ],
        ),
        profile(
            "LEO Satellite",
            [
                (Parameter::Temperature, ParamRange::bounded(-5.0, 35.0)),
                (Parameter::Pressure, ParamRange::bounded(0.9, 1.1)),
                (Parameter::Velocity, ParamRange::UNBOUNDED),
                (Parameter::Battery, ParamRange::at_least(30.0)),
                (Parameter::Fuel, ParamRange::at_least(25.0)),
            ],
        ),
        profile(
            "Deep Space Probe",
            [
                (Parameter::Temperature, ParamRange::bounded(-20.0, 30.0)),
                (Parameter::Pressure, ParamRange::bounded(0.7, 1.0)),
                (Parameter::Velocity, ParamRange::UNBOUNDED),
                (Parameter::Battery, ParamRange::at_least(40.0)),
                (Parameter::Fuel, ParamRange::at_least(35.0)),
            ],
        ),
        profile(
            "Mars Mission",
            [
                (Parameter::Temperature, ParamRange::bounded(-40.0, 25.0)),
                (Parameter::Pressure, ParamRange::bounded(0.6, 0.9)),
                (Parameter::Velocity, ParamRange::UNBOUNDED),
                (Parameter::Battery, ParamRange::at_least(50.0)),
                (Parameter::Fuel, ParamRange::at_least(40.0)),
            ],
        ),
        profile(
            "Venus Orbiter",
            [
                (Parameter::Temperature, ParamRange::bounded(10.0, 60.0)),
                (Parameter::Pressure, ParamRange::bounded(0.8, 1.2)),
                (Parameter::Velocity, ParamRange::UNBOUNDED),
                (Parameter::Battery, ParamRange::at_least(35.0)),
                (Parameter::Fuel, ParamRange::at_least(30.0)),
            ],
        ),
        profile(
            "Lunar Lander",
            [
                (Parameter::Temperature, ParamRange::bounded(-30.0, 40.0)),
                (Parameter::Pressure, ParamRange::bounded(0.85, 1.05)),
                (Parameter::Velocity, ParamRange::UNBOUNDED),
                (Parameter::Battery, ParamRange::at_least(45.0)),
                (Parameter::Fuel, ParamRange::at_least(20.0)),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_bounds() -> BTreeMap<String, ParamRange> {
        Parameter::ALL
            .into_iter()
            .map(|p| (p.key().to_string(), ParamRange::bounded(0.0, 100.0)))
            .collect()
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = ParamRange::bounded(0.0, 40.0);
        assert!(range.contains(0.0));
        assert!(range.contains(40.0));
        assert!(!range.contains(-0.001));
        assert!(!range.contains(40.001));
    }

    #[test]
    fn test_unbounded_range_contains_everything() {
        assert!(ParamRange::UNBOUNDED.contains(f64::MIN));
        assert!(ParamRange::UNBOUNDED.contains(f64::MAX));
    }

    #[test]
    fn test_half_bounded_range() {
        let range = ParamRange::at_least(20.0);
        assert!(range.contains(20.0));
        assert!(range.contains(1e9));
        assert!(!range.contains(19.999));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut bounds = full_bounds();
        bounds.insert("fuel".to_string(), ParamRange::bounded(50.0, 10.0));
        let err = MissionProfile::from_named_bounds("Bad", bounds).unwrap_err();
        assert!(matches!(err, TelemetryError::Validation { .. }));
    }

    #[test]
    fn test_missing_parameter_rejected() {
        let mut bounds = full_bounds();
        bounds.remove("pressure");
        let err = MissionProfile::from_named_bounds("Bad", bounds).unwrap_err();
        assert!(matches!(err, TelemetryError::Validation { .. }));
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let mut bounds = full_bounds();
        bounds.insert("thrust".to_string(), ParamRange::bounded(0.0, 1.0));
        let err = MissionProfile::from_named_bounds("Bad", bounds).unwrap_err();
        assert!(matches!(err, TelemetryError::Validation { .. }));
    }

    #[test]
    fn test_non_finite_bound_rejected() {
        let mut bounds = full_bounds();
        bounds.insert(
            "battery".to_string(),
            ParamRange::new(Some(f64::NAN), Some(100.0)),
        );
        let err = MissionProfile::from_named_bounds("Bad", bounds).unwrap_err();
        assert!(matches!(err, TelemetryError::Validation { .. }));
    }

    #[test]
    fn test_profile_serializes_with_parameter_keys() {
        let profile = builtin_profiles().remove(0);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["name"], "Baseline");
        assert_eq!(json["bounds"]["temperature"]["min"], 0.0);
        assert_eq!(json["bounds"]["pressure"]["max"], 1.2);
        // Unbounded sides are omitted, not null
        assert!(json["bounds"]["velocity"].get("min").is_none());
        assert!(json["bounds"]["battery"].get("max").is_none());
    }

    #[test]
    fn test_builtins_cover_all_parameters() {
        for builtin in builtin_profiles() {
            for parameter in Parameter::ALL {
                // range() falls back to unbounded, but builtins carry
                // explicit entries for every parameter
                assert!(builtin.bounds().contains_key(&parameter));
            }
            assert!(builtin.range(Parameter::Velocity) == ParamRange::UNBOUNDED);
        }
    }
}
