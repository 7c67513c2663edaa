// Telemetry data domain models
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five monitored spacecraft parameters, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Temperature,
    Pressure,
    Velocity,
    Battery,
    Fuel,
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::Temperature,
        Parameter::Pressure,
        Parameter::Velocity,
        Parameter::Battery,
        Parameter::Fuel,
    ];

    /// Machine-readable key, matching the CSV column name.
    pub fn key(self) -> &'static str {
        match self {
            Parameter::Temperature => "temperature",
            Parameter::Pressure => "pressure",
            Parameter::Velocity => "velocity",
            Parameter::Battery => "battery",
            Parameter::Fuel => "fuel",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Parameter::Temperature => "Temperature",
            Parameter::Pressure => "Pressure",
            Parameter::Velocity => "Velocity",
            Parameter::Battery => "Battery Level",
            Parameter::Fuel => "Fuel Level",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Parameter::Temperature => "°C",
            Parameter::Pressure => "atm",
            Parameter::Velocity => "m/s",
            Parameter::Battery => "%",
            Parameter::Fuel => "%",
        }
    }

    /// Fraction digits used when displaying values of this parameter.
    pub fn precision(self) -> i32 {
        match self {
            Parameter::Temperature => 1,
            Parameter::Pressure => 2,
            Parameter::Velocity => 0,
            Parameter::Battery => 0,
            Parameter::Fuel => 0,
        }
    }

    pub fn from_key(key: &str) -> Option<Parameter> {
        Parameter::ALL.into_iter().find(|p| p.key() == key)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One timestamped snapshot of the five monitored parameters.
///
/// A `None` reading means the source had no parseable numeric value for that
/// parameter. Records are immutable after creation and keep the order they
/// were loaded in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryRecord {
    pub timestamp: NaiveDateTime,
    pub temperature: Option<f64>,
    pub pressure: Option<f64>,
    pub velocity: Option<f64>,
    pub battery: Option<f64>,
    pub fuel: Option<f64>,
}

impl TelemetryRecord {
    pub fn new(
        timestamp: NaiveDateTime,
        temperature: Option<f64>,
        pressure: Option<f64>,
        velocity: Option<f64>,
        battery: Option<f64>,
        fuel: Option<f64>,
    ) -> Self {
        Self {
            timestamp,
            temperature,
            pressure,
            velocity,
            battery,
            fuel,
        }
    }

    pub fn value(&self, parameter: Parameter) -> Option<f64> {
        match parameter {
            Parameter::Temperature => self.temperature,
            Parameter::Pressure => self.pressure,
            Parameter::Velocity => self.velocity,
            Parameter::Battery => self.battery,
            Parameter::Fuel => self.fuel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parameter_keys_round_trip() {
        for parameter in Parameter::ALL {
            assert_eq!(Parameter::from_key(parameter.key()), Some(parameter));
        }
        assert_eq!(Parameter::from_key("thrust"), None);
    }

    #[test]
    fn test_record_value_accessor() {
        let timestamp = NaiveDate::from_ymd_opt(2025, 4, 25)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let record = TelemetryRecord::new(
            timestamp,
            Some(22.5),
            Some(1.01),
            Some(7071.0),
            Some(95.0),
            None,
        );

        assert_eq!(record.value(Parameter::Temperature), Some(22.5));
        assert_eq!(record.value(Parameter::Velocity), Some(7071.0));
        assert_eq!(record.value(Parameter::Fuel), None);
    }
}
