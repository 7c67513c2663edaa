// CSV import - strict-schema telemetry file parsing
use crate::domain::error::{TelemetryError, TelemetryResult};
use crate::domain::telemetry::TelemetryRecord;
use chrono::NaiveDateTime;

pub const EXPECTED_HEADER: [&str; 6] = [
    "timestamp",
    "temperature",
    "pressure",
    "velocity",
    "battery",
    "fuel",
];

pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Parse a whole CSV document into telemetry records.
///
/// The schema is fixed and validated once: the header must match
/// `EXPECTED_HEADER` exactly and every row must carry six fields. Structural
/// problems (bad header, wrong field count, bad timestamp, non-numeric
/// token) fail the whole import with the offending CSV line; an empty cell
/// or a literal `NaN` parses to a missing value, which the evaluator flags
/// on its own. The input is fully read before anything is returned.
pub fn parse_csv(input: &str) -> TelemetryResult<Vec<TelemetryRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());

    let header = reader
        .headers()
        .map_err(|e| TelemetryError::parse(1, e.to_string()))?;
    if header != EXPECTED_HEADER.as_slice() {
        return Err(TelemetryError::parse(
            1,
            format!(
                "expected header '{}', got '{}'",
                EXPECTED_HEADER.join(","),
                header.iter().collect::<Vec<_>>().join(",")
            ),
        ));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| {
            let line = e.position().map_or(0, csv::Position::line);
            TelemetryError::parse(line, e.to_string())
        })?;
        let line = row.position().map_or(0, csv::Position::line);

        if row.len() != EXPECTED_HEADER.len() {
            return Err(TelemetryError::parse(
                line,
                format!("expected {} fields, got {}", EXPECTED_HEADER.len(), row.len()),
            ));
        }

        let timestamp = NaiveDateTime::parse_from_str(&row[0], TIMESTAMP_FORMAT)
            .map_err(|e| {
                TelemetryError::parse(line, format!("bad timestamp '{}': {e}", &row[0]))
            })?;

        let mut values = [None; 5];
        for (slot, value) in values.iter_mut().enumerate() {
            *value = parse_value(&row[slot + 1], EXPECTED_HEADER[slot + 1], line)?;
        }

        records.push(TelemetryRecord::new(
            timestamp, values[0], values[1], values[2], values[3], values[4],
        ));
    }

    Ok(records)
}

/// An empty cell or a literal `NaN` is a missing value; any other
/// non-numeric token is a structural error. Parsed non-finite numbers are
/// demoted to missing for the same fail-safe reason.
fn parse_value(field: &str, column: &str, line: u64) -> TelemetryResult<Option<f64>> {
    if field.is_empty() || field.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let value: f64 = field.parse().map_err(|_| {
        TelemetryError::parse(line, format!("invalid number '{field}' in column '{column}'"))
    })?;
    Ok(value.is_finite().then_some(value))
}
