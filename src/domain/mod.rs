// Domain layer - Pure models and analysis logic, no I/O
pub mod dashboard;
pub mod error;
pub mod evaluator;
pub mod profile;
pub mod summary;
pub mod telemetry;
