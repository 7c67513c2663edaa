// Application layer - Use cases orchestrating the domain
pub mod analysis_service;
pub mod dashboard_service;
pub mod profile_store;
pub mod simulation_service;
