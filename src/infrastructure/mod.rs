// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod csv_import;
pub mod profile_file_repository;
