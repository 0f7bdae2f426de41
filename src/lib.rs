//! Smart Hub: catalog of smart models and their features behind a typed RPC surface,
//! persisted in PostgreSQL.

pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod migration;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;
pub mod telemetry;
pub mod wire;

pub use config::{AppConfig, DatabaseConfig};
pub use error::{Code, ConfigError, MapError, RepositoryError, Status, ValidationError};
pub use mapper::EnumPolicy;
pub use migration::{apply_migrations, ensure_database_exists};
pub use routes::app;
pub use state::AppState;
