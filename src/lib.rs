//! Directory API: pet and book CRUD over HTTP, backed by SQLite.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod record;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, StartupError};
pub use model::{Book, Pet};
pub use record::{Fields, Record};
pub use routes::{app_routes, common_routes, common_routes_with_ready, resource_routes};
pub use service::{Repository, RequestValidator};
pub use state::AppState;
pub use store::{connect, connect_memory, ensure_tables};
