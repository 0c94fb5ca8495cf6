/// Feed Service Library
///
/// Backend for a collaborative content feed: authenticated users create,
/// edit, and delete image posts, browse a paginated feed, and receive live
/// updates over WebSocket whenever any user's posts change.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `routes`: route table and middleware wiring
/// - `models`: users, posts, caller identity
/// - `services`: business logic (auth, authorization, posts, pagination)
/// - `db`: storage capability traits and Postgres implementations
/// - `storage`: image blob lifecycle
/// - `realtime`: change-event fan-out to connected viewers
/// - `security`: token and password primitives
/// - `middleware`: bearer-token authentication
/// - `error`: error taxonomy and HTTP translation
/// - `config`: configuration management
pub mod app_state;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod realtime;
pub mod routes;
pub mod security;
pub mod services;
pub mod storage;

pub use app_state::AppState;
pub use config::Config;
pub use error::{AppError, Result};
