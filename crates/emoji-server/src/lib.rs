pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod server;

pub use config::ServerConfig;
pub use error::ApiError;
pub use server::{app_config, build_state, run_server, AppState};
