pub mod app_config;
pub mod config;
pub mod listing;
pub mod ports;
pub mod request;
pub mod run;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use listing::ListingRecord;
pub use ports::{RequestSource, ResultSink, StatusReporter, Trigger};
pub use request::{RequestError, SearchRequest};
pub use run::{RunResult, RunStatus, StopReason};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
