//! Core types, configuration, and utilities for the ProBem client.

mod config;
mod error;
mod logging;
mod paths;

pub use config::{
    Config, DEFAULT_HOSTED_API_URL, DEFAULT_LOCAL_API_URL, DEFAULT_LOG_LEVEL,
    DEFAULT_REDIRECT_SCHEME,
};
pub use error::{CoreError, CoreResult};
pub use logging::{init_logging, parse_level};
pub use paths::Paths;
