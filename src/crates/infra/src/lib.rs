pub mod repository;

pub mod config;
pub use crate::config::{AppConfigImpl, ConfigError, ServerConfig};
