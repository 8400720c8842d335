//! Small helpers shared across the glucose log workspace.

pub mod config;

pub use config::{ConfigError, get_env_var, get_env_var_opt, parse_env_var};
