use std::{env, str::FromStr};

use thiserror::Error;

/// Errors related to application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable required by the application is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable is set but does not hold valid unicode.
    #[error("Environment variable {0} is not valid unicode")]
    NotUnicode(String),

    /// An environment variable is set but its value could not be parsed.
    #[error("Invalid value for environment variable {name}: {message}")]
    InvalidValue {
        /// Variable name.
        name: String,
        /// Parser error rendered as text.
        message: String,
    },
}

/// Reads an environment variable, returning a structured error if it's missing.
///
/// Empty values count as missing, so `GLUCOSE_DATABASE_URL=` in a `.env` file
/// does not silently select an unnamed database.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, ConfigError> {
    get_env_var_opt(name)?.ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// Like [`get_env_var`] but an unset (or empty) variable is `Ok(None)`.
pub fn get_env_var_opt(name: &str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(v) if v.trim().is_empty() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(name.to_string())),
    }
}

/// Reads and parses an optional environment variable.
pub fn parse_env_var<T>(name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_var_opt(name)?
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                name: name.to_string(),
                message: e.to_string(),
            })
        })
        .transpose()
}
