//! Application configuration: parsing, validation, and resolution.
//!
//! A TOML file with three optional sections:
//!
//! ```toml
//! [store]
//! database_url = "glucose.db"
//!
//! [chart]
//! default_filter = "week"
//!
//! [time]
//! timezone = "Europe/London"
//! ```
//!
//! Unknown keys, unknown filter kinds, and unknown zone names are rejected at
//! load time. Values missing from the file fall back to the environment
//! ([`DATABASE_URL_ENV`], [`TIMEZONE_ENV`]) and then to defaults
//! (no database, `day`, `UTC`).
//!
//! Entrypoints:
//! - [`load_config_str`] / [`load_config_path`]
//! - [`AppConfig::database_url`] and [`AppConfig::timezone`] for resolved values

use std::path::Path;

use anyhow::{Context, bail};
use chrono_tz::Tz;
use reading_aggregator::FilterKind;
use serde::{Deserialize, Serialize};
use shared_utils::{get_env_var, parse_env_var};

use crate::tz;

/// Environment fallback for `[store] database_url`.
pub const DATABASE_URL_ENV: &str = "GLUCOSE_DATABASE_URL";
/// Environment fallback for `[time] timezone`.
pub const TIMEZONE_ENV: &str = "GLUCOSE_TIMEZONE";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Storage settings.
    #[serde(default)]
    pub store: StoreCfg,
    /// Chart defaults.
    #[serde(default)]
    pub chart: ChartCfg,
    /// Time zone settings.
    #[serde(default)]
    pub time: TimeCfg,
}

/// `[store]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreCfg {
    /// SQLite file path or `file:` URL.
    pub database_url: Option<String>,
}

/// `[chart]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChartCfg {
    /// Filter used when `chart` is run without `--filter`.
    #[serde(default)]
    pub default_filter: FilterKind,
}

/// `[time]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TimeCfg {
    /// IANA zone name used for "now" and for converting instants.
    pub timezone: Option<String>,
}

impl AppConfig {
    /// Trim values and check them; empty strings become `None`.
    pub fn normalize(&mut self) -> anyhow::Result<()> {
        self.store.database_url = trimmed(self.store.database_url.take());
        self.time.timezone = trimmed(self.time.timezone.take());
        if let Some(name) = &self.time.timezone {
            tz::parse_tz(name)?;
        }
        Ok(())
    }

    /// Database URL from the file, else from [`DATABASE_URL_ENV`].
    pub fn database_url(&self) -> anyhow::Result<String> {
        if let Some(url) = &self.store.database_url {
            return Ok(url.clone());
        }
        get_env_var(DATABASE_URL_ENV)
            .context("no database configured: set [store] database_url or GLUCOSE_DATABASE_URL")
    }

    /// Zone from the file, else from [`TIMEZONE_ENV`], else UTC.
    pub fn timezone(&self) -> anyhow::Result<Tz> {
        if let Some(name) = &self.time.timezone {
            return tz::parse_tz(name);
        }
        Ok(parse_env_var::<Tz>(TIMEZONE_ENV)?.unwrap_or(Tz::UTC))
    }
}

fn trimmed(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parse and validate a configuration from a TOML string.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<AppConfig> {
    let mut cfg: AppConfig = toml::from_str(toml_str).context("failed to parse config TOML")?;
    cfg.normalize().context("invalid config")?;
    Ok(cfg)
}

/// Read a configuration file from disk, parse, and validate it.
pub fn load_config_path(path: impl AsRef<Path>) -> anyhow::Result<AppConfig> {
    let path = path.as_ref();
    if !path.is_file() {
        bail!("config file not found: {}", path.display());
    }
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    load_config_str(&s).with_context(|| format!("failed to load {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = load_config_str("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.chart.default_filter, FilterKind::Day);
    }

    #[test]
    fn full_file() {
        let cfg = load_config_str(
            r#"
            [store]
            database_url = "  glucose.db "
            [chart]
            default_filter = "month"
            [time]
            timezone = "Europe/London"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.store.database_url.as_deref(), Some("glucose.db"));
        assert_eq!(cfg.chart.default_filter, FilterKind::Month);
        assert_eq!(cfg.timezone().unwrap(), chrono_tz::Europe::London);
        assert_eq!(cfg.database_url().unwrap(), "glucose.db");
    }

    #[test]
    fn filter_names_ignore_case() {
        let cfg = load_config_str("[chart]\ndefault_filter = \" Week \"").unwrap();
        assert_eq!(cfg.chart.default_filter, FilterKind::Week);
    }

    #[test]
    fn rejects_bad_values_at_load() {
        for bad in [
            "[chart]\ndefault_filter = \"year\"",
            "[time]\ntimezone = \"Nowhere/Special\"",
            "[store]\npath = \"x.db\"",
            "[extra]\nkey = 1",
        ] {
            assert!(load_config_str(bad).is_err(), "accepted: {bad}");
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_path(dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    #[serial]
    fn env_fallbacks() {
        // SAFETY: tests touching the environment are serialized.
        unsafe {
            std::env::set_var(DATABASE_URL_ENV, "env.db");
            std::env::set_var(TIMEZONE_ENV, "Asia/Tokyo");
        }
        let cfg = AppConfig::default();
        assert_eq!(cfg.database_url().unwrap(), "env.db");
        assert_eq!(cfg.timezone().unwrap(), chrono_tz::Asia::Tokyo);

        // SAFETY: as above.
        unsafe {
            std::env::remove_var(DATABASE_URL_ENV);
            std::env::remove_var(TIMEZONE_ENV);
        }
        assert!(cfg.database_url().is_err());
        assert_eq!(cfg.timezone().unwrap(), Tz::UTC);
    }
}
