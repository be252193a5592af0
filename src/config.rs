use serde::{Deserialize, Deserializer};
use std::path::Path;

/// Settings for one geo filter.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FilterConfig {
    /// Path to the MaxMind database (GeoLite2-Country.mmdb or similar).
    pub db_path: String,
    /// JSON log file for per-request events; `None` disables them.
    /// An empty path counts as `None`.
    #[serde(deserialize_with = "non_empty_path")]
    pub log_path: Option<String>,
    /// Countries let through. Every other country is rejected.
    /// `UNK` matches unrecognized addresses.
    #[serde(deserialize_with = "nullable_list")]
    pub allow_countries: Vec<String>,
    /// Countries rejected. Takes precedence over `allow_countries`.
    /// `UNK` matches unrecognized addresses.
    #[serde(deserialize_with = "nullable_list")]
    pub deny_countries: Vec<String>,
}

fn non_empty_path<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let path: Option<String> = Option::deserialize(deserializer)?;
    Ok(path.filter(|p| !p.is_empty()))
}

// Unset lists are written as `null` by some config generators.
fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let list: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(list.unwrap_or_default())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub debug: bool,
    pub filter: FilterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            debug: false,
            filter: FilterConfig::default(),
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unexpected config parameter {0}")]
    UnexpectedParameter(String),
    #[error("unbalanced braces in config block")]
    UnbalancedBlock,
    #[error("invalid JSON config: {0}")]
    Json(String),
    #[error("cannot read config file {path}: {message}")]
    Read { path: String, message: String },
}

/// What the next bare value in a config block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Idle,
    DbPath,
    LogPath,
    AllowCountries,
    DenyCountries,
}

impl Directive {
    fn keyword(token: &str) -> Option<Self> {
        match token {
            "db_path" => Some(Self::DbPath),
            "log_path" => Some(Self::LogPath),
            "allow_countries" => Some(Self::AllowCountries),
            "deny_countries" => Some(Self::DenyCountries),
            _ => None,
        }
    }
}

impl FilterConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Json(e.to_string()))
    }

    /// Parse a directive block:
    ///
    /// ```text
    /// geo_gate {
    ///     db_path /var/lib/GeoIP/GeoLite2-Country.mmdb
    ///     allow_countries US CA
    ///     log_path /var/log/geo-gate.log
    /// }
    /// ```
    ///
    /// The `name { ... }` wrapper is optional. `db_path` and `log_path` take
    /// one value; the country directives take every value up to the next
    /// keyword and may be repeated.
    pub fn from_block(text: &str) -> Result<Self, ConfigError> {
        let tokens: Vec<&str> = text
            .lines()
            .flat_map(|line| {
                line.split_whitespace()
                    .take_while(|tok| !tok.starts_with('#'))
            })
            .collect();

        let body = match tokens.iter().position(|t| *t == "{") {
            Some(open) if open <= 1 && tokens.last() == Some(&"}") => {
                &tokens[open + 1..tokens.len() - 1]
            }
            Some(_) => return Err(ConfigError::UnbalancedBlock),
            None => &tokens[..],
        };

        if body.iter().any(|t| *t == "{" || *t == "}") {
            return Err(ConfigError::UnbalancedBlock);
        }

        let mut cfg = Self::default();
        let mut directive = Directive::Idle;

        for &token in body {
            if let Some(next) = Directive::keyword(token) {
                directive = next;
                continue;
            }

            directive = match directive {
                Directive::DbPath => {
                    cfg.db_path = token.to_string();
                    Directive::Idle
                }
                Directive::LogPath => {
                    cfg.log_path = Some(token.to_string());
                    Directive::Idle
                }
                Directive::AllowCountries => {
                    cfg.allow_countries.push(token.to_string());
                    directive
                }
                Directive::DenyCountries => {
                    cfg.deny_countries.push(token.to_string());
                    directive
                }
                Directive::Idle => {
                    return Err(ConfigError::UnexpectedParameter(token.to_string()));
                }
            };
        }

        Ok(cfg)
    }

    /// Load from a file: `.json` as JSON, anything else as a directive block.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text),
            _ => Self::from_block(&text),
        }
    }
}

fn country_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Build the configuration from a variable lookup.
///
/// `GEOGATE_CONFIG` names a filter config file; the individual
/// `GEOGATE_*` filter variables override whatever it sets.
pub fn load_config_from<F>(var: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let listen_addr = var("GEOGATE_LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());

    let debug = var("DEBUG").is_some();

    let mut filter = match var("GEOGATE_CONFIG") {
        Some(path) => FilterConfig::from_file(path)?,
        None => FilterConfig::default(),
    };

    if let Some(db_path) = var("GEOGATE_DB_PATH") {
        filter.db_path = db_path;
    }

    if let Some(log_path) = var("GEOGATE_LOG_PATH") {
        filter.log_path = Some(log_path).filter(|p| !p.is_empty());
    }

    if let Some(allow) = var("GEOGATE_ALLOW_COUNTRIES") {
        filter.allow_countries = country_list(&allow);
    }

    if let Some(deny) = var("GEOGATE_DENY_COUNTRIES") {
        filter.deny_countries = country_list(&deny);
    }

    Ok(Config {
        listen_addr,
        debug,
        filter,
    })
}
