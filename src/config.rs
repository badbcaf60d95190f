//! Environment-driven configuration
//!
//! Values come from the process environment (the binary loads `.env`
//! first via dotenvy). `Config::from_lookup` takes any key lookup so tests
//! never touch the real environment.

use std::path::PathBuf;
use std::str::FromStr;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which chart store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// Flat `users.json` file (default)
    #[default]
    Json,
    /// SQLite database file
    Sqlite,
    /// Volatile, lost on exit
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" | "file" => Ok(Self::Json),
            "sqlite" | "sqlite3" | "db" => Ok(Self::Sqlite),
            "memory" | "mem" => Ok(Self::Memory),
            _ => Err(format!(
                "invalid store '{}', expected one of: json, sqlite, memory",
                s
            )),
        }
    }
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Sqlite => write!(f, "sqlite"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Advice service settings.
#[derive(Clone)]
pub struct AdviceConfig {
    /// Full chat-completions endpoint URL. Unset disables advice.
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            model: "sonar".to_string(),
            max_tokens: 1000,
            temperature: 0.7,
            timeout_secs: 60,
        }
    }
}

impl std::fmt::Debug for AdviceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Top-level configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub store: StoreKind,
    /// Static files served at `/` when the directory exists
    pub public_dir: PathBuf,
    pub advice: AdviceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            data_dir: PathBuf::from("data"),
            store: StoreKind::default(),
            public_dir: PathBuf::from("public"),
            advice: AdviceConfig::default(),
        }
    }
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            port: parse_or(&get, "PORT", defaults.port)?,
            data_dir: get("SKINCHART_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            store: parse_or(&get, "SKINCHART_STORE", defaults.store)?,
            public_dir: get("SKINCHART_PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
            advice: AdviceConfig {
                api_url: get("PERPLEXITY_API_URL"),
                api_key: get("PERPLEXITY_API_KEY"),
                model: get("PERPLEXITY_MODEL").unwrap_or(defaults.advice.model),
                max_tokens: parse_or(&get, "PERPLEXITY_MAX_TOKENS", defaults.advice.max_tokens)?,
                temperature: parse_or(&get, "PERPLEXITY_TEMPERATURE", defaults.advice.temperature)?,
                timeout_secs: parse_or(&get, "PERPLEXITY_TIMEOUT_SECS", defaults.advice.timeout_secs)?,
            },
        })
    }

    /// Path of the flat JSON chart file
    pub fn json_store_path(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }

    /// Path of the SQLite database
    pub fn sqlite_store_path(&self) -> PathBuf {
        self.data_dir.join("skinchart.db")
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
