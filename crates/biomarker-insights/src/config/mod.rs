use crate::dashboard::ScoringConfig;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub data: DataConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let data = DataConfig {
            biomarkers_path: path_var("BIOMARKERS_PATH", "data/biomarkers.json"),
            results_path: path_var("RESULTS_PATH", "data/results.json"),
            notes_path: env::var("NOTES_PATH")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
        };

        let defaults = ScoringConfig::default();
        let scoring = ScoringConfig {
            severe_deviation_threshold: number_var(
                "SCORE_SEVERE_THRESHOLD",
                defaults.severe_deviation_threshold,
            )?,
            in_range_slope: number_var("SCORE_IN_RANGE_SLOPE", defaults.in_range_slope)?,
            out_of_range_slope: number_var(
                "SCORE_OUT_OF_RANGE_SLOPE",
                defaults.out_of_range_slope,
            )?,
            degenerate_range_deviation: number_var(
                "SCORE_DEGENERATE_DEVIATION",
                defaults.degenerate_range_deviation,
            )?,
            max_priority_items: number_var("PRIORITY_MAX_ITEMS", defaults.max_priority_items)?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            data,
            scoring,
        })
    }
}

fn path_var(key: &str, default: &str) -> PathBuf {
    PathBuf::from(env::var(key).unwrap_or_else(|_| default.to_string()))
}

fn number_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Source files for the biomarker catalogue and results, plus optional note persistence.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub biomarkers_path: PathBuf,
    pub results_path: PathBuf,
    /// Notes stay in memory when unset.
    pub notes_path: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a valid number, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "BIOMARKERS_PATH",
            "RESULTS_PATH",
            "NOTES_PATH",
            "SCORE_SEVERE_THRESHOLD",
            "SCORE_IN_RANGE_SLOPE",
            "SCORE_OUT_OF_RANGE_SLOPE",
            "SCORE_DEGENERATE_DEVIATION",
            "PRIORITY_MAX_ITEMS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.data.biomarkers_path, PathBuf::from("data/biomarkers.json"));
        assert_eq!(config.data.results_path, PathBuf::from("data/results.json"));
        assert!(config.data.notes_path.is_none());
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn scoring_overrides_are_read_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SCORE_SEVERE_THRESHOLD", "1.5");
        env::set_var("PRIORITY_MAX_ITEMS", "3");
        env::set_var("NOTES_PATH", "/tmp/notes.json");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.scoring.severe_deviation_threshold, 1.5);
        assert_eq!(config.scoring.max_priority_items, 3);
        assert_eq!(config.scoring.in_range_slope, 20.0);
        assert_eq!(config.data.notes_path, Some(PathBuf::from("/tmp/notes.json")));
        reset_env();
    }

    #[test]
    fn invalid_numbers_name_the_variable() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SCORE_IN_RANGE_SLOPE", "steep");
        let error = AppConfig::load().expect_err("invalid slope rejected");
        assert!(error.to_string().starts_with("SCORE_IN_RANGE_SLOPE"));
        reset_env();
    }
}
