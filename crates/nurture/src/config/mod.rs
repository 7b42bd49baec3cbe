use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

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

/// Top-level configuration for the platform.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub research: ResearchConfig,
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

        let research = ResearchConfig::from_env()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            research,
        })
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Upstream bibliographic source settings.
///
/// The base URLs exist so tests and demos can point the adapters at a local
/// stub instead of the live services.
#[derive(Debug, Clone)]
pub struct ResearchConfig {
    pub ncbi_api_key: Option<String>,
    pub pubmed_base_url: String,
    pub doaj_base_url: String,
    pub source_timeout: Duration,
}

impl ResearchConfig {
    const DEFAULT_PUBMED_BASE_URL: &'static str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
    const DEFAULT_DOAJ_BASE_URL: &'static str = "https://doaj.org/api/v2";
    const DEFAULT_SOURCE_TIMEOUT_MS: u64 = 10_000;

    fn from_env() -> Result<Self, ConfigError> {
        let ncbi_api_key = env::var("NCBI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let pubmed_base_url = env::var("APP_PUBMED_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_PUBMED_BASE_URL.to_string());
        let doaj_base_url = env::var("APP_DOAJ_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_DOAJ_BASE_URL.to_string());

        let source_timeout = match env::var("APP_SOURCE_TIMEOUT_MS") {
            Ok(raw) => Duration::from_millis(
                raw.parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout)?,
            ),
            Err(_) => Duration::from_millis(Self::DEFAULT_SOURCE_TIMEOUT_MS),
        };

        Ok(Self {
            ncbi_api_key,
            pubmed_base_url,
            doaj_base_url,
            source_timeout,
        })
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            ncbi_api_key: None,
            pubmed_base_url: Self::DEFAULT_PUBMED_BASE_URL.to_string(),
            doaj_base_url: Self::DEFAULT_DOAJ_BASE_URL.to_string(),
            source_timeout: Duration::from_millis(Self::DEFAULT_SOURCE_TIMEOUT_MS),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidTimeout,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidTimeout => {
                write!(f, "APP_SOURCE_TIMEOUT_MS must be a millisecond count")
            }
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTimeout => None,
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
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("NCBI_API_KEY");
        env::remove_var("APP_PUBMED_BASE_URL");
        env::remove_var("APP_DOAJ_BASE_URL");
        env::remove_var("APP_SOURCE_TIMEOUT_MS");
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
        assert!(config.research.ncbi_api_key.is_none());
        assert_eq!(
            config.research.source_timeout,
            Duration::from_millis(ResearchConfig::DEFAULT_SOURCE_TIMEOUT_MS)
        );
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_SOURCE_TIMEOUT_MS", "soon");
        let error = AppConfig::load().expect_err("timeout must be numeric");
        assert!(matches!(error, ConfigError::InvalidTimeout));
    }

    #[test]
    fn blank_api_key_is_treated_as_absent() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("NCBI_API_KEY", "   ");
        let config = AppConfig::load().expect("config loads");
        assert!(config.research.ncbi_api_key.is_none());
    }
}
