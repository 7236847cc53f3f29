//! Configuration loading and constants.
//!
//! Loads application configuration from an optional TOML file and defines the
//! constants for the welcome body, cache headers, timeouts, logging and default
//! paths. `AppConfig` is the root configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

// =============================================================================
// Response Body
// =============================================================================

/// Body returned for the root path. Fixed at build time.
pub const WELCOME_MESSAGE: &str = "Hello Loco! Welcome to my multi-stage scalable Docker Kubernetes application. Its designed for seamless deployment and scaling in Kubernetes.";

/// The only path with a registered route
pub const ROOT_PATH: &str = "/";

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// The welcome body never changes for the lifetime of a build, so upstream
// caches may hold it briefly. 404s get a short TTL so a misrouted probe
// recovers quickly once fixed upstream.

/// Root reply freshness in seconds
pub const HTTP_CACHE_ROOT_MAX_AGE: u32 = 60;

/// Not-found reply freshness in seconds
pub const HTTP_CACHE_NOT_FOUND_MAX_AGE: u32 = 5;

pub const CACHE_CONTROL_ROOT: &str = formatcp!("public, max-age={}", HTTP_CACHE_ROOT_MAX_AGE);

pub const CACHE_CONTROL_NOT_FOUND: &str =
    formatcp!("public, max-age={}", HTTP_CACHE_NOT_FOUND_MAX_AGE);

// =============================================================================
// Connection Constants
// =============================================================================

/// Backoff in milliseconds after a failed accept (e.g. file descriptor exhaustion)
pub const ACCEPT_ERROR_BACKOFF_MS: u64 = 100;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path, used only if it exists
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_PORT: u16 = 80;

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "hello_loco=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Serve more than one request per connection (default: true)
    #[serde(default = "HttpServerConfig::default_keep_alive")]
    pub keep_alive: bool,
    /// Time allowed for a client to send a complete request head (default: 30)
    #[serde(default = "HttpServerConfig::default_header_read_timeout")]
    pub header_read_timeout_seconds: u64,
    /// Time in-flight connections get to finish after a shutdown signal (default: 30)
    #[serde(default = "HttpServerConfig::default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            keep_alive: Self::default_keep_alive(),
            header_read_timeout_seconds: Self::default_header_read_timeout(),
            shutdown_grace_seconds: Self::default_shutdown_grace(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_PORT
    }

    fn default_keep_alive() -> bool {
        true
    }

    fn default_header_read_timeout() -> u64 {
        30
    }

    fn default_shutdown_grace() -> u64 {
        30
    }

    /// Resolve host and port into a socket address.
    ///
    /// The host must be an IP literal; name resolution belongs to whoever
    /// launches the process.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "http.host must be an IP address, got '{}'",
                self.host
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else `DEFAULT_CONFIG_PATH` if it exists, else defaults.
    ///
    /// An explicitly requested file that is missing is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.http.socket_addr()?;

        if self.http.header_read_timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "http.header_read_timeout_seconds must be at least 1".to_string(),
            ));
        }

        match self.logging.format.as_str() {
            "text" | "json" => {}
            other => {
                return Err(ConfigError::Validation(format!(
                    "logging.format must be \"text\" or \"json\", got '{}'",
                    other
                )))
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
