use crate::error::{Result, ValenceError};
use reqwest::blocking::{Client, ClientBuilder};
use std::path::PathBuf;
use std::time::Duration;

/// Log file used when logging is enabled without an explicit path
pub const DEFAULT_LOG_FILE: &str = "valence.log";

/// Create the default HTTP client for API requests
/// with optimized settings for connection pooling and timeouts
pub fn create_rest_client() -> Client {
    ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(Duration::from_secs(300)) // 5 minutes
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create HTTP client")
}

/// Create the HTTP client for file transfers with longer timeout
pub fn create_transfer_client() -> Client {
    ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(Duration::from_secs(3600)) // 1 hour
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create transfer HTTP client")
}

/// Which requests get appended to the request log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// No request logging
    #[default]
    Off,
    /// Only POST, PUT and DELETE JSON requests
    Mutations,
    /// Every request, file transfers included
    All,
}

impl LogMode {
    /// Whether a JSON request with this verb should be logged
    pub fn logs_request(&self, method: &str) -> bool {
        match self {
            LogMode::Off => false,
            LogMode::Mutations => matches!(method, "POST" | "PUT" | "DELETE"),
            LogMode::All => true,
        }
    }

    /// Whether a file transfer should be logged
    pub fn logs_transfer(&self) -> bool {
        *self == LogMode::All
    }
}

/// Configuration for a Valence session
#[derive(Clone)]
pub struct Config {
    /// URL scheme (http or https)
    pub scheme: String,
    /// LMS host
    pub host: String,
    /// Explicit port, `None` for the scheme default
    pub port: Option<u16>,
    /// Application ID issued by the vendor
    pub app_id: String,
    /// Application key issued by the vendor
    pub app_key: String,
    /// User ID of the service account
    pub user_id: String,
    /// User key of the service account
    pub user_key: String,
    /// Terminate the process on any non-2xx response
    pub exit_on_error: bool,
    /// Return a course handle instead of a record from course creation
    pub return_object_on_create: bool,
    /// Request logging mode
    pub log_mode: LogMode,
    /// Request log path, `valence.log` when unset
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scheme: "https".to_string(),
            host: "localhost".to_string(),
            port: None,
            app_id: String::new(),
            app_key: String::new(),
            user_id: String::new(),
            user_key: String::new(),
            exit_on_error: true,
            return_object_on_create: false,
            log_mode: LogMode::Off,
            log_file: None,
        }
    }
}

impl Config {
    /// Create a new configuration with the given scheme and host
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Config {
            scheme: scheme.into(),
            host: host.into(),
            ..Config::default()
        }
    }

    /// Read the configuration from the `D2L_VALENCE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ValenceError::MissingEnv(name.to_string()))
        };

        let port = match lookup("D2L_VALENCE_PORT").filter(|v| !v.is_empty()) {
            Some(port) => Some(port.parse::<u16>().map_err(|_| {
                ValenceError::Other(format!("invalid D2L_VALENCE_PORT: {}", port))
            })?),
            None => None,
        };

        Ok(Config {
            scheme: lookup("D2L_VALENCE_SCHEME")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "https".to_string()),
            host: required("D2L_VALENCE_HOST")?,
            port,
            app_id: required("D2L_VALENCE_APP_ID")?,
            app_key: required("D2L_VALENCE_APP_KEY")?,
            user_id: required("D2L_VALENCE_USER_ID")?,
            user_key: required("D2L_VALENCE_USER_KEY")?,
            ..Config::default()
        })
    }

    /// Set application credentials
    pub fn with_app(mut self, app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self.app_key = app_key.into();
        self
    }

    /// Set user credentials
    pub fn with_user(mut self, user_id: impl Into<String>, user_key: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self.user_key = user_key.into();
        self
    }

    /// Set an explicit port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the exit-on-error policy
    pub fn with_exit_on_error(mut self, exit_on_error: bool) -> Self {
        self.exit_on_error = exit_on_error;
        self
    }

    /// Return course handles from course creation
    pub fn with_return_object_on_create(mut self, enabled: bool) -> Self {
        self.return_object_on_create = enabled;
        self
    }

    /// Enable request logging
    pub fn with_logging(mut self, mode: LogMode, file: Option<PathBuf>) -> Self {
        self.log_mode = mode;
        self.log_file = file;
        self
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme, self.host, port),
            None => format!("{}://{}", self.scheme, self.host),
        }
    }
}

// Keys stay out of debug output
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("user_key", &"<redacted>")
            .field("exit_on_error", &self.exit_on_error)
            .field("return_object_on_create", &self.return_object_on_create)
            .field("log_mode", &self.log_mode)
            .field("log_file", &self.log_file)
            .finish()
    }
}
