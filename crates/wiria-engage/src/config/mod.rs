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

/// Top-level configuration for the gateway.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub backend: BackendConfig,
    pub organization: OrganizationConfig,
    pub emailjs: Option<EmailJsConfig>,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            backend: BackendConfig::from_env()?,
            organization: OrganizationConfig::from_env(),
            emailjs: EmailJsConfig::from_env(),
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

/// Where the organization's REST backend lives and how long we wait for it.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
    pub health_timeout_ms: u64,
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("WIRIA_BACKEND_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000/api".to_string());
        let request_timeout_ms = parse_millis("WIRIA_BACKEND_TIMEOUT_MS", 30_000)?;
        let health_timeout_ms = parse_millis("WIRIA_HEALTH_TIMEOUT_MS", 5_000)?;

        Ok(Self {
            base_url,
            request_timeout_ms,
            health_timeout_ms,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.health_timeout_ms)
    }
}

/// Contact points used for the offline WhatsApp/mailto handoff links.
#[derive(Debug, Clone)]
pub struct OrganizationConfig {
    pub whatsapp_number: String,
    pub contact_email: String,
}

impl OrganizationConfig {
    fn from_env() -> Self {
        Self {
            whatsapp_number: env::var("WIRIA_WHATSAPP_NUMBER")
                .unwrap_or_else(|_| "254700000000".to_string()),
            contact_email: env::var("WIRIA_CONTACT_EMAIL")
                .unwrap_or_else(|_| "info@wiria.or.ke".to_string()),
        }
    }
}

/// Transactional email provider credentials. Absent as a block when the
/// service id or public key is not configured, which disables the email
/// fallback channel.
#[derive(Debug, Clone)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub public_key: String,
    pub contact_template: String,
    pub safeguarding_template: String,
    pub newsletter_template: String,
}

impl EmailJsConfig {
    fn from_env() -> Option<Self> {
        let service_id = env::var("EMAILJS_SERVICE_ID").ok()?;
        let public_key = env::var("EMAILJS_PUBLIC_KEY").ok()?;

        Some(Self {
            service_id,
            public_key,
            contact_template: env::var("EMAILJS_CONTACT_TEMPLATE")
                .unwrap_or_else(|_| "contact_form".to_string()),
            safeguarding_template: env::var("EMAILJS_SAFEGUARDING_TEMPLATE")
                .unwrap_or_else(|_| "safeguarding_report".to_string()),
            newsletter_template: env::var("EMAILJS_NEWSLETTER_TEMPLATE")
                .unwrap_or_else(|_| "newsletter_signup".to_string()),
        })
    }
}

fn parse_millis(var: &str, default: u64) -> Result<u64, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw.parse::<u64>().map_err(|_| ConfigError::InvalidMillis {
            var: var.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMillis { var: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMillis { var } => {
                write!(f, "{var} must be a duration in whole milliseconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidMillis { .. } => None,
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
        for var in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "WIRIA_BACKEND_URL",
            "WIRIA_BACKEND_TIMEOUT_MS",
            "WIRIA_HEALTH_TIMEOUT_MS",
            "WIRIA_WHATSAPP_NUMBER",
            "WIRIA_CONTACT_EMAIL",
            "EMAILJS_SERVICE_ID",
            "EMAILJS_PUBLIC_KEY",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8000/api");
        assert_eq!(config.backend.health_timeout(), Duration::from_secs(5));
        assert!(config.emailjs.is_none());
    }

    #[test]
    fn email_provider_requires_service_id_and_key() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("EMAILJS_SERVICE_ID", "service_wiria");
        let config = AppConfig::load().expect("config loads");
        assert!(config.emailjs.is_none(), "public key still missing");

        env::set_var("EMAILJS_PUBLIC_KEY", "pk_test");
        let config = AppConfig::load().expect("config loads");
        let emailjs = config.emailjs.expect("email block present");
        assert_eq!(emailjs.service_id, "service_wiria");
        assert_eq!(emailjs.contact_template, "contact_form");
        reset_env();
    }

    #[test]
    fn rejects_unparseable_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("WIRIA_BACKEND_TIMEOUT_MS", "soon");
        let error = AppConfig::load().expect_err("timeout must be numeric");
        assert!(matches!(error, ConfigError::InvalidMillis { .. }));
        reset_env();
    }
}
