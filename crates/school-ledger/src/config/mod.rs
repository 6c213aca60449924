use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::enrollment::import::{read_fee_schedule_from_path, ImportError};
use crate::enrollment::{FeeSchedule, LicenseClass};

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
    pub ledger: LedgerConfig,
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
            ledger: LedgerConfig::load()?,
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

/// Fee table and seed data for the candidate ledgers.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub fees: FeeSchedule,
    pub schools_csv: Option<PathBuf>,
}

impl LedgerConfig {
    /// `LEDGER_FEES_CSV` replaces the standard table; `LEDGER_FEE_<CODE>`
    /// overrides single classes on top of whichever table was chosen.
    fn load() -> Result<Self, ConfigError> {
        let mut fees = match env::var_os("LEDGER_FEES_CSV") {
            Some(path) => read_fee_schedule_from_path(PathBuf::from(path))
                .map_err(|source| ConfigError::FeeTable { source })?,
            None => FeeSchedule::standard(),
        };

        for class in LicenseClass::ordered() {
            let key = fee_override_key(class);
            if let Ok(raw) = env::var(&key) {
                let amount = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidFee { key, value: raw })?;
                fees = fees.with_fee(class, amount);
            }
        }

        let schools_csv = env::var_os("LEDGER_SCHOOLS_CSV").map(PathBuf::from);

        Ok(Self { fees, schools_csv })
    }
}

fn fee_override_key(class: LicenseClass) -> String {
    format!("LEDGER_FEE_{}", class.code())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFee { key: String, value: String },
    FeeTable { source: ImportError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFee { key, value } => {
                write!(f, "{key} must be a non-negative integer, got '{value}'")
            }
            ConfigError::FeeTable { source } => {
                write!(f, "LEDGER_FEES_CSV could not be loaded: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidFee { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::FeeTable { source } => Some(source),
        }
    }
}
