//! Server settings loaded via OrthoConfig, and the resolved server config.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use running_late::domain::RunLifecycleConfig;
use running_late::outbound::persistence::DbPool;
use running_late::outbound::routes_api::{DEFAULT_ROUTES_ENDPOINT, GoogleRoutesProvider};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Upper bound on `provisional_arrival_hours`: one leap year.
pub const MAX_PROVISIONAL_ARRIVAL_HOURS: i64 = 24 * 366;

/// Settings read from `RUNLATE_*` variables, config files, and CLI flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RUNLATE")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-process store is used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Google Routes API key; the fixture provider is used when absent.
    pub routes_api_key: Option<String>,
    /// Override for the `computeRoutes` endpoint.
    pub routes_endpoint: Option<String>,
    /// Deadline for a single route lookup, in milliseconds.
    #[ortho_config(default = 10000)]
    pub route_timeout_ms: u64,
    /// Target arrival offset used when a run names no arrival time.
    #[ortho_config(default = 24)]
    pub provisional_arrival_hours: i64,
}

/// Invalid values in [`ServerSettings`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("bind address {value:?} is not a socket address")]
    BindAddr { value: String },
    #[error("routes endpoint {value:?} is not a URL")]
    RoutesEndpoint { value: String },
    #[error("{field} must be positive")]
    NotPositive { field: &'static str },
    #[error("{field} must not exceed {max}")]
    TooLarge { field: &'static str, max: i64 },
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::BindAddr {
            value: raw.to_owned(),
        })
    }

    pub fn routes_endpoint(&self) -> Result<Url, SettingsError> {
        let raw = self
            .routes_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_ROUTES_ENDPOINT);
        Url::parse(raw).map_err(|_| SettingsError::RoutesEndpoint {
            value: raw.to_owned(),
        })
    }

    pub fn route_timeout(&self) -> Result<Duration, SettingsError> {
        if self.route_timeout_ms == 0 {
            return Err(SettingsError::NotPositive {
                field: "route_timeout_ms",
            });
        }
        Ok(Duration::from_millis(self.route_timeout_ms))
    }

    pub fn lifecycle_config(&self) -> Result<RunLifecycleConfig, SettingsError> {
        const FIELD: &str = "provisional_arrival_hours";
        let too_large = SettingsError::TooLarge {
            field: FIELD,
            max: MAX_PROVISIONAL_ARRIVAL_HOURS,
        };
        if self.provisional_arrival_hours <= 0 {
            return Err(SettingsError::NotPositive { field: FIELD });
        }
        if self.provisional_arrival_hours > MAX_PROVISIONAL_ARRIVAL_HOURS {
            return Err(too_large);
        }
        let provisional_arrival =
            chrono::TimeDelta::try_hours(self.provisional_arrival_hours).ok_or(too_large)?;
        Ok(RunLifecycleConfig::default()
            .with_route_timeout(self.route_timeout()?)
            .with_provisional_arrival(provisional_arrival))
    }
}

/// Resolved server dependencies.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) lifecycle: RunLifecycleConfig,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) route_provider: Option<Arc<GoogleRoutesProvider>>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            lifecycle: RunLifecycleConfig::default(),
            db_pool: None,
            route_provider: None,
        }
    }

    #[must_use]
    pub fn with_lifecycle(mut self, lifecycle: RunLifecycleConfig) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Use Diesel repositories backed by `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Use the Google Routes API instead of the fixture provider.
    #[must_use]
    pub fn with_route_provider(mut self, provider: GoogleRoutesProvider) -> Self {
        self.route_provider = Some(Arc::new(provider));
        self
    }
}
