//! Shared fixtures for the run lifecycle integration suites.

#![allow(dead_code, reason = "each suite uses a different subset")]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use running_late::domain::ports::{
    AccountCommand, RegisterAccountRequest, RouteProvider, RouteProviderError,
};
use running_late::domain::{Credential, DisplayName, Email, LatLng, RouteResult};

pub const ROUTED_DISTANCE: u32 = 1500;

/// Clock frozen at one instant.
pub struct FrozenClock(pub DateTime<Utc>);

impl FrozenClock {
    pub fn morning() -> Self {
        Self(
            Utc.with_ymd_and_hms(2026, 3, 1, 7, 30, 0)
                .single()
                .expect("valid timestamp"),
        )
    }
}

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Route provider replaying queued outcomes, then succeeding.
#[derive(Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<RouteResult, RouteProviderError>>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn failing_once(error: RouteProviderError) -> Self {
        let provider = Self::default();
        provider.push(Err(error));
        provider
    }

    pub fn push(&self, outcome: Result<RouteResult, RouteProviderError>) {
        self.script
            .lock()
            .expect("script lock poisoned")
            .push_back(outcome);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RouteProvider for ScriptedProvider {
    async fn compute_route(
        &self,
        _origin: LatLng,
        _destination: LatLng,
    ) -> Result<RouteResult, RouteProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .expect("script lock poisoned")
            .pop_front();
        next.unwrap_or_else(|| Ok(RouteResult::new(ROUTED_DISTANCE, "_p~iF~ps|U")))
    }
}

/// Route provider that never answers in time.
pub struct StalledProvider;

#[async_trait]
impl RouteProvider for StalledProvider {
    async fn compute_route(
        &self,
        _origin: LatLng,
        _destination: LatLng,
    ) -> Result<RouteResult, RouteProviderError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(RouteResult::new(1, "late"))
    }
}

pub fn email(raw: &str) -> Email {
    Email::new(raw).expect("valid email")
}

pub fn point(lat: f64, lng: f64) -> LatLng {
    LatLng::new(lat, lng).expect("valid coordinates")
}

pub async fn register(accounts: &dyn AccountCommand, raw_email: &str) {
    accounts
        .register(RegisterAccountRequest {
            email: email(raw_email),
            display_name: DisplayName::new("Runner").expect("valid name"),
            credential: Credential::new("secret").expect("valid credential"),
        })
        .await
        .expect("account registers");
}
