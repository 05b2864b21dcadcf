//! Google Routes API outbound adapter.
//!
//! Implements the `RouteProvider` port with a single `computeRoutes` call per
//! lookup.

mod dto;
mod http_provider;

pub use http_provider::{DEFAULT_ROUTES_ENDPOINT, GoogleRoutesProvider, ROUTES_FIELD_MASK};
