//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: in-process run store used when no database is configured.
//! - **routes_api**: HTTP route provider for the Google Routes API.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod routes_api;
