//! Running Late backend library.
//!
//! Domain model and services live in [`domain`]; HTTP handlers in
//! [`inbound`]; database, in-memory, and route provider adapters in
//! [`outbound`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
