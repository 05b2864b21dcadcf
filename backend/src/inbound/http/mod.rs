//! HTTP inbound adapter exposing the REST endpoints under `/api/v1`.

use actix_web::web;

pub mod accounts;
pub mod cache_control;
pub mod error;
pub mod health;
pub mod route_lookup;
pub mod runs;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// Mount inside `web::scope("/api/v1")` together with [`json_config`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(runs::start_run)
        .service(runs::resolve_run_route)
        .service(runs::end_run)
        .service(runs::run_status)
        .service(accounts::register_account)
        .service(accounts::account_profile)
        .service(route_lookup::compute_route);
}

/// JSON extractor settings mapping malformed bodies to `InvalidRequest`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(error::json_error_handler)
}
