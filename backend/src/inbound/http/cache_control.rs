//! Shared cache-control policies for HTTP handlers.

/// Run state changes with every lifecycle call; never cache it.
pub const NO_STORE: &str = "no-store";

/// Build the cache-control header tuple for run state and probe responses.
pub const fn no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", NO_STORE)
}
