//! Request middleware.
//!
//! Purpose: attach a correlation identifier and request span to every HTTP
//! request.

pub mod trace;

pub use trace::{TRACE_ID_HEADER, Trace};
