//! HTTP surface for the converters.
//!
//! Exposes the request extractors, error mapping, configuration and the demo
//! routes so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod extract;
pub mod response;
pub mod routes;
pub mod state;
