//! LeafLoop API server library.
//!
//! Exposes the response envelopes, error handling, configuration, middleware
//! and routes so integration tests and the binary entrypoint can both access
//! them.

pub mod config;
pub mod error;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
