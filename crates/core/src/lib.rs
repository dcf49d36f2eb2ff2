//! Domain primitives shared by every LeafLoop crate.
//!
//! Holds the domain error type and the structured field-error shape carried
//! by failed API responses. Nothing here depends on HTTP.

pub mod error;
pub mod types;
pub mod validation;
