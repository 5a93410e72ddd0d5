//! Shared helpers for the adapters.

pub mod headers;
pub mod json;
