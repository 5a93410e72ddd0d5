pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
pub mod graphql;
mod main_lib;

pub use main_lib::{build_state, build_state_with_factory, init_tracing, AppState};
