//! hello-loco: a minimal HTTP responder.
//!
//! Answers `/` with a fixed welcome string and every other path with 404.
//! Meant to sit behind an orchestrator as a reachability placeholder.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::AppError;
