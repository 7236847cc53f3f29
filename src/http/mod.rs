//! HTTP listener module.
//!
//! Plain HTTP/1.1 only; TLS is terminated in front of this process when needed.
//!
//! The server includes:
//! - One task per accepted connection, with keep-alive and pipelining
//! - Header read timeout for clients that never finish a request
//! - Graceful shutdown on SIGTERM/SIGINT

mod server;
mod shutdown;

pub use server::{start_server, Server, ServerError};
