//! Listener and per-connection accept loop.
//!
//! `Server::bind` acquires the socket, `Server::run` accepts connections until
//! a shutdown signal arrives. Each accepted connection is served by its own
//! task using hyper's HTTP/1.1 implementation, with the axum router as the
//! service. Requests pipelined on one connection are answered in order.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::server::graceful::GracefulShutdown;
use hyper_util::service::TowerToHyperService;
use tokio::net::{TcpListener, TcpStream};
use tracing::Instrument;

use crate::config::{AppConfig, ConfigError, HttpServerConfig, ACCEPT_ERROR_BACKOFF_MS};

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A bound listener together with the router it serves.
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    app: Router,
    keep_alive: bool,
    header_read_timeout: Duration,
    shutdown_grace: Duration,
}

impl Server {
    /// Bind the configured address.
    ///
    /// Fails when the address is already in use or the port needs privileges
    /// the process lacks. There is no retry.
    pub async fn bind(config: &HttpServerConfig, app: Router) -> Result<Self, ServerError> {
        let addr = config.socket_addr()?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;

        tracing::info!(
            addr = %local_addr,
            keep_alive = config.keep_alive,
            header_read_timeout_seconds = config.header_read_timeout_seconds,
            "Listener bound"
        );

        Ok(Self {
            listener,
            local_addr,
            app,
            keep_alive: config.keep_alive,
            header_read_timeout: Duration::from_secs(config.header_read_timeout_seconds),
            shutdown_grace: Duration::from_secs(config.shutdown_grace_seconds),
        })
    }

    /// Address actually bound, which differs from the configured one when port 0 was requested.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until SIGINT or SIGTERM, then drain open connections.
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(shutdown::shutdown_signal()).await
    }

    /// Serve until `signal` resolves, then drain open connections.
    ///
    /// Connections still open after the grace period are abandoned.
    pub async fn run_until<F>(self, signal: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        let graceful = GracefulShutdown::new();
        tokio::pin!(signal);

        loop {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => self.spawn_connection(stream, peer, &graceful),
                    Err(e) => {
                        // Usually fd exhaustion; back off so the loop does not spin
                        tracing::warn!(error = %e, "Failed to accept connection");
                        tokio::time::sleep(Duration::from_millis(ACCEPT_ERROR_BACKOFF_MS)).await;
                    }
                },
                () = &mut signal => {
                    tracing::info!("Shutdown requested, no longer accepting connections");
                    break;
                }
            }
        }

        let grace = self.shutdown_grace;
        drop(self.listener);

        tokio::select! {
            () = graceful.shutdown() => {
                tracing::info!("All connections closed");
            }
            () = tokio::time::sleep(grace) => {
                tracing::warn!(
                    grace_seconds = grace.as_secs(),
                    "Grace period elapsed with connections still open"
                );
            }
        }

        Ok(())
    }

    fn spawn_connection(&self, stream: TcpStream, peer: SocketAddr, graceful: &GracefulShutdown) {
        let service = TowerToHyperService::new(self.app.clone());

        let mut builder = http1::Builder::new();
        builder
            .timer(TokioTimer::new())
            .keep_alive(self.keep_alive)
            .header_read_timeout(self.header_read_timeout);

        let connection = graceful.watch(builder.serve_connection(TokioIo::new(stream), service));
        let span = tracing::debug_span!("connection", peer = %peer);

        tokio::spawn(
            async move {
                tracing::trace!("Connection accepted");
                // Resets, timeouts and malformed requests end up here. They
                // only ever close this connection.
                if let Err(err) = connection.await {
                    tracing::debug!(error = %err, "Connection closed with error");
                }
            }
            .instrument(span),
        );
    }
}

/// Bind the configured address and serve until shutdown.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    Server::bind(&config.http, app).await?.run().await
}
