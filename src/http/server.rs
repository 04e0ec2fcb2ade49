//! HTTP server setup and lifecycle.
//!
//! # Responsibilities
//! - Resolve settings (option > env > default)
//! - Create the Axum router with the two probe routes
//! - Wire up middleware (tracing, read/write timeouts)
//! - Bind the listener and serve connections through hyper
//! - Graceful shutdown bounded by a caller deadline

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use axum::{http::StatusCode, routing::get, Router};
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::server::graceful::GracefulShutdown;
use hyper_util::service::TowerToHyperService;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    timeout::{RequestBodyTimeoutLayer, TimeoutLayer},
    trace::TraceLayer,
};

use crate::config::{HttpSettings, Overrides, ServerSettings};
use crate::health::Checks;
use crate::http::handlers;
use crate::lifecycle::{Phase, Shutdown};
use crate::observability::logging::{Logger, TracingLogger};

/// Errors returned by [`ReadyServer::run`] and [`ReadyServer::halt`].
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be bound.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    /// The listener failed in a way that cannot be retried.
    #[error("failed to accept connection: {0}")]
    Accept(std::io::Error),

    /// `run` was called on a server that is already serving or was halted.
    #[error("server is already running or has been halted")]
    Closed,

    /// The deadline passed while requests were still in flight.
    #[error("shutdown deadline exceeded with requests still in flight")]
    ShutdownTimeout,
}

/// Options for a [`ReadyServer`]. Anything left unset falls back to the
/// `FLEX_READYSRV_*` environment variables, then to built-in defaults.
pub struct ServerBuilder {
    checks: Checks,
    overrides: Overrides,
    logger: Option<Arc<dyn Logger>>,
}

impl ServerBuilder {
    /// Bind address, e.g. `0.0.0.0:3674` or `:3674`.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.overrides.address = Some(address.into());
        self
    }

    pub fn readiness_path(mut self, path: impl Into<String>) -> Self {
        self.overrides.readiness_path = Some(path.into());
        self
    }

    pub fn liveness_path(mut self, path: impl Into<String>) -> Self {
        self.overrides.liveness_path = Some(path.into());
        self
    }

    /// Sink for the startup and shutdown lines.
    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Transport timeouts.
    pub fn http(mut self, http: HttpSettings) -> Self {
        self.overrides.http = Some(http);
        self
    }

    /// Replace every explicit option at once; later setters still apply.
    pub fn overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Resolve settings against the process environment and build the server.
    pub fn build(self) -> ReadyServer {
        let settings = ServerSettings::resolve(&self.overrides);
        self.build_with(settings)
    }

    /// Build with already resolved settings.
    pub fn build_with(self, settings: ServerSettings) -> ReadyServer {
        let logger = self
            .logger
            .unwrap_or_else(|| Arc::new(TracingLogger));
        let router = build_router(&settings, Arc::new(self.checks));

        ReadyServer {
            settings,
            router,
            logger,
            shutdown: Shutdown::new(),
            local_addr: OnceLock::new(),
        }
    }
}

/// Liveness and readiness probe server.
pub struct ReadyServer {
    settings: ServerSettings,
    router: Router,
    logger: Arc<dyn Logger>,
    shutdown: Shutdown,
    local_addr: OnceLock<SocketAddr>,
}

impl ReadyServer {
    /// Start configuring a server around `checks`. `None` means no checks.
    pub fn builder(checks: impl Into<Checks>) -> ServerBuilder {
        ServerBuilder {
            checks: checks.into(),
            overrides: Overrides::default(),
            logger: None,
        }
    }

    /// Server with every setting taken from the environment or defaults.
    pub fn new(checks: impl Into<Checks>) -> Self {
        Self::builder(checks).build()
    }

    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    /// The request router, for embedding or driving without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Address the listener is bound to, once `run` has bound it.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr.get().copied()
    }

    /// Wait until `run` starts accepting, or the server is halted first.
    pub async fn wait_serving(&self) -> Option<SocketAddr> {
        let mut rx = self.shutdown.subscribe();
        let _ = rx.wait_for(|phase| *phase != Phase::Idle).await;
        self.local_addr()
    }

    /// Bind and serve until [`ReadyServer::halt`] is called.
    ///
    /// Returns once every in-flight request has finished.
    ///
    /// # Errors
    ///
    /// Bind failures are returned immediately without serving. A server can
    /// only run once; later calls return [`ServerError::Closed`].
    pub async fn run(&self) -> Result<(), ServerError> {
        if self.shutdown.phase() != Phase::Idle {
            return Err(ServerError::Closed);
        }

        let address = self.settings.bind_address();
        let bind_err = |source| ServerError::Bind {
            address: address.clone(),
            source,
        };
        let listener = TcpListener::bind(&address).await.map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;

        // A halt may land while binding; only a server that starts serving
        // reports its address.
        let started = self.shutdown.begin_serving_with(|| {
            let _ = self.local_addr.set(local_addr);
        });
        if !started {
            return Err(ServerError::Closed);
        }

        self.logger.log(format_args!(
            "serving readiness checks over http on http://{}{} and liveness on http://{}{}",
            local_addr, self.settings.readiness_path, local_addr, self.settings.liveness_path
        ));

        let builder = self.connection_builder();
        let graceful = GracefulShutdown::new();

        let result = loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer_addr)) => {
                        let io = TokioIo::new(stream);
                        let service = TowerToHyperService::new(self.router.clone());
                        let conn = graceful.watch(builder.serve_connection(io, service));

                        tokio::spawn(async move {
                            if let Err(e) = conn.await {
                                tracing::debug!(peer_addr = %peer_addr, error = %e, "Connection error");
                            }
                        });
                    }
                    Err(e) if is_transient(&e) => {
                        tracing::debug!(error = %e, "Transient accept error");
                    }
                    Err(e) => break Err(ServerError::Accept(e)),
                },
                _ = self.shutdown.requested() => break Ok(()),
            }
        };

        drop(listener);
        graceful.shutdown().await;
        self.shutdown.finish();

        tracing::info!(address = %local_addr, "Readiness server stopped");
        result
    }

    /// Stop accepting connections and wait for in-flight requests until `deadline`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::ShutdownTimeout`] if requests are still running
    /// at the deadline. The server keeps draining in the background.
    pub async fn halt(&self, deadline: Instant) -> Result<(), ServerError> {
        if let Some(addr) = self.local_addr() {
            self.logger.log(format_args!(
                "stopping readiness checks server over http on http://{addr}..."
            ));
        }

        self.shutdown.trigger();
        tokio::time::timeout_at(deadline, self.shutdown.stopped())
            .await
            .map_err(|_| ServerError::ShutdownTimeout)
    }

    fn connection_builder(&self) -> http1::Builder {
        let http = &self.settings.http;
        let mut builder = http1::Builder::new();
        // hyper starts the head timer as soon as a connection waits for a
        // request, so the window covers both idle time and the head itself.
        builder
            .timer(TokioTimer::new())
            .header_read_timeout(http.idle_timeout + http.read_header_timeout)
            .keep_alive(true);
        builder
    }
}

/// Build the Axum router with both probe routes and middleware layers.
fn build_router(settings: &ServerSettings, checks: Arc<Checks>) -> Router {
    let mut router = Router::new().route(&settings.readiness_path, get(handlers::readiness));

    if settings.liveness_path == settings.readiness_path {
        tracing::warn!(
            path = %settings.liveness_path,
            "Liveness path collides with readiness path; serving readiness only"
        );
    } else {
        router = router.route(&settings.liveness_path, get(handlers::liveness));
    }

    router.with_state(checks).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::SERVICE_UNAVAILABLE,
                settings.http.write_timeout,
            ))
            .layer(RequestBodyTimeoutLayer::new(settings.http.read_timeout)),
    )
}

fn is_transient(err: &std::io::Error) -> bool {
    use std::io::ErrorKind;
    matches!(
        err.kind(),
        ErrorKind::ConnectionAborted
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionRefused
            | ErrorKind::Interrupted
            | ErrorKind::WouldBlock
    )
}
