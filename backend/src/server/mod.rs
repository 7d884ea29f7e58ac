//! Server construction, middleware wiring and lifecycle control.

mod config;

pub use config::{ServerConfig, ServerSettings};

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::{ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::rt::task::JoinHandle;
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::UserDirectory;
use crate::inbound::http::configure;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryUserDirectory;

/// Assemble the application: directory routes, health probes and, in debug
/// builds, Swagger UI.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

struct RunningServer {
    addr: SocketAddr,
    handle: ServerHandle,
    task: JoinHandle<io::Result<()>>,
}

/// Owns the directory state and drives the HTTP listener.
///
/// Directory state outlives individual listener runs, so a server that is
/// closed and started again keeps every user.
///
/// Must be driven from within an Actix system (`#[actix_web::main]` or
/// `#[actix_web::test]`).
pub struct DirectoryServer {
    config: ServerConfig,
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    running: Option<RunningServer>,
}

impl DirectoryServer {
    /// Server backed by a fresh in-memory directory.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self::with_directory(config, Arc::new(InMemoryUserDirectory::new()))
    }

    #[must_use]
    pub fn with_directory(config: ServerConfig, users: Arc<dyn UserDirectory>) -> Self {
        Self {
            config,
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(HttpState::new(users)),
            running: None,
        }
    }

    /// Bind the listener and start serving.
    ///
    /// Calling this while already running is a no-op that returns the bound
    /// address.
    ///
    /// # Errors
    /// Propagates [`io::Error`] when binding the socket fails.
    pub fn start(&mut self) -> io::Result<SocketAddr> {
        if let Some(running) = &self.running {
            if !running.task.is_finished() {
                return Ok(running.addr);
            }
        }

        let health_state = self.health_state.clone();
        let http_state = self.http_state.clone();
        let mut server = HttpServer::new(move || build_app(health_state.clone(), http_state.clone()))
            .shutdown_timeout(self.config.shutdown_timeout.as_secs());
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }
        let server = server.bind(self.config.bind_addr)?;
        let addr = server
            .addrs()
            .first()
            .copied()
            .ok_or_else(|| io::Error::other("listener reported no bound address"))?;

        let server = server.run();
        let handle = server.handle();
        let task = actix_web::rt::spawn(server);

        self.health_state.mark_ready();
        info!(%addr, "user directory listening");
        self.running = Some(RunningServer { addr, handle, task });
        Ok(addr)
    }

    /// Stop accepting connections, drain in-flight requests and release the
    /// port. Closing a stopped server is a no-op.
    ///
    /// # Errors
    /// Returns the server's own error, or [`io::Error`] when its task panicked.
    pub async fn close(&mut self) -> io::Result<()> {
        let Some(RunningServer { addr, handle, task }) = self.running.take() else {
            return Ok(());
        };
        self.health_state.mark_draining();
        info!(%addr, "stopping user directory");
        handle.stop(true).await;
        Self::join(task).await
    }

    /// Wait until the listener stops by itself, typically on SIGINT or
    /// SIGTERM.
    ///
    /// # Errors
    /// As for [`DirectoryServer::close`].
    pub async fn run_until_stopped(&mut self) -> io::Result<()> {
        let Some(RunningServer { task, .. }) = self.running.take() else {
            return Ok(());
        };
        let result = Self::join(task).await;
        self.health_state.mark_draining();
        result
    }

    async fn join(task: JoinHandle<io::Result<()>>) -> io::Result<()> {
        match task.await {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "server task failed");
                Err(io::Error::other(err))
            }
        }
    }

    /// Address of the active listener.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|running| running.addr)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.task.is_finished())
    }

    #[must_use]
    pub fn health_state(&self) -> web::Data<HealthState> {
        self.health_state.clone()
    }
}
