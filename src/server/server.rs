//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{Config, ServerConfig};
use crate::core::executor::{BatchExecutor, SimulatedWorker};
use crate::core::queue::DispatchQueue;
use crate::core::scheduler::{Scheduler, SchedulerHandle};
use crate::core::store::RequestStore;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{App, HttpServer as ActixHttpServer, web};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
    /// Handle to the background dispatch loop
    scheduler: SchedulerHandle,
}

impl HttpServer {
    /// Create a new HTTP server and start the dispatch loop
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");
        routes::health::mark_started();

        let ingestion = config.ingestion();
        let queue = Arc::new(DispatchQueue::new(ingestion.queue_capacity));
        let store = Arc::new(RequestStore::new(ingestion, Arc::clone(&queue)));

        let worker = Arc::new(SimulatedWorker::new(ingestion.work_delay()));
        let executor = BatchExecutor::new(Arc::clone(&store), worker);
        let scheduler = Scheduler::new(ingestion, Arc::clone(&queue), executor).spawn();

        let state = AppState::new(config.clone(), store, queue);

        Ok(Self {
            config: config.server().clone(),
            state,
            scheduler,
        })
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                GatewayError::Validation(format!("Invalid request body: {}", err)).into()
            }))
            .wrap(TracingLogger::default())
            .configure(routes::ingest::configure_routes)
            .configure(routes::health::configure_routes)
    }

    /// Start the HTTP server
    ///
    /// Blocks until the server exits, then shuts the dispatch loop down
    /// cleanly so an in-flight batch can finish.
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.bind_addr();

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);
        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()));
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| GatewayError::server(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        let result = server
            .await
            .map_err(|e| GatewayError::server(format!("Server error: {}", e)));

        self.scheduler.shutdown().await;
        info!("HTTP server stopped");
        result
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
