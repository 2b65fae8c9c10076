//! Health check and version endpoints
//!
//! Liveness answers from process-local state only and never touches the
//! ingestion core.

use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::borrow::Cow;
use std::time::Instant;
use tracing::debug;

/// Process start time, captured on first access
static STARTED_AT: Lazy<Instant> = Lazy::new(Instant::now);

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/version", web::get().to(version_info));
}

/// Record the process start time
///
/// Called once during server construction so uptime is measured from boot
/// rather than from the first health probe.
pub fn mark_started() {
    Lazy::force(&STARTED_AT);
}

/// Basic health status
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Always `healthy` while the process is serving
    pub status: Cow<'static, str>,
    /// Current server time
    pub timestamp: DateTime<Utc>,
    /// Crate version
    pub version: Cow<'static, str>,
    /// Seconds since process start
    pub uptime_seconds: u64,
}

/// Version and build information
#[derive(Debug, Serialize)]
pub struct VersionInfo {
    /// Crate version
    pub version: Cow<'static, str>,
    /// Unix timestamp of the build
    pub build_time: Cow<'static, str>,
    /// Git commit hash
    pub git_hash: Cow<'static, str>,
    /// Rust toolchain used for the build
    pub rust_version: Cow<'static, str>,
}

/// Basic health check endpoint
///
/// Used by load balancers and monitoring systems. Answers from process-local
/// state only; a busy dispatch loop never fails the probe.
pub async fn health_check() -> HttpResponse {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        uptime_seconds: STARTED_AT.elapsed().as_secs(),
    };

    HttpResponse::Ok().json(health_status)
}

/// Version information endpoint
pub async fn version_info() -> HttpResponse {
    debug!("Version info requested");

    let version_info = VersionInfo {
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        build_time: Cow::Borrowed(env!("BUILD_TIME")),
        git_hash: Cow::Borrowed(env!("GIT_HASH")),
        rust_version: Cow::Borrowed(env!("RUST_VERSION")),
    };

    HttpResponse::Ok().json(version_info)
}
