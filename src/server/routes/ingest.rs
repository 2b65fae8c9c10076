//! Submission and status endpoints
//!
//! Field validation lives here, at the transport boundary; the core only
//! ever sees validated input.

use crate::core::types::{MAX_ID, Priority};
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Configure ingestion routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ingest", web::post().to(submit_ingestion))
        .route("/status/{ingestion_id}", web::get().to(ingestion_status));
}

/// Submission payload
#[derive(Debug, Deserialize)]
pub struct IngestPayload {
    /// Identifiers to ingest
    pub ids: Vec<u64>,
    /// Priority label (`HIGH`, `MEDIUM`, `LOW`)
    pub priority: Priority,
}

/// Submission response
#[derive(Debug, Serialize)]
pub struct IngestAccepted {
    /// ID to poll `/status/{ingestion_id}` with
    pub ingestion_id: Uuid,
}

/// Accept a bulk ingestion request
///
/// Returns the generated ingestion ID immediately; batch processing happens
/// asynchronously in the dispatch loop.
pub async fn submit_ingestion(
    state: web::Data<AppState>,
    payload: web::Json<IngestPayload>,
) -> Result<HttpResponse> {
    let payload = payload.into_inner();
    validate_ids(&payload.ids)?;

    let ingestion_id = state.store.create(payload.ids, payload.priority)?;
    Ok(HttpResponse::Ok().json(IngestAccepted { ingestion_id }))
}

/// Poll the status of a previously submitted request
pub async fn ingestion_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let raw = path.into_inner();
    debug!(ingestion_id = %raw, "Status requested");

    // Malformed IDs cannot match any request, so they are a plain 404
    let ingestion_id = Uuid::parse_str(&raw)
        .map_err(|_| GatewayError::NotFound(format!("Unknown ingestion request: {}", raw)))?;

    let snapshot = state
        .store
        .get(ingestion_id)
        .ok_or_else(|| GatewayError::NotFound(format!("Unknown ingestion request: {}", raw)))?;

    Ok(HttpResponse::Ok().json(snapshot))
}

fn validate_ids(ids: &[u64]) -> Result<()> {
    if ids.is_empty() {
        return Err(GatewayError::Validation(
            "ids must contain at least one identifier".to_string(),
        ));
    }
    for &id in ids {
        if id == 0 || id > MAX_ID {
            return Err(GatewayError::Validation(format!(
                "id {} out of range (1..={})",
                id, MAX_ID
            )));
        }
    }
    Ok(())
}
