//! HTTP endpoint integration tests
//!
//! Exercise the full request path (routing, validation, store) through
//! actix's test service. The dispatch loop is not running here, so batch
//! statuses stay `pending` and responses are deterministic.

#[cfg(test)]
mod tests {
    use crate::common::{build_pipeline, test_config};
    use actix_web::{test, web};
    use ingest_gateway::server::{AppState, HttpServer};
    use serde_json::{Value, json};
    use std::sync::Arc;

    /// Application state with an idle pipeline (no dispatch loop)
    fn test_state(queue_capacity: usize) -> web::Data<AppState> {
        let mut config = test_config(5000);
        config.gateway.ingestion.queue_capacity = queue_capacity;
        let pipeline = build_pipeline(config);
        web::Data::new(AppState::new(
            pipeline.config.clone(),
            Arc::clone(&pipeline.store),
            Arc::clone(&pipeline.queue),
        ))
    }

    // ==================== POST /ingest ====================

    #[actix_web::test]
    async fn test_ingest_returns_ingestion_id() {
        let app = test::init_service(HttpServer::create_app(test_state(64))).await;

        let req = test::TestRequest::post()
            .uri("/ingest")
            .set_json(json!({"ids": [1, 2, 3, 4, 5], "priority": "HIGH"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["ingestion_id"].is_string());
    }

    #[actix_web::test]
    async fn test_ingest_rejects_invalid_priority() {
        let app = test::init_service(HttpServer::create_app(test_state(64))).await;

        let req = test::TestRequest::post()
            .uri("/ingest")
            .set_json(json!({"ids": [1, 2], "priority": "INVALID"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn test_ingest_rejects_out_of_range_ids() {
        let app = test::init_service(HttpServer::create_app(test_state(64))).await;

        // 0 is below the valid range
        let req = test::TestRequest::post()
            .uri("/ingest")
            .set_json(json!({"ids": [0, 1], "priority": "LOW"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);

        // 1e10 is above it
        let req = test::TestRequest::post()
            .uri("/ingest")
            .set_json(json!({"ids": [10_000_000_000u64], "priority": "LOW"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn test_ingest_rejects_negative_ids() {
        let app = test::init_service(HttpServer::create_app(test_state(64))).await;

        let req = test::TestRequest::post()
            .uri("/ingest")
            .set_json(json!({"ids": [1, -1], "priority": "LOW"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn test_ingest_rejects_empty_ids() {
        let app = test::init_service(HttpServer::create_app(test_state(64))).await;

        let req = test::TestRequest::post()
            .uri("/ingest")
            .set_json(json!({"ids": [], "priority": "MEDIUM"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn test_ingest_rejects_malformed_body() {
        let app = test::init_service(HttpServer::create_app(test_state(64))).await;

        let req = test::TestRequest::post()
            .uri("/ingest")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn test_ingest_full_queue_returns_503() {
        // Capacity of one batch: the second submission cannot fit
        let app = test::init_service(HttpServer::create_app(test_state(1))).await;

        let req = test::TestRequest::post()
            .uri("/ingest")
            .set_json(json!({"ids": [1], "priority": "LOW"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let req = test::TestRequest::post()
            .uri("/ingest")
            .set_json(json!({"ids": [2], "priority": "HIGH"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 503);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "QUEUE_FULL");
    }

    // ==================== GET /status/{ingestion_id} ====================

    #[actix_web::test]
    async fn test_status_reflects_partitioning() {
        let app = test::init_service(HttpServer::create_app(test_state(64))).await;

        let req = test::TestRequest::post()
            .uri("/ingest")
            .set_json(json!({"ids": [1, 2, 3, 4, 5], "priority": "MEDIUM"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let ingestion_id = body["ingestion_id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri(&format!("/status/{}", ingestion_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let status: Value = test::read_body_json(resp).await;
        assert_eq!(status["ingestion_id"], ingestion_id.as_str());
        assert_eq!(status["status"], "pending");
        assert_eq!(status["priority"], "MEDIUM");

        let batches = status["batches"].as_array().unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0]["ids"], json!([1, 2, 3]));
        assert_eq!(batches[1]["ids"], json!([4, 5]));
        assert_eq!(batches[0]["status"], "pending");
        assert_eq!(batches[1]["status"], "pending");
        assert!(batches[0]["batch_id"].is_string());
    }

    #[actix_web::test]
    async fn test_status_unknown_uuid_returns_404() {
        let app = test::init_service(HttpServer::create_app(test_state(64))).await;

        let req = test::TestRequest::get()
            .uri("/status/5a8f9c5e-2b7d-4f39-9d3a-1f4f8f6c2e11")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_status_malformed_id_returns_404() {
        let app = test::init_service(HttpServer::create_app(test_state(64))).await;

        let req = test::TestRequest::get()
            .uri("/status/nonexistent-id")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 404);
    }

    // ==================== GET /health ====================

    #[actix_web::test]
    async fn test_health_returns_healthy() {
        let app = test::init_service(HttpServer::create_app(test_state(64))).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["version"].is_string());
    }
}
