//! Health endpoint tests.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, get};
use medidoc_llm::ProviderRegistry;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_reports_ok_with_database_and_provider(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["available_models"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_is_degraded_without_providers(pool: PgPool) {
    let state =
        common::build_test_state(pool, ProviderRegistry::new(), common::test_config()).await;
    let response = get(common::app(&state), "/health").await;

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["available_models"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_responses_carry_request_id(pool: PgPool) {
    let state = common::build_test_state(
        pool,
        common::scripted_registry(Duration::ZERO),
        common::test_config(),
    )
    .await;
    let response = get(common::app(&state), "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}
