//! HTTP-level tests for per-session generations.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, chart_text, delete, get, post_json};
use medidoc_api::state::AppState;
use medidoc_llm::ProviderRegistry;
use sqlx::PgPool;

const URI: &str = "/api/v1/sessions/session-1/generation";
const OTHER_URI: &str = "/api/v1/sessions/session-2/generation";

async fn usage_count(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM summary_usage")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

/// Poll until the generation leaves the running state.
async fn wait_for_result(state: &AppState, uri: &str) -> serde_json::Value {
    for _ in 0..100 {
        let json = body_json(get(common::app(state), uri).await).await;
        if json["data"]["state"] != "running" {
            return json;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("generation did not finish");
}

async fn scripted_state(pool: PgPool, delay: Duration) -> AppState {
    common::build_test_state(pool, common::scripted_registry(delay), common::test_config()).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_generation_completes_and_records_usage(pool: PgPool) {
    let state = scripted_state(pool.clone(), Duration::ZERO).await;

    let response = post_json(
        common::app(&state),
        URI,
        serde_json::json!({
            "input_text": chart_text(),
            "additional_info": "",
            "selection": {"department": "内科"},
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["state"], "running");

    let json = wait_for_result(&state, URI).await;
    let data = &json["data"];
    assert_eq!(data["state"], "completed");
    assert_eq!(data["model_family"], "Claude");
    assert_eq!(data["model_used_detail"], common::TEST_MODEL);
    assert_eq!(data["model_switched"], false);
    assert_eq!(
        data["parsed_sections"]["治療経過"],
        "内服加療で血圧は安定している"
    );
    assert_eq!(data["parsed_sections"]["特記事項"], "なし");
    assert_eq!(data["warnings"], serde_json::json!([]));

    assert_eq!(usage_count(&pool).await, 1);
    let (department, model_detail): (String, String) =
        sqlx::query_as("SELECT department, model_detail FROM summary_usage")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(department, "内科");
    assert_eq!(model_detail, common::TEST_MODEL);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_short_input_is_rejected_before_spawning(pool: PgPool) {
    let state = scripted_state(pool.clone(), Duration::ZERO).await;

    let response = post_json(
        common::app(&state),
        URI,
        serde_json::json!({"input_text": "短い記載"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INPUT_WARNING");

    let status = get(common::app(&state), URI).await;
    assert_eq!(status.status(), StatusCode::NOT_FOUND);
    assert_eq!(usage_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_credentials_return_503(pool: PgPool) {
    let state =
        common::build_test_state(pool, ProviderRegistry::new(), common::test_config()).await;

    let response = post_json(
        common::app(&state),
        URI,
        serde_json::json!({"input_text": chart_text()}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NO_CREDENTIALS");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_one_generation_per_session(pool: PgPool) {
    let state = scripted_state(pool.clone(), Duration::from_secs(1)).await;
    let body = serde_json::json!({"input_text": chart_text()});

    let first = post_json(common::app(&state), URI, body.clone()).await;
    assert_eq!(first.status(), StatusCode::ACCEPTED);

    let second = post_json(common::app(&state), URI, body.clone()).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    // Another session is independent.
    let other = post_json(common::app(&state), OTHER_URI, body).await;
    assert_eq!(other.status(), StatusCode::ACCEPTED);

    let clear = delete(common::app(&state), URI).await;
    assert_eq!(clear.status(), StatusCode::CONFLICT);

    assert_eq!(wait_for_result(&state, URI).await["data"]["state"], "completed");
    assert_eq!(wait_for_result(&state, OTHER_URI).await["data"]["state"], "completed");
    assert_eq!(usage_count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clear_finished_generation(pool: PgPool) {
    let state = scripted_state(pool, Duration::ZERO).await;

    let response = post_json(
        common::app(&state),
        URI,
        serde_json::json!({"input_text": chart_text()}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    wait_for_result(&state, URI).await;

    let clear = delete(common::app(&state), URI).await;
    assert_eq!(clear.status(), StatusCode::NO_CONTENT);

    let status = get(common::app(&state), URI).await;
    assert_eq!(status.status(), StatusCode::NOT_FOUND);

    let again = delete(common::app(&state), URI).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unread_results_expire_but_running_ones_do_not(pool: PgPool) {
    let mut config = common::test_config();
    config.session_result_ttl = Duration::from_millis(200);
    let state = common::build_test_state(
        pool.clone(),
        common::scripted_registry(Duration::from_millis(500)),
        config,
    )
    .await;

    let response = post_json(
        common::app(&state),
        URI,
        serde_json::json!({"input_text": chart_text()}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    // Outlives the TTL while running.
    tokio::time::sleep(Duration::from_millis(300)).await;
    let json = wait_for_result(&state, URI).await;
    assert_eq!(json["data"]["state"], "completed");

    tokio::time::sleep(Duration::from_millis(400)).await;
    let status = get(common::app(&state), URI).await;
    assert_eq!(status.status(), StatusCode::NOT_FOUND);
    assert_eq!(usage_count(&pool).await, 1);
}
