#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use medidoc_api::config::{AccessConfig, ServerConfig};
use medidoc_api::router::build_app_router;
use medidoc_api::sessions::SessionSlots;
use medidoc_api::state::AppState;
use medidoc_core::model_family::ModelFamily;
use medidoc_db::{PoolSettings, SeedConfig};
use medidoc_llm::{GenerationProvider, Generated, LlmError, ProviderKind, ProviderRegistry};
use medidoc_pipeline::{GenerationConfig, PgGenerationStore, SummaryOrchestrator};

/// Model id the scripted provider is registered under.
pub const TEST_MODEL: &str = "claude-test-model";

/// Text the scripted provider answers with.
pub const TEST_REPLY: &str = "治療経過：内服加療で血圧は安定している\n特記事項：なし";

/// Chart text long enough to pass the default input bounds.
pub fn chart_text() -> String {
    "高血圧症で外来通院中、内服調整を継続。".repeat(10)
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        static_dir: None,
        session_result_ttl: Duration::from_secs(1800),
        pool: PoolSettings::default(),
        access: AccessConfig::default(),
    }
}

/// Provider answering every prompt with [`TEST_REPLY`] after `delay`.
pub struct ScriptedProvider {
    delay: Duration,
}

#[async_trait]
impl GenerationProvider for ScriptedProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Claude
    }

    fn initialize(&self) -> Result<bool, LlmError> {
        Ok(true)
    }

    async fn generate(&self, prompt: &str, _model: &str) -> Result<Generated, LlmError> {
        tokio::time::sleep(self.delay).await;
        Ok(Generated {
            text: TEST_REPLY.to_string(),
            input_tokens: prompt.chars().count() as u64,
            output_tokens: TEST_REPLY.chars().count() as u64,
        })
    }
}

/// Registry with only Claude, served by a [`ScriptedProvider`].
pub fn scripted_registry(delay: Duration) -> ProviderRegistry {
    let provider: Arc<dyn GenerationProvider> = Arc::new(ScriptedProvider { delay });
    let mut registry = ProviderRegistry::new();
    registry.register(ModelFamily::Claude, provider, TEST_MODEL);
    registry
}

/// Seed the catalog and build state around `registry` and `config`.
pub async fn build_test_state(
    pool: PgPool,
    registry: ProviderRegistry,
    config: ServerConfig,
) -> AppState {
    medidoc_db::bootstrap::seed_defaults(&pool, &SeedConfig::default())
        .await
        .unwrap();

    let store = Arc::new(PgGenerationStore::new(pool.clone()));
    let orchestrator = SummaryOrchestrator::new(store, registry, GenerationConfig::default());

    let session_result_ttl = config.session_result_ttl;
    AppState {
        pool,
        config: Arc::new(config),
        orchestrator: Arc::new(orchestrator),
        sessions: Arc::new(SessionSlots::new(session_result_ttl)),
    }
}

/// Router over existing state; sessions survive between requests.
pub fn app(state: &AppState) -> Router {
    build_app_router(state.clone(), &state.config)
}

/// Build the full application router over a seeded database.
pub async fn build_test_app(pool: PgPool) -> Router {
    let state = build_test_state(pool, scripted_registry(Duration::ZERO), test_config()).await;
    app(&state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Percent-encode a path segment or query value.
pub fn enc(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            other => format!("%{other:02X}"),
        })
        .collect()
}

fn client_addr() -> ConnectInfo<SocketAddr> {
    ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000)))
}

pub async fn send(app: Router, mut request: Request<Body>) -> Response {
    if request.extensions().get::<ConnectInfo<SocketAddr>>().is_none() {
        request.extensions_mut().insert(client_addr());
    }
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::PUT, uri, body)).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
