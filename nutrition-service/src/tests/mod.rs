use std::sync::Arc;

use axum::Router;

use nourishplate_shared::test_utils::test_logging::init_test_logging;

use crate::cache::{FactsCache, MemoryCacheStorage};
use crate::genai::GenAiClient;
use crate::routes::{create_router_with_state, AppState};

mod plan_handlers_test;

pub const TEST_MODEL: &str = "gemini-test";

/// Builds a router with the model client pointed at the given (usually
/// mocked) endpoint URL and a fresh instance-local cache.
fn create_test_app(genai_url: &str) -> Router {
    init_test_logging();

    let genai = GenAiClient::with_base_url(
        genai_url.to_string(),
        "test-api-key".to_string(),
        TEST_MODEL.to_string(),
    );
    let cache = FactsCache::new(Arc::new(MemoryCacheStorage::new()));

    create_router_with_state(AppState { genai, cache })
}

/// The generateContent path for the test model.
fn generate_path() -> String {
    format!("/v1beta/models/{}:generateContent", TEST_MODEL)
}

/// Wraps model answer text in the candidates envelope the API returns.
fn candidates_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
    .to_string()
}
