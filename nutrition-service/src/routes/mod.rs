use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, Method},
    middleware,
    routing::post,
    Router,
};
use log::{info, warn};
use tower_http::cors::{Any, CorsLayer};

use nourishplate_shared::config::NutritionConfig;

use crate::cache::{FactsCache, MemoryCacheStorage};
use crate::genai::GenAiClient;
use crate::handlers::{facts_handlers::generate_facts, plan_handlers::generate_diet_plan};

/// Shared request state: the model client and the instance-local facts
/// cache.
pub struct AppState {
    pub genai: GenAiClient,
    pub cache: FactsCache,
}

pub fn create_router(config: NutritionConfig) -> Router {
    info!("Creating router with model '{}'", config.genai_model);

    let genai = GenAiClient::new(config.genai_api_key, config.genai_model);
    let cache = FactsCache::new(Arc::new(MemoryCacheStorage::new()));

    create_router_with_state(AppState { genai, cache })
}

/// Creates a router with a given state, used directly by tests.
pub fn create_router_with_state(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Logging middleware to trace all requests
    async fn logging_middleware(
        req: Request,
        next: axum::middleware::Next,
    ) -> impl axum::response::IntoResponse {
        info!(
            "Router received request: method={}, uri={}",
            req.method(),
            req.uri()
        );
        next.run(req).await
    }

    Router::new()
        .route("/facts", post(generate_facts))
        .route("/diet-plan", post(generate_diet_plan))
        .with_state(Arc::new(state))
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
        .fallback(|req: Request| async move {
            warn!("No route matched for: {} {}", req.method(), req.uri());
            (
                axum::http::StatusCode::NOT_FOUND,
                "The requested resource was not found".to_string(),
            )
        })
}
