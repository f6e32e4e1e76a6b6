use std::sync::Arc;

use axum::{extract::State, Json};
use log::info;

use crate::facts;
use crate::models::{FactsResponse, GenerateFactsRequest};
use crate::routes::AppState;

/// POST /facts
/// Returns one batch of nutrition facts for the given age. The hour-boxed
/// cache short-circuits repeated model calls; any generation failure
/// degrades to the fixed fallback set, so this handler always answers 200
/// with a full batch.
pub async fn generate_facts(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateFactsRequest>,
) -> Json<FactsResponse> {
    if let Some(facts) = state.cache.get() {
        info!("Serving nutrition facts from cache");
        return Json(FactsResponse {
            success: true,
            facts,
        });
    }

    let facts = facts::nutrition_facts(&state.genai, request.age).await;
    state.cache.set(&facts);

    info!("Generated {} nutrition facts for age {}", facts.len(), request.age);

    Json(FactsResponse {
        success: true,
        facts,
    })
}
