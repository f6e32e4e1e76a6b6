use std::sync::Arc;

use axum::{extract::State, Json};
use log::info;

use crate::error::{AppError, Result};
use crate::models::{DietPlanRequest, DietPlanResponse};
use crate::plan;
use crate::routes::AppState;

/// POST /diet-plan
/// Turns an uploaded diet-plan document reference into structured meal
/// events. Generation failures degrade to the fixed sample plan; only
/// missing input fields error.
pub async fn generate_diet_plan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DietPlanRequest>,
) -> Result<Json<DietPlanResponse>> {
    if request.file_url.trim().is_empty() {
        return Err(AppError::bad_request("fileUrl is required".to_string()));
    }
    if request.file_name.trim().is_empty() {
        return Err(AppError::bad_request("fileName is required".to_string()));
    }

    let events = plan::diet_plan(&state.genai, &request.file_url, &request.file_name).await;

    info!(
        "Produced {} plan events from document '{}'",
        events.len(),
        request.file_name
    );

    Ok(Json(DietPlanResponse {
        success: true,
        events,
    }))
}
