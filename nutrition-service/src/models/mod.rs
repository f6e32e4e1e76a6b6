use serde::{Deserialize, Serialize};

use nourishplate_shared::models::{NutritionFact, PlanEvent};

// Request DTOs
#[derive(Deserialize, Debug)]
pub struct GenerateFactsRequest {
    pub age: u8,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DietPlanRequest {
    pub file_url: String,
    pub file_name: String,
}

// Response DTOs
#[derive(Serialize, Debug)]
pub struct FactsResponse {
    pub success: bool,
    pub facts: Vec<NutritionFact>,
}

#[derive(Serialize, Debug)]
pub struct DietPlanResponse {
    pub success: bool,
    pub events: Vec<PlanEvent>,
}
