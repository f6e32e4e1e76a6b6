use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;

use nourishplate_shared::models::{MealType, PlanEvent};

use crate::genai::{strip_code_fences, GenAiClient, PLAN_GENERATION};

const PLAN_DAYS: u32 = 30;
const MEALS_PER_DAY: u32 = 4;

/// Prompt for turning an uploaded diet-plan document into structured meal
/// events. The document itself is not fetched here; the model works from
/// the reference the UI uploaded.
pub fn build_plan_prompt(file_url: &str, file_name: &str) -> String {
    format!(
        "A family uploaded a diet-plan document named \"{file_name}\" \
         (available at {file_url}).\n\
         Produce a {PLAN_DAYS}-day meal plan with {MEALS_PER_DAY} meals per day \
         (breakfast, lunch, dinner and one snack), following the document \
         where possible.\n\
         Return ONLY a JSON array of objects, no other text. Each object \
         must have these fields:\n\
         - \"date\": calendar date in YYYY-MM-DD form, starting today\n\
         - \"meal\": the dish name\n\
         - \"mealType\": one of \"breakfast\", \"lunch\", \"dinner\", \"snack\"\n\
         - \"description\": one sentence describing the meal\n\
         - \"calories\": estimated calories as an integer, or null"
    )
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawPlanEvent {
    date: String,
    meal: String,
    meal_type: MealType,
    description: String,
    #[serde(default)]
    calories: Option<u32>,
}

/// Parses model output into validated plan events; records failing the
/// schema are dropped. Returns `None` when nothing valid survives.
pub fn parse_plan_events(text: &str, now: DateTime<Utc>) -> Option<Vec<PlanEvent>> {
    let stripped = strip_code_fences(text);
    let values: Vec<serde_json::Value> = serde_json::from_str(stripped).ok()?;

    let mut events = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<RawPlanEvent>(value) {
            Ok(raw) if !raw.meal.trim().is_empty() && !raw.date.trim().is_empty() => {
                events.push(PlanEvent {
                    id: format!("{}-{}", now.timestamp_millis(), events.len()),
                    date: raw.date,
                    meal: raw.meal,
                    meal_type: raw.meal_type,
                    description: raw.description,
                    calories: raw.calories,
                });
            }
            Ok(_) => warn!("Dropping plan event with empty meal or date"),
            Err(e) => warn!("Dropping plan event failing schema validation: {}", e),
        }
    }

    if events.is_empty() {
        return None;
    }
    Some(events)
}

/// Fixed two-day sample plan substituted whenever generation fails, so the
/// UI always has something to show.
pub fn sample_plan_events(now: DateTime<Utc>) -> Vec<PlanEvent> {
    const SAMPLE: [(&str, MealType, &str, u32); 8] = [
        ("Oatmeal with berries", MealType::Breakfast, "Warm oats topped with fresh blueberries and a drizzle of honey", 320),
        ("Turkey and cheese wrap", MealType::Lunch, "Whole wheat wrap with lean turkey, cheese and crunchy lettuce", 410),
        ("Apple slices with peanut butter", MealType::Snack, "Crisp apple slices with a spoonful of peanut butter", 180),
        ("Baked salmon with rice", MealType::Dinner, "Oven-baked salmon with brown rice and steamed broccoli", 520),
        ("Scrambled eggs on toast", MealType::Breakfast, "Fluffy scrambled eggs on whole grain toast", 340),
        ("Veggie pasta salad", MealType::Lunch, "Pasta salad with cherry tomatoes, cucumber and mozzarella", 430),
        ("Yogurt with granola", MealType::Snack, "Plain yogurt with a sprinkle of crunchy granola", 190),
        ("Chicken and vegetable stir-fry", MealType::Dinner, "Stir-fried chicken with mixed vegetables over rice", 490),
    ];

    let start = now.date_naive();
    SAMPLE
        .iter()
        .enumerate()
        .map(|(index, (meal, meal_type, description, calories))| {
            let day = start + chrono::Duration::days((index / 4) as i64);
            PlanEvent {
                id: format!("{}-{}", now.timestamp_millis(), index),
                date: day.format("%Y-%m-%d").to_string(),
                meal: meal.to_string(),
                meal_type: *meal_type,
                description: description.to_string(),
                calories: Some(*calories),
            }
        })
        .collect()
}

/// Generates a meal plan from an uploaded document reference, degrading to
/// the fixed sample plan on any failure.
pub async fn diet_plan(genai: &GenAiClient, file_url: &str, file_name: &str) -> Vec<PlanEvent> {
    let now = Utc::now();

    match genai
        .generate(&build_plan_prompt(file_url, file_name), PLAN_GENERATION)
        .await
    {
        Ok(text) => parse_plan_events(&text, now).unwrap_or_else(|| {
            warn!("Model output failed plan validation, using sample plan");
            sample_plan_events(now)
        }),
        Err(e) => {
            warn!("Plan generation failed ({}), using sample plan", e);
            sample_plan_events(now)
        }
    }
}
