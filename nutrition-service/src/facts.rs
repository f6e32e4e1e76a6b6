use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;

use nourishplate_shared::models::{AgeGroup, FactCategory, NutritionFact};

use crate::genai::{strip_code_fences, GenAiClient, FACTS_GENERATION};

/// Facts are generated in batches of exactly this size; anything short of
/// it after validation falls back to the fixed set.
pub const FACTS_PER_BATCH: usize = 6;

pub fn build_facts_prompt(age: u8) -> String {
    let age_group = AgeGroup::for_age(age);
    format!(
        "Generate fun and educational nutrition facts for a {label}.\n\
         Return ONLY a JSON array of exactly {count} objects, no other text.\n\
         Each object must have these fields:\n\
         - \"fact\": one short, friendly sentence a parent can read aloud\n\
         - \"category\": one of \"fruits\", \"vegetables\", \"proteins\", \"grains\", \"dairy\", \"general\"\n\
         - \"emoji\": a single food emoji matching the fact\n\
         Cover at least three different categories and keep the wording \
         age-appropriate for a {label}.",
        label = age_group.label(),
        count = FACTS_PER_BATCH,
    )
}

/// Schema each model record must satisfy; anything else is dropped rather
/// than trusted.
#[derive(Deserialize, Debug)]
struct RawFact {
    fact: String,
    category: FactCategory,
    #[serde(default = "default_emoji")]
    emoji: String,
}

fn default_emoji() -> String {
    "🍽️".to_string()
}

/// Parses model output into a validated batch. Returns `None` when the text
/// is not a JSON array or fewer than a full batch of records survive
/// validation.
pub fn parse_facts(
    text: &str,
    age_group: AgeGroup,
    now: DateTime<Utc>,
) -> Option<Vec<NutritionFact>> {
    let stripped = strip_code_fences(text);
    let values: Vec<serde_json::Value> = serde_json::from_str(stripped).ok()?;

    let mut valid: Vec<RawFact> = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<RawFact>(value) {
            Ok(raw) if !raw.fact.trim().is_empty() => valid.push(raw),
            Ok(_) => warn!("Dropping model fact with empty text"),
            Err(e) => warn!("Dropping model fact failing schema validation: {}", e),
        }
    }

    if valid.len() < FACTS_PER_BATCH {
        return None;
    }
    valid.truncate(FACTS_PER_BATCH);

    Some(
        valid
            .into_iter()
            .enumerate()
            .map(|(index, raw)| NutritionFact {
                // Unique within this batch only
                id: format!("{}-{}", now.timestamp_millis(), index),
                fact: raw.fact,
                category: raw.category,
                age_group,
                emoji: raw.emoji,
                timestamp: now,
            })
            .collect(),
    )
}

/// Fixed fallback batch shown whenever generation is unavailable. Never
/// empty, spans four categories, timestamped at call time.
pub fn fallback_facts(now: DateTime<Utc>) -> Vec<NutritionFact> {
    const FALLBACK: [(&str, FactCategory, &str); FACTS_PER_BATCH] = [
        (
            "Carrots help you see better in the dark because they are full of vitamin A!",
            FactCategory::Vegetables,
            "🥕",
        ),
        (
            "Bananas give you quick energy for running and playing!",
            FactCategory::Fruits,
            "🍌",
        ),
        (
            "Milk builds strong bones and teeth with calcium!",
            FactCategory::Dairy,
            "🥛",
        ),
        (
            "Eggs help your muscles grow big and strong!",
            FactCategory::Proteins,
            "🥚",
        ),
        (
            "Whole grain bread gives you energy that lasts all day!",
            FactCategory::Grains,
            "🍞",
        ),
        (
            "Drinking water keeps your whole body happy and healthy!",
            FactCategory::General,
            "💧",
        ),
    ];

    FALLBACK
        .iter()
        .enumerate()
        .map(|(index, (fact, category, emoji))| NutritionFact {
            id: format!("{}-{}", now.timestamp_millis(), index),
            fact: fact.to_string(),
            category: *category,
            age_group: AgeGroup::All,
            emoji: emoji.to_string(),
            timestamp: now,
        })
        .collect()
}

/// Generates one batch of facts for the given age. Any failure along the
/// way degrades to the fallback set; this operation never fails and never
/// returns an empty batch.
pub async fn nutrition_facts(genai: &GenAiClient, age: u8) -> Vec<NutritionFact> {
    let age_group = AgeGroup::for_age(age);
    let now = Utc::now();

    match genai.generate(&build_facts_prompt(age), FACTS_GENERATION).await {
        Ok(text) => parse_facts(&text, age_group, now).unwrap_or_else(|| {
            warn!("Model output failed facts validation, using fallback set");
            fallback_facts(now)
        }),
        Err(e) => {
            warn!("Facts generation failed ({}), using fallback set", e);
            fallback_facts(now)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn six_valid_facts() -> String {
        serde_json::json!([
            {"fact": "Apples have fiber!", "category": "fruits", "emoji": "🍎"},
            {"fact": "Spinach makes you strong!", "category": "vegetables", "emoji": "🥬"},
            {"fact": "Beans build muscles!", "category": "proteins", "emoji": "🫘"},
            {"fact": "Oats keep you full!", "category": "grains", "emoji": "🥣"},
            {"fact": "Yogurt helps your tummy!", "category": "dairy", "emoji": "🥛"},
            {"fact": "Rainbow plates are the healthiest!", "category": "general", "emoji": "🌈"}
        ])
        .to_string()
    }

    #[test]
    fn parses_a_fenced_batch() {
        let text = format!("```json\n{}\n```", six_valid_facts());
        let now = Utc::now();
        let facts = parse_facts(&text, AgeGroup::Preschool, now).unwrap();

        assert_eq!(facts.len(), FACTS_PER_BATCH);
        assert_eq!(facts[0].category, FactCategory::Fruits);
        assert!(facts.iter().all(|f| f.age_group == AgeGroup::Preschool));
        assert!(facts.iter().all(|f| f.timestamp == now));

        let ids: HashSet<_> = facts.iter().map(|f| f.id.clone()).collect();
        assert_eq!(ids.len(), FACTS_PER_BATCH);
    }

    #[test]
    fn invalid_records_are_dropped_and_short_batches_rejected() {
        let text = serde_json::json!([
            {"fact": "Good fact", "category": "fruits", "emoji": "🍎"},
            {"fact": "Bad category", "category": "candy", "emoji": "🍬"},
            {"fact": "", "category": "dairy", "emoji": "🥛"},
            {"category": "grains", "emoji": "🥖"},
            {"fact": "Another good one", "category": "general", "emoji": "🌈"},
            {"fact": "And one more", "category": "proteins", "emoji": "🥚"}
        ])
        .to_string();

        assert!(parse_facts(&text, AgeGroup::School, Utc::now()).is_none());
    }

    #[test]
    fn non_json_is_rejected() {
        assert!(parse_facts("sorry, I can't do that", AgeGroup::All, Utc::now()).is_none());
        assert!(parse_facts("{\"not\": \"an array\"}", AgeGroup::All, Utc::now()).is_none());
    }

    #[test]
    fn fallback_is_full_and_varied() {
        let facts = fallback_facts(Utc::now());
        assert_eq!(facts.len(), FACTS_PER_BATCH);

        let categories: HashSet<_> = facts.iter().map(|f| f.category).collect();
        assert!(categories.len() >= 3);
        assert!(facts.iter().all(|f| !f.fact.is_empty()));
    }

    #[test]
    fn prompt_names_the_age_band() {
        assert!(build_facts_prompt(2).contains("toddler"));
        assert!(build_facts_prompt(5).contains("preschooler"));
        assert!(build_facts_prompt(9).contains("school-age"));
        assert!(build_facts_prompt(9).contains("exactly 6"));
    }
}
