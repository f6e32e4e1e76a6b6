use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current time as an RFC3339 string, the format used on every wire timestamp.
pub fn now_str() -> String {
    Utc::now().to_rfc3339()
}

/// A family invitation as collected by the UI and consumed once by the
/// email dispatcher. `invite_email`, `family_name` and `invite_link` are
/// required; the rest degrades to placeholder phrasing in the templates.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InviteRequest {
    #[serde(default)]
    pub inviter_name: Option<String>,
    #[serde(default)]
    pub inviter_email: Option<String>,
    pub family_name: String,
    pub invite_email: String,
    #[serde(default)]
    pub role: Option<String>,
    pub invite_link: String,
}

/// Outcome of one dispatch attempt. Always returned to the caller as a
/// structured body, never thrown past the handler boundary.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EmailSendResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aliases accept the database collaborator's snake_case columns while the
/// service's own wire format stays camelCase.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: String,
    pub name: String,
    #[serde(alias = "created_by")]
    pub created_by: String,
    #[serde(alias = "created_at")]
    pub created_at: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Pending,
    Accepted,
}

/// One row of the family_members collaborator table. An invite targets an
/// email address; `user_id` is filled in when the invitee accepts.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMembership {
    pub id: String,
    #[serde(alias = "family_id")]
    pub family_id: String,
    pub email: String,
    pub role: String,
    pub status: MembershipStatus,
    #[serde(alias = "invited_at")]
    pub invited_at: String,
    #[serde(default, alias = "accepted_at")]
    pub accepted_at: Option<String>,
    #[serde(default, alias = "user_id")]
    pub user_id: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FactCategory {
    Fruits,
    Vegetables,
    Proteins,
    Grains,
    Dairy,
    General,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Toddler,
    Preschool,
    School,
    All,
}

impl AgeGroup {
    /// Age-band mapping used by the facts prompt: toddlers up to 3,
    /// preschoolers up to 5, everyone older is school age.
    pub fn for_age(age: u8) -> Self {
        if age <= 3 {
            AgeGroup::Toddler
        } else if age <= 5 {
            AgeGroup::Preschool
        } else {
            AgeGroup::School
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Toddler => "toddler (1-3 years)",
            AgeGroup::Preschool => "preschooler (4-5 years)",
            AgeGroup::School => "school-age child (6+ years)",
            AgeGroup::All => "child of any age",
        }
    }
}

/// One generated nutrition fact. Ids are unique within a generation batch
/// only, derived from the batch timestamp and array index.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NutritionFact {
    pub id: String,
    pub fact: String,
    pub category: FactCategory,
    pub age_group: AgeGroup,
    pub emoji: String,
    pub timestamp: DateTime<Utc>,
}

/// Persisted cache slot: valid only while `now - timestamp` is under the
/// cache TTL, otherwise treated as absent and purged.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NutritionFactsCache {
    pub facts: Vec<NutritionFact>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// One AI-parsed diet-plan entry. Shape-validated only; persistence is the
/// calling session's concern.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlanEvent {
    pub id: String,
    pub date: String,
    pub meal: String,
    pub meal_type: MealType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
}

/// Minimal address check used before any outbound email call: one `@` with
/// non-empty local part and a dotted domain.
pub fn is_valid_email(address: &str) -> bool {
    let mut parts = address.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_band_boundaries() {
        assert_eq!(AgeGroup::for_age(1), AgeGroup::Toddler);
        assert_eq!(AgeGroup::for_age(3), AgeGroup::Toddler);
        assert_eq!(AgeGroup::for_age(4), AgeGroup::Preschool);
        assert_eq!(AgeGroup::for_age(5), AgeGroup::Preschool);
        assert_eq!(AgeGroup::for_age(6), AgeGroup::School);
        assert_eq!(AgeGroup::for_age(12), AgeGroup::School);
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a@b@c.com"));
    }
}
