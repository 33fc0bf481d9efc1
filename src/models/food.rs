use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use super::serving_size::ServingSize;

/// A food nutrition record owned by the user who created it.
///
/// `serving_size` is always stored in the canonical "<amount> <unit>" form
/// produced by [`ServingSize`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: Uuid,
    pub user_id: String,
    pub brand_name: Option<String>,
    pub description: String,
    pub serving_size: String,
    pub calories: i64,
    pub total_fat: Option<i64>,
    pub saturated_fat: Option<i64>,
    pub polysaturated_fat: Option<i64>,
    pub monounsaturated_fat: Option<i64>,
    pub trans_fat: Option<i64>,
    pub cholesterol: Option<i64>,
    pub sodium: Option<i64>,
    pub potassium: Option<i64>,
    pub total_carbohydrates: Option<i64>,
    pub dietary_fiber: Option<i64>,
    pub sugars: Option<i64>,
    pub added_sugars: Option<i64>,
    pub sugar_alcohols: Option<i64>,
    pub protein: Option<i64>,
    pub vitamin_a: Option<i64>,
    pub vitamin_c: Option<i64>,
    pub calcium: Option<i64>,
    pub iron: Option<i64>,
    pub vitamin_d: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-submitted fields for creating or updating a food.
///
/// Everything is optional at the wire level; [`FoodDraft::validate`] decides
/// what is actually required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FoodDraft {
    pub brand_name: Option<String>,
    pub description: Option<String>,
    pub serving_size: Option<String>,
    pub calories: Option<i64>,
    pub total_fat: Option<i64>,
    pub saturated_fat: Option<i64>,
    pub polysaturated_fat: Option<i64>,
    pub monounsaturated_fat: Option<i64>,
    pub trans_fat: Option<i64>,
    pub cholesterol: Option<i64>,
    pub sodium: Option<i64>,
    pub potassium: Option<i64>,
    pub total_carbohydrates: Option<i64>,
    pub dietary_fiber: Option<i64>,
    pub sugars: Option<i64>,
    pub added_sugars: Option<i64>,
    pub sugar_alcohols: Option<i64>,
    pub protein: Option<i64>,
    pub vitamin_a: Option<i64>,
    pub vitamin_c: Option<i64>,
    pub calcium: Option<i64>,
    pub iron: Option<i64>,
    pub vitamin_d: Option<i64>,
}

/// Per-field validation messages, keyed by the JSON field name.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl FoodDraft {
    /// Checks the required fields and the serving size format.
    ///
    /// Returns the canonical `(description, serving_size, calories)` triple
    /// on success, or every field failure at once on error.
    pub fn validate(&self) -> Result<(String, String, i64), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let description = match self.description.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => Some(d.to_string()),
            _ => {
                errors.add("description", "Food description required.");
                None
            }
        };

        let serving_size = match self.serving_size.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => match s.parse::<ServingSize>() {
                Ok(parsed) => Some(parsed.to_string()),
                Err(e) => {
                    errors.add("servingSize", e.to_string());
                    None
                }
            },
            _ => {
                errors.add("servingSize", "Serving size required.");
                None
            }
        };

        let calories = match self.calories {
            Some(c) => Some(c),
            None => {
                errors.add("calories", "Calories required.");
                None
            }
        };

        match (description, serving_size, calories) {
            (Some(d), Some(s), Some(c)) => Ok((d, s, c)),
            _ => Err(errors),
        }
    }
}

impl Food {
    /// Builds a new record from a client draft, assigning an id and
    /// ownership. Fails with per-field messages on invalid input.
    pub fn create(draft: FoodDraft, user_id: impl Into<String>) -> Result<Self, ValidationErrors> {
        let (description, serving_size, calories) = draft.validate()?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            brand_name: draft.brand_name,
            description,
            serving_size,
            calories,
            total_fat: draft.total_fat,
            saturated_fat: draft.saturated_fat,
            polysaturated_fat: draft.polysaturated_fat,
            monounsaturated_fat: draft.monounsaturated_fat,
            trans_fat: draft.trans_fat,
            cholesterol: draft.cholesterol,
            sodium: draft.sodium,
            potassium: draft.potassium,
            total_carbohydrates: draft.total_carbohydrates,
            dietary_fiber: draft.dietary_fiber,
            sugars: draft.sugars,
            added_sugars: draft.added_sugars,
            sugar_alcohols: draft.sugar_alcohols,
            protein: draft.protein,
            vitamin_a: draft.vitamin_a,
            vitamin_c: draft.vitamin_c,
            calcium: draft.calcium,
            iron: draft.iron,
            vitamin_d: draft.vitamin_d,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a draft to an existing record, revalidating every field.
    ///
    /// Identity, ownership, and `created_at` are preserved. The record is
    /// untouched when validation fails.
    pub fn apply(&mut self, draft: FoodDraft) -> Result<(), ValidationErrors> {
        let (description, serving_size, calories) = draft.validate()?;

        self.brand_name = draft.brand_name;
        self.description = description;
        self.serving_size = serving_size;
        self.calories = calories;
        self.total_fat = draft.total_fat;
        self.saturated_fat = draft.saturated_fat;
        self.polysaturated_fat = draft.polysaturated_fat;
        self.monounsaturated_fat = draft.monounsaturated_fat;
        self.trans_fat = draft.trans_fat;
        self.cholesterol = draft.cholesterol;
        self.sodium = draft.sodium;
        self.potassium = draft.potassium;
        self.total_carbohydrates = draft.total_carbohydrates;
        self.dietary_fiber = draft.dietary_fiber;
        self.sugars = draft.sugars;
        self.added_sugars = draft.added_sugars;
        self.sugar_alcohols = draft.sugar_alcohols;
        self.protein = draft.protein;
        self.vitamin_a = draft.vitamin_a;
        self.vitamin_c = draft.vitamin_c;
        self.calcium = draft.calcium;
        self.iron = draft.iron;
        self.vitamin_d = draft.vitamin_d;
        self.updated_at = Utc::now();

        Ok(())
    }

    /// Only the creator may modify or delete a record.
    pub fn owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draft() -> FoodDraft {
        FoodDraft {
            brand_name: Some("Acme".to_string()),
            description: Some("Rolled oats".to_string()),
            serving_size: Some("1 cup".to_string()),
            calories: Some(300),
            protein: Some(10),
            total_fat: Some(5),
            ..FoodDraft::default()
        }
    }

    #[test]
    fn test_create_valid_draft() {
        let food = Food::create(sample_draft(), "alice").unwrap();

        assert_eq!(food.user_id, "alice");
        assert_eq!(food.brand_name.as_deref(), Some("Acme"));
        assert_eq!(food.description, "Rolled oats");
        assert_eq!(food.serving_size, "1 cup");
        assert_eq!(food.calories, 300);
        assert_eq!(food.protein, Some(10));
        assert_eq!(food.sodium, None);
        assert_eq!(food.created_at, food.updated_at);
    }

    #[test]
    fn test_create_normalizes_serving_size() {
        let mut draft = sample_draft();
        draft.serving_size = Some("3cups".to_string());

        let food = Food::create(draft, "alice").unwrap();
        assert_eq!(food.serving_size, "3 cups");
    }

    #[test]
    fn test_create_missing_description() {
        let mut draft = sample_draft();
        draft.description = None;

        let errors = Food::create(draft, "alice").unwrap_err();
        assert_eq!(
            errors.get("description"),
            Some(&["Food description required.".to_string()][..])
        );
    }

    #[test]
    fn test_blank_description_rejected() {
        let mut draft = sample_draft();
        draft.description = Some("   ".to_string());

        assert!(Food::create(draft, "alice").is_err());
    }

    #[test]
    fn test_empty_draft_collects_all_errors() {
        let errors = FoodDraft::default().validate().unwrap_err();

        assert!(errors.get("description").is_some());
        assert!(errors.get("servingSize").is_some());
        assert!(errors.get("calories").is_some());
    }

    #[test]
    fn test_bad_serving_size_message() {
        let mut draft = sample_draft();
        draft.serving_size = Some("abc".to_string());

        let errors = draft.validate().unwrap_err();
        let messages = errors.get("servingSize").unwrap();
        assert!(messages[0].contains("<number> <unit>"));
    }

    #[test]
    fn test_apply_updates_fields() {
        let mut food = Food::create(sample_draft(), "alice").unwrap();
        let id = food.id;
        let created_at = food.created_at;

        let mut draft = sample_draft();
        draft.description = Some("Steel-cut oats".to_string());
        draft.serving_size = Some("2cups".to_string());
        draft.brand_name = None;

        food.apply(draft).unwrap();

        assert_eq!(food.id, id);
        assert_eq!(food.user_id, "alice");
        assert_eq!(food.created_at, created_at);
        assert_eq!(food.description, "Steel-cut oats");
        assert_eq!(food.serving_size, "2 cups");
        assert!(food.brand_name.is_none());
        assert!(food.updated_at >= created_at);
    }

    #[test]
    fn test_apply_invalid_leaves_record_unchanged() {
        let mut food = Food::create(sample_draft(), "alice").unwrap();
        let before = food.clone();

        let result = food.apply(FoodDraft::default());

        assert!(result.is_err());
        assert_eq!(food, before);
    }

    #[test]
    fn test_owned_by() {
        let food = Food::create(sample_draft(), "alice").unwrap();

        assert!(food.owned_by("alice"));
        assert!(!food.owned_by("bob"));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let food = Food::create(sample_draft(), "alice").unwrap();
        let json = serde_json::to_string(&food).unwrap();

        assert!(json.contains("\"brandName\""));
        assert!(json.contains("\"servingSize\""));
        assert!(json.contains("\"totalFat\""));
        assert!(json.contains("\"userId\""));
    }

    #[test]
    fn test_draft_json_roundtrip() {
        let draft = sample_draft();
        let json = serde_json::to_string(&draft).unwrap();
        let parsed: FoodDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(draft, parsed);
    }
}
