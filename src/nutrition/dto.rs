use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::exercise::ExerciseDurations;
use crate::nutrition::series::{ChartData, NutrientRow};

/// One food item as returned by the nutrition lookup API.
///
/// Every numeric field is optional: the API may omit a field or send a
/// non-numeric placeholder, both of which decode as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub calories: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub serving_size_g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub carbohydrates_total_g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub cholesterol_mg: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fat_saturated_g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fat_total_g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fiber_g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub potassium_mg: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub protein_g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sodium_mg: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sugar_g: Option<f64>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// Body of a successful lookup response.
#[derive(Debug, Deserialize)]
pub struct LookupResponse {
    pub items: Vec<NutritionRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct ExerciseQuery {
    pub calories: f64,
}

#[derive(Debug, Serialize)]
pub struct CreatedSessionResponse {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct ExerciseLine {
    pub exercise: &'static str,
    pub phrase: &'static str,
    pub minutes: u32,
}

/// Everything a front end needs to render one session.
#[derive(Debug, Serialize)]
pub struct SearchView {
    pub session_id: Uuid,
    pub query: String,
    pub in_flight: bool,
    pub error: Option<String>,
    pub record: Option<NutritionRecord>,
    pub results_count: usize,
    pub summary: Option<String>,
    pub burn_headline: Option<String>,
    pub durations: Option<ExerciseDurations>,
    pub exercises: Vec<ExerciseLine>,
    pub nutrients: Vec<NutrientRow>,
    pub chart: Option<ChartData>,
    pub chart_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_item() {
        let body = json!({
            "items": [{
                "name": "banana",
                "calories": 105,
                "serving_size_g": 118,
                "fat_total_g": 0.4,
                "fat_saturated_g": 0.1,
                "protein_g": 1.3,
                "sodium_mg": 1,
                "potassium_mg": 422,
                "cholesterol_mg": 0,
                "carbohydrates_total_g": 27,
                "fiber_g": 3.1,
                "sugar_g": 14.4
            }]
        });
        let resp: LookupResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.items.len(), 1);
        let item = &resp.items[0];
        assert_eq!(item.name.as_deref(), Some("banana"));
        assert_eq!(item.calories, Some(105.0));
        assert_eq!(item.potassium_mg, Some(422.0));
        assert_eq!(item.sugar_g, Some(14.4));
    }

    #[test]
    fn placeholder_strings_and_missing_fields_decode_as_none() {
        let body = json!({
            "items": [{
                "name": "rice",
                "calories": "Only available for premium subscribers.",
                "protein_g": null,
                "fat_total_g": 0.3
            }]
        });
        let resp: LookupResponse = serde_json::from_value(body).unwrap();
        let item = &resp.items[0];
        assert_eq!(item.calories, None);
        assert_eq!(item.protein_g, None);
        assert_eq!(item.sugar_g, None);
        assert_eq!(item.fat_total_g, Some(0.3));
    }

    #[test]
    fn body_without_items_is_rejected() {
        let res = serde_json::from_value::<LookupResponse>(json!({ "foods": [] }));
        assert!(res.is_err());
    }
}
