use thiserror::Error;

use crate::lookup::LookupError;

pub const LOOKUP_FAILED_MESSAGE: &str = "Failed to fetch calorie data";
pub const NO_RESULTS_MESSAGE: &str = "No data found for the entered query.";

#[derive(Debug, Error)]
pub enum NutritionError {
    /// The lookup call failed; the cause is kept for logs only.
    #[error("Failed to fetch calorie data")]
    Lookup(#[from] LookupError),

    #[error("No data found for the entered query.")]
    NoResults,

    #[error("nutrition record is missing field `{field}`")]
    MissingField { field: &'static str },

    #[error("calories must be a finite, non-negative number within range (got {0})")]
    InvalidCalories(f64),
}
