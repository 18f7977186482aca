use std::fmt;

use serde::Deserialize;

pub const DEFAULT_NUTRITION_API_URL: &str = "https://api.calorieninjas.com/v1/nutrition";

#[derive(Clone, Deserialize)]
pub struct NutritionApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

// Keeps the key out of logs and panics.
impl fmt::Debug for NutritionApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NutritionApiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub nutrition: NutritionApiConfig,
    pub session_ttl_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let nutrition = NutritionApiConfig {
            api_key: std::env::var("NUTRITION_API_KEY")
                .map_err(|_| anyhow::anyhow!("NUTRITION_API_KEY must be set"))?,
            base_url: std::env::var("NUTRITION_API_URL")
                .unwrap_or_else(|_| DEFAULT_NUTRITION_API_URL.into()),
            timeout_secs: std::env::var("NUTRITION_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(10),
        };
        let session_ttl_secs = std::env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60 * 60);
        Ok(Self {
            nutrition,
            session_ttl_secs,
        })
    }
}
