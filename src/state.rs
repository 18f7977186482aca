use crate::config::AppConfig;
use crate::lookup::{CalorieNinjasClient, NutritionLookup};
use crate::nutrition::controller::SearchController;
use crate::sessions::SessionStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub controller: SearchController,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let lookup = Arc::new(CalorieNinjasClient::new(&config.nutrition)?) as Arc<dyn NutritionLookup>;

        Ok(Self::from_parts(config, lookup))
    }

    pub fn from_parts(config: Arc<AppConfig>, lookup: Arc<dyn NutritionLookup>) -> Self {
        Self {
            config,
            controller: SearchController::new(lookup),
            sessions: SessionStore::new(),
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::config::{NutritionApiConfig, DEFAULT_NUTRITION_API_URL};
        use crate::lookup::testing::{apple, banana, StubLookup, StubReply};

        let lookup = StubLookup::default()
            .with("banana", StubReply::items(vec![banana()]))
            .with("fruit", StubReply::items(vec![apple(), banana()]))
            .with("broken", StubReply::failure());

        let config = Arc::new(AppConfig {
            nutrition: NutritionApiConfig {
                api_key: "fake".into(),
                base_url: DEFAULT_NUTRITION_API_URL.into(),
                timeout_secs: 1,
            },
            session_ttl_secs: 60,
        });

        Self::from_parts(config, Arc::new(lookup) as Arc<dyn NutritionLookup>)
    }
}
