use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::config::NutritionApiConfig;
use crate::nutrition::dto::{LookupResponse, NutritionRecord};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("nutrition api responded with {0}")]
    Status(StatusCode),
    #[error("nutrition api request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("nutrition api response could not be decoded: {0}")]
    Decode(String),
}

#[async_trait]
pub trait NutritionLookup: Send + Sync {
    /// Returns every item the API matched; an empty list is a valid answer.
    async fn lookup(&self, query: &str) -> Result<Vec<NutritionRecord>, LookupError>;
}

#[derive(Clone)]
pub struct CalorieNinjasClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CalorieNinjasClient {
    pub fn new(config: &NutritionApiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("build nutrition http client")?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl NutritionLookup for CalorieNinjasClient {
    async fn lookup(&self, query: &str) -> Result<Vec<NutritionRecord>, LookupError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("query", query)])
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let body = response.bytes().await?;
        let parsed: LookupResponse =
            serde_json::from_slice(&body).map_err(|e| LookupError::Decode(e.to_string()))?;
        debug!(%query, items = parsed.items.len(), "nutrition lookup ok");
        Ok(parsed.items)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;

    /// What the stub answers for one query.
    #[derive(Clone)]
    pub struct StubReply {
        pub items: Option<Vec<NutritionRecord>>,
        pub delay: Duration,
    }

    impl StubReply {
        pub fn items(items: Vec<NutritionRecord>) -> Self {
            Self { items: Some(items), delay: Duration::ZERO }
        }

        pub fn failure() -> Self {
            Self { items: None, delay: Duration::ZERO }
        }

        pub fn after(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    /// In-memory lookup keyed by query; unknown queries return no items.
    #[derive(Clone, Default)]
    pub struct StubLookup {
        replies: HashMap<String, StubReply>,
    }

    impl StubLookup {
        pub fn with(mut self, query: &str, reply: StubReply) -> Self {
            self.replies.insert(query.to_string(), reply);
            self
        }
    }

    #[async_trait]
    impl NutritionLookup for StubLookup {
        async fn lookup(&self, query: &str) -> Result<Vec<NutritionRecord>, LookupError> {
            let reply = self
                .replies
                .get(query)
                .cloned()
                .unwrap_or_else(|| StubReply::items(Vec::new()));
            if !reply.delay.is_zero() {
                tokio::time::sleep(reply.delay).await;
            }
            reply
                .items
                .ok_or(LookupError::Status(StatusCode::INTERNAL_SERVER_ERROR))
        }
    }

    pub fn banana() -> NutritionRecord {
        NutritionRecord {
            name: Some("banana".into()),
            calories: Some(105.0),
            serving_size_g: Some(118.0),
            carbohydrates_total_g: Some(27.0),
            cholesterol_mg: Some(0.0),
            fat_saturated_g: Some(0.1),
            fat_total_g: Some(0.4),
            fiber_g: Some(3.1),
            potassium_mg: Some(422.0),
            protein_g: Some(1.3),
            sodium_mg: Some(1.0),
            sugar_g: Some(14.4),
        }
    }

    pub fn apple() -> NutritionRecord {
        NutritionRecord {
            name: Some("apple".into()),
            calories: Some(53.0),
            serving_size_g: Some(100.0),
            carbohydrates_total_g: Some(14.1),
            cholesterol_mg: Some(0.0),
            fat_saturated_g: Some(0.0),
            fat_total_g: Some(0.2),
            fiber_g: Some(2.4),
            potassium_mg: Some(11.0),
            protein_g: Some(0.3),
            sodium_mg: Some(1.0),
            sugar_g: Some(10.3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout_secs: u64) -> CalorieNinjasClient {
        CalorieNinjasClient::new(&NutritionApiConfig {
            api_key: "test-key".into(),
            base_url: format!("{}/v1/nutrition", server.uri()),
            timeout_secs,
        })
        .expect("client builds")
    }

    #[tokio::test]
    async fn sends_query_and_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/nutrition"))
            .and(query_param("query", "peanut butter & jam"))
            .and(header("X-Api-Key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "name": "peanut butter", "calories": 588 },
                    { "name": "jam", "calories": 250 }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server, 5)
            .lookup("peanut butter & jam")
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name.as_deref(), Some("peanut butter"));
        assert_eq!(items[1].calories, Some(250.0));
    }

    #[tokio::test]
    async fn empty_items_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let items = client_for(&server, 5).lookup("xyzzy").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server, 5).lookup("banana").await.unwrap_err();
        assert!(matches!(err, LookupError::Status(s) if s == StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server, 5).lookup("banana").await.unwrap_err();
        assert!(matches!(err, LookupError::Decode(_)));
    }

    #[tokio::test]
    async fn slow_upstream_hits_the_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "items": [] }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, 1).lookup("banana").await.unwrap_err();
        match err {
            LookupError::Transport(e) => assert!(e.is_timeout()),
            other => panic!("expected transport timeout, got {:?}", other),
        }
    }
}
