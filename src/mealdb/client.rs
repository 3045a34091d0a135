use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::raw::MealsResponse;
use super::MealSource;
use crate::config::FinderConfig;
use crate::error::FetchError;

/// HTTP client for the TheMealDB JSON API
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    pub fn new(config: &FinderConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, endpoint: &str, key: &str, value: &str) -> Result<MealsResponse, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {}?{}={}", url, key, value);

        // reqwest URL-encodes the query pair
        let response = self.client.get(&url).query(&[(key, value)]).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.json::<MealsResponse>().await?)
    }
}

#[async_trait]
impl MealSource for MealDbClient {
    async fn search(&self, term: &str) -> Result<MealsResponse, FetchError> {
        self.get("search.php", "s", term).await
    }

    async fn lookup(&self, id: &str) -> Result<MealsResponse, FetchError> {
        self.get("lookup.php", "i", id).await
    }
}
