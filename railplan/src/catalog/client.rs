//! Train catalog HTTP client.
//!
//! Provides async methods for listing the train universe and fetching
//! per-train routes. Handles rate limiting and conversion to domain types.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Semaphore;

use crate::domain::{TrainIdentity, TrainRoute};

use super::CatalogSource;
use super::convert::{route_from_envelope, trains_from_list};
use super::error::CatalogError;
use super::types::{TrainDetailEnvelope, TrainListEnvelope};

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL for the catalog API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CatalogConfig {
    /// Create a new config pointing at the given catalog base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Train catalog API client.
///
/// Provides methods for listing trains and fetching routes.
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl HttpCatalog {
    /// Create a new catalog client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// List every train the catalog knows about.
    ///
    /// Returns train identities in catalog order. Rows with unusable train
    /// numbers are dropped rather than failing the listing.
    pub async fn list_trains(&self) -> Result<Vec<TrainIdentity>, CatalogError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| CatalogError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/trains", self.base_url);

        let response = self.http.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(CatalogError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let envelope: TrainListEnvelope =
            serde_json::from_str(&body).map_err(|e| CatalogError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        trains_from_list(&envelope)
    }

    /// Fetch the route a train runs on the given journey date.
    ///
    /// Returns [`CatalogError::TrainNotFound`] when the catalog has no route
    /// for the train on that date, and [`CatalogError::MalformedRoute`] when
    /// it has one that does not convert to a usable route.
    pub async fn train_route(
        &self,
        train: &TrainIdentity,
        journey_date: NaiveDate,
    ) -> Result<TrainRoute, CatalogError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| CatalogError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/trains/{}", self.base_url, train.number.as_str());

        let response = self
            .http
            .get(&url)
            .query(&[("date", journey_date.format("%Y-%m-%d").to_string())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(CatalogError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::TrainNotFound {
                train_number: train.number.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        // Some catalog deployments answer an unknown train with an empty body
        // rather than a 404.
        if body.is_empty() || body == "null" {
            return Err(CatalogError::TrainNotFound {
                train_number: train.number.to_string(),
            });
        }

        let envelope: TrainDetailEnvelope =
            serde_json::from_str(&body).map_err(|e| CatalogError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        route_from_envelope(train, &envelope)
    }
}

impl CatalogSource for HttpCatalog {
    async fn list_trains(&self) -> Result<Vec<TrainIdentity>, CatalogError> {
        HttpCatalog::list_trains(self).await
    }

    async fn train_route(
        &self,
        train: &TrainIdentity,
        journey_date: NaiveDate,
    ) -> Result<TrainRoute, CatalogError> {
        HttpCatalog::train_route(self, train, journey_date).await
    }
}
