use crate::domain::model::FeatureCollection;
use crate::domain::ports::FeedSource;
use crate::utils::error::{MapError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub const USGS_ALL_MONTH: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_month.geojson";

/// Single GET against a GeoJSON endpoint. No retry, no timeout beyond reqwest's own.
pub struct HttpFeedSource {
    client: Client,
    url: String,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self) -> Result<FeatureCollection> {
        tracing::debug!("Requesting earthquake feed: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        tracing::debug!("Feed response status: {}", status);
        if !status.is_success() {
            return Err(MapError::FeedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!("Feed body: {} bytes", body.len());

        let collection: FeatureCollection =
            serde_json::from_slice(&body).map_err(MapError::FeedParse)?;
        tracing::debug!("Parsed {} features", collection.features.len());

        Ok(collection)
    }
}
