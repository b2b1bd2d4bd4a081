use async_trait::async_trait;
use tracing::{debug, info};

use crate::app::ports::FeedSourcePort;
use crate::common::error::Result;

/// Fetches the feed with a single GET
pub struct ReqwestFeed {
    client: reqwest::Client,
    url: String,
}

impl ReqwestFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSourcePort for ReqwestFeed {
    async fn fetch(&self) -> Result<Vec<u8>> {
        info!("📡 Fetching agenda feed from {}", self.url);
        let resp = self.client.get(&self.url).send().await?.error_for_status()?;
        debug!(status = resp.status().as_u16(), "Feed responded");
        let bytes = resp.bytes().await?.to_vec();
        Ok(bytes)
    }
}
