//! Image source: inline list or one-shot HTTP fetch
//!
//! Retry policy is left to the fetcher; the source reports the first failure.

use crate::{Feed, GalleryError, HttpConfig, Image, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Fetches a feed of images from a locator
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, locator: &str) -> Result<Vec<Image>>;
}

/// `reqwest`-backed fetcher expecting a JSON array of images
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GalleryError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, locator: &str) -> Result<Vec<Image>> {
        let response = self.client.get(locator).send().await?;

        if !response.status().is_success() {
            return Err(GalleryError::LoadFailure(format!(
                "HTTP status: {}",
                response.status()
            )));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Supplies the unfiltered image sequence once per activation
#[derive(Clone)]
pub struct ImageSource {
    feed: Feed,
    fetcher: Arc<dyn FeedFetcher>,
}

impl ImageSource {
    pub fn new(feed: Feed, fetcher: Arc<dyn FeedFetcher>) -> Self {
        Self { feed, fetcher }
    }

    /// Inline images, available without waiting
    pub fn immediate(&self) -> Option<Vec<Image>> {
        match &self.feed {
            Feed::Inline(images) => Some(images.clone()),
            Feed::Url(_) => None,
        }
    }

    /// Produce the full sequence, fetching if the feed is remote
    pub async fn load(&self) -> Result<Vec<Image>> {
        match &self.feed {
            Feed::Inline(images) => Ok(images.clone()),
            Feed::Url(locator) => {
                tracing::debug!("Fetching feed from {}", locator);
                let images = self.fetcher.fetch(locator).await?;
                tracing::info!("Fetched {} images from {}", images.len(), locator);
                Ok(images)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Fetcher that replays scripted outcomes, one per call
    #[derive(Default)]
    pub struct ScriptedFetcher {
        outcomes: Mutex<VecDeque<std::result::Result<Vec<Image>, String>>>,
        pub calls: Mutex<Vec<String>>,
    }

    impl ScriptedFetcher {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn push_ok(&self, images: Vec<Image>) {
            self.outcomes.lock().push_back(Ok(images));
        }

        pub fn push_err(&self, msg: &str) {
            self.outcomes.lock().push_back(Err(msg.to_string()));
        }
    }

    #[async_trait]
    impl FeedFetcher for ScriptedFetcher {
        async fn fetch(&self, locator: &str) -> Result<Vec<Image>> {
            self.calls.lock().push(locator.to_string());
            match self.outcomes.lock().pop_front() {
                Some(Ok(images)) => Ok(images),
                Some(Err(msg)) => Err(GalleryError::LoadFailure(msg)),
                None => Err(GalleryError::LoadFailure("no scripted response".into())),
            }
        }
    }
}
