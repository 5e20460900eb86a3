//! Image resource fetching.

use async_trait::async_trait;

use crate::error::FetchError;

/// Fetches one image resource. Timeouts and retries are the loader's job.
#[async_trait]
pub trait ImageFetcher: Send + Sync + 'static {
    async fn fetch(&self, url: &str) -> Result<(), FetchError>;
}

#[cfg(feature = "http")]
pub use http::HttpFetcher;

#[cfg(feature = "http")]
mod http {
    use async_trait::async_trait;
    use reqwest::Client;

    use super::ImageFetcher;
    use crate::error::FetchError;

    /// HTTP-based fetcher with connection pooling.
    #[derive(Debug, Clone)]
    pub struct HttpFetcher {
        client: Client,
    }

    impl HttpFetcher {
        pub fn new() -> Result<Self, FetchError> {
            let client = Client::builder()
                .pool_max_idle_per_host(10)
                .build()
                .map_err(|e| FetchError::Network(e.to_string()))?;
            Ok(Self { client })
        }

        pub fn with_client(client: Client) -> Self {
            Self { client }
        }
    }

    #[async_trait]
    impl ImageFetcher for HttpFetcher {
        async fn fetch(&self, url: &str) -> Result<(), FetchError> {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;

            if !response.status().is_success() {
                return Err(FetchError::Status(response.status().as_u16()));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;

            tracing::trace!(
                target: "zenslide::loader",
                url,
                bytes = bytes.len(),
                "image fetched"
            );
            Ok(())
        }
    }
}
