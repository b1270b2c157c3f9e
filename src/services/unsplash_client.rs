//! Unsplash photo listing client for ImageBrowser.
//!
//! Fetches pages from `GET {base_url}/photos/` with `reqwest` and decodes the
//! listing into [`RemoteImage`]s. Page bounds are checked before any request.

use std::time::Duration;

use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::services::image_source::{check_page, RemoteImageSource};
use crate::types::errors::ImageError;
use crate::types::image::{ImageSort, RemoteImage};
use crate::types::settings::UnsplashSettings;

/// HTTP client for the photo listing endpoint.
pub struct UnsplashClient {
    http: Client,
    base_url: String,
    access_key: String,
    max_page: u32,
}

impl UnsplashClient {
    pub fn new(settings: &UnsplashSettings) -> Result<Self, ImageError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| ImageError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            access_key: settings.access_key.clone(),
            max_page: settings.max_page_number,
        })
    }

    pub fn max_page(&self) -> u32 {
        self.max_page
    }

    /// Builds the listing URL for one page.
    pub fn request_url(
        &self,
        page: u32,
        per_page: usize,
        order_by: ImageSort,
    ) -> Result<Url, ImageError> {
        check_page(page, self.max_page)?;
        Url::parse_with_params(
            &format!("{}/photos/", self.base_url),
            &[
                ("client_id", self.access_key.clone()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
                ("order_by", order_by.to_string()),
            ],
        )
        .map_err(|e| ImageError::PreconditionViolation(format!("invalid base URL: {}", e)))
    }

    /// Downloads raw image bytes, e.g. a thumbnail.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ImageError> {
        let response = self.http.get(url).send().await.map_err(map_transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageError::Server(status.as_u16(), body));
        }
        let bytes = response.bytes().await.map_err(map_transport)?;
        Ok(bytes.to_vec())
    }
}

impl RemoteImageSource for UnsplashClient {
    async fn fetch_page(
        &self,
        page: u32,
        per_page: usize,
        order_by: ImageSort,
    ) -> Result<Vec<RemoteImage>, ImageError> {
        let url = self.request_url(page, per_page, order_by)?;
        debug!(page, per_page, %order_by, "requesting image page");

        let response = self.http.get(url).send().await.map_err(map_transport)?;
        let status = response.status();
        let body = response.text().await.map_err(map_transport)?;

        if !status.is_success() {
            warn!(page, status = status.as_u16(), "image page request rejected");
            return Err(ImageError::Server(status.as_u16(), body));
        }

        decode_page(&body)
    }
}

/// Decodes one listing response body.
pub fn decode_page(body: &str) -> Result<Vec<RemoteImage>, ImageError> {
    serde_json::from_str(body).map_err(|e| ImageError::Decode(e.to_string()))
}

fn map_transport(e: reqwest::Error) -> ImageError {
    if e.is_timeout() {
        ImageError::Network(format!("request timed out: {}", e))
    } else {
        ImageError::Network(e.to_string())
    }
}
