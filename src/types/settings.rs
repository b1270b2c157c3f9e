use serde::{Deserialize, Serialize};

use super::image::ImageSort;

/// Top-level application settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppSettings {
    pub unsplash: UnsplashSettings,
    pub feed: FeedSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

impl AppSettings {
    /// Images requested per page, never more than the API serves.
    pub fn page_size(&self) -> usize {
        self.feed
            .images_per_page
            .min(self.unsplash.max_images_per_fetch)
            .max(1)
    }
}

/// Remote photo API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UnsplashSettings {
    pub access_key: String,
    pub base_url: String,
    /// Pages past this take too long to serve, so they are refused locally.
    pub max_page_number: u32,
    /// The API silently caps larger page sizes at this value.
    pub max_images_per_fetch: usize,
    pub order_by: ImageSort,
    pub request_timeout_secs: u64,
}

impl Default for UnsplashSettings {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            base_url: "https://api.unsplash.com".to_string(),
            max_page_number: 10_000,
            max_images_per_fetch: 30,
            order_by: ImageSort::Latest,
            request_timeout_secs: 30,
        }
    }
}

/// Infinite-scroll feed settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedSettings {
    pub images_per_page: usize,
    pub trigger_fraction: f64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            images_per_page: 25,
            trigger_fraction: 0.9,
        }
    }
}

/// Local storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StorageSettings {
    /// Defaults to `bookmarks.db` in the platform data directory when unset.
    pub database_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
