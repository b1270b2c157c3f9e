use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::url_templates;

/// One image entry of a remote page, as decoded from the photo listing API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteImage {
    #[serde(rename = "alt_description")]
    pub description: Option<String>,
    #[serde(rename = "urls")]
    pub photo_url: PhotoUrl,
}

/// The `urls` object of a listing entry; only the raw URL is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUrl {
    #[serde(rename = "raw")]
    pub raw_url: String,
}

/// Display-size URLs derived from a raw image URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    pub regular: String,
    pub small_thumb: String,
    pub large_thumb: String,
}

impl RemoteImage {
    pub fn new(description: Option<&str>, raw_url: &str) -> Self {
        Self {
            description: description.map(str::to_string),
            photo_url: PhotoUrl {
                raw_url: raw_url.to_string(),
            },
        }
    }

    pub fn raw_url(&self) -> &str {
        &self.photo_url.raw_url
    }

    /// Title shown in lists; images without a description get an empty title.
    pub fn title(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn urls(&self) -> ImageUrls {
        url_templates::derive_urls(self.raw_url())
    }
}

/// Ordering options accepted by the photo listing endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSort {
    #[default]
    Latest,
    Oldest,
    Popular,
}

impl ImageSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSort::Latest => "latest",
            ImageSort::Oldest => "oldest",
            ImageSort::Popular => "popular",
        }
    }
}

impl fmt::Display for ImageSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
