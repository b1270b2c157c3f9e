// Display-size URLs derived from a raw image URL.
// The image CDN resizes on the fly from query parameters appended to the raw URL,
// which already carries its own query string.

use crate::types::image::ImageUrls;

/// Regular size: 1080px wide JPEG.
pub const REGULAR_SIZE_PARAMS: &str = "&fm=jpg&fit=crop&w=1080&q=80&fit=max";
/// Small thumbnail: fits within 100x100 without cropping.
pub const SMALL_THUMB_PARAMS: &str = "&fm=jpg&w=100&h=100&fit=clip";
/// Large thumbnail: fits within 200x200 without cropping.
pub const LARGE_THUMB_PARAMS: &str = "&fm=jpg&w=200&h=200&fit=clip";

pub fn regular_size(raw_url: &str) -> String {
    format!("{}{}", raw_url, REGULAR_SIZE_PARAMS)
}

pub fn small_thumb_size(raw_url: &str) -> String {
    format!("{}{}", raw_url, SMALL_THUMB_PARAMS)
}

pub fn large_thumb_size(raw_url: &str) -> String {
    format!("{}{}", raw_url, LARGE_THUMB_PARAMS)
}

pub fn derive_urls(raw_url: &str) -> ImageUrls {
    ImageUrls {
        regular: regular_size(raw_url),
        small_thumb: small_thumb_size(raw_url),
        large_thumb: large_thumb_size(raw_url),
    }
}
