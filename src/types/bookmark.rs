use serde::{Deserialize, Serialize};

/// A bookmarked image as persisted in the local database.
///
/// `regular_size_url` is the natural key: no two bookmarks share it, and lists
/// are ordered by it ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkedImage {
    pub id: String,
    pub title: Option<String>,
    pub regular_size_url: String,
    pub large_thumb_size_url: String,
    pub created_at: i64,
}

/// Fields supplied by the caller when bookmarking an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub title: Option<String>,
    pub regular_size_url: String,
    pub large_thumb_size_url: String,
}
