//! Wire model for the remote gallery API.
//!
//! Field names mirror the server's JSON exactly: item fields are
//! camelCase (`createdAt`), list envelopes are snake_case
//! (`next_cursor`). The client never invents shapes of its own.

use serde::{Deserialize, Serialize};

/// A server-owned image record, cached client-side.
///
/// The collection held by the store is a cache, never authoritative:
/// every mutation resolves through the API and is followed by a
/// wholesale refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageItem {
    /// Opaque id, unique within the collection and stable for the
    /// image's lifetime.
    pub id: String,
    /// Original filename, display-only.
    pub name: String,
    /// Resolvable address of the displayable bytes.
    pub url: String,
    /// Byte count.
    #[serde(default)]
    pub size: u64,
    /// Creation instant, epoch milliseconds.
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
    /// Pixel dimensions, when the server knows them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Labels without `#` prefix; insertion order is irrelevant.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Response envelope of `GET /api/images`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagePage {
    pub items: Vec<ImageItem>,
    pub next_cursor: Option<String>,
}

/// Response envelope of `GET /api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagList {
    pub tags: Vec<String>,
}

/// Response body of `POST /api/upload`.
///
/// Servers are only guaranteed to return the stored `url`; everything
/// else the client reconstructs from the staged file.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
}
