//! Remote gallery API abstraction.
//!
//! The store talks to the server only through [`GalleryApi`], so tests
//! (and alternative transports) can substitute their own backend.

pub mod http;

pub use http::HttpGalleryApi;

use thiserror::Error;

use crate::model::{ImageItem, ImagePage};

/// Errors from the remote gallery API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection, timeout, body read).
    #[error("Request failed: {message}")]
    Transport { message: String },

    /// The server answered with a non-2xx status.
    #[error("Server returned status {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Invalid response: {message}")]
    Decode { message: String },

    /// The request could not be built from the staged file.
    #[error("Invalid upload payload: {message}")]
    Payload { message: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport {
            message: e.to_string(),
        }
    }
}

/// A raw file selected or dropped by the user, before upload.
#[derive(Debug, Clone)]
pub struct StagedSource {
    /// Original filename.
    pub name: String,
    /// MIME type as reported by the picker (`image/png`, ...).
    pub content_type: String,
    /// Full file contents.
    pub bytes: Vec<u8>,
}

impl StagedSource {
    /// Only `image/*` files are eligible for staging.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// The remote collaborator owning all persistence.
///
/// Implementations are session-scoped context objects carrying their
/// own base URL; there is no process-wide API singleton.
#[allow(async_fn_in_trait)]
pub trait GalleryApi {
    /// `GET /api/images?max=N` — list up to `max` images.
    async fn list_images(&self, max: u32) -> Result<ImagePage, ApiError>;

    /// `POST /api/upload` — multipart upload of one file with its tags.
    ///
    /// Returns the stored record, reconstructed client-side where the
    /// server response is sparse.
    async fn upload(&self, file: &StagedSource, tags: &[String]) -> Result<ImageItem, ApiError>;

    /// `DELETE /api/images/{id}`.
    async fn delete_image(&self, id: &str) -> Result<(), ApiError>;

    /// `GET /api/tags?max=N` — suggestion source for the tag input.
    async fn list_tags(&self, max: u32) -> Result<Vec<String>, ApiError>;
}
