//! Store-level error taxonomy.
//!
//! Every variant degrades to a readable message and leaves the store
//! in a retryable interactive state; there are no fatal failures.

use crate::api::ApiError;

/// Errors surfaced by [`GalleryStore`](crate::store::GalleryStore) commands.
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    /// The image list could not be fetched. Retryable via `load()`.
    #[error("Failed to load images: {0}")]
    Load(ApiError),

    /// Tag suggestions could not be fetched.
    #[error("Failed to load tags: {0}")]
    TagSuggest(ApiError),

    /// A delete request failed; local state was left untouched.
    #[error("Failed to delete image {id}: {source}")]
    Delete { id: String, source: ApiError },

    /// One or more uploads in a confirmed batch failed. Successful
    /// siblings were kept and the collection resynced.
    #[error("Some uploads failed:\n{}", .failures.join("\n"))]
    UploadBatch { failures: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_batch_aggregates_messages() {
        let err = GalleryError::UploadBatch {
            failures: vec![
                "Failed to upload a.png: Server returned status 500".to_string(),
                "Failed to upload b.png: Server returned status 500".to_string(),
            ],
        };
        let text = err.to_string();
        assert!(text.contains("a.png"));
        assert!(text.contains("b.png"));
    }

    #[test]
    fn delete_error_names_the_image() {
        let err = GalleryError::Delete {
            id: "img-7".to_string(),
            source: ApiError::Http {
                status: 404,
                message: "Not Found".to_string(),
            },
        };
        assert!(err.to_string().contains("img-7"));
    }
}
