//! Staged uploads and local preview generation.
//!
//! A staged file lives from selection/drop until upload confirm,
//! cancel, or individual removal. Its preview is a `data:` URI built
//! locally, so the view can render it without any server round trip.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageReader;
use thiserror::Error;

use crate::api::StagedSource;

/// Upper bound on staged files per batch, to bound preview memory.
pub const MAX_STAGED_FILES: usize = 500;

/// A locally previewed, not-yet-submitted file.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub source: StagedSource,
    /// `data:<mime>;base64,...` representation of the file bytes.
    pub preview: String,
    /// Dimensions probed during the local decode.
    pub width: u32,
    pub height: u32,
}

/// A staged file whose bytes could not be decoded as an image.
#[derive(Debug, Error)]
#[error("Could not decode {name}: {message}")]
pub struct PreviewError {
    pub name: String,
    pub message: String,
}

/// Result of staging one batch of dropped/picked files.
#[derive(Debug, Default)]
pub struct StageReport {
    /// Files accepted and appended to the pending queue.
    pub staged: usize,
    /// Files skipped because they are not `image/*`.
    pub rejected: usize,
    /// Files dropped because the batch exceeded [`MAX_STAGED_FILES`].
    pub over_cap: usize,
    /// Per-file decode failures, by name.
    pub failures: Vec<String>,
}

/// Decode one staged file into its preview representation.
///
/// Probing the dimensions forces a real decode of the header, so
/// corrupt or mislabeled files fail here rather than at render time.
pub(crate) fn decode_preview(source: StagedSource) -> Result<PendingUpload, PreviewError> {
    let reader = ImageReader::new(Cursor::new(&source.bytes))
        .with_guessed_format()
        .map_err(|e| PreviewError {
            name: source.name.clone(),
            message: e.to_string(),
        })?;
    let (width, height) = reader.into_dimensions().map_err(|e| PreviewError {
        name: source.name.clone(),
        message: e.to_string(),
    })?;

    let preview = format!(
        "data:{};base64,{}",
        source.content_type,
        STANDARD.encode(&source.bytes)
    );

    Ok(PendingUpload {
        source,
        preview,
        width,
        height,
    })
}

/// Generate previews for a batch of raw files.
///
/// Non-image files are rejected up front and the batch is capped at
/// [`MAX_STAGED_FILES`]. All remaining decodes run concurrently; the
/// join preserves submission order. The effect is applied atomically
/// by the caller once every preview has resolved: decodable files are
/// appended, failures are reported by name in the [`StageReport`]
/// rather than silently dropping the batch.
pub(crate) async fn stage_previews(files: Vec<StagedSource>) -> (Vec<PendingUpload>, StageReport) {
    let total = files.len();
    let mut accepted: Vec<StagedSource> = files.into_iter().filter(StagedSource::is_image).collect();

    let mut report = StageReport {
        rejected: total - accepted.len(),
        ..StageReport::default()
    };
    if accepted.len() > MAX_STAGED_FILES {
        report.over_cap = accepted.len() - MAX_STAGED_FILES;
        accepted.truncate(MAX_STAGED_FILES);
    }

    let handles: Vec<_> = accepted
        .into_iter()
        .map(|source| tokio::task::spawn_blocking(move || decode_preview(source)))
        .collect();

    let mut pending = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(Ok(upload)) => pending.push(upload),
            Ok(Err(e)) => report.failures.push(e.to_string()),
            Err(e) => report.failures.push(format!("Preview task failed: {e}")),
        }
    }
    report.staged = pending.len();

    (pending, report)
}

/// Smallest valid 1x1 PNG (RGBA, single IDAT). Test fixture.
#[cfg(test)]
pub(crate) fn tiny_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x62, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_source(name: &str) -> StagedSource {
        StagedSource {
            name: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: tiny_png(),
        }
    }

    #[test]
    fn preview_is_a_data_uri_with_dimensions() {
        let upload = decode_preview(png_source("dot.png")).unwrap();
        assert!(upload.preview.starts_with("data:image/png;base64,"));
        assert_eq!((upload.width, upload.height), (1, 1));
    }

    #[test]
    fn corrupt_bytes_fail_by_name() {
        let source = StagedSource {
            name: "broken.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0xDE, 0xAD, 0xBE, 0xEF],
        };
        let err = decode_preview(source).unwrap_err();
        assert!(err.to_string().contains("broken.png"));
    }

    #[tokio::test]
    async fn non_image_files_are_rejected() {
        let files = vec![
            png_source("keep.png"),
            StagedSource {
                name: "notes.txt".to_string(),
                content_type: "text/plain".to_string(),
                bytes: b"hello".to_vec(),
            },
        ];
        let (pending, report) = stage_previews(files).await;
        assert_eq!(pending.len(), 1);
        assert_eq!(report.rejected, 1);
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn batch_is_capped_at_limit() {
        let files: Vec<StagedSource> = (0..600).map(|i| png_source(&format!("{i}.png"))).collect();
        let (pending, report) = stage_previews(files).await;
        assert_eq!(pending.len(), MAX_STAGED_FILES);
        assert_eq!(report.over_cap, 100);
    }

    #[tokio::test]
    async fn one_bad_decode_does_not_drop_the_batch() {
        let files = vec![
            png_source("good.png"),
            StagedSource {
                name: "bad.png".to_string(),
                content_type: "image/png".to_string(),
                bytes: vec![0x00, 0x01],
            },
        ];
        let (pending, report) = stage_previews(files).await;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].source.name, "good.png");
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("bad.png"));
    }
}
