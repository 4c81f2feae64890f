//! The gallery store: collection state, commands, and derived views.
//!
//! Single-writer discipline: views never touch state directly, they
//! dispatch commands and read derived views. Every mutating command
//! resolves through the remote API and then refreshes the collection
//! wholesale; the client cache is never authoritative.

use std::collections::BTreeSet;

use photobooth_tags::{apply_draft_input, filter_suggestions, parse_tags};

use crate::api::{ApiError, GalleryApi, StagedSource};
use crate::error::GalleryError;
use crate::model::{ImageItem, ImagePage};
use crate::staged::{stage_previews, PendingUpload, StageReport};

/// Images fetched per list request.
pub const PAGE_SIZE: u32 = 100;
/// Tag suggestions fetched per request.
pub const TAG_PAGE_SIZE: u32 = 100;
/// Collection size past which views should show a storage hint.
pub const STORAGE_HINT_THRESHOLD: usize = 150;

/// Loading state of the image collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Outcome of a sequential mutation batch (upload confirm, clear-all).
///
/// Per-item failures are collected, never aborting the batch; a bad
/// file must not block its siblings.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failures: Vec<String>,
}

impl BatchReport {
    /// Aggregated error for the view, if anything failed.
    pub fn to_error(&self) -> Option<GalleryError> {
        if self.failures.is_empty() {
            None
        } else {
            Some(GalleryError::UploadBatch {
                failures: self.failures.clone(),
            })
        }
    }
}

/// Client-side view-model of the server-owned image collection.
///
/// Owns the cached image list, upload staging queue, tag filter, and
/// lightbox cursor. `A` is the remote collaborator; tests substitute
/// scripted backends through it.
pub struct GalleryStore<A: GalleryApi> {
    api: A,
    images: Vec<ImageItem>,
    status: LoadStatus,
    selected_tags: BTreeSet<String>,
    pending_uploads: Vec<PendingUpload>,
    tag_draft: String,
    tag_suggestions: Vec<String>,
    is_adding: bool,
    is_uploading: bool,
    lightbox: Option<usize>,
    load_seq: u64,
}

impl<A: GalleryApi> GalleryStore<A> {
    /// Create a store for one session. The collection starts in
    /// `Loading` until the first `load()` resolves.
    pub fn new(api: A) -> Self {
        Self {
            api,
            images: Vec::new(),
            status: LoadStatus::Loading,
            selected_tags: BTreeSet::new(),
            pending_uploads: Vec::new(),
            tag_draft: String::new(),
            tag_suggestions: Vec::new(),
            is_adding: false,
            is_uploading: false,
            lightbox: None,
            load_seq: 0,
        }
    }

    // --- state access ---

    pub fn images(&self) -> &[ImageItem] {
        &self.images
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn selected_tags(&self) -> &BTreeSet<String> {
        &self.selected_tags
    }

    pub fn pending_uploads(&self) -> &[PendingUpload] {
        &self.pending_uploads
    }

    pub fn tag_draft(&self) -> &str {
        &self.tag_draft
    }

    pub fn is_adding(&self) -> bool {
        self.is_adding
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    pub fn lightbox(&self) -> Option<usize> {
        self.lightbox
    }

    // --- loading ---

    /// Fetch the image list, replacing the collection wholesale.
    ///
    /// Safe to call repeatedly as a retry. A load issued while an older
    /// one is still in flight wins regardless of response arrival
    /// order: each load takes a sequence token and a response is only
    /// applied while its token is still the latest.
    pub async fn load(&mut self) {
        let token = self.begin_load();
        let result = self.api.list_images(PAGE_SIZE).await;
        self.finish_load(token, result);
    }

    fn begin_load(&mut self) -> u64 {
        self.load_seq += 1;
        self.status = LoadStatus::Loading;
        self.load_seq
    }

    fn finish_load(&mut self, token: u64, result: Result<ImagePage, ApiError>) {
        if token != self.load_seq {
            // Stale response; a newer load owns the collection now.
            return;
        }
        match result {
            Ok(page) => {
                self.images = page.items;
                self.status = LoadStatus::Ready;
                // Wholesale replacement can shrink the list under an
                // open lightbox.
                if self.lightbox.is_some_and(|i| i >= self.images.len()) {
                    self.lightbox = None;
                }
            }
            Err(e) => {
                self.status = LoadStatus::Failed(GalleryError::Load(e).to_string());
            }
        }
    }

    // --- tag suggestions ---

    /// Refresh the suggestion pool from the server. On failure the pool
    /// is emptied rather than left stale.
    pub async fn refresh_tag_suggestions(&mut self) -> Result<(), GalleryError> {
        match self.api.list_tags(TAG_PAGE_SIZE).await {
            Ok(tags) => {
                self.tag_suggestions = tags;
                Ok(())
            }
            Err(e) => {
                self.tag_suggestions.clear();
                Err(GalleryError::TagSuggest(e))
            }
        }
    }

    /// Suggestions applicable to the current draft.
    pub fn suggestions_for_draft(&self) -> Vec<String> {
        filter_suggestions(&self.tag_draft, &self.tag_suggestions)
    }

    // --- staging ---

    /// Enter or leave "adding" mode; either way the staging queue and
    /// tag draft are reset.
    pub fn toggle_adding(&mut self) {
        self.is_adding = !self.is_adding;
        self.pending_uploads.clear();
        self.tag_draft.clear();
    }

    /// Stage dropped or picked files for upload.
    ///
    /// Non-image files are rejected and each batch is capped at
    /// [`crate::staged::MAX_STAGED_FILES`]. Previews are generated
    /// concurrently and appended atomically once all have resolved;
    /// per-file decode failures are reported in the [`StageReport`]
    /// without dropping the rest of the batch.
    pub async fn stage_files(&mut self, files: Vec<StagedSource>) -> StageReport {
        let (pending, report) = stage_previews(files).await;
        self.pending_uploads.extend(pending);
        report
    }

    /// Remove one staged file by position; out-of-range is a no-op.
    pub fn remove_staged(&mut self, index: usize) {
        if index < self.pending_uploads.len() {
            self.pending_uploads.remove(index);
        }
    }

    /// Fold a raw tag-input value into the draft (see
    /// [`photobooth_tags::apply_draft_input`]).
    pub fn update_tag_draft(&mut self, input: &str) {
        self.tag_draft = apply_draft_input(&self.tag_draft, input);
    }

    // --- mutations ---

    /// Upload every staged file, sequentially, tagged with the parsed
    /// draft.
    ///
    /// Per-file failures are collected into the report instead of
    /// aborting the batch. If at least one upload succeeded the
    /// collection is resynced from the server and staging state is
    /// cleared; otherwise the staged files are kept for retry.
    /// `is_uploading` is reset on every exit path.
    pub async fn confirm_upload(&mut self) -> BatchReport {
        if self.pending_uploads.is_empty() {
            return BatchReport::default();
        }
        self.is_uploading = true;

        let tags = parse_tags(&self.tag_draft);
        let mut report = BatchReport::default();
        for pending in &self.pending_uploads {
            match self.api.upload(&pending.source, &tags).await {
                Ok(_) => report.succeeded += 1,
                Err(e) => report.failures.push(format!(
                    "Failed to upload {}: {}",
                    pending.source.name, e
                )),
            }
        }

        if report.succeeded > 0 {
            self.load().await;
            self.pending_uploads.clear();
            self.tag_draft.clear();
            self.is_adding = false;
        }
        self.is_uploading = false;
        report
    }

    /// Delete one image, then resync.
    ///
    /// No optimistic removal: a failed delete leaves local state
    /// untouched so the view never disagrees with the server.
    pub async fn delete_image(&mut self, id: &str) -> Result<(), GalleryError> {
        if let Err(e) = self.api.delete_image(id).await {
            return Err(GalleryError::Delete {
                id: id.to_string(),
                source: e,
            });
        }
        self.load().await;
        Ok(())
    }

    /// Delete every image in the collection, server-side, then resync.
    ///
    /// Irreversible; callers must gate this behind explicit user
    /// confirmation. Per-item failures are collected like uploads, so
    /// one stubborn image does not block the rest.
    pub async fn clear_all(&mut self) -> BatchReport {
        let ids: Vec<String> = self.images.iter().map(|img| img.id.clone()).collect();
        let mut report = BatchReport::default();
        for id in &ids {
            match self.api.delete_image(id).await {
                Ok(()) => report.succeeded += 1,
                Err(e) => report.failures.push(format!("Failed to delete {id}: {e}")),
            }
        }
        if report.succeeded > 0 {
            self.load().await;
        }
        report
    }

    // --- tag filter ---

    pub fn toggle_tag_filter(&mut self, tag: &str) {
        if !self.selected_tags.remove(tag) {
            self.selected_tags.insert(tag.to_string());
        }
    }

    pub fn clear_tag_filter(&mut self) {
        self.selected_tags.clear();
    }

    // --- derived views ---

    /// The collection narrowed by the tag filter.
    ///
    /// An empty filter selects everything. Otherwise an image must
    /// carry every selected tag (match-all semantics).
    pub fn filtered_images(&self) -> Vec<&ImageItem> {
        if self.selected_tags.is_empty() {
            return self.images.iter().collect();
        }
        self.images
            .iter()
            .filter(|img| {
                self.selected_tags
                    .iter()
                    .all(|tag| img.tags.iter().any(|have| have == tag))
            })
            .collect()
    }

    /// Sorted universe of tags across the collection.
    pub fn all_tags(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .images
            .iter()
            .flat_map(|img| img.tags.iter().map(String::as_str))
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Whether the collection is large enough to warn about storage.
    pub fn storage_hint(&self) -> bool {
        self.images.len() > STORAGE_HINT_THRESHOLD
    }

    // --- lightbox ---

    /// Open the viewer on an index into the unfiltered collection;
    /// out-of-range indexes are ignored.
    pub fn open_lightbox(&mut self, index: usize) {
        if index < self.images.len() {
            self.lightbox = Some(index);
        }
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox = None;
    }

    /// Step to the previous image, wrapping at the start. No-op while
    /// the viewer is closed.
    pub fn lightbox_prev(&mut self) {
        if let Some(i) = self.lightbox {
            let len = self.images.len();
            if len > 0 {
                self.lightbox = Some((i + len - 1) % len);
            }
        }
    }

    /// Step to the next image, wrapping at the end. No-op while the
    /// viewer is closed.
    pub fn lightbox_next(&mut self) {
        if let Some(i) = self.lightbox {
            let len = self.images.len();
            if len > 0 {
                self.lightbox = Some((i + 1) % len);
            }
        }
    }
}
