//! photobooth-core: client-side state layer for the photobooth gallery.
//!
//! The server owns all persistence and image processing; this crate
//! owns everything the client keeps in its head during one session:
//! the cached image collection, upload staging and sequencing, the
//! tag filter, and the lightbox cursor. View layers (web, CLI) stay
//! stateless and drive [`store::GalleryStore`] through its commands.

pub mod api;
pub mod error;
pub mod format;
pub mod model;
pub mod staged;
pub mod store;

pub use api::{ApiError, GalleryApi, HttpGalleryApi, StagedSource};
pub use error::GalleryError;
pub use format::{format_bytes, format_date};
pub use model::{ImageItem, ImagePage};
pub use staged::{PendingUpload, StageReport, MAX_STAGED_FILES};
pub use store::{BatchReport, GalleryStore, LoadStatus};
