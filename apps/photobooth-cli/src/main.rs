//! Photobooth command-line front end.
//!
//! A stateless view over [`photobooth_core::GalleryStore`]: each
//! subcommand dispatches store commands against a live gallery server
//! and prints the derived views. All gallery state lives in the core.

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use photobooth_core::{
    format_bytes, format_date, GalleryStore, HttpGalleryApi, LoadStatus, StagedSource,
};

#[derive(Parser)]
#[command(
    name = "photobooth",
    version,
    about = "Command-line client for a photobooth gallery server"
)]
struct Cli {
    /// Base URL of the gallery server
    #[arg(
        long,
        env = "PHOTOBOOTH_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List images, optionally narrowed by tags (an image must carry
    /// every given tag)
    List {
        #[arg(long)]
        tag: Vec<String>,
    },
    /// Print the server's tag universe
    Tags,
    /// Upload image files with a shared tag annotation
    Upload {
        /// Image files to stage
        files: Vec<PathBuf>,
        /// Tags for the whole batch, `#`-prefixed or not, whitespace
        /// separated
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Delete one image by id
    Delete { id: String },
    /// Delete every image on the server
    Clear {
        /// Confirm this irreversible action
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut store = GalleryStore::new(HttpGalleryApi::new(&cli.api_url));

    match cli.command {
        Command::List { tag } => {
            store.load().await;
            if let LoadStatus::Failed(message) = store.status() {
                return Err(message.clone().into());
            }
            for t in &tag {
                store.toggle_tag_filter(t);
            }
            let images = store.filtered_images();
            info!(count = images.len(), "gallery loaded");
            for img in &images {
                let tags: Vec<String> = img.tags.iter().map(|t| format!("#{t}")).collect();
                println!(
                    "{}  {:>10}  {}  {}  {}",
                    img.id,
                    format_bytes(img.size),
                    format_date(img.created_at),
                    img.name,
                    tags.join(" ")
                );
            }
            if store.storage_hint() {
                warn!("collection is getting large; consider pruning");
            }
        }

        Command::Tags => {
            store.refresh_tag_suggestions().await?;
            for tag in store.suggestions_for_draft() {
                println!("#{tag}");
            }
        }

        Command::Upload { files, tags } => {
            if files.is_empty() {
                return Err("nothing to upload".into());
            }
            let mut sources = Vec::with_capacity(files.len());
            for path in &files {
                sources.push(read_source(path)?);
            }

            store.toggle_adding();
            let staged = store.stage_files(sources).await;
            for failure in &staged.failures {
                warn!("{failure}");
            }
            if staged.rejected > 0 {
                warn!(skipped = staged.rejected, "non-image files were skipped");
            }
            if store.pending_uploads().is_empty() {
                return Err("no stageable image files".into());
            }

            store.update_tag_draft(&tags);
            let report = store.confirm_upload().await;
            println!("Uploaded {} image(s)", report.succeeded);
            if let Some(err) = report.to_error() {
                return Err(err.into());
            }
        }

        Command::Delete { id } => {
            store.delete_image(&id).await?;
            println!("Deleted {id}");
        }

        Command::Clear { yes } => {
            if !yes {
                return Err(
                    "this deletes every image on the server; re-run with --yes to confirm".into(),
                );
            }
            store.load().await;
            if let LoadStatus::Failed(message) = store.status() {
                return Err(message.clone().into());
            }
            let report = store.clear_all().await;
            println!("Deleted {} image(s)", report.succeeded);
            for failure in &report.failures {
                warn!("{failure}");
            }
        }
    }

    Ok(())
}

/// Stage a file from disk, inferring its MIME type from the extension.
/// Unknown extensions fall through to a type the store will reject.
fn read_source(path: &Path) -> Result<StagedSource, Box<dyn Error>> {
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    let content_type = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(image::ImageFormat::from_extension)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Ok(StagedSource {
        name,
        content_type,
        bytes,
    })
}
