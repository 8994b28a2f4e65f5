//! The fetch-dedup-apply pipeline.
//!
//! One linear pass: resolve metadata for the date, download the image,
//! hash it, persist file + record unless the digest is already indexed,
//! then apply the wallpaper. Every step is blocking from the caller's
//! perspective and any failure propagates; there is no retry and no
//! rollback of state written by earlier steps.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::api::ApodSource;
use crate::checksum;
use crate::date::ApodDate;
use crate::filename;
use crate::index::ImageIndex;
use crate::wallpaper::WallpaperSetter;

/// What a completed run did, for the CLI summary.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub image_url: String,
    /// Path the wallpaper was pointed at. On a dedup hit this is the
    /// originally stored location, not a re-derived basename.
    pub path: PathBuf,
    /// Exact payload byte count.
    pub size: u64,
    pub sha256: String,
    /// False when the digest was already indexed and nothing was written.
    pub newly_stored: bool,
}

/// Runs the whole pipeline for one date against one image directory.
pub async fn run(
    image_dir: &Path,
    date: ApodDate,
    source: &dyn ApodSource,
    wallpaper: &dyn WallpaperSetter,
) -> Result<PipelineOutcome> {
    let index = ImageIndex::open_in_dir(image_dir).await?;

    let info = source.info(date)?;
    let image_url = info.image_url()?.to_string();
    tracing::info!("APOD {}: {:?} at {}", date, info.title, image_url);

    let bytes = source
        .fetch_image(&image_url)
        .with_context(|| format!("download {}", image_url))?;
    let sha256 = checksum::sha256_bytes(&bytes);
    let size = bytes.len() as u64;
    tracing::debug!("downloaded {} bytes, sha256 {}", size, sha256);

    let (path, newly_stored) = match index.find_by_digest(&sha256).await? {
        Some(record) => {
            tracing::info!("image already indexed at {}, skipping save", record.location);
            (PathBuf::from(record.location), false)
        }
        None => {
            let path = target_path(image_dir, &image_url, &sha256)?;
            std::fs::write(&path, &bytes)
                .with_context(|| format!("write {}", path.display()))?;
            index
                .insert(path.to_string_lossy().as_ref(), size as i64, &sha256)
                .await?;
            tracing::info!("stored new image at {}", path.display());
            (path, true)
        }
    };

    // Fire-and-forget: a desktop that cannot be reached (headless session,
    // missing gsettings) must not fail the download/dedup work.
    if let Err(err) = wallpaper.set(&path) {
        tracing::warn!("could not set desktop background: {:#}", err);
    }

    Ok(PipelineOutcome {
        image_url,
        path,
        size,
        sha256,
        newly_stored,
    })
}

/// Where to write a new image. If the basename derived from the URL is
/// already taken by a file with different contents, the name gets a digest
/// tag instead of overwriting.
fn target_path(image_dir: &Path, url: &str, digest: &str) -> Result<PathBuf> {
    let name = filename::derive_filename(url);
    let candidate = image_dir.join(&name);
    if candidate.exists() && checksum::sha256_path(&candidate)? != digest {
        let renamed = filename::digest_suffixed(&name, digest);
        tracing::warn!(
            "{} already holds different bytes, writing {} instead",
            candidate.display(),
            renamed
        );
        return Ok(image_dir.join(renamed));
    }
    Ok(candidate)
}
