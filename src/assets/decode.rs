use std::path::{Path, PathBuf};

use crate::foundation::core::SourceImage;
use crate::foundation::error::{Error, Result};

/// File extensions collected from an input directory, lower-case.
///
/// HEIC is not in the list: there is no decoder for it in this stack, so such
/// files are simply never collected.
pub const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

/// One input item: display name (file stem) plus its per-file decode outcome.
///
/// Undecodable files ride along as `Err` so the batch runner can record them
/// in input order instead of dropping them silently.
#[derive(Debug)]
pub struct ImageEntry {
    /// File stem, used to name the clip produced from this image.
    pub name: String,
    /// Decoded pixels, or the per-file failure.
    pub image: Result<SourceImage>,
}

/// Collect image files from `dir` in sorted order.
///
/// A missing or unreadable directory yields an empty list; an empty input set
/// is a batch-level concern, not a scan error.
pub fn collect_images(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "input directory not readable");
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| {
                        IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
                    })
        })
        .collect();
    paths.sort();
    paths
}

/// Decode one still image into RGBA8 pixels.
pub fn decode_image(path: &Path) -> Result<SourceImage> {
    let dyn_img = image::open(path)
        .map_err(|e| Error::invalid_image(format!("'{}': {e}", path.display())))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    SourceImage::from_rgba8(width, height, rgba.into_raw())
}

/// Scan `dir` and decode every collected file into an [`ImageEntry`].
pub fn load_dir(dir: &Path) -> Vec<ImageEntry> {
    collect_images(dir)
        .into_iter()
        .map(|path| {
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("image")
                .to_owned();
            ImageEntry {
                name,
                image: decode_image(&path),
            }
        })
        .collect()
}
