//! Asset write operations
//!
//! Persists uploaded image bytes under the asset root. Writes go to a
//! temporary file in the destination folder and are renamed into place, so
//! a crash or cancellation never leaves a partial file visible at the final
//! path.

use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

use crate::error::ImageStoreError;
use crate::resolver::{sanitize, PathResolver, MAIN_IMAGE_STEM};
use crate::utils::fs as fsutil;
use crate::writer::results::SavedImage;

/// Writes uploaded image bytes to their resolved locations.
///
/// Payloads arrive fully buffered from the upload front end, which also
/// enforces size limits. Two concurrent saves of the same logical asset
/// race last-writer-wins; no cross-request lock is taken.
#[derive(Debug, Clone)]
pub struct AssetWriter {
    resolver: Arc<PathResolver>,
}

impl AssetWriter {
    pub fn new(resolver: Arc<PathResolver>) -> Self {
        Self { resolver }
    }

    /// Save or replace a product's main image, creating the product folder
    /// on first write. Returns the public URL for the caller to store.
    pub async fn save_main(
        &self,
        product_name: &str,
        bytes: &[u8],
        ext: &str,
    ) -> Result<SavedImage, ImageStoreError> {
        let folder = self.resolver.product_folder(product_name)?;
        let path = self.resolver.main_path(product_name, ext)?;
        self.save_at(&folder, path, MAIN_IMAGE_STEM, bytes).await
    }

    /// Save or replace one option's image inside its product folder.
    pub async fn save_option(
        &self,
        product_name: &str,
        option_name: &str,
        bytes: &[u8],
        ext: &str,
    ) -> Result<SavedImage, ImageStoreError> {
        let folder = self.resolver.product_folder(product_name)?;
        let path = self.resolver.option_path(product_name, option_name, ext)?;
        let stem = sanitize(option_name)?;
        self.save_at(&folder, path, &stem, bytes).await
    }

    async fn save_at(
        &self,
        folder: &Path,
        path: PathBuf,
        stem: &str,
        bytes: &[u8],
    ) -> Result<SavedImage, ImageStoreError> {
        if bytes.is_empty() {
            return Err(ImageStoreError::Validation("empty image payload".into()));
        }

        fs::create_dir_all(folder).await?;

        // One file per logical asset: drop a predecessor carrying another
        // extension before the new bytes land.
        let mut replaced = None;
        for existing in fsutil::files_with_stem(folder, stem).await? {
            if existing != path && fsutil::remove_file_if_exists(&existing).await? {
                info!("Removed {} before extension change", existing.display());
                replaced = Some(existing);
            }
        }

        let temp = temp_path(&path);
        if let Err(e) = fs::write(&temp, bytes).await {
            error!("Failed to write temporary file {}: {}", temp.display(), e);
            let _ = fs::remove_file(&temp).await;
            return Err(ImageStoreError::Io(e));
        }
        if let Err(e) = fs::rename(&temp, &path).await {
            error!(
                "Failed to move {} to {}: {}",
                temp.display(),
                path.display(),
                e
            );
            let _ = fs::remove_file(&temp).await;
            return Err(ImageStoreError::Io(e));
        }

        let url = self.resolver.to_public_url(&path)?;
        info!(
            "Saved {} ({} bytes) -> {}",
            path.display(),
            bytes.len(),
            url
        );

        Ok(SavedImage {
            url,
            path,
            bytes_written: bytes.len() as u64,
            replaced,
        })
    }
}

/// Temporary sibling of the final path, e.g. `main.png` -> `main.png.tmp`.
/// The extra suffix keeps in-flight uploads out of stem scans.
fn temp_path(path: &Path) -> PathBuf {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    path.with_extension(format!("{}.tmp", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_keeps_extension() {
        assert_eq!(
            temp_path(Path::new("/a/b/main.png")),
            PathBuf::from("/a/b/main.png.tmp")
        );
    }
}
