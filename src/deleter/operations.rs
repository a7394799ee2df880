//! Asset delete operations
//!
//! Removes single image files or whole product folders. Every operation is
//! idempotent on "not found": an absent file or folder reports `false` or
//! zero, never an error.

use log::{info, warn};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

use crate::deleter::strategies::{option_strategies, DeleteStrategy};
use crate::error::ImageStoreError;
use crate::resolver::{sanitize, PathResolver};
use crate::utils::fs as fsutil;

/// Deletes image files and product folders under the asset root.
#[derive(Debug, Clone)]
pub struct AssetDeleter {
    resolver: Arc<PathResolver>,
}

impl AssetDeleter {
    pub fn new(resolver: Arc<PathResolver>) -> Self {
        Self { resolver }
    }

    /// Delete the file a stored public URL points at. Returns whether a
    /// file was removed; an already-absent file is a normal outcome.
    pub async fn delete_by_public_url(&self, url: &str) -> Result<bool, ImageStoreError> {
        let path = self.resolver.from_public_url(url)?;
        if self.locate_inside_root(&path).await?.is_none() {
            return Ok(false);
        }

        let removed = fsutil::remove_file_if_exists(&path).await?;
        if removed {
            info!("Deleted {} ({})", path.display(), url);
        }
        Ok(removed)
    }

    /// Fallback delete for an option image: removes the first file in the
    /// product folder named after the option, whatever its extension. Used
    /// when the stored URL is missing or no longer matches a file.
    pub async fn delete_option(
        &self,
        product_name: &str,
        option_name: &str,
    ) -> Result<bool, ImageStoreError> {
        let folder = self.resolver.product_folder(product_name)?;
        let stem = sanitize(option_name)?;

        match fsutil::files_with_stem(&folder, &stem).await?.first() {
            Some(path) => {
                let removed = fsutil::remove_file_if_exists(path).await?;
                if removed {
                    info!("Deleted option image {} by name scan", path.display());
                }
                Ok(removed)
            }
            None => Ok(false),
        }
    }

    /// Remove a product's entire asset folder. Returns how many files went
    /// with it; a missing folder is an idempotent no-op reporting zero.
    pub async fn delete_product_folder(&self, product_name: &str) -> Result<u64, ImageStoreError> {
        let folder = self.resolver.product_folder(product_name)?;
        if self.locate_inside_root(&folder).await?.is_none() {
            return Ok(0);
        }

        let removed = fsutil::count_files(&folder).await?;
        match fs::remove_dir_all(&folder).await {
            Ok(()) => {
                info!(
                    "Removed product folder {} ({} files)",
                    folder.display(),
                    removed
                );
                Ok(removed)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(ImageStoreError::Io(e)),
        }
    }

    /// Delete one option's image by trying each strategy in order: the
    /// exact stored URL first, the name scan second. Stops at the first
    /// strategy that finds a file.
    pub async fn remove_option_image(
        &self,
        product_name: &str,
        option_name: &str,
        stored_url: Option<&str>,
    ) -> Result<bool, ImageStoreError> {
        for (attempt, strategy) in option_strategies(product_name, option_name, stored_url)
            .iter()
            .enumerate()
        {
            if attempt > 0 {
                warn!(
                    "Stored URL for option '{}' of '{}' matched no file; trying name scan",
                    option_name, product_name
                );
            }
            let found = match strategy {
                DeleteStrategy::ByStoredUrl(url) => self.delete_by_public_url(url).await?,
                DeleteStrategy::ByNameScan {
                    product_name,
                    option_name,
                } => self.delete_option(product_name, option_name).await?,
            };
            if found {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Canonicalize an existing path and require it inside the asset root,
    /// catching symlink escapes the lexical URL guard cannot see.
    /// `Ok(None)` means the path does not exist.
    pub(crate) async fn locate_inside_root(
        &self,
        path: &Path,
    ) -> Result<Option<PathBuf>, ImageStoreError> {
        let canonical = match fs::canonicalize(path).await {
            Ok(p) => p,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ImageStoreError::Io(e)),
        };
        let root = fs::canonicalize(self.resolver.asset_root()).await?;
        if !canonical.starts_with(&root) {
            warn!(
                "Blocked file operation outside the asset root: {}",
                path.display()
            );
            return Err(ImageStoreError::Traversal(
                path.to_string_lossy().into_owned(),
            ));
        }
        Ok(Some(canonical))
    }
}
