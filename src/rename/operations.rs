//! Rename cascade operations
//!
//! Relocates product folders and option image files when their entities are
//! renamed, and reports what the caller must rewrite in its own records.

use log::{info, warn};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;

use crate::deleter::AssetDeleter;
use crate::error::ImageStoreError;
use crate::rename::results::{FolderRename, OptionRename};
use crate::resolver::{sanitize, PathResolver};
use crate::utils::fs as fsutil;

/// Coordinates filesystem moves for product and option renames.
///
/// Moves are single directory or file renames, atomic on same-volume
/// storage. They are not transactional with the caller's database: the
/// caller must apply the reported URL rewrites immediately after a
/// successful move, and a failure between the two leaves drift for an
/// external reconciliation pass to repair. A rename racing a concurrent
/// write under the old name can likewise orphan a file under the old
/// folder; no cross-request lock is taken.
#[derive(Debug, Clone)]
pub struct RenameCascade {
    resolver: Arc<PathResolver>,
    deleter: AssetDeleter,
}

impl RenameCascade {
    pub fn new(resolver: Arc<PathResolver>, deleter: AssetDeleter) -> Self {
        Self { resolver, deleter }
    }

    /// Move a product's asset folder to its renamed location.
    ///
    /// Equal sanitized names and an absent source folder are no-op
    /// successes. An existing destination folder is a conflict: another
    /// product's assets are never merged into or overwritten, and neither
    /// folder is touched.
    pub async fn rename_product_folder(
        &self,
        old_name: &str,
        new_name: &str,
    ) -> Result<FolderRename, ImageStoreError> {
        let old_segment = sanitize(old_name)?;
        let new_segment = sanitize(new_name)?;

        if old_segment == new_segment {
            return Ok(self.folder_outcome(old_segment, new_segment, 0, false));
        }

        let old_folder = self.resolver.asset_root().join(&old_segment);
        let new_folder = self.resolver.asset_root().join(&new_segment);

        match fs::metadata(&old_folder).await {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(
                    "No asset folder for '{}'; rename to '{}' is a no-op",
                    old_name, new_name
                );
                return Ok(self.folder_outcome(old_segment, new_segment, 0, false));
            }
            Err(e) => return Err(ImageStoreError::Io(e)),
        }

        match fs::metadata(&new_folder).await {
            Ok(_) => {
                return Err(ImageStoreError::Conflict(format!(
                    "destination folder already exists: {}",
                    new_folder.display()
                )));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(ImageStoreError::Io(e)),
        }

        let moved = fsutil::count_files(&old_folder).await?;
        fs::rename(&old_folder, &new_folder).await?;
        info!(
            "Renamed product folder {} -> {} ({} files)",
            old_folder.display(),
            new_folder.display(),
            moved
        );

        Ok(self.folder_outcome(old_segment, new_segment, moved, true))
    }

    /// Move one option's image file to its renamed option.
    ///
    /// The stored URL is tried first; when it no longer matches a file the
    /// product folder is scanned for the old option name. `None` means
    /// nothing was found to rename; the caller should leave its stored URL
    /// as-is or clear it.
    pub async fn rename_option(
        &self,
        product_name: &str,
        old_option_name: &str,
        new_option_name: &str,
        current_url: Option<&str>,
    ) -> Result<Option<OptionRename>, ImageStoreError> {
        let folder = self.resolver.product_folder(product_name)?;
        let old_stem = sanitize(old_option_name)?;
        let new_stem = sanitize(new_option_name)?;

        // Locate the source: exact stored URL first, old-name scan on drift.
        let had_url = current_url.is_some_and(|u| !u.is_empty());
        let mut recovered_by_scan = false;
        let mut source: Option<PathBuf> = None;
        if let Some(url) = current_url.filter(|u| !u.is_empty()) {
            let path = self.resolver.from_public_url(url)?;
            if self.deleter.locate_inside_root(&path).await?.is_some() {
                source = Some(path);
            }
        }
        if source.is_none() {
            if let Some(path) = fsutil::files_with_stem(&folder, &old_stem)
                .await?
                .into_iter()
                .next()
            {
                if had_url {
                    warn!(
                        "Stored URL for option '{}' of '{}' is stale; renaming {} found by scan",
                        old_option_name,
                        product_name,
                        path.display()
                    );
                }
                source = Some(path);
                recovered_by_scan = true;
            }
        }
        let Some(source) = source else {
            info!(
                "No image to rename for option '{}' of '{}'",
                old_option_name, product_name
            );
            return Ok(None);
        };

        // Keep whatever extension the file already carries.
        let target = match source.extension().and_then(|e| e.to_str()) {
            Some(ext) => folder.join(format!("{}.{}", new_stem, ext)),
            None => folder.join(&new_stem),
        };

        if target == source {
            let url = self.resolver.to_public_url(&source)?;
            return Ok(Some(OptionRename {
                url,
                path: source,
                recovered_by_scan,
            }));
        }

        // The new name must not collide with another option's file, under
        // any extension.
        let occupied = fsutil::files_with_stem(&folder, &new_stem)
            .await?
            .into_iter()
            .any(|existing| existing != source);
        if occupied {
            return Err(ImageStoreError::Conflict(format!(
                "an image named '{}' already exists in {}",
                new_stem,
                folder.display()
            )));
        }

        fs::rename(&source, &target).await?;
        info!(
            "Renamed option image {} -> {}",
            source.display(),
            target.display()
        );

        // Sweep stale files still carrying the old name (extension swaps
        // that predate the one-file-per-name discipline).
        if self.deleter.delete_option(product_name, old_option_name).await? {
            warn!(
                "Removed stale image still named '{}' under '{}'",
                old_stem, product_name
            );
        }

        let url = self.resolver.to_public_url(&target)?;
        Ok(Some(OptionRename {
            url,
            path: target,
            recovered_by_scan,
        }))
    }

    fn folder_outcome(
        &self,
        old_segment: String,
        new_segment: String,
        moved_file_count: u64,
        renamed: bool,
    ) -> FolderRename {
        FolderRename {
            old_url_prefix: self.resolver.folder_url(&old_segment),
            new_url_prefix: self.resolver.folder_url(&new_segment),
            old_segment,
            new_segment,
            moved_file_count,
            renamed,
        }
    }
}
