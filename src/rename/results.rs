//! Rename result types
//!
//! Defines result structures returned by rename-cascade operations.

use std::path::PathBuf;

/// Outcome of a product folder rename.
///
/// The filesystem move and the caller's database update are not atomic: if
/// the caller fails to rewrite its stored URLs after a successful move, the
/// two stores disagree until an external reconciliation pass repairs them.
/// Everything that rewrite (and reconciliation logging) needs is reported
/// here; the move itself is never rolled back.
#[derive(Debug, Clone)]
pub struct FolderRename {
    /// Sanitized segment the folder moved away from
    pub old_segment: String,
    /// Sanitized segment the folder now lives under
    pub new_segment: String,
    /// Encoded URL prefix of the old location, e.g. `/images/Red%20Mat`
    pub old_url_prefix: String,
    /// Encoded URL prefix of the new location
    pub new_url_prefix: String,
    /// Regular files that moved with the folder
    pub moved_file_count: u64,
    /// False when the rename was a no-op (equal sanitized segments or an
    /// absent source folder)
    pub renamed: bool,
}

impl FolderRename {
    /// Rewrite one stored URL from the old folder to the new one. URLs that
    /// do not reference the old folder come back unchanged.
    pub fn rewrite(&self, url: &str) -> String {
        let old = format!("{}/", self.old_url_prefix);
        let new = format!("{}/", self.new_url_prefix);
        url.replacen(&old, &new, 1)
    }
}

/// Outcome of an option image rename.
#[derive(Debug, Clone)]
pub struct OptionRename {
    /// Public URL of the file at its new location
    pub url: String,
    /// Filesystem path of the file at its new location
    pub path: PathBuf,
    /// True when the stored URL was stale and the file was located by
    /// scanning for the old option name instead
    pub recovered_by_scan: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder_rename() -> FolderRename {
        FolderRename {
            old_segment: "Red Mat".into(),
            new_segment: "Blue Mat".into(),
            old_url_prefix: "/images/Red%20Mat".into(),
            new_url_prefix: "/images/Blue%20Mat".into(),
            moved_file_count: 2,
            renamed: true,
        }
    }

    #[test]
    fn test_rewrite_matching_url() {
        let outcome = folder_rename();
        assert_eq!(
            outcome.rewrite("/images/Red%20Mat/main.png"),
            "/images/Blue%20Mat/main.png"
        );
        assert_eq!(
            outcome.rewrite("/images/Red%20Mat/Large.jpg"),
            "/images/Blue%20Mat/Large.jpg"
        );
    }

    #[test]
    fn test_rewrite_leaves_foreign_urls_alone() {
        let outcome = folder_rename();
        assert_eq!(
            outcome.rewrite("/images/Green%20Mat/main.png"),
            "/images/Green%20Mat/main.png"
        );
        // a prefix match without the segment boundary must not rewrite
        assert_eq!(
            outcome.rewrite("/images/Red%20Matting/main.png"),
            "/images/Red%20Matting/main.png"
        );
    }
}
