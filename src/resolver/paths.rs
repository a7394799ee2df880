//! Path and URL resolution
//!
//! Maps sanitized entity names to filesystem paths under the asset root and
//! converts between those paths and the public URLs the backend serves them
//! at.

use log::warn;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::{Component, Path, PathBuf};

use crate::error::PathError;
use crate::resolver::sanitize::{sanitize, sanitize_extension};

/// File stem reserved for a product's main image
pub const MAIN_IMAGE_STEM: &str = "main";

/// Bytes percent-encoded inside a URL path segment, on top of the
/// non-ASCII bytes the encoder always escapes.
const SEGMENT_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'%')
    .add(b'/')
    .add(b'\\')
    .add(b'{')
    .add(b'}');

/// Resolves entity names to filesystem paths and public URLs.
///
/// Owns the configured asset root and public URL prefix; constructed once
/// at startup and shared by every component. Nothing here touches the
/// filesystem: resolution is deterministic string and path work, and
/// symlink containment is re-checked by the components right before any
/// destructive operation.
#[derive(Debug, Clone)]
pub struct PathResolver {
    asset_root: PathBuf,
    public_prefix: String,
}

impl PathResolver {
    /// Create a resolver for one asset root. The prefix is normalized to
    /// a leading slash and no trailing slash.
    pub fn new(asset_root: PathBuf, public_prefix: &str) -> Self {
        let public_prefix = format!("/{}", public_prefix.trim_matches('/'));
        Self {
            asset_root,
            public_prefix,
        }
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Folder holding every asset of one product
    pub fn product_folder(&self, product_name: &str) -> Result<PathBuf, PathError> {
        Ok(self.asset_root.join(sanitize(product_name)?))
    }

    /// Path of a product's main image
    pub fn main_path(&self, product_name: &str, ext: &str) -> Result<PathBuf, PathError> {
        let folder = self.product_folder(product_name)?;
        Ok(folder.join(format!("{}.{}", MAIN_IMAGE_STEM, sanitize_extension(ext)?)))
    }

    /// Path of one option's image inside its product folder
    pub fn option_path(
        &self,
        product_name: &str,
        option_name: &str,
        ext: &str,
    ) -> Result<PathBuf, PathError> {
        let folder = self.product_folder(product_name)?;
        Ok(folder.join(format!(
            "{}.{}",
            sanitize(option_name)?,
            sanitize_extension(ext)?
        )))
    }

    /// Public URL of an already-sanitized folder segment, e.g.
    /// `/images/Red%20Mat`. Used for the URL rewrites a folder rename
    /// requires.
    pub fn folder_url(&self, segment: &str) -> String {
        format!(
            "{}/{}",
            self.public_prefix,
            utf8_percent_encode(segment, SEGMENT_ENCODE)
        )
    }

    /// Public URL for a path under the asset root.
    ///
    /// Each segment is percent-encoded so non-ASCII names survive the
    /// transport. Round-trips exactly through [`Self::from_public_url`] for
    /// every path this resolver produces.
    pub fn to_public_url(&self, path: &Path) -> Result<String, PathError> {
        let rel = path
            .strip_prefix(&self.asset_root)
            .map_err(|_| PathError::Traversal(path.to_string_lossy().into_owned()))?;

        let mut url = self.public_prefix.clone();
        let mut segments = 0usize;
        for component in rel.components() {
            match component {
                Component::Normal(seg) => {
                    let seg = seg
                        .to_str()
                        .ok_or_else(|| PathError::Traversal(path.to_string_lossy().into_owned()))?;
                    url.push('/');
                    url.push_str(&utf8_percent_encode(seg, SEGMENT_ENCODE).to_string());
                    segments += 1;
                }
                _ => {
                    return Err(PathError::Traversal(path.to_string_lossy().into_owned()));
                }
            }
        }

        if segments == 0 {
            return Err(PathError::Traversal(path.to_string_lossy().into_owned()));
        }
        Ok(url)
    }

    /// Resolve a public URL back to a path strictly inside the asset root.
    ///
    /// Rejects URLs outside the public prefix, `.`/`..` segments, absolute
    /// overrides and separator smuggling through percent-encoding. Every
    /// rejection is a [`PathError::Traversal`] and is logged: a URL that
    /// does not decode to a location under the root is a security signal,
    /// not a lookup miss.
    pub fn from_public_url(&self, url: &str) -> Result<PathBuf, PathError> {
        let rejected = |reason: &str| {
            warn!("Rejected asset URL {:?}: {}", url, reason);
            PathError::Traversal(url.to_string())
        };

        let rest = url
            .strip_prefix(&self.public_prefix)
            .ok_or_else(|| rejected("not under the public prefix"))?;
        if !rest.starts_with('/') {
            return Err(rejected("not under the public prefix"));
        }

        let mut path = self.asset_root.clone();
        let mut depth = 0usize;
        for raw in rest.split('/') {
            if raw.is_empty() {
                continue;
            }
            let segment = percent_decode_str(raw)
                .decode_utf8()
                .map_err(|_| rejected("segment is not valid UTF-8"))?;
            if segment == "." || segment == ".." {
                return Err(rejected("dot segment"));
            }
            if segment.contains(['/', '\\', '\0']) {
                return Err(rejected("encoded separator in segment"));
            }
            path.push(segment.as_ref());
            depth += 1;
        }

        if depth == 0 {
            return Err(rejected("URL names the asset root itself"));
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> PathResolver {
        PathResolver::new(PathBuf::from("/srv/assets"), "/images")
    }

    #[test]
    fn test_prefix_normalization() {
        assert_eq!(
            PathResolver::new(PathBuf::from("/a"), "images/").public_prefix(),
            "/images"
        );
        assert_eq!(
            PathResolver::new(PathBuf::from("/a"), "/images").public_prefix(),
            "/images"
        );
    }

    #[test]
    fn test_main_and_option_paths() {
        let r = resolver();
        assert_eq!(
            r.main_path("Red Mat", "PNG").unwrap(),
            PathBuf::from("/srv/assets/Red Mat/main.png")
        );
        assert_eq!(
            r.option_path("Red Mat", "Large", ".jpg").unwrap(),
            PathBuf::from("/srv/assets/Red Mat/Large.jpg")
        );
    }

    #[test]
    fn test_url_round_trip_ascii() {
        let r = resolver();
        let path = r.main_path("Red Mat", "png").unwrap();
        let url = r.to_public_url(&path).unwrap();
        assert_eq!(url, "/images/Red%20Mat/main.png");
        assert_eq!(r.from_public_url(&url).unwrap(), path);
    }

    #[test]
    fn test_url_round_trip_rtl() {
        let r = resolver();
        let path = r.option_path("שטיח אדום", "גדול", "jpg").unwrap();
        let url = r.to_public_url(&path).unwrap();
        assert!(url.starts_with("/images/"));
        assert!(url.is_ascii());
        assert_eq!(r.from_public_url(&url).unwrap(), path);
    }

    #[test]
    fn test_url_round_trip_percent_in_name() {
        let r = resolver();
        let path = r.main_path("50% off", "png").unwrap();
        let url = r.to_public_url(&path).unwrap();
        assert_eq!(r.from_public_url(&url).unwrap(), path);
    }

    #[test]
    fn test_from_url_rejects_traversal() {
        let r = resolver();
        assert!(matches!(
            r.from_public_url("/images/../../etc/passwd"),
            Err(PathError::Traversal(_))
        ));
        assert!(matches!(
            r.from_public_url("/images/%2e%2e/secret"),
            Err(PathError::Traversal(_))
        ));
        assert!(matches!(
            r.from_public_url("/images/a%2fb/main.png"),
            Err(PathError::Traversal(_))
        ));
    }

    #[test]
    fn test_from_url_rejects_foreign_prefix() {
        let r = resolver();
        assert!(matches!(
            r.from_public_url("https://cdn.example.com/images/x/main.png"),
            Err(PathError::Traversal(_))
        ));
        assert!(matches!(
            r.from_public_url("/imagesFoo/x/main.png"),
            Err(PathError::Traversal(_))
        ));
        assert!(matches!(
            r.from_public_url("/images"),
            Err(PathError::Traversal(_))
        ));
    }

    #[test]
    fn test_to_url_rejects_paths_outside_root() {
        let r = resolver();
        assert!(matches!(
            r.to_public_url(Path::new("/etc/passwd")),
            Err(PathError::Traversal(_))
        ));
        assert!(matches!(
            r.to_public_url(Path::new("/srv/assets")),
            Err(PathError::Traversal(_))
        ));
    }

    #[test]
    fn test_folder_url_encoding() {
        let r = resolver();
        assert_eq!(r.folder_url("Red Mat"), "/images/Red%20Mat");
    }
}
