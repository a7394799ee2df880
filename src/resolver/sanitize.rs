//! Name sanitizing
//!
//! Turns human-entered product and option names into filesystem-safe path
//! segments.

use crate::error::PathError;

/// Maximum characters kept in a sanitized path segment
pub const MAX_SEGMENT_CHARS: usize = 100;

/// Characters never allowed inside a path segment
fn is_forbidden(c: char) -> bool {
    c.is_control() || matches!(c, '/' | '\\' | '<' | '>' | ':' | '"' | '|' | '?' | '*')
}

/// Leading/trailing characters stripped from a segment. Dots are included
/// so `.` and `..` can never survive as segments.
fn is_trimmed(c: char) -> bool {
    c.is_whitespace() || c == '.'
}

/// Sanitize an entity name into a single path segment.
///
/// Strips path separators, control characters and characters illegal on
/// common filesystems, trims surrounding whitespace and dots, and caps the
/// segment length. Non-ASCII text (Hebrew, Arabic, CJK) passes through
/// unchanged. Idempotent: sanitizing a sanitized segment is a no-op.
pub fn sanitize(name: &str) -> Result<String, PathError> {
    let filtered: String = name.chars().filter(|c| !is_forbidden(*c)).collect();
    let trimmed = filtered.trim_matches(is_trimmed);
    let capped: String = trimmed.chars().take(MAX_SEGMENT_CHARS).collect();
    let segment = capped.trim_matches(is_trimmed);

    if segment.is_empty() {
        return Err(PathError::EmptyName(name.to_string()));
    }
    Ok(segment.to_string())
}

/// Normalize a file extension: no leading dot, lowercase, ASCII
/// alphanumerics only.
pub fn sanitize_extension(ext: &str) -> Result<String, PathError> {
    let normalized: String = ext
        .trim()
        .trim_start_matches('.')
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();

    if normalized.is_empty() {
        return Err(PathError::InvalidExtension(ext.to_string()));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_idempotent(name: &str) {
        let once = sanitize(name).unwrap();
        let twice = sanitize(&once).unwrap();
        assert_eq!(once, twice, "sanitize not idempotent for {:?}", name);
    }

    #[test]
    fn test_sanitize_plain_names() {
        assert_eq!(sanitize("Red Mat").unwrap(), "Red Mat");
        assert_eq!(sanitize("  Red Mat  ").unwrap(), "Red Mat");
        assert_idempotent("Red Mat");
    }

    #[test]
    fn test_sanitize_strips_separators_and_illegal_chars() {
        assert_eq!(sanitize("a/b\\c").unwrap(), "abc");
        assert_eq!(sanitize("big<sale>*?:\"|now").unwrap(), "bigsalenow");
        assert_idempotent("a/b\\c");
        assert_idempotent("big<sale>*?:\"|now");
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize("mat\0\r\n\tred").unwrap(), "matred");
        assert_idempotent("mat\0\r\n\tred");
    }

    #[test]
    fn test_sanitize_preserves_rtl_scripts() {
        assert_eq!(sanitize("שטיח אדום").unwrap(), "שטיח אדום");
        assert_eq!(sanitize("سجادة حمراء").unwrap(), "سجادة حمراء");
        assert_idempotent("שטיח אדום");
        assert_idempotent("سجادة حمراء");
    }

    #[test]
    fn test_sanitize_rejects_dot_segments() {
        assert!(matches!(sanitize("."), Err(PathError::EmptyName(_))));
        assert!(matches!(sanitize(".."), Err(PathError::EmptyName(_))));
        assert!(matches!(sanitize(" .. "), Err(PathError::EmptyName(_))));
        // interior dots survive
        assert_eq!(sanitize("v1.2 mat").unwrap(), "v1.2 mat");
        // mixed trailing dots and whitespace trim in one pass
        assert_eq!(sanitize("mat ..").unwrap(), "mat");
        assert_idempotent("mat ..");
    }

    #[test]
    fn test_sanitize_empty_inputs() {
        assert!(matches!(sanitize(""), Err(PathError::EmptyName(_))));
        assert!(matches!(sanitize("   "), Err(PathError::EmptyName(_))));
        assert!(matches!(sanitize("///"), Err(PathError::EmptyName(_))));
    }

    #[test]
    fn test_sanitize_truncates_long_names() {
        let long = "x".repeat(3 * MAX_SEGMENT_CHARS);
        let segment = sanitize(&long).unwrap();
        assert_eq!(segment.chars().count(), MAX_SEGMENT_CHARS);
        assert_idempotent(&long);

        // truncation must not leave trailing whitespace behind
        let spaced = format!("{} {}", "y".repeat(MAX_SEGMENT_CHARS - 1), "z".repeat(50));
        assert_idempotent(&spaced);
    }

    #[test]
    fn test_sanitize_extension() {
        assert_eq!(sanitize_extension("png").unwrap(), "png");
        assert_eq!(sanitize_extension(".PNG").unwrap(), "png");
        assert_eq!(sanitize_extension(" .JpEg ").unwrap(), "jpeg");
        assert!(matches!(
            sanitize_extension(""),
            Err(PathError::InvalidExtension(_))
        ));
        assert!(matches!(
            sanitize_extension("..."),
            Err(PathError::InvalidExtension(_))
        ));
    }
}
