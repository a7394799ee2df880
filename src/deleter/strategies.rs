//! Deletion strategies
//!
//! Option-image deletion is an ordered list of strategies tried in
//! sequence: the exact stored URL first, then a scan of the product folder
//! for files named after the option. The first strategy that finds a file
//! wins; a miss falls through to the next.

/// One way of locating an option image for deletion.
#[derive(Debug, Clone)]
pub enum DeleteStrategy {
    /// Resolve the URL recorded in the caller's database and delete that
    /// exact file.
    ByStoredUrl(String),
    /// Scan the product folder for a file named after the option, whatever
    /// its extension. Covers stored URLs that drifted from the filesystem.
    ByNameScan {
        product_name: String,
        option_name: String,
    },
}

/// Strategy order for one option image. The stored URL is skipped when the
/// caller has none on record.
pub fn option_strategies(
    product_name: &str,
    option_name: &str,
    stored_url: Option<&str>,
) -> Vec<DeleteStrategy> {
    let mut strategies = Vec::new();
    if let Some(url) = stored_url {
        if !url.is_empty() {
            strategies.push(DeleteStrategy::ByStoredUrl(url.to_string()));
        }
    }
    strategies.push(DeleteStrategy::ByNameScan {
        product_name: product_name.to_string(),
        option_name: option_name.to_string(),
    });
    strategies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_strategy_first_when_present() {
        let strategies = option_strategies("Red Mat", "Large", Some("/images/Red%20Mat/Large.png"));
        assert_eq!(strategies.len(), 2);
        assert!(matches!(&strategies[0], DeleteStrategy::ByStoredUrl(_)));
        assert!(matches!(&strategies[1], DeleteStrategy::ByNameScan { .. }));
    }

    #[test]
    fn test_scan_only_without_url() {
        let strategies = option_strategies("Red Mat", "Large", None);
        assert_eq!(strategies.len(), 1);
        assert!(matches!(&strategies[0], DeleteStrategy::ByNameScan { .. }));

        let strategies = option_strategies("Red Mat", "Large", Some(""));
        assert_eq!(strategies.len(), 1);
    }
}
