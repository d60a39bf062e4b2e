use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A Meta/Facebook page tracked by the meta collector when a Graph API
/// token is configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub name: String,
    pub page_id: String,
}

/// The tracked-term configuration shared by the collectors: search keywords
/// for the trends source and public pages for the meta source.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchlistFile {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub pages: Vec<PageConfig>,
}

/// Load and validate the watchlist configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_watchlist(path: &Path) -> Result<WatchlistFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::WatchlistIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let watchlist: WatchlistFile =
        serde_yaml::from_str(&content).map_err(ConfigError::WatchlistParse)?;

    validate_watchlist(&watchlist)?;

    Ok(watchlist)
}

fn validate_watchlist(watchlist: &WatchlistFile) -> Result<(), ConfigError> {
    if watchlist.keywords.is_empty() {
        return Err(ConfigError::Validation(
            "watchlist must track at least one keyword".to_string(),
        ));
    }

    let mut seen_keywords = HashSet::new();
    for keyword in &watchlist.keywords {
        if keyword.trim().is_empty() {
            return Err(ConfigError::Validation(
                "keyword must be non-empty".to_string(),
            ));
        }
        if !seen_keywords.insert(keyword.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate keyword: '{keyword}'"
            )));
        }
    }

    let mut seen_pages = HashSet::new();
    for page in &watchlist.pages {
        if page.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "page name must be non-empty".to_string(),
            ));
        }
        if page.page_id.is_empty() || !page.page_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::Validation(format!(
                "page '{}' has invalid page_id '{}'; must be a numeric Graph API id",
                page.name, page.page_id
            )));
        }
        if !seen_pages.insert(page.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate page name: '{}'",
                page.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<(), ConfigError> {
        let watchlist: WatchlistFile = serde_yaml::from_str(yaml).expect("yaml parses");
        validate_watchlist(&watchlist)
    }

    #[test]
    fn valid_watchlist_passes() {
        let yaml = r"
keywords:
  - skincare
  - protector solar
pages:
  - name: sephora
    page_id: '217895158239'
";
        assert!(parse(yaml).is_ok());
    }

    #[test]
    fn pages_are_optional() {
        let yaml = r"
keywords:
  - skincare
";
        assert!(parse(yaml).is_ok());
    }

    #[test]
    fn empty_keywords_rejected() {
        let yaml = "keywords: []\n";
        let err = parse(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn duplicate_keyword_rejected_case_insensitively() {
        let yaml = r"
keywords:
  - Skincare
  - skincare
";
        let err = parse(yaml).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate keyword")),
            "got: {err:?}"
        );
    }

    #[test]
    fn blank_keyword_rejected() {
        let yaml = r"
keywords:
  - skincare
  - '   '
";
        assert!(parse(yaml).is_err());
    }

    #[test]
    fn non_numeric_page_id_rejected() {
        let yaml = r"
keywords:
  - skincare
pages:
  - name: sephora
    page_id: not-an-id
";
        let err = parse(yaml).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("page_id")),
            "got: {err:?}"
        );
    }

    #[test]
    fn duplicate_page_name_rejected() {
        let yaml = r"
keywords:
  - skincare
pages:
  - name: sephora
    page_id: '1111'
  - name: Sephora
    page_id: '2222'
";
        let err = parse(yaml).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate page")),
            "got: {err:?}"
        );
    }

    #[test]
    fn load_watchlist_missing_file_is_io_error() {
        let err = load_watchlist(Path::new("/nonexistent/watchlist.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::WatchlistIo { .. }));
    }
}
