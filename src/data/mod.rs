//! Optional JSON side-files under the data directory.
//!
//! Both files are advisory: a missing, unreadable or malformed file behaves
//! exactly like an absent one, so a typo in `featured.json` never blocks a
//! rebuild.

use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Raw tag label → canonical label.
pub type TagAliases = HashMap<String, String>;

/// Ordered list of slugs pinned to the top of the home page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeaturedList {
    #[serde(default)]
    pub slugs: Vec<String>,
}

/// Load `tags-alias.json`: a flat object of string to string.
pub fn load_tag_aliases(path: &Path) -> Option<TagAliases> {
    load_json(path)
}

/// Load `featured.json`: `{"slugs": ["...", ...]}`.
pub fn load_featured(path: &Path) -> Option<FeaturedList> {
    load_json(path)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        return None;
    }
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("ignoring unreadable data file {}: {e}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("ignoring malformed data file {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_files_are_absent() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(load_tag_aliases(&tmp.path().join("tags-alias.json")).is_none());
        assert!(load_featured(&tmp.path().join("featured.json")).is_none());
    }

    #[test]
    fn test_load_aliases() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("tags-alias.json");
        fs::write(&path, r#"{"Smart City": "SmartCity", "LLM": "AI"}"#).unwrap();
        let aliases = load_tag_aliases(&path).unwrap();
        assert_eq!(aliases.get("LLM").map(String::as_str), Some("AI"));
        assert_eq!(aliases.len(), 2);
    }

    #[test]
    fn test_wrong_shape_aliases_are_absent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("tags-alias.json");
        fs::write(&path, r#"["Smart City", "SmartCity"]"#).unwrap();
        assert!(load_tag_aliases(&path).is_none());
        fs::write(&path, r#"{"Smart City": 3}"#).unwrap();
        assert!(load_tag_aliases(&path).is_none());
    }

    #[test]
    fn test_load_featured() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("featured.json");
        fs::write(&path, r#"{"slugs": ["b", "a"], "note": "ignored"}"#).unwrap();
        let featured = load_featured(&path).unwrap();
        assert_eq!(featured.slugs, vec!["b", "a"]);
    }

    #[test]
    fn test_malformed_featured_is_absent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("featured.json");
        fs::write(&path, "{\"slugs\": [").unwrap();
        assert!(load_featured(&path).is_none());
        fs::write(&path, r#"{"slugs": "not-a-list"}"#).unwrap();
        assert!(load_featured(&path).is_none());
    }
}
