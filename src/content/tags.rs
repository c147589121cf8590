//! Tag normalization and anchor derivation.
//!
//! Every generator that prints or links a tag goes through this module so the
//! home page topic hub, the tags page and the search index agree on spelling,
//! ordering and fragment ids.

use std::collections::{HashMap, HashSet};

/// Marker prepended to each label in display contexts.
pub const TAG_MARKER: char = '#';

/// Anchor used when a label has no usable characters left.
pub const FALLBACK_ANCHOR: &str = "tag";

/// Normalize raw tag labels.
///
/// Each label is trimmed, mapped through `aliases` (by its trimmed form, then
/// its whitespace-collapsed form) and collapsed to single spaces. Empty labels
/// are dropped, duplicates are removed case-insensitively keeping the first
/// spelling seen, and at most `limit` labels survive.
pub fn normalize<S: AsRef<str>>(
    raw: &[S],
    aliases: Option<&HashMap<String, String>>,
    limit: usize,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for label in raw {
        if out.len() >= limit {
            break;
        }
        let Some(label) = normalize_one(label.as_ref(), aliases) else {
            continue;
        };
        if seen.insert(label.to_lowercase()) {
            out.push(label);
        }
    }

    out
}

fn normalize_one(label: &str, aliases: Option<&HashMap<String, String>>) -> Option<String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return None;
    }
    let collapsed = collapse_whitespace(trimmed);
    let aliased = aliases
        .and_then(|map| map.get(trimmed).or_else(|| map.get(&collapsed)))
        .map(|canonical| collapse_whitespace(canonical.trim()))
        .unwrap_or(collapsed);
    if aliased.is_empty() {
        None
    } else {
        Some(aliased)
    }
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render labels as `#A #B` for post listings.
pub fn display<S: AsRef<str>>(labels: &[S]) -> String {
    labels
        .iter()
        .map(|l| format!("{TAG_MARKER}{}", l.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive a URL-fragment id from a tag label.
///
/// Lowercases the label, turns every run of characters other than ASCII
/// letters, digits and CJK ideographs into one `-`, and trims dashes from both
/// ends. Applying it to its own output is a no-op.
pub fn anchor(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_dash = false;

    for c in label.chars().flat_map(char::to_lowercase) {
        if is_anchor_char(c) {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }

    if out.is_empty() {
        FALLBACK_ANCHOR.to_string()
    } else {
        out
    }
}

fn is_anchor_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// One row of a tag frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub label: String,
    pub count: usize,
}

/// Count how many posts carry each tag, grouping labels case-insensitively
/// and keeping the first spelling encountered. Sorted by count descending,
/// then label ascending (case-insensitive).
pub fn frequencies<'a, I>(tag_lists: I) -> Vec<TagCount>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<TagCount> = Vec::new();

    for tags in tag_lists {
        let mut in_post = HashSet::new();
        for tag in tags {
            let key = tag.to_lowercase();
            if !in_post.insert(key.clone()) {
                continue;
            }
            match index.get(&key) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(key, counts.len());
                    counts.push(TagCount {
                        label: tag.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
            .then_with(|| a.label.cmp(&b.label))
    });
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_normalize_dedups_case_insensitively() {
        let out = normalize(&["AI", " GovTech", "ai", "AI "], None, 12);
        assert_eq!(out, vec!["AI", "GovTech"]);
    }

    #[test]
    fn test_normalize_skips_blank_labels() {
        let out = normalize(&["", "   ", "Rust"], None, 12);
        assert_eq!(out, vec!["Rust"]);
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        let out = normalize(&["digital \t  twin"], None, 12);
        assert_eq!(out, vec!["digital twin"]);
    }

    #[test]
    fn test_normalize_applies_alias_after_trim() {
        let map = aliases(&[("Smart City", "SmartCity")]);
        let out = normalize(&["  Smart City "], Some(&map), 12);
        assert_eq!(out, vec!["SmartCity"]);
    }

    #[test]
    fn test_normalize_alias_on_collapsed_form() {
        let map = aliases(&[("Smart City", "SmartCity")]);
        let out = normalize(&["Smart   City"], Some(&map), 12);
        assert_eq!(out, vec!["SmartCity"]);
    }

    #[test]
    fn test_normalize_alias_merges_duplicates() {
        let map = aliases(&[("LLM", "AI")]);
        let out = normalize(&["AI", "LLM", "Policy"], Some(&map), 12);
        assert_eq!(out, vec!["AI", "Policy"]);
    }

    #[test]
    fn test_normalize_respects_limit() {
        let raw: Vec<String> = (0..20).map(|i| format!("t{i}")).collect();
        let out = normalize(&raw, None, 12);
        assert_eq!(out.len(), 12);
        assert_eq!(out[0], "t0");
        assert_eq!(out[11], "t11");
    }

    #[test]
    fn test_normalize_limit_counts_unique_labels() {
        let out = normalize(&["a", "A", "b", "B", "c"], None, 2);
        assert_eq!(out, vec!["a", "b"]);
    }

    #[test]
    fn test_normalize_output_is_unique() {
        let raw = ["X", "x", " X", "y", "Y ", "z"];
        let out = normalize(&raw, None, 12);
        let lowered: HashSet<String> = out.iter().map(|s| s.to_lowercase()).collect();
        assert_eq!(lowered.len(), out.len());
    }

    #[test]
    fn test_display() {
        assert_eq!(display(&["AI", "GovTech"]), "#AI #GovTech");
        assert_eq!(display::<&str>(&[]), "");
    }

    #[test]
    fn test_anchor_basic() {
        assert_eq!(anchor("Smart City"), "smart-city");
        assert_eq!(anchor("Gov-Tech"), "gov-tech");
        assert_eq!(anchor("  C++ / Rust  "), "c-rust");
    }

    #[test]
    fn test_anchor_keeps_cjk() {
        assert_eq!(anchor("数字孪生 City"), "数字孪生-city");
    }

    #[test]
    fn test_anchor_fallback() {
        assert_eq!(anchor(""), "tag");
        assert_eq!(anchor("!!!"), "tag");
        assert_eq!(anchor("ÀÉ"), "tag");
    }

    #[test]
    fn test_anchor_is_idempotent() {
        for label in ["Smart City", "AI & Society", "数字 化", "--x--", "", "Über"] {
            let once = anchor(label);
            assert_eq!(anchor(&once), once, "label {label:?}");
        }
    }

    #[test]
    fn test_frequencies_order() {
        let posts = [
            vec!["AI".to_string(), "Policy".to_string()],
            vec!["ai".to_string(), "Cities".to_string()],
            vec!["Policy".to_string()],
            vec!["Budget".to_string()],
        ];
        let counts = frequencies(posts.iter().map(|p| p.as_slice()));
        let labels: Vec<(&str, usize)> = counts
            .iter()
            .map(|c| (c.label.as_str(), c.count))
            .collect();
        assert_eq!(
            labels,
            vec![("AI", 2), ("Policy", 2), ("Budget", 1), ("Cities", 1)]
        );
    }
}
