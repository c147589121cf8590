use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::content::{self, POST_INDEX};
use crate::error::Result;

static POST_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/?post/([^/]+)/?").unwrap());

/// A link from one post page to a post that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    /// Page containing the link, relative to the site root (e.g. "post/a/index.html").
    pub source_file: String,
    /// The href exactly as written.
    pub href: String,
    /// Slug the href points at.
    pub slug: String,
}

/// Outcome of scanning every post page for internal post links.
#[derive(Debug, Default, Serialize)]
pub struct LinkCheckResult {
    pub files_checked: usize,
    /// Number of hrefs that resolved to a post slug.
    pub total_links_checked: usize,
    pub broken_links: Vec<BrokenLink>,
}

impl LinkCheckResult {
    pub fn is_clean(&self) -> bool {
        self.broken_links.is_empty()
    }
}

/// Check every `post/<slug>/index.html` under `post_root` for links to other
/// posts and report those whose target page is missing.
///
/// `base_url` is stripped from absolute hrefs first, so both
/// `https://site/post/x/` and `/post/x/` resolve to slug `x`.
pub fn check_post_links(site_root: &Path, post_root: &Path, base_url: &str) -> Result<LinkCheckResult> {
    let mut result = LinkCheckResult::default();

    for dir in content::post_dirs(post_root)? {
        let bytes = fs::read(&dir.index)?;
        let html = String::from_utf8_lossy(&bytes);
        result.files_checked += 1;

        let rel_path = dir
            .index
            .strip_prefix(site_root)
            .unwrap_or(&dir.index)
            .to_string_lossy()
            .replace('\\', "/");

        for href in extract_hrefs(&html) {
            let Some(slug) = post_slug(&href, base_url) else {
                continue;
            };
            result.total_links_checked += 1;
            if !post_root.join(&slug).join(POST_INDEX).is_file() {
                tracing::debug!("{rel_path}: broken link {href}");
                result.broken_links.push(BrokenLink {
                    source_file: rel_path.clone(),
                    href,
                    slug,
                });
            }
        }
    }

    Ok(result)
}

/// Every distinct `href` value in the document, single or double quoted,
/// in order of first appearance.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let mut links = Vec::new();
    let mut seen = HashSet::new();
    let bytes = html.as_bytes();
    let len = bytes.len();
    let mut pos = 0;

    while pos < len {
        let Some(idx) = html[pos..].find("href=") else {
            break;
        };
        let attr_start = pos + idx + 5;
        if attr_start >= len {
            break;
        }
        let quote = bytes[attr_start];
        if quote == b'"' || quote == b'\'' {
            let val_start = attr_start + 1;
            if let Some(end_offset) = html[val_start..].find(quote as char) {
                let href = &html[val_start..val_start + end_offset];
                if seen.insert(href) {
                    links.push(href.to_string());
                }
                pos = val_start + end_offset + 1;
                continue;
            }
        }
        pos = attr_start;
    }

    links
}

/// Slug targeted by an href, or `None` when the href is not a post link.
pub fn post_slug(href: &str, base_url: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let base = base_url.trim_end_matches('/');
    let path = if base.is_empty() {
        href
    } else {
        href.strip_prefix(base).unwrap_or(href)
    };
    let (path, _) = split_href_suffix(path);

    POST_PATH_RE
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Split an href into the path portion and the suffix (fragment + query).
fn split_href_suffix(href: &str) -> (&str, &str) {
    match href.find(['#', '?']) {
        Some(pos) => href.split_at(pos),
        None => (href, ""),
    }
}

/// Group broken links by href, collecting all source files that link to each broken target.
pub fn group_broken_links(broken: &[BrokenLink]) -> Vec<(String, Vec<String>)> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for link in broken {
        map.entry(link.href.clone())
            .or_default()
            .push(link.source_file.clone());
    }
    map.into_iter().collect()
}
