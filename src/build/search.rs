use std::cmp::Reverse;

use serde::Serialize;

use crate::content::Corpus;
use crate::error::Result;

/// One record of `search.json`.
#[derive(Debug, Serialize)]
pub struct SearchEntry<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub date: &'a str,
    pub excerpt: &'a str,
    pub tags: &'a [String],
}

/// Entries ordered by date, then URL, both descending.
pub fn entries(corpus: &Corpus) -> Vec<SearchEntry<'_>> {
    let mut entries: Vec<SearchEntry<'_>> = corpus
        .posts()
        .iter()
        .map(|p| SearchEntry {
            title: &p.title,
            url: &p.url,
            date: &p.date,
            excerpt: &p.excerpt,
            tags: &p.tags,
        })
        .collect();
    entries.sort_by_key(|e| Reverse((e.date, e.url)));
    entries
}

/// Pretty-printed JSON array; non-ASCII text is written as-is.
pub fn render(corpus: &Corpus) -> Result<String> {
    Ok(serde_json::to_string_pretty(&entries(corpus))?)
}
