use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::{summaries, ItemSummary, SiteContext};
use crate::content::{Corpus, Post};
use crate::error::Result;

/// Posts published in one `YYYY-MM` month.
#[derive(Debug)]
pub struct MonthGroup<'a> {
    pub key: String,
    /// Human label such as "March 2024", when the key is a real month.
    pub label: Option<String>,
    pub posts: Vec<&'a Post>,
}

#[derive(Serialize)]
struct MonthSection<'a> {
    key: &'a str,
    label: Option<&'a str>,
    posts: Vec<ItemSummary>,
}

/// Group posts by month, newest month first.
pub fn group(corpus: &Corpus) -> Vec<MonthGroup<'_>> {
    let mut months: BTreeMap<&str, Vec<&Post>> = BTreeMap::new();
    for post in corpus.posts() {
        months.entry(post.month()).or_default().push(post);
    }

    months
        .into_iter()
        .rev()
        .map(|(key, posts)| MonthGroup {
            key: key.to_string(),
            label: month_label(key),
            posts,
        })
        .collect()
}

pub fn month_label(key: &str) -> Option<String> {
    NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%B %Y").to_string())
}

pub fn render(tera: &tera::Tera, site: &SiteContext, months: &[MonthGroup<'_>]) -> Result<String> {
    let sections: Vec<MonthSection<'_>> = months
        .iter()
        .map(|m| MonthSection {
            key: &m.key,
            label: m.label.as_deref(),
            posts: summaries(&m.posts),
        })
        .collect();

    let mut ctx = tera::Context::new();
    ctx.insert("site", site);
    ctx.insert("months", &sections);

    Ok(tera.render("archive.html", &ctx)?)
}
