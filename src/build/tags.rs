use std::collections::HashMap;

use serde::Serialize;

use super::{summaries, ItemSummary, SiteContext};
use crate::content::tags;
use crate::content::{Corpus, Post};
use crate::error::Result;

/// Posts sharing one tag, compared case-insensitively.
#[derive(Debug)]
pub struct TagGroup<'a> {
    /// First spelling seen while walking the corpus newest first.
    pub label: String,
    pub anchor: String,
    pub posts: Vec<&'a Post>,
}

#[derive(Serialize)]
struct TagSection<'a> {
    label: &'a str,
    anchor: &'a str,
    count: usize,
    posts: Vec<ItemSummary>,
}

/// Group posts by tag. Groups are ordered by size, then label; posts within
/// a group keep corpus order.
pub fn group(corpus: &Corpus) -> Vec<TagGroup<'_>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<TagGroup<'_>> = Vec::new();

    for post in corpus.posts() {
        for tag in &post.tags {
            let key = tag.to_lowercase();
            let i = *index.entry(key).or_insert_with(|| {
                groups.push(TagGroup {
                    label: tag.clone(),
                    anchor: tags::anchor(tag),
                    posts: Vec::new(),
                });
                groups.len() - 1
            });
            let group = &mut groups[i];
            if group.posts.last().map(|p| p.slug.as_str()) != Some(post.slug.as_str()) {
                group.posts.push(post);
            }
        }
    }

    groups.sort_by(|a, b| {
        b.posts
            .len()
            .cmp(&a.posts.len())
            .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
            .then_with(|| a.label.cmp(&b.label))
    });
    groups
}

pub fn render(tera: &tera::Tera, site: &SiteContext, groups: &[TagGroup<'_>]) -> Result<String> {
    let sections: Vec<TagSection<'_>> = groups
        .iter()
        .map(|g| TagSection {
            label: &g.label,
            anchor: &g.anchor,
            count: g.posts.len(),
            posts: summaries(&g.posts),
        })
        .collect();

    let mut ctx = tera::Context::new();
    ctx.insert("site", site);
    ctx.insert("tags", &sections);

    Ok(tera.render("tags.html", &ctx)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::test_support::post;
    use crate::templates::load_templates;

    fn labels(groups: &[TagGroup<'_>]) -> Vec<String> {
        groups.iter().map(|g| g.label.clone()).collect()
    }

    #[test]
    fn test_groups_sorted_by_size_then_label() {
        let corpus = Corpus::from_posts(vec![
            post("a", "2024-03-01", &["beta", "AI"]),
            post("b", "2024-02-01", &["ai", "alpha"]),
            post("c", "2024-01-01", &["Beta"]),
        ]);
        let groups = group(&corpus);
        assert_eq!(labels(&groups), vec!["AI", "beta", "alpha"]);
        let ai: Vec<_> = groups[0].posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(ai, vec!["a", "b"]);
    }

    #[test]
    fn test_first_spelling_wins() {
        let corpus = Corpus::from_posts(vec![
            post("new", "2024-03-01", &["SmartCity"]),
            post("old", "2023-03-01", &["smartcity"]),
        ]);
        let groups = group(&corpus);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "SmartCity");
        assert_eq!(groups[0].anchor, "smartcity");
    }

    #[test]
    fn test_untagged_posts_produce_no_groups() {
        let corpus = Corpus::from_posts(vec![post("x", "2024-01-01", &[])]);
        assert!(group(&corpus).is_empty());
    }

    #[test]
    fn test_render_index_and_sections() {
        let corpus = Corpus::from_posts(vec![
            post("a", "2024-03-01", &["城市 规划"]),
            post("b", "2024-02-01", &["Digital Twin"]),
        ]);
        let tmp = tempfile::TempDir::new().unwrap();
        let tera = load_templates(tmp.path()).unwrap();
        let config = SiteConfig::default().with_overrides(Some("https://blog.test"), None);
        let html = render(&tera, &SiteContext::from_config(&config), &group(&corpus)).unwrap();

        assert!(html.contains("href=\"#digital-twin\""));
        assert!(html.contains("id=\"digital-twin\""));
        assert!(html.contains("id=\"城市-规划\""));
        assert!(html.contains("<a href=\"https://blog.test/post/a/\">Title a</a>"));
        assert!(html.contains("https://blog.test/tags.html"));
    }
}
