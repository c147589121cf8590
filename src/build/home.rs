use std::collections::HashSet;

use serde::Serialize;

use super::{summaries, SiteContext};
use crate::content::tags::{self, TagCount};
use crate::content::{Corpus, Post};
use crate::data::FeaturedList;
use crate::error::Result;

/// Which posts land in which home page section.
#[derive(Debug)]
pub struct HomePlan<'a> {
    pub featured: Vec<&'a Post>,
    pub latest: Vec<&'a Post>,
    pub topics: Vec<TagCount>,
}

#[derive(Debug, Serialize)]
struct TopicChip<'a> {
    label: &'a str,
    count: usize,
    anchor: String,
}

/// Split the corpus into the featured and latest sections.
///
/// Featured posts follow the order of the featured list; slugs without a
/// post are skipped. Latest is everything else, newest first, capped at
/// `latest_limit`. A post never appears in both.
pub fn plan<'a>(
    corpus: &'a Corpus,
    featured: Option<&FeaturedList>,
    latest_limit: usize,
    topic_limit: usize,
) -> HomePlan<'a> {
    let mut picked: Vec<&Post> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for slug in featured.map(|f| f.slugs.as_slice()).unwrap_or_default() {
        match corpus.get(slug) {
            Some(post) if seen.insert(post.slug.as_str()) => picked.push(post),
            Some(_) => {}
            None => tracing::debug!("featured slug {slug:?} has no post, skipping"),
        }
    }

    let latest = corpus
        .posts()
        .iter()
        .filter(|p| !seen.contains(p.slug.as_str()))
        .take(latest_limit)
        .collect();

    let mut topics = tags::frequencies(corpus.posts().iter().map(|p| p.tags.as_slice()));
    topics.truncate(topic_limit);

    HomePlan {
        featured: picked,
        latest,
        topics,
    }
}

/// Schema.org `WebSite` block for the home page head.
pub fn website_jsonld(site: &SiteContext) -> Result<String> {
    let publisher = site.author.as_deref().unwrap_or(&site.title);
    let value = serde_json::json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": site.title,
        "url": format!("{}/", site.base_url),
        "description": site.tagline,
        "inLanguage": [site.language],
        "publisher": {
            "@type": "Person",
            "name": publisher,
        },
    });
    // "</" inside a script element would end it early.
    Ok(serde_json::to_string_pretty(&value)?.replace("</", "<\\/"))
}

pub fn render(tera: &tera::Tera, site: &SiteContext, plan: &HomePlan<'_>) -> Result<String> {
    let topics: Vec<TopicChip<'_>> = plan
        .topics
        .iter()
        .map(|t| TopicChip {
            label: &t.label,
            count: t.count,
            anchor: tags::anchor(&t.label),
        })
        .collect();

    let mut ctx = tera::Context::new();
    ctx.insert("site", site);
    ctx.insert("website_jsonld", &website_jsonld(site)?);
    ctx.insert("featured", &summaries(&plan.featured));
    ctx.insert("latest", &summaries(&plan.latest));
    ctx.insert("topics", &topics);

    Ok(tera.render("home.html", &ctx)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::test_support::post;
    use crate::templates::load_templates;

    fn corpus() -> Corpus {
        Corpus::from_posts(vec![
            post("a-post", "2024-03-01", &["AI", "Cities"]),
            post("b-post", "2024-02-01", &["ai"]),
            post("c-post", "2024-01-01", &["Digital Twin"]),
        ])
    }

    fn featured(slugs: &[&str]) -> FeaturedList {
        FeaturedList {
            slugs: slugs.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn slugs(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.slug.clone()).collect()
    }

    fn render_with(plan: &HomePlan<'_>) -> String {
        let tmp = tempfile::TempDir::new().unwrap();
        let tera = load_templates(tmp.path()).unwrap();
        let config = SiteConfig::default().with_overrides(Some("https://blog.test"), None);
        render(&tera, &SiteContext::from_config(&config), plan).unwrap()
    }

    #[test]
    fn test_featured_keeps_list_order_and_skips_ghosts() {
        let corpus = corpus();
        let list = featured(&["ghost-post", "b-post", "a-post"]);
        let plan = plan(&corpus, Some(&list), 60, 12);
        assert_eq!(slugs(&plan.featured), vec!["b-post", "a-post"]);
        assert_eq!(slugs(&plan.latest), vec!["c-post"]);
    }

    #[test]
    fn test_duplicate_featured_slug_listed_once() {
        let corpus = corpus();
        let list = featured(&["c-post", "c-post"]);
        let plan = plan(&corpus, Some(&list), 60, 12);
        assert_eq!(slugs(&plan.featured), vec!["c-post"]);
        assert_eq!(slugs(&plan.latest), vec!["a-post", "b-post"]);
    }

    #[test]
    fn test_latest_is_capped() {
        let corpus = corpus();
        let plan = plan(&corpus, None, 2, 12);
        assert!(plan.featured.is_empty());
        assert_eq!(slugs(&plan.latest), vec!["a-post", "b-post"]);
    }

    #[test]
    fn test_topics_counted_case_insensitively() {
        let corpus = corpus();
        let plan = plan(&corpus, None, 60, 2);
        assert_eq!(
            plan.topics,
            vec![
                TagCount {
                    label: "AI".into(),
                    count: 2
                },
                TagCount {
                    label: "Cities".into(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_render_sections_in_order() {
        let corpus = corpus();
        let list = featured(&["b-post"]);
        let html = render_with(&plan(&corpus, Some(&list), 60, 12));

        let hero = html.find("class=\"hero\"").unwrap();
        let featured = html.find("class=\"featured\"").unwrap();
        let topics = html.find("class=\"topics\"").unwrap();
        let latest = html.find("class=\"latest\"").unwrap();
        assert!(hero < featured && featured < topics && topics < latest);

        assert!(html.contains("href=\"https://blog.test/tags.html#digital-twin\""));
        assert!(html.contains("\"@type\": \"WebSite\""));
        assert!(html.contains("<link rel=\"canonical\" href=\"https://blog.test/\">"));
    }

    #[test]
    fn test_render_omits_empty_featured_and_topics() {
        let corpus = Corpus::from_posts(vec![post("solo", "2024-01-01", &[])]);
        let html = render_with(&plan(&corpus, None, 60, 12));
        assert!(!html.contains("class=\"featured\""));
        assert!(!html.contains("class=\"topics\""));
        assert!(html.contains("https://blog.test/post/solo/"));
    }

    #[test]
    fn test_render_escapes_titles() {
        let mut p = post("x", "2024-01-01", &[]);
        p.title = "Cats & <Dogs>".into();
        let corpus = Corpus::from_posts(vec![p]);
        let html = render_with(&plan(&corpus, None, 60, 12));
        assert!(html.contains("Cats &amp; &lt;Dogs&gt;"));
    }

    #[test]
    fn test_jsonld_cannot_close_script() {
        let mut config = SiteConfig::default();
        config.site.title = "</script><b>".into();
        let json = website_jsonld(&SiteContext::from_config(&config)).unwrap();
        assert!(!json.contains("</script>"));
        assert!(json.contains("<\\/script>"));
    }
}
