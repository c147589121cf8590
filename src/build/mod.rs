pub mod about;
pub mod archive;
pub mod home;
pub mod links;
pub mod search;
pub mod tags;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use crate::config::{FooterLink, ResolvedPaths, SiteConfig};
use crate::content::{self, Corpus, LoadOptions, Post};
use crate::data::{self, FeaturedList};
use crate::error::Result;
use crate::output::CommandOutput;
use crate::templates;

/// Every file this tool writes into the site root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Artifact {
    Home,
    Tags,
    Archive,
    About,
    SearchIndex,
}

impl Artifact {
    pub const ALL: [Artifact; 5] = [
        Artifact::Home,
        Artifact::Tags,
        Artifact::Archive,
        Artifact::About,
        Artifact::SearchIndex,
    ];

    /// The helper pages produced by the `pages` command.
    pub const PAGES: [Artifact; 3] = [Artifact::Tags, Artifact::Archive, Artifact::About];

    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::Home => "index.html",
            Artifact::Tags => "tags.html",
            Artifact::Archive => "archive.html",
            Artifact::About => "about.html",
            Artifact::SearchIndex => "search.json",
        }
    }
}

/// Site-wide values exposed to every template as `site`.
#[derive(Debug, Serialize)]
pub struct SiteContext {
    pub title: String,
    pub tagline: String,
    pub headline: String,
    pub description: String,
    pub keywords: String,
    pub author: Option<String>,
    pub base_url: String,
    pub language: String,
    pub copyright: String,
    pub footer_links: Vec<FooterLink>,
    pub analytics_id: Option<String>,
}

impl SiteContext {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.site.title.clone(),
            tagline: config.site.tagline.clone(),
            headline: config.site.headline.clone(),
            description: config.site.description.clone(),
            keywords: config.site.keywords.clone(),
            author: config.site.author.clone(),
            base_url: config.base_url().to_string(),
            language: config.site.language.clone(),
            copyright: config.site.copyright.clone(),
            footer_links: config.site.footer_links.clone(),
            analytics_id: config.site.analytics_id.clone(),
        }
    }
}

/// A post as listed on the generated pages.
#[derive(Debug, Serialize)]
pub struct ItemSummary {
    pub slug: String,
    pub title: String,
    pub url: String,
    pub date: String,
    pub tags: Vec<String>,
    pub tag_line: String,
    pub excerpt: String,
}

impl From<&Post> for ItemSummary {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            url: post.url.clone(),
            date: post.date.clone(),
            tags: post.tags.clone(),
            tag_line: post.tag_line(),
            excerpt: post.excerpt.clone(),
        }
    }
}

pub(crate) fn summaries(posts: &[&Post]) -> Vec<ItemSummary> {
    posts.iter().map(|p| ItemSummary::from(*p)).collect()
}

/// Everything a generator run needs, loaded once up front.
pub struct BuildContext {
    pub config: SiteConfig,
    pub paths: ResolvedPaths,
    pub corpus: Corpus,
    pub featured: Option<FeaturedList>,
    site: SiteContext,
    tera: tera::Tera,
}

impl BuildContext {
    /// Load side-files, scan the post directory and compile templates.
    pub fn load(config: SiteConfig, root: &Path) -> Result<Self> {
        let paths = config.resolve_paths(root);

        let aliases = data::load_tag_aliases(&paths.tag_alias_file());
        let featured = data::load_featured(&paths.featured_file());

        let corpus = content::load_corpus(
            &paths.posts,
            &LoadOptions {
                base_url: config.base_url(),
                site_name: &config.site.title,
                aliases: aliases.as_ref(),
                tag_limit: config.build.tag_limit,
            },
        )?;
        if corpus.is_empty() {
            tracing::warn!("no posts found under {}", paths.posts.display());
        }

        let tera = templates::load_templates(&paths.templates)?;
        let site = SiteContext::from_config(&config);

        Ok(Self {
            config,
            paths,
            corpus,
            featured,
            site,
            tera,
        })
    }

    /// Render one artifact to a string without touching the filesystem.
    pub fn render(&self, artifact: Artifact) -> Result<String> {
        match artifact {
            Artifact::Home => {
                let plan = home::plan(
                    &self.corpus,
                    self.featured.as_ref(),
                    self.config.build.latest_limit,
                    self.config.build.topic_limit,
                );
                home::render(&self.tera, &self.site, &plan)
            }
            Artifact::Tags => tags::render(&self.tera, &self.site, &tags::group(&self.corpus)),
            Artifact::Archive => {
                archive::render(&self.tera, &self.site, &archive::group(&self.corpus))
            }
            Artifact::About => about::render(&self.tera, &self.site, &self.config.about),
            Artifact::SearchIndex => search::render(&self.corpus),
        }
    }

    /// Render one artifact and write it to its fixed file in the site root.
    pub fn write(&self, artifact: Artifact) -> Result<PathBuf> {
        let output = self.render(artifact)?;
        let path = self.paths.root.join(artifact.file_name());
        fs::write(&path, output)?;
        tracing::info!("wrote {}", path.display());
        Ok(path)
    }
}

#[derive(Debug, Serialize)]
pub struct BuildStats {
    pub posts: usize,
    pub artifacts: Vec<&'static str>,
    pub duration_ms: u64,
}

impl CommandOutput for BuildStats {
    fn human_display(&self) -> String {
        format!(
            "Generated {} from {} post{} in {:.1}s",
            self.artifacts.join(", "),
            self.posts,
            if self.posts == 1 { "" } else { "s" },
            self.duration_ms as f64 / 1000.0,
        )
    }
}

/// Write the given artifacts in order.
pub fn build_site(ctx: &BuildContext, artifacts: &[Artifact]) -> Result<BuildStats> {
    let start = Instant::now();
    for artifact in artifacts {
        ctx.write(*artifact)?;
    }
    Ok(BuildStats {
        posts: ctx.corpus.len(),
        artifacts: artifacts.iter().map(|a| a.file_name()).collect(),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_post(root: &Path, slug: &str, html: &str) {
        let dir = root.join("post").join(slug);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("index.html"), html).unwrap();
    }

    #[test]
    fn test_build_site_writes_every_artifact() {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = tmp.path();
        write_post(
            root,
            "first",
            r#"<title>First | Mr. Qizhi</title>
            <script type="application/ld+json">{"@type": "Article", "datePublished": "2024-01-02", "keywords": "AI"}</script>"#,
        );

        let config = SiteConfig::default().with_overrides(Some("https://blog.test"), None);
        let ctx = BuildContext::load(config, root).unwrap();
        let stats = build_site(&ctx, &Artifact::ALL).unwrap();

        assert_eq!(stats.posts, 1);
        for artifact in Artifact::ALL {
            assert!(root.join(artifact.file_name()).is_file());
        }
        assert!(stats.human_display().starts_with(
            "Generated index.html, tags.html, archive.html, about.html, search.json from 1 post"
        ));
    }

    #[test]
    fn test_build_context_applies_aliases_and_featured() {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = tmp.path();
        write_post(
            root,
            "pinned",
            r#"<title>Pinned</title><meta name="keywords" content="LLM, Cities" /><p>2023-05-05</p>"#,
        );
        fs::create_dir_all(root.join("data")).unwrap();
        fs::write(root.join("data/tags-alias.json"), r#"{"LLM": "AI"}"#).unwrap();
        fs::write(
            root.join("data/featured.json"),
            r#"{"slugs": ["ghost-post", "pinned"]}"#,
        )
        .unwrap();

        let ctx = BuildContext::load(SiteConfig::default(), root).unwrap();
        assert_eq!(ctx.corpus.get("pinned").unwrap().tags, vec!["AI", "Cities"]);

        let home = ctx.render(Artifact::Home).unwrap();
        assert!(home.contains("featured-item"));
        assert!(!home.contains("ghost-post"));
    }

    #[test]
    fn test_empty_post_root_still_builds() {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("post/draft")).unwrap();

        let ctx = BuildContext::load(SiteConfig::default(), root).unwrap();
        assert!(ctx.corpus.is_empty());
        let stats = build_site(&ctx, &[Artifact::SearchIndex]).unwrap();
        assert_eq!(stats.posts, 0);
        assert_eq!(fs::read_to_string(root.join("search.json")).unwrap(), "[]");
    }

    #[test]
    fn test_summary_from_post() {
        let post = crate::content::test_support::post("x", "2024-01-01", &["A", "B"]);
        let summary = ItemSummary::from(&post);
        assert_eq!(summary.tag_line, "#A #B");
        assert_eq!(summary.url, "https://blog.test/post/x/");
    }
}
