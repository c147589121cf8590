pub mod defaults;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BlogError, Result};

/// Name of the optional config file looked up in the site root.
pub const CONFIG_FILE: &str = "blog.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub build: BuildSection,
    #[serde(default)]
    pub about: AboutSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    #[serde(default = "defaults::title")]
    pub title: String,
    #[serde(default = "defaults::tagline")]
    pub tagline: String,
    /// Second half of the home page `<title>`.
    #[serde(default = "defaults::headline")]
    pub headline: String,
    #[serde(default = "defaults::description")]
    pub description: String,
    #[serde(default = "defaults::keywords")]
    pub keywords: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default = "defaults::base_url")]
    pub base_url: String,
    #[serde(default = "defaults::language")]
    pub language: String,
    #[serde(default = "defaults::copyright")]
    pub copyright: String,
    #[serde(default = "default_footer_links")]
    pub footer_links: Vec<FooterLink>,
    /// Google Analytics measurement id; the snippet is omitted when unset.
    #[serde(default)]
    pub analytics_id: Option<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: defaults::title(),
            tagline: defaults::tagline(),
            headline: defaults::headline(),
            description: defaults::description(),
            keywords: defaults::keywords(),
            author: None,
            base_url: defaults::base_url(),
            language: defaults::language(),
            copyright: defaults::copyright(),
            footer_links: default_footer_links(),
            analytics_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FooterLink {
    pub label: String,
    pub url: String,
}

fn default_footer_links() -> Vec<FooterLink> {
    vec![
        FooterLink {
            label: "Main Blog".into(),
            url: "https://liexpress.cc/".into(),
        },
        FooterLink {
            label: "𝕏 @liexpressok".into(),
            url: "https://x.com/liexpressok".into(),
        },
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSection {
    #[serde(default = "defaults::post_dir")]
    pub post_dir: String,
    #[serde(default = "defaults::data_dir")]
    pub data_dir: String,
    #[serde(default = "defaults::template_dir")]
    pub template_dir: String,
    /// Size of the "latest" list on the home page.
    #[serde(default = "defaults::latest_limit")]
    pub latest_limit: usize,
    /// Number of tags shown in the home page topic hub.
    #[serde(default = "defaults::topic_limit")]
    pub topic_limit: usize,
    /// Maximum number of tags kept per post.
    #[serde(default = "defaults::tag_limit")]
    pub tag_limit: usize,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            post_dir: defaults::post_dir(),
            data_dir: defaults::data_dir(),
            template_dir: defaults::template_dir(),
            latest_limit: defaults::latest_limit(),
            topic_limit: defaults::topic_limit(),
            tag_limit: defaults::tag_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutSection {
    #[serde(default = "defaults::about_heading")]
    pub heading: String,
    #[serde(default = "defaults::about_paragraphs")]
    pub paragraphs: Vec<String>,
}

impl Default for AboutSection {
    fn default() -> Self {
        Self {
            heading: defaults::about_heading(),
            paragraphs: defaults::about_paragraphs(),
        }
    }
}

/// Resolved absolute paths for the site directories.
#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub root: PathBuf,
    pub posts: PathBuf,
    pub data: PathBuf,
    pub templates: PathBuf,
}

impl ResolvedPaths {
    pub fn featured_file(&self) -> PathBuf {
        self.data.join("featured.json")
    }

    pub fn tag_alias_file(&self) -> PathBuf {
        self.data.join("tags-alias.json")
    }
}

impl SiteConfig {
    /// Load `blog.toml` from the site root, or fall back to the built-in
    /// defaults when the file does not exist.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, root.display());
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: SiteConfig =
            toml::from_str(&contents).map_err(|e| BlogError::ConfigInvalid {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(config)
    }

    /// Base URL without a trailing slash, the form every template expects.
    pub fn base_url(&self) -> &str {
        self.site.base_url.trim_end_matches('/')
    }

    /// Apply command-line overrides on top of the file values.
    pub fn with_overrides(mut self, base_url: Option<&str>, latest_limit: Option<usize>) -> Self {
        if let Some(base) = base_url {
            self.site.base_url = base.to_string();
        }
        if let Some(limit) = latest_limit {
            self.build.latest_limit = limit;
        }
        self
    }

    /// Resolve all directory paths relative to the site root.
    pub fn resolve_paths(&self, root: &Path) -> ResolvedPaths {
        ResolvedPaths {
            root: root.to_path_buf(),
            posts: root.join(&self.build.post_dir),
            data: root.join(&self.build.data_dir),
            templates: root.join(&self.build.template_dir),
        }
    }
}
