pub mod extract;
pub mod tags;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{BlogError, Result};
use extract::Extractor;

/// Date assigned to posts whose markup carries no recognizable date.
pub const EPOCH_DATE: &str = "1970-01-01";

/// File name of the post document inside each post directory.
pub const POST_INDEX: &str = "index.html";

/// One post, derived fresh from its `index.html` on every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Directory name; also the URL path segment.
    pub slug: String,
    pub url: String,
    pub title: String,
    /// `YYYY-MM-DD`, so string order is chronological order.
    pub date: String,
    /// Normalized, deduplicated labels without the display marker.
    pub tags: Vec<String>,
    pub excerpt: String,
}

impl Post {
    /// Tags rendered as `#A #B`.
    pub fn tag_line(&self) -> String {
        tags::display(&self.tags)
    }

    /// `YYYY-MM` prefix used for archive grouping.
    pub fn month(&self) -> &str {
        self.date.get(..7).unwrap_or(&self.date)
    }
}

/// Absolute URL of a post page.
pub fn post_url(base_url: &str, slug: &str) -> String {
    format!("{}/post/{}/", base_url.trim_end_matches('/'), slug)
}

/// Settings the loader needs besides the post directory.
pub struct LoadOptions<'a> {
    pub base_url: &'a str,
    pub site_name: &'a str,
    pub aliases: Option<&'a HashMap<String, String>>,
    pub tag_limit: usize,
}

/// All posts of one run, ordered newest first.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    posts: Vec<Post>,
}

impl Corpus {
    /// Build a corpus from already-extracted posts, applying the canonical
    /// order: `(date, slug)` descending.
    pub fn from_posts(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| (&b.date, &b.slug).cmp(&(&a.date, &a.slug)));
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.get(slug).is_some()
    }
}

/// A post directory holding an index document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDir {
    pub slug: String,
    pub index: PathBuf,
}

/// Immediate subdirectories of `post_root` that hold an index document,
/// sorted by name. Symlinked directories count like real ones; walk errors
/// are returned rather than skipped.
pub fn post_dirs(post_root: &Path) -> Result<Vec<PostDir>> {
    if !post_root.is_dir() {
        return Err(BlogError::PostRootMissing {
            path: post_root.to_path_buf(),
        });
    }

    let mut dirs = Vec::new();
    for entry in WalkDir::new(post_root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(io::Error::from)?;
        // `DirEntry::file_type` does not follow links; the path check does.
        if !entry.path().is_dir() {
            continue;
        }
        let index = entry.path().join(POST_INDEX);
        if !index.is_file() {
            tracing::debug!("skipping {} (no {POST_INDEX})", entry.path().display());
            continue;
        }
        dirs.push(PostDir {
            slug: entry.file_name().to_string_lossy().into_owned(),
            index,
        });
    }
    Ok(dirs)
}

/// Scan `post_root` and extract one [`Post`] per `<slug>/index.html`.
///
/// Only immediate subdirectories are considered; those without an index
/// document are skipped. A missing `post_root` is an error.
pub fn load_corpus(post_root: &Path, opts: &LoadOptions<'_>) -> Result<Corpus> {
    let extractor = Extractor::new(opts.site_name);
    let mut posts = Vec::new();

    for dir in post_dirs(post_root)? {
        let bytes = fs::read(&dir.index)?;
        let html = String::from_utf8_lossy(&bytes);
        posts.push(build_post(&extractor, &dir.slug, &html, opts));
    }

    let corpus = Corpus::from_posts(posts);
    tracing::debug!("loaded {} posts from {}", corpus.len(), post_root.display());
    Ok(corpus)
}

/// Turn one post document into a record, applying the date sentinel and tag
/// normalization.
pub fn build_post(extractor: &Extractor, slug: &str, html: &str, opts: &LoadOptions<'_>) -> Post {
    let extracted = extractor.extract(html);
    let date = extracted.date.unwrap_or_else(|| {
        tracing::debug!("{slug}: no date found, using {EPOCH_DATE}");
        EPOCH_DATE.to_string()
    });
    Post {
        slug: slug.to_string(),
        url: post_url(opts.base_url, slug),
        title: extracted.title,
        date,
        tags: tags::normalize(&extracted.tags, opts.aliases, opts.tag_limit),
        excerpt: extracted.excerpt,
    }
}
