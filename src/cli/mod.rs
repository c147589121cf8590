pub mod build;
pub mod check_links;
pub mod home;
pub mod pages;
pub mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::build::BuildContext;
use crate::config::SiteConfig;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "blogdex",
    about = "Generate index pages, tag and archive pages and a search index for a directory of pre-rendered blog posts",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Site root containing the post directory
    #[arg(short, long, global = true, env = "BLOGDEX_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Public base URL, overriding the config file
    #[arg(short, long, global = true, env = "BLOGDEX_BASE_URL")]
    pub base: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate the home page (index.html)
    Home(home::HomeArgs),

    /// Generate tags.html, archive.html and about.html
    Pages,

    /// Generate the client-side search index (search.json)
    Search,

    /// Report links between posts whose target post is missing
    CheckLinks,

    /// Run every generator, then check post links
    Build(build::BuildArgs),
}

impl Cli {
    pub fn format(&self) -> OutputFormat {
        OutputFormat::from_flag(self.json)
    }

    /// Load config from the site root and apply command-line overrides.
    pub fn config(&self, latest_limit: Option<usize>) -> anyhow::Result<SiteConfig> {
        let config = SiteConfig::load_or_default(&self.root)?;
        Ok(config.with_overrides(self.base.as_deref(), latest_limit))
    }

    /// Load everything the generators need.
    pub fn context(&self, latest_limit: Option<usize>) -> anyhow::Result<BuildContext> {
        let config = self.config(latest_limit)?;
        Ok(BuildContext::load(config, &self.root)?)
    }
}
