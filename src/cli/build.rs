use std::process::ExitCode;

use clap::Args;
use serde::Serialize;

use super::check_links::{broken_summary, print_broken_links};
use super::Cli;
use crate::build::links::{self, LinkCheckResult};
use crate::build::{self, Artifact, BuildStats};
use crate::output::{self, human, CommandOutput, OutputFormat};

#[derive(Args)]
pub struct BuildArgs {
    /// Number of posts in the home page "latest" list
    #[arg(long)]
    pub limit: Option<usize>,

    /// Treat broken post links as build errors
    #[arg(long)]
    pub strict: bool,
}

#[derive(Serialize)]
struct BuildReport {
    build: BuildStats,
    links: LinkCheckResult,
}

impl CommandOutput for BuildReport {
    fn human_display(&self) -> String {
        self.build.human_display()
    }
}

pub fn run(args: &BuildArgs, cli: &Cli) -> anyhow::Result<ExitCode> {
    let ctx = cli.context(args.limit)?;
    let stats = build::build_site(&ctx, &Artifact::ALL)?;

    // Post-build: validate links between posts
    let link_result =
        links::check_post_links(&ctx.paths.root, &ctx.paths.posts, ctx.config.base_url())?;
    let report = BuildReport {
        build: stats,
        links: link_result,
    };

    if report.links.is_clean() {
        output::print_output(&report, cli.format());
        return Ok(ExitCode::SUCCESS);
    }

    let summary = broken_summary(&report.links);
    if args.strict {
        output::print_failure(&report, &format!("Build failed: {summary}"), cli.format());
        if cli.format() == OutputFormat::Human {
            print_broken_links(&report.links);
        }
        return Ok(ExitCode::FAILURE);
    }

    output::print_output(&report, cli.format());
    if cli.format() == OutputFormat::Human {
        human::warning(&summary);
        print_broken_links(&report.links);
    }
    Ok(ExitCode::SUCCESS)
}
