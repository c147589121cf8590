use std::process::ExitCode;

use clap::Args;

use super::Cli;
use crate::build::{self, Artifact};
use crate::output;

#[derive(Args)]
pub struct HomeArgs {
    /// Number of posts in the "latest" list
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn run(args: &HomeArgs, cli: &Cli) -> anyhow::Result<ExitCode> {
    let ctx = cli.context(args.limit)?;
    let stats = build::build_site(&ctx, &[Artifact::Home])?;
    output::print_output(&stats, cli.format());
    Ok(ExitCode::SUCCESS)
}
