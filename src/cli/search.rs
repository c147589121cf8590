use std::process::ExitCode;

use super::Cli;
use crate::build::{self, Artifact};
use crate::output;

pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let ctx = cli.context(None)?;
    let stats = build::build_site(&ctx, &[Artifact::SearchIndex])?;
    output::print_output(&stats, cli.format());
    Ok(ExitCode::SUCCESS)
}
