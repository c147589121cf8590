use std::process::ExitCode;

use crate::build::links::{self, LinkCheckResult};
use crate::output::{self, human, CommandOutput, OutputFormat};

use super::Cli;

impl CommandOutput for LinkCheckResult {
    fn human_display(&self) -> String {
        format!(
            "Checked {} post link{} across {} page{}, none broken",
            self.total_links_checked,
            plural(self.total_links_checked),
            self.files_checked,
            plural(self.files_checked),
        )
    }
}

pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = cli.config(None)?;
    let paths = config.resolve_paths(&cli.root);
    let result = links::check_post_links(&paths.root, &paths.posts, config.base_url())?;

    if result.is_clean() {
        output::print_output(&result, cli.format());
        return Ok(ExitCode::SUCCESS);
    }

    output::print_failure(&result, &broken_summary(&result), cli.format());
    if cli.format() == OutputFormat::Human {
        print_broken_links(&result);
    }
    Ok(ExitCode::FAILURE)
}

pub(crate) fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// One-line summary such as "Found 3 broken post links (2 missing targets)".
pub fn broken_summary(result: &LinkCheckResult) -> String {
    let count = result.broken_links.len();
    let targets = links::group_broken_links(&result.broken_links).len();
    format!(
        "Found {count} broken post link{} ({targets} missing target{})",
        plural(count),
        plural(targets),
    )
}

/// List broken hrefs with the pages linking to each.
pub fn print_broken_links(result: &LinkCheckResult) {
    for (href, sources) in links::group_broken_links(&result.broken_links) {
        human::broken_link(&href, &sources);
    }
}
