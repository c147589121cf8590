use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use blogdex::cli::{Cli, Command};
use blogdex::error::BlogError;
use blogdex::output;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Command::Home(args) => blogdex::cli::home::run(args, &cli),
        Command::Pages => blogdex::cli::pages::run(&cli),
        Command::Search => blogdex::cli::search::run(&cli),
        Command::CheckLinks => blogdex::cli::check_links::run(&cli),
        Command::Build(args) => blogdex::cli::build::run(args, &cli),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            output::print_error(&format!("{e:#}"), cli.format());
            let code = e
                .downcast_ref::<BlogError>()
                .map(BlogError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
