use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

use eca_scraper::cli::{Cli, Command};
use eca_scraper::formats::RunReport;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    eca_scraper::logging::init().context("init logging")?;

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        Command::Run(args) => {
            let report = eca_scraper::pipeline::run(args).context("run")?;
            print_report(&report)?;
        }
        Command::Fetch(args) => {
            eca_scraper::pipeline::fetch(args).context("fetch")?;
        }
        Command::Extract(args) => {
            let report = eca_scraper::pipeline::extract(args).context("extract")?;
            print_report(&report)?;
        }
        Command::Datasets(args) => {
            let report = eca_scraper::pipeline::datasets(args).context("datasets")?;
            print_report(&report)?;
        }
    }

    Ok(())
}

fn print_report(report: &RunReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize run report")?;
    println!("{json}");
    Ok(())
}
