// src/main.rs
mod canon;
mod config;
mod driver;
mod error;
mod types;

use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::Config;
use error::SortError;

#[derive(Parser)]
#[command(name = "sort-json")]
#[command(about = "Sort JSON object keys and arrays of objects into a stable order", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file to normalize in place
    #[arg(conflicts_with_all = ["input_dir", "output_dir"], required_unless_present = "input_dir")]
    file: Option<PathBuf>,

    /// Directory of JSON files to normalize (batch mode)
    #[arg(long, requires = "output_dir")]
    input_dir: Option<PathBuf>,

    /// Directory receiving normalized copies (batch mode)
    #[arg(long, requires = "input_dir")]
    output_dir: Option<PathBuf>,

    /// Write a JSON summary of the batch run to this file
    #[arg(long, requires = "input_dir")]
    report: Option<PathBuf>,

    /// Spaces per indentation level (default 4, or SORT_JSON_INDENT)
    #[arg(long)]
    indent: Option<usize>,
}

const EXIT_FAILED: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.indent);

    match run(cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            match e.downcast_ref::<SortError>() {
                Some(err) if err.is_usage() => ExitCode::from(EXIT_USAGE),
                _ => ExitCode::from(EXIT_FAILED),
            }
        }
    }
}

async fn run(cli: Cli, config: &Config) -> anyhow::Result<ExitCode> {
    if let (Some(input_dir), Some(output_dir)) = (&cli.input_dir, &cli.output_dir) {
        let report = driver::sort_directory(input_dir, output_dir, config).await?;
        info!(
            "processed {} file(s), {} failed",
            report.processed.len(),
            report.failed.len()
        );
        if let Some(path) = &cli.report {
            let value = canon::normalize(serde_json::to_value(&report)?);
            let text = canon::to_pretty_string(&value, config.indent)?;
            tokio::fs::write(path, text)
                .await
                .map_err(|source| SortError::Write {
                    path: path.clone(),
                    source,
                })?;
        }
        return Ok(if report.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(EXIT_FAILED)
        });
    }

    let Some(file) = &cli.file else {
        anyhow::bail!("no input given; pass a FILE or --input-dir/--output-dir");
    };
    driver::sort_file(file, config).await?;
    Ok(ExitCode::SUCCESS)
}
