mod app;
mod cli;
mod config;
mod effects;
mod interactive;
mod logging;
mod ui;

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use radar_core::{InputType, ModelStatus};
use radar_logging::radar_info;

use crate::app::Session;
use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::ui::render::{render_outcome, RenderStyle};

const ABOUT: &str = "\
radar sends news text or an article URL to a credibility analysis service and
reports a score between 0% and 100%, together with passages the service flags
as potentially misleading.

  70% and above   Credible
  40% to 69%      Somewhat Credible
  below 40%       Not Credible

No automated system is fully accurate. Satire may be flagged as misleading,
context can be misread, and results are most reliable for English text.";

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let mut config = AppConfig::load(cli.config.as_deref(), &cwd)?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(log) = cli.log {
        config.log = log;
    }
    logging::initialize(config.log, cli.verbose);
    radar_info!("radar {} starting", env!("CARGO_PKG_VERSION"));

    let style = RenderStyle {
        color: !cli.no_color && io::stdout().is_terminal(),
    };

    match cli.command {
        Commands::About => {
            println!("{ABOUT}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Text { content, file } => {
            let content = match (content, file) {
                (Some(content), _) => content,
                (None, Some(path)) => fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, None) => {
                    let mut buffer = String::new();
                    io::stdin()
                        .read_to_string(&mut buffer)
                        .context("failed to read stdin")?;
                    buffer
                }
            };
            analyze_once(&config, InputType::Text, content, cli.json, style)
        }
        Commands::Url { url } => analyze_once(&config, InputType::Url, url, cli.json, style),
        Commands::ModelInfo => show_model_info(&config, cli.json),
        Commands::Interactive => {
            let mut session = Session::new(config.client_settings())?;
            interactive::run(&mut session, style).context("interactive session failed")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn analyze_once(
    config: &AppConfig,
    input_type: InputType,
    input: String,
    json: bool,
    style: RenderStyle,
) -> Result<ExitCode> {
    let mut session = Session::new(config.client_settings())?;
    session.submit(input_type, input);
    session.wait_until_idle();

    let state = session.state();
    if let Some(error) = state.error() {
        eprint!("{}", render_outcome(&session.view(), style));
        radar_info!("Analysis ended with {} error", error.kind);
        return Ok(ExitCode::FAILURE);
    }
    let Some(result) = state.result() else {
        bail!("analysis did not complete");
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(result).context("failed to encode result")?
        );
    } else {
        print!("{}", render_outcome(&session.view(), style));
    }
    Ok(ExitCode::SUCCESS)
}

fn show_model_info(config: &AppConfig, json: bool) -> Result<ExitCode> {
    let mut session = Session::new(config.client_settings())?;
    session.load_model_info();

    match session.state().model_status() {
        ModelStatus::Available(info) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(info).context("failed to encode model info")?
                );
            } else {
                let fields = [
                    ("Model", &info.model_name),
                    ("Version", &info.model_version),
                    ("Last updated", &info.last_updated),
                ];
                for (label, value) in fields {
                    println!("{label}: {}", value.as_deref().unwrap_or("-"));
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        ModelStatus::Unavailable(reason) => {
            eprintln!("Backend unavailable: {reason}");
            Ok(ExitCode::FAILURE)
        }
        ModelStatus::Unknown => bail!("model info request did not complete"),
    }
}
