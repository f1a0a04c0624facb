//! Command-line interface for radar.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::LogDestination;

/// radar - check the credibility of news text or articles
#[derive(Parser, Debug)]
#[command(name = "radar")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Analysis API prefix, e.g. http://localhost:8000 or https://host/api behind a proxy
    #[arg(long, global = true, env = "RADAR_API_URL")]
    pub api_url: Option<String>,

    /// Config file (defaults to ./radar.ron when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Where to write logs (overrides the config file)
    #[arg(long, global = true, value_enum)]
    pub log: Option<LogDestination>,

    /// Log debug detail to the terminal
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the raw analysis result as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable ANSI colours in the report
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a piece of text
    Text {
        /// Text to analyze (reads --file or stdin if not provided)
        content: Option<String>,

        /// Read the text from a file
        #[arg(short, long, conflicts_with = "content")]
        file: Option<PathBuf>,
    },

    /// Analyze the article behind a URL
    Url {
        /// Address of the article
        url: String,
    },

    /// Show the backend model information
    ModelInfo,

    /// Start a line-oriented analyzer session
    Interactive,

    /// Describe what the scores mean
    About,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from(["radar", "url", "https://example.com", "--json"]);
        assert!(cli.json);
        match cli.command {
            Commands::Url { url } => assert_eq!(url, "https://example.com"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn text_and_file_conflict() {
        let parsed = Cli::try_parse_from(["radar", "text", "hello", "--file", "a.txt"]);
        assert!(parsed.is_err());
    }
}
