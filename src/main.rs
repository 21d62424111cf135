//! Turns an adblock-style filter list into the JSON rule array a browser's
//! declarative request-filtering API installs. Only `||domain^` block rules
//! are converted; everything else in the list is skipped.
use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use filterlist_dnr::utils::{self, ConvertOptions};

#[derive(Parser)]
#[command(name = "filterlist-dnr")]
#[command(version, about = "Convert adblock-style filter lists into declarative network request rules")]
struct Cli {
    /// Enable debug logging and show every diagnostic
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Where to write the config (.toml, .yaml or .json)
        #[arg(long, value_name = "FILE")]
        path: Option<String>,
    },
    /// Convert a filter list to a JSON rule array
    Convert {
        /// Filter list path, or '-' for stdin
        input: String,
        /// Output file; prints to stdout when omitted
        #[arg(short, long, value_name = "FILE")]
        output: Option<String>,
        /// Configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<String>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
        /// Keep at most this many rules
        #[arg(long, value_name = "N")]
        max_rules: Option<usize>,
    },
    /// Report how a filter list would convert, without writing rules
    Check {
        /// Filter list path, or '-' for stdin
        input: String,
        /// Configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::init_from_env(Env::default().default_filter_or(level));

    match cli.command {
        Commands::Init { path } => utils::initialize_config(path.as_deref()),
        Commands::Convert {
            input,
            output,
            config,
            pretty,
            max_rules,
        } => utils::convert_list(
            &input,
            output.as_deref(),
            &ConvertOptions {
                config,
                pretty,
                max_rules,
            },
        ),
        Commands::Check { input, config } => {
            utils::check_list(&input, config.as_deref(), cli.verbose)
        }
    }
}
