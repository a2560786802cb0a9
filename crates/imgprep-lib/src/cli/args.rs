use clap::{ArgAction, Parser, Subcommand};
use std::ffi::OsString;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Download {
        config_path: Option<String>,
        output_dir: Option<String>,
        queries: Vec<String>,
        delay_ms: Option<u64>,
        chunk_size: Option<usize>,
        timeout_secs: Option<u64>,
        no_progress: bool,
    },
    Plan {
        config_path: Option<String>,
        output_dir: Option<String>,
        queries: Vec<String>,
    },
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "imgprep",
    version,
    about = "Download restaurant images into a mobile app's bundled asset directory"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count,
        global = true
    )]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Fetch one image per restaurant name and write them to the output directory
    Download {
        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Optional config file (YAML, TOML or JSON); built-in defaults are used otherwise"
        )]
        config: Option<String>,

        #[arg(
            short = 'o',
            long = "output-dir",
            value_name = "DIR",
            help = "Overrides the output directory for downloaded images"
        )]
        output_dir: Option<String>,

        #[arg(
            short = 'q',
            long = "query",
            value_name = "NAME",
            help = "Replaces the configured restaurant names (repeat for each name; commas are kept as part of the name)",
            action = ArgAction::Append
        )]
        queries: Vec<String>,

        #[arg(
            long = "delay-ms",
            value_name = "MS",
            help = "Pause between consecutive downloads in milliseconds"
        )]
        delay_ms: Option<u64>,

        #[arg(
            long = "chunk-size",
            value_name = "BYTES",
            help = "Buffer size used when writing images to disk"
        )]
        chunk_size: Option<usize>,

        #[arg(
            long = "timeout-secs",
            value_name = "SECS",
            help = "Per-request timeout in seconds"
        )]
        timeout_secs: Option<u64>,

        #[arg(long = "no-progress", help = "Disables the transfer progress bar")]
        no_progress: bool,
    },

    /// Print the URL and destination file for every restaurant without downloading
    Plan {
        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Optional config file (YAML, TOML or JSON); built-in defaults are used otherwise"
        )]
        config: Option<String>,

        #[arg(
            short = 'o',
            long = "output-dir",
            value_name = "DIR",
            help = "Overrides the output directory for downloaded images"
        )]
        output_dir: Option<String>,

        #[arg(
            short = 'q',
            long = "query",
            value_name = "NAME",
            help = "Replaces the configured restaurant names (repeat for each name; commas are kept as part of the name)",
            action = ArgAction::Append
        )]
        queries: Vec<String>,
    },
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();
    let args = args_from_cli(cli);
    init_tracing(args.log_level);
    args
}

/// Parses without touching the global subscriber.
pub fn try_parse_args_from<I, T>(iter: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(iter).map(args_from_cli)
}

fn init_tracing(log_level: Level) {
    // stdout carries `plan` output only.
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy()
                .add_directive("hyper_util=warn".parse().unwrap()),
        )
        .init();
}

fn args_from_cli(cli: Cli) -> Args {
    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let command = match cli.command {
        CliCommand::Download {
            config,
            output_dir,
            queries,
            delay_ms,
            chunk_size,
            timeout_secs,
            no_progress,
        } => Command::Download {
            config_path: config,
            output_dir,
            queries,
            delay_ms,
            chunk_size,
            timeout_secs,
            no_progress,
        },
        CliCommand::Plan {
            config,
            output_dir,
            queries,
        } => Command::Plan {
            config_path: config,
            output_dir,
            queries,
        },
    };

    Args { command, log_level }
}
