mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use compact_core::Strategy;

#[derive(Parser)]
#[command(name = "compact", version, about = "Collapse adjacent duplicate lines")]
struct Cli {
    /// Config file to use instead of the local/global search
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compact lines from files or stdin
    Lines(LinesArgs),
    /// Print worked examples of compaction
    Demo,
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args)]
pub struct LinesArgs {
    /// Input files; stdin when omitted or `-`
    pub files: Vec<PathBuf>,

    /// Compaction technique: scan or pairwise
    #[arg(long)]
    pub strategy: Option<Strategy>,

    /// Treat lines differing only in case as duplicates
    #[arg(short = 'i', long, overrides_with = "no_ignore_case")]
    pub ignore_case: bool,

    /// Compare case-sensitively, even if the config says otherwise
    #[arg(long, overrides_with = "ignore_case")]
    pub no_ignore_case: bool,

    /// Ignore and strip trailing whitespace
    #[arg(short = 't', long = "trim", overrides_with = "no_trim")]
    pub trim_trailing_whitespace: bool,

    /// Keep trailing whitespace, even if the config says otherwise
    #[arg(long = "no-trim", overrides_with = "trim_trailing_whitespace")]
    pub no_trim: bool,

    /// Prefix lines with the length of their run
    #[arg(short = 'c', long, overrides_with = "no_count")]
    pub count: bool,

    /// Print lines without run lengths, even if the config says otherwise
    #[arg(long, overrides_with = "count")]
    pub no_count: bool,

    /// Drop blank lines before compacting
    #[arg(short = 'b', long, overrides_with = "no_skip_blank")]
    pub skip_blank: bool,

    /// Keep blank lines, even if the config says otherwise
    #[arg(long, overrides_with = "skip_blank")]
    pub no_skip_blank: bool,

    /// Emit JSON with the lines and line totals
    #[arg(long)]
    pub json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("COMPACT_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Command::Lines(args) => commands::cmd_lines(&args, config),
        Command::Demo => commands::cmd_demo(),
        Command::Config => commands::cmd_config(config),
    };

    if let Err(e) = result {
        eprintln!("compact: {e:#}");
        std::process::exit(1);
    }
}
