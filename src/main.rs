use anyhow::{Context, Result};
use clap::Parser;
use credsplit::config::{AppConfig, RunConfig};
use credsplit::router::RouteFlags;
use credsplit::scanner::metadata::LoftyTags;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "credsplit",
    version,
    about = "Split multi-artist credits into a canonical list and sort files by outcome"
)]
struct Cli {
    /// Directory to scan (default: unprocessed)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where processed files go (default: processed)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Where ignored files go (default: ignored)
    #[arg(long)]
    ignored: Option<PathBuf>,

    /// Apply changes (without this, only report what would happen)
    #[arg(short, long)]
    update: bool,

    /// Rewrite tags but leave files where they are
    #[arg(short, long)]
    stay: bool,

    /// Send ignored files to the output directory instead of the ignored one
    #[arg(short, long = "move")]
    move_ignored: bool,

    /// Treat artists that still contain a path separator as ignored
    #[arg(long)]
    ignore_slash: bool,

    /// Remove path separators from credits before splitting
    #[arg(long)]
    strip_slash: bool,

    /// Copy fixture files into the input directory before scanning
    #[arg(short, long)]
    test: bool,

    /// Ignore-list file, one substring rule per line
    #[arg(long)]
    ignore_file: Option<PathBuf>,

    /// Change log written by this run
    #[arg(long)]
    change_log: Option<PathBuf>,

    /// Separator used when writing the artist list back
    #[arg(long)]
    separator: Option<String>,

    /// Verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// CLI > config file > built-in defaults.
    fn into_run_config(self, app: &AppConfig) -> RunConfig {
        let mut config = RunConfig::from_app(app);
        if let Some(p) = self.input {
            config.input_dir = p;
        }
        if let Some(p) = self.output {
            config.output_dir = p;
        }
        if let Some(p) = self.ignored {
            config.ignored_dir = p;
        }
        if let Some(p) = self.ignore_file {
            config.ignore_file = p;
        }
        if let Some(p) = self.change_log {
            config.change_log = p;
        }
        if let Some(s) = self.separator {
            config.separator = s;
        }
        config.strip_unsafe |= self.strip_slash;
        config.ignore_slash = self.ignore_slash;
        config.stage_fixtures = self.test;
        config.flags = RouteFlags {
            update: self.update,
            stay: self.stay,
            move_ignored: self.move_ignored,
        };
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Per-file outcomes are logged at info, so that is the floor
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load config file (optional, defaults if missing)
    let app = AppConfig::load();
    let config = cli.into_run_config(&app);

    if !config.flags.update {
        println!("DRY RUN — no files will be modified or moved");
        println!();
    }

    let summary = credsplit::scanner::run(&config, &LoftyTags).context("Run failed")?;

    println!();
    println!(
        "Run complete: {} scanned, {} processed, {} single artist, {} ignored, {} no artist",
        summary.scanned, summary.processed, summary.single, summary.ignored, summary.no_artist
    );
    if config.flags.update {
        println!(
            "{} tags written, {} files moved, {} empty directories removed",
            summary.tags_written, summary.moved, summary.pruned
        );
    } else if summary.processed > 0 {
        println!(
            "(dry run — see {} and re-run with --update to apply)",
            config.change_log.display()
        );
    }

    Ok(())
}
