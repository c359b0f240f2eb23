//! CLI for the flat-file ingestion pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use flatload::backup::SqliteBackup;
use flatload::collect::{default_extensions, RUN_LOG_NAME};
use flatload::console::{AlwaysYes, StdinConfirmer};
use flatload::loader::{LoadOptions, SqliteSink};
use flatload::observability::{CompositeObserver, FileObserver, ImportObserver, StdErrObserver};
use flatload::run::{IngestRunner, RunOptions};
use flatload::types::ExistsPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExistsArg {
    /// Append to an existing table (create when missing).
    Append,
    /// Drop and recreate the table.
    Replace,
    /// Abort the file if the table exists.
    Fail,
}

impl From<ExistsArg> for ExistsPolicy {
    fn from(arg: ExistsArg) -> Self {
        match arg {
            ExistsArg::Append => ExistsPolicy::Append,
            ExistsArg::Replace => ExistsPolicy::Replace,
            ExistsArg::Fail => ExistsPolicy::Fail,
        }
    }
}

/// Import delimited flat files (CSV/TXT/EXP) into a SQLite database.
#[derive(Debug, Parser)]
#[command(name = "flatload", version, about)]
struct Cli {
    /// Input file or directory of files to import.
    input: PathBuf,

    /// Destination SQLite database file (created when missing).
    #[arg(long, short = 'd')]
    database: PathBuf,

    /// Import every file into this one table instead of per-file tables
    /// named after each file's stem.
    #[arg(long, short = 't')]
    table: Option<String>,

    /// Rows per chunk.
    #[arg(long, default_value_t = 10_000, value_parser = clap::value_parser!(u64).range(1..))]
    chunk_size: u64,

    /// What to do when a target table already exists.
    #[arg(long, value_enum, default_value_t = ExistsArg::Append)]
    if_exists: ExistsArg,

    /// Accepted file extensions (comma-separated, without dots).
    #[arg(long = "ext", value_delimiter = ',')]
    extensions: Option<Vec<String>>,

    /// Append per-file outcomes to import_log.txt next to the input.
    #[arg(long)]
    log: bool,

    /// Answer yes to all prompts (non-interactive).
    #[arg(long, short = 'y')]
    yes: bool,

    /// Offer a post-import backup of the database into the input directory.
    #[arg(long)]
    backup: bool,

    /// Tag included in the backup artifact name.
    #[arg(long, default_value = "import")]
    message: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let opts = RunOptions {
        extensions: cli.extensions.clone().unwrap_or_else(default_extensions),
        table: cli.table.clone(),
        load: LoadOptions {
            chunk_size: cli.chunk_size as usize,
            exists_policy: cli.if_exists.into(),
        },
        destination_label: cli.database.display().to_string(),
        backup_message: cli.message.clone(),
    };

    let sink = SqliteSink::open(&cli.database)
        .with_context(|| format!("cannot open database {}", cli.database.display()))?;

    let mut runner = IngestRunner::new(sink, opts).with_observer(build_observer(&cli));
    if cli.yes {
        runner = runner.with_confirmer(AlwaysYes);
    } else {
        runner = runner.with_confirmer(StdinConfirmer);
    }
    if cli.backup {
        runner = runner.with_backup(SqliteBackup::new(&cli.database));
    }

    let summary = runner
        .run(&cli.input)
        .with_context(|| format!("import run failed for {}", cli.input.display()))?;

    if summary.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}

fn build_observer(cli: &Cli) -> Arc<dyn ImportObserver> {
    if !cli.log {
        return Arc::new(StdErrObserver);
    }

    let log_dir = if cli.input.is_dir() {
        cli.input.clone()
    } else {
        cli.input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    };
    Arc::new(CompositeObserver::new(vec![
        Arc::new(StdErrObserver),
        Arc::new(FileObserver::new(log_dir.join(RUN_LOG_NAME))),
    ]))
}
