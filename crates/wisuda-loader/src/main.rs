//! wisuda-loader binary.
//!
//! Reads `wisuda.toml` (or the path given with `--config`), opens the SQLite
//! store, and loads graduation participant spreadsheets into it.
//!
//! ```text
//! wisuda-loader load                       # every *.xlsx in data_dir
//! wisuda-loader load "Data Periode 7.xlsx" # specific files
//! wisuda-loader periods --mode normalized
//! wisuda-loader show --npm 12345 --periode 7
//! ```

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wisuda_core::store::{ParticipantStore, Table};
use wisuda_loader::{LoaderConfig, discover_files, expand_tilde, load_paths};
use wisuda_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Graduation participant spreadsheet loader")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "wisuda.toml")]
  config: PathBuf,

  /// SQLite database file; overrides `store_path` from the config.
  #[arg(long, global = true)]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Load spreadsheets into the store.
  Load {
    /// Files to load. Defaults to every `*.xlsx` in `data_dir`.
    paths: Vec<PathBuf>,

    /// Directory to scan when no files are given; overrides `data_dir`.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Skip files that fail instead of stopping.
    #[arg(long)]
    keep_going: bool,
  },

  /// Print the participant count for every loaded period.
  Periods {
    #[arg(long, value_enum, default_value_t = Mode::Raw)]
    mode: Mode,
  },

  /// Print one participant record as JSON.
  Show {
    #[arg(long)]
    npm: String,

    #[arg(long)]
    periode: i64,

    #[arg(long, value_enum, default_value_t = Mode::Raw)]
    mode: Mode,
  },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
  Raw,
  Normalized,
}

impl From<Mode> for Table {
  fn from(mode: Mode) -> Self {
    match mode {
      Mode::Raw => Table::Raw,
      Mode::Normalized => Table::Normalized,
    }
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut cfg = LoaderConfig::load(&cli.config)
    .with_context(|| format!("failed to read config {:?}", cli.config))?;
  if let Some(store) = cli.store {
    cfg.store_path = expand_tilde(&store);
  }

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;

  match cli.command {
    Command::Load { paths, data_dir, keep_going } => {
      let paths = if paths.is_empty() {
        let dir = data_dir.map_or(cfg.data_dir, |d| expand_tilde(&d));
        let found = discover_files(&dir)?;
        if found.is_empty() {
          tracing::info!(dir = %dir.display(), "no spreadsheet files found");
          return Ok(());
        }
        found
      } else {
        paths
      };

      let summary = load_paths(&store, &paths, keep_going || cfg.keep_going).await?;
      for report in &summary.files {
        println!("{} -> {} rows", report.file, report.rows);
      }
      println!("Total rows: {}", summary.total_rows());

      if !summary.failed.is_empty() {
        bail!("{} file(s) failed to load", summary.failed.len());
      }
    }

    Command::Periods { mode } => {
      for (periode, count) in store.count_by_period(mode.into()).await? {
        println!("{periode}\t{count}");
      }
    }

    Command::Show { npm, periode, mode } => {
      let json = match mode {
        Mode::Raw => store.get_raw(&npm, periode).await?.map(|r| r.to_json()),
        Mode::Normalized => {
          store.get_normalized(&npm, periode).await?.map(|r| r.to_json())
        }
      };
      match json.transpose()? {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => bail!("no record for npm {npm:?} in periode {periode}"),
      }
    }
  }

  Ok(())
}
