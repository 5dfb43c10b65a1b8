mod chart;
mod history;
mod inspect;
mod modes;

use std::path::PathBuf;

use brandscope_engine::Selection;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::chart::SelectionArgs;

#[derive(Debug, Parser)]
#[command(name = "brandscope")]
#[command(about = "Turn brand perception survey workbooks into chart data")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List analysis modes
    Modes {
        /// List the multi-snapshot modes instead of the single-workbook ones
        #[arg(long)]
        historical: bool,
    },
    /// Show the segments, brands and skipped sheets of a workbook
    Inspect {
        /// Workbook to read (xlsx, xls or ods)
        file: PathBuf,
    },
    /// Print chart rows for one workbook as JSON
    Chart {
        /// Analysis mode id (see `modes`)
        #[arg(long)]
        mode: String,
        /// Workbook to read
        file: PathBuf,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Replace brand names with numbered placeholders
        #[arg(long)]
        anonymize: bool,
    },
    /// Print chart rows comparing several workbooks as JSON
    History {
        /// Historical analysis mode id (see `modes --historical`)
        #[arg(long)]
        mode: String,
        /// Workbooks to compare, oldest first
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Snapshot names to leave out of the comparison
        #[arg(long, value_delimiter = ',')]
        inactive: Vec<String>,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Replace brand names with numbered placeholders
        #[arg(long)]
        anonymize: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = brandscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::info!(env = %config.env, "brandscope starting");

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        modes::run_modes(false);
        return Ok(());
    };

    let resolver = brandscope_core::build_brand_resolver(&config)?;
    match command {
        Commands::Modes { historical } => modes::run_modes(historical),
        Commands::Inspect { file } => inspect::run_inspect(&file, &resolver).await?,
        Commands::Chart {
            mode,
            file,
            selection,
            anonymize,
        } => chart::run_chart(&file, &mode, &Selection::from(selection), anonymize, &resolver).await?,
        Commands::History {
            mode,
            files,
            inactive,
            selection,
            anonymize,
        } => {
            history::run_history(
                &files,
                &mode,
                &inactive,
                &Selection::from(selection),
                anonymize,
                &config,
                &resolver,
            )
            .await?;
        }
    }

    Ok(())
}
