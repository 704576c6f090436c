mod app;
mod interaction;
mod participant;

use anyhow::Result;
use app::ExperimentSession;
use clap::{Parser, ValueEnum};
use fittex_experiment::{DragMouseConfiguration, TappingMouseConfiguration};
use interaction::SelectionMethod;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TaskArg {
    Tapping,
    Dragging,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SelectionArg {
    /// Acquire with a button click
    Button,
    /// Acquire by touching the target (tapping task only)
    Contact,
}

/// Headless Fitts's-law experiment runner
#[derive(Debug, Parser)]
#[command(name = "fittex", version, about)]
struct Cli {
    /// Task the session runs
    #[arg(long, value_enum, default_value = "tapping")]
    task: TaskArg,

    /// Selection method for the simulated participant
    #[arg(long, value_enum, default_value = "button")]
    selection: SelectionArg,

    /// Seed for the participant's movement noise
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Where the exported records are written
    #[arg(long, default_value = "fittex_results.json")]
    out: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let selection_method = match cli.selection {
        SelectionArg::Button => SelectionMethod::Button,
        SelectionArg::Contact => SelectionMethod::AutomaticByContact,
    };

    match cli.task {
        TaskArg::Tapping => {
            let mut session =
                ExperimentSession::new(TappingMouseConfiguration, selection_method, cli.seed);
            session.run()?;
            session.save_results(&cli.out)?;
        }
        TaskArg::Dragging => {
            let mut session =
                ExperimentSession::new(DragMouseConfiguration, selection_method, cli.seed);
            session.run()?;
            session.save_results(&cli.out)?;
        }
    }

    Ok(())
}
