use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use peticionador_core::ThesisDraftSynchronizer;
use tracing_subscriber::EnvFilter;

mod display;
mod session;

use session::SessionArgs;

const DEFAULT_LOG_FILTER: &str = "peticionador=info,peticionador_core=info";

#[derive(Parser, Debug)]
#[command(
    name = "peticionador",
    version,
    about = "Assemble petition response drafts from canned theses"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the theses in a catalog file
    Catalog {
        #[arg(long, env = "PETICIONADOR_CATALOG")]
        catalog: PathBuf,

        /// Only show theses whose label contains this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show a processing service response as the results card
    Show {
        #[arg(long)]
        analysis: PathBuf,

        /// Print the rendered view as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Replay a session and print the resulting draft
    Draft {
        #[command(flatten)]
        session: SessionArgs,

        /// Seed the draft with the analysis notes before toggling
        #[arg(long)]
        use_summary: bool,

        /// Response of the draft generation service, applied last
        #[arg(long)]
        generated: Option<PathBuf>,

        /// Save the draft as minuta_<timestamp>.txt in this directory
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Print the draft generation request for the applied theses
    Payload {
        #[command(flatten)]
        session: SessionArgs,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("peticionador v{}", env!("CARGO_PKG_VERSION"));

    match Cli::parse().command {
        Command::Catalog { catalog, filter } => {
            let mut session = ThesisDraftSynchronizer::new();
            session.load_catalog(session::read_catalog(&catalog)?);
            let view = session.search(filter.as_deref().unwrap_or(""));
            print!("{}", display::render_thesis_view(&view));
        }
        Command::Show { analysis, json } => {
            let view = session::read_analysis(&analysis)?.view();
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", display::render_analysis_card(&view));
            }
        }
        Command::Draft {
            session: args,
            use_summary,
            generated,
            save,
        } => {
            let mut replay = session::replay(&args, use_summary)?;
            if let Some(path) = generated {
                let response = session::read_generation(&path)?;
                replay
                    .session
                    .on_draft_generated(response)
                    .context("applying generated draft")?;
            }
            let draft = replay.session.draft();
            print!("{}", display::render_draft(draft));
            if let Some(dir) = save {
                let stamp = chrono::Local::now().naive_local();
                let path = session::save_draft(&dir, draft, stamp)?;
                eprintln!("  Saved {}", path.display());
            }
        }
        Command::Payload { session: args } => {
            let replay = session::replay(&args, false)?;
            let payload = replay.session.generate_draft_request()?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}
