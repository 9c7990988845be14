//! Command implementations for the vision screening CLI
//!
//! Each command is implemented in its own module; shared logging, discovery
//! and progress helpers live in `shared`.

pub mod check;
pub mod render;
pub mod serve;
pub mod shared;

pub use shared::CommandStats;

use crate::cli::args::{Args, Commands};
use anyhow::{Result, bail};

/// Main command runner
///
/// Sets up logging once, then dispatches to the subcommand handler:
/// - `check`: parse many exports and summarise
/// - `render`: print one export's records
/// - `serve`: run the HTTP upload service
pub async fn run(args: Args) -> Result<CommandStats> {
    shared::setup_logging(&args)?;

    let Some(command) = args.command.clone() else {
        bail!("No command given");
    };

    match command {
        Commands::Check(check_args) => check::run_check(&args, check_args).await,
        Commands::Render(render_args) => render::run_render(render_args).await,
        Commands::Serve(serve_args) => serve::run_serve(serve_args).await,
    }
}
