mod run;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use ypscrape_workbook::Workbook;

#[derive(Debug, Parser)]
#[command(name = "ypscrape")]
#[command(about = "Business directory search scraper driven by a workbook")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape the search in the input sheet if its `Run` flag is set (default)
    Run,
    /// Create any missing workbook sheets and exit
    Init,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ypscrape_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Init => {
            let workbook = Workbook::open(&config.workbook_dir);
            if workbook.ensure_created()? {
                println!("workbook created in {}", workbook.dir().display());
            } else {
                println!("workbook already exists in {}", workbook.dir().display());
            }
        }
        Commands::Run => {
            let cancel = CancellationToken::new();
            tokio::spawn(cancel_on_ctrl_c(cancel.clone()));
            run::run_once(&config, cancel).await?;
        }
    }

    Ok(())
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::warn!("interrupt received; stopping after the current page");
            cancel.cancel();
        }
        Err(e) => tracing::warn!(error = %e, "failed to listen for ctrl-c"),
    }
}

#[cfg(test)]
mod tests;
