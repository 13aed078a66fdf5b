// handelsregister: search the German company register from the command line
//
// Results are printed to stdout, one block per company (or JSON with --json).
// Diagnostics go to stderr; each error kind has its own exit code.

use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use handelsregister::cli::Cli;
use handelsregister::{RegisterError, SearchOrchestrator, SearchResultSet, cancellation};

/// Exit code when the search succeeded but matched no company
const EXIT_NO_COMPANIES: u8 = 1;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    match run(&cli).await {
        Ok(records) if records.is_empty() => {
            eprintln!("No companies found for '{}'", cli.schlagwoerter.trim());
            ExitCode::from(EXIT_NO_COMPANIES)
        }
        Ok(records) => match print_records(&records, cli.json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error[output]: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("error[{}]: {}", e.kind(), e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(debug: bool) {
    let default_directive = if debug {
        "handelsregister=debug,warn"
    } else {
        "handelsregister=info,warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: &Cli) -> Result<SearchResultSet, RegisterError> {
    let query = cli.query()?;
    let config = cli.config()?;

    let (cancel, cancellation) = cancellation();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling search");
            cancel.cancel();
        }
    });

    let mut orchestrator = SearchOrchestrator::chromium(config).with_cancellation(cancellation);
    let result = orchestrator.search(&query).await;
    orchestrator.shutdown().await;

    if let Ok(records) = &result {
        info!("Found {} companies", records.len());
    }
    result
}

fn print_records(records: &SearchResultSet, json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
    } else {
        print!("{records}");
    }
    Ok(())
}
