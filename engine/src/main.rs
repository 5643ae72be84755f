// Engine main entry point
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use ad_engine::config::EngineSettings;
use ad_engine::data::fixtures::sample_records;
use ad_engine::data::{InMemoryRecordStore, RecordStore, SheetOptions, SqliteRecordStore};
use ad_engine::pipeline::{run_report, RecordSource};
use ad_engine::services::router;
use ad_engine::EngineError;
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ad-engine", version, about = "Daily ad spend report and record API")]
struct Cli {
    /// JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the record table and day-over-day trends
    Report {
        /// Spreadsheet (.xlsx, .xls, .ods) or .csv file.
        /// Falls back to the settings file, then to sample data.
        file: Option<PathBuf>,

        /// Use cached formula results instead of formula text
        #[arg(long)]
        evaluate_formulas: bool,

        /// Field delimiter for .csv input
        #[arg(long)]
        delimiter: Option<char>,
    },
    /// Serve GET/POST /api/ads
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,

        /// SQLite URL, e.g. sqlite://ads.db?mode=rwc (in-memory store when omitted)
        #[arg(long)]
        database: Option<String>,

        /// Load the sample records at startup when the store is empty
        #[arg(long)]
        seed: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match EngineSettings::load_or_default(cli.config.as_deref()) {
        Ok(settings) => match cli.command {
            Command::Report {
                file,
                evaluate_formulas,
                delimiter,
            } => report(settings, file, evaluate_formulas, delimiter),
            Command::Serve {
                host,
                port,
                database,
                seed,
            } => serve(settings, host, port, database, seed).await,
        },
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let source_failure = e
                .downcast_ref::<EngineError>()
                .is_some_and(EngineError::is_source_failure);
            if source_failure {
                eprintln!("Unable to read the input source: {}", e);
            } else {
                eprintln!("Error: {}", e);
            }
            eprintln!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}

fn report(
    mut settings: EngineSettings,
    file: Option<PathBuf>,
    evaluate_formulas: bool,
    delimiter: Option<char>,
) -> anyhow::Result<()> {
    if evaluate_formulas {
        settings.evaluate_formulas = true;
    }
    if let Some(d) = delimiter {
        settings.csv_delimiter = d.to_string();
    }
    let options = SheetOptions {
        evaluate_formulas: settings.evaluate_formulas,
        csv_delimiter: settings.delimiter_byte()?,
    };

    let source = match file.or(settings.data_file) {
        Some(path) => RecordSource::File(path),
        None => {
            info!("No input file configured, reporting on sample data");
            RecordSource::Fixtures
        }
    };

    let summary = run_report(&source, &options, &mut io::stdout().lock())?;
    info!(records = summary.records, pairs = summary.compared_pairs, "Report finished");
    Ok(())
}

async fn serve(
    mut settings: EngineSettings,
    host: Option<String>,
    port: Option<u16>,
    database: Option<String>,
    seed: bool,
) -> anyhow::Result<()> {
    if let Some(h) = host {
        settings.host = h;
    }
    if let Some(p) = port {
        settings.port = p;
    }
    if database.is_some() {
        settings.database_url = database;
    }
    settings.seed_sample_data |= seed;

    let store: Arc<dyn RecordStore> = match &settings.database_url {
        Some(url) => Arc::new(SqliteRecordStore::connect(url).await?),
        None => Arc::new(InMemoryRecordStore::new()),
    };

    if settings.seed_sample_data && store.list().await?.is_empty() {
        for record in sample_records() {
            store.create(record).await?;
        }
        info!("Seeded record store with sample data");
    }

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Serving /api/ads on http://{}", addr);

    axum::serve(listener, router(store)).await?;
    Ok(())
}
