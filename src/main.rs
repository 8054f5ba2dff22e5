//! Askdb CLI - ingest sales exports and ask questions about them

use std::path::PathBuf;
use std::sync::Arc;

use askdb::config::{self, AskdbConfig};
use askdb::llm::GeminiClient;
use askdb::pipeline::QaPipeline;
use askdb::storage::SqliteStore;
use askdb::{ingest, server, ui};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_DATABASE: &str = "ecommerce_data.db";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_PORT: u16 = 8080;

#[derive(Parser)]
#[command(name = "askdb")]
#[command(version)]
#[command(about = "Ask natural-language questions about a local SQLite sales database")]
#[command(long_about = r#"
Askdb loads CSV sales exports into SQLite and answers plain-English
questions about them via a hosted language model:

  askdb ingest --data-dir ./exports
  askdb serve --port 8080
  askdb ask "What is my total sales?"

The model API key is read from GEMINI_API_KEY (or GOOGLE_API_KEY).
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a config file (defaults to askdb.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default askdb.toml config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Load the source CSV exports into the database
    Ingest {
        /// Directory containing the source CSV files
        #[arg(short = 'D', long)]
        data_dir: Option<PathBuf>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Start the question-answering web surface
    Serve {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Model name
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Answer a single question from the command line
    Ask {
        /// The question to answer
        question: String,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Model name
        #[arg(short, long)]
        model: Option<String>,
    },

    /// List ingested tables and row counts
    Tables {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            let defaults = AskdbConfig {
                database: Some(DEFAULT_DATABASE.to_string()),
                data_dir: Some(".".to_string()),
                model: Some(DEFAULT_MODEL.to_string()),
                port: Some(DEFAULT_PORT),
            };
            config::write_config(&path, &defaults, force)?;
            ui::success(&format!("Wrote config to {}", path.display()));
        }

        Commands::Ingest { data_dir, database } => {
            let database = resolve_database(database, &config);
            let data_dir = data_dir
                .or_else(|| config.data_dir.clone().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("."));

            ui::header("Ingesting sales exports");
            ui::info("Data dir", &data_dir.display().to_string());
            ui::info("Database", &database.display().to_string());

            config::ensure_db_dir(&database)?;
            let mut store = SqliteStore::open(&database)?;
            let report = ingest::run(&mut store, &data_dir, &ingest::SOURCE_FILES);

            ui::section("Summary");
            println!("  Loaded:  {}", report.loaded.len());
            println!("  Missing: {}", report.missing.len());
            println!("  Failed:  {}", report.failed.len());
            if report.is_clean() {
                ui::success("Process complete.");
            } else {
                ui::warn("Process complete with warnings.");
            }
        }

        Commands::Serve { database, port, model } => {
            let database = resolve_database(database, &config);
            let port = port.or(config.port).unwrap_or(DEFAULT_PORT);
            let model = resolve_model(model, &config);

            let client = Arc::new(GeminiClient::from_env(&model)?);
            server::start_server(port, database, client).await?;
        }

        Commands::Ask { question, database, model } => {
            let question = question.trim().to_string();
            if question.is_empty() {
                ui::warn("Please enter a question.");
                return Ok(());
            }

            let database = resolve_database(database, &config);
            if !database.exists() {
                anyhow::bail!(
                    "Database file '{}' not found. Run `askdb ingest` first.",
                    database.display()
                );
            }

            let model = resolve_model(model, &config);
            let mut store = SqliteStore::open(&database)?;
            let pipeline = QaPipeline::new(Arc::new(GeminiClient::from_env(&model)?));

            println!("{} Thinking...", ui::Icons::BRAIN);
            let answer = pipeline.ask(&mut store, &question).await?;

            ui::section("Query");
            println!("{}", answer.sql);
            ui::section("Result");
            println!("{}", ui::results_table(&answer.result));
            ui::section("Answer");
            println!("{}", answer.answer);
        }

        Commands::Tables { database } => {
            let database = resolve_database(database, &config);
            if !database.exists() {
                anyhow::bail!(
                    "Database file '{}' not found. Run `askdb ingest` first.",
                    database.display()
                );
            }

            let store = SqliteStore::open(&database)?;
            println!("{} Tables in {}", ui::Icons::DATABASE, database.display());
            println!("{}", ui::counts_table(&store.table_counts()?));
        }
    }

    Ok(())
}

fn resolve_database(flag: Option<PathBuf>, config: &AskdbConfig) -> PathBuf {
    flag.or_else(|| config.database.clone().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
}

fn resolve_model(flag: Option<String>, config: &AskdbConfig) -> String {
    flag.or_else(|| config.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}
