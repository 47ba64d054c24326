//! Mediatrends CLI - Serve chart-ready views of the media catalogs
//!
//! # Commands
//!
//! ```bash
//! mediatrends serve                      # Start HTTP server (port 5000)
//! mediatrends view movie/year_distribution --pretty
//! mediatrends views                      # List view names and routes
//! mediatrends inspect                    # Show loaded columns and row counts
//! ```
//!
//! Dataset locations come from `--anime/--movies/--games` or the
//! `MEDIATRENDS_*_CSV` variables, which may be set in `.env`.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use mediatrends::validation::catalog_report;
use mediatrends::{start_server, Catalog, DataPaths, Engine, ServerConfig, View};
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "mediatrends")]
#[command(about = "Chart-ready aggregate views over anime, movie and game catalogs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        #[command(flatten)]
        data: DataPaths,

        #[command(flatten)]
        server: ServerConfig,
    },

    /// Compute one view and print its JSON
    View {
        /// View name (e.g. `game/genre_trend`) or route path
        name: String,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        data: DataPaths,
    },

    /// List available views
    Views,

    /// Show columns and row counts of the loaded datasets
    Inspect {
        #[command(flatten)]
        data: DataPaths,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { data, server } => cmd_serve(&data, &server).await,
        Commands::View { name, pretty, data } => cmd_view(&name, pretty, &data),
        Commands::Views => cmd_views(),
        Commands::Inspect { data } => cmd_inspect(&data),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_catalog(data: &DataPaths) -> Result<Catalog, Box<dyn std::error::Error>> {
    let catalog = Catalog::load(data)?;
    for (kind, missing) in catalog_report(&catalog) {
        warn!(
            dataset = %kind,
            missing = %missing.join(", "),
            "dataset lacks declared columns; views using them will fail"
        );
    }
    Ok(catalog)
}

async fn cmd_serve(data: &DataPaths, server: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Arc::new(Engine::new(load_catalog(data)?));
    start_server(engine, server).await?;
    Ok(())
}

fn cmd_view(name: &str, pretty: bool, data: &DataPaths) -> Result<(), Box<dyn std::error::Error>> {
    let view: View = name.parse()?;
    let engine = Engine::new(load_catalog(data)?);
    let output = engine.render(view)?;

    let json = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);
    Ok(())
}

fn cmd_views() -> Result<(), Box<dyn std::error::Error>> {
    for view in View::ALL {
        let sources: Vec<&str> = view.sources().iter().map(|kind| kind.name()).collect();
        let marker = if view.is_precomputed() { " (precomputed)" } else { "" };
        println!(
            "{:<36} {:<44} {}{}",
            view.name(),
            view.path(),
            sources.join("+"),
            marker
        );
    }
    Ok(())
}

fn cmd_inspect(data: &DataPaths) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(data)?;

    for kind in mediatrends::DatasetKind::ALL {
        let dataset = catalog.get(kind);
        println!("{} ({} rows)", kind, dataset.len());
        for column in dataset.schema().columns() {
            println!("  {:<16} {}", column.name, column.kind.name());
        }
        println!();
    }
    Ok(())
}
