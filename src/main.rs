//! Zoo Planner command-line tool
//!
//! Inspects share strings and lists the catalog they refer to.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use zoo_planner::core::error::Result;
use zoo_planner::{Catalog, EnclosureStatus, ItemKind, LayoutSummary, PlannerConfig, Session};

/// Zoo Planner - inspect layouts and catalogs
#[derive(Parser, Debug)]
#[command(name = "zoo-planner")]
#[command(about = "Inspect zoo layout share strings")]
struct Args {
    /// Planner configuration (TOML); defaults are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a share string and report on the layout
    Inspect {
        /// Share string, e.g. "255.30t.0003b"
        state: String,

        /// Catalog file (TOML); the built-in catalog is used when omitted
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Layout name shown in the report
        #[arg(long)]
        name: Option<String>,

        /// Output format: json or text
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List catalog entries with their share-string indices
    Catalog {
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format: json or text
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// JSON output for `inspect`
#[derive(Serialize)]
struct InspectOutput<'a> {
    name: Option<&'a str>,
    restored: bool,
    state: String,
    summary: LayoutSummary,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("zoo_planner=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => PlannerConfig::load_from_toml(path)?,
        None => PlannerConfig::default(),
    };

    match args.command {
        Command::Inspect { state, catalog, name, format } => {
            let catalog = load_catalog(catalog.as_ref())?;
            let mut session = Session::new(catalog, config)?;
            session.set_name(name);
            // A bad share string means "no saved state"; report an empty layout
            let restored = session.restore(&state).is_ok();
            print_inspect(&session, restored, &format)
        }
        Command::Catalog { catalog, format } => {
            let catalog = load_catalog(catalog.as_ref())?;
            print_catalog(&catalog, &format)
        }
    }
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog> {
    match path {
        Some(path) => {
            tracing::info!("Loading catalog from {}", path.display());
            Ok(Catalog::load_from_toml(path)?)
        }
        None => Ok(Catalog::with_defaults()),
    }
}

fn print_inspect(session: &Session, restored: bool, format: &str) -> Result<()> {
    let summary = session.summary();
    let state = session.encode()?;

    match format {
        "json" => {
            let output = InspectOutput { name: session.name(), restored, state, summary };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            println!("Layout: {}", session.name().unwrap_or("(untitled)"));
            if !restored {
                println!("No saved state; showing an empty layout");
            }
            println!("Share string: {}", if state.is_empty() { "(empty)" } else { state.as_str() });
            println!("Buildings:   {}", summary.buildings);
            println!("Decorations: {}", summary.decorations);
            println!("Enclosures:  {}", summary.enclosures.len());
            for report in &summary.enclosures {
                let label = session
                    .catalog()
                    .animal_index_of(&report.occupant_id)
                    .and_then(|i| session.catalog().animal(i))
                    .map(|a| a.label.as_str())
                    .unwrap_or(&report.occupant_id);
                let mark = match report.status {
                    EnclosureStatus::Ok => "ok",
                    EnclosureStatus::Warning => "too small",
                    EnclosureStatus::Invalid => "invalid",
                };
                println!(
                    "  {:<10} at ({},{}) {}x{} area={} perimeter={} [{}]",
                    label, report.rect.x, report.rect.y, report.rect.w, report.rect.h, report.area, report.perimeter, mark
                );
            }
            println!(
                "Status: {} ok, {} warnings, {} invalid",
                summary.ok, summary.warnings, summary.invalid
            );
        }
    }
    Ok(())
}

fn print_catalog(catalog: &Catalog, format: &str) -> Result<()> {
    match format {
        "json" => {
            #[derive(Serialize)]
            struct CatalogOutput<'a> {
                buildings: &'a [zoo_planner::CatalogEntry],
                decorations: &'a [zoo_planner::CatalogEntry],
                animals: &'a [zoo_planner::AnimalRequirement],
            }
            let output = CatalogOutput {
                buildings: catalog.entries(ItemKind::Building),
                decorations: catalog.entries(ItemKind::Decoration),
                animals: catalog.animals(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            for kind in [ItemKind::Building, ItemKind::Decoration] {
                println!("{}s:", kind.label());
                for (i, entry) in catalog.entries(kind).iter().enumerate() {
                    let limit = if kind == ItemKind::Building && !entry.unlimited { " (unique)" } else { "" };
                    println!(
                        "  [{}] {:<12} {}x{}{}",
                        zoo_planner::codec::base36::encode_digit("index", i as i64)?,
                        entry.type_id,
                        entry.width,
                        entry.height,
                        limit
                    );
                }
            }
            println!("animals:");
            for (i, animal) in catalog.animals().iter().enumerate() {
                println!(
                    "  [{}] {:<12} min area {} min perimeter {}",
                    zoo_planner::codec::base36::encode_digit("index", i as i64)?,
                    animal.occupant_id,
                    animal.min_area,
                    animal.min_perimeter
                );
            }
        }
    }
    Ok(())
}
