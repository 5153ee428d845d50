use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use neo_catalog::extract::{load_approaches, load_neos};
use neo_catalog::write::{write_to_csv, write_to_json};
use neo_catalog::{create_filters, limit, NeoDatabase, QueryMatch, QueryOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "neoq")]
#[command(about = "Explore near-Earth object close approaches")]
#[command(version)]
struct Cli {
    /// Path to the NEO dataset (CSV)
    #[arg(long, default_value = "data/neos.csv")]
    neofile: PathBuf,

    /// Path to the close-approach dataset (JSON)
    #[arg(long, default_value = "data/cad.json")]
    cadfile: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a single NEO by designation or name
    Inspect {
        /// Primary designation, e.g. 433
        #[arg(long, required_unless_present = "name", conflicts_with = "name")]
        pdes: Option<String>,

        /// IAU name, e.g. Eros
        #[arg(long)]
        name: Option<String>,

        /// Also list the NEO's close approaches
        #[arg(short, long)]
        verbose: bool,
    },

    /// Query close approaches matching the given criteria
    Query {
        /// Exact approach date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Earliest approach date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Latest approach date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Minimum approach distance in astronomical units
        #[arg(long)]
        min_distance: Option<f64>,

        /// Maximum approach distance in astronomical units
        #[arg(long)]
        max_distance: Option<f64>,

        /// Minimum approach velocity in km/s
        #[arg(long)]
        min_velocity: Option<f64>,

        /// Maximum approach velocity in km/s
        #[arg(long)]
        max_velocity: Option<f64>,

        /// Minimum NEO diameter in kilometers
        #[arg(long)]
        min_diameter: Option<f64>,

        /// Maximum NEO diameter in kilometers
        #[arg(long)]
        max_diameter: Option<f64>,

        /// Match only potentially hazardous NEOs
        #[arg(long, conflicts_with = "not_hazardous")]
        hazardous: bool,

        /// Match only non-hazardous NEOs
        #[arg(long)]
        not_hazardous: bool,

        /// Maximum number of results (0 means unlimited)
        #[arg(long)]
        limit: Option<usize>,

        /// Write results to this .csv or .json file instead of printing
        #[arg(long)]
        outfile: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let neos = load_neos(&cli.neofile)?;
    let approaches = load_approaches(&cli.cadfile)?;
    let db = NeoDatabase::new(neos, approaches);

    match cli.command {
        Commands::Inspect {
            pdes,
            name,
            verbose,
        } => inspect(&db, pdes.as_deref(), name.as_deref(), verbose),
        Commands::Query {
            date,
            start_date,
            end_date,
            min_distance,
            max_distance,
            min_velocity,
            max_velocity,
            min_diameter,
            max_diameter,
            hazardous,
            not_hazardous,
            limit: cap,
            outfile,
        } => {
            let options = QueryOptions {
                date,
                start_date,
                end_date,
                distance_min: min_distance,
                distance_max: max_distance,
                velocity_min: min_velocity,
                velocity_max: max_velocity,
                diameter_min: min_diameter,
                diameter_max: max_diameter,
                hazardous: match (hazardous, not_hazardous) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            };
            run_query(&db, &options, cap, outfile.as_deref())
        }
    }
}

fn inspect(
    db: &NeoDatabase,
    pdes: Option<&str>,
    name: Option<&str>,
    verbose: bool,
) -> anyhow::Result<()> {
    let neo = match (pdes, name) {
        (Some(designation), _) => db.get_neo_by_designation(designation),
        (None, Some(name)) => db.get_neo_by_name(name),
        (None, None) => unreachable!("clap enforces one of --pdes/--name"),
    };

    let Some(neo) = neo else {
        println!("No matching NEO found.");
        return Ok(());
    };

    println!("{neo}");
    if verbose {
        for approach in db.approaches_of(neo) {
            println!("- {approach}");
        }
    }
    Ok(())
}

fn run_query(
    db: &NeoDatabase,
    options: &QueryOptions,
    cap: Option<usize>,
    outfile: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let filters = create_filters(options);

    // Printing defaults to the first ten matches; file output takes
    // everything unless a cap was given.
    let effective_cap = match outfile {
        None => Some(cap.unwrap_or(10)),
        Some(_) => cap,
    };
    let results: Vec<QueryMatch<'_>> =
        limit(db.query(&filters), effective_cap).collect::<Result<_, _>>()?;

    match outfile {
        None => {
            for m in &results {
                println!("{m}");
            }
            if results.is_empty() {
                println!("No close approaches match the given criteria.");
            } else {
                println!("\nTotal results: {}", results.len());
            }
        }
        Some(path) => {
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("csv") => write_to_csv(results.iter().copied(), path)?,
                Some("json") => write_to_json(results.iter().copied(), path)?,
                _ => anyhow::bail!(
                    "Unsupported output extension (expected .csv or .json): {:?}",
                    path
                ),
            }
            println!("Wrote {} close approach(es) to {:?}", results.len(), path);
        }
    }
    Ok(())
}
