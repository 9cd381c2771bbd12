use std::path::{Path, PathBuf};

use aerodrop_dispatch::generator::random_case::RandomCaseGenerator;
use clap::Subcommand;
use jiff::Timestamp;
use tracing::info;

use crate::parsers;

#[derive(Subcommand)]
pub enum GenerateSubcommands {
    JsonSchema {
        /// Output file for the delivery case schema
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
    /// Random delivery case on a 100 x 100 grid
    RandomCase {
        #[arg(long, default_value_t = 5)]
        drones: usize,

        #[arg(long, default_value_t = 20)]
        packages: usize,

        #[arg(long, default_value_t = 2)]
        no_fly_zones: usize,

        /// Seed for reproducible cases
        #[arg(long)]
        seed: Option<u64>,

        /// Case start time (e.g., "2025-01-01T08:00:00Z", "now")
        #[arg(long, value_parser = parsers::parse_timestamp, default_value = "now")]
        start_time: Timestamp,

        #[arg(long, short = 'o')]
        out: PathBuf,
    },
}

fn write_file(out: &Path, content: String) -> Result<(), anyhow::Error> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(out, content)?;
    Ok(())
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        GenerateSubcommands::JsonSchema { out } => {
            let schema = aerodrop_dispatch::json::schema::generate_json_schema()?;
            write_file(&out, schema)?;
        }
        GenerateSubcommands::RandomCase {
            drones,
            packages,
            no_fly_zones,
            seed,
            start_time,
            out,
        } => {
            let case = match seed {
                Some(seed) => RandomCaseGenerator::seeded(seed).generate(
                    start_time,
                    drones,
                    packages,
                    no_fly_zones,
                ),
                None => RandomCaseGenerator::new(rand::rng()).generate(
                    start_time,
                    drones,
                    packages,
                    no_fly_zones,
                ),
            };

            write_file(&out, serde_json::to_string_pretty(&case)?)?;
            info!(drones, packages, no_fly_zones, "Random case written to {:?}", out);
        }
    }

    Ok(())
}
