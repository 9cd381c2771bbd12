use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use aerodrop_dispatch::{
    json::{solution::JsonSolution, types::JsonDeliveryCase},
    solver::{
        solution_summary::SolutionSummary,
        solver::Solver,
        solver_params::{DEFAULT_NEAREST_NEIGHBORS, SolverParams},
    },
};
use anyhow::Context;
use clap::Args;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use tracing::info;

use crate::{file_utils::read_case_folder, parsers::parse_positive_count};

#[derive(Args)]
pub struct SolveArgs {
    /// A case file, or a folder searched recursively for `.json` cases
    #[arg(short, long)]
    input: PathBuf,

    /// Packages each package and depot is linked to in the search graph
    #[arg(
        long,
        env = "AERODROP_NEAREST_NEIGHBORS",
        default_value_t = DEFAULT_NEAREST_NEIGHBORS,
        value_parser = parse_positive_count
    )]
    nearest_neighbors: usize,

    /// Cost added to an edge crossing an active no-fly zone
    #[arg(long, env = "AERODROP_NO_FLY_ZONE_PENALTY")]
    no_fly_zone_penalty: Option<f64>,

    /// Energy drained per unit of cost by an unloaded drone
    #[arg(long, env = "AERODROP_ENERGY_BASE_CONSUMPTION")]
    energy_base_consumption: Option<f64>,

    /// Output folder for .solution.json files
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SolveArgs {
    fn solver_params(&self) -> SolverParams {
        let defaults = SolverParams::default();
        SolverParams {
            nearest_neighbors: self.nearest_neighbors,
            no_fly_zone_penalty: self
                .no_fly_zone_penalty
                .unwrap_or(defaults.no_fly_zone_penalty),
            energy_base_consumption: self
                .energy_base_consumption
                .unwrap_or(defaults.energy_base_consumption),
        }
    }
}

pub fn run(args: SolveArgs) -> Result<(), anyhow::Error> {
    let paths = if args.input.is_file() {
        vec![args.input.clone()]
    } else {
        read_case_folder(&args.input)
            .with_context(|| format!("cannot read case folder {:?}", args.input))?
    };

    if let Some(output) = &args.output {
        std::fs::create_dir_all(output)?;
    }

    for path in paths {
        info!("Solving {:?}", path);
        solve_file(&path, &args)?;
    }

    Ok(())
}

fn solve_file(path: &Path, args: &SolveArgs) -> Result<(), anyhow::Error> {
    let file = File::open(path).with_context(|| format!("cannot open {path:?}"))?;
    let json: JsonDeliveryCase = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("invalid delivery case {path:?}"))?;
    let mut case = json
        .build_case()
        .with_context(|| format!("invalid delivery case {path:?}"))?;

    let mut solver = Solver::new(args.solver_params());
    let solution = solver.solve(&mut case);

    let summary = SolutionSummary::new(&case, &solution);
    println!("{}", summary_table(&summary));

    if let Some(output) = &args.output {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("case"));
        let out = output.join(format!("{stem}.solution.json"));
        let export = JsonSolution::from_solution(json.start_time, &case, &solution);
        std::fs::write(&out, serde_json::to_string_pretty(&export)?)?;
        info!("Solution written to {:?}", out);
    }

    Ok(())
}

fn summary_table(summary: &SolutionSummary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value"]);

    table.add_row(vec!["Solver".to_owned(), summary.solver_name.clone()]);
    table.add_row(vec![
        "Drones used".to_owned(),
        format!("{} / {}", summary.drones_used, summary.drones),
    ]);
    table.add_row(vec![
        "Delivered".to_owned(),
        format!("{} / {}", summary.delivered, summary.packages),
    ]);
    table.add_row(vec![
        "Undeliverable".to_owned(),
        summary.undeliverable.to_string(),
    ]);
    table.add_row(vec![
        "Success rate".to_owned(),
        format!("{:.1}%", summary.delivery_percent),
    ]);
    table.add_row(vec![
        "Total cost".to_owned(),
        format!("{:.2}", summary.total_cost),
    ]);
    table.add_row(vec![
        "Total distance".to_owned(),
        format!("{:.2}", summary.total_distance),
    ]);
    table.add_row(vec![
        "Total energy".to_owned(),
        format!("{:.2}", summary.total_energy),
    ]);

    table
}
