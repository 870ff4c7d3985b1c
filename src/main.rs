use std::{fs::File, io::BufReader, path::PathBuf, process::ExitCode};

use clap::Parser;
use log::info;

use splitroute::solver::MicroLpSolver;
use splitroute::{Problem, SplitDeliveryModel, Status};

/// Compute minimum-distance split-delivery routes for a fleet of
/// capacity-constrained vehicles.
#[derive(Parser)]
#[clap(name = "splitroute")]
struct Args {
    /// Path to a problem instance (JSON)
    path: PathBuf,
    /// Print the solution as JSON instead of text
    #[clap(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let file = match File::open(&args.path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("failed to open {}: {}", args.path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let problem: Problem = match serde_json::from_reader(BufReader::new(file)) {
        Ok(problem) => problem,
        Err(err) => {
            eprintln!("invalid instance {}: {}", args.path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Solving an instance with {} locations and {} vehicles.",
        problem.num_locations(),
        problem.vehicles().len()
    );

    let solution = match SplitDeliveryModel::solve(&problem, &MicroLpSolver) {
        Ok(solution) => solution,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&solution).unwrap());
        return match solution.status {
            Status::Optimal => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        };
    }

    match solution.status {
        Status::Optimal => {
            println!(
                "Total minimum distance: {}",
                solution.total_distance.unwrap_or(0.0)
            );

            let mut any_used = false;
            for (v, route) in solution.routes.iter().enumerate() {
                if route.is_empty() {
                    continue;
                }
                any_used = true;

                let stops: Vec<&str> = route
                    .iter()
                    .map(|&location| problem.location_name(location))
                    .collect();
                println!("Vehicle {}", v + 1);
                println!("  Route: {}", stops.join(" -> "));
                for (location, amount) in &solution.deliveries[v] {
                    println!(
                        "  Delivers {:.2} units to {}",
                        amount,
                        problem.location_name(*location)
                    );
                }
            }

            if !any_used {
                println!("No vehicles are needed in the optimal solution.");
            }

            ExitCode::SUCCESS
        }
        status => {
            eprintln!("No feasible solution found (status: {:?}).", status);
            ExitCode::FAILURE
        }
    }
}
