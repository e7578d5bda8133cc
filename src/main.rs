use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use hashcode18_rides::problem::Problem;
use hashcode18_rides::scheduler::{FitnessWeights, RideScheduler, Score};
use hashcode18_rides::util::FileWriter;

#[derive(Debug, Parser)]
#[command(name = "ride-scheduler", version)]
#[command(about = "Greedy ride-to-vehicle scheduler for the HashCode 2018 qualification problem")]
struct Args {
	/// Problem instances to solve
	#[arg(required = true)]
	inputs: Vec<PathBuf>,

	/// Write `<input stem>.out` files here instead of printing to stdout
	#[arg(long, short)]
	output_dir: Option<PathBuf>,

	/// Fitness multiplier for rides reached exactly on time
	#[arg(long, default_value_t = FitnessWeights::PERFECT_RIDE)]
	perfect_ride_weight: f64,

	/// Fitness multiplier for rides reached after their window opened
	#[arg(long, default_value_t = FitnessWeights::STARTED_RIDE)]
	started_ride_weight: f64,

	/// Fitness multiplier for rides that need waiting at the pickup
	#[arg(long, default_value_t = FitnessWeights::IDLE_RIDE)]
	idle_ride_weight: f64,

	/// Fitness cost per idle step
	#[arg(long, default_value_t = FitnessWeights::IDLE)]
	idle_weight: f64,

	/// Fitness cost per step driven to the pickup
	#[arg(long, default_value_t = FitnessWeights::STEP)]
	step_weight: f64,
}

impl Args {
	fn weights(&self) -> FitnessWeights {
		FitnessWeights {
			perfect_ride: self.perfect_ride_weight,
			started_ride: self.started_ride_weight,
			idle_ride: self.idle_ride_weight,
			idle: self.idle_weight,
			step: self.step_weight,
		}
	}
}

fn output_path(dir: &Path, input: &Path) -> PathBuf {
	let stem = input
		.file_stem()
		.map(|s| s.to_string_lossy().into_owned())
		.unwrap_or_else(|| "solution".to_string());
	dir.join(format!("{}.out", stem))
}

fn solve_one(input: &Path, output_dir: Option<&Path>, weights: FitnessWeights) -> Result<Score> {
	let problem = Problem::load(input).with_context(|| format!("failed to load {}", input.display()))?;

	info!("============= Input {} =============", input.display());
	let solution = RideScheduler::new(problem, weights).solve();

	match output_dir {
		Some(dir) => {
			let path = output_path(dir, input);
			let mut out = FileWriter::new(&path)?;
			solution
				.write_output(&mut out)
				.with_context(|| format!("failed to write {}", path.display()))?;
		}
		None => print!("{}", solution.output_as_str()),
	}

	info!("{}: score {}", input.display(), solution.score());
	Ok(solution.score())
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let args = Args::parse();
	let weights = args.weights();
	weights.validate()?;

	if let Some(dir) = &args.output_dir {
		std::fs::create_dir_all(dir)
			.with_context(|| format!("failed to create {}", dir.display()))?;
	}

	let mut total_score: Score = 0;
	for input in args.inputs.iter() {
		total_score += solve_one(input, args.output_dir.as_deref(), weights)?;
	}

	info!("Total score: {}", total_score);
	Ok(())
}
