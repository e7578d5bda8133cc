use thiserror::Error;

use crate::vehicle::Vehicle;

use super::ride::Ride;
use super::Score;

/// Independent knobs for the fitness heuristic. They only change how
/// candidates are ranked, never the score a vehicle is credited with.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FitnessWeights {
	/// Multiplier for rides reached exactly at their earliest start.
	pub perfect_ride: f64,
	/// Multiplier for rides reached after their window opened.
	pub started_ride: f64,
	/// Multiplier for rides that require waiting at the pickup.
	pub idle_ride: f64,
	/// Cost of a single idle step.
	pub idle: f64,
	/// Cost of a single step driven empty to the pickup.
	pub step: f64,
}

impl FitnessWeights {
	pub const PERFECT_RIDE: f64 = 1.0;
	pub const STARTED_RIDE: f64 = 1.0;
	pub const IDLE_RIDE: f64 = 1.0;
	pub const IDLE: f64 = 0.0;
	pub const STEP: f64 = 1.0;

	pub fn validate(&self) -> Result<(), ConfigError> {
		let named = [
			("perfect_ride", self.perfect_ride),
			("started_ride", self.started_ride),
			("idle_ride", self.idle_ride),
			("idle", self.idle),
			("step", self.step),
		];

		for &(field, value) in named.iter() {
			if !value.is_finite() {
				return Err(ConfigError::NotFinite { field, value });
			}
			if value < 0.0 {
				return Err(ConfigError::Negative { field, value });
			}
		}

		Ok(())
	}
}

impl Default for FitnessWeights {
	fn default() -> Self {
		FitnessWeights {
			perfect_ride: Self::PERFECT_RIDE,
			started_ride: Self::STARTED_RIDE,
			idle_ride: Self::IDLE_RIDE,
			idle: Self::IDLE,
			step: Self::STEP,
		}
	}
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
	#[error("weight {field} must not be negative (got {value})")]
	Negative { field: &'static str, value: f64 },
	#[error("weight {field} must be finite (got {value})")]
	NotFinite { field: &'static str, value: f64 },
}

/// Scores rides against vehicle states for a single problem instance.
#[derive(Copy, Clone, Debug)]
pub struct ScoringModel {
	bonus: Score,
	weights: FitnessWeights,
}

impl ScoringModel {
	pub fn new(bonus: Score, weights: FitnessWeights) -> ScoringModel {
		ScoringModel { bonus, weights }
	}

	pub fn bonus(&self) -> Score {
		self.bonus
	}

	pub fn weights(&self) -> &FitnessWeights {
		&self.weights
	}

	pub fn min_score(&self, ride: &Ride) -> Score {
		ride.min_score()
	}

	pub fn max_score(&self, ride: &Ride) -> Score {
		ride.max_score(self.bonus)
	}

	/// Points credited once the ride is assigned to `vehicle`.
	pub fn real_score(&self, ride: &Ride, vehicle: &Vehicle) -> Score {
		if !ride.is_feasible(vehicle) {
			return 0;
		}

		// reaching the pickup early means idling until the window opens, which still earns the bonus
		if ride.arrival_step(vehicle) <= ride.earliest_start() {
			self.max_score(ride)
		} else {
			self.min_score(ride)
		}
	}

	/// Ranking heuristic for picking a vehicle. Negative infinity marks a ride
	/// the vehicle can't finish in time.
	pub fn fitness_score(&self, ride: &Ride, vehicle: &Vehicle) -> f64 {
		if !ride.is_feasible(vehicle) {
			return f64::NEG_INFINITY;
		}

		let w = &self.weights;
		let arrival = ride.arrival_step(vehicle);
		let travel = ride.travel_to_start(vehicle) as f64 * w.step;

		if arrival == ride.earliest_start() {
			(self.max_score(ride) as f64 - travel) * w.perfect_ride
		} else if arrival > ride.earliest_start() {
			(self.min_score(ride) as f64 - travel) * w.started_ride
		} else {
			let idle = ride.idle_time(vehicle) as f64 * w.idle;
			(self.max_score(ride) as f64 - idle - travel) * w.idle_ride
		}
	}
}
