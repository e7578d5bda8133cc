mod ride;
mod scoring;

pub use self::ride::{Ride, RideId};
pub use self::scoring::{ConfigError, FitnessWeights, ScoringModel};

use itertools::Itertools;
use log::{debug, info, trace};

use crate::problem::{Problem, ProblemParams};
use crate::util::{FileIOError, FileWriter};
use crate::vehicle::{Vehicle, VehicleId};

pub type Score = u64;

/// Orders rides by earliest start, ties by id. Sorting an already sorted
/// catalog leaves it untouched.
pub fn sort_rides(rides: &mut [Ride]) {
	rides.sort_by_key(|r| (r.earliest_start(), r.id()));
}

/// Where a scheduler is in its single pass. Phases only move forward.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
	Sorting,
	Bootstrapping,
	GreedyAssignment,
	Done,
}

/// Final state of one fleet slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VehicleResult {
	id: VehicleId,
	rides: Vec<RideId>,
	score: Score,
}

impl VehicleResult {
	pub fn id(&self) -> VehicleId {
		self.id
	}

	pub fn assigned_rides(&self) -> &[RideId] {
		&self.rides
	}

	pub fn score(&self) -> Score {
		self.score
	}
}

impl From<Vehicle> for VehicleResult {
	fn from(v: Vehicle) -> Self {
		VehicleResult {
			id: v.id(),
			rides: v.assigned_rides().to_vec(),
			score: v.score(),
		}
	}
}

#[derive(Clone, Debug)]
pub struct Solution {
	fleet: Vec<VehicleResult>,
	unassigned: Vec<RideId>,
}

impl Solution {
	/// In fleet-creation order.
	pub fn vehicles(&self) -> &[VehicleResult] {
		&self.fleet
	}

	/// Rides no vehicle could finish in time, in processing order.
	pub fn unassigned(&self) -> &[RideId] {
		&self.unassigned
	}

	pub fn score(&self) -> Score {
		self.fleet.iter().map(|v| v.score()).sum()
	}

	pub fn output_as_str(&self) -> String {
		let mut out = String::new();
		for v in self.fleet.iter() {
			let rides = v.assigned_rides();
			if rides.is_empty() {
				out += "0\n";
			} else {
				out += &format!("{} {}\n", rides.len(), rides.iter().join(" "));
			}
		}

		out
	}

	pub fn write_output(&self, out: &mut FileWriter) -> Result<(), FileIOError> {
		out.write_line(&self.output_as_str())?;
		out.flush()
	}
}

/// Greedy best-fit assignment of rides to a fixed fleet.
pub struct RideScheduler {
	params: ProblemParams,
	model: ScoringModel,
	phase: Phase,

	rides: Vec<Ride>,
	// first ride not yet handed out
	cursor: usize,
	fleet: Vec<Vehicle>,
	unassigned: Vec<RideId>,
}

impl RideScheduler {
	pub fn new(problem: Problem, weights: FitnessWeights) -> RideScheduler {
		let Problem { params, rides } = problem;

		RideScheduler {
			model: ScoringModel::new(params.bonus, weights),
			params,
			phase: Phase::Sorting,
			rides,
			cursor: 0,
			fleet: Vec::new(),
			unassigned: Vec::new(),
		}
	}

	pub fn params(&self) -> &ProblemParams {
		&self.params
	}

	pub fn model(&self) -> &ScoringModel {
		&self.model
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn fleet(&self) -> &[Vehicle] {
		&self.fleet
	}

	/// Sorted once the scheduler is past `Phase::Sorting`.
	pub fn rides(&self) -> &[Ride] {
		&self.rides
	}

	/// Runs the current phase to completion and returns the next one.
	/// A no-op once `Phase::Done` is reached.
	pub fn advance(&mut self) -> Phase {
		match self.phase {
			Phase::Sorting => self.sort(),
			Phase::Bootstrapping => self.bootstrap(),
			Phase::GreedyAssignment => self.assign_remaining(),
			Phase::Done => {}
		}

		self.phase
	}

	fn enter(&mut self, next: Phase) {
		debug!("{:?} -> {:?}", self.phase, next);
		self.phase = next;
	}

	fn sort(&mut self) {
		sort_rides(&mut self.rides);
		self.enter(Phase::Bootstrapping);
	}

	/// Gives every vehicle the earliest ride it can serve. Rides passed over
	/// here are dropped for good.
	fn bootstrap(&mut self) {
		for id in 0..self.params.num_vehicles {
			let mut vehicle = Vehicle::new(id);

			while let Some(ride) = self.rides.get(self.cursor) {
				self.cursor += 1;
				if vehicle.assign_if_feasible(ride, &self.model) {
					debug!("vehicle {} starts with ride {}", id, ride.id());
					break;
				}
				self.unassigned.push(ride.id());
			}

			self.fleet.push(vehicle);
		}

		self.enter(Phase::GreedyAssignment);
	}

	/// Index of the fittest vehicle for `ride`, first one wins on ties. None
	/// if nobody can finish it in time.
	fn fittest_vehicle(&self, ride: &Ride) -> Option<usize> {
		let mut best_score = f64::NEG_INFINITY;
		let mut best_idx = None;

		for (idx, v) in self.fleet.iter().enumerate() {
			let score = self.model.fitness_score(ride, v);
			if best_idx.is_none() || score > best_score {
				best_score = score;
				best_idx = Some(idx);
			}
		}

		if best_score == f64::NEG_INFINITY {
			None
		} else {
			best_idx
		}
	}

	fn assign_remaining(&mut self) {
		while self.cursor < self.rides.len() {
			let ride = &self.rides[self.cursor];
			self.cursor += 1;

			match self.fittest_vehicle(ride) {
				Some(idx) => {
					trace!("ride {} -> vehicle {}", ride.id(), idx);
					self.fleet[idx].assign_if_feasible(ride, &self.model);
				}
				None => self.unassigned.push(ride.id()),
			}
		}

		self.enter(Phase::Done);
	}

	/// Runs the whole pass and hands back the finished fleet.
	pub fn solve(mut self) -> Solution {
		while self.advance() != Phase::Done {}

		let solution = Solution {
			fleet: self.fleet.into_iter().map(VehicleResult::from).collect(),
			unassigned: self.unassigned,
		};

		info!(
			"Vehicles: {} | Rides: {} | Assigned: {} | Unassigned: {} | Score: {}",
			self.params.num_vehicles,
			self.rides.len(),
			self.rides.len() - solution.unassigned.len(),
			solution.unassigned.len(),
			solution.score()
		);

		solution
	}
}
