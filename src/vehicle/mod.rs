use crate::scheduler::{Ride, RideId, Score, ScoringModel};
use crate::util::{Coord, TimeStep};

pub type VehicleId = usize;

/// A fleet slot. Starts idle at the origin and only moves forward in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vehicle {
	id: VehicleId,
	pos: Coord,
	next_available_step: TimeStep,
	rides: Vec<RideId>,
	score: Score,
}

impl Vehicle {
	pub fn new(id: VehicleId) -> Vehicle {
		Vehicle {
			id,
			pos: Coord::default(),
			next_available_step: 0,
			rides: Vec::new(),
			score: 0,
		}
	}

	pub fn id(&self) -> VehicleId {
		self.id
	}

	pub fn position(&self) -> Coord {
		self.pos
	}

	pub fn next_available_step(&self) -> TimeStep {
		self.next_available_step
	}

	/// In assignment order, which is also completion order.
	pub fn assigned_rides(&self) -> &[RideId] {
		&self.rides
	}

	pub fn score(&self) -> Score {
		self.score
	}

	pub fn is_idle(&self) -> bool {
		self.rides.is_empty()
	}

	/// Commits `ride` to this vehicle unless it can't be finished before its
	/// deadline. Returns whether the ride was taken.
	pub fn assign_if_feasible(&mut self, ride: &Ride, model: &ScoringModel) -> bool {
		if model.fitness_score(ride, self) == f64::NEG_INFINITY {
			return false;
		}

		self.rides.push(ride.id());
		self.score += model.real_score(ride, self);

		// idle time and travel both depend on the position and availability before the move
		let idle = ride.idle_time(self).max(0);
		self.next_available_step += idle + ride.steps_to_complete(self);
		self.pos = ride.end();

		true
	}
}
