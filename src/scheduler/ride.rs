use std::fmt::{Debug, Error, Formatter};

use crate::util::{Coord, TimeStep};
use crate::vehicle::Vehicle;

use super::Score;

/// Position of the ride in the input file, starting at 0.
pub type RideId = usize;

/// A single transportation request. Immutable once loaded.
#[derive(Clone, PartialEq, Eq)]
pub struct Ride {
	id: RideId,
	start: Coord,
	end: Coord,
	earliest_start: TimeStep,
	latest_finish: TimeStep,
	length: i64,
}

impl Ride {
	pub fn new(
		id: RideId,
		start: Coord,
		end: Coord,
		earliest_start: TimeStep,
		latest_finish: TimeStep,
	) -> Ride {
		Ride {
			id,
			start,
			end,
			earliest_start,
			latest_finish,
			length: start.dist(&end),
		}
	}

	pub fn id(&self) -> RideId {
		self.id
	}
	pub fn start(&self) -> Coord {
		self.start
	}
	pub fn end(&self) -> Coord {
		self.end
	}
	pub fn earliest_start(&self) -> TimeStep {
		self.earliest_start
	}
	/// Exclusive: the ride must be finished strictly before this step.
	pub fn latest_finish(&self) -> TimeStep {
		self.latest_finish
	}
	pub fn length(&self) -> i64 {
		self.length
	}

	pub fn travel_to_start(&self, vehicle: &Vehicle) -> i64 {
		self.start.dist(&vehicle.position())
	}

	pub fn steps_to_complete(&self, vehicle: &Vehicle) -> i64 {
		self.travel_to_start(vehicle) + self.length
	}

	/// Step at which the vehicle reaches the pickup, ignoring any wait for the window to open.
	pub fn arrival_step(&self, vehicle: &Vehicle) -> TimeStep {
		vehicle.next_available_step() + self.travel_to_start(vehicle)
	}

	/// Positive if the vehicle has to wait at the pickup.
	pub fn idle_time(&self, vehicle: &Vehicle) -> TimeStep {
		self.earliest_start - self.arrival_step(vehicle)
	}

	/// A ride finishing exactly at `latest_finish` is already late.
	pub fn is_feasible(&self, vehicle: &Vehicle) -> bool {
		self.arrival_step(vehicle) + self.length < self.latest_finish
	}

	pub fn min_score(&self) -> Score {
		self.length as Score
	}

	pub fn max_score(&self, bonus: Score) -> Score {
		self.min_score() + bonus
	}
}

impl Debug for Ride {
	fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
		write!(
			f,
			"rideID: {} [{}, {}) {:?} -> {:?}",
			self.id, self.earliest_start, self.latest_finish, self.start, self.end
		)
	}
}
