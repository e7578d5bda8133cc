use std::path::PathBuf;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use hashcode18_rides::problem::{Problem, ProblemParams};
use hashcode18_rides::scheduler::{
	sort_rides, FitnessWeights, Phase, Ride, RideScheduler, ScoringModel, Solution,
};
use hashcode18_rides::util::{Coord, FileReader, FileWriter};
use hashcode18_rides::vehicle::Vehicle;

fn data_path(name: &str) -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn ride(id: usize, start: (i64, i64), end: (i64, i64), earliest_start: i64, latest_finish: i64) -> Ride {
	Ride::new(
		id,
		Coord::new(start.0, start.1),
		Coord::new(end.0, end.1),
		earliest_start,
		latest_finish,
	)
}

fn problem(num_vehicles: usize, bonus: u64, rides: Vec<Ride>) -> Problem {
	let params = ProblemParams {
		rows: 100,
		cols: 100,
		num_vehicles,
		num_rides: rides.len(),
		bonus,
		num_steps: 1000,
	};
	Problem::new(params, rides)
}

fn solve(p: Problem) -> Solution {
	RideScheduler::new(p, FitnessWeights::default()).solve()
}

fn random_problem(seed: u64, num_vehicles: usize, num_rides: usize) -> Problem {
	let mut rng = StdRng::seed_from_u64(seed);
	let rides = (0..num_rides)
		.map(|id| {
			let start: (i64, i64) = (rng.gen_range(0..50), rng.gen_range(0..50));
			let end: (i64, i64) = (rng.gen_range(0..50), rng.gen_range(0..50));
			let earliest_start: i64 = rng.gen_range(0..400);
			let slack: i64 = rng.gen_range(0..200);
			let length = (start.0 - end.0).abs() + (start.1 - end.1).abs();
			ride(id, start, end, earliest_start, earliest_start + length + slack)
		})
		.collect();
	problem(num_vehicles, 25, rides)
}

#[test]
fn example_data_set() {
	let input = Problem::load(data_path("a_example.in")).expect("Couldn't load input file");
	let solution = solve(input);

	assert_eq!(solution.output_as_str(), "1 1\n1 2\n");
	assert_eq!(solution.score(), 4);
	assert_eq!(solution.unassigned(), &[0]);
}

#[test]
fn on_time_zero_length_ride_earns_bonus() {
	let solution = solve(problem(1, 2, vec![ride(0, (0, 0), (0, 0), 0, 10)]));

	assert_eq!(solution.output_as_str(), "1 0\n");
	assert_eq!(solution.vehicles()[0].score(), 2);
	assert_eq!(solution.score(), 2);
}

#[test]
fn ride_nobody_can_reach_is_skipped() {
	// 10 steps to the pickup plus 1 to drive lands exactly on the deadline
	let solution = solve(problem(2, 2, vec![ride(0, (5, 5), (5, 6), 0, 11)]));

	assert_eq!(solution.output_as_str(), "0\n0\n");
	assert!(solution.vehicles().iter().all(|v| v.assigned_rides().is_empty() && v.score() == 0));
	assert_eq!(solution.unassigned(), &[0]);
	assert_eq!(solution.score(), 0);
}

#[test]
fn rides_are_taken_in_earliest_start_order() {
	// ride 0 is next to the origin but opens later than ride 1 on the far corner
	let rides = vec![
		ride(0, (0, 1), (0, 2), 5, 1000),
		ride(1, (9, 9), (9, 8), 1, 1000),
	];
	let solution = solve(problem(1, 2, rides));

	assert_eq!(solution.output_as_str(), "2 1 0\n");
	assert_eq!(solution.score(), 2);
}

#[test]
fn nearer_pickup_does_not_jump_the_queue() {
	// after ride 0 the vehicle sits at (0, 5): ride 1 is one step away but
	// opens at 20, ride 2 is 13 steps away and opens at 10
	let rides = vec![
		ride(0, (0, 0), (0, 5), 0, 1000),
		ride(1, (0, 6), (0, 7), 20, 1000),
		ride(2, (9, 9), (9, 8), 10, 1000),
	];
	let solution = solve(problem(1, 2, rides));

	assert_eq!(solution.output_as_str(), "3 0 2 1\n");
	assert!(solution.unassigned().is_empty());
}

#[test]
fn largest_accepted_values_solve_without_overflow() {
	let input = "2147483647 2147483647 1 2 2147483647 2147483647\n\
	             2147483647 2147483647 0 0 0 2147483647\n\
	             0 0 0 0 2147483647 2147483647\n";
	let solution = solve(input.parse::<Problem>().unwrap());

	assert_eq!(solution.output_as_str(), "1 1\n");
	assert_eq!(solution.unassigned(), &[0]);
	assert_eq!(solution.score(), 2147483647);
}

#[test]
fn ties_go_to_the_lowest_fleet_index() {
	// both vehicles end the bootstrap at (0, 2) free at step 2
	let rides = vec![
		ride(0, (0, 0), (0, 2), 0, 100),
		ride(1, (0, 0), (0, 2), 0, 100),
		ride(2, (0, 3), (0, 4), 10, 100),
	];
	let solution = solve(problem(2, 0, rides));

	assert_eq!(solution.output_as_str(), "2 0 2\n1 1\n");
}

#[test]
fn fittest_vehicle_wins_regardless_of_index() {
	let rides = vec![
		ride(0, (0, 0), (0, 10), 0, 1000),
		ride(1, (5, 5), (5, 6), 0, 1000),
		ride(2, (5, 7), (5, 9), 20, 1000),
	];
	let solution = solve(problem(2, 2, rides));

	assert_eq!(solution.output_as_str(), "1 0\n2 1 2\n");
}

#[test]
fn bootstrap_drops_rides_it_passes_over() {
	let rides = vec![
		ride(0, (5, 5), (5, 6), 0, 5),
		ride(1, (1, 0), (2, 0), 0, 100),
	];
	let solution = solve(problem(2, 2, rides));

	assert_eq!(solution.output_as_str(), "1 1\n0\n");
	assert_eq!(solution.unassigned(), &[0]);
}

#[test]
fn empty_fleet_assigns_nothing() {
	let solution = solve(problem(0, 2, vec![ride(0, (0, 0), (0, 1), 0, 10)]));

	assert_eq!(solution.output_as_str(), "");
	assert_eq!(solution.unassigned(), &[0]);
	assert_eq!(solution.score(), 0);
}

#[test]
fn phases_only_move_forward() {
	let mut scheduler = RideScheduler::new(random_problem(3, 4, 30), FitnessWeights::default());
	assert_eq!(scheduler.phase(), Phase::Sorting);
	assert_eq!(scheduler.params().num_vehicles, 4);
	assert_eq!(scheduler.model().bonus(), 25);
	assert_eq!(scheduler.model().weights(), &FitnessWeights::default());

	assert_eq!(scheduler.advance(), Phase::Bootstrapping);
	let starts: Vec<_> = scheduler.rides().iter().map(|r| r.earliest_start()).collect();
	assert!(starts.windows(2).all(|w| w[0] <= w[1]));
	assert!(scheduler.fleet().is_empty());

	assert_eq!(scheduler.advance(), Phase::GreedyAssignment);
	assert_eq!(scheduler.fleet().len(), 4);
	assert!(scheduler.fleet().iter().all(|v| v.assigned_rides().len() <= 1));

	assert_eq!(scheduler.advance(), Phase::Done);
	assert_eq!(scheduler.advance(), Phase::Done);
}

#[test]
fn sorting_is_stable_and_idempotent() {
	let mut rides = vec![
		ride(0, (0, 0), (1, 1), 7, 100),
		ride(1, (0, 0), (1, 1), 3, 100),
		ride(2, (0, 0), (1, 1), 7, 100),
		ride(3, (0, 0), (1, 1), 3, 100),
	];
	sort_rides(&mut rides);
	let ids: Vec<_> = rides.iter().map(|r| r.id()).collect();
	assert_eq!(ids, vec![1, 3, 0, 2]);

	let before = rides.clone();
	sort_rides(&mut rides);
	assert_eq!(rides, before);
}

#[test]
fn assignments_replay_as_feasible_and_unique() {
	for seed in 0..5 {
		let p = random_problem(seed, 6, 200);
		let rides = p.rides.clone();
		let model = ScoringModel::new(p.params.bonus, FitnessWeights::default());
		let solution = solve(p);

		let assigned: Vec<_> = solution
			.vehicles()
			.iter()
			.flat_map(|v| v.assigned_rides().iter().cloned())
			.collect();
		assert!(assigned.iter().all_unique());
		assert!(solution.unassigned().iter().all(|id| !assigned.contains(id)));
		assert_eq!(assigned.len() + solution.unassigned().len(), rides.len());

		for result in solution.vehicles() {
			let mut v = Vehicle::new(result.id());
			for id in result.assigned_rides() {
				let r = &rides[*id];
				let before = v.next_available_step();
				assert!(r.is_feasible(&v), "seed {} ride {} replayed infeasible", seed, id);
				assert!(v.assign_if_feasible(r, &model));
				assert!(v.next_available_step() >= before);
			}
			assert_eq!(v.score(), result.score());
		}
	}
}

#[test]
fn fitness_is_negative_infinity_exactly_when_late() {
	let p = random_problem(11, 1, 300);
	let model = ScoringModel::new(p.params.bonus, FitnessWeights::default());
	let mut v = Vehicle::new(0);

	for r in p.rides.iter() {
		let late = r.arrival_step(&v) + r.length() >= r.latest_finish();
		assert_eq!(model.fitness_score(r, &v) == f64::NEG_INFINITY, late);
		if !late {
			let score = model.real_score(r, &v);
			assert!(score == model.min_score(r) || score == model.max_score(r));
			assert_eq!(score == model.max_score(r), r.arrival_step(&v) <= r.earliest_start());
		}
		v.assign_if_feasible(r, &model);
	}
}

#[test]
fn solving_twice_gives_identical_output() {
	let first = solve(random_problem(42, 10, 500));
	let second = solve(random_problem(42, 10, 500));

	assert_eq!(first.output_as_str(), second.output_as_str());
	assert_eq!(first.score(), second.score());
}

#[test]
fn solution_round_trips_through_files() {
	let path = std::env::temp_dir().join(format!("hashcode18-rides-{}.out", std::process::id()));
	let solution = solve(Problem::load(data_path("a_example.in")).unwrap());

	{
		let mut out = FileWriter::new(&path).expect("Couldn't open output file");
		solution.write_output(&mut out).unwrap();
	}

	let lines = FileReader::new(&path).unwrap().read_all_lines().unwrap();
	assert_eq!(lines, vec!["1 1", "1 2"]);
	let _ = std::fs::remove_file(path);
}
