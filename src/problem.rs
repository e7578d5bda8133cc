use std::num::ParseIntError;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::scheduler::{Ride, Score};
use crate::util::{Coord, FileIOError, FileReader, TimeStep};

const FIELDS_PER_LINE: usize = 6;

/// Every input value must fit a 32-bit signed integer.
pub const MAX_VALUE: i64 = i32::MAX as i64;

/// Instance-wide constants from the header line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProblemParams {
	pub rows: i64,
	pub cols: i64,
	pub num_vehicles: usize,
	pub num_rides: usize,
	/// Awarded for starting a ride exactly at its earliest start.
	pub bonus: Score,
	pub num_steps: TimeStep,
}

#[derive(Debug, Error)]
pub enum ParseError {
	#[error("input is empty")]
	EmptyInput,
	#[error("line {line}: expected {expected} fields, found {found}")]
	WrongFieldCount {
		line: usize,
		expected: usize,
		found: usize,
	},
	#[error("line {line}: invalid integer {token:?}")]
	InvalidToken {
		line: usize,
		token: String,
		source: ParseIntError,
	},
	#[error("line {line}: negative value {value}")]
	NegativeValue { line: usize, value: i64 },
	#[error("line {line}: value {value} exceeds {max}", max = MAX_VALUE)]
	ValueOutOfRange { line: usize, value: i64 },
	#[error("header declares {declared} rides, found {found}")]
	RideCountMismatch { declared: usize, found: usize },
}

#[derive(Debug, Error)]
pub enum ProblemError {
	#[error(transparent)]
	Io(#[from] FileIOError),
	#[error(transparent)]
	Parse(#[from] ParseError),
}

/// A complete instance: parameters plus the ride catalog in file order.
#[derive(Clone, Debug)]
pub struct Problem {
	pub params: ProblemParams,
	pub rides: Vec<Ride>,
}

fn parse_fields(line_no: usize, line: &str) -> Result<[i64; FIELDS_PER_LINE], ParseError> {
	let tokens: Vec<&str> = line.split_whitespace().collect();
	if tokens.len() != FIELDS_PER_LINE {
		return Err(ParseError::WrongFieldCount {
			line: line_no,
			expected: FIELDS_PER_LINE,
			found: tokens.len(),
		});
	}

	let mut out = [0i64; FIELDS_PER_LINE];
	for (slot, token) in out.iter_mut().zip(tokens) {
		let value = token.parse::<i64>().map_err(|source| ParseError::InvalidToken {
			line: line_no,
			token: token.to_string(),
			source,
		})?;
		if value < 0 {
			return Err(ParseError::NegativeValue { line: line_no, value });
		}
		if value > MAX_VALUE {
			return Err(ParseError::ValueOutOfRange { line: line_no, value });
		}
		*slot = value;
	}

	Ok(out)
}

impl Problem {
	pub fn new(params: ProblemParams, rides: Vec<Ride>) -> Problem {
		Problem { params, rides }
	}

	/// Blank lines are ignored. Ride ids follow file order.
	pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Problem, ParseError> {
		let mut lines = lines
			.iter()
			.enumerate()
			.map(|(idx, l)| {
				let line: &str = l.as_ref();
				(idx + 1, line)
			})
			.filter(|(_, l)| !l.trim().is_empty());

		let (line_no, header) = lines.next().ok_or(ParseError::EmptyInput)?;
		let [rows, cols, num_vehicles, num_rides, bonus, num_steps] = parse_fields(line_no, header)?;
		let params = ProblemParams {
			rows,
			cols,
			num_vehicles: num_vehicles as usize,
			num_rides: num_rides as usize,
			bonus: bonus as Score,
			num_steps,
		};

		// the header count is only trusted after it matches the ride lines
		let mut rides = Vec::new();
		for (line_no, line) in lines {
			let [a, b, x, y, s, f] = parse_fields(line_no, line)?;
			rides.push(Ride::new(rides.len(), Coord::new(a, b), Coord::new(x, y), s, f));
		}

		if rides.len() != params.num_rides {
			return Err(ParseError::RideCountMismatch {
				declared: params.num_rides,
				found: rides.len(),
			});
		}

		debug!("parsed {:?}", params);
		Ok(Problem { params, rides })
	}

	pub fn load<P: AsRef<Path>>(path: P) -> Result<Problem, ProblemError> {
		let lines = FileReader::new(path)?.read_all_lines()?;
		Ok(Problem::parse(&lines)?)
	}
}

impl FromStr for Problem {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let lines: Vec<&str> = s.lines().collect();
		Problem::parse(&lines)
	}
}
