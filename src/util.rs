use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

pub type TimeStep = i64;

fn manhattan_dist(a: &Coord, b: &Coord) -> i64 {
	i64::abs(a.row - b.row) + i64::abs(a.col - b.col)
}

/// Intersection on the city grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Coord {
	pub row: i64,
	pub col: i64,
}

impl Coord {
	pub fn new(row: i64, col: i64) -> Coord {
		Coord { row, col }
	}

	pub fn dist(&self, a: &Coord) -> i64 {
		manhattan_dist(self, a)
	}

	pub fn is_origin(&self) -> bool {
		self == &Coord::default()
	}
}

#[derive(Debug, Error)]
pub enum FileIOError {
	#[error("couldn't open {path}: {source}")]
	CouldntOpenFile { path: String, source: io::Error },
	#[error("failed to read line {line}: {source}")]
	LineReadError { line: usize, source: io::Error },
	#[error("failed to write output: {0}")]
	LineWriteError(#[source] io::Error),
}

pub struct FileReader {
	reader: BufReader<File>,
}

impl FileReader {
	pub fn new<P: AsRef<Path>>(path: P) -> Result<FileReader, FileIOError> {
		let path = path.as_ref();
		let file = File::open(path).map_err(|source| FileIOError::CouldntOpenFile {
			path: path.display().to_string(),
			source,
		})?;

		Ok(FileReader {
			reader: BufReader::new(file),
		})
	}

	/// Stops at the first line that can't be read.
	pub fn read_all_lines(self) -> Result<Vec<String>, FileIOError> {
		self.reader
			.lines()
			.enumerate()
			.map(|(idx, line)| line.map_err(|source| FileIOError::LineReadError { line: idx + 1, source }))
			.collect()
	}
}

pub struct FileWriter {
	writer: BufWriter<File>,
}

impl FileWriter {
	pub fn new<P: AsRef<Path>>(path: P) -> Result<FileWriter, FileIOError> {
		let path = path.as_ref();
		let file = File::create(path).map_err(|source| FileIOError::CouldntOpenFile {
			path: path.display().to_string(),
			source,
		})?;

		Ok(FileWriter {
			writer: BufWriter::new(file),
		})
	}

	pub fn write_line(&mut self, line: &str) -> Result<(), FileIOError> {
		self.writer
			.write_all(line.as_bytes())
			.map_err(FileIOError::LineWriteError)
	}

	pub fn flush(&mut self) -> Result<(), FileIOError> {
		self.writer.flush().map_err(FileIOError::LineWriteError)
	}
}

impl Drop for FileWriter {
	fn drop(&mut self) {
		// errors surface through an explicit flush()
		let _ = self.writer.flush();
	}
}
