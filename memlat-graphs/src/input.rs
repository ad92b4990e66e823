//! Input records

// Imports
use {
	anyhow::Context,
	average::{Estimate, Mean},
	memlat::{data::Data, SweepRecord},
	std::{
		collections::{BTreeMap, BTreeSet},
		fs,
		io::{self, BufRead},
		path::Path,
	},
};

/// Reads all records from the file at `path`.
///
/// Files with a `.json` extension are read as `memlat`'s json output,
/// anything else as its csv output.
pub fn read_records(path: &Path) -> Result<Vec<SweepRecord>, anyhow::Error> {
	let file = fs::File::open(path).with_context(|| format!("Unable to open input file {path:?}"))?;
	let file = io::BufReader::new(file);

	if path.extension().is_some_and(|ext| ext == "json") {
		let data = Data::from_reader(file).with_context(|| format!("Unable to parse input file {path:?}"))?;
		return Ok(data.records().collect());
	}

	self::parse_records(file).with_context(|| format!("Unable to parse input file {path:?}"))
}

/// Parses csv records from `reader`.
///
/// Empty lines are ignored.
pub fn parse_records(reader: impl BufRead) -> Result<Vec<SweepRecord>, anyhow::Error> {
	reader
		.lines()
		.enumerate()
		.filter(|(_, line)| line.as_ref().map_or(true, |line| !line.trim().is_empty()))
		.map(|(line_idx, line)| {
			let line = line.with_context(|| format!("Unable to read line {}", line_idx + 1))?;
			line.parse::<SweepRecord>()
				.with_context(|| format!("Unable to parse line {}: {line:?}", line_idx + 1))
		})
		.collect()
}

/// Averages the offsets of multiple runs, per size.
///
/// Only sizes present in all runs are kept.
pub fn average_runs(runs: &[Vec<SweepRecord>]) -> Vec<SweepRecord> {
	struct SizeOffsets {
		random:     Mean,
		sequential: Mean,

		/// Runs this size was found in
		runs: BTreeSet<usize>,
	}

	let mut sizes = BTreeMap::<u64, SizeOffsets>::new();
	for (run_idx, run) in runs.iter().enumerate() {
		for record in run {
			let offsets = sizes.entry(record.size).or_insert_with(|| SizeOffsets {
				random:     Mean::new(),
				sequential: Mean::new(),
				runs:       BTreeSet::new(),
			});
			offsets.random.add(record.random_offset);
			offsets.sequential.add(record.sequential_offset);
			offsets.runs.insert(run_idx);
		}
	}

	sizes
		.into_iter()
		.filter(|(_, offsets)| offsets.runs.len() == runs.len())
		.map(|(size, offsets)| SweepRecord {
			size,
			random_offset: offsets.random.mean(),
			sequential_offset: offsets.sequential.mean(),
		})
		.collect()
}
