//! Size sweep

// Imports
use {
	crate::{array, clock::OpaqueZero, element, measure, measure::Measurement},
	anyhow::Context,
	std::{
		fmt,
		hint,
		io,
		str::FromStr,
		time::{Duration, Instant},
	},
};

/// Smallest size swept, in bytes
pub const MIN_SIZE: u64 = 100;

/// Sweep configuration
#[derive(Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SweepConfig {
	/// Maximum array size, in bytes
	pub max_size: u64,

	/// Factor between consecutive sizes
	pub factor: f64,

	/// Minimum number of iterations per measurement loop
	pub repeat: u64,
}

impl SweepConfig {
	/// Validates this configuration.
	///
	/// # Errors
	/// Returns an error if the maximum size is below [`MIN_SIZE`], or if the factor isn't above 1.
	pub fn validate(&self) -> Result<(), anyhow::Error> {
		anyhow::ensure!(
			self.max_size >= MIN_SIZE,
			"Maximum size must be at least {MIN_SIZE} bytes, found {}",
			self.max_size
		);
		anyhow::ensure!(
			self.factor.is_finite() && self.factor > 1.0,
			"Factor must be a finite number greater than 1, found {}",
			self.factor
		);

		Ok(())
	}

	/// Returns all sizes to sweep, in increasing order
	#[must_use]
	pub fn sizes(&self) -> Sizes {
		Sizes {
			next:     Some(MIN_SIZE),
			max_size: self.max_size,
			factor:   self.factor,
		}
	}
}

/// Iterator over the sizes of a sweep
#[derive(Clone, Debug)]
pub struct Sizes {
	/// Next size
	next: Option<u64>,

	/// Maximum size
	max_size: u64,

	/// Factor
	factor: f64,
}

impl Iterator for Sizes {
	type Item = u64;

	fn next(&mut self) -> Option<Self::Item> {
		let size = self.next.filter(|&size| size <= self.max_size)?;
		self.next = self::next_size(size, self.factor);
		Some(size)
	}
}

/// Returns the size after `size`.
///
/// Always larger than `size`: if scaling by `factor` doesn't grow it, it grows by one byte.
/// Returns `None` once there are no larger sizes.
#[must_use]
pub fn next_size(size: u64, factor: f64) -> Option<u64> {
	// Note: Float to int casts saturate, so huge sizes become `u64::MAX`
	let next = (size as f64 * factor).round() as u64;
	if next > size {
		Some(next)
	} else {
		size.checked_add(1)
	}
}

/// Measurements of a single size
#[derive(Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SizeMeasurement {
	/// Requested size, in bytes
	pub size: u64,

	/// Size of the array, in bytes
	pub scaled_size: u64,

	/// Random access measurement
	pub random: Measurement,

	/// Sequential access measurement
	pub sequential: Measurement,
}

impl SizeMeasurement {
	/// Returns the record of this measurement
	#[must_use]
	pub fn record(&self) -> SweepRecord {
		SweepRecord {
			size:              self.size,
			random_offset:     self.random.offset(),
			sequential_offset: self.sequential.offset(),
		}
	}
}

/// Sweep record.
///
/// Displayed (and parsed) as `<size>,<random_offset>,<sequential_offset>`,
/// with the offsets in nanoseconds with 2 decimal digits.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct SweepRecord {
	/// Requested size, in bytes
	pub size: u64,

	/// Random access offset (ns)
	pub random_offset: f64,

	/// Sequential access offset (ns)
	pub sequential_offset: f64,
}

impl fmt::Display for SweepRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{},{:.2},{:.2}", self.size, self.random_offset, self.sequential_offset)
	}
}

impl FromStr for SweepRecord {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut fields = s.trim().split(',');
		let mut next_field = |name: &str| fields.next().with_context(|| format!("Missing field {name:?}"));

		let size = next_field("size")?;
		let random_offset = next_field("random_offset")?;
		let sequential_offset = next_field("sequential_offset")?;
		anyhow::ensure!(fields.next().is_none(), "Found more than 3 fields");

		Ok(Self {
			size:              size.parse().with_context(|| format!("Unable to parse size {size:?}"))?,
			random_offset:     random_offset
				.parse()
				.with_context(|| format!("Unable to parse random offset {random_offset:?}"))?,
			sequential_offset: sequential_offset
				.parse()
				.with_context(|| format!("Unable to parse sequential offset {sequential_offset:?}"))?,
		})
	}
}

/// Sweep sink
pub trait SweepSink {
	/// Handles the measurements of a size
	fn handle_size(&mut self, size: &SizeMeasurement) -> Result<(), anyhow::Error>;
}

impl SweepSink for Vec<SizeMeasurement> {
	fn handle_size(&mut self, size: &SizeMeasurement) -> Result<(), anyhow::Error> {
		self.push(*size);
		Ok(())
	}
}

/// Sink writing each record as a line.
///
/// Flushes after every line, so records are visible even if a later size fails.
#[derive(Debug)]
pub struct CsvSink<W> {
	/// Writer
	writer: W,
}

impl<W: io::Write> CsvSink<W> {
	/// Creates a new sink
	pub fn new(writer: W) -> Self {
		Self { writer }
	}
}

impl<W: io::Write> SweepSink for CsvSink<W> {
	fn handle_size(&mut self, size: &SizeMeasurement) -> Result<(), anyhow::Error> {
		writeln!(self.writer, "{}", size.record()).context("Unable to write record")?;
		self.writer.flush().context("Unable to flush record")
	}
}

/// Sweeper
#[derive(Debug)]
pub struct Sweeper {
	/// Zero passed to all measurements
	zero: OpaqueZero,

	/// Progress output period
	///
	/// Minimum interval between progress messages.
	progress_period: Duration,
}

impl Sweeper {
	/// Creates a new sweeper
	pub fn new(zero: OpaqueZero, progress_period: Duration) -> Self {
		Self { zero, progress_period }
	}

	/// Measures all sizes of `config`, handing each to `sink` as soon as it's measured.
	///
	/// # Errors
	/// Returns an error if `config` is invalid, in which case nothing is measured.
	/// Otherwise returns an error if an array can't be allocated or `sink` fails, after
	/// any previous sizes were already handed to `sink`.
	pub fn run<S: SweepSink>(&mut self, config: &SweepConfig, sink: &mut S) -> Result<RunOutput, anyhow::Error> {
		config.validate().context("Invalid sweep configuration")?;
		tracing::info!(?config, "Starting sweep");

		let mut last_progress_time = None::<Instant>;
		let mut sizes_measured = 0;
		for size in config.sizes() {
			let size_measurement = self.measure_size(size, config.repeat)?;
			tracing::trace!(?size_measurement, "Measured size");

			sink.handle_size(&size_measurement)
				.with_context(|| format!("Unable to handle size {size}"))?;
			sizes_measured += 1;

			// Then show progress, if it's been long enough
			let cur_time = Instant::now();
			if last_progress_time.map_or(true, |last| cur_time.duration_since(last) >= self.progress_period) {
				let progress_percentage = 100.0 * (size as f64 / config.max_size as f64);
				tracing::info!(
					"[{progress_percentage:.2}%] Measured {size} bytes: {}",
					size_measurement.record()
				);
				last_progress_time = Some(cur_time);
			}
		}

		Ok(RunOutput { sizes_measured })
	}

	/// Measures a single size
	fn measure_size(&self, size: u64, repeat: u64) -> Result<SizeMeasurement, anyhow::Error> {
		let array = array::alloc(size)?;

		let sequential = measure::measure_sequential_latency(repeat, &array, self.zero);
		let random = measure::measure_latency(repeat, &array, self.zero);

		// Note: The states are only kept so the loops producing them aren't discarded.
		hint::black_box((sequential.generator_state, random.generator_state));

		Ok(SizeMeasurement {
			size,
			scaled_size: array.len() as u64 * element::ELEMENT_SIZE,
			random,
			sequential,
		})
	}
}

/// Output for [`Sweeper::run`]
#[derive(Clone, Debug)]
pub struct RunOutput {
	/// Number of sizes measured
	pub sizes_measured: usize,
}
