//! Memory latency measurement (`memlat`)
//!
//! Outputs one line per array size to stdout, in the format
//! `<size>,<random_offset_ns>,<sequential_offset_ns>`.

// Modules
mod args;

// Imports
use {
	self::args::Args,
	anyhow::Context,
	clap::Parser,
	memlat::{
		data,
		sweep::{CsvSink, SizeMeasurement},
		OpaqueZero,
		SweepConfig,
		SweepSink,
		Sweeper,
	},
	memlat_util::logger,
	std::{fs, io, time::Duration},
};

fn main() -> Result<(), anyhow::Error> {
	// Note: Sampled before anything else, the earlier the less it can be predicted.
	let zero = OpaqueZero::from_clock();

	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Note: Validated here as well as by the sweeper, so we don't create the output file for an invalid sweep
	let config = SweepConfig {
		max_size: args.max_size,
		factor:   args.factor,
		repeat:   args.repeat,
	};
	config.validate().context("Invalid arguments")?;

	let progress_period =
		Duration::try_from_secs_f64(args.progress_period_secs).context("Invalid progress period")?;

	// Run the sweep
	let mut sink = Sink {
		csv:   CsvSink::new(io::stdout().lock()),
		sizes: args.output_file.is_some().then(Vec::new),
	};
	let mut sweeper = Sweeper::new(zero, progress_period);
	let output = sweeper.run(&config, &mut sink).context("Unable to run sweep")?;
	tracing::debug!(?output, "Finished sweep");

	if let (Some(output_path), Some(sizes)) = (&args.output_file, sink.sizes) {
		let data = data::Data::new(config, sizes);
		let output_file = fs::File::create(output_path).context("Unable to create output file")?;
		data.to_writer(io::BufWriter::new(output_file))
			.context("Unable to write to output file")?;
	}

	Ok(())
}

/// Sink printing every record and optionally keeping all measurements
struct Sink<W> {
	/// Csv output
	csv: CsvSink<W>,

	/// All measurements
	sizes: Option<Vec<SizeMeasurement>>,
}

impl<W: io::Write> SweepSink for Sink<W> {
	fn handle_size(&mut self, size: &SizeMeasurement) -> Result<(), anyhow::Error> {
		self.csv.handle_size(size)?;
		if let Some(sizes) = &mut self.sizes {
			sizes.handle_size(size)?;
		}

		Ok(())
	}
}
