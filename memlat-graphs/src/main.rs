//! Creates graphs from `memlat`'s output

// Modules
mod args;
mod config;
mod input;

// Imports
use {
	self::{args::Args, config::Config},
	clap::Parser,
	gnuplot::{AxesCommon, Caption, Figure},
	itertools::Itertools,
	memlat::SweepRecord,
	memlat_util::logger,
};

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Then check the sub-command
	match args.sub_cmd {
		args::SubCmd::Latency(cmd_args) => {
			let config = Config::load(cmd_args.config_file.as_deref())?;
			let records = input::read_records(&cmd_args.input_file)?;
			tracing::debug!(records = records.len(), "Read records");

			self::plot_latency(&records, &config, &cmd_args.output)?;
		},

		args::SubCmd::LatencyMultiple(cmd_args) => {
			let config = Config::load(cmd_args.config_file.as_deref())?;
			let runs = cmd_args
				.input_files
				.iter()
				.map(|input_file| input::read_records(input_file))
				.collect::<Result<Vec<_>, _>>()?;

			let records = input::average_runs(&runs);
			tracing::debug!(runs = runs.len(), sizes = records.len(), "Averaged runs");
			if records.is_empty() {
				tracing::warn!("Runs have no sizes in common");
			}

			self::plot_latency(&records, &config, &cmd_args.output)?;
		},
	}

	Ok(())
}

/// Plots the offsets of `records` against their size, and renders it to `output`.
fn plot_latency(records: &[SweepRecord], config: &Config, output: &args::Output) -> Result<(), anyhow::Error> {
	anyhow::ensure!(
		output.interactive || output.file.is_some(),
		"No output specified, use `--interactive` and/or `--output`"
	);

	let sizes = records.iter().map(|record| record.size as f64).collect::<Vec<_>>();
	let random_offsets = records.iter().map(|record| record.random_offset).collect::<Vec<_>>();
	let sequential_offsets = records
		.iter()
		.map(|record| record.sequential_offset)
		.collect::<Vec<_>>();

	// Note: Cache level markers span all offsets, and always include 0.
	let (min_offset, max_offset) = random_offsets
		.iter()
		.chain(&sequential_offsets)
		.copied()
		.minmax_by(f64::total_cmp)
		.into_option()
		.unwrap_or((0.0, 1.0));
	let (min_offset, max_offset) = (min_offset.min(0.0), max_offset.max(0.0));

	let mut fg = Figure::new();
	let axes = fg.axes2d();
	axes.set_title(
		config.title.as_deref().unwrap_or("Latency as a function of array size"),
		&[],
	)
	.set_x_label("Bytes allocated (log scale)", &[])
	.set_y_label("Latency (ns)", &[])
	.set_x_log(Some(10.0))
	.lines(&sizes, &random_offsets, &[Caption("Random access")])
	.lines(&sizes, &sequential_offsets, &[Caption("Sequential access")]);

	for cache_level in &config.cache_levels {
		let caption = format!("{} ({} bytes)", cache_level.name, cache_level.size);
		axes.lines(
			[cache_level.size as f64; 2],
			[min_offset, max_offset],
			&[Caption(caption.as_str())],
		);
	}

	if let Some(output_file) = &output.file {
		let save_res = if output_file.extension().is_some_and(|ext| ext == "svg") {
			fg.save_to_svg(output_file, output.width, output.height)
		} else {
			fg.save_to_png(output_file, output.width, output.height)
		};
		save_res.map_err(|err| anyhow::anyhow!("Unable to save output file: {err:?}"))?;
		tracing::info!(?output_file, "Saved graph");
	}

	if output.interactive {
		fg.show()
			.map_err(|err| anyhow::anyhow!("Unable to start gnuplot: {err:?}"))?;
	}

	Ok(())
}
