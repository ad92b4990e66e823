//! Arguments

// Imports
use std::path::PathBuf;

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
#[command(allow_negative_numbers = true)]
pub struct Args {
	/// Log file
	///
	/// Specifies a file to perform verbose logging to.
	/// You can use `RUST_LOG_FILE` to set filtering options
	#[clap(long = "log-file")]
	pub log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	pub log_file_append: bool,

	/// Maximum array size, in bytes
	///
	/// Must be at least 100.
	pub max_size: u64,

	/// Factor between consecutive array sizes
	///
	/// Must be greater than 1.
	pub factor: f64,

	/// Minimum number of iterations per measurement
	pub repeat: u64,

	/// Output file
	///
	/// Writes all measurements, in json, to this file.
	#[clap(long = "output")]
	pub output_file: Option<PathBuf>,

	/// Progress output period (in seconds)
	#[clap(long = "progress-period", default_value_t = 1.0)]
	pub progress_period_secs: f64,
}
