//! Output data

// Imports
use {
	crate::{
		element,
		sweep::{SizeMeasurement, SweepConfig, SweepRecord},
	},
	anyhow::Context,
	std::io,
};

/// Output data
#[derive(Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Data {
	pub config:       SweepConfig,
	pub element_size: u64,
	pub sizes:        Vec<SizeMeasurement>,
}

impl Data {
	/// Creates the output data of a sweep
	pub fn new(config: SweepConfig, sizes: Vec<SizeMeasurement>) -> Self {
		Self {
			config,
			element_size: element::ELEMENT_SIZE,
			sizes,
		}
	}

	/// Returns the records of all sizes
	pub fn records(&self) -> impl Iterator<Item = SweepRecord> + '_ {
		self.sizes.iter().map(SizeMeasurement::record)
	}

	/// Writes this data as json to `writer`
	pub fn to_writer(&self, writer: impl io::Write) -> Result<(), anyhow::Error> {
		serde_json::to_writer_pretty(writer, self).context("Unable to serialize data")
	}

	/// Reads data from json in `reader`
	pub fn from_reader(reader: impl io::Read) -> Result<Self, anyhow::Error> {
		serde_json::from_reader(reader).context("Unable to deserialize data")
	}
}
