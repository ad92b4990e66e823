//! Configuration

// Imports
use {anyhow::Context, std::path::Path};

/// Configuration
#[derive(Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Config {
	/// Graph title
	#[serde(default)]
	pub title: Option<String>,

	/// Cache levels to mark
	#[serde(default)]
	pub cache_levels: Vec<CacheLevel>,
}

impl Config {
	/// Reads the config at `path`, or the default config if `None`
	pub fn load(path: Option<&Path>) -> Result<Self, anyhow::Error> {
		let Some(path) = path else {
			return Ok(Self::default());
		};

		let config_file = std::fs::File::open(path).context("Unable to open config file")?;
		serde_json::from_reader(config_file).context("Unable to parse config file")
	}
}

/// Cache level
#[derive(Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CacheLevel {
	pub name: String,
	pub size: u64,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_config() {
		let config = serde_json::from_str::<Config>(
			r#"{
				"title": "AMD Ryzen 9 6900HS",
				"cache_levels": [
					{ "name": "L1", "size": 65536 },
					{ "name": "L2", "size": 524288 },
					{ "name": "L3", "size": 16777216 }
				]
			}"#,
		)
		.expect("Unable to parse config");

		assert_eq!(config.title.as_deref(), Some("AMD Ryzen 9 6900HS"));
		assert_eq!(
			config.cache_levels.iter().map(|level| level.size).collect::<Vec<_>>(),
			[65536, 524288, 16777216]
		);
	}

	#[test]
	fn missing_fields_use_defaults() {
		let config = serde_json::from_str::<Config>("{}").expect("Unable to parse config");
		assert!(config.title.is_none());
		assert!(config.cache_levels.is_empty());
	}
}
