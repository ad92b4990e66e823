//! Logger
//!
//! Logs to stderr, filtered by `RUST_LOG`, and optionally to a file,
//! filtered by `RUST_LOG_FILE`.
//!
//! Stdout is never written to, as it's reserved for program output.

// Imports
use {
	std::{
		fs,
		io::{self, IsTerminal},
		path::Path,
		sync::Mutex,
	},
	tracing::Level,
	tracing_subscriber::{prelude::*, EnvFilter},
};

/// Default filter for the terminal
const DEFAULT_TERM_FILTER: &str = "info";

/// Default filter for the log file
const DEFAULT_FILE_FILTER: &str = "debug";

/// Messages logged before the logger was initialized
static PRE_INIT_MESSAGES: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

/// Pre-initialization logging.
///
/// Messages are buffered and emitted once [`init`] is called.
pub mod pre_init {
	// Imports
	use {super::PRE_INIT_MESSAGES, tracing::Level};

	/// Buffers a message with level `level`
	pub fn log(level: Level, message: impl Into<String>) {
		// Note: If the lock is poisoned we still want the message, the
		//       buffer itself can't be left in an invalid state.
		let mut messages = PRE_INIT_MESSAGES.lock().unwrap_or_else(|err| err.into_inner());
		messages.push((level, message.into()));
	}

	/// Buffers a debug message
	pub fn debug(message: impl Into<String>) {
		self::log(Level::DEBUG, message);
	}
}

/// Initializes the logger.
///
/// If `log_file` is given, also logs to it, appending instead of truncating
/// when `log_file_append` is set. Failing to open the log file is reported as
/// a warning and logging continues on the terminal only.
///
/// Calling this more than once has no effect beyond emitting a warning.
pub fn init(log_file: Option<&Path>, log_file_append: bool) {
	// Create the terminal layer
	let term_layer = tracing_subscriber::fmt::layer()
		.with_ansi(io::stderr().is_terminal())
		.with_writer(io::stderr)
		.with_filter(self::env_filter("RUST_LOG", DEFAULT_TERM_FILTER));

	// Then the file layer, if any
	let mut file_err = None;
	let file_layer = log_file.and_then(|log_file| {
		let file = fs::File::options()
			.create(true)
			.write(true)
			.append(log_file_append)
			.truncate(!log_file_append)
			.open(log_file);

		match file {
			Ok(file) => Some(
				tracing_subscriber::fmt::layer()
					.with_ansi(false)
					.with_writer(Mutex::new(file))
					.with_filter(self::env_filter("RUST_LOG_FILE", DEFAULT_FILE_FILTER)),
			),
			Err(err) => {
				file_err = Some(format!("Unable to open log file {log_file:?}: {err}"));
				None
			},
		}
	});

	let init_res = tracing_subscriber::registry()
		.with(term_layer)
		.with(file_layer)
		.try_init();
	if let Err(err) = init_res {
		tracing::warn!("Logger was already initialized: {err}");
	}

	if let Some(file_err) = file_err {
		tracing::warn!("{file_err}");
	}

	// Finally flush all messages from before we were initialized
	let messages = std::mem::take(&mut *PRE_INIT_MESSAGES.lock().unwrap_or_else(|err| err.into_inner()));
	for (level, message) in messages {
		match level {
			Level::ERROR => tracing::error!("{message}"),
			Level::WARN => tracing::warn!("{message}"),
			Level::INFO => tracing::info!("{message}"),
			Level::DEBUG => tracing::debug!("{message}"),
			_ => tracing::trace!("{message}"),
		}
	}
}

/// Returns the filter in env var `env`, or `default` if unset or invalid
fn env_filter(env: &str, default: &str) -> EnvFilter {
	EnvFilter::try_from_env(env).unwrap_or_else(|_| EnvFilter::new(default))
}
