//! Time source

// Imports
use std::{
	hint,
	sync::OnceLock,
	time::{Duration, Instant, SystemTime},
};

/// Number of nanoseconds per second
pub const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Epoch all [`now`] samples are relative to
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Returns the current time, in nanoseconds.
///
/// Samples a monotonic clock, so successive calls never decrease.
/// Samples are relative to the first call within the process.
#[inline]
pub fn now() -> u64 {
	let epoch = *EPOCH.get_or_init(Instant::now);
	self::to_nanos(epoch.elapsed())
}

/// Combines the whole seconds and sub-second nanoseconds of `duration` into nanoseconds.
#[inline]
pub fn to_nanos(duration: Duration) -> u64 {
	duration.as_secs() * NANOS_PER_SEC + u64::from(duration.subsec_nanos())
}

/// A zero the optimizer can't prove is zero.
///
/// Masking a value with this keeps the computation producing it alive,
/// while contributing nothing to the result.
#[derive(Clone, Copy, Debug)]
pub struct OpaqueZero(u64);

impl OpaqueZero {
	/// Derives the zero from a wall-clock sample.
	///
	/// Any sample taken after the first second of the unix epoch
	/// results in `0`, but the compiler can't know that.
	pub fn from_clock() -> Self {
		// Note: A clock before the unix epoch is treated as the epoch itself,
		//       which still yields a zero below.
		let sample = SystemTime::now()
			.duration_since(SystemTime::UNIX_EPOCH)
			.map_or(NANOS_PER_SEC + 1, self::to_nanos);

		Self::from_sample(sample)
	}

	/// Derives the zero from a nanosecond sample
	fn from_sample(sample: u64) -> Self {
		let zero = if sample > NANOS_PER_SEC { 0 } else { sample };

		Self(hint::black_box(zero))
	}

	/// Returns the value
	#[inline]
	pub fn get(self) -> u64 {
		self.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn to_nanos_combines_secs_and_nanos() {
		assert_eq!(to_nanos(Duration::new(0, 0)), 0);
		assert_eq!(to_nanos(Duration::new(0, 999_999_999)), 999_999_999);
		assert_eq!(to_nanos(Duration::new(3, 25)), 3_000_000_025);
	}

	#[test]
	fn now_is_monotonic() {
		let mut prev = now();
		for _ in 0..1000 {
			let cur = now();
			assert!(cur >= prev, "Clock went backwards: {prev} -> {cur}");
			prev = cur;
		}
	}

	#[test]
	fn opaque_zero_is_zero() {
		assert_eq!(OpaqueZero::from_clock().get(), 0);
		assert_eq!(OpaqueZero::from_sample(NANOS_PER_SEC + 1).get(), 0);
	}
}
