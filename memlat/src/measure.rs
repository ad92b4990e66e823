//! Latency measurement.
//!
//! Each measurement runs two loops with the same iteration count and the same
//! index computation:
//! - The baseline loop folds the index itself into the generator state.
//! - The access loop folds the element at that index instead.
//!
//! Only the access loop reads memory, so the difference between both
//! per-iteration times estimates the latency of a single read.
//!
//! Everything folded into the state is masked by an [`OpaqueZero`], which
//! keeps the read alive without letting its value steer the access pattern.

// Imports
use {
	crate::{clock, clock::OpaqueZero, element::Element, lfsr},
	std::hint,
};

/// Measurement
#[derive(Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Measurement {
	/// Average time per iteration without memory access (ns)
	pub baseline: f64,

	/// Average time per iteration with memory access (ns)
	pub access_time: f64,

	/// Iterations each loop ran for
	pub iterations: u64,

	/// Final generator state.
	///
	/// Only exists so the loops have an observable result.
	pub generator_state: u64,
}

impl Measurement {
	/// Returns the estimated latency of a single access (ns)
	#[must_use]
	pub fn offset(&self) -> f64 {
		self.access_time - self.baseline
	}
}

/// Access pattern
pub trait AccessPattern {
	/// Name of the pattern
	const NAME: &'static str;

	/// Returns the index to access at iteration `iter`, given the generator state `state`.
	///
	/// Must return a value within `0..len`.
	fn index(iter: u64, state: u64, len: u64) -> u64;
}

/// Sequential access pattern.
///
/// Walks the array from start to end, wrapping around.
#[derive(Clone, Copy, Debug)]
pub struct Sequential;

impl AccessPattern for Sequential {
	const NAME: &'static str = "sequential";

	#[inline(always)]
	fn index(iter: u64, _state: u64, len: u64) -> u64 {
		iter % len
	}
}

/// Random access pattern.
///
/// Maps the generator state onto the array with a multiply-high range reduction.
#[derive(Clone, Copy, Debug)]
pub struct Random;

impl AccessPattern for Random {
	const NAME: &'static str = "random";

	#[inline(always)]
	fn index(_iter: u64, state: u64, len: u64) -> u64 {
		((u128::from(state) * u128::from(len)) >> 64) as u64
	}
}

/// Measures the latency of accessing `array` with pattern `P`.
///
/// Each loop runs for `max(repeat, array.len())` iterations, so every element
/// is reachable even for small `repeat`.
///
/// # Panics
/// Panics if `array` is empty, or if `P` produces an index outside of it.
#[inline(never)]
pub fn measure<P: AccessPattern>(repeat: u64, array: &[Element], zero: OpaqueZero) -> Measurement {
	assert!(!array.is_empty(), "Cannot measure an empty array");

	let len = array.len() as u64;
	let iterations = repeat.max(len);
	let zero = zero.get();

	// Baseline
	let t0 = clock::now();
	let mut state = lfsr::SEED;
	for iter in 0..iterations {
		let idx = P::index(iter, state, len);
		state = lfsr::fold(state, idx & zero);
	}
	let state = hint::black_box(state);
	let t1 = clock::now();

	// Access
	let mut state = lfsr::reseed(state);
	let t2 = clock::now();
	for iter in 0..iterations {
		let idx = P::index(iter, state, len);
		let value = array[idx as usize];
		state = lfsr::fold(state, value & zero);
	}
	let state = hint::black_box(state);
	let t3 = clock::now();

	Measurement {
		baseline: (t1 - t0) as f64 / iterations as f64,
		access_time: (t3 - t2) as f64 / iterations as f64,
		iterations,
		generator_state: state,
	}
}

/// Measures the latency of accessing `array` sequentially.
///
/// See [`measure`] for details.
pub fn measure_sequential_latency(repeat: u64, array: &[Element], zero: OpaqueZero) -> Measurement {
	self::measure::<Sequential>(repeat, array, zero)
}

/// Measures the latency of accessing `array` randomly.
///
/// See [`measure`] for details.
pub fn measure_latency(repeat: u64, array: &[Element], zero: OpaqueZero) -> Measurement {
	self::measure::<Random>(repeat, array, zero)
}

#[cfg(test)]
mod tests {
	use {
		super::*,
		crate::array,
		average::{Estimate, Mean},
		proptest::prelude::*,
		std::collections::HashSet,
	};

	#[test]
	fn iterations_cover_whole_array() {
		let array = array::alloc(8 * 1000).expect("Unable to allocate");
		let zero = OpaqueZero::from_clock();

		assert_eq!(measure_sequential_latency(0, &array, zero).iterations, 1000);
		assert_eq!(measure_latency(10, &array, zero).iterations, 1000);
		assert_eq!(measure_latency(5000, &array, zero).iterations, 5000);
	}

	#[test]
	fn single_element_array() {
		let array: [Element; 1] = [1];
		let measurement = measure_latency(100, &array, OpaqueZero::from_clock());
		assert_eq!(measurement.iterations, 100);
	}

	#[test]
	#[should_panic(expected = "Cannot measure an empty array")]
	fn empty_array_panics() {
		measure_sequential_latency(100, &[], OpaqueZero::from_clock());
	}

	/// Pattern that always indexes past the end of the array
	struct PastEnd;

	impl AccessPattern for PastEnd {
		const NAME: &'static str = "past-end";

		fn index(_iter: u64, _state: u64, len: u64) -> u64 {
			len + 1_000_000
		}
	}

	#[test]
	#[should_panic(expected = "index out of bounds")]
	fn out_of_range_pattern_panics() {
		measure::<PastEnd>(1, &[1u64; 4], OpaqueZero::from_clock());
	}

	#[test]
	fn generator_state_is_deterministic() {
		let array = array::alloc(4096).expect("Unable to allocate");
		let zero = OpaqueZero::from_clock();

		let first = measure_latency(10_000, &array, zero);
		let second = measure_latency(10_000, &array, zero);
		assert_eq!(first.generator_state, second.generator_state);

		// With a zero mask, the array contents don't influence the state
		let baseline_state = (0..10_000).fold(lfsr::SEED, |state, _| lfsr::advance(state));
		let expected = (0..10_000).fold(lfsr::reseed(baseline_state), |state, _| lfsr::advance(state));
		assert_eq!(first.generator_state, expected);
	}

	#[test]
	fn sequential_visits_in_order() {
		let len = 7;
		let indices = (0..21).map(|iter| Sequential::index(iter, 0, len)).collect::<Vec<_>>();
		assert_eq!(indices[..7], [0, 1, 2, 3, 4, 5, 6]);
		assert_eq!(indices[7..14], indices[..7]);
	}

	#[test]
	fn random_covers_array() {
		let len = 64;
		let mut state = lfsr::SEED;
		let mut seen = HashSet::new();
		for iter in 0..10_000 {
			seen.insert(Random::index(iter, state, len));
			state = lfsr::advance(state);
		}
		assert_eq!(seen.len(), len as usize);
	}

	/// The access loop does strictly more work, so on average it must take longer.
	#[test]
	fn access_time_exceeds_baseline_on_average() {
		const RUNS: usize = 16;

		let array = array::alloc(8 << 20).expect("Unable to allocate");
		let zero = OpaqueZero::from_clock();

		let mut random_baseline = Mean::new();
		let mut random_access = Mean::new();
		let mut sequential_baseline = Mean::new();
		let mut sequential_access = Mean::new();
		for _ in 0..RUNS {
			let random = measure_latency(0, &array, zero);
			random_baseline.add(random.baseline);
			random_access.add(random.access_time);

			let sequential = measure_sequential_latency(0, &array, zero);
			sequential_baseline.add(sequential.baseline);
			sequential_access.add(sequential.access_time);
		}

		assert!(
			random_access.mean() >= random_baseline.mean(),
			"Random access {} < baseline {}",
			random_access.mean(),
			random_baseline.mean()
		);
		// Note: Sequential reads don't depend on the generator state, so with optimizations
		//       they overlap with the baseline work almost entirely.
		assert!(
			sequential_access.mean() >= 0.9 * sequential_baseline.mean(),
			"Sequential access {} well below baseline {}",
			sequential_access.mean(),
			sequential_baseline.mean()
		);
	}

	proptest! {
		#[test]
		fn patterns_stay_in_range(iter in any::<u64>(), state in any::<u64>(), len in 1u64..(1 << 40)) {
			prop_assert!(Sequential::index(iter, state, len) < len);
			prop_assert!(Random::index(iter, state, len) < len);
		}
	}
}
