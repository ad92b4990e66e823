//! Pseudo-random sequence generator.
//!
//! A 64-bit galois linear-feedback shift register with maximal-length taps.
//! It's cheap enough to run inside a timed loop, and needs no outside source
//! of randomness, so every run produces the same sequence.

/// Feedback polynomial.
///
/// Taps for `x^64 + x^63 + x^61 + x^60 + 1`.
pub const POLYNOMIAL: u64 = (1 << 63) | (1 << 62) | (1 << 60) | (1 << 59);

/// Seed the generator is started from
pub const SEED: u64 = 12345;

/// Advances the generator by a single step.
///
/// Shifts right by one, xor-ing in [`POLYNOMIAL`] if the bit shifted out was set.
/// Branch-free.
#[inline(always)]
#[must_use]
pub const fn advance(state: u64) -> u64 {
	(state >> 1) ^ (0u64.wrapping_sub(state & 1) & POLYNOMIAL)
}

/// Folds `value` into `state` and advances it.
#[inline(always)]
#[must_use]
pub const fn fold(state: u64, value: u64) -> u64 {
	self::advance(state ^ value)
}

/// Derives a fresh seed from the final state of a previous run.
///
/// The all-zero state never leaves itself, so it's replaced by [`SEED`].
#[must_use]
pub const fn reseed(state: u64) -> u64 {
	match state ^ SEED {
		0 => SEED,
		seed => seed,
	}
}

#[cfg(test)]
mod tests {
	use {super::*, proptest::prelude::*};

	#[test]
	fn polynomial_taps() {
		assert_eq!(POLYNOMIAL, 0xD800_0000_0000_0000);
	}

	#[test]
	fn advance_without_carry_shifts() {
		assert_eq!(advance(0b1010), 0b101);
		assert_eq!(advance(0), 0);
	}

	#[test]
	fn advance_with_carry_applies_polynomial() {
		assert_eq!(advance(1), POLYNOMIAL);
		assert_eq!(advance(0b11), 1 ^ POLYNOMIAL);
	}

	#[test]
	fn advance_is_deterministic() {
		let run = || (0..10_000).fold(SEED, |state, _| advance(state));
		assert_eq!(run(), run());
		assert_ne!(run(), SEED);
	}

	#[test]
	fn sequence_does_not_repeat_early() {
		let mut seen = std::collections::HashSet::new();
		let mut state = SEED;
		for _ in 0..100_000 {
			assert!(seen.insert(state), "State {state:#x} repeated");
			state = advance(state);
		}
	}

	#[test]
	fn reseed_never_yields_zero() {
		assert_eq!(reseed(SEED), SEED);
		assert_eq!(reseed(0), SEED);
		assert_eq!(reseed(1), 1 ^ SEED);
	}

	proptest! {
		#[test]
		fn advance_matches_branching_form(state in any::<u64>()) {
			let expected = match state & 1 {
				0 => state >> 1,
				_ => (state >> 1) ^ POLYNOMIAL,
			};
			prop_assert_eq!(advance(state), expected);
		}

		#[test]
		fn nonzero_states_stay_nonzero(state in 1u64..) {
			prop_assert_ne!(advance(state), 0);
		}

		#[test]
		fn fold_with_zero_is_advance(state in any::<u64>()) {
			prop_assert_eq!(fold(state, 0), advance(state));
		}
	}
}
