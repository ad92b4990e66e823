//! Array elements

// Imports
use std::mem;

/// Array element
pub type Element = u64;

/// Size of an element, in bytes
pub const ELEMENT_SIZE: u64 = mem::size_of::<Element>() as u64;

/// Scales a byte size up to a whole number of elements.
///
/// Returns the smallest multiple of [`ELEMENT_SIZE`] that's `>= size`.
#[must_use]
pub const fn scale(size: u64) -> u64 {
	self::element_count(size) * ELEMENT_SIZE
}

/// Returns the number of elements needed to hold `size` bytes
#[must_use]
pub const fn element_count(size: u64) -> u64 {
	size.div_ceil(ELEMENT_SIZE)
}
