//! Array under test

// Imports
use {
	crate::element::{self, Element},
	anyhow::Context,
};

/// Value every element's index is xor-ed with
pub const FILL_MASK: Element = 0xdead_beef;

/// Allocates an array able to hold `size` bytes, rounded up to whole elements.
///
/// Element `i` holds `i ^ FILL_MASK`, so every element is distinct and
/// not known at compile time.
///
/// # Errors
/// Returns an error if the allocation fails.
pub fn alloc(size: u64) -> Result<Vec<Element>, anyhow::Error> {
	let element_count = element::element_count(size);
	let scaled_size = element_count
		.checked_mul(element::ELEMENT_SIZE)
		.with_context(|| format!("Unable to allocate array of {size} bytes: size overflows"))?;
	let len = usize::try_from(element_count)
		.with_context(|| format!("Array of {scaled_size} bytes doesn't fit in the address space"))?;

	let mut array = Vec::new();
	array
		.try_reserve_exact(len)
		.with_context(|| format!("Unable to allocate array of {scaled_size} bytes"))?;
	array.extend((0..len as Element).map(|idx| idx ^ FILL_MASK));

	Ok(array)
}
