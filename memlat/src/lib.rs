//! Memory latency measurement (`memlat`)
//!
//! Measures the latency of reading memory as a function of the working set size,
//! for both random and sequential access, to expose the steps of the memory hierarchy.

// Modules
pub mod array;
pub mod clock;
pub mod data;
pub mod element;
pub mod lfsr;
pub mod measure;
pub mod sweep;

// Exports
pub use self::{
	clock::OpaqueZero,
	measure::Measurement,
	sweep::{SweepConfig, SweepRecord, SweepSink, Sweeper},
};
