//! Host feature probing.
//!
//! Capability detection is kept apart from the kernels so the dispatcher can
//! be handed an explicit flag set instead of reading global state.

pub mod detection;

pub use detection::CapabilityFlags;
