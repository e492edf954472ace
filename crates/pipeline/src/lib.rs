//! The Blueflame generation engine: in-memory job store with TTL eviction,
//! the background progress simulator, and the mock/real generation backend
//! seam.

pub mod backend;
pub mod simulate;
pub mod store;
