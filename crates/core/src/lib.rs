//! Domain types for the Blueflame song-generation backend.
//!
//! No I/O lives here: the job store, simulator, and HTTP surface build on
//! these types from the `blueflame-pipeline` and `blueflame-api` crates.

pub mod error;
pub mod job;
pub mod prompts;
pub mod voice;
