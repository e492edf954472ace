//! HTTP surface of the Blueflame song-generation backend.
//!
//! Exposed as a library so integration tests can build the exact router and
//! middleware stack the binary serves.

pub mod config;
pub mod error;
pub mod requests;
pub mod router;
pub mod routes;
pub mod state;
