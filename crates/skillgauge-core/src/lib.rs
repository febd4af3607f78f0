//! skillgauge-core — data model, scoring, and session state machine.
//!
//! This crate defines the question catalog and score matrix, the pure
//! scoring/breakdown computations, deterministic coaching-message selection,
//! and the session state machine the CLI drives.

pub mod breakdown;
pub mod catalog;
pub mod error;
pub mod feedback;
pub mod model;
pub mod scoring;
pub mod session;
