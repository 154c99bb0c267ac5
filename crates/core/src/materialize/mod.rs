//! Exactly-once transaction generation from due occurrences.

pub mod error;
pub mod service;

pub use error::MaterializeError;
pub use service::{MaterializeOutcome, Materializer};
