//! Shared types for Moneta.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Currency codes
//! - Calendar month periods for budget scoping

pub mod types;

pub use types::{Currency, Period};
