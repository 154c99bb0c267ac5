//! The transaction entity shared by the mutation and read paths.

pub mod types;

pub use types::{Transaction, TransactionType};
