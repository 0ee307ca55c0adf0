//! Domain module
//!
//! Core domain primitives and errors.

pub mod amount;
pub mod error;

pub use amount::{Amount, AmountError, Balance};
pub use error::DomainError;
