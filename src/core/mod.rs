//! Core invoice types, code tables, amount formatting, and validation.
//!
//! This module holds the typed invoice record the renderer consumes,
//! together with the validation pass that guarantees its preconditions.

mod builder;
pub mod codes;
mod error;
mod format;
mod types;
mod validation;

pub use builder::*;
pub use codes::*;
pub use error::*;
pub use format::{format_decimal, invoice_tax_summary, tax_exclusive_amount};
pub(crate) use format::tax_exclusive_for;
pub use types::*;
pub use validation::*;
