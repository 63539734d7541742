//! # Project: Typed Project Records
//!
//! The dashboard API returns loosely-typed project JSON. This module is the
//! decode boundary: records become [`Project`] values with explicit optional
//! fields, a classified [`StatusValue`](crate::status::StatusValue), numeric
//! budgets, and raw date strings that parse on demand.
//!
//! ## Module Structure
//!
//! - [`types`]: `Project`, `ProjectId`, and the lenient field decoders
//! - [`dates`]: date parsing shared by filters, sorts, and the timeline

mod dates;
mod types;

pub use dates::*;
pub use types::*;

#[cfg(test)]
mod tests;
