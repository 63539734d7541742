//! # View: Project List Filter, Search, and Sort
//!
//! Turns the full project list into the ordered subset a list page shows.
//! The engine is a pure function of `(projects, filters, search, sort)`;
//! callers recompute whenever either side changes.
//!
//! ## Pipeline
//!
//! ```text
//! all projects
//!     ↓ hide cancelled/archived (unless the status filter selects them)
//!     ↓ free-text search over name, location, description
//!     ↓ budget bounds (inclusive, absent budget = 0)
//!     ↓ date bounds (inclusive, unparsable dates fail the bound)
//!     ↓ exact status filter
//!     ↓ stable sort by the selected column and direction
//! visible projects
//! ```
//!
//! ## Module Structure
//!
//! - [`query`]: `FilterConfig`, `SortKey`, `SortOrder`, `ProjectQuery`
//! - [`compare`]: per-column comparators and string collation
//! - [`engine`]: `visible_projects`

mod compare;
mod engine;
mod query;

pub use compare::*;
pub use engine::*;
pub use query::*;
