//! # linework
//!
//! Core of a project dashboard for utility construction programs
//! (substations, line rebuilds, feeders). The dashboard API owns the data;
//! this crate decodes the project list, decides which projects a list page
//! shows and in what order, and computes the display values around them.
//!
//! ## Modules
//!
//! - [`status`]: the twelve lifecycle statuses, labels, colors, sort order
//! - [`project`]: typed project records and lenient decoding
//! - [`view`]: the filter/search/sort engine behind the project list
//! - [`timeline`]: elapsed-time progress and days remaining
//! - [`card`]: currency/date formatting and project card values
//! - [`source`]: loading the project list from the API or a JSON export
//! - [`config`]: `linework.toml` with the API location and saved views

pub mod card;
pub mod config;
pub mod project;
pub mod source;
pub mod status;
pub mod timeline;
pub mod view;

pub use project::{Project, ProjectId};
pub use status::{ProjectStatus, StatusValue};
pub use view::{visible_projects, FilterConfig, ProjectQuery, SortKey, SortOrder};
