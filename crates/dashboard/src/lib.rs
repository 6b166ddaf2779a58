//! glycolens' dashboard library.
//!
//! Holds the filter state shared by the dashboard views, recomputes the view
//! summaries from scratch after each command and writes them out as a report.
//!
//! **WARNING**: This library is glycolens' internal library and there are no
//! plans to stabilize it. The API may break at any time without notice.

pub(crate) mod render;
pub(crate) mod template;

pub mod aggregate;
pub mod command;
pub mod controller;
pub mod error;
pub mod filter;
pub mod report;
pub mod views;

pub use crate::command::Command;
pub use crate::controller::Controller;
pub use crate::controller::Snapshot;
pub use crate::filter::Dimension;
pub use crate::filter::FilterState;
pub use crate::filter::Selection;
pub use crate::filter::apply_filters;
pub use crate::report::Report;
pub use crate::views::parallel::ClassFilter;
