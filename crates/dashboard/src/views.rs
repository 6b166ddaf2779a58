//! View-models of the dashboard views.
//!
//! Each view is summarized from the filtered records on every refilter pass
//! and serialized for the rendering layer.

pub mod gender;
pub mod map;
pub mod parallel;
pub mod race;
pub mod smoking;
