//! Crop yield dashboard: facet filtering, yield statistics and chart
//! projections over a static table of field observations.
//!
//! The pipeline is `data::filter` → `stats::summarize` → `views::build_views`,
//! bundled by [`pipeline::refresh`].  The egui window in the binary only
//! calls into it.

pub mod color;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod state;
pub mod stats;
pub mod views;
