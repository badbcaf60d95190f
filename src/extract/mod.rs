//! Profile extraction and chart update
//!
//! Raw user text flows through [`ChartExtractor`] into [`ExtractedFacts`],
//! which [`merge`] folds into an existing [`MedicalChart`](crate::MedicalChart).

mod extractor;
pub mod keywords;
mod merger;

pub use extractor::{ChartExtractor, ExtractedFacts};
pub use merger::{apply_edit, apply_edit_at, merge, merge_at};
