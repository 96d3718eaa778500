//! Clause segmentation and keyword-based term classification.
//!
//! - [`segmenter`] — splits raw document text into trimmed, length-filtered clauses.
//! - [`keyword`] — compiles a term's keywords into case-insensitive matchers
//!   (whole-word for single words, literal for phrases).
//! - [`classifier`] — tags each clause with every term whose keywords it contains.

pub mod classifier;
pub mod keyword;
pub mod segmenter;

pub use classifier::{classify, classify_with};
pub use segmenter::{segment, segment_with};
