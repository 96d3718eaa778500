//! Report renderers for analysis results.
//!
//! - [`terminal`] — colored summary box and per-term sample tables; also the
//!   `--list-terms` / `--explain` glossary views.
//! - [`json`] — matched terms with guidance and previews, for scripting.
//! - [`pdf`] — cover page with overview cards, then one section per matched term.

pub mod json;
pub mod pdf;
pub mod terminal;
