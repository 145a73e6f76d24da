//! lhr-report - audit run classification
//!
//! Takes the result of a web-page audit run and derives a renderable report
//! model: weighted per-category scores and a deterministic partition of every
//! audit into exactly one clump (failed, warning, manual, passed or not
//! applicable), with audits inside a clump organized into group runs.
//!
//! ```no_run
//! use lhr_report::models::Lhr;
//! use lhr_report::report::{build_report, RenderContext};
//!
//! # fn main() -> Result<(), lhr_report::error::ReportError> {
//! let lhr = Lhr::load(std::path::Path::new("run.json"))?;
//! let report = build_report(&lhr, &RenderContext::default());
//! for category in &report.categories {
//!     println!("{}: {:?}", category.title, category.display_score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod clumps;
pub mod config;
pub mod error;
pub mod models;
pub mod plugin;
pub mod report;
pub mod reporters;
pub mod scoring;
