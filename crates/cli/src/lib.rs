//! Terminal output helpers for Artprint tools
//!
//! - Status lines and run summaries
//! - Spinners and job progress bars

#![warn(missing_docs)]

pub mod output;
pub mod progress;
