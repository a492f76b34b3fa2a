//! Exam Model - Questions, metadata and structural validation
//!
//! This crate holds the data an exam document is built from: an ordered list
//! of multiple-choice questions plus the metadata block printed at the top of
//! the document. It also owns the wire records the question service sends and
//! the structural checks that must pass before any layout work starts.

mod error;
mod exam;
mod question;
mod record;
mod topic;

pub use error::*;
pub use exam::*;
pub use question::*;
pub use record::*;
pub use topic::*;
