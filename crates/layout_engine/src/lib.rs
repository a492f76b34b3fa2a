//! Layout Engine - Line wrapping, pagination and exam document assembly
//!
//! This crate turns a validated exam into an ordered list of positioned text
//! fragments and page breaks that any renderer can draw.
//!
//! - [`wrap`] / [`LineWrapper`]: greedy line wrapping against a measurer
//! - [`PageCursor`]: vertical offset tracking and page overflow
//! - [`column_grid`]: column-major placement of the answer key
//! - [`DocumentAssembler`]: header, question blocks and answer key

mod assembler;
pub mod column_grid;
mod config;
mod error;
mod instruction;
mod line_wrapper;
mod page_cursor;
mod template;

pub use assembler::*;
pub use column_grid::{rows_per_column, GridPlacement};
pub use config::*;
pub use error::*;
pub use instruction::*;
pub use line_wrapper::*;
pub use page_cursor::*;
pub use template::*;
