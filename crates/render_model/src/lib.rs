//! Render Model - Instruction stream to page conversion
//!
//! This crate splits the draw instructions of an assembled document into
//! pages of render items and provides renderers that encode them.

mod converter;
mod error;
mod render_item;
mod renderer;

pub use converter::*;
pub use error::*;
pub use render_item::*;
pub use renderer::*;
