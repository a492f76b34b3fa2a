//! Text Engine - Normalization, font specs and text measurement
//!
//! This crate prepares text for a renderer and tells the layout engine how
//! wide a string will be once drawn.
//!
//! # Modules
//!
//! - `normalizer`: Substitutes characters outside the renderer's font repertoire
//! - `measurer`: The `TextMeasurer` interface and font specifications
//! - `metrics`: A deterministic character-width measurer
//! - `shaper`: A measurer backed by real font data, shaped with rustybuzz

mod error;
mod measurer;
mod metrics;
mod normalizer;
mod shaper;

pub use error::*;
pub use measurer::*;
pub use metrics::*;
pub use normalizer::*;
pub use shaper::*;
