//! Error types for text measurement

use crate::{FontStyle, FontWeight};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeasurementError {
    #[error("No font loaded for {weight:?} {style:?}")]
    FontNotLoaded { weight: FontWeight, style: FontStyle },

    #[error("Invalid font data: {0}")]
    InvalidFontData(String),

    #[error("Measurement backend failed: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, MeasurementError>;
