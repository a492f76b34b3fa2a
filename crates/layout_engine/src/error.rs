//! Error types for layout engine

use exam_model::ValidationError;
use text_engine::MeasurementError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Measurement(#[from] MeasurementError),

    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid height: {0}")]
    InvalidHeight(f32),

    #[error("Block of height {height} does not fit the usable page height {available}")]
    BlockTooTall { height: f32, available: f32 },

    #[error("Exam has {count} questions, more than the limit of {limit}")]
    TooManyQuestions { count: usize, limit: usize },

    #[error("Failed to read layout configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Failed to parse layout configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
