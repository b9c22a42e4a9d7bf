use thiserror::Error;

/// Invariant violations reported by the editing core.
///
/// None of these are fatal: the tool state machine logs them and carries on
/// with the gesture loop.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("no stroke is being drawn")]
    NoActiveStroke,

    #[error("stroke width must be a positive number, got {0}")]
    InvalidStrokeWidth(f32),

    #[error("invalid color {0:?}, expected #rgb or #rrggbb")]
    InvalidColor(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
