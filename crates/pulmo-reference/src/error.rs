use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error(transparent)]
    Core(#[from] pulmo_core::error::CoreError),

    #[error("unknown case: {0}")]
    UnknownCase(String),

    #[error("option {index} is out of range; the question has {len} options")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("no answer selected")]
    NoSelection,

    #[error("submit an answer before moving on")]
    NotSubmitted,
}
