use thiserror::Error;

use crate::transform::TransformError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Random source error: {0}")]
    Random(#[from] crate::random::Error),

    #[error("Dictionary error: {0}")]
    Corpus(#[from] crate::corpus::Error),

    #[error("Dictionary {dictionary:?} has no word between {min} and {max} characters")]
    NoMatchingWord {
        dictionary: String,
        min: usize,
        max: usize,
    },

    #[error("Padding to a fixed length needs at least one padding character")]
    EmptyPadding,

    #[error("Transform {0:?} is not registered")]
    UnknownTransform(String),

    #[error("Transform failed: {0}")]
    Transform(TransformError),

    #[error(
        "Only {generated} of {requested} unique passwords after {attempts} attempts, \
         the configuration does not have enough entropy"
    )]
    LowEntropyExhaustion {
        requested: usize,
        generated: usize,
        attempts: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}
