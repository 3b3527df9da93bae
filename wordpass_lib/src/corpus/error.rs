use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Dictionary {0:?} is not registered")]
    UnknownCorpus(String),

    #[error("Dictionary name {0:?} is reserved")]
    ReservedName(String),

    #[error("Could not read word list: {0}")]
    IO(#[from] std::io::Error),

    #[error("Random source error: {0}")]
    Random(#[from] crate::random::Error),
}
