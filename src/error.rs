use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the dictionary index and the solver
#[derive(Debug, Error)]
pub enum MotError {
    /// A word could not be normalized or does not fit the signature key.
    /// Recovered locally: the entry or candidate is skipped.
    #[error("invalid word '{word}': {reason}")]
    InvalidWord { word: String, reason: &'static str },

    /// The draw handed to the solver is structurally unusable
    #[error("invalid draw '{draw}': {reason}")]
    InvalidDraw { draw: String, reason: &'static str },

    /// The raw dictionary source could not be read
    #[error("cannot read dictionary source {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MotError {
    pub(crate) fn invalid_word(word: &str, reason: &'static str) -> Self {
        MotError::InvalidWord { word: word.to_string(), reason }
    }

    pub(crate) fn invalid_draw(draw: &str, reason: &'static str) -> Self {
        MotError::InvalidDraw { draw: draw.to_string(), reason }
    }
}

impl From<MotError> for io::Error {
    fn from(err: MotError) -> Self {
        match err {
            MotError::SourceUnreadable { source, .. } => source,
            other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, MotError>;
