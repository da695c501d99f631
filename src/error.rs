//! Error types for horn-kb

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Source text could not be turned into a term.
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// A variable was given where a fact or rule was expected.
    #[error("not a clause: {clause}")]
    InvalidClause { clause: String },
}

impl Error {
    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        Error::Syntax {
            offset,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
