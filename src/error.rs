use thiserror::Error;

/// Errors raised while preparing a selection run.
///
/// The selection engines themselves never fail on valid input; everything
/// here is detected by the driver before an engine is invoked.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("input contains no integers")]
    EmptyInput,

    #[error("rank {rank} is out of range for a sequence of length {len}")]
    RankOutOfRange { rank: usize, len: usize },

    #[error("unknown selection mode: {0}")]
    InvalidMode(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn invalid_mode<S: Into<String>>(mode: S) -> Self {
        Error::InvalidMode(mode.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
