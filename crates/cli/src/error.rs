//! Errors surfaced by the `wgen` binary and the exit code each one maps to.
//!
//! | code | meaning |
//! |------|---------|
//! | 0    | success |
//! | 2    | argument parse failure (reported by clap) |
//! | 10   | generation failed: bad dimensions, panicked worker |
//! | 11   | reading a config or writing a snapshot failed |
//! | 12   | bad user input: unknown name, bad tile layout, malformed config |
//! | 13   | JSON output could not be produced |

use thiserror::Error;
use wgen_core::WorldError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    World(WorldError),

    #[error("{0}")]
    Io(String),

    #[error("{0}")]
    Input(String),

    #[error("cannot encode output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::World(_) => 10,
            Self::Io(_) => 11,
            Self::Input(_) => 12,
            Self::Serialization(_) => 13,
        }
    }
}

/// Sorts world errors by who has to act: the filesystem, the user, or the
/// generator itself.
impl From<WorldError> for CliError {
    fn from(err: WorldError) -> Self {
        match err {
            WorldError::Io(msg) => Self::Io(msg),
            input @ (WorldError::UnknownMode(_)
            | WorldError::UnknownColorMap(_)
            | WorldError::InvalidTileLayout
            | WorldError::InvalidConfig(_)) => Self::Input(input.to_string()),
            other => Self::World(other),
        }
    }
}
