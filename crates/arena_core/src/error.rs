use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = ArenaError> = std::result::Result<T, E>;

/// Failures at the configuration boundary. Match simulation itself never
/// produces an error; degenerate numeric state is clamped where it occurs.
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("failed to read config at {path}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    ConfigParse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("no fighter with id {0} in roster")]
    UnknownFighter(u32),
    #[error("fighter {0} is entered more than once")]
    DuplicateFighter(u32),
}
