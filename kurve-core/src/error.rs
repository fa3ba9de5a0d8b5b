use std::path::PathBuf;

use thiserror::Error;

use crate::layout::Field;

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("process not found")]
    ProcessNotFound,

    #[error("read memory failed")]
    ReadMemoryFailed,

    #[error("empty input")]
    EmptyInput,

    #[error("malformed dump: expected {expected} values, found {found}")]
    MalformedDump { expected: usize, found: usize },
}

impl DumpError {
    /// The line shown to the user for failures reported by scanmem itself.
    ///
    /// Returns `None` for failures that are a problem with the dump rather than with the game.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            DumpError::ProcessNotFound => Some("Process not found. Is the game running?"),
            DumpError::ReadMemoryFailed => {
                Some("Read memory failed. Maybe the game is currently starting.")
            }
            DumpError::EmptyInput => Some("Empty input on stdin. Is the game running?"),
            DumpError::MalformedDump { .. } => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("array order lists {0} more than once")]
    DuplicateField(Field),

    #[error("array order needs exactly 3 fields, got {0}")]
    WrongFieldCount(usize),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("stride must be between {min} and {max} bytes, got {stride}")]
    StrideOutOfRange { stride: usize, min: usize, max: usize },

    #[error("player arrays at {base_address:#x} with stride {stride} run past the end of the address space")]
    RegionOutOfRange { base_address: u64, stride: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}

#[derive(Debug, Error)]
pub enum ScanmemError {
    #[error("unable to start {program:?}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("scanmem exited with {0}")]
    Failed(std::process::ExitStatus),
}

pub type Result<T, E = DumpError> = std::result::Result<T, E>;
