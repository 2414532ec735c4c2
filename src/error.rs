//! Error taxonomy for tree decoding, extraction, and output.
//!
//! Unknown types never reach this module: they degrade into raw literals
//! in the rendered output instead.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed parse tree: {0}")]
    Tree(#[from] serde_json::Error),

    #[error("unknown parameter direction {direction} for parameter `{parameter}` in {protocol}::{method}")]
    UnknownDirection {
        direction: i64,
        protocol: String,
        method: String,
        parameter: String,
    },

    #[error("failed to serialize protocol {protocol}")]
    Json {
        protocol: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown format: {0}. Use markdown or json")]
    UnknownFormat(String),

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
