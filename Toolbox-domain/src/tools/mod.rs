// Stateless text tools
pub mod encoder;
pub mod karaoke;

use thiserror::Error;

pub use encoder::{decode, encode, EncodingKind};
pub use karaoke::{karaoke_search_url, KARAOKE_SEARCH_PREFIX};

/// Errors produced by the text tools
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Could not decode the provided text: {0}")]
    Decode(String),

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),
}
