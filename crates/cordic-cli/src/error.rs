//! Error types for cordicctl

use cordic_link::LinkError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid session step: {0}")]
    InvalidStep(String),

    #[error("Invalid hex byte: {0}")]
    InvalidHex(String),

    #[error("Link error: {0}")]
    Link(#[from] LinkError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidStep(_) | Self::InvalidHex(_) => 2,
            Self::Link(_) => 3,
        }
    }
}
