//! Errors raised at the edges of the crate.
//!
//! Window operations themselves never fail: unknown ids and bad geometry are
//! absorbed by the registry. These variants cover configuration validation
//! and the terminal host.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DesktopError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error(
        "breakpoints must be finite and strictly ascending (mobile {mobile}, medium {medium}, large {large})"
    )]
    InvalidBreakpoints { mobile: f64, medium: f64, large: f64 },

    #[error("zoom must be a finite number above zero, got {0}")]
    InvalidZoom(f64),

    #[error("cell size must be finite and positive, got {width}x{height}")]
    InvalidCellSize { width: f64, height: f64 },
}

pub type Result<T> = std::result::Result<T, DesktopError>;
