//! Crate-wide error types for the few genuinely fallible operations.
//!
//! Malformed FEN and untrusted moves use boolean/sentinel returns by design
//! (see `board::FenError` for the one exception that still needed a typed
//! variant set); the only resource failure in the core is transposition
//! table allocation, surfaced here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TtError {
    #[error(
        "requested transposition table size of {requested_mb} MB is too small to hold a single bucket"
    )]
    TooSmall { requested_mb: usize },
}
