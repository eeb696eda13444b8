use thiserror::Error;

/// Recoverable failures of the buffer encoding.
///
/// Out-of-range bit indices are not represented here: they are contract
/// violations and panic instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BitmapError {
    /// The caller supplied buffer cannot hold (or does not contain) the
    /// encoded bitmap.
    #[error("buffer too small: {needed} bytes needed, {available} available")]
    BufferTooSmall {
        /// Number of bytes the operation requires.
        needed: usize,
        /// Number of bytes the buffer actually provides.
        available: usize,
    },
}

/// Shorthand for results returned by this crate.
pub type Result<T> = core::result::Result<T, BitmapError>;
