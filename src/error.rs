//! Error type returned by [`crate::encode`].
use core::fmt;

/// Failure modes of the encoding pipeline.
///
/// These are the only two points in the pipeline that can fail on valid
/// (even if pathological) caller input; see the crate documentation for
/// details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    /// The payload does not fit into any symbol size allowed by the
    /// requested [`crate::CodeForm`], or a Base256 run would need a
    /// length encoding longer than two bytes (run length > 1555).
    OutOfSpace,
    /// Internal error: the Reed-Solomon module has no generator
    /// polynomial for the requested block size.
    ///
    /// This can only happen if [`crate::symbol_size`] produces a
    /// `reedSolomonPerBlock` value outside the fixed table, which would
    /// be a bug in this crate rather than a property of the input.
    /// Treat it the same way as [`EncodingError::OutOfSpace`].
    InvalidBlockSize,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::OutOfSpace => {
                write!(f, "data does not fit into any allowed symbol size")
            }
            EncodingError::InvalidBlockSize => {
                write!(f, "no Reed-Solomon generator for this block size")
            }
        }
    }
}

impl std::error::Error for EncodingError {}
