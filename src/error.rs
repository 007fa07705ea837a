//! Error types of the fallible (safe) constructors.

use thiserror::Error;

/// Errors of the checked vector constructors and memory helpers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdError {
    /// The slice does not have exactly one lane per element.
    #[error("length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The bitmask has bits set at or above the lane count.
    #[error("mask {mask:#x} has bits set beyond lane {lanes}")]
    MaskOutOfRange { mask: u64, lanes: usize },

    /// A gather/scatter index is outside the slice.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl SimdError {
    pub(crate) fn length_mismatch(expected: usize, actual: usize) -> Self {
        tracing::debug!(expected, actual, "slice length does not match the lane count");
        SimdError::LengthMismatch { expected, actual }
    }

    pub(crate) fn mask_out_of_range(mask: u64, lanes: usize) -> Self {
        tracing::debug!(mask, lanes, "mask has bits beyond the lane count");
        SimdError::MaskOutOfRange { mask, lanes }
    }

    pub(crate) fn index_out_of_bounds(index: usize, len: usize) -> Self {
        tracing::debug!(index, len, "lane index out of bounds");
        SimdError::IndexOutOfBounds { index, len }
    }
}

/// Result type alias for the checked operations.
pub type SimdResult<T> = std::result::Result<T, SimdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimdError::length_mismatch(8, 3);
        assert_eq!(err.to_string(), "length mismatch: expected 8 elements, got 3");

        let err = SimdError::mask_out_of_range(0x1f0, 8);
        assert_eq!(err.to_string(), "mask 0x1f0 has bits set beyond lane 8");

        let err = SimdError::index_out_of_bounds(9, 4);
        assert_eq!(err.to_string(), "index 9 out of bounds for length 4");
    }
}
