//! Deque-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during deque operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DequeError {
    /// A checked access or positional operation named an index outside the
    /// live range.
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Number of live elements at the time of the request.
        len: usize,
    },
    /// The memory provider refused a block or map allocation.
    AllocationFailed {
        /// Size of the refused allocation in bytes.
        requested_bytes: usize,
    },
    /// The requested capacity does not fit in `usize`.
    CapacityOverflow,
    /// A [`DequeConfig`](crate::DequeConfig) failed validation.
    InvalidConfig {
        /// Which constraint was violated.
        reason: String,
    },
}

impl fmt::Display for DequeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for deque of length {len}")
            }
            Self::AllocationFailed { requested_bytes } => {
                write!(f, "allocation of {requested_bytes} bytes failed")
            }
            Self::CapacityOverflow => write!(f, "capacity overflow"),
            Self::InvalidConfig { reason } => write!(f, "invalid deque config: {reason}"),
        }
    }
}

impl Error for DequeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_index_and_len() {
        let err = DequeError::OutOfRange { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "index 7 out of range for deque of length 3"
        );
    }

    #[test]
    fn allocation_failure_message() {
        let err = DequeError::AllocationFailed {
            requested_bytes: 4096,
        };
        assert_eq!(err.to_string(), "allocation of 4096 bytes failed");
    }
}
