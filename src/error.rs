//! Error types shared by every component of the Fury runtime core.

use thiserror::Error;

/// Result alias used everywhere a fallible core operation returns.
pub type Result<T> = ::std::result::Result<T, FuryError>;

/// Error kinds produced by the buffer, class checker, and field grouper.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FuryError {
    /// A buffer access fell outside `[0, capacity)`, or an offset was negative.
    #[error("out of bounds: offset {offset} + length {length} exceeds capacity {capacity}")]
    OutOfBounds {
        /// Offset the access was attempted at.
        offset: i64,
        /// Number of bytes the access covered.
        length: i64,
        /// Capacity of the buffer at the time of the access.
        capacity: i64,
    },

    /// A varint decode ran past its 5-byte cap, or ran off the end of the buffer.
    #[error("malformed varint: read {bytes_read} bytes without a terminating byte")]
    VarintMalformed {
        /// Number of bytes consumed before decoding gave up.
        bytes_read: usize,
    },

    /// A buffer growth request was rejected by the allocator.
    #[error("allocation failure: requested capacity {requested}")]
    AllocationFailure {
        /// Capacity the buffer attempted to grow to.
        requested: usize,
    },

    /// The class checker denied a class on the write or read path.
    #[error("insecure class: `{class_name}` is not permitted by the active allow-list policy")]
    Insecure {
        /// Fully-qualified name of the denied class.
        class_name: String,
    },

    /// A caller violated a component's usage contract (null input, recursive
    /// listener mutation, malformed grouper construction).
    #[error("programmer error: {message}")]
    ProgrammerError {
        /// Description of the violated contract.
        message: String,
    },
}
