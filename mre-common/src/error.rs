//! The closed error taxonomy from SPEC_FULL.md §7, modeled the way
//! `rs-zephyr-env::error::HostError` models the Zephyr host's error set:
//! one `thiserror` enum, one variant per failure class, no catch-all.

use thiserror::Error;

/// A single thread-local error word is set by every public MRE call. `Ok`
/// is represented by `Result::Ok`, not a variant of this enum — the
/// taxonomy only names the seven failure classes a caller can observe.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A required argument was a null pointer.
    #[error("null argument")]
    NullArgument,

    /// The call is not legal in the MRE's current lifecycle stage.
    #[error("sequence break: operation not legal in current stage")]
    SequenceBreak,

    /// An allocation failed.
    #[error("out of memory")]
    OutOfMemory,

    /// An id, name, or slot did not resolve to anything.
    #[error("failed lookup")]
    FailedLookup,

    /// A value was present but of the wrong type.
    #[error("failed parse: value present but wrong type")]
    FailedParse,

    /// I/O or decode failure reading a file.
    #[error("bad file")]
    BadFile,

    /// A value was out of range, or a buffer/string exceeded its bound.
    #[error("bad value")]
    BadValue,
}

/// Result alias used throughout the MRE for operations that report through
/// the [`ErrorCode`] taxonomy rather than a free-form `anyhow::Error`.
pub type MreResult<T> = Result<T, ErrorCode>;
