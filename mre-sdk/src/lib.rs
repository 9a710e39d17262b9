#![warn(missing_docs)]

//! Safe, mod-facing bindings over the `mre-runtime` C ABI. A mod is a
//! `cdylib` crate that depends on this crate and on [`macros`] for its
//! `define_mod!` entry point; nothing here talks to the host VM directly —
//! every call crosses into the already-loaded `mre-runtime` shared library
//! through the raw externs in [`ffi`] and comes back translated into an
//! [`AerError`].

mod ffi;

pub mod config;
pub mod instance;
pub mod listener;
pub mod local;
pub mod object;
pub mod save;
pub mod surface;

pub use listener::{Chain, EventKind};
pub use object::ObjectBuilder;

/// The lifecycle/registration callback struct a mod's `define_mod!`
/// invocation (see [`macros`]) builds and returns. Re-exported here so a
/// mod crate only ever needs to depend on `mre-sdk` directly.
pub use mre_common::ffi::{
    ModCallbacks, ModConstructorFn, ModDestructorFn, ModGameLoadFn, ModGamePauseFn, ModGameSaveFn, ModGameStepFn,
    ModLocalDestructorFn, ModRoomEndFn, ModRoomStartFn, RegisterFontsFn, RegisterObjectsFn, RegisterObjectListenersFn,
    RegisterSpritesFn,
};
pub use macros::define_mod;

use std::ffi::CString;

use thiserror::Error;

/// The mod-facing error taxonomy, a straight translation of
/// `mre_common::ErrorCode` across the ABI boundary (the enum itself isn't
/// shared directly since a mod crate only links against `mre-sdk`, not
/// `mre-common`'s error module, at the ABI layer).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AerError {
    /// A required argument was null, or a string argument wasn't valid
    /// UTF-8/couldn't round-trip through a C string.
    #[error("null or invalid argument")]
    NullArgument,
    /// The call is not legal in the MRE's current lifecycle stage.
    #[error("sequence break: operation not legal right now")]
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

/// Result alias used throughout this crate's safe surface.
pub type AerResult<T> = Result<T, AerError>;

fn raw_error() -> AerError {
    match unsafe { ffi::aer_last_error() } {
        1 => AerError::NullArgument,
        2 => AerError::SequenceBreak,
        3 => AerError::OutOfMemory,
        4 => AerError::FailedLookup,
        5 => AerError::FailedParse,
        6 => AerError::BadFile,
        7 => AerError::BadValue,
        _ => AerError::BadValue,
    }
}

fn cstring(s: &str) -> AerResult<CString> {
    CString::new(s).map_err(|_| AerError::NullArgument)
}

/// Reads a bounded C string out of a `(probe, fill)` pair of raw calls:
/// `probe` is called with a null buffer to learn the required length,
/// then `fill` is called once with a correctly sized buffer. Mirrors the
/// ABI's "`buf_len = 0` to probe" convention used by every string-valued
/// getter.
fn read_probed_string(call: impl Fn(*mut std::os::raw::c_char, u32) -> i32) -> AerResult<String> {
    let needed = call(std::ptr::null_mut(), 0);
    if needed < 0 {
        return Err(raw_error());
    }
    let len = needed as usize;
    let mut buf = vec![0u8; len + 1];
    let written = call(buf.as_mut_ptr() as *mut std::os::raw::c_char, (len + 1) as u32);
    if written < 0 {
        return Err(raw_error());
    }
    buf.truncate(len);
    String::from_utf8(buf).map_err(|_| AerError::BadValue)
}

/// Reads a bounded `u32` id list out of a `(probe, fill)` pair of raw
/// calls, the numeric-buffer counterpart of [`read_probed_string`].
fn read_probed_ids(call: impl Fn(*mut u32, u32) -> i32) -> AerResult<Vec<u32>> {
    let count = call(std::ptr::null_mut(), 0);
    if count < 0 {
        return Err(raw_error());
    }
    let mut buf = vec![0u32; count as usize];
    if count > 0 {
        let written = call(buf.as_mut_ptr(), count as u32);
        if written < 0 {
            return Err(raw_error());
        }
    }
    Ok(buf)
}
