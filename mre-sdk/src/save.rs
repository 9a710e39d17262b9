//! Typed save-data accessors (SPEC_FULL.md §4.6). Only `f64` and `String`
//! scalars survive a save/load round trip; call these from a mod's
//! `game_save`/`game_load` listeners.

use crate::{cstring, ffi, raw_error, read_probed_string, AerResult};

/// Records `key -> value` as a double scalar for the calling mod.
pub fn set_double(key: &str, value: f64) -> AerResult<()> {
    let key = cstring(key)?;
    let ok = unsafe { ffi::aer_save_set_double(key.as_ptr(), value) };
    if ok == 0 {
        Err(raw_error())
    } else {
        Ok(())
    }
}

/// Records `key -> value` as a string scalar for the calling mod.
pub fn set_string(key: &str, value: &str) -> AerResult<()> {
    let key = cstring(key)?;
    let value = cstring(value)?;
    let ok = unsafe { ffi::aer_save_set_string(key.as_ptr(), value.as_ptr()) };
    if ok == 0 {
        Err(raw_error())
    } else {
        Ok(())
    }
}

/// Reads back a double-valued savedata entry.
pub fn get_double(key: &str) -> AerResult<f64> {
    let key = cstring(key)?;
    let mut out = 0.0;
    let ok = unsafe { ffi::aer_save_get_double(key.as_ptr(), &mut out) };
    if ok == 0 {
        Err(raw_error())
    } else {
        Ok(out)
    }
}

/// Reads back a string-valued savedata entry.
pub fn get_string(key: &str) -> AerResult<String> {
    let key = cstring(key)?;
    read_probed_string(|buf, len| unsafe { ffi::aer_save_get_string(key.as_ptr(), buf, len) })
}
