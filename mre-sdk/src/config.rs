//! Typed config reads (SPEC_FULL.md §4.7). Every read is implicitly
//! scoped to the calling mod's own `<modname>.*` namespace.

use crate::{cstring, ffi, raw_error, read_probed_string, AerResult};

/// Reads `key` as a bool.
pub fn get_bool(key: &str) -> AerResult<bool> {
    let key = cstring(key)?;
    let mut out = 0i32;
    let ok = unsafe { ffi::aer_config_get_bool(key.as_ptr(), &mut out) };
    if ok == 0 {
        Err(raw_error())
    } else {
        Ok(out != 0)
    }
}

/// Reads `key` as a signed integer.
pub fn get_int(key: &str) -> AerResult<i64> {
    let key = cstring(key)?;
    let mut out = 0i64;
    let ok = unsafe { ffi::aer_config_get_int(key.as_ptr(), &mut out) };
    if ok == 0 {
        Err(raw_error())
    } else {
        Ok(out)
    }
}

/// Reads `key` as a double.
pub fn get_double(key: &str) -> AerResult<f64> {
    let key = cstring(key)?;
    let mut out = 0.0;
    let ok = unsafe { ffi::aer_config_get_double(key.as_ptr(), &mut out) };
    if ok == 0 {
        Err(raw_error())
    } else {
        Ok(out)
    }
}

/// Reads `key` as a string.
pub fn get_string(key: &str) -> AerResult<String> {
    let key = cstring(key)?;
    read_probed_string(|buf, len| unsafe { ffi::aer_config_get_string(key.as_ptr(), buf, len) })
}
