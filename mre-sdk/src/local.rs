//! Typed mod-local accessors (SPEC_FULL.md §4.5, "Mod-locals"): MRE-owned
//! per-instance key/value state layered outside the VM's own local table.

use std::os::raw::c_void;

use mre_common::ffi::ModLocalDestructorFn;
use mre_common::MOD_LOCAL_NAME_MAX;

use crate::instance::Instance;
use crate::{cstring, ffi, raw_error, AerError, AerResult};

fn check_name(name: &str) -> AerResult<()> {
    if name.len() > MOD_LOCAL_NAME_MAX {
        Err(AerError::BadValue)
    } else {
        Ok(())
    }
}

macro_rules! typed_local {
    ($mod_name:ident, $ty:ty, $setter:ident, $getter:ident, $default:expr) => {
        /// Typed mod-local accessors for this primitive kind.
        pub mod $mod_name {
            use super::*;

            /// Creates or overwrites a mod-local on `instance`.
            pub fn set(instance: Instance, name: &str, public: bool, value: $ty) -> AerResult<()> {
                check_name(name)?;
                let cname = cstring(name)?;
                let ok = unsafe { ffi::$setter(instance.0, cname.as_ptr(), public as i32, value) };
                if ok == 0 {
                    Err(raw_error())
                } else {
                    Ok(())
                }
            }

            /// Reads a mod-local off `instance`.
            pub fn get(instance: Instance, name: &str, public: bool) -> AerResult<$ty> {
                check_name(name)?;
                let cname = cstring(name)?;
                let mut out = $default;
                let ok = unsafe { ffi::$getter(instance.0, cname.as_ptr(), public as i32, &mut out) };
                if ok == 0 {
                    Err(raw_error())
                } else {
                    Ok(out)
                }
            }
        }
    };
}

typed_local!(int, i64, aer_local_set_int, aer_local_get_int, 0i64);
typed_local!(uint, u64, aer_local_set_uint, aer_local_get_uint, 0u64);
typed_local!(float, f32, aer_local_set_float, aer_local_get_float, 0.0f32);
typed_local!(double, f64, aer_local_set_double, aer_local_get_double, 0.0f64);

/// Typed mod-local accessors for booleans.
pub mod boolean {
    use super::*;

    /// Creates or overwrites a boolean mod-local on `instance`.
    pub fn set(instance: Instance, name: &str, public: bool, value: bool) -> AerResult<()> {
        check_name(name)?;
        let cname = cstring(name)?;
        let ok = unsafe { ffi::aer_local_set_bool(instance.0, cname.as_ptr(), public as i32, value as i32) };
        if ok == 0 {
            Err(raw_error())
        } else {
            Ok(())
        }
    }

    /// Reads a boolean mod-local off `instance`.
    pub fn get(instance: Instance, name: &str, public: bool) -> AerResult<bool> {
        check_name(name)?;
        let cname = cstring(name)?;
        let mut out = 0i32;
        let ok = unsafe { ffi::aer_local_get_bool(instance.0, cname.as_ptr(), public as i32, &mut out) };
        if ok == 0 {
            Err(raw_error())
        } else {
            Ok(out != 0)
        }
    }
}

/// Typed mod-local accessors for raw pointer payloads, with an optional
/// destructor run when the local is deleted (explicitly, or through
/// orphan pruning on room change).
pub mod ptr {
    use super::*;

    /// Creates or overwrites a pointer-valued mod-local on `instance`.
    ///
    /// # Safety
    /// `value` must either be null or point into memory valid for at
    /// least as long as the local lives; `destructor`, if given, must be
    /// safe to call with that pointer exactly once.
    pub unsafe fn set(
        instance: Instance,
        name: &str,
        public: bool,
        value: *mut c_void,
        destructor: Option<ModLocalDestructorFn>,
    ) -> AerResult<()> {
        check_name(name)?;
        let cname = cstring(name)?;
        let ok = ffi::aer_local_set_ptr(instance.0, cname.as_ptr(), public as i32, value, destructor);
        if ok == 0 {
            Err(raw_error())
        } else {
            Ok(())
        }
    }

    /// Reads a pointer-valued mod-local off `instance`.
    pub fn get(instance: Instance, name: &str, public: bool) -> AerResult<*mut c_void> {
        check_name(name)?;
        let cname = cstring(name)?;
        Ok(unsafe { ffi::aer_local_get_ptr(instance.0, cname.as_ptr(), public as i32) })
    }
}

/// Deletes a mod-local, optionally running its destructor.
pub fn delete(instance: Instance, name: &str, public: bool, run_destructor: bool) -> AerResult<()> {
    check_name(name)?;
    let cname = cstring(name)?;
    let ok = unsafe { ffi::aer_local_delete(instance.0, cname.as_ptr(), public as i32, run_destructor as i32) };
    if ok == 0 {
        Err(raw_error())
    } else {
        Ok(())
    }
}
