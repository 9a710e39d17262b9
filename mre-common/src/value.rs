//! Value types shared by the mod-local store, the save hook and the config
//! reader. `PrimitiveValue` mirrors the host VM's tagged-union primitive
//! byte-for-byte (SPEC_FULL.md §9, "Global variant/primitive type");
//! `SaveScalar` and `ConfigValue` are MRE-owned, not VM-owned, so they are
//! ordinary Rust enums.

use std::cell::Cell;
use std::rc::Rc;

/// A reference-counted wrapper around a raw host pointer, mirroring the
/// VM's own refcounted pointer primitive. Incrementing/decrementing the
/// count is how the MRE participates in the VM's `primitivePointerCopy`
/// hook (SPEC_FULL.md §6) without owning the pointee.
#[derive(Debug, Clone)]
pub struct PointerValue {
    ptr: *mut std::ffi::c_void,
    refcount: Rc<Cell<u32>>,
}

impl PointerValue {
    /// Wraps a raw pointer with a fresh refcount of 1.
    ///
    /// # Safety
    /// `ptr` must either be null or point into memory the host VM owns for
    /// at least as long as this wrapper (and any clone of it) is alive.
    pub unsafe fn new(ptr: *mut std::ffi::c_void) -> Self {
        Self {
            ptr,
            refcount: Rc::new(Cell::new(1)),
        }
    }

    /// The wrapped raw pointer.
    pub fn as_ptr(&self) -> *mut std::ffi::c_void {
        self.ptr
    }

    /// Current refcount. Exposed for tests; the count is otherwise only
    /// observed implicitly through clone/drop.
    pub fn refcount(&self) -> u32 {
        self.refcount.get()
    }

    /// Called from the host's `primitivePointerCopy` hook: increments the
    /// refcount without cloning the underlying pointee.
    pub fn retain(&self) {
        self.refcount.set(self.refcount.get() + 1);
    }
}

impl Drop for PointerValue {
    fn drop(&mut self) {
        let count = self.refcount.get();
        if count > 0 {
            self.refcount.set(count - 1);
        }
    }
}

/// The VM's 64-bit tagged primitive, used for mod-locals and (conceptually)
/// VM instance locals.
#[derive(Debug, Clone)]
pub enum PrimitiveValue {
    /// Boolean primitive.
    Bool(bool),
    /// Signed integer primitive.
    Int(i64),
    /// Unsigned integer primitive.
    UInt(u64),
    /// Single-precision float primitive.
    Float(f32),
    /// Double-precision float primitive.
    Double(f64),
    /// Refcounted pointer primitive.
    Ptr(PointerValue),
}

/// Scalars preserved across a save/load round trip (SPEC_FULL.md §4.6, §6).
/// Per spec, integers are not preserved as integers: only `f64` and
/// `String` survive the round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveScalar {
    /// A double-precision scalar.
    Double(f64),
    /// A heap-copied string scalar.
    Str(String),
}

/// A single leaf value from the TOML config tree (SPEC_FULL.md §4.7).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// `true`/`false`.
    Bool(bool),
    /// Signed 64-bit integer.
    Int(i64),
    /// Double-precision float.
    Double(f64),
    /// A string.
    Str(String),
    /// An array of config values. An empty TOML array is represented as
    /// `Array(vec![])`, the "null-placeholder-for-empty-array" case.
    Array(Vec<ConfigValue>),
}

impl ConfigValue {
    /// Reads this value as a bool, failing parse if it is not one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Reads this value as a signed integer, failing parse if it is not one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Reads this value as a double, failing parse if it is not one.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            ConfigValue::Double(d) => Some(*d),
            ConfigValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Reads this value as a string slice, failing parse if it is not one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Reads this value as an array slice, failing parse if it is not one.
    pub fn as_array(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Array(a) => Some(a.as_slice()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_value_retain_and_drop_adjust_refcount() {
        let mut data = 0u8;
        let ptr = unsafe { PointerValue::new((&mut data) as *mut u8 as *mut std::ffi::c_void) };
        assert_eq!(ptr.refcount(), 1);

        ptr.retain();
        assert_eq!(ptr.refcount(), 2);

        let clone = ptr.clone();
        drop(clone);
        assert_eq!(ptr.refcount(), 1);
    }

    #[test]
    fn config_value_conversions() {
        assert_eq!(ConfigValue::Int(3).as_double(), Some(3.0));
        assert_eq!(ConfigValue::Bool(true).as_bool(), Some(true));
        assert_eq!(ConfigValue::Str("hi".into()).as_str(), Some("hi"));
        assert!(ConfigValue::Bool(true).as_int().is_none());
    }
}
