//! Instance enumeration, lifecycle and scalar property access
//! (SPEC_FULL.md §4.5, §4.9).

use std::os::raw::c_void;

use crate::{cstring, ffi, raw_error, read_probed_ids, AerResult};

/// A live VM instance's stable id. Safe to retain across steps; not safe
/// to dereference directly — every operation goes back through the MRE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instance(pub u32);

/// Every instance in the current room.
pub fn all() -> AerResult<Vec<Instance>> {
    read_probed_ids(|buf, len| unsafe { ffi::aer_instance_get_all(buf, len) }).map(wrap_all)
}

/// Every instance of `object_index`, optionally including instances of
/// its transitive descendants.
pub fn by_object(object_index: u32, recursive: bool) -> AerResult<Vec<Instance>> {
    read_probed_ids(|buf, len| unsafe { ffi::aer_instance_get_by_object(object_index, recursive as i32, buf, len) })
        .map(wrap_all)
}

fn wrap_all(ids: Vec<u32>) -> Vec<Instance> {
    ids.into_iter().map(Instance).collect()
}

/// Recovers the stable id for a raw VM instance pointer, as handed to a
/// mod listener in its `target`/`other` argument.
///
/// # Safety
/// `ptr` must either be null or a valid VM instance pointer for the
/// duration of the call (i.e. called from within the listener it was
/// handed to).
pub unsafe fn from_raw(ptr: *mut c_void) -> AerResult<Instance> {
    match ffi::aer_instance_id_of(ptr) {
        u32::MAX => Err(raw_error()),
        id => Ok(Instance(id)),
    }
}

/// Creates a fresh instance of `object_index` at `(x, y)`.
pub fn create(object_index: i32, x: f64, y: f64) -> AerResult<Instance> {
    let id = unsafe { ffi::aer_instance_create(object_index, x, y) };
    if id == u32::MAX {
        Err(raw_error())
    } else {
        Ok(Instance(id))
    }
}

impl Instance {
    /// Destroys this instance, optionally running its destroy event first.
    pub fn destroy(self, run_event: bool) -> AerResult<()> {
        let ok = unsafe { ffi::aer_instance_destroy(self.0, run_event as i32) };
        if ok == 0 {
            Err(raw_error())
        } else {
            Ok(())
        }
    }

    /// Reclassifies this instance as `object_index`.
    pub fn change(self, object_index: i32, run_event: bool) -> AerResult<()> {
        let ok = unsafe { ffi::aer_instance_change(self.0, object_index, run_event as i32) };
        if ok == 0 {
            Err(raw_error())
        } else {
            Ok(())
        }
    }

    /// `true` if this instance's class is `object_index` or a transitive
    /// descendant of it.
    pub fn is_compatible_with(self, object_index: u32) -> AerResult<bool> {
        match unsafe { ffi::aer_instance_is_compatible_with(self.0, object_index) } {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(raw_error()),
        }
    }

    /// One scalar instance property (SPEC_FULL.md §4.9).
    pub fn get_property(self, property: Property) -> AerResult<f64> {
        let mut out = 0.0;
        let ok = unsafe { ffi::aer_instance_get_property(self.0, property as i32, &mut out) };
        if ok == 0 {
            Err(raw_error())
        } else {
            Ok(out)
        }
    }

    /// Writes one scalar instance property.
    pub fn set_property(self, property: Property, value: f64) -> AerResult<()> {
        let ok = unsafe { ffi::aer_instance_set_property(self.0, property as i32, value) };
        if ok == 0 {
            Err(raw_error())
        } else {
            Ok(())
        }
    }

    /// Reads this instance's alarm countdown at `index` (0..12).
    pub fn get_alarm(self, index: u32) -> AerResult<i32> {
        let mut out = 0;
        let ok = unsafe { ffi::aer_instance_get_alarm(self.0, index, &mut out) };
        if ok == 0 {
            Err(raw_error())
        } else {
            Ok(out)
        }
    }

    /// Sets this instance's alarm countdown at `index`; a negative value
    /// disarms it.
    pub fn set_alarm(self, index: u32, value: i32) -> AerResult<()> {
        let ok = unsafe { ffi::aer_instance_set_alarm(self.0, index, value) };
        if ok == 0 {
            Err(raw_error())
        } else {
            Ok(())
        }
    }

    /// Resolves `name` against this instance's VM-owned local table,
    /// bypassing the MRE's own mod-local store (SPEC_FULL.md §4.5, "VM
    /// locals"). The returned pointer is opaque VM state; the MRE never
    /// interprets its contents.
    ///
    /// # Safety
    /// The returned pointer, if non-null, is valid only for as long as
    /// this instance lives and must be interpreted with the host's own
    /// local-variable layout.
    pub unsafe fn get_vm_local(self, name: &str) -> AerResult<*mut c_void> {
        let cname = cstring(name)?;
        let ptr = ffi::aer_instance_get_vm_local(self.0, cname.as_ptr());
        if ptr.is_null() {
            Err(raw_error())
        } else {
            Ok(ptr)
        }
    }
}

/// A queryable/settable scalar instance property (SPEC_FULL.md §4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Property {
    /// World x position.
    X = 0,
    /// World y position.
    Y = 1,
    /// Scalar motion speed.
    Speed = 2,
    /// Motion direction, degrees.
    Direction = 3,
    /// Horizontal speed component.
    HSpeed = 4,
    /// Vertical speed component.
    VSpeed = 5,
    /// Active sprite index.
    SpriteIndex = 6,
    /// Current animation frame.
    ImageIndex = 7,
    /// Draw depth.
    Depth = 8,
    /// Visibility flag.
    Visible = 9,
    /// Collision-participation flag.
    Solid = 10,
    /// Room-survival flag.
    Persistent = 11,
}
