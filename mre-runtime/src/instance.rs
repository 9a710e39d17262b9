//! The instance manager (SPEC_FULL.md §4.5): a uniform view over VM-owned
//! instances, plus the MRE-owned mod-local key/value store layered on top
//! of it.

use std::collections::HashMap;
use std::os::raw::c_void;

use mre_common::ffi::{ModLocalDestructorFn, VmInstance};
use mre_common::value::PrimitiveValue;
use mre_common::{ErrorCode, MreResult, MOD_LOCAL_NAME_MAX, MOD_NULL};

use crate::hostbind::HostBinding;
use crate::objecttree::ObjectTree;

/// Enumeration, identity, creation/destruction/reclassification, and
/// compatibility queries over VM-owned instances. Holds no state of its
/// own — every method reads straight through [`HostBinding`].
#[derive(Default)]
pub struct InstanceManager;

impl InstanceManager {
    /// Every instance in the current room, in room-list order.
    pub fn get_all(&self, host: &HostBinding) -> MreResult<Vec<u32>> {
        let globals = host.globals_ref()?;
        Ok(unsafe { self.room_list(globals.instance_list_head as *mut VmInstance) }
            .into_iter()
            .map(|inst| unsafe { (*inst).id })
            .collect())
    }

    /// Every instance belonging to `object_index`, and — if `recursive` —
    /// also every instance belonging to one of its transitive descendants
    /// per `tree` (SPEC_FULL.md §4.5, "Enumeration").
    pub fn get_by_object(
        &self,
        host: &HostBinding,
        tree: &ObjectTree,
        object_index: u32,
        recursive: bool,
    ) -> MreResult<Vec<u32>> {
        let globals = host.globals_ref()?;
        let mut wanted = vec![object_index];
        if recursive {
            wanted.extend(tree.transitive_descendants(object_index).iter().map(|(d, _)| *d));
        }

        Ok(unsafe { self.room_list(globals.instance_list_head as *mut VmInstance) }
            .into_iter()
            .filter(|inst| wanted.contains(&unsafe { (**inst).object_index as u32 }))
            .map(|inst| unsafe { (*inst).id })
            .collect())
    }

    /// Resolves `id` to a live instance pointer, valid for the duration of
    /// the current host callback. `None` if no instance in the current
    /// room has that id.
    ///
    /// The host's own instance hash table is opaque to the MRE (its bucket
    /// layout is VM-internal), so resolution is a linear scan of the
    /// current room's list, matching the simplification already made for
    /// `instance_get_local`.
    pub fn get_by_id(&self, host: &HostBinding, id: u32) -> MreResult<*mut VmInstance> {
        let globals = host.globals_ref()?;
        unsafe { self.room_list(globals.instance_list_head as *mut VmInstance) }
            .into_iter()
            .find(|inst| unsafe { (**inst).id } == id)
            .ok_or(ErrorCode::FailedLookup)
    }

    /// Reads the stable id out of a live instance pointer.
    ///
    /// # Safety
    /// `ptr` must be a valid, currently-live instance pointer.
    pub unsafe fn get_id(&self, ptr: *mut VmInstance) -> u32 {
        (*ptr).id
    }

    /// Creates a fresh instance of `object_index` at `(x, y)`.
    pub fn create(&self, host: &HostBinding, object_index: i32, x: f64, y: f64) -> MreResult<u32> {
        host.instance_create(object_index, x, y)
    }

    /// Destroys `instance_id`, optionally running its destroy event first.
    pub fn destroy(&self, host: &HostBinding, instance_id: u32, run_event: bool) -> MreResult<()> {
        host.instance_destroy(instance_id, run_event)
    }

    /// Reclassifies `instance_id` as `object_index`.
    pub fn change(
        &self,
        host: &HostBinding,
        instance_id: u32,
        object_index: i32,
        run_event: bool,
    ) -> MreResult<()> {
        host.instance_change(instance_id, object_index, run_event)
    }

    /// `true` if `instance`'s object class is `object` itself or a
    /// transitive descendant of it (SPEC_FULL.md §4.5, "Compatibility
    /// test").
    pub fn is_compatible_with(
        &self,
        host: &HostBinding,
        tree: &ObjectTree,
        instance_id: u32,
        object_index: u32,
    ) -> MreResult<bool> {
        let instance = self.get_by_id(host, instance_id)?;
        let actual = unsafe { (*instance).object_index as u32 };
        Ok(tree.is_ancestor_or_self(object_index, actual))
    }

    /// Resolves `name` against `instance`'s VM-owned local table.
    ///
    /// # Safety
    /// `instance` must be a valid, currently-live instance pointer.
    pub unsafe fn get_vm_local(
        &self,
        host: &HostBinding,
        instance: *mut c_void,
        name: &str,
    ) -> MreResult<*mut c_void> {
        let cname = std::ffi::CString::new(name).map_err(|_| ErrorCode::BadValue)?;
        host.instance_get_local(instance, &cname)
    }

    unsafe fn room_list(&self, head: *mut VmInstance) -> Vec<*mut VmInstance> {
        let mut out = Vec::new();
        let mut cur = head;
        while !cur.is_null() {
            out.push(cur);
            cur = (*cur).next;
        }
        out
    }
}

/// `(mod namespace, instance id, name)` — the mod-local key (SPEC_FULL.md
/// §3, "Mod-local key"). `namespace` is [`MOD_NULL`] for a public local,
/// the owning mod's index for a private one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ModLocalKey {
    namespace: u32,
    instance_id: u32,
    name: String,
}

struct ModLocalEntry {
    value: PrimitiveValue,
    destructor: Option<ModLocalDestructorFn>,
}

/// The MRE-owned per-instance key/value store layered outside the VM's own
/// local-variable table.
#[derive(Default)]
pub struct ModLocalStore {
    entries: HashMap<ModLocalKey, ModLocalEntry>,
}

impl ModLocalStore {
    /// Creates or overwrites a mod-local. `public` selects the [`MOD_NULL`]
    /// namespace over the caller's own. Fails with [`ErrorCode::BadValue`]
    /// if `name` exceeds [`MOD_LOCAL_NAME_MAX`] bytes.
    pub fn set(
        &mut self,
        mod_index: u32,
        instance_id: u32,
        name: &str,
        public: bool,
        value: PrimitiveValue,
        destructor: Option<ModLocalDestructorFn>,
    ) -> MreResult<()> {
        if name.len() > MOD_LOCAL_NAME_MAX {
            return Err(ErrorCode::BadValue);
        }
        let key = ModLocalKey {
            namespace: if public { MOD_NULL } else { mod_index },
            instance_id,
            name: name.to_string(),
        };
        // Overwriting an existing local does not run its previous
        // destructor; only explicit deletion and orphan pruning do
        // (SPEC_FULL.md §4.5 documents destructor invocation only for
        // those two paths).
        self.entries.insert(key, ModLocalEntry { value, destructor });
        Ok(())
    }

    /// Reads a mod-local's value.
    pub fn get(&self, mod_index: u32, instance_id: u32, name: &str, public: bool) -> MreResult<&PrimitiveValue> {
        let key = ModLocalKey {
            namespace: if public { MOD_NULL } else { mod_index },
            instance_id,
            name: name.to_string(),
        };
        self.entries.get(&key).map(|e| &e.value).ok_or(ErrorCode::FailedLookup)
    }

    /// Removes a mod-local. If `run_destructor`, invokes its destructor
    /// (if any) first, passing the pointer payload if it held one.
    pub fn delete(
        &mut self,
        mod_index: u32,
        instance_id: u32,
        name: &str,
        public: bool,
        run_destructor: bool,
    ) -> MreResult<()> {
        let key = ModLocalKey {
            namespace: if public { MOD_NULL } else { mod_index },
            instance_id,
            name: name.to_string(),
        };
        let entry = self.entries.remove(&key).ok_or(ErrorCode::FailedLookup)?;
        if run_destructor {
            invoke_destructor(&entry);
        }
        Ok(())
    }

    /// Scans every mod-local key and removes those whose instance no
    /// longer resolves in the VM's current room, running each removed
    /// entry's destructor in encounter order (SPEC_FULL.md §4.5, "Orphan
    /// pruning").
    pub fn prune_orphans(&mut self, host: &HostBinding, manager: &InstanceManager) -> MreResult<usize> {
        let live: std::collections::HashSet<u32> = manager
            .get_all(host)
            .unwrap_or_default()
            .into_iter()
            .collect();

        let orphaned: Vec<ModLocalKey> = self
            .entries
            .keys()
            .filter(|key| !live.contains(&key.instance_id))
            .cloned()
            .collect();

        let count = orphaned.len();
        for key in orphaned {
            if let Some(entry) = self.entries.remove(&key) {
                invoke_destructor(&entry);
            }
        }
        Ok(count)
    }

    /// Number of mod-locals currently stored, across every instance and
    /// namespace. Exposed for tests and diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn invoke_destructor(entry: &ModLocalEntry) {
    if let Some(destructor) = entry.destructor {
        let ptr = match &entry.value {
            PrimitiveValue::Ptr(p) => p.as_ptr(),
            _ => std::ptr::null_mut(),
        };
        unsafe { destructor(ptr) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_over_bound_is_rejected() {
        let mut store = ModLocalStore::default();
        let name = "a".repeat(MOD_LOCAL_NAME_MAX + 1);
        let err = store
            .set(0, 1, &name, false, PrimitiveValue::Bool(true), None)
            .unwrap_err();
        assert_eq!(err, ErrorCode::BadValue);
    }

    #[test]
    fn private_and_public_namespaces_do_not_collide() {
        let mut store = ModLocalStore::default();
        store.set(0, 1, "hp", false, PrimitiveValue::Int(10), None).unwrap();
        store.set(1, 1, "hp", false, PrimitiveValue::Int(20), None).unwrap();
        store.set(0, 1, "hp", true, PrimitiveValue::Int(99), None).unwrap();

        assert!(matches!(store.get(0, 1, "hp", false), Ok(PrimitiveValue::Int(10))));
        assert!(matches!(store.get(1, 1, "hp", false), Ok(PrimitiveValue::Int(20))));
        assert!(matches!(store.get(0, 1, "hp", true), Ok(PrimitiveValue::Int(99))));
    }

    #[test]
    fn delete_without_destructor_flag_skips_it() {
        static mut CALLED: bool = false;
        unsafe extern "C" fn mark(_ptr: *mut c_void) {
            unsafe {
                CALLED = true;
            }
        }

        let mut store = ModLocalStore::default();
        store
            .set(0, 1, "hp", false, PrimitiveValue::Int(10), Some(mark))
            .unwrap();
        store.delete(0, 1, "hp", false, false).unwrap();
        assert!(!unsafe { CALLED });
    }

    #[test]
    fn missing_local_is_failed_lookup() {
        let store = ModLocalStore::default();
        let err = store.get(0, 1, "hp", false).unwrap_err();
        assert_eq!(err, ErrorCode::FailedLookup);
    }
}
