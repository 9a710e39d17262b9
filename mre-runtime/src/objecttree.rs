//! The object registry and object tree (SPEC_FULL.md §4.3).

use std::collections::HashMap;
use std::ffi::CString;

use mre_common::ffi::VmObject;
use mre_common::{ErrorCode, MreResult};

use crate::hostbind::HostBinding;

/// Object index meaning "no parent" (the VM's master class).
pub const NO_PARENT: i32 = -1;

/// A mirror of one object class's registration-time fields. The byte-exact
/// VM-owned record lives behind `HostBinding`; this is the MRE's own
/// bookkeeping copy, used for name lookups and to seed the object tree.
#[derive(Debug, Clone)]
pub struct ObjectRecord {
    /// Object name. Unique among all registered objects.
    pub name: String,
    /// Parent object index, or [`NO_PARENT`].
    pub parent: i32,
    /// Default sprite index, or `-1`.
    pub sprite: i32,
    /// Mask sprite index, or `-1`.
    pub mask: i32,
    /// Draw depth.
    pub depth: i32,
    /// Starts visible.
    pub visible: bool,
    /// Participates in collisions.
    pub collisions: bool,
    /// Survives room changes.
    pub persistent: bool,
}

/// All known object classes, vanilla and mod-registered, indexed by object
/// index.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: Vec<ObjectRecord>,
    name_to_index: HashMap<String, u32>,
}

impl ObjectRegistry {
    /// Seeds the registry with the VM's pre-existing ("vanilla") object
    /// classes, in object-index order. Called once during `init()` before
    /// any mod registration runs.
    pub fn seed_vanilla(&mut self, vanilla: Vec<ObjectRecord>) {
        for (idx, record) in vanilla.into_iter().enumerate() {
            self.name_to_index.insert(record.name.clone(), idx as u32);
            self.objects.push(record);
        }
    }

    /// Registers a new object class. Fails with [`ErrorCode::BadValue`] on
    /// a duplicate name, [`ErrorCode::FailedLookup`] on an unknown parent,
    /// sprite, or mask index (SPEC_FULL.md §4.3).
    #[allow(clippy::too_many_arguments)]
    pub fn register(
        &mut self,
        host: &mut HostBinding,
        name: &str,
        parent: i32,
        sprite: i32,
        mask: i32,
        depth: i32,
        visible: bool,
        collisions: bool,
        persistent: bool,
    ) -> MreResult<u32> {
        if self.name_to_index.contains_key(name) {
            return Err(ErrorCode::BadValue);
        }
        if parent != NO_PARENT && !self.is_valid_index(parent) {
            return Err(ErrorCode::FailedLookup);
        }
        // Sprite/mask validity is only checkable against the real sprite
        // table through `host`; callers running against a host (rather
        // than a `Mocked` registry with no sprite table at all) are
        // expected to have validated these through the pass-through
        // surface already. We still reject the obviously malformed case.
        if sprite < -1 || mask < -1 {
            return Err(ErrorCode::FailedLookup);
        }

        let index = host.object_add()? as u32;

        // The VM later frees this pointer itself; leak it deliberately so
        // ownership genuinely transfers to host-owned memory, matching
        // SPEC_FULL.md §4.3 ("duplicates the name into a heap-owned string
        // the VM later attempts to free").
        let owned_name =
            CString::new(name).map_err(|_| ErrorCode::BadValue)?.into_raw();
        unsafe {
            if let Ok(obj) = host.object_at(index) {
                (*obj).name = owned_name;
                (*obj).parent = parent;
                (*obj).sprite = sprite;
                (*obj).mask = mask;
                (*obj).depth = depth;
                (*obj).flags = flags(visible, collisions, persistent);
            }
        }

        self.name_to_index.insert(name.to_string(), index);
        self.objects.push(ObjectRecord {
            name: name.to_string(),
            parent,
            sprite,
            mask,
            depth,
            visible,
            collisions,
            persistent,
        });

        Ok(index)
    }

    /// Looks up an object's index by name.
    pub fn index_of(&self, name: &str) -> MreResult<u32> {
        self.name_to_index.get(name).copied().ok_or(ErrorCode::FailedLookup)
    }

    /// Number of registered objects (vanilla + mod).
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the registry has no objects at all.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Fetches an object record by index.
    pub fn get(&self, index: u32) -> Option<&ObjectRecord> {
        self.objects.get(index as usize)
    }

    fn is_valid_index(&self, index: i32) -> bool {
        index >= 0 && (index as usize) < self.objects.len()
    }

    /// Iterates `(index, record)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &ObjectRecord)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, r)| (i as u32, r))
    }
}

fn flags(visible: bool, collisions: bool, persistent: bool) -> u32 {
    use mre_common::ffi::{OBJECT_FLAG_COLLISIONS, OBJECT_FLAG_PERSISTENT, OBJECT_FLAG_VISIBLE};
    let mut f = 0;
    if visible {
        f |= OBJECT_FLAG_VISIBLE;
    }
    if collisions {
        f |= OBJECT_FLAG_COLLISIONS;
    }
    if persistent {
        f |= OBJECT_FLAG_PERSISTENT;
    }
    f
}

/// `parent → direct children` and `ancestor → (descendant, depth)` maps,
/// built once by a single pass over [`ObjectRegistry`] after object-reg
/// closes (SPEC_FULL.md §3, §4.3).
#[derive(Debug, Default)]
pub struct ObjectTree {
    direct_children: HashMap<u32, Vec<u32>>,
    transitive_descendants: HashMap<u32, Vec<(u32, u32)>>,
}

impl ObjectTree {
    /// Builds the tree from a closed [`ObjectRegistry`].
    pub fn build(registry: &ObjectRegistry) -> Self {
        let mut direct_children: HashMap<u32, Vec<u32>> = HashMap::new();
        for (index, record) in registry.iter() {
            if record.parent >= 0 {
                direct_children
                    .entry(record.parent as u32)
                    .or_default()
                    .push(index);
            }
        }

        let mut transitive_descendants: HashMap<u32, Vec<(u32, u32)>> = HashMap::new();
        for (index, _) in registry.iter() {
            let mut descendants = Vec::new();
            let mut stack: Vec<(u32, u32)> = direct_children
                .get(&index)
                .into_iter()
                .flatten()
                .map(|&child| (child, 1))
                .collect();
            // Reverse so we pop in the same order children were pushed,
            // giving DFS pre-order that matches insertion order — the
            // "stable ordering (descendants are emitted in the order they
            // are inserted during DFS)" requirement from SPEC_FULL.md §3.
            stack.reverse();
            while let Some((child, depth)) = stack.pop() {
                descendants.push((child, depth));
                let mut grandchildren: Vec<(u32, u32)> = direct_children
                    .get(&child)
                    .into_iter()
                    .flatten()
                    .map(|&gc| (gc, depth + 1))
                    .collect();
                grandchildren.reverse();
                stack.extend(grandchildren);
            }
            transitive_descendants.insert(index, descendants);
        }

        Self {
            direct_children,
            transitive_descendants,
        }
    }

    /// The direct children of `object`, in registration order.
    pub fn direct_children(&self, object: u32) -> &[u32] {
        self.direct_children.get(&object).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every transitive descendant of `object` with its depth, in stable
    /// DFS-insertion order.
    pub fn transitive_descendants(&self, object: u32) -> &[(u32, u32)] {
        self.transitive_descendants
            .get(&object)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `true` if `ancestor` is `descendant` itself or a transitive ancestor
    /// of it (SPEC_FULL.md §4.5, `isCompatibleWith`).
    pub fn is_ancestor_or_self(&self, ancestor: u32, descendant: u32) -> bool {
        ancestor == descendant
            || self
                .transitive_descendants(ancestor)
                .iter()
                .any(|(d, _)| *d == descendant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> ObjectRegistry {
        // 0: Hazard (root)
        // 1: Enemy (root)
        // 2: FrogBoss (child of Enemy)
        // 3: Child (child of Hazard) — mirrors scenario S1.
        let mut registry = ObjectRegistry::default();
        registry.seed_vanilla(vec![
            ObjectRecord {
                name: "Hazard".into(),
                parent: NO_PARENT,
                sprite: -1,
                mask: -1,
                depth: 0,
                visible: true,
                collisions: true,
                persistent: false,
            },
            ObjectRecord {
                name: "Enemy".into(),
                parent: NO_PARENT,
                sprite: -1,
                mask: -1,
                depth: 0,
                visible: true,
                collisions: true,
                persistent: false,
            },
            ObjectRecord {
                name: "FrogBoss".into(),
                parent: 1,
                sprite: -1,
                mask: -1,
                depth: 0,
                visible: true,
                collisions: true,
                persistent: false,
            },
            ObjectRecord {
                name: "Child".into(),
                parent: 0,
                sprite: -1,
                mask: -1,
                depth: 0,
                visible: true,
                collisions: true,
                persistent: false,
            },
        ]);
        registry
    }

    #[test]
    fn transitive_descendants_include_grandchildren_in_dfs_order() {
        let registry = sample_registry();
        let tree = ObjectTree::build(&registry);
        assert_eq!(tree.transitive_descendants(1), &[(2, 1)]);
        assert_eq!(tree.transitive_descendants(0), &[(3, 1)]);
    }

    #[test]
    fn compatibility_matches_ancestors_and_self() {
        let registry = sample_registry();
        let tree = ObjectTree::build(&registry);
        assert!(tree.is_ancestor_or_self(1, 2)); // Enemy is ancestor of FrogBoss
        assert!(tree.is_ancestor_or_self(2, 2)); // self
        assert!(!tree.is_ancestor_or_self(2, 1)); // wrong direction
        assert!(!tree.is_ancestor_or_self(0, 2)); // unrelated branch
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut registry = sample_registry();
        let mut host = HostBinding::default();
        let err = registry
            .register(&mut host, "Hazard", NO_PARENT, -1, -1, 0, true, true, false)
            .unwrap_err();
        assert_eq!(err, ErrorCode::BadValue);
    }

    #[test]
    fn unknown_parent_is_failed_lookup() {
        let mut registry = sample_registry();
        let mut host = HostBinding::default();
        let err = registry
            .register(&mut host, "Ghost", 99, -1, -1, 0, true, true, false)
            .unwrap_err();
        assert_eq!(err, ErrorCode::FailedLookup);
    }
}
