//! The event-trap engine (SPEC_FULL.md §4.4) — the core of the MRE.
//!
//! Three moving parts: [`EventTrapEngine`] owns the trap map and the
//! subscription-masking dedup set; [`Trap`] is one intercepted
//! `(object, event-type, event-number)` slot; [`EventIter`] is the
//! short-lived, per-dispatch handle a mod listener uses to call onward
//! through the chain. [`universal_trampoline`] is the single function
//! pointer installed into every trapped VM event-wrapper slot.

use std::collections::{HashMap, HashSet};
use std::os::raw::c_void;

use mre_common::error::ErrorCode;
use mre_common::event::{EventKey, EventType};
use mre_common::ffi::{EventHandlerFn, EventWrapper, ModListenerFn, VmInstance, VmObject};
use mre_common::{MreResult, ALARM_COUNT};

use crate::context;
use crate::hostbind::HostBinding;
use crate::objecttree::ObjectTree;

/// What a trap falls back to once the mod listener chain is exhausted.
enum Fallthrough {
    /// The VM's own handler, captured before the trap's creation replaced
    /// it with [`universal_trampoline`].
    Captured(EventHandlerFn),
    /// No VM handler occupied the slot yet. Falls through to the parent
    /// object's same event and, for the normal draw sub-event on an object
    /// with a sprite, also calls draw-self.
    ///
    /// Limitation: the host ABI gives no primitive for "invoke this
    /// specific ancestor's handler for this slot" — only `eventPerform`,
    /// which dispatches by the instance's *actual* runtime class. When
    /// `parent` has no handler of its own either this is a no-op rather
    /// than a further walk up the chain; see SPEC_FULL.md §9, open
    /// question (b).
    Default {
        parent: i32,
        event_type: EventType,
        event_number: u32,
        has_sprite: bool,
    },
}

/// One listener attached to a trap: the mod's function pointer plus the
/// mod's index and name, captured at attach time so dispatch can push the
/// right logging/config context around each call.
struct Listener {
    func: ModListenerFn,
    mod_index: u32,
    mod_name: String,
}

/// The MRE's interception record for a single `(object, event-type,
/// event-number)` key (SPEC_FULL.md §3, "Trap"). Lives for the process
/// lifetime once created.
pub struct Trap {
    listeners: Vec<Listener>,
    fallthrough: Fallthrough,
}

impl Trap {
    /// Number of mod listeners currently attached.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// The trap map plus the event-subscriber masking engine.
#[derive(Default)]
pub struct EventTrapEngine {
    traps: HashMap<EventKey, Trap>,
    masked: HashSet<EventKey>,
}

impl EventTrapEngine {
    /// Looks up the trap for `key`, if one has been created.
    pub fn trap(&self, key: EventKey) -> Option<&Trap> {
        self.traps.get(&key)
    }

    /// Attaches `listener` to the trap for `key`, creating the trap (and,
    /// for alarm/step events, masking subscribers) on first attach.
    /// Stage-gating is the caller's responsibility (SPEC_FULL.md §4.1);
    /// this is pure domain logic over the trap map and the host's raw
    /// tables.
    pub fn attach_listener(
        &mut self,
        host: &HostBinding,
        tree: &ObjectTree,
        key: EventKey,
        func: ModListenerFn,
        mod_index: u32,
        mod_name: &str,
    ) -> MreResult<()> {
        if key.event_type == EventType::Alarm && key.event_number >= ALARM_COUNT {
            return Err(ErrorCode::BadValue);
        }

        if !self.traps.contains_key(&key) {
            self.create_trap(host, key)?;
        }

        if matches!(key.event_type, EventType::Alarm | EventType::Step) {
            self.mask_subscribers(host, tree, key)?;
        }

        let trap = self.traps.get_mut(&key).expect("trap created above");
        trap.listeners.push(Listener {
            func,
            mod_index,
            mod_name: mod_name.to_string(),
        });
        Ok(())
    }

    fn create_trap(&mut self, host: &HostBinding, key: EventKey) -> MreResult<()> {
        let event_type_index = key.event_type as usize;
        let required_len = match key.event_type {
            EventType::Collision => host.object_count()?,
            other => other.max_sub_index(),
        };
        if key.event_type != EventType::Collision && key.event_number >= required_len {
            return Err(ErrorCode::FailedLookup);
        }

        let obj = unsafe { host.object_at(key.object_index)? };
        unsafe { ensure_event_array(obj, event_type_index, required_len) };

        let has_sprite = unsafe { (*obj).sprite >= 0 };
        let parent = unsafe { (*obj).parent };

        let previous = unsafe {
            host.install_handler(key.object_index, event_type_index, key.event_number, universal_trampoline)?
        };

        let fallthrough = match previous {
            Some(handler) => Fallthrough::Captured(handler),
            None => Fallthrough::Default {
                parent,
                event_type: key.event_type,
                event_number: key.event_number,
                has_sprite,
            },
        };

        self.traps.insert(
            key,
            Trap {
                listeners: Vec::new(),
                fallthrough,
            },
        );
        Ok(())
    }

    /// Unconditionally masks every alarm(12)/step(3) subscriber array
    /// across every registered object, independent of any mod's listener
    /// attachments (SPEC_FULL.md §4.4, "Subscription masking"). Must run
    /// once, between the object-tree build and listener-reg, so that an
    /// object's pre-existing (non-mod) subscribers propagate to its
    /// descendants even for a key no mod ever attaches a listener to.
    pub fn mask_all_subscribers(&mut self, host: &HostBinding, tree: &ObjectTree, object_count: u32) -> MreResult<()> {
        for object_index in 0..object_count {
            for alarm in 0..ALARM_COUNT {
                self.mask_subscribers(host, tree, EventKey::new(EventType::Alarm, alarm, object_index))?;
            }
            for step in 0..3 {
                self.mask_subscribers(host, tree, EventKey::new(EventType::Step, step, object_index))?;
            }
        }
        Ok(())
    }

    fn mask_subscribers(&mut self, host: &HostBinding, tree: &ObjectTree, key: EventKey) -> MreResult<()> {
        if self.masked.contains(&key) {
            return Ok(());
        }
        self.masked.insert(key);

        let globals = host.globals_ref()?;
        let array_slot = match key.event_type {
            EventType::Alarm => unsafe { globals.alarm_subscribers.add(key.event_number as usize) },
            EventType::Step => unsafe { globals.step_subscribers.add(key.event_number as usize) },
            _ => return Ok(()),
        };

        let mut members = unsafe { read_sentinel_array(*array_slot) };
        let mut present: HashSet<i32> = members.iter().copied().collect();

        let mut candidates = vec![key.object_index as i32];
        candidates.extend(
            tree.transitive_descendants(key.object_index)
                .iter()
                .map(|(descendant, _)| *descendant as i32),
        );

        for candidate in candidates {
            if present.insert(candidate) {
                members.push(candidate);
            }
        }

        let boxed: Box<[i32]> = members.into_iter().chain(std::iter::once(-1)).collect();
        let ptr = Box::into_raw(boxed) as *mut i32;
        unsafe {
            *array_slot = ptr;
        }
        Ok(())
    }
}

unsafe fn ensure_event_array(obj: *mut VmObject, index: usize, required_len: u32) {
    let current_len = (*obj).event_array_lens[index];
    if current_len >= required_len {
        return;
    }
    let mut new_array: Vec<EventWrapper> = (0..required_len).map(|_| EventWrapper { handler: None }).collect();
    let old_ptr = (*obj).event_arrays[index];
    if !old_ptr.is_null() {
        for i in 0..current_len as usize {
            new_array[i] = *old_ptr.add(i);
        }
    }
    let boxed = new_array.into_boxed_slice();
    (*obj).event_arrays[index] = Box::into_raw(boxed) as *mut EventWrapper;
    (*obj).event_array_lens[index] = required_len;
}

unsafe fn read_sentinel_array(ptr: *mut i32) -> Vec<i32> {
    if ptr.is_null() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut offset = 0isize;
    loop {
        let value = *ptr.offset(offset);
        if value < 0 {
            break;
        }
        out.push(value);
        offset += 1;
    }
    out
}

/// The per-dispatch chain handle passed (behind an opaque pointer) to each
/// mod listener as `iter` (SPEC_FULL.md §4.4, "Dispatch").
pub struct EventIter<'a> {
    listeners: &'a [Listener],
    index: usize,
    fallthrough: &'a Fallthrough,
    host: &'a HostBinding,
}

impl<'a> EventIter<'a> {
    /// Invokes the next mod listener in the chain, or — once the chain is
    /// exhausted — the trap's captured/default fallthrough. Returns the
    /// chain's proceed/cancel decision (always `true` once fallthrough
    /// runs).
    pub fn handle(&mut self, target: *mut c_void, other: *mut c_void) -> bool {
        if self.index < self.listeners.len() {
            let listener = &self.listeners[self.index];
            self.index += 1;
            let func = listener.func;
            let iter_ptr = self as *mut Self as *mut c_void;
            let result = context::with_context(listener.mod_index, &listener.mod_name, || unsafe {
                func(iter_ptr, target, other)
            });
            return result != 0;
        }

        match self.fallthrough {
            Fallthrough::Captured(handler) => unsafe { handler(target, other) },
            Fallthrough::Default {
                parent,
                event_type,
                event_number,
                has_sprite,
            } => {
                if *parent >= 0 {
                    let _ = unsafe {
                        self.host.event_perform(target, other, *event_type as i32, *event_number as i32)
                    };
                }
                if *event_type == EventType::Draw && *event_number == 0 && *has_sprite {
                    let _ = unsafe { self.host.draw_self(target) };
                }
            }
        }
        true
    }
}

/// The single function pointer installed into every trapped VM
/// event-wrapper slot. Reads the current-event register, looks up the
/// matching trap, and runs its listener chain; a `false` outcome on a
/// create event destroys the instance without running its destroy event
/// (SPEC_FULL.md §4.4, "Dispatch").
///
/// # Safety
/// Called only by the host VM's dispatcher, with `target`/`other` valid
/// instance pointers (or `other` null) for the call's duration.
pub unsafe extern "C" fn universal_trampoline(target: *mut c_void, other: *mut c_void) {
    let outcome = crate::runtime::with_runtime(|rt| {
        let key = rt.current_event()?;
        let engine = rt.event_engine();
        let trap = engine.trap(key)?;
        let host = rt.host();
        let mut iter = EventIter {
            listeners: &trap.listeners,
            index: 0,
            fallthrough: &trap.fallthrough,
            host: &host,
        };
        Some(iter.handle(target, other))
    })
    .flatten();

    if outcome == Some(false) {
        let is_create = crate::runtime::with_runtime(|rt| {
            rt.current_event().map(|key| key.event_type == EventType::Create)
        })
        .flatten()
        .unwrap_or(false);

        if is_create && !target.is_null() {
            let instance_id = (*(target as *mut VmInstance)).id;
            let _ = crate::runtime::with_runtime(|rt| rt.host().instance_destroy(instance_id, false));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objecttree::{ObjectRecord, ObjectRegistry, NO_PARENT};

    fn registry_with_parent_child() -> (ObjectRegistry, ObjectTree) {
        let mut registry = ObjectRegistry::default();
        registry.seed_vanilla(vec![
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
                parent: 0,
                sprite: -1,
                mask: -1,
                depth: 0,
                visible: true,
                collisions: true,
                persistent: false,
            },
        ]);
        let tree = ObjectTree::build(&registry);
        (registry, tree)
    }

    #[test]
    fn alarm_index_past_bound_is_bad_value() {
        let (_registry, tree) = registry_with_parent_child();
        let host = HostBinding::default();
        let mut engine = EventTrapEngine::default();
        let key = EventKey::new(EventType::Alarm, ALARM_COUNT, 0);

        unsafe extern "C" fn noop(_iter: *mut c_void, _t: *mut c_void, _o: *mut c_void) -> i32 {
            1
        }

        let err = engine
            .attach_listener(&host, &tree, key, noop, 0, "modA")
            .unwrap_err();
        assert_eq!(err, ErrorCode::BadValue);
    }

    #[test]
    fn unbound_host_rejects_attach() {
        let (_registry, tree) = registry_with_parent_child();
        let host = HostBinding::default();
        let mut engine = EventTrapEngine::default();
        let key = EventKey::new(EventType::Create, 0, 0);

        unsafe extern "C" fn noop(_iter: *mut c_void, _t: *mut c_void, _o: *mut c_void) -> i32 {
            1
        }

        let err = engine
            .attach_listener(&host, &tree, key, noop, 0, "modA")
            .unwrap_err();
        assert_eq!(err, ErrorCode::SequenceBreak);
    }
}
