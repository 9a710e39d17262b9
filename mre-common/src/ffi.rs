//! Byte-exact `#[repr(C)]` layouts for the structs the host hands the MRE at
//! `init()`, plus the struct every mod must export from `define_mod()`.
//!
//! Nothing in this module is safe to construct from Rust alone: every field
//! is either a raw pointer borrowed from the host's address space or a
//! function pointer the host/mod promises conforms to the documented
//! signature. All of it is read, never owned — see SPEC_FULL.md §5,
//! "Resource ownership".

use std::os::raw::{c_char, c_void};

/// `(target, other)` — the shape of every VM event handler, including the
/// MRE's own universal trampoline and the synthetic "perform default"
/// listener captured when a trap is first created.
pub type EventHandlerFn = unsafe extern "C" fn(target: *mut c_void, other: *mut c_void);

/// Allocates a fresh VM instance of `object_index` at `(x, y)` and returns
/// its instance id.
pub type InstanceCreateFn =
    unsafe extern "C" fn(object_index: i32, x: f64, y: f64) -> u32;

/// Destroys `instance_id`. `run_event` is non-zero if the destroy event
/// should fire first.
pub type InstanceDestroyFn = unsafe extern "C" fn(instance_id: u32, run_event: i32) -> i32;

/// Reclassifies `instance_id` as `object_index`, optionally running the new
/// class's create event.
pub type InstanceChangeFn =
    unsafe extern "C" fn(instance_id: u32, object_index: i32, run_event: i32) -> i32;

/// Allocates a fresh VM object record and returns its index, or `-1` on
/// failure.
pub type ObjectAddFn = unsafe extern "C" fn() -> i32;

/// Invokes `target`'s `(event_type, event_number)` event directly, bypassing
/// any trap — used by the synthetic "perform default" listener to fall
/// through to a parent object's handler.
pub type EventPerformFn = unsafe extern "C" fn(
    target: *mut c_void,
    other: *mut c_void,
    event_type: i32,
    event_number: i32,
);

/// Draws `target` using its current sprite/image state, bypassing any draw
/// trap — used by the synthetic default listener for the normal draw event.
pub type DrawSelfFn = unsafe extern "C" fn(target: *mut c_void);

/// Resolves `name` against `instance`'s VM-owned local-variable table and
/// returns a pointer to the matching `AERLocal` slot, or null if the
/// instance has no local by that name. The MRE never interprets the
/// pointee's bytes itself (the host's closed-address hash table and its
/// tagged-union value format are opaque to the MRE); this is a thin,
/// name-resolving passthrough (SPEC_FULL.md §4.5, "VM locals").
pub type InstanceGetLocalFn =
    unsafe extern "C" fn(instance: *mut c_void, name: *const c_char) -> *mut c_void;

/// Callback the host invokes once per double-valued entry while the MRE
/// enumerates its save map during `loadData` (SPEC_FULL.md §4.6). `key` is
/// the flat `"mod.<modname>.<userkey>"` key; `ctx` is threaded through
/// unchanged from [`SaveMapForEachDoubleFn`].
pub type SaveMapVisitDoubleFn = unsafe extern "C" fn(key: *const c_char, value: f64, ctx: *mut c_void);

/// Same as [`SaveMapVisitDoubleFn`] for string-valued entries. `value` is
/// nul-terminated and valid only for the duration of the callback.
pub type SaveMapVisitStringFn = unsafe extern "C" fn(key: *const c_char, value: *const c_char, ctx: *mut c_void);

/// Enumerates every double-valued entry currently in the host's save map,
/// calling `visit` once per entry.
pub type SaveMapForEachDoubleFn = unsafe extern "C" fn(visit: SaveMapVisitDoubleFn, ctx: *mut c_void);

/// Enumerates every string-valued entry currently in the host's save map,
/// calling `visit` once per entry.
pub type SaveMapForEachStringFn = unsafe extern "C" fn(visit: SaveMapVisitStringFn, ctx: *mut c_void);

/// Clears the host's save map, called once before the MRE repopulates it
/// entirely from its own save store during `saveData`.
pub type SaveMapClearFn = unsafe extern "C" fn();

/// Writes one double-valued entry into the host's save map by flat key
/// (`"mod.<modname>.<userkey>"`).
pub type SaveMapSetDoubleFn = unsafe extern "C" fn(key: *const c_char, value: f64);

/// Writes one string-valued entry into the host's save map by flat key.
pub type SaveMapSetStringFn = unsafe extern "C" fn(key: *const c_char, value: *const c_char);

/// Pointers to the VM's internal global tables, handed to the MRE once at
/// `init()`. The MRE never frees any of these; they are borrowed for the
/// process lifetime (SPEC_FULL.md §5).
#[repr(C)]
#[derive(Clone, Copy)]
pub struct HostGlobals {
    /// Dense array of VM object records, `object_count` long.
    pub object_table: *mut c_void,
    /// Number of entries in `object_table`.
    pub object_count: u32,
    /// VM-owned open-addressed instance hash table.
    pub instance_table: *mut c_void,
    /// Head of the current room's doubly-linked instance list.
    pub instance_list_head: *mut c_void,
    /// Room table.
    pub room_table: *mut c_void,
    /// Index of the room currently active.
    pub current_room: *mut i32,
    /// Sprite table.
    pub sprite_table: *mut c_void,
    /// Font table.
    pub font_table: *mut c_void,
    /// Per-alarm-number subscriber arrays (12 entries), each itself an
    /// array of object indices. Over-allocated to `object_count` entries by
    /// the MRE's subscription-masking pass (SPEC_FULL.md §4.4).
    pub alarm_subscribers: *mut *mut i32,
    /// Per-step-kind subscriber arrays (3 entries), same shape as
    /// `alarm_subscribers`.
    pub step_subscribers: *mut *mut i32,
    /// Snapshot of this-step input state (keys/mouse down/pressed/released).
    pub input_table: *mut c_void,
    /// Monotonically increasing step counter.
    pub step_number: *mut u64,
    /// Non-zero while the host considers the game paused (e.g. a menu
    /// system is open). Read once per step to detect the edge that fires
    /// every mod's game-pause listener (SPEC_FULL.md §6).
    pub paused: *mut i32,
}

/// Pointers to the VM's internal functions, handed to the MRE once at
/// `init()`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct HostFunctions {
    /// See [`InstanceCreateFn`].
    pub instance_create: InstanceCreateFn,
    /// See [`InstanceDestroyFn`].
    pub instance_destroy: InstanceDestroyFn,
    /// See [`InstanceChangeFn`].
    pub instance_change: InstanceChangeFn,
    /// See [`ObjectAddFn`].
    pub object_add: ObjectAddFn,
    /// See [`EventPerformFn`].
    pub event_perform: EventPerformFn,
    /// See [`DrawSelfFn`].
    pub draw_self: DrawSelfFn,
    /// See [`InstanceGetLocalFn`].
    pub instance_get_local: InstanceGetLocalFn,

    /// See [`SpriteRegisterFn`].
    pub sprite_register: SpriteRegisterFn,
    /// See [`FontRegisterFn`].
    pub font_register: FontRegisterFn,
    /// See [`RoomGotoFn`].
    pub room_goto: RoomGotoFn,

    /// See [`AudioPlayFn`].
    pub audio_play: AudioPlayFn,
    /// See [`AudioStopFn`].
    pub audio_stop: AudioStopFn,

    /// See [`DrawRectangleFn`].
    pub draw_rectangle: DrawRectangleFn,
    /// See [`DrawSpriteFn`].
    pub draw_sprite: DrawSpriteFn,
    /// See [`DrawTextFn`].
    pub draw_text: DrawTextFn,
    /// See [`DrawLineFn`].
    pub draw_line: DrawLineFn,

    /// Key-down this-step snapshot. See [`InputStateFn`].
    pub key_down: InputStateFn,
    /// Key-pressed-this-step snapshot. See [`InputStateFn`].
    pub key_pressed: InputStateFn,
    /// Key-released-this-step snapshot. See [`InputStateFn`].
    pub key_released: InputStateFn,
    /// Mouse-button-down this-step snapshot. See [`InputStateFn`].
    pub mouse_down: InputStateFn,
    /// Mouse-button-pressed-this-step snapshot. See [`InputStateFn`].
    pub mouse_pressed: InputStateFn,
    /// Mouse-button-released-this-step snapshot. See [`InputStateFn`].
    pub mouse_released: InputStateFn,

    /// See [`InstanceGetPropertyFn`].
    pub instance_get_property: InstanceGetPropertyFn,
    /// See [`InstanceSetPropertyFn`].
    pub instance_set_property: InstanceSetPropertyFn,
    /// See [`InstanceGetAlarmFn`].
    pub instance_get_alarm: InstanceGetAlarmFn,
    /// See [`InstanceSetAlarmFn`].
    pub instance_set_alarm: InstanceSetAlarmFn,

    /// See [`SaveMapForEachDoubleFn`].
    pub save_map_for_each_double: SaveMapForEachDoubleFn,
    /// See [`SaveMapForEachStringFn`].
    pub save_map_for_each_string: SaveMapForEachStringFn,
    /// See [`SaveMapClearFn`].
    pub save_map_clear: SaveMapClearFn,
    /// See [`SaveMapSetDoubleFn`].
    pub save_map_set_double: SaveMapSetDoubleFn,
    /// See [`SaveMapSetStringFn`].
    pub save_map_set_string: SaveMapSetStringFn,
}

/// Mirror of the VM's per-object record. The MRE mutates `parent`, `sprite`,
/// `mask`, `depth`, the flag bits, and the function pointer inside each
/// event-wrapper slot (SPEC_FULL.md §3).
#[repr(C)]
#[derive(Clone, Copy)]
pub struct VmObject {
    /// Heap-owned name; null for vanilla (non-mod-registered) objects. The
    /// VM attempts to free this pointer on object-table teardown, so it
    /// must have been allocated the way the host's allocator expects
    /// (SPEC_FULL.md §4.3).
    pub name: *mut c_char,
    /// Parent object index, or `-1` for the VM's master class.
    pub parent: i32,
    /// Default sprite index, or `-1`.
    pub sprite: i32,
    /// Collision mask sprite index, or `-1`.
    pub mask: i32,
    /// Draw depth.
    pub depth: i32,
    /// Bit 0: visible. Bit 1: collisions enabled. Bit 2: persistent.
    pub flags: u32,
    /// Per-event-type pointer to a dense array of event-wrapper slots. See
    /// [`EventWrapper`].
    pub event_arrays: [*mut EventWrapper; 7],
    /// Length of each array in `event_arrays`.
    pub event_array_lens: [u32; 7],
}

/// Bit in [`VmObject::flags`] controlling instance visibility.
pub const OBJECT_FLAG_VISIBLE: u32 = 0b001;
/// Bit in [`VmObject::flags`] controlling whether collisions fire.
pub const OBJECT_FLAG_COLLISIONS: u32 = 0b010;
/// Bit in [`VmObject::flags`] controlling survival across room changes.
pub const OBJECT_FLAG_PERSISTENT: u32 = 0b100;

/// A single slot in an object's per-event-type array. Allocated (and
/// deliberately leaked — see SPEC_FULL.md §5 and §9) by the MRE the first
/// time a trap is created for the slot.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct EventWrapper {
    /// The handler the VM's dispatcher calls. Always the MRE's universal
    /// trampoline once a trap exists for this slot.
    pub handler: Option<EventHandlerFn>,
}

/// Mirror of a live VM instance. The MRE holds no allocation for instances;
/// this is a read-only view into host-owned memory, valid only for the
/// duration of the host callback currently executing (SPEC_FULL.md §3).
#[repr(C)]
#[derive(Clone, Copy)]
pub struct VmInstance {
    /// Stable 32-bit identifier; the only handle safe to retain across
    /// steps.
    pub id: u32,
    /// Object class this instance belongs to.
    pub object_index: i32,
    /// World position.
    pub x: f64,
    /// World position.
    pub y: f64,
    /// Intrusive doubly-linked room instance list.
    pub next: *mut VmInstance,
    /// Intrusive doubly-linked room instance list.
    pub prev: *mut VmInstance,
}

/// Callbacks a mod may register for sprites, object classes, object event
/// listeners and fonts (SPEC_FULL.md §4.2). Every field is optional; the
/// loader calls only the ones a mod actually sets.
pub type RegisterSpritesFn = unsafe extern "C" fn();
/// See [`RegisterSpritesFn`].
pub type RegisterObjectsFn = unsafe extern "C" fn();
/// See [`RegisterSpritesFn`].
pub type RegisterObjectListenersFn = unsafe extern "C" fn();
/// See [`RegisterSpritesFn`].
pub type RegisterFontsFn = unsafe extern "C" fn();

/// Lifecycle callbacks a mod may register (SPEC_FULL.md §3, "Mod").
pub type ModConstructorFn = unsafe extern "C" fn();
/// See [`ModConstructorFn`].
pub type ModDestructorFn = unsafe extern "C" fn();
/// See [`ModConstructorFn`].
pub type ModGameStepFn = unsafe extern "C" fn();
/// See [`ModConstructorFn`].
pub type ModGamePauseFn = unsafe extern "C" fn(paused: i32);
/// See [`ModConstructorFn`].
pub type ModGameSaveFn = unsafe extern "C" fn(slot: i32);
/// See [`ModConstructorFn`].
pub type ModGameLoadFn = unsafe extern "C" fn(slot: i32);
/// See [`ModConstructorFn`].
pub type ModRoomStartFn = unsafe extern "C" fn(room_index: i32);
/// See [`ModConstructorFn`].
pub type ModRoomEndFn = unsafe extern "C" fn(room_index: i32);

/// The struct a mod's `define_mod()` (or aliased) entry point must return.
/// Every field is nullable; an absent callback is simply never invoked.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct ModCallbacks {
    /// See [`RegisterSpritesFn`].
    pub register_sprites: Option<RegisterSpritesFn>,
    /// See [`RegisterObjectsFn`].
    pub register_objects: Option<RegisterObjectsFn>,
    /// See [`RegisterObjectListenersFn`].
    pub register_object_listeners: Option<RegisterObjectListenersFn>,
    /// See [`RegisterFontsFn`].
    pub register_fonts: Option<RegisterFontsFn>,
    /// See [`ModConstructorFn`].
    pub constructor: Option<ModConstructorFn>,
    /// See [`ModDestructorFn`].
    pub destructor: Option<ModDestructorFn>,
    /// See [`ModGameStepFn`].
    pub game_step: Option<ModGameStepFn>,
    /// See [`ModGamePauseFn`].
    pub game_pause: Option<ModGamePauseFn>,
    /// See [`ModGameSaveFn`].
    pub game_save: Option<ModGameSaveFn>,
    /// See [`ModGameLoadFn`].
    pub game_load: Option<ModGameLoadFn>,
    /// See [`ModRoomStartFn`].
    pub room_start: Option<ModRoomStartFn>,
    /// See [`ModRoomEndFn`].
    pub room_end: Option<ModRoomEndFn>,
    /// Deprecated alias fired for both `room_start` and `room_end`,
    /// preserved for mods written against older MRE releases.
    pub room_change: Option<ModRoomStartFn>,
}

impl Default for ModCallbacks {
    fn default() -> Self {
        // All-None is the correct "no callbacks registered" baseline; every
        // field is Option so this is a plain zero-sized default, not a
        // workaround for anything.
        ModCallbacks {
            register_sprites: None,
            register_objects: None,
            register_object_listeners: None,
            register_fonts: None,
            constructor: None,
            destructor: None,
            game_step: None,
            game_pause: None,
            game_save: None,
            game_load: None,
            room_start: None,
            room_end: None,
            room_change: None,
        }
    }
}

/// The set of aliased entry-point symbol names a mod's shared library may
/// export its `ModCallbacks`-returning function under. Exactly one must be
/// present (SPEC_FULL.md §4.2).
pub const MOD_ENTRY_ALIASES: [&str; 4] = ["define_mod", "definemod", "defineMod", "DefineMod"];

/// Signature every mod entry point (under any of [`MOD_ENTRY_ALIASES`]) must
/// have.
pub type ModEntryFn = unsafe extern "C" fn() -> ModCallbacks;

/// Registers a new sprite asset and returns its index, or `-1` on failure.
pub type SpriteRegisterFn =
    unsafe extern "C" fn(name: *const c_char, path: *const c_char) -> i32;

/// Registers a new font asset and returns its index, or `-1` on failure.
pub type FontRegisterFn =
    unsafe extern "C" fn(name: *const c_char, path: *const c_char, size: i32) -> i32;

/// Switches the active room, optionally running room-end/room-start events.
pub type RoomGotoFn = unsafe extern "C" fn(room_index: i32) -> i32;

/// Plays `sound_index`, returning a channel handle or `-1` on failure.
pub type AudioPlayFn = unsafe extern "C" fn(sound_index: i32) -> i32;
/// Stops every channel currently playing `sound_index`.
pub type AudioStopFn = unsafe extern "C" fn(sound_index: i32);

/// Draws an outlined or filled rectangle in world space.
pub type DrawRectangleFn = unsafe extern "C" fn(x1: f64, y1: f64, x2: f64, y2: f64, outline: i32);
/// Draws `sprite_index`'s `image_index` frame at `(x, y)`.
pub type DrawSpriteFn = unsafe extern "C" fn(sprite_index: i32, image_index: i32, x: f64, y: f64);
/// Draws `text` at `(x, y)` using the active font.
pub type DrawTextFn = unsafe extern "C" fn(x: f64, y: f64, text: *const c_char);
/// Draws a line segment in world space.
pub type DrawLineFn = unsafe extern "C" fn(x1: f64, y1: f64, x2: f64, y2: f64);

/// Reads this-step input state for `code` (a key or mouse-button code,
/// depending on which of the three [`HostFunctions`] input fields is
/// called). Non-zero means the queried state is true.
pub type InputStateFn = unsafe extern "C" fn(code: i32) -> i32;

/// One queryable/settable scalar instance property (SPEC_FULL.md §4.9).
/// Everything but alarms shares a single `f64` get/set pair keyed by this
/// code; alarms get their own pair since they are indexed and integer-
/// valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum InstanceProperty {
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
    /// Visibility flag (0/1).
    Visible = 9,
    /// Collision-participation flag (0/1).
    Solid = 10,
    /// Room-survival flag (0/1).
    Persistent = 11,
}

/// Reads `property` off `instance` as an `f64`.
pub type InstanceGetPropertyFn =
    unsafe extern "C" fn(instance: *mut c_void, property: i32) -> f64;
/// Writes `value` into `instance`'s `property`.
pub type InstanceSetPropertyFn =
    unsafe extern "C" fn(instance: *mut c_void, property: i32, value: f64);
/// Reads `instance`'s alarm countdown at `index` (0..12).
pub type InstanceGetAlarmFn = unsafe extern "C" fn(instance: *mut c_void, index: u32) -> i32;
/// Sets `instance`'s alarm countdown at `index` (0..12); a negative value
/// disarms the alarm.
pub type InstanceSetAlarmFn = unsafe extern "C" fn(instance: *mut c_void, index: u32, value: i32);

/// An optional destructor a mod may attach when creating a mod-local
/// (SPEC_FULL.md §4.5, "Mod-locals"). Called with the stored primitive's
/// pointer payload (null if the local held a non-pointer primitive) when
/// the local is destroyed, explicitly or through orphan pruning.
pub type ModLocalDestructorFn = unsafe extern "C" fn(ptr: *mut c_void);

/// A mod-supplied event listener, attached to an `(object, event-type,
/// event-number)` trap (SPEC_FULL.md §4.4). `iter` is the opaque per-dispatch
/// chain handle; calling back into the MRE's `handle(iter, target, other)`
/// invokes the next listener (or the captured original handler, at the end
/// of the chain). The return value is the chain-continue/cancel decision:
/// non-zero means "event may proceed", zero means "cancel".
pub type ModListenerFn =
    unsafe extern "C" fn(iter: *mut c_void, target: *mut c_void, other: *mut c_void) -> i32;

mod mock {
    //! No-op stand-ins for every [`HostFunctions`] entry point, shared by
    //! this module's [`Bootstrap`](crate::Bootstrap)/[`Mocked`](crate::Mocked)
    //! impls. None of these touch real host memory; they exist so the two
    //! traits have valid, non-null function pointers to hand back.
    use super::*;

    unsafe extern "C" fn instance_create(_object_index: i32, _x: f64, _y: f64) -> u32 {
        0
    }
    unsafe extern "C" fn instance_destroy(_instance_id: u32, _run_event: i32) -> i32 {
        1
    }
    unsafe extern "C" fn instance_change(_instance_id: u32, _object_index: i32, _run_event: i32) -> i32 {
        1
    }
    unsafe extern "C" fn object_add() -> i32 {
        -1
    }
    unsafe extern "C" fn event_perform(_target: *mut c_void, _other: *mut c_void, _event_type: i32, _event_number: i32) {}
    unsafe extern "C" fn draw_self(_target: *mut c_void) {}
    unsafe extern "C" fn instance_get_local(_instance: *mut c_void, _name: *const c_char) -> *mut c_void {
        std::ptr::null_mut()
    }
    unsafe extern "C" fn sprite_register(_name: *const c_char, _path: *const c_char) -> i32 {
        -1
    }
    unsafe extern "C" fn font_register(_name: *const c_char, _path: *const c_char, _size: i32) -> i32 {
        -1
    }
    unsafe extern "C" fn room_goto(_room_index: i32) -> i32 {
        1
    }
    unsafe extern "C" fn audio_play(_sound_index: i32) -> i32 {
        -1
    }
    unsafe extern "C" fn audio_stop(_sound_index: i32) {}
    unsafe extern "C" fn draw_rectangle(_x1: f64, _y1: f64, _x2: f64, _y2: f64, _outline: i32) {}
    unsafe extern "C" fn draw_sprite(_sprite_index: i32, _image_index: i32, _x: f64, _y: f64) {}
    unsafe extern "C" fn draw_text(_x: f64, _y: f64, _text: *const c_char) {}
    unsafe extern "C" fn draw_line(_x1: f64, _y1: f64, _x2: f64, _y2: f64) {}
    unsafe extern "C" fn input_state(_code: i32) -> i32 {
        0
    }
    unsafe extern "C" fn instance_get_property(_instance: *mut c_void, _property: i32) -> f64 {
        0.0
    }
    unsafe extern "C" fn instance_set_property(_instance: *mut c_void, _property: i32, _value: f64) {}
    unsafe extern "C" fn instance_get_alarm(_instance: *mut c_void, _index: u32) -> i32 {
        -1
    }
    unsafe extern "C" fn instance_set_alarm(_instance: *mut c_void, _index: u32, _value: i32) {}
    unsafe extern "C" fn save_map_for_each_double(_visit: SaveMapVisitDoubleFn, _ctx: *mut c_void) {}
    unsafe extern "C" fn save_map_for_each_string(_visit: SaveMapVisitStringFn, _ctx: *mut c_void) {}
    unsafe extern "C" fn save_map_clear() {}
    unsafe extern "C" fn save_map_set_double(_key: *const c_char, _value: f64) {}
    unsafe extern "C" fn save_map_set_string(_key: *const c_char, _value: *const c_char) {}

    pub(super) fn functions() -> HostFunctions {
        HostFunctions {
            instance_create,
            instance_destroy,
            instance_change,
            object_add,
            event_perform,
            draw_self,
            instance_get_local,
            sprite_register,
            font_register,
            room_goto,
            audio_play,
            audio_stop,
            draw_rectangle,
            draw_sprite,
            draw_text,
            draw_line,
            key_down: input_state,
            key_pressed: input_state,
            key_released: input_state,
            mouse_down: input_state,
            mouse_pressed: input_state,
            mouse_released: input_state,
            instance_get_property,
            instance_set_property,
            instance_get_alarm,
            instance_set_alarm,
            save_map_for_each_double,
            save_map_for_each_string,
            save_map_clear,
            save_map_set_double,
            save_map_set_string,
        }
    }
}

impl crate::Bootstrap for HostGlobals {
    /// Every pointer null, every count zero — the shape `HostBinding` never
    /// hands to host-touching code (callers must check `object_count`/the
    /// pointers they need before dereferencing).
    fn bootstrap() -> anyhow::Result<Self> {
        Ok(HostGlobals {
            object_table: std::ptr::null_mut(),
            object_count: 0,
            instance_table: std::ptr::null_mut(),
            instance_list_head: std::ptr::null_mut(),
            room_table: std::ptr::null_mut(),
            current_room: std::ptr::null_mut(),
            sprite_table: std::ptr::null_mut(),
            font_table: std::ptr::null_mut(),
            alarm_subscribers: std::ptr::null_mut(),
            step_subscribers: std::ptr::null_mut(),
            input_table: std::ptr::null_mut(),
            step_number: std::ptr::null_mut(),
            paused: std::ptr::null_mut(),
        })
    }
}

impl crate::Mocked for HostGlobals {
    /// Same all-null shape as [`Bootstrap::bootstrap`](crate::Bootstrap::bootstrap);
    /// this crate has no host process to borrow real tables from, so a
    /// mocked runtime exercises only the code paths that never dereference
    /// them.
    fn mocked() -> anyhow::Result<Self> {
        <Self as crate::Bootstrap>::bootstrap()
    }
}

impl crate::Bootstrap for HostFunctions {
    /// Every entry point a safe no-op, so a `HostBinding` built from this
    /// can answer `is_bound() == true` without ever touching real host
    /// memory.
    fn bootstrap() -> anyhow::Result<Self> {
        Ok(mock::functions())
    }
}

impl crate::Mocked for HostFunctions {
    fn mocked() -> anyhow::Result<Self> {
        <Self as crate::Bootstrap>::bootstrap()
    }
}
