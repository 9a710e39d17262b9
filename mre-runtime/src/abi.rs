//! The mod-facing C ABI (SPEC_FULL.md §4, throughout): every function a
//! mod's shared library links against directly. Mods are native `cdylib`s
//! loaded into the same process as the MRE (SPEC_FULL.md §2, "Deployment
//! shape"), so unlike a WASM-sandboxed mod they do not need a numeric
//! import table — they link against these symbols the ordinary way a
//! shared library depends on another. Every function here is a thin
//! dispatch into [`crate::runtime::with_runtime`], catch-unwind guarded the
//! same way the five host entry points in `runtime.rs` are, and reports
//! through [`crate::error::set_error`]/[`crate::error::last_error`] rather
//! than any return-value-encoded exception.
//!
//! `mre-sdk` is the safe layer mod authors actually write against; nothing
//! here is meant to be called directly outside of it.

use std::ffi::CStr;
use std::os::raw::{c_char, c_void};

use mre_common::ffi::{InstanceProperty, ModListenerFn};
use mre_common::value::{PointerValue, PrimitiveValue, SaveScalar};
use mre_common::{ErrorCode, EventKey, EventType};

use crate::error::{last_error, set_error};
use crate::runtime::with_runtime;
use crate::surface::InputPhase;

fn guard<T>(function: &'static str, f: impl FnOnce() -> Result<T, ErrorCode> + std::panic::UnwindSafe) -> Option<T> {
    crate::error::clear_error();
    let outcome = std::panic::catch_unwind(f).unwrap_or(Err(ErrorCode::OutOfMemory));
    match outcome {
        Ok(value) => Some(value),
        Err(code) => {
            set_error(code, function);
            None
        }
    }
}

unsafe fn str_arg(ptr: *const c_char) -> Result<String, ErrorCode> {
    if ptr.is_null() {
        return Err(ErrorCode::NullArgument);
    }
    CStr::from_ptr(ptr).to_str().map(str::to_string).map_err(|_| ErrorCode::BadValue)
}

/// Reads the calling thread's last error code, or `0` ("no error") if the
/// most recent call succeeded.
#[no_mangle]
pub extern "C" fn aer_last_error() -> i32 {
    match last_error() {
        Some(code) => error_code_to_raw(code),
        None => 0,
    }
}

fn error_code_to_raw(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::NullArgument => 1,
        ErrorCode::SequenceBreak => 2,
        ErrorCode::OutOfMemory => 3,
        ErrorCode::FailedLookup => 4,
        ErrorCode::FailedParse => 5,
        ErrorCode::BadFile => 6,
        ErrorCode::BadValue => 7,
    }
}

/// Registers a new object class (SPEC_FULL.md §4.3). Returns the new
/// object's index, or `-1` on failure.
///
/// # Safety
/// `name` must be a valid null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn aer_register_object(
    name: *const c_char,
    parent: i32,
    sprite: i32,
    mask: i32,
    depth: i32,
    visible: i32,
    collisions: i32,
    persistent: i32,
) -> i32 {
    guard("register_object", || {
        let name = str_arg(name)?;
        with_runtime(|rt| rt.register_object(&name, parent, sprite, mask, depth, visible != 0, collisions != 0, persistent != 0))
            .ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|id| id as i32)
    .unwrap_or(-1)
}

/// Attaches `func` to `(object_index, event_type, event_number)`
/// (SPEC_FULL.md §4.4). Returns `1` on success, `0` on failure.
#[no_mangle]
pub extern "C" fn aer_attach_listener(object_index: u32, event_type: i32, event_number: u32, func: ModListenerFn) -> i32 {
    guard("attach_listener", || {
        let key = EventKey::new(EventType::from_raw(event_type), event_number, object_index);
        with_runtime(|rt| rt.attach_listener(key, func)).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|_| 1)
    .unwrap_or(0)
}

/// Writes the current room's instance ids into `buf` (`buf_len` entries).
/// Always returns the *total* instance count; a caller passes `buf_len = 0`
/// and a null `buf` to probe the count before allocating.
///
/// # Safety
/// `buf` must be valid for `buf_len` writes of `u32`, or null.
#[no_mangle]
pub unsafe extern "C" fn aer_instance_get_all(buf: *mut u32, buf_len: u32) -> i32 {
    guard("instance_get_all", || with_runtime(|rt| rt.get_all_instances()).ok_or(ErrorCode::SequenceBreak)?)
        .map(|ids| {
            copy_into(&ids, buf, buf_len);
            ids.len() as i32
        })
        .unwrap_or(-1)
}

/// Writes every instance of `object_index` (and, if `recursive`, every
/// instance of a transitive descendant) into `buf`. Same probing
/// convention as [`aer_instance_get_all`].
///
/// # Safety
/// `buf` must be valid for `buf_len` writes of `u32`, or null.
#[no_mangle]
pub unsafe extern "C" fn aer_instance_get_by_object(object_index: u32, recursive: i32, buf: *mut u32, buf_len: u32) -> i32 {
    guard("instance_get_by_object", || {
        with_runtime(|rt| rt.get_instances_by_object(object_index, recursive != 0)).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|ids| {
        copy_into(&ids, buf, buf_len);
        ids.len() as i32
    })
    .unwrap_or(-1)
}

unsafe fn copy_into(ids: &[u32], buf: *mut u32, buf_len: u32) {
    if buf.is_null() {
        return;
    }
    let n = ids.len().min(buf_len as usize);
    std::ptr::copy_nonoverlapping(ids.as_ptr(), buf, n);
}

/// Recovers the stable instance id for a raw VM instance pointer, as
/// handed to a mod listener in its `target`/`other` argument. Returns
/// `u32::MAX` if `ptr` is null or unresolvable.
///
/// # Safety
/// `ptr` must either be null or a valid `VmInstance` pointer for the
/// duration of the call, as handed to a listener by the universal
/// trampoline.
#[no_mangle]
pub unsafe extern "C" fn aer_instance_id_of(ptr: *mut c_void) -> u32 {
    guard("instance_id_of", || with_runtime(|rt| rt.instance_id_of(ptr)).ok_or(ErrorCode::SequenceBreak)?)
        .unwrap_or(mre_common::MOD_NULL)
}

/// Creates a fresh instance of `object_index` at `(x, y)`. Returns the new
/// instance id, or `u32::MAX` on failure.
#[no_mangle]
pub extern "C" fn aer_instance_create(object_index: i32, x: f64, y: f64) -> u32 {
    guard("instance_create", || with_runtime(|rt| rt.create_instance(object_index, x, y)).ok_or(ErrorCode::SequenceBreak)?)
        .unwrap_or(mre_common::MOD_NULL)
}

/// Destroys `instance_id`. Returns `1` on success, `0` on failure.
#[no_mangle]
pub extern "C" fn aer_instance_destroy(instance_id: u32, run_event: i32) -> i32 {
    guard("instance_destroy", || {
        with_runtime(|rt| rt.destroy_instance(instance_id, run_event != 0)).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|_| 1)
    .unwrap_or(0)
}

/// Reclassifies `instance_id` as `object_index`. Returns `1` on success,
/// `0` on failure.
#[no_mangle]
pub extern "C" fn aer_instance_change(instance_id: u32, object_index: i32, run_event: i32) -> i32 {
    guard("instance_change", || {
        with_runtime(|rt| rt.change_instance(instance_id, object_index, run_event != 0)).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|_| 1)
    .unwrap_or(0)
}

/// Continues a trapped event's listener chain (SPEC_FULL.md §4.4,
/// "Dispatch"). Called by a mod listener with the exact `iter` handle it
/// was invoked with, to run the next listener (or the trap's
/// captured/default fallthrough once the chain is exhausted). Returns the
/// chain's proceed/cancel decision.
///
/// # Safety
/// `iter` must be the pointer the currently executing listener was called
/// with; `target`/`other` must be valid for the call's duration.
#[no_mangle]
pub unsafe extern "C" fn aer_event_continue(iter: *mut c_void, target: *mut c_void, other: *mut c_void) -> i32 {
    if iter.is_null() {
        return 0;
    }
    let iter: &mut crate::eventtrap::EventIter<'_> = &mut *(iter as *mut crate::eventtrap::EventIter<'_>);
    iter.handle(target, other) as i32
}

/// `1` if `instance_id`'s class is `object_index` or a transitive
/// descendant of it, `0` if not, `-1` on failure.
#[no_mangle]
pub extern "C" fn aer_instance_is_compatible_with(instance_id: u32, object_index: u32) -> i32 {
    guard("instance_is_compatible_with", || {
        with_runtime(|rt| rt.is_instance_compatible(instance_id, object_index)).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|ok| ok as i32)
    .unwrap_or(-1)
}

macro_rules! local_setter {
    ($fn_name:ident, $variant:ident, $ty:ty) => {
        #[no_mangle]
        pub extern "C" fn $fn_name(instance_id: u32, name: *const c_char, public: i32, value: $ty) -> i32 {
            guard(stringify!($fn_name), || {
                let name = unsafe { str_arg(name) }?;
                with_runtime(|rt| rt.set_mod_local(instance_id, &name, public != 0, PrimitiveValue::$variant(value), None))
                    .ok_or(ErrorCode::SequenceBreak)?
            })
            .map(|_| 1)
            .unwrap_or(0)
        }
    };
}

macro_rules! local_getter {
    ($fn_name:ident, $variant:ident, $ty:ty, $out_default:expr) => {
        #[no_mangle]
        pub extern "C" fn $fn_name(instance_id: u32, name: *const c_char, public: i32, out: *mut $ty) -> i32 {
            guard(stringify!($fn_name), || {
                let name = unsafe { str_arg(name) }?;
                let value = with_runtime(|rt| rt.get_mod_local(instance_id, &name, public != 0)).ok_or(ErrorCode::SequenceBreak)??;
                match value {
                    PrimitiveValue::$variant(v) => Ok(v),
                    _ => Err(ErrorCode::FailedParse),
                }
            })
            .map(|v| {
                if !out.is_null() {
                    unsafe { *out = v };
                }
                1
            })
            .unwrap_or_else(|| {
                if !out.is_null() {
                    unsafe { *out = $out_default };
                }
                0
            })
        }
    };
}

local_setter!(aer_local_set_int, Int, i64);
local_setter!(aer_local_set_uint, UInt, u64);
local_setter!(aer_local_set_float, Float, f32);
local_setter!(aer_local_set_double, Double, f64);

/// Creates or overwrites a boolean mod-local.
#[no_mangle]
pub extern "C" fn aer_local_set_bool(instance_id: u32, name: *const c_char, public: i32, value: i32) -> i32 {
    guard("aer_local_set_bool", || {
        let name = unsafe { str_arg(name) }?;
        with_runtime(|rt| rt.set_mod_local(instance_id, &name, public != 0, PrimitiveValue::Bool(value != 0), None))
            .ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|_| 1)
    .unwrap_or(0)
}

local_getter!(aer_local_get_int, Int, i64, 0);
local_getter!(aer_local_get_uint, UInt, u64, 0);
local_getter!(aer_local_get_float, Float, f32, 0.0);
local_getter!(aer_local_get_double, Double, f64, 0.0);

/// Reads a boolean mod-local into `*out` (`0`/`1`). Returns `1` on success.
#[no_mangle]
pub extern "C" fn aer_local_get_bool(instance_id: u32, name: *const c_char, public: i32, out: *mut i32) -> i32 {
    guard("aer_local_get_bool", || {
        let name = unsafe { str_arg(name) }?;
        let value = with_runtime(|rt| rt.get_mod_local(instance_id, &name, public != 0)).ok_or(ErrorCode::SequenceBreak)??;
        match value {
            PrimitiveValue::Bool(v) => Ok(v),
            _ => Err(ErrorCode::FailedParse),
        }
    })
    .map(|v| {
        if !out.is_null() {
            unsafe { *out = v as i32 };
        }
        1
    })
    .unwrap_or(0)
}

/// Creates or overwrites a pointer-valued mod-local, with an optional
/// destructor run when the local is later deleted (explicitly, or via
/// orphan pruning).
///
/// # Safety
/// `ptr` must either be null or point into memory valid for at least as
/// long as the mod-local lives; `name` must be a valid C string.
#[no_mangle]
pub unsafe extern "C" fn aer_local_set_ptr(
    instance_id: u32,
    name: *const c_char,
    public: i32,
    ptr: *mut c_void,
    destructor: Option<mre_common::ffi::ModLocalDestructorFn>,
) -> i32 {
    guard("aer_local_set_ptr", || {
        let name = str_arg(name)?;
        let value = PrimitiveValue::Ptr(PointerValue::new(ptr));
        with_runtime(|rt| rt.set_mod_local(instance_id, &name, public != 0, value, destructor)).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|_| 1)
    .unwrap_or(0)
}

/// Reads a pointer-valued mod-local. Returns the pointer, or null on
/// failure (including "local exists but holds a non-pointer value").
#[no_mangle]
pub extern "C" fn aer_local_get_ptr(instance_id: u32, name: *const c_char, public: i32) -> *mut c_void {
    guard("aer_local_get_ptr", || {
        let name = unsafe { str_arg(name) }?;
        let value = with_runtime(|rt| rt.get_mod_local(instance_id, &name, public != 0)).ok_or(ErrorCode::SequenceBreak)??;
        match value {
            PrimitiveValue::Ptr(p) => Ok(p.as_ptr()),
            _ => Err(ErrorCode::FailedParse),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Resolves `name` against an instance's VM-owned local table. Returns
/// null on failure (including "no local by that name").
#[no_mangle]
pub extern "C" fn aer_instance_get_vm_local(instance_id: u32, name: *const c_char) -> *mut c_void {
    guard("aer_instance_get_vm_local", || {
        let name = unsafe { str_arg(name) }?;
        with_runtime(|rt| rt.get_vm_local(instance_id, &name)).ok_or(ErrorCode::SequenceBreak)?
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Deletes a mod-local, optionally running its destructor.
#[no_mangle]
pub extern "C" fn aer_local_delete(instance_id: u32, name: *const c_char, public: i32, run_destructor: i32) -> i32 {
    guard("aer_local_delete", || {
        let name = unsafe { str_arg(name) }?;
        with_runtime(|rt| rt.delete_mod_local(instance_id, &name, public != 0, run_destructor != 0)).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|_| 1)
    .unwrap_or(0)
}

/// Records `key -> value` as a double scalar for the currently executing
/// mod's savedata (SPEC_FULL.md §4.6).
#[no_mangle]
pub extern "C" fn aer_save_set_double(key: *const c_char, value: f64) -> i32 {
    guard("aer_save_set_double", || {
        let key = unsafe { str_arg(key) }?;
        with_runtime(|rt| rt.set_saved(&key, SaveScalar::Double(value))).ok_or(ErrorCode::SequenceBreak)?;
        Ok(())
    })
    .map(|_| 1)
    .unwrap_or(0)
}

/// Records `key -> value` as a string scalar.
///
/// # Safety
/// `key` and `value` must be valid null-terminated C strings.
#[no_mangle]
pub unsafe extern "C" fn aer_save_set_string(key: *const c_char, value: *const c_char) -> i32 {
    guard("aer_save_set_string", || {
        let key = str_arg(key)?;
        let value = str_arg(value)?;
        with_runtime(|rt| rt.set_saved(&key, SaveScalar::Str(value))).ok_or(ErrorCode::SequenceBreak)?;
        Ok(())
    })
    .map(|_| 1)
    .unwrap_or(0)
}

/// Reads back a double-valued savedata entry.
#[no_mangle]
pub extern "C" fn aer_save_get_double(key: *const c_char, out: *mut f64) -> i32 {
    guard("aer_save_get_double", || {
        let key = unsafe { str_arg(key) }?;
        let value = with_runtime(|rt| rt.get_saved(&key)).ok_or(ErrorCode::SequenceBreak)??;
        match value {
            SaveScalar::Double(d) => Ok(d),
            _ => Err(ErrorCode::FailedParse),
        }
    })
    .map(|v| {
        if !out.is_null() {
            unsafe { *out = v };
        }
        1
    })
    .unwrap_or(0)
}

/// Reads back a string-valued savedata entry into `buf`. Returns the
/// string's byte length (excluding the null terminator); a caller passes
/// `buf_len = 0` to probe the size first. The written bytes are always
/// null-terminated when `buf` is non-null and `buf_len > 0`.
///
/// # Safety
/// `buf` must be valid for `buf_len` bytes, or null.
#[no_mangle]
pub unsafe extern "C" fn aer_save_get_string(key: *const c_char, buf: *mut c_char, buf_len: u32) -> i32 {
    guard("aer_save_get_string", || {
        let key = str_arg(key)?;
        let value = with_runtime(|rt| rt.get_saved(&key)).ok_or(ErrorCode::SequenceBreak)??;
        match value {
            SaveScalar::Str(s) => Ok(s),
            _ => Err(ErrorCode::FailedParse),
        }
    })
    .map(|s| {
        write_cstr(&s, buf, buf_len);
        s.len() as i32
    })
    .unwrap_or(-1)
}

unsafe fn write_cstr(s: &str, buf: *mut c_char, buf_len: u32) {
    if buf.is_null() || buf_len == 0 {
        return;
    }
    let bytes = s.as_bytes();
    let n = bytes.len().min(buf_len as usize - 1);
    std::ptr::copy_nonoverlapping(bytes.as_ptr() as *const c_char, buf, n);
    *buf.add(n) = 0;
}

/// Typed config reads for the calling mod's own `<modname>.*` namespace
/// (SPEC_FULL.md §4.7).
#[no_mangle]
pub extern "C" fn aer_config_get_bool(key: *const c_char, out: *mut i32) -> i32 {
    guard("aer_config_get_bool", || {
        let key = unsafe { str_arg(key) }?;
        with_runtime(|rt| rt.config.get_bool(&key)).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|v| {
        if !out.is_null() {
            unsafe { *out = v as i32 };
        }
        1
    })
    .unwrap_or(0)
}

/// See [`aer_config_get_bool`].
#[no_mangle]
pub extern "C" fn aer_config_get_int(key: *const c_char, out: *mut i64) -> i32 {
    guard("aer_config_get_int", || {
        let key = unsafe { str_arg(key) }?;
        with_runtime(|rt| rt.config.get_int(&key)).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|v| {
        if !out.is_null() {
            unsafe { *out = v };
        }
        1
    })
    .unwrap_or(0)
}

/// See [`aer_config_get_bool`].
#[no_mangle]
pub extern "C" fn aer_config_get_double(key: *const c_char, out: *mut f64) -> i32 {
    guard("aer_config_get_double", || {
        let key = unsafe { str_arg(key) }?;
        with_runtime(|rt| rt.config.get_double(&key)).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|v| {
        if !out.is_null() {
            unsafe { *out = v };
        }
        1
    })
    .unwrap_or(0)
}

/// See [`aer_config_get_bool`]. Same probing convention as
/// [`aer_save_get_string`].
///
/// # Safety
/// `buf` must be valid for `buf_len` bytes, or null.
#[no_mangle]
pub unsafe extern "C" fn aer_config_get_string(key: *const c_char, buf: *mut c_char, buf_len: u32) -> i32 {
    guard("aer_config_get_string", || {
        let key = str_arg(key)?;
        with_runtime(|rt| rt.config.get_string(&key)).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|s| {
        write_cstr(&s, buf, buf_len);
        s.len() as i32
    })
    .unwrap_or(-1)
}

/// Registers a sprite asset from a name and a file path. Returns its
/// index, or `-1` on failure.
///
/// # Safety
/// `name` and `path` must be valid null-terminated C strings.
#[no_mangle]
pub unsafe extern "C" fn aer_sprite_register(name: *const c_char, path: *const c_char) -> i32 {
    guard("aer_sprite_register", || {
        let name = str_arg(name)?;
        let path = str_arg(path)?;
        with_runtime(|rt| rt.register_sprite(&name, &path)).ok_or(ErrorCode::SequenceBreak)?
    })
    .unwrap_or(-1)
}

/// Registers a font asset. Returns its index, or `-1` on failure.
///
/// # Safety
/// `name` and `path` must be valid null-terminated C strings.
#[no_mangle]
pub unsafe extern "C" fn aer_font_register(name: *const c_char, path: *const c_char, size: i32) -> i32 {
    guard("aer_font_register", || {
        let name = str_arg(name)?;
        let path = str_arg(path)?;
        with_runtime(|rt| rt.register_font(&name, &path, size)).ok_or(ErrorCode::SequenceBreak)?
    })
    .unwrap_or(-1)
}

/// Switches the active room.
#[no_mangle]
pub extern "C" fn aer_room_goto(room_index: i32) -> i32 {
    guard("aer_room_goto", || with_runtime(|rt| rt.room_goto(room_index)).ok_or(ErrorCode::SequenceBreak)?)
        .map(|_| 1)
        .unwrap_or(0)
}

/// Plays `sound_index`. Returns its channel handle, or `-1` on failure.
#[no_mangle]
pub extern "C" fn aer_audio_play(sound_index: i32) -> i32 {
    guard("aer_audio_play", || with_runtime(|rt| rt.audio_play(sound_index)).ok_or(ErrorCode::SequenceBreak)?).unwrap_or(-1)
}

/// Stops every channel playing `sound_index`.
#[no_mangle]
pub extern "C" fn aer_audio_stop(sound_index: i32) {
    let _ = guard("aer_audio_stop", || with_runtime(|rt| rt.audio_stop(sound_index)).ok_or(ErrorCode::SequenceBreak)?);
}

/// Draws an outlined or filled rectangle in world space.
#[no_mangle]
pub extern "C" fn aer_draw_rectangle(x1: f64, y1: f64, x2: f64, y2: f64, outline: i32) {
    let _ = guard("aer_draw_rectangle", || {
        with_runtime(|rt| rt.draw_rectangle(x1, y1, x2, y2, outline != 0)).ok_or(ErrorCode::SequenceBreak)?
    });
}

/// Draws a sprite frame at a position.
#[no_mangle]
pub extern "C" fn aer_draw_sprite(sprite_index: i32, image_index: i32, x: f64, y: f64) {
    let _ = guard("aer_draw_sprite", || {
        with_runtime(|rt| rt.draw_sprite(sprite_index, image_index, x, y)).ok_or(ErrorCode::SequenceBreak)?
    });
}

/// Draws text at a position using the active font.
///
/// # Safety
/// `text` must be a valid null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn aer_draw_text(x: f64, y: f64, text: *const c_char) {
    let _ = guard("aer_draw_text", || {
        let text = str_arg(text)?;
        with_runtime(|rt| rt.draw_text(x, y, &text)).ok_or(ErrorCode::SequenceBreak)?
    });
}

/// Draws a line segment in world space.
#[no_mangle]
pub extern "C" fn aer_draw_line(x1: f64, y1: f64, x2: f64, y2: f64) {
    let _ = guard("aer_draw_line", || with_runtime(|rt| rt.draw_line(x1, y1, x2, y2)).ok_or(ErrorCode::SequenceBreak)?);
}

fn phase_from_raw(phase: i32) -> InputPhase {
    match phase {
        1 => InputPhase::Pressed,
        2 => InputPhase::Released,
        _ => InputPhase::Down,
    }
}

/// Reads this-step keyboard state. `phase`: `0` down, `1` pressed, `2`
/// released.
#[no_mangle]
pub extern "C" fn aer_key_state(keycode: i32, phase: i32) -> i32 {
    guard("aer_key_state", || {
        with_runtime(|rt| rt.key_state(keycode, phase_from_raw(phase))).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|v| v as i32)
    .unwrap_or(0)
}

/// Reads this-step mouse-button state. Same `phase` convention as
/// [`aer_key_state`].
#[no_mangle]
pub extern "C" fn aer_mouse_state(button: i32, phase: i32) -> i32 {
    guard("aer_mouse_state", || {
        with_runtime(|rt| rt.mouse_state(button, phase_from_raw(phase))).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|v| v as i32)
    .unwrap_or(0)
}

/// Reads a scalar instance property.
#[no_mangle]
pub extern "C" fn aer_instance_get_property(instance_id: u32, property: i32, out: *mut f64) -> i32 {
    guard("aer_instance_get_property", || {
        let property = raw_to_property(property)?;
        with_runtime(|rt| rt.get_instance_property(instance_id, property)).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|v| {
        if !out.is_null() {
            unsafe { *out = v };
        }
        1
    })
    .unwrap_or(0)
}

/// Writes a scalar instance property.
#[no_mangle]
pub extern "C" fn aer_instance_set_property(instance_id: u32, property: i32, value: f64) -> i32 {
    guard("aer_instance_set_property", || {
        let property = raw_to_property(property)?;
        with_runtime(|rt| rt.set_instance_property(instance_id, property, value)).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|_| 1)
    .unwrap_or(0)
}

fn raw_to_property(raw: i32) -> Result<InstanceProperty, ErrorCode> {
    use InstanceProperty::*;
    Ok(match raw {
        0 => X,
        1 => Y,
        2 => Speed,
        3 => Direction,
        4 => HSpeed,
        5 => VSpeed,
        6 => SpriteIndex,
        7 => ImageIndex,
        8 => Depth,
        9 => Visible,
        10 => Solid,
        11 => Persistent,
        _ => return Err(ErrorCode::BadValue),
    })
}

/// Reads an instance's alarm countdown.
#[no_mangle]
pub extern "C" fn aer_instance_get_alarm(instance_id: u32, index: u32, out: *mut i32) -> i32 {
    guard("aer_instance_get_alarm", || {
        with_runtime(|rt| rt.get_instance_alarm(instance_id, index)).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|v| {
        if !out.is_null() {
            unsafe { *out = v };
        }
        1
    })
    .unwrap_or(0)
}

/// Sets an instance's alarm countdown; a negative value disarms it.
#[no_mangle]
pub extern "C" fn aer_instance_set_alarm(instance_id: u32, index: u32, value: i32) -> i32 {
    guard("aer_instance_set_alarm", || {
        with_runtime(|rt| rt.set_instance_alarm(instance_id, index, value)).ok_or(ErrorCode::SequenceBreak)?
    })
    .map(|_| 1)
    .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_round_trips_through_raw() {
        for code in [
            ErrorCode::NullArgument,
            ErrorCode::SequenceBreak,
            ErrorCode::OutOfMemory,
            ErrorCode::FailedLookup,
            ErrorCode::FailedParse,
            ErrorCode::BadFile,
            ErrorCode::BadValue,
        ] {
            assert!(error_code_to_raw(code) > 0);
        }
    }

    #[test]
    fn raw_to_property_rejects_out_of_range() {
        assert!(raw_to_property(99).is_err());
        assert!(raw_to_property(0).is_ok());
    }

    #[test]
    fn write_cstr_truncates_and_terminates() {
        let mut buf = [1i8; 4];
        unsafe { write_cstr("hello", buf.as_mut_ptr(), buf.len() as u32) };
        assert_eq!(buf[3], 0);
    }
}
