//! The host-VM binding layer (SPEC_FULL.md §4, component table). Records
//! the pointers the host hands the MRE at `init()` and exposes every other
//! module's only legal way to reach into host-owned memory.
//!
//! Nothing here is safe in the Rust sense — every method dereferences a
//! pointer the host promised, at `init()` time, would stay valid for the
//! process lifetime. Bugs on the host side (a stale pointer, a struct
//! layout mismatch) are undefined behavior no amount of Rust-side
//! bookkeeping can catch; this module's job is to make sure the *MRE's own*
//! code never adds more ways for that to go wrong than the host already
//! introduced.

use std::os::raw::c_void;

use mre_common::error::ErrorCode;
use mre_common::ffi::{EventHandlerFn, HostFunctions, HostGlobals, VmObject};
use mre_common::MreResult;

/// Holds the two pointer structs the host hands the MRE once at `init()`.
/// `None` before `init()` runs, or for the lifetime of a test that never
/// calls [`bind`](Self::bind) and only exercises code paths that don't
/// need a bound host (see [`HostGlobals`]/[`HostFunctions`]'s
/// [`Mocked`](mre_common::Mocked) impls for tests that do).
#[derive(Default)]
pub struct HostBinding {
    globals: Option<HostGlobals>,
    functions: Option<HostFunctions>,
}

impl HostBinding {
    /// Records the host's globals and functions structs. Overwrites
    /// whatever was previously recorded — `init()` is only ever called
    /// once per process, so this is not expected to happen twice in
    /// practice, but the binding layer itself does not enforce that; the
    /// stage machine does (SPEC_FULL.md §4.1).
    ///
    /// # Safety
    /// The caller (the `init` FFI entry point) must guarantee every
    /// pointer inside `globals`/`functions` is valid and will remain valid
    /// for the rest of the process.
    pub unsafe fn bind(&mut self, globals: HostGlobals, functions: HostFunctions) {
        self.globals = Some(globals);
        self.functions = Some(functions);
    }

    /// Whether `bind` has been called yet.
    pub fn is_bound(&self) -> bool {
        self.globals.is_some() && self.functions.is_some()
    }

    fn globals(&self) -> MreResult<&HostGlobals> {
        self.globals.as_ref().ok_or(ErrorCode::SequenceBreak)
    }

    fn functions(&self) -> MreResult<&HostFunctions> {
        self.functions.as_ref().ok_or(ErrorCode::SequenceBreak)
    }

    /// Number of object classes known to the VM (vanilla + mod-registered
    /// so far).
    pub fn object_count(&self) -> MreResult<u32> {
        Ok(self.globals()?.object_count)
    }

    /// Calls the host's "add object" function, returning the freshly
    /// allocated object index.
    pub fn object_add(&mut self) -> MreResult<i32> {
        let idx = unsafe { (self.functions()?.object_add)() };
        if idx < 0 {
            return Err(ErrorCode::OutOfMemory);
        }
        if let Some(globals) = self.globals.as_mut() {
            globals.object_count += 1;
        }
        Ok(idx)
    }

    /// Reads the raw object record at `object_index`.
    ///
    /// # Safety
    /// `object_index` must be `< object_count()`.
    pub unsafe fn object_at(&self, object_index: u32) -> MreResult<*mut VmObject> {
        let globals = self.globals()?;
        if object_index >= globals.object_count {
            return Err(ErrorCode::FailedLookup);
        }
        Ok((globals.object_table as *mut VmObject).add(object_index as usize))
    }

    /// Creates a new instance of `object_index` at `(x, y)`.
    pub fn instance_create(&self, object_index: i32, x: f64, y: f64) -> MreResult<u32> {
        let id = unsafe { (self.functions()?.instance_create)(object_index, x, y) };
        Ok(id)
    }

    /// Destroys `instance_id`, optionally running its destroy event first.
    pub fn instance_destroy(&self, instance_id: u32, run_event: bool) -> MreResult<()> {
        let ok = unsafe { (self.functions()?.instance_destroy)(instance_id, run_event as i32) };
        if ok == 0 {
            return Err(ErrorCode::FailedLookup);
        }
        Ok(())
    }

    /// Reclassifies `instance_id` as `object_index`.
    pub fn instance_change(
        &self,
        instance_id: u32,
        object_index: i32,
        run_event: bool,
    ) -> MreResult<()> {
        let ok = unsafe {
            (self.functions()?.instance_change)(instance_id, object_index, run_event as i32)
        };
        if ok == 0 {
            return Err(ErrorCode::FailedLookup);
        }
        Ok(())
    }

    /// Invokes `target`'s `(event_type, event_number)` event directly,
    /// bypassing any trap.
    ///
    /// # Safety
    /// `target`/`other` must be valid instance pointers for the duration
    /// of the call, or null.
    pub unsafe fn event_perform(
        &self,
        target: *mut c_void,
        other: *mut c_void,
        event_type: i32,
        event_number: i32,
    ) -> MreResult<()> {
        (self.functions()?.event_perform)(target, other, event_type, event_number);
        Ok(())
    }

    /// Draws `target` with its current sprite/image state, bypassing any
    /// draw trap.
    ///
    /// # Safety
    /// `target` must be a valid instance pointer for the duration of the
    /// call.
    pub unsafe fn draw_self(&self, target: *mut c_void) -> MreResult<()> {
        (self.functions()?.draw_self)(target);
        Ok(())
    }

    /// Installs `handler` as the event-wrapper slot's function pointer and
    /// returns whatever handler previously occupied it (`None` if the slot
    /// was empty).
    ///
    /// # Safety
    /// `object_index`/`event_type_index`/`event_number` must identify a
    /// slot the event trap engine has already sized the object's event
    /// array to cover.
    pub unsafe fn install_handler(
        &self,
        object_index: u32,
        event_type_index: usize,
        event_number: u32,
        handler: EventHandlerFn,
    ) -> MreResult<Option<EventHandlerFn>> {
        let obj = self.object_at(object_index)?;
        let array = (*obj).event_arrays[event_type_index];
        if array.is_null() || event_number >= (*obj).event_array_lens[event_type_index] {
            return Err(ErrorCode::FailedLookup);
        }
        let slot = array.add(event_number as usize);
        let previous = (*slot).handler;
        (*slot).handler = Some(handler);
        Ok(previous)
    }

    /// Direct, read-only access to the globals struct for modules (the
    /// instance manager, the subscription masker) that need to walk raw
    /// host tables themselves.
    pub fn globals_ref(&self) -> MreResult<&HostGlobals> {
        self.globals()
    }

    /// `true` while the host considers the game paused this step.
    pub fn is_paused(&self) -> MreResult<bool> {
        let ptr = self.globals()?.paused;
        if ptr.is_null() {
            return Ok(false);
        }
        Ok(unsafe { *ptr } != 0)
    }

    /// Resolves `name` against `instance`'s VM-owned local table.
    ///
    /// # Safety
    /// `instance` must be a valid instance pointer for the duration of the
    /// call.
    pub unsafe fn instance_get_local(
        &self,
        instance: *mut c_void,
        name: &std::ffi::CStr,
    ) -> MreResult<*mut c_void> {
        let ptr = (self.functions()?.instance_get_local)(instance, name.as_ptr());
        if ptr.is_null() {
            return Err(ErrorCode::FailedLookup);
        }
        Ok(ptr)
    }

    /// Registers a sprite asset, returning its index.
    pub fn sprite_register(&self, name: &std::ffi::CStr, path: &std::ffi::CStr) -> MreResult<i32> {
        let idx = unsafe { (self.functions()?.sprite_register)(name.as_ptr(), path.as_ptr()) };
        if idx < 0 {
            return Err(ErrorCode::FailedLookup);
        }
        Ok(idx)
    }

    /// Registers a font asset, returning its index.
    pub fn font_register(&self, name: &std::ffi::CStr, path: &std::ffi::CStr, size: i32) -> MreResult<i32> {
        let idx = unsafe { (self.functions()?.font_register)(name.as_ptr(), path.as_ptr(), size) };
        if idx < 0 {
            return Err(ErrorCode::FailedLookup);
        }
        Ok(idx)
    }

    /// Switches the active room.
    pub fn room_goto(&self, room_index: i32) -> MreResult<()> {
        let ok = unsafe { (self.functions()?.room_goto)(room_index) };
        if ok == 0 {
            return Err(ErrorCode::FailedLookup);
        }
        Ok(())
    }

    /// Plays a sound, returning its channel handle.
    pub fn audio_play(&self, sound_index: i32) -> MreResult<i32> {
        let handle = unsafe { (self.functions()?.audio_play)(sound_index) };
        if handle < 0 {
            return Err(ErrorCode::FailedLookup);
        }
        Ok(handle)
    }

    /// Stops every channel playing a sound.
    pub fn audio_stop(&self, sound_index: i32) -> MreResult<()> {
        unsafe { (self.functions()?.audio_stop)(sound_index) };
        Ok(())
    }

    /// Draws a rectangle in world space.
    pub fn draw_rectangle(&self, x1: f64, y1: f64, x2: f64, y2: f64, outline: bool) -> MreResult<()> {
        unsafe { (self.functions()?.draw_rectangle)(x1, y1, x2, y2, outline as i32) };
        Ok(())
    }

    /// Draws a sprite frame at a position.
    pub fn draw_sprite(&self, sprite_index: i32, image_index: i32, x: f64, y: f64) -> MreResult<()> {
        unsafe { (self.functions()?.draw_sprite)(sprite_index, image_index, x, y) };
        Ok(())
    }

    /// Draws text at a position, using the active font.
    pub fn draw_text(&self, x: f64, y: f64, text: &std::ffi::CStr) -> MreResult<()> {
        unsafe { (self.functions()?.draw_text)(x, y, text.as_ptr()) };
        Ok(())
    }

    /// Draws a line segment in world space.
    pub fn draw_line(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> MreResult<()> {
        unsafe { (self.functions()?.draw_line)(x1, y1, x2, y2) };
        Ok(())
    }

    /// Reads this-step key-down state.
    pub fn key_down(&self, keycode: i32) -> MreResult<bool> {
        Ok(unsafe { (self.functions()?.key_down)(keycode) } != 0)
    }

    /// Reads this-step key-pressed state.
    pub fn key_pressed(&self, keycode: i32) -> MreResult<bool> {
        Ok(unsafe { (self.functions()?.key_pressed)(keycode) } != 0)
    }

    /// Reads this-step key-released state.
    pub fn key_released(&self, keycode: i32) -> MreResult<bool> {
        Ok(unsafe { (self.functions()?.key_released)(keycode) } != 0)
    }

    /// Reads this-step mouse-button-down state.
    pub fn mouse_down(&self, button: i32) -> MreResult<bool> {
        Ok(unsafe { (self.functions()?.mouse_down)(button) } != 0)
    }

    /// Reads this-step mouse-button-pressed state.
    pub fn mouse_pressed(&self, button: i32) -> MreResult<bool> {
        Ok(unsafe { (self.functions()?.mouse_pressed)(button) } != 0)
    }

    /// Reads this-step mouse-button-released state.
    pub fn mouse_released(&self, button: i32) -> MreResult<bool> {
        Ok(unsafe { (self.functions()?.mouse_released)(button) } != 0)
    }

    /// Reads a scalar instance property.
    ///
    /// # Safety
    /// `instance` must be a valid instance pointer for the duration of the
    /// call.
    pub unsafe fn instance_get_property(
        &self,
        instance: *mut c_void,
        property: mre_common::ffi::InstanceProperty,
    ) -> MreResult<f64> {
        Ok((self.functions()?.instance_get_property)(instance, property as i32))
    }

    /// Writes a scalar instance property.
    ///
    /// # Safety
    /// `instance` must be a valid instance pointer for the duration of the
    /// call.
    pub unsafe fn instance_set_property(
        &self,
        instance: *mut c_void,
        property: mre_common::ffi::InstanceProperty,
        value: f64,
    ) -> MreResult<()> {
        (self.functions()?.instance_set_property)(instance, property as i32, value);
        Ok(())
    }

    /// Reads an instance's alarm countdown.
    ///
    /// # Safety
    /// `instance` must be a valid instance pointer for the duration of the
    /// call.
    pub unsafe fn instance_get_alarm(&self, instance: *mut c_void, index: u32) -> MreResult<i32> {
        Ok((self.functions()?.instance_get_alarm)(instance, index))
    }

    /// Sets an instance's alarm countdown.
    ///
    /// # Safety
    /// `instance` must be a valid instance pointer for the duration of the
    /// call.
    pub unsafe fn instance_set_alarm(&self, instance: *mut c_void, index: u32, value: i32) -> MreResult<()> {
        (self.functions()?.instance_set_alarm)(instance, index, value);
        Ok(())
    }

    /// Enumerates every double-valued entry in the host's save map.
    ///
    /// # Safety
    /// `visit` must not panic across the FFI boundary and must not call
    /// back into the MRE.
    pub unsafe fn save_map_for_each_double(
        &self,
        visit: mre_common::ffi::SaveMapVisitDoubleFn,
        ctx: *mut c_void,
    ) -> MreResult<()> {
        (self.functions()?.save_map_for_each_double)(visit, ctx);
        Ok(())
    }

    /// Enumerates every string-valued entry in the host's save map.
    ///
    /// # Safety
    /// Same as [`Self::save_map_for_each_double`].
    pub unsafe fn save_map_for_each_string(
        &self,
        visit: mre_common::ffi::SaveMapVisitStringFn,
        ctx: *mut c_void,
    ) -> MreResult<()> {
        (self.functions()?.save_map_for_each_string)(visit, ctx);
        Ok(())
    }

    /// Clears the host's save map before the MRE repopulates it entirely.
    pub fn save_map_clear(&self) -> MreResult<()> {
        unsafe { (self.functions()?.save_map_clear)() };
        Ok(())
    }

    /// Writes one double-valued entry into the host's save map by flat key.
    pub fn save_map_set_double(&self, key: &std::ffi::CStr, value: f64) -> MreResult<()> {
        unsafe { (self.functions()?.save_map_set_double)(key.as_ptr(), value) };
        Ok(())
    }

    /// Writes one string-valued entry into the host's save map by flat key.
    pub fn save_map_set_string(&self, key: &std::ffi::CStr, value: &std::ffi::CStr) -> MreResult<()> {
        unsafe { (self.functions()?.save_map_set_string)(key.as_ptr(), value.as_ptr()) };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_binding_reports_sequence_break() {
        let binding = HostBinding::default();
        assert!(!binding.is_bound());
        assert_eq!(binding.object_count().unwrap_err(), ErrorCode::SequenceBreak);
    }
}
