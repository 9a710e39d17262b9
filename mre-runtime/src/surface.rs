//! The pass-through surface (SPEC_FULL.md §4.9): thin, stage-gated
//! wrappers around host functions that carry no engine-level invariants
//! of their own. Sprite/font registration, room control, audio, draw
//! primitives, input snapshots, and per-field instance accessors.

use std::ffi::CString;
use std::os::raw::c_void;

use mre_common::ffi::InstanceProperty;
use mre_common::{ErrorCode, MreResult, ALARM_COUNT};

use crate::hostbind::HostBinding;

/// Registers a sprite asset from a name and a file path.
pub fn register_sprite(host: &HostBinding, name: &str, path: &str) -> MreResult<i32> {
    let name = CString::new(name).map_err(|_| ErrorCode::BadValue)?;
    let path = CString::new(path).map_err(|_| ErrorCode::BadValue)?;
    host.sprite_register(&name, &path)
}

/// Registers a font asset from a name, a file path, and a point size.
pub fn register_font(host: &HostBinding, name: &str, path: &str, size: i32) -> MreResult<i32> {
    let name = CString::new(name).map_err(|_| ErrorCode::BadValue)?;
    let path = CString::new(path).map_err(|_| ErrorCode::BadValue)?;
    host.font_register(&name, &path, size)
}

/// Switches the active room.
pub fn room_goto(host: &HostBinding, room_index: i32) -> MreResult<()> {
    host.room_goto(room_index)
}

/// Plays a sound, returning its channel handle.
pub fn audio_play(host: &HostBinding, sound_index: i32) -> MreResult<i32> {
    host.audio_play(sound_index)
}

/// Stops every channel playing a sound.
pub fn audio_stop(host: &HostBinding, sound_index: i32) -> MreResult<()> {
    host.audio_stop(sound_index)
}

/// Draws an outlined or filled rectangle in world space.
pub fn draw_rectangle(host: &HostBinding, x1: f64, y1: f64, x2: f64, y2: f64, outline: bool) -> MreResult<()> {
    host.draw_rectangle(x1, y1, x2, y2, outline)
}

/// Draws a sprite frame at a position.
pub fn draw_sprite(host: &HostBinding, sprite_index: i32, image_index: i32, x: f64, y: f64) -> MreResult<()> {
    host.draw_sprite(sprite_index, image_index, x, y)
}

/// Draws text at a position using the active font.
pub fn draw_text(host: &HostBinding, x: f64, y: f64, text: &str) -> MreResult<()> {
    let text = CString::new(text).map_err(|_| ErrorCode::BadValue)?;
    host.draw_text(x, y, &text)
}

/// Draws a line segment in world space.
pub fn draw_line(host: &HostBinding, x1: f64, y1: f64, x2: f64, y2: f64) -> MreResult<()> {
    host.draw_line(x1, y1, x2, y2)
}

/// One step's input snapshot query (SPEC_FULL.md §4.9, "input snapshots").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPhase {
    /// Held down this step.
    Down,
    /// Transitioned to down this step.
    Pressed,
    /// Transitioned to up this step.
    Released,
}

/// Reads this-step keyboard state for `keycode`.
pub fn key_state(host: &HostBinding, keycode: i32, phase: InputPhase) -> MreResult<bool> {
    match phase {
        InputPhase::Down => host.key_down(keycode),
        InputPhase::Pressed => host.key_pressed(keycode),
        InputPhase::Released => host.key_released(keycode),
    }
}

/// Reads this-step mouse-button state for `button`.
pub fn mouse_state(host: &HostBinding, button: i32, phase: InputPhase) -> MreResult<bool> {
    match phase {
        InputPhase::Down => host.mouse_down(button),
        InputPhase::Pressed => host.mouse_pressed(button),
        InputPhase::Released => host.mouse_released(button),
    }
}

/// Reads a scalar instance property.
///
/// # Safety
/// `instance` must be a valid instance pointer for the duration of the
/// call.
pub unsafe fn get_property(
    host: &HostBinding,
    instance: *mut c_void,
    property: InstanceProperty,
) -> MreResult<f64> {
    host.instance_get_property(instance, property)
}

/// Writes a scalar instance property.
///
/// # Safety
/// `instance` must be a valid instance pointer for the duration of the
/// call.
pub unsafe fn set_property(
    host: &HostBinding,
    instance: *mut c_void,
    property: InstanceProperty,
    value: f64,
) -> MreResult<()> {
    host.instance_set_property(instance, property, value)
}

/// Reads an instance's alarm countdown. Fails with
/// [`ErrorCode::BadValue`] if `index` is out of the 0..12 range (the
/// direct-accessor counterpart of the `failed-lookup`-on-attach rule in
/// the event-trap engine; SPEC_FULL.md §8 testable property 12).
///
/// # Safety
/// `instance` must be a valid instance pointer for the duration of the
/// call.
pub unsafe fn get_alarm(host: &HostBinding, instance: *mut c_void, index: u32) -> MreResult<i32> {
    if index >= ALARM_COUNT {
        return Err(ErrorCode::BadValue);
    }
    host.instance_get_alarm(instance, index)
}

/// Sets an instance's alarm countdown; a negative value disarms it.
///
/// # Safety
/// `instance` must be a valid instance pointer for the duration of the
/// call.
pub unsafe fn set_alarm(host: &HostBinding, instance: *mut c_void, index: u32, value: i32) -> MreResult<()> {
    if index >= ALARM_COUNT {
        return Err(ErrorCode::BadValue);
    }
    host.instance_set_alarm(instance, index, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alarm_index_past_bound_is_bad_value() {
        let host = HostBinding::default();
        let err = unsafe { get_alarm(&host, std::ptr::null_mut(), ALARM_COUNT) }.unwrap_err();
        assert_eq!(err, ErrorCode::BadValue);
    }

    #[test]
    fn unbound_host_reports_sequence_break_for_room_goto() {
        let host = HostBinding::default();
        let err = room_goto(&host, 0).unwrap_err();
        assert_eq!(err, ErrorCode::SequenceBreak);
    }
}
