//! The pass-through surface (SPEC_FULL.md §4.9): sprite/font registration,
//! room control, audio, draw primitives and input snapshots.

use crate::{cstring, ffi, raw_error, AerResult};

/// Registers a sprite asset, returning its index.
pub fn register_sprite(name: &str, path: &str) -> AerResult<i32> {
    let name = cstring(name)?;
    let path = cstring(path)?;
    let index = unsafe { ffi::aer_sprite_register(name.as_ptr(), path.as_ptr()) };
    if index < 0 {
        Err(raw_error())
    } else {
        Ok(index)
    }
}

/// Registers a font asset, returning its index.
pub fn register_font(name: &str, path: &str, size: i32) -> AerResult<i32> {
    let name = cstring(name)?;
    let path = cstring(path)?;
    let index = unsafe { ffi::aer_font_register(name.as_ptr(), path.as_ptr(), size) };
    if index < 0 {
        Err(raw_error())
    } else {
        Ok(index)
    }
}

/// Switches the active room.
pub fn room_goto(room_index: i32) -> AerResult<()> {
    let ok = unsafe { ffi::aer_room_goto(room_index) };
    if ok == 0 {
        Err(raw_error())
    } else {
        Ok(())
    }
}

/// Plays a sound, returning its channel handle.
pub fn audio_play(sound_index: i32) -> AerResult<i32> {
    let channel = unsafe { ffi::aer_audio_play(sound_index) };
    if channel < 0 {
        Err(raw_error())
    } else {
        Ok(channel)
    }
}

/// Stops every channel playing a sound.
pub fn audio_stop(sound_index: i32) {
    unsafe { ffi::aer_audio_stop(sound_index) };
}

/// Draws an outlined or filled rectangle in world space.
pub fn draw_rectangle(x1: f64, y1: f64, x2: f64, y2: f64, outline: bool) {
    unsafe { ffi::aer_draw_rectangle(x1, y1, x2, y2, outline as i32) };
}

/// Draws a sprite frame at a position.
pub fn draw_sprite(sprite_index: i32, image_index: i32, x: f64, y: f64) {
    unsafe { ffi::aer_draw_sprite(sprite_index, image_index, x, y) };
}

/// Draws text at a position using the active font.
pub fn draw_text(x: f64, y: f64, text: &str) -> AerResult<()> {
    let text = cstring(text)?;
    unsafe { ffi::aer_draw_text(x, y, text.as_ptr()) };
    Ok(())
}

/// Draws a line segment in world space.
pub fn draw_line(x1: f64, y1: f64, x2: f64, y2: f64) {
    unsafe { ffi::aer_draw_line(x1, y1, x2, y2) };
}

/// One step's input snapshot query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPhase {
    /// Held down this step.
    Down,
    /// Transitioned to down this step.
    Pressed,
    /// Transitioned to up this step.
    Released,
}

fn phase_to_raw(phase: InputPhase) -> i32 {
    match phase {
        InputPhase::Down => 0,
        InputPhase::Pressed => 1,
        InputPhase::Released => 2,
    }
}

/// Reads this-step keyboard state for `keycode`.
pub fn key_state(keycode: i32, phase: InputPhase) -> bool {
    unsafe { ffi::aer_key_state(keycode, phase_to_raw(phase)) != 0 }
}

/// Reads this-step mouse-button state for `button`.
pub fn mouse_state(button: i32, phase: InputPhase) -> bool {
    unsafe { ffi::aer_mouse_state(button, phase_to_raw(phase)) != 0 }
}
