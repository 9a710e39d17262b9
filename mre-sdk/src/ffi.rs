//! Raw bindings to the `mre-runtime` C ABI (`mre_runtime::abi`). A mod's
//! `cdylib` links against these symbols directly, the way any shared
//! library depends on another already resident in the host process —
//! there is no WASM import table to cross here, just an ordinary dynamic
//! link. Nothing in this module is meant to be called outside the rest of
//! this crate; see the sibling modules for the safe surface mod authors
//! actually write against.

use std::os::raw::{c_char, c_void};

use mre_common::ffi::ModListenerFn;

extern "C" {
    pub fn aer_last_error() -> i32;

    pub fn aer_register_object(
        name: *const c_char,
        parent: i32,
        sprite: i32,
        mask: i32,
        depth: i32,
        visible: i32,
        collisions: i32,
        persistent: i32,
    ) -> i32;

    pub fn aer_attach_listener(object_index: u32, event_type: i32, event_number: u32, func: ModListenerFn) -> i32;
    pub fn aer_event_continue(iter: *mut c_void, target: *mut c_void, other: *mut c_void) -> i32;

    pub fn aer_instance_get_all(buf: *mut u32, buf_len: u32) -> i32;
    pub fn aer_instance_get_by_object(object_index: u32, recursive: i32, buf: *mut u32, buf_len: u32) -> i32;
    pub fn aer_instance_id_of(ptr: *mut c_void) -> u32;
    pub fn aer_instance_create(object_index: i32, x: f64, y: f64) -> u32;
    pub fn aer_instance_destroy(instance_id: u32, run_event: i32) -> i32;
    pub fn aer_instance_change(instance_id: u32, object_index: i32, run_event: i32) -> i32;
    pub fn aer_instance_is_compatible_with(instance_id: u32, object_index: u32) -> i32;
    pub fn aer_instance_get_vm_local(instance_id: u32, name: *const c_char) -> *mut c_void;

    pub fn aer_local_set_bool(instance_id: u32, name: *const c_char, public: i32, value: i32) -> i32;
    pub fn aer_local_set_int(instance_id: u32, name: *const c_char, public: i32, value: i64) -> i32;
    pub fn aer_local_set_uint(instance_id: u32, name: *const c_char, public: i32, value: u64) -> i32;
    pub fn aer_local_set_float(instance_id: u32, name: *const c_char, public: i32, value: f32) -> i32;
    pub fn aer_local_set_double(instance_id: u32, name: *const c_char, public: i32, value: f64) -> i32;
    pub fn aer_local_set_ptr(
        instance_id: u32,
        name: *const c_char,
        public: i32,
        ptr: *mut c_void,
        destructor: Option<mre_common::ffi::ModLocalDestructorFn>,
    ) -> i32;

    pub fn aer_local_get_bool(instance_id: u32, name: *const c_char, public: i32, out: *mut i32) -> i32;
    pub fn aer_local_get_int(instance_id: u32, name: *const c_char, public: i32, out: *mut i64) -> i32;
    pub fn aer_local_get_uint(instance_id: u32, name: *const c_char, public: i32, out: *mut u64) -> i32;
    pub fn aer_local_get_float(instance_id: u32, name: *const c_char, public: i32, out: *mut f32) -> i32;
    pub fn aer_local_get_double(instance_id: u32, name: *const c_char, public: i32, out: *mut f64) -> i32;
    pub fn aer_local_get_ptr(instance_id: u32, name: *const c_char, public: i32) -> *mut c_void;

    pub fn aer_local_delete(instance_id: u32, name: *const c_char, public: i32, run_destructor: i32) -> i32;

    pub fn aer_save_set_double(key: *const c_char, value: f64) -> i32;
    pub fn aer_save_set_string(key: *const c_char, value: *const c_char) -> i32;
    pub fn aer_save_get_double(key: *const c_char, out: *mut f64) -> i32;
    pub fn aer_save_get_string(key: *const c_char, buf: *mut c_char, buf_len: u32) -> i32;

    pub fn aer_config_get_bool(key: *const c_char, out: *mut i32) -> i32;
    pub fn aer_config_get_int(key: *const c_char, out: *mut i64) -> i32;
    pub fn aer_config_get_double(key: *const c_char, out: *mut f64) -> i32;
    pub fn aer_config_get_string(key: *const c_char, buf: *mut c_char, buf_len: u32) -> i32;

    pub fn aer_sprite_register(name: *const c_char, path: *const c_char) -> i32;
    pub fn aer_font_register(name: *const c_char, path: *const c_char, size: i32) -> i32;
    pub fn aer_room_goto(room_index: i32) -> i32;
    pub fn aer_audio_play(sound_index: i32) -> i32;
    pub fn aer_audio_stop(sound_index: i32);
    pub fn aer_draw_rectangle(x1: f64, y1: f64, x2: f64, y2: f64, outline: i32);
    pub fn aer_draw_sprite(sprite_index: i32, image_index: i32, x: f64, y: f64);
    pub fn aer_draw_text(x: f64, y: f64, text: *const c_char);
    pub fn aer_draw_line(x1: f64, y1: f64, x2: f64, y2: f64);
    pub fn aer_key_state(keycode: i32, phase: i32) -> i32;
    pub fn aer_mouse_state(button: i32, phase: i32) -> i32;
    pub fn aer_instance_get_property(instance_id: u32, property: i32, out: *mut f64) -> i32;
    pub fn aer_instance_set_property(instance_id: u32, property: i32, value: f64) -> i32;
    pub fn aer_instance_get_alarm(instance_id: u32, index: u32, out: *mut i32) -> i32;
    pub fn aer_instance_set_alarm(instance_id: u32, index: u32, value: i32) -> i32;
}
