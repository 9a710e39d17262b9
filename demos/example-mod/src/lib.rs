//! A demo mod built against `mre-sdk`: registers a child object class,
//! chains a create listener and an alarm listener through it, keeps a
//! private per-instance mod-local, and round-trips one savedata scalar.
//! Exercises the scenarios `mre-runtime`'s integration tests drive
//! end-to-end through `libloading`.

use std::os::raw::c_void;
use std::sync::atomic::{AtomicU32, Ordering};

use mre_sdk::{config, define_mod, instance, listener, local, save, EventKind, ObjectBuilder};

/// The host game's existing "Hazard" object index. A real deployment reads
/// this from config or a well-known constant table; the demo hardcodes it
/// since no host process is actually attached when this crate is built.
const HAZARD_OBJECT: u32 = 0;

static CHILD_OBJECT: AtomicU32 = AtomicU32::new(u32::MAX);

extern "C" fn register_objects() {
    match ObjectBuilder::new("Child").parent(HAZARD_OBJECT).register() {
        Ok(index) => CHILD_OBJECT.store(index, Ordering::SeqCst),
        Err(err) => eprintln!("[example-mod] failed to register Child: {err}"),
    }
}

extern "C" fn register_object_listeners() {
    let child = CHILD_OBJECT.load(Ordering::SeqCst);
    if child == u32::MAX {
        return;
    }

    if let Err(err) = listener::attach(child, EventKind::Create, 0, on_child_create) {
        eprintln!("[example-mod] failed to attach create listener: {err}");
    }
    if let Err(err) = listener::attach(child, EventKind::Alarm, 0, on_child_alarm) {
        eprintln!("[example-mod] failed to attach alarm listener: {err}");
    }
}

extern "C" fn hp_destructor(_ptr: *mut c_void) {
    println!("[example-mod] hp local dropped");
}

/// Stamps a fresh `Child` with 100 hp before letting the rest of the
/// chain (and the VM's own create handler) run.
unsafe extern "C" fn on_child_create(iter: *mut c_void, target: *mut c_void, other: *mut c_void) -> i32 {
    if let Ok(inst) = instance::from_raw(target) {
        let _ = local::int::set(inst, "hp", false, 100);
    }
    let mut chain = listener::Chain::from_raw(iter);
    chain.next(target, other) as i32
}

/// Demonstrates subscription masking: attached to `Child` only, but fires
/// for any descendant spawned with alarm 0 armed, because listener
/// registration walks the object tree's transitive children.
unsafe extern "C" fn on_child_alarm(iter: *mut c_void, target: *mut c_void, other: *mut c_void) -> i32 {
    if let Ok(inst) = instance::from_raw(target) {
        if let Ok(hp) = local::int::get(inst, "hp", false) {
            println!("[example-mod] alarm 0 fired with hp={hp}");
        }
    }
    let mut chain = listener::Chain::from_raw(iter);
    chain.next(target, other) as i32
}

extern "C" fn on_constructor() {
    let verbose = config::get_bool("verbose").unwrap_or(false);
    println!("[example-mod] loaded (verbose={verbose})");
}

extern "C" fn on_destructor() {
    println!("[example-mod] unloading");
}

extern "C" fn on_game_save(_slot: i32) {
    if let Err(err) = save::set_double("runs", 3.0) {
        eprintln!("[example-mod] failed to save \"runs\": {err}");
    }
}

extern "C" fn on_game_load(_slot: i32) {
    match save::get_double("runs") {
        Ok(runs) => println!("[example-mod] loaded runs={runs}"),
        Err(err) => eprintln!("[example-mod] no prior \"runs\" savedata: {err}"),
    }
}

define_mod! {
    register_objects: register_objects,
    register_object_listeners: register_object_listeners,
    constructor: on_constructor,
    destructor: on_destructor,
    game_save: on_game_save,
    game_load: on_game_load,
}
