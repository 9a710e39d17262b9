//! The MRE's single process-wide piece of mutable state (SPEC_FULL.md §9,
//! "Global mutable state"): one `thread_local!` cell rather than statics
//! scattered across modules, matching the single-threaded cooperative
//! model of §5. This module also exports the five host ABI entry points
//! from SPEC_FULL.md §6.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::os::raw::c_void;
use std::path::{Path, PathBuf};

use mre_common::error::ErrorCode;
use mre_common::event::{EventKey, EventType};
use mre_common::ffi::{HostFunctions, HostGlobals, ModListenerFn};
use mre_common::value::{PointerValue, SaveScalar};
use mre_common::{MreResult, Stage};

use crate::config::ConfigStore;
use crate::context;
use crate::error::{require_stage, set_error, StageRequirement};
use crate::eventtrap::EventTrapEngine;
use crate::hostbind::HostBinding;
use crate::instance::{InstanceManager, ModLocalStore};
use crate::logging::{self, LoggingGuard};
use crate::modloader::{self, Mod};
use crate::objecttree::{ObjectRegistry, ObjectTree};
use crate::savehook::SaveStore;

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

/// The MRE's singleton. Every field that mutates after construction is
/// wrapped in a `Cell`/`RefCell` rather than requiring `&mut Runtime`, so
/// every public operation can go through the single shared accessor
/// [`with_runtime`].
pub struct Runtime {
    /// The flattened config store. Public so callers already holding a
    /// `&Runtime` can read it directly (used by [`crate::error::set_error`]
    /// for `promoteUnhandledErrors`).
    pub config: ConfigStore,
    stage: Cell<Stage>,
    host: RefCell<HostBinding>,
    objects: RefCell<ObjectRegistry>,
    tree: RefCell<Option<ObjectTree>>,
    event_engine: RefCell<EventTrapEngine>,
    instances: InstanceManager,
    mod_locals: RefCell<ModLocalStore>,
    save_store: RefCell<SaveStore>,
    mods: RefCell<Vec<Mod>>,
    current_event: Cell<Option<EventKey>>,
    current_room: Cell<i32>,
    paused: Cell<bool>,
    pointer_registry: RefCell<HashMap<usize, PointerValue>>,
    _logging_guard: LoggingGuard,
}

impl Runtime {
    fn boot(base_dir: &Path) -> MreResult<Runtime> {
        let config_path = base_dir.join("aer").join("conf.toml");
        let config = ConfigStore::parse_file(&config_path)?;

        let log_dir = base_dir.join("aer").join("log");
        std::fs::create_dir_all(&log_dir).map_err(|_| ErrorCode::BadFile)?;
        let logging_guard = logging::init(&log_dir, config.log_level());

        let mods_dir = base_dir.join("aer").join("mods");
        let mods = modloader::load_all(&config.mod_load_order(), &mods_dir)?;

        Ok(Runtime {
            config,
            stage: Cell::new(Stage::Init),
            host: RefCell::new(HostBinding::default()),
            objects: RefCell::new(ObjectRegistry::default()),
            tree: RefCell::new(None),
            event_engine: RefCell::new(EventTrapEngine::default()),
            instances: InstanceManager::default(),
            mod_locals: RefCell::new(ModLocalStore::default()),
            save_store: RefCell::new(SaveStore::default()),
            mods: RefCell::new(mods),
            current_event: Cell::new(None),
            current_room: Cell::new(-1),
            paused: Cell::new(false),
            pointer_registry: RefCell::new(HashMap::new()),
            _logging_guard: logging_guard,
        })
    }

    /// The MRE's current lifecycle stage.
    pub fn stage(&self) -> Stage {
        self.stage.get()
    }

    fn advance_stage(&self) {
        self.stage.set(self.stage.get().next());
    }

    /// Read-only access to the host binding.
    pub fn host(&self) -> std::cell::Ref<HostBinding> {
        self.host.borrow()
    }

    /// Read-only access to the event-trap engine (used by
    /// [`crate::eventtrap::universal_trampoline`]).
    pub fn event_engine(&self) -> std::cell::Ref<EventTrapEngine> {
        self.event_engine.borrow()
    }

    /// The instance manager. Stateless, so no `RefCell` indirection is
    /// needed to reach it.
    pub fn instances(&self) -> &InstanceManager {
        &self.instances
    }

    /// Read-only access to the object tree, `None` before object-reg
    /// closes.
    pub fn object_tree(&self) -> std::cell::Ref<Option<ObjectTree>> {
        self.tree.borrow()
    }

    /// The current-event register (SPEC_FULL.md §3).
    pub fn current_event(&self) -> Option<EventKey> {
        self.current_event.get()
    }

    /// Sets the current-event register; called by the `event()` host hook
    /// immediately before the VM dispatches to the trapped slot.
    pub fn set_current_event(&self, key: EventKey) {
        self.current_event.set(Some(key));
    }

    /// Registers a new object class (SPEC_FULL.md §4.3). Legal only at
    /// `Stage::ObjectReg`.
    #[allow(clippy::too_many_arguments)]
    pub fn register_object(
        &self,
        name: &str,
        parent: i32,
        sprite: i32,
        mask: i32,
        depth: i32,
        visible: bool,
        collisions: bool,
        persistent: bool,
    ) -> MreResult<u32> {
        if !require_stage("register_object", self.stage.get(), StageRequirement::ExactlyAt(Stage::ObjectReg)) {
            return Err(ErrorCode::SequenceBreak);
        }
        let mut host = self.host.borrow_mut();
        self.objects
            .borrow_mut()
            .register(&mut host, name, parent, sprite, mask, depth, visible, collisions, persistent)
    }

    /// Attaches a mod listener to `(object, event-type, event-number)`
    /// (SPEC_FULL.md §4.4). Legal only at `Stage::ListenerReg`.
    pub fn attach_listener(&self, key: EventKey, func: ModListenerFn) -> MreResult<()> {
        if !require_stage("attach_listener", self.stage.get(), StageRequirement::ExactlyAt(Stage::ListenerReg)) {
            return Err(ErrorCode::SequenceBreak);
        }
        let tree_guard = self.tree.borrow();
        let tree = tree_guard.as_ref().ok_or(ErrorCode::SequenceBreak)?;
        let host = self.host.borrow();
        self.event_engine.borrow_mut().attach_listener(
            &host,
            tree,
            key,
            func,
            context::current_mod_index(),
            &context::current_mod_name(),
        )
    }

    /// Creates or overwrites a mod-local for the currently executing mod
    /// (SPEC_FULL.md §4.5).
    pub fn set_mod_local(
        &self,
        instance_id: u32,
        name: &str,
        public: bool,
        value: mre_common::value::PrimitiveValue,
        destructor: Option<mre_common::ffi::ModLocalDestructorFn>,
    ) -> MreResult<()> {
        self.mod_locals
            .borrow_mut()
            .set(context::current_mod_index(), instance_id, name, public, value, destructor)
    }

    /// Reads a mod-local belonging to the currently executing mod (or the
    /// public namespace).
    pub fn get_mod_local(
        &self,
        instance_id: u32,
        name: &str,
        public: bool,
    ) -> MreResult<mre_common::value::PrimitiveValue> {
        self.mod_locals
            .borrow()
            .get(context::current_mod_index(), instance_id, name, public)
            .map(|value| value.clone())
    }

    /// Deletes a mod-local belonging to the currently executing mod.
    pub fn delete_mod_local(&self, instance_id: u32, name: &str, public: bool, run_destructor: bool) -> MreResult<()> {
        self.mod_locals
            .borrow_mut()
            .delete(context::current_mod_index(), instance_id, name, public, run_destructor)
    }

    /// Records `key -> value` for the currently executing mod's savedata
    /// (SPEC_FULL.md §4.6). Persisted into the host's save file by
    /// `saveData`; this call only stages it in the MRE's own store.
    pub fn set_saved(&self, key: &str, value: mre_common::value::SaveScalar) {
        self.save_store.borrow_mut().set(&context::current_mod_name(), key, value);
    }

    /// Reads back savedata written (this process, or restored by the most
    /// recent `loadData`) for the currently executing mod.
    pub fn get_saved(&self, key: &str) -> MreResult<mre_common::value::SaveScalar> {
        self.save_store
            .borrow()
            .get(&context::current_mod_name(), key)
            .map(|value| value.clone())
    }

    /// Every instance in the current room (SPEC_FULL.md §4.5).
    pub fn get_all_instances(&self) -> MreResult<Vec<u32>> {
        self.instances.get_all(&self.host.borrow())
    }

    /// Every instance of `object_index`, optionally including transitive
    /// descendants.
    pub fn get_instances_by_object(&self, object_index: u32, recursive: bool) -> MreResult<Vec<u32>> {
        let tree_guard = self.tree.borrow();
        let tree = tree_guard.as_ref().ok_or(ErrorCode::SequenceBreak)?;
        self.instances.get_by_object(&self.host.borrow(), tree, object_index, recursive)
    }

    /// Recovers the stable instance id for a raw VM instance pointer handed
    /// to a mod listener as its `target`/`other` argument.
    ///
    /// # Safety
    /// `ptr` must either be null or a valid `VmInstance` pointer, as handed
    /// to a listener by the universal trampoline for the duration of one
    /// event dispatch.
    pub unsafe fn instance_id_of(&self, ptr: *mut c_void) -> MreResult<u32> {
        if ptr.is_null() {
            return Err(ErrorCode::NullArgument);
        }
        Ok(self.instances.get_id(ptr as *mut mre_common::ffi::VmInstance))
    }

    /// Creates a fresh instance of `object_index` at `(x, y)`.
    pub fn create_instance(&self, object_index: i32, x: f64, y: f64) -> MreResult<u32> {
        self.instances.create(&self.host.borrow(), object_index, x, y)
    }

    /// Destroys `instance_id`, optionally running its destroy event first.
    pub fn destroy_instance(&self, instance_id: u32, run_event: bool) -> MreResult<()> {
        self.instances.destroy(&self.host.borrow(), instance_id, run_event)
    }

    /// Reclassifies `instance_id` as `object_index`.
    pub fn change_instance(&self, instance_id: u32, object_index: i32, run_event: bool) -> MreResult<()> {
        self.instances.change(&self.host.borrow(), instance_id, object_index, run_event)
    }

    /// `true` if `instance_id`'s class is `object_index` or a transitive
    /// descendant of it.
    pub fn is_instance_compatible(&self, instance_id: u32, object_index: u32) -> MreResult<bool> {
        let tree_guard = self.tree.borrow();
        let tree = tree_guard.as_ref().ok_or(ErrorCode::SequenceBreak)?;
        self.instances.is_compatible_with(&self.host.borrow(), tree, instance_id, object_index)
    }

    /// Reads a scalar instance property by stable id.
    pub fn get_instance_property(&self, instance_id: u32, property: mre_common::ffi::InstanceProperty) -> MreResult<f64> {
        let host = self.host.borrow();
        let instance = self.instances.get_by_id(&host, instance_id)? as *mut c_void;
        unsafe { crate::surface::get_property(&host, instance, property) }
    }

    /// Writes a scalar instance property by stable id.
    pub fn set_instance_property(&self, instance_id: u32, property: mre_common::ffi::InstanceProperty, value: f64) -> MreResult<()> {
        let host = self.host.borrow();
        let instance = self.instances.get_by_id(&host, instance_id)? as *mut c_void;
        unsafe { crate::surface::set_property(&host, instance, property, value) }
    }

    /// Reads an instance's alarm countdown by stable id.
    pub fn get_instance_alarm(&self, instance_id: u32, index: u32) -> MreResult<i32> {
        let host = self.host.borrow();
        let instance = self.instances.get_by_id(&host, instance_id)? as *mut c_void;
        unsafe { crate::surface::get_alarm(&host, instance, index) }
    }

    /// Sets an instance's alarm countdown by stable id.
    pub fn set_instance_alarm(&self, instance_id: u32, index: u32, value: i32) -> MreResult<()> {
        let host = self.host.borrow();
        let instance = self.instances.get_by_id(&host, instance_id)? as *mut c_void;
        unsafe { crate::surface::set_alarm(&host, instance, index, value) }
    }

    /// Resolves `name` against an instance's VM-owned local table
    /// (SPEC_FULL.md §4.5, "VM locals"). The returned pointer is VM-owned
    /// and opaque to the MRE; callers only ever round-trip it back through
    /// the host (e.g. as an `AERLocal*` handed back to a mod).
    pub fn get_vm_local(&self, instance_id: u32, name: &str) -> MreResult<*mut c_void> {
        let host = self.host.borrow();
        let instance = self.instances.get_by_id(&host, instance_id)? as *mut c_void;
        unsafe { self.instances.get_vm_local(&host, instance, name) }
    }

    /// Increments (or begins tracking) the refcount on a host-owned
    /// pointer primitive, mirroring the VM's own `primitivePointerCopy`
    /// semantics (SPEC_FULL.md §6).
    pub fn retain_pointer(&self, ptr: *mut c_void) {
        if ptr.is_null() {
            return;
        }
        let mut registry = self.pointer_registry.borrow_mut();
        let address = ptr as usize;
        if let Some(existing) = registry.get(&address) {
            existing.retain();
        } else {
            registry.insert(address, unsafe { PointerValue::new(ptr) });
        }
    }

    /// Registers a sprite asset (SPEC_FULL.md §4.9).
    pub fn register_sprite(&self, name: &str, path: &str) -> MreResult<i32> {
        crate::surface::register_sprite(&self.host.borrow(), name, path)
    }

    /// Registers a font asset.
    pub fn register_font(&self, name: &str, path: &str, size: i32) -> MreResult<i32> {
        crate::surface::register_font(&self.host.borrow(), name, path, size)
    }

    /// Switches the active room.
    pub fn room_goto(&self, room_index: i32) -> MreResult<()> {
        crate::surface::room_goto(&self.host.borrow(), room_index)
    }

    /// Plays a sound, returning its channel handle.
    pub fn audio_play(&self, sound_index: i32) -> MreResult<i32> {
        crate::surface::audio_play(&self.host.borrow(), sound_index)
    }

    /// Stops every channel playing a sound.
    pub fn audio_stop(&self, sound_index: i32) -> MreResult<()> {
        crate::surface::audio_stop(&self.host.borrow(), sound_index)
    }

    /// Draws a rectangle in world space.
    pub fn draw_rectangle(&self, x1: f64, y1: f64, x2: f64, y2: f64, outline: bool) -> MreResult<()> {
        crate::surface::draw_rectangle(&self.host.borrow(), x1, y1, x2, y2, outline)
    }

    /// Draws a sprite frame at a position.
    pub fn draw_sprite(&self, sprite_index: i32, image_index: i32, x: f64, y: f64) -> MreResult<()> {
        crate::surface::draw_sprite(&self.host.borrow(), sprite_index, image_index, x, y)
    }

    /// Draws text at a position using the active font.
    pub fn draw_text(&self, x: f64, y: f64, text: &str) -> MreResult<()> {
        crate::surface::draw_text(&self.host.borrow(), x, y, text)
    }

    /// Draws a line segment in world space.
    pub fn draw_line(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> MreResult<()> {
        crate::surface::draw_line(&self.host.borrow(), x1, y1, x2, y2)
    }

    /// Reads this-step keyboard state.
    pub fn key_state(&self, keycode: i32, phase: crate::surface::InputPhase) -> MreResult<bool> {
        crate::surface::key_state(&self.host.borrow(), keycode, phase)
    }

    /// Reads this-step mouse-button state.
    pub fn mouse_state(&self, button: i32, phase: crate::surface::InputPhase) -> MreResult<bool> {
        crate::surface::mouse_state(&self.host.borrow(), button, phase)
    }

    /// Runs the startup pipeline: sprite-reg through listener-reg, then
    /// advances into `Action`. Called once from [`init`] after host refs
    /// are bound and mods are loaded (SPEC_FULL.md §4.1).
    fn run_startup_pipeline(&self) {
        self.advance_stage(); // Init -> SpriteReg
        for m in self.mods.borrow().iter() {
            m.run_register_sprites();
        }

        self.advance_stage(); // SpriteReg -> FontReg
        for m in self.mods.borrow().iter() {
            m.run_register_fonts();
        }

        self.advance_stage(); // FontReg -> ObjectReg
        for m in self.mods.borrow().iter() {
            m.run_register_objects();
        }

        *self.tree.borrow_mut() = Some(ObjectTree::build(&self.objects.borrow()));

        let object_count = self.objects.borrow().len() as u32;
        let tree_guard = self.tree.borrow();
        let tree = tree_guard.as_ref().expect("tree just built above");
        if let Err(err) = self.event_engine.borrow_mut().mask_all_subscribers(&self.host.borrow(), tree, object_count) {
            logging::log_error("run_startup_pipeline", &format!("subscription masking failed: {err:?}"));
        }
        drop(tree_guard);

        self.advance_stage(); // ObjectReg -> ListenerReg
        for m in self.mods.borrow().iter() {
            m.run_register_object_listeners();
        }

        self.advance_stage(); // ListenerReg -> Action
        for m in self.mods.borrow().iter() {
            m.run_constructor();
        }
    }

    fn run_step(&self) {
        let paused = self.host.borrow().is_paused().unwrap_or(false);
        if paused != self.paused.get() {
            self.paused.set(paused);
            for m in self.mods.borrow().iter() {
                m.run_game_pause(paused);
            }
        }

        let current_room = self
            .host
            .borrow()
            .globals_ref()
            .ok()
            .map(|g| unsafe { *g.current_room })
            .unwrap_or(-1);

        if current_room != self.current_room.get() {
            if self.current_room.get() >= 0 {
                for m in self.mods.borrow().iter() {
                    m.run_room_end(self.current_room.get());
                }
            }
            let pruned = self.mod_locals.borrow_mut().prune_orphans(&self.host.borrow(), &self.instances);
            if let Ok(count) = pruned {
                if count > 0 {
                    logging::log_info("run_step", &format!("pruned {count} orphaned mod-locals on room change"));
                }
            }
            self.current_room.set(current_room);
            for m in self.mods.borrow().iter() {
                m.run_room_start(current_room);
            }
        }

        for m in self.mods.borrow().iter() {
            m.run_game_step();
        }
    }

    fn run_shutdown(&self) {
        for m in self.mods.borrow().iter().rev() {
            m.run_destructor();
        }
    }

    /// Mirrors `SaveStore`'s entries into the host's save map by flat key
    /// `"mod.<modname>.<userkey>"` (SPEC_FULL.md §4.6). Runs after mods'
    /// save listeners, so whatever they just staged through `AERSave*` is
    /// what gets written.
    fn mirror_save_store_into_host(&self) {
        let host = self.host.borrow();
        let result: MreResult<()> = (|| {
            host.save_map_clear()?;
            for (modname, entries) in self.save_store.borrow().entries() {
                for (key, value) in entries {
                    let flat_key = std::ffi::CString::new(format!("mod.{modname}.{key}")).map_err(|_| ErrorCode::BadValue)?;
                    match value {
                        SaveScalar::Double(d) => host.save_map_set_double(&flat_key, *d)?,
                        SaveScalar::Str(s) => {
                            let c_value = std::ffi::CString::new(s.as_str()).map_err(|_| ErrorCode::BadValue)?;
                            host.save_map_set_string(&flat_key, &c_value)?;
                        }
                    }
                }
            }
            Ok(())
        })();
        if let Err(err) = result {
            logging::log_error("save_data", &format!("failed to mirror savedata into host map: {err:?}"));
        }
    }

    /// Rebuilds `SaveStore` wholesale from the host's save map (SPEC_FULL.md
    /// §4.6). Runs before mods' load listeners, so `AERLoad*` calls made
    /// from inside them see freshly restored data.
    fn mirror_host_into_save_store(&self) {
        #[derive(Default)]
        struct Collected {
            mods: HashMap<String, HashMap<String, SaveScalar>>,
        }

        fn split_flat_key(key: &str) -> Option<(&str, &str)> {
            key.strip_prefix("mod.")?.split_once('.')
        }

        unsafe extern "C" fn visit_double(key: *const std::os::raw::c_char, value: f64, ctx: *mut c_void) {
            let collected = &mut *(ctx as *mut Collected);
            if let Ok(key) = std::ffi::CStr::from_ptr(key).to_str() {
                if let Some((modname, userkey)) = split_flat_key(key) {
                    collected
                        .mods
                        .entry(modname.to_string())
                        .or_default()
                        .insert(userkey.to_string(), SaveScalar::Double(value));
                }
            }
        }

        unsafe extern "C" fn visit_string(
            key: *const std::os::raw::c_char,
            value: *const std::os::raw::c_char,
            ctx: *mut c_void,
        ) {
            let collected = &mut *(ctx as *mut Collected);
            if let (Ok(key), Ok(value)) = (std::ffi::CStr::from_ptr(key).to_str(), std::ffi::CStr::from_ptr(value).to_str()) {
                if let Some((modname, userkey)) = split_flat_key(key) {
                    collected
                        .mods
                        .entry(modname.to_string())
                        .or_default()
                        .insert(userkey.to_string(), SaveScalar::Str(value.to_string()));
                }
            }
        }

        let mut collected = Collected::default();
        let ctx = &mut collected as *mut Collected as *mut c_void;
        let host = self.host.borrow();
        let result = unsafe {
            host.save_map_for_each_double(visit_double, ctx)
                .and_then(|_| host.save_map_for_each_string(visit_string, ctx))
        };
        match result {
            Ok(()) => self.save_store.borrow_mut().replace_all(collected.mods),
            Err(err) => logging::log_error("load_data", &format!("failed to mirror host savedata: {err:?}")),
        }
    }
}

/// Runs `f` against the current runtime, if one has been booted by
/// [`init`]. Returns `None` before `init` or after a fatal startup
/// failure — callers that can tolerate "not booted yet" as a no-op should
/// use `.unwrap_or(default)`; callers that cannot should treat `None` as a
/// sequence-break.
pub fn with_runtime<T>(f: impl FnOnce(&Runtime) -> T) -> Option<T> {
    RUNTIME.with(|cell| cell.borrow().as_ref().map(f))
}

/// Host ABI entry point. Records the host's globals/functions structs,
/// parses config, loads mods, and runs the startup pipeline through to
/// `Stage::Action`. Returns `1` on success, `0` on failure (check
/// [`crate::error::last_error`]).
///
/// # Safety
/// Must be called exactly once by the host, with every pointer inside
/// `globals`/`functions` valid for the remaining lifetime of the process.
#[no_mangle]
pub unsafe extern "C" fn init(globals: HostGlobals, functions: HostFunctions) -> i32 {
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        crate::error::clear_error();

        if RUNTIME.with(|cell| cell.borrow().is_some()) {
            set_error(ErrorCode::SequenceBreak, "init");
            return 0;
        }

        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let runtime = match Runtime::boot(&base_dir) {
            Ok(runtime) => runtime,
            Err(code) => {
                set_error(code, "init");
                return 0;
            }
        };

        runtime.host.borrow_mut().bind(globals, functions);
        RUNTIME.with(|cell| *cell.borrow_mut() = Some(runtime));
        with_runtime(|rt| rt.run_startup_pipeline());
        1
    }));
    outcome.unwrap_or(0)
}

/// Host ABI entry point, called at the start of every step. Detects room
/// change (pruning orphaned mod-locals and firing room-start/end
/// listeners), then fires every mod's game-step listener.
#[no_mangle]
pub extern "C" fn step() {
    let _ = std::panic::catch_unwind(|| {
        crate::error::clear_error();
        with_runtime(|rt| rt.run_step());
    });
}

/// Host ABI entry point, called immediately before the VM dispatches
/// `(event_type, event_number)` on `object_index`. Records the
/// current-event register read by [`crate::eventtrap::universal_trampoline`].
#[no_mangle]
pub extern "C" fn event(object_index: u32, event_type: i32, event_number: u32) {
    let _ = std::panic::catch_unwind(|| {
        let key = EventKey::new(EventType::from_raw(event_type), event_number, object_index);
        with_runtime(|rt| rt.set_current_event(key));
    });
}

/// Host ABI entry point, called around the host's save-game
/// serialization. Fires every mod's save listener for `slot`
/// (SPEC_FULL.md §4.6).
#[no_mangle]
pub extern "C" fn save_data(slot: i32) {
    let _ = std::panic::catch_unwind(|| {
        with_runtime(|rt| {
            for m in rt.mods.borrow().iter() {
                m.run_game_save(slot);
            }
            rt.mirror_save_store_into_host();
        });
    });
}

/// Host ABI entry point, called around the host's save-game
/// deserialization. Fires every mod's load listener for `slot`.
#[no_mangle]
pub extern "C" fn load_data(slot: i32) {
    let _ = std::panic::catch_unwind(|| {
        with_runtime(|rt| {
            rt.mirror_host_into_save_store();
            for m in rt.mods.borrow().iter() {
                m.run_game_load(slot);
            }
        });
    });
}

/// Host ABI entry point, called when the host duplicates a variant
/// primitive of pointer type. Increments the MRE's refcount wrapper for
/// that pointer (SPEC_FULL.md §6).
///
/// # Safety
/// `src` must either be null or a pointer the host VM owns.
#[no_mangle]
pub unsafe extern "C" fn primitive_pointer_copy(_dest: *mut c_void, src: *mut c_void) {
    let _ = std::panic::catch_unwind(|| {
        with_runtime(|rt| rt.retain_pointer(src));
    });
}

/// Runs mod shutdown in reverse load order. Not part of the host ABI
/// proper (the host has no dedicated teardown hook in SPEC_FULL.md §6),
/// but exposed so an embedder that does support clean shutdown (and
/// `mre-cli`'s validation path) can exercise destructor ordering.
pub fn shutdown() {
    with_runtime(|rt| rt.run_shutdown());
}
