//! The mod loader (SPEC_FULL.md §4.2): resolves named shared libraries,
//! reads each mod's registration and lifecycle callbacks, and runs them
//! with the context stack set to the mod's identity.

use std::path::Path;

use libloading::Library;
use mre_common::ffi::{ModCallbacks, ModEntryFn, MOD_ENTRY_ALIASES};
use mre_common::{ErrorCode, MreResult};

use crate::context;

/// A loaded mod: its shared-library handle, its stable load-order index,
/// and the callbacks its `define_mod()` (or alias) returned.
pub struct Mod {
    /// The mod's name, as it appeared in `mre.mods`.
    pub name: String,
    /// The mod's stable, process-lifetime index — its position in
    /// `mre.mods`.
    pub index: u32,
    callbacks: ModCallbacks,
    // Kept alive for the process lifetime; dropping it would invalidate
    // every function pointer in `callbacks`. Never accessed directly after
    // load — held only for its destructor (SPEC_FULL.md §5, resource
    // ownership: released in reverse load order after the mod's own
    // destructor runs).
    _library: Library,
}

impl Mod {
    /// Opens `lib<name>.<platform extension>` under `search_dir` and
    /// resolves its entry point under one of [`MOD_ENTRY_ALIASES`].
    pub fn load(name: &str, index: u32, search_dir: &Path) -> MreResult<Self> {
        let path = search_dir.join(platform_filename(name));
        let library = unsafe { Library::new(&path) }.map_err(|_| ErrorCode::BadFile)?;
        let callbacks = unsafe { resolve_entry(&library) }?;
        Ok(Self {
            name: name.to_string(),
            index,
            callbacks,
            _library: library,
        })
    }

    /// Runs `register_sprites` if present (stage: sprite-reg).
    pub fn run_register_sprites(&self) {
        self.with_context(|| {
            if let Some(f) = self.callbacks.register_sprites {
                unsafe { f() };
            }
        });
    }

    /// Runs `register_fonts` if present (stage: font-reg).
    pub fn run_register_fonts(&self) {
        self.with_context(|| {
            if let Some(f) = self.callbacks.register_fonts {
                unsafe { f() };
            }
        });
    }

    /// Runs `register_objects` if present (stage: object-reg).
    pub fn run_register_objects(&self) {
        self.with_context(|| {
            if let Some(f) = self.callbacks.register_objects {
                unsafe { f() };
            }
        });
    }

    /// Runs `register_object_listeners` if present (stage: listener-reg).
    pub fn run_register_object_listeners(&self) {
        self.with_context(|| {
            if let Some(f) = self.callbacks.register_object_listeners {
                unsafe { f() };
            }
        });
    }

    /// Runs the mod's constructor, if present. Called once, in load
    /// order, after every mod's libraries are open.
    pub fn run_constructor(&self) {
        self.with_context(|| {
            if let Some(f) = self.callbacks.constructor {
                unsafe { f() };
            }
        });
    }

    /// Runs the mod's destructor, if present. Called once per mod, in
    /// reverse load order, at MRE shutdown.
    pub fn run_destructor(&self) {
        self.with_context(|| {
            if let Some(f) = self.callbacks.destructor {
                unsafe { f() };
            }
        });
    }

    /// Runs the mod's per-step listener, if present.
    pub fn run_game_step(&self) {
        self.with_context(|| {
            if let Some(f) = self.callbacks.game_step {
                unsafe { f() };
            }
        });
    }

    /// Runs the mod's pause-state listener, if present.
    pub fn run_game_pause(&self, paused: bool) {
        self.with_context(|| {
            if let Some(f) = self.callbacks.game_pause {
                unsafe { f(paused as i32) };
            }
        });
    }

    /// Runs the mod's save listener, if present.
    pub fn run_game_save(&self, slot: i32) {
        self.with_context(|| {
            if let Some(f) = self.callbacks.game_save {
                unsafe { f(slot) };
            }
        });
    }

    /// Runs the mod's load listener, if present.
    pub fn run_game_load(&self, slot: i32) {
        self.with_context(|| {
            if let Some(f) = self.callbacks.game_load {
                unsafe { f(slot) };
            }
        });
    }

    /// Runs the mod's room-start listener (and the deprecated
    /// `room_change` alias), if present.
    pub fn run_room_start(&self, room_index: i32) {
        self.with_context(|| {
            if let Some(f) = self.callbacks.room_start {
                unsafe { f(room_index) };
            }
            if let Some(f) = self.callbacks.room_change {
                unsafe { f(room_index) };
            }
        });
    }

    /// Runs the mod's room-end listener (and the deprecated `room_change`
    /// alias), if present.
    pub fn run_room_end(&self, room_index: i32) {
        self.with_context(|| {
            if let Some(f) = self.callbacks.room_end {
                unsafe { f(room_index) };
            }
            if let Some(f) = self.callbacks.room_change {
                unsafe { f(room_index) };
            }
        });
    }

    fn with_context<T>(&self, f: impl FnOnce() -> T) -> T {
        context::with_context(self.index, &self.name, f)
    }
}

/// The shared-library filename the host platform expects for a mod named
/// `name` (e.g. `libfoo.so` on Linux, `foo.dll` on Windows). Exposed for
/// `mre-cli`'s offline validation as well as [`Mod::load`].
pub fn platform_filename(name: &str) -> String {
    format!(
        "{}{}{}",
        std::env::consts::DLL_PREFIX,
        name,
        std::env::consts::DLL_SUFFIX
    )
}

unsafe fn resolve_entry(library: &Library) -> MreResult<ModCallbacks> {
    for alias in MOD_ENTRY_ALIASES {
        if let Ok(symbol) = library.get::<ModEntryFn>(alias.as_bytes()) {
            return Ok(symbol());
        }
    }
    Err(ErrorCode::FailedLookup)
}

/// Loads every mod named in `load_order`, in order, from `search_dir`.
/// Fails on the first mod that cannot be opened or whose entry point
/// cannot be resolved; mods already opened stay open (the caller aborts
/// startup entirely in that case, so there is no meaningful partial-load
/// state to clean up).
pub fn load_all(load_order: &[String], search_dir: &Path) -> MreResult<Vec<Mod>> {
    load_order
        .iter()
        .enumerate()
        .map(|(index, name)| Mod::load(name, index as u32, search_dir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_library_is_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Mod::load("does_not_exist", 0, dir.path()).unwrap_err();
        assert_eq!(err, ErrorCode::BadFile);
    }

    #[test]
    fn platform_filename_uses_std_conventions() {
        let name = platform_filename("example");
        assert!(name.contains("example"));
        assert!(name.starts_with(std::env::consts::DLL_PREFIX));
        assert!(name.ends_with(std::env::consts::DLL_SUFFIX));
    }
}
