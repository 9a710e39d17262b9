//! The save hook (SPEC_FULL.md §4.6): mirrors a nested per-mod savedata
//! submap into and out of the host's own save-game serialization, and
//! dispatches mod-registered save/load listeners around it.

use std::collections::HashMap;

use mre_common::ffi::{ModGameLoadFn, ModGameSaveFn};
use mre_common::value::SaveScalar;
use mre_common::{ErrorCode, MreResult};

/// All savedata written so far this process, namespaced
/// `<modname>.<userkey>` (SPEC_FULL.md §6, "Savefile"). Rebuilt from the
/// host's save map on every `loadData` call; written back into it on every
/// `saveData` call.
#[derive(Default)]
pub struct SaveStore {
    mods: HashMap<String, HashMap<String, SaveScalar>>,
}

impl SaveStore {
    /// Records `value` under `(modname, key)`, overwriting any previous
    /// value written this process.
    pub fn set(&mut self, modname: &str, key: &str, value: SaveScalar) {
        self.mods
            .entry(modname.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// Reads back a previously written or loaded value.
    pub fn get(&self, modname: &str, key: &str) -> MreResult<&SaveScalar> {
        self.mods
            .get(modname)
            .and_then(|entries| entries.get(key))
            .ok_or(ErrorCode::FailedLookup)
    }

    /// Replaces the entire store, used when a load hook repopulates it
    /// from the host's deserialized save map.
    pub fn replace_all(&mut self, mods: HashMap<String, HashMap<String, SaveScalar>>) {
        self.mods = mods;
    }

    /// A flat view of every `(modname, key) -> scalar` entry, in the shape
    /// the host's save map expects nested under the top-level `"mod"` key
    /// (`mod.<modname>.<userkey>`).
    pub fn entries(&self) -> &HashMap<String, HashMap<String, SaveScalar>> {
        &self.mods
    }

    /// Drops every entry belonging to `modname`, used when a mod is
    /// unloaded between saves.
    pub fn clear_mod(&mut self, modname: &str) {
        self.mods.remove(modname);
    }
}

/// The save/load listener pair a mod may register (SPEC_FULL.md §4.2,
/// §4.6). Dispatched in mod-load order around the MRE's own save/load
/// mirroring.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveListeners {
    /// Runs after the MRE has written this mod's savedata into the host's
    /// map, receiving the save-slot index.
    pub on_save: Option<ModGameSaveFn>,
    /// Runs after the MRE has read this mod's savedata back out of the
    /// host's map, receiving the save-slot index.
    pub on_load: Option<ModGameLoadFn>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_written_value() {
        let mut store = SaveStore::default();
        store.set("modA", "score", SaveScalar::Double(42.0));
        assert_eq!(store.get("modA", "score").unwrap(), &SaveScalar::Double(42.0));
    }

    #[test]
    fn missing_entry_is_failed_lookup() {
        let store = SaveStore::default();
        let err = store.get("modA", "score").unwrap_err();
        assert_eq!(err, ErrorCode::FailedLookup);
    }

    #[test]
    fn replace_all_swaps_the_whole_store() {
        let mut store = SaveStore::default();
        store.set("modA", "score", SaveScalar::Double(1.0));

        let mut fresh = HashMap::new();
        let mut modb = HashMap::new();
        modb.insert("name".to_string(), SaveScalar::Str("Alpha".into()));
        fresh.insert("modB".to_string(), modb);
        store.replace_all(fresh);

        assert!(store.get("modA", "score").is_err());
        assert_eq!(store.get("modB", "name").unwrap(), &SaveScalar::Str("Alpha".into()));
    }

    #[test]
    fn clear_mod_drops_only_that_mod() {
        let mut store = SaveStore::default();
        store.set("modA", "score", SaveScalar::Double(1.0));
        store.set("modB", "score", SaveScalar::Double(2.0));
        store.clear_mod("modA");
        assert!(store.get("modA", "score").is_err());
        assert!(store.get("modB", "score").is_ok());
    }
}
