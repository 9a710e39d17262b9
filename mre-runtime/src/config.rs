//! The config reader (SPEC_FULL.md §4.7). Parses a single TOML file into a
//! flat `<modname>.<path>` key/value store once at process start; `mre`'s
//! own table lives at the `mre.*` prefix exactly like any mod's.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use mre_common::{ConfigValue, ErrorCode, MreConfig, MreResult};

use crate::context;

/// The root of `aer/conf.toml`, deserialized just far enough to pull out
/// the one table whose shape the MRE itself depends on; every other table
/// is read back out of the flattened store instead.
#[derive(Debug, Default, Deserialize)]
struct RootConfig {
    #[serde(default)]
    mre: MreConfig,
}

/// Flat `<modname-or-"mre">.<dotted path>` → [`ConfigValue`] store built
/// once from `aer/conf.toml`.
#[derive(Debug, Default)]
pub struct ConfigStore {
    entries: HashMap<String, ConfigValue>,
    mre: MreConfig,
}

impl ConfigStore {
    /// Parses `path` into a [`ConfigStore`]. I/O or TOML-decode failure is
    /// reported as [`ErrorCode::BadFile`].
    pub fn parse_file(path: &Path) -> MreResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|_| ErrorCode::BadFile)?;
        Self::parse_str(&contents)
    }

    /// Parses a TOML document's text directly (used by tests and by
    /// [`Self::parse_file`]).
    pub fn parse_str(contents: &str) -> MreResult<Self> {
        let value: toml::Value = toml::from_str(contents).map_err(|_| ErrorCode::BadFile)?;
        let mut entries = HashMap::new();
        flatten(&value, "", &mut entries);
        let root: RootConfig = toml::from_str(contents).map_err(|_| ErrorCode::BadFile)?;
        Ok(Self { entries, mre: root.mre })
    }

    /// The ordered mod list from `mre.mods`, establishing load order.
    pub fn mod_load_order(&self) -> Vec<String> {
        self.mre.mods.clone()
    }

    /// `mre.promoteUnhandledErrors`, defaulting to `false` when absent.
    pub fn promote_unhandled_errors(&self) -> bool {
        self.mre.promote_unhandled_errors
    }

    /// `mre.logLevel`, consulted by [`crate::logging::init`] ahead of
    /// `AER_LOG` when both are present.
    pub fn log_level(&self) -> Option<&str> {
        self.mre.log_level.as_deref()
    }

    /// Raw lookup by fully-qualified key (`<modname>.<path>`).
    pub fn get(&self, full_key: &str) -> Option<&ConfigValue> {
        self.entries.get(full_key)
    }

    /// Looks up `key` prefixed with the currently executing mod's name (or
    /// `mre` if the context stack is empty), per SPEC_FULL.md §4.7's
    /// "public reads always prefix the caller's key" rule.
    pub fn get_for_active_mod(&self, key: &str) -> Option<&ConfigValue> {
        let full_key = format!("{}.{}", context::current_mod_name(), key);
        self.get(&full_key)
    }

    /// Typed bool read for the active mod's namespace.
    pub fn get_bool(&self, key: &str) -> MreResult<bool> {
        self.get_for_active_mod(key)
            .ok_or(ErrorCode::FailedLookup)?
            .as_bool()
            .ok_or(ErrorCode::FailedParse)
    }

    /// Typed integer read for the active mod's namespace.
    pub fn get_int(&self, key: &str) -> MreResult<i64> {
        self.get_for_active_mod(key)
            .ok_or(ErrorCode::FailedLookup)?
            .as_int()
            .ok_or(ErrorCode::FailedParse)
    }

    /// Typed double read for the active mod's namespace.
    pub fn get_double(&self, key: &str) -> MreResult<f64> {
        self.get_for_active_mod(key)
            .ok_or(ErrorCode::FailedLookup)?
            .as_double()
            .ok_or(ErrorCode::FailedParse)
    }

    /// Typed string read for the active mod's namespace.
    pub fn get_string(&self, key: &str) -> MreResult<String> {
        self.get_for_active_mod(key)
            .ok_or(ErrorCode::FailedLookup)?
            .as_str()
            .map(str::to_string)
            .ok_or(ErrorCode::FailedParse)
    }

    /// Typed array read for the active mod's namespace. Returns the
    /// *total* element count alongside the values, letting a caller probe
    /// size before allocating a destination buffer (mirroring the C ABI's
    /// `size=0` probing convention used elsewhere in the MRE).
    pub fn get_array(&self, key: &str) -> MreResult<Vec<ConfigValue>> {
        self.get_for_active_mod(key)
            .ok_or(ErrorCode::FailedLookup)?
            .as_array()
            .map(|s| s.to_vec())
            .ok_or(ErrorCode::FailedParse)
    }
}

fn flatten(value: &toml::Value, prefix: &str, out: &mut HashMap<String, ConfigValue>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(val, &full_key, out);
            }
        }
        leaf => {
            if !prefix.is_empty() {
                out.insert(prefix.to_string(), to_config_value(leaf));
            }
        }
    }
}

fn to_config_value(value: &toml::Value) -> ConfigValue {
    match value {
        toml::Value::Boolean(b) => ConfigValue::Bool(*b),
        toml::Value::Integer(i) => ConfigValue::Int(*i),
        toml::Value::Float(f) => ConfigValue::Double(*f),
        toml::Value::String(s) => ConfigValue::Str(s.clone()),
        toml::Value::Array(items) => {
            // An empty array becomes an empty `ConfigValue::Array`, the
            // "null-placeholder-for-empty-array" case from SPEC_FULL.md
            // §4.7: it still type-checks as an array on read, it is just
            // empty.
            ConfigValue::Array(items.iter().map(to_config_value).collect())
        }
        toml::Value::Table(nested) => {
            // A nested inline table under an array has no scalar
            // representation; fold it into a string for round-trip safety
            // rather than silently dropping data.
            ConfigValue::Str(nested.to_string())
        }
        toml::Value::Datetime(dt) => ConfigValue::Str(dt.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [mre]
        mods = ["modA", "modB"]
        promoteUnhandledErrors = true

        [modA]
        retries = 3
        ratio = 0.5
        name = "Alpha"
        tags = ["a", "b", "c"]
    "#;

    #[test]
    fn flattens_dotted_paths() {
        let store = ConfigStore::parse_str(SAMPLE).unwrap();
        assert_eq!(store.mod_load_order(), vec!["modA", "modB"]);
        assert!(store.promote_unhandled_errors());
        assert_eq!(store.get("modA.retries").unwrap().as_int(), Some(3));
    }

    #[test]
    fn typed_reads_are_prefixed_with_active_mod() {
        let store = ConfigStore::parse_str(SAMPLE).unwrap();
        context::push(0, "modA");
        assert_eq!(store.get_int("retries").unwrap(), 3);
        assert_eq!(store.get_double("ratio").unwrap(), 0.5);
        assert_eq!(store.get_string("name").unwrap(), "Alpha");
        assert_eq!(store.get_array("tags").unwrap().len(), 3);
        context::pop();
    }

    #[test]
    fn missing_key_is_failed_lookup() {
        let store = ConfigStore::parse_str(SAMPLE).unwrap();
        context::push(0, "modA");
        let err = store.get_int("nonexistent").unwrap_err();
        context::pop();
        assert_eq!(err, ErrorCode::FailedLookup);
    }

    #[test]
    fn wrong_type_is_failed_parse() {
        let store = ConfigStore::parse_str(SAMPLE).unwrap();
        context::push(0, "modA");
        let err = store.get_bool("retries").unwrap_err();
        context::pop();
        assert_eq!(err, ErrorCode::FailedParse);
    }

    #[test]
    fn bad_toml_is_bad_file() {
        let err = ConfigStore::parse_str("not [ valid").unwrap_err();
        assert_eq!(err, ErrorCode::BadFile);
    }
}
