use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mre_runtime::config::ConfigStore;
use mre_runtime::modloader::platform_filename;

use crate::error::ValidationError;

/// An `aer/conf.toml`, parsed and paired with the mod directory it names,
/// ready for offline validation before a host process loads it for real.
pub struct ModRoster {
    config: ConfigStore,
    mods_dir: PathBuf,
}

impl ModRoster {
    /// Reads `conf_path` and pairs it with `mods_dir` for validation.
    pub fn from_paths(conf_path: &Path, mods_dir: &Path) -> Result<Self> {
        let config = ConfigStore::parse_file(conf_path)
            .map_err(|_| ValidationError::BadConfig(conf_path.to_path_buf()))
            .with_context(|| format!("reading {}", conf_path.display()))?;
        Ok(Self { config, mods_dir: mods_dir.to_path_buf() })
    }

    /// The `mre.mods` load order as declared in the config.
    pub fn load_order(&self) -> Vec<String> {
        self.config.mod_load_order()
    }

    /// Checks the roster for duplicate names and missing shared libraries,
    /// returning every problem found rather than stopping at the first.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut problems = Vec::new();
        let load_order = self.load_order();

        if load_order.is_empty() {
            problems.push(ValidationError::EmptyRoster);
        }

        let mut seen = HashSet::new();
        for name in &load_order {
            if !seen.insert(name.clone()) {
                problems.push(ValidationError::DuplicateMod(name.clone()));
            }
        }

        for name in seen {
            let expected = self.mods_dir.join(platform_filename(&name));
            if !expected.is_file() {
                problems.push(ValidationError::MissingLibrary { name, expected });
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_conf(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("conf.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn clean_roster_validates() {
        let dir = tempfile::tempdir().unwrap();
        let mods_dir = dir.path().join("mods");
        std::fs::create_dir(&mods_dir).unwrap();
        std::fs::File::create(mods_dir.join(platform_filename("alpha"))).unwrap();

        let conf = write_conf(dir.path(), "[mre]\nmods = [\"alpha\"]\n");
        let roster = ModRoster::from_paths(&conf, &mods_dir).unwrap();
        assert!(roster.validate().is_empty());
    }

    #[test]
    fn missing_library_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mods_dir = dir.path().join("mods");
        std::fs::create_dir(&mods_dir).unwrap();

        let conf = write_conf(dir.path(), "[mre]\nmods = [\"ghost\"]\n");
        let roster = ModRoster::from_paths(&conf, &mods_dir).unwrap();
        let problems = roster.validate();
        assert_eq!(problems.len(), 1);
        assert!(matches!(problems[0], ValidationError::MissingLibrary { .. }));
    }

    #[test]
    fn duplicate_name_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mods_dir = dir.path().join("mods");
        std::fs::create_dir(&mods_dir).unwrap();
        std::fs::File::create(mods_dir.join(platform_filename("alpha"))).unwrap();

        let conf = write_conf(dir.path(), "[mre]\nmods = [\"alpha\", \"alpha\"]\n");
        let roster = ModRoster::from_paths(&conf, &mods_dir).unwrap();
        let problems = roster.validate();
        assert!(problems.iter().any(|p| matches!(p, ValidationError::DuplicateMod(name) if name == "alpha")));
    }

    #[test]
    fn empty_roster_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mods_dir = dir.path().join("mods");
        std::fs::create_dir(&mods_dir).unwrap();

        let conf = write_conf(dir.path(), "[mre]\nmods = []\n");
        let roster = ModRoster::from_paths(&conf, &mods_dir).unwrap();
        assert!(matches!(roster.validate()[0], ValidationError::EmptyRoster));
    }
}
