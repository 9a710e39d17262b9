//! The typed shape of `aer/conf.toml`'s `[mre]` table (SPEC_FULL.md §3.1).
//! Everything outside this one table is read through the config reader's
//! flattened `<modname>.<path>` store instead, since its shape is not known
//! ahead of time the way the MRE's own settings are.

use serde::Deserialize;

/// `aer/conf.toml`'s `[mre]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MreConfig {
    /// Load order for mod shared libraries.
    pub mods: Vec<String>,
    /// Promotes any non-ok listener return into a process abort
    /// (SPEC_FULL.md §7).
    #[serde(rename = "promoteUnhandledErrors")]
    pub promote_unhandled_errors: bool,
    /// Overrides `AER_LOG`'s default verbosity when set.
    #[serde(rename = "logLevel")]
    pub log_level: Option<String>,
}

impl Default for MreConfig {
    fn default() -> Self {
        Self { mods: Vec::new(), promote_unhandled_errors: false, log_level: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_table_yields_defaults() {
        let config: MreConfig = toml::from_str("").unwrap();
        assert!(config.mods.is_empty());
        assert!(!config.promote_unhandled_errors);
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn reads_renamed_fields() {
        let config: MreConfig = toml::from_str(
            r#"
            mods = ["modA"]
            promoteUnhandledErrors = true
            logLevel = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.mods, vec!["modA".to_string()]);
        assert!(config.promote_unhandled_errors);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }
}
