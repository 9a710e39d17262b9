use thiserror::Error;

/// A single problem found while validating a mod roster, collected rather
/// than returned eagerly so a single run reports everything wrong at once.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// `aer/conf.toml` could not be read or parsed as TOML.
    #[error("failed to read or parse config at {0}")]
    BadConfig(std::path::PathBuf),

    /// `mre.mods` is absent or empty.
    #[error("mre.mods lists no mods")]
    EmptyRoster,

    /// The same mod name appears more than once in `mre.mods`.
    #[error("mod \"{0}\" is listed more than once in mre.mods")]
    DuplicateMod(String),

    /// A mod named in `mre.mods` has no matching shared library on disk.
    #[error("mod \"{name}\" has no shared library at {expected}")]
    MissingLibrary {
        /// The mod's name as it appears in `mre.mods`.
        name: String,
        /// The path the loader would look for at boot.
        expected: std::path::PathBuf,
    },
}
