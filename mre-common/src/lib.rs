//! Types shared between the mod runtime environment (`mre-runtime`) and the
//! mod-facing SDK (`mre-sdk`).
//!
//! Everything in this crate is either a `#[repr(C)]` layout that must match
//! the host VM's own memory layout byte-for-byte, or a small pure-Rust value
//! type (errors, event keys, scalars) that both sides need to agree on
//! without actually linking against each other.

pub mod bootstrap;
pub mod error;
pub mod event;
pub mod ffi;
pub mod mre_config;
pub mod stage;
pub mod value;

pub use bootstrap::{Bootstrap, Mocked};
pub use error::{ErrorCode, MreResult};
pub use event::{EventKey, EventType};
pub use mre_config::MreConfig;
pub use stage::Stage;
pub use value::{ConfigValue, PrimitiveValue, SaveScalar};

/// Mod index reserved for values created by the MRE itself rather than by a
/// loaded mod. Used as the namespace for "public" mod-locals and as the
/// implicit context when the context stack (see [`stage`]) is empty.
pub const MOD_NULL: u32 = u32::MAX;

/// Maximum length, in bytes, of a mod-local name (`AERLocal` key).
pub const MOD_LOCAL_NAME_MAX: usize = 24;

/// Upper bound on alarm sub-events per object (`alarm[0..12)`).
pub const ALARM_COUNT: u32 = 12;

/// Upper bound used for "other" and "draw" event sub-kinds, whose exact
/// enumeration the host binary does not expose. See SPEC_FULL.md §9,
/// Open Question (a).
pub const UNKNOWN_SUBEVENT_BOUND: u32 = 128;
