#![warn(missing_docs)]

//! ## The mod runtime environment.
//!
//! Loaded as a shared library into a host game process, `mre-runtime` gives
//! third-party native mods the ability to intercept and re-order the host
//! VM's event dispatch, register new object classes that inherit events
//! from existing ones, keep per-instance state outside the VM's own local
//! table, and participate in the host's save/load cycle.
//!
//! The crate is implementation-agnostic about the host VM beyond the
//! `#[repr(C)]` layouts in [`mre_common::ffi`]: everything here operates on
//! pointers the host hands over at [`init`] and never assumes more about
//! their pointee than those layouts describe.

pub mod abi;
pub mod config;
pub mod context;
pub mod error;
pub mod eventtrap;
pub mod hostbind;
pub mod instance;
pub mod logging;
pub mod modloader;
pub mod objecttree;
pub mod runtime;
pub mod savehook;
pub mod surface;

pub use mre_common::{Bootstrap, Mocked};

// Re-export the extern "C" entry points at the crate root so the host's
// symbol table sees flat, unqualified names when this crate is built as a
// cdylib.
pub use runtime::{event, init, load_data, primitive_pointer_copy, save_data, step};
