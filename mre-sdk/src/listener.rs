//! Event listener registration and chain continuation (SPEC_FULL.md §4.4).

use std::os::raw::c_void;

pub use mre_common::ffi::ModListenerFn;
pub use mre_common::EventType as EventKind;

use crate::{ffi, raw_error, AerResult};

/// Attaches `listener` to `(object_index, kind, event_number)`, legal only
/// during a mod's `register_object_listeners` callback. `listener` is an
/// ordinary `extern "C" fn(iter, target, other) -> i32`; use [`Chain`] to
/// call onward through the rest of the chain from inside it.
pub fn attach(object_index: u32, kind: EventKind, event_number: u32, listener: ModListenerFn) -> AerResult<()> {
    let ok = unsafe { ffi::aer_attach_listener(object_index, kind as i32, event_number, listener) };
    if ok == 0 {
        Err(raw_error())
    } else {
        Ok(())
    }
}

/// The per-dispatch chain handle a listener receives as its `iter`
/// argument. Calling [`Chain::next`] runs the next listener in the chain
/// (or the trap's captured/default fallthrough once exhausted) and
/// returns its proceed/cancel decision.
pub struct Chain(*mut c_void);

impl Chain {
    /// Wraps the raw `iter` pointer a listener was called with.
    ///
    /// # Safety
    /// `iter` must be exactly the pointer the currently executing listener
    /// received; it is only valid for the duration of that call.
    pub unsafe fn from_raw(iter: *mut c_void) -> Self {
        Chain(iter)
    }

    /// Runs the next listener (or fallthrough) in the chain. Returns
    /// `true` if the event may proceed, `false` if this call cancelled it.
    pub fn next(&mut self, target: *mut c_void, other: *mut c_void) -> bool {
        unsafe { ffi::aer_event_continue(self.0, target, other) != 0 }
    }
}
