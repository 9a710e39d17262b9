//! The thread-local "last error" word and the guard macro public MRE
//! functions use to enforce stage/argument preconditions (SPEC_FULL.md
//! §4.1, §4.8, §7).

use std::cell::Cell;

use mre_common::{ErrorCode, Stage};

use crate::runtime::with_runtime;

thread_local! {
    static LAST_ERROR: Cell<Option<ErrorCode>> = const { Cell::new(None) };
}

/// Sets the thread-local last-error word and logs it, tagged with the
/// currently executing mod (or `"mre"` if none).
pub fn set_error(code: ErrorCode, function: &str) {
    LAST_ERROR.with(|cell| cell.set(Some(code)));
    crate::logging::log_error(function, &code.to_string());

    let promote = with_runtime(|rt| rt.config.promote_unhandled_errors());
    if promote.unwrap_or(false) {
        crate::logging::log_error(
            function,
            &format!("promoteUnhandledErrors is set; aborting on {code}"),
        );
        std::process::abort();
    }
}

/// Clears the thread-local last-error word. Called at the top of every
/// public entry point so a stale error from a previous call never leaks
/// into a successful one.
pub fn clear_error() {
    LAST_ERROR.with(|cell| cell.set(None));
}

/// Returns the last error code set on this thread, if any. This is the
/// Rust-side equivalent of the C ABI's `aer_get_last_error()`.
pub fn last_error() -> Option<ErrorCode> {
    LAST_ERROR.with(|cell| cell.get())
}

/// Fails a public call with [`ErrorCode::SequenceBreak`] unless the runtime
/// is currently in (or past) `min_stage`, per the function's documented
/// stage requirement.
pub fn require_stage(function: &str, current: Stage, requirement: StageRequirement) -> bool {
    let ok = match requirement {
        StageRequirement::ExactlyAt(s) => current.exactly_at(s),
        StageRequirement::AtOrPast(s) => current.at_or_past(s),
        StageRequirement::Past(s) => current.past(s),
    };

    if !ok {
        set_error(ErrorCode::SequenceBreak, function);
    }

    ok
}

/// A function's declared stage precondition (SPEC_FULL.md §3, "Stage").
#[derive(Debug, Clone, Copy)]
pub enum StageRequirement {
    /// Legal only while exactly at the given stage.
    ExactlyAt(Stage),
    /// Legal at the given stage or any later one.
    AtOrPast(Stage),
    /// Legal only strictly after the given stage.
    Past(Stage),
}

/// Fails a public call with [`ErrorCode::NullArgument`] if `ptr` is null.
pub fn require_non_null<T>(function: &str, ptr: *const T) -> bool {
    if ptr.is_null() {
        set_error(ErrorCode::NullArgument, function);
        false
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_error_resets_last_error() {
        set_error(ErrorCode::BadValue, "test_fn");
        assert_eq!(last_error(), Some(ErrorCode::BadValue));
        clear_error();
        assert_eq!(last_error(), None);
    }

    #[test]
    fn require_stage_fails_outside_window() {
        clear_error();
        let ok = require_stage(
            "attach_listener",
            Stage::Action,
            StageRequirement::ExactlyAt(Stage::ListenerReg),
        );
        assert!(!ok);
        assert_eq!(last_error(), Some(ErrorCode::SequenceBreak));
    }

    #[test]
    fn require_non_null_flags_null_pointers() {
        clear_error();
        let p: *const u8 = std::ptr::null();
        assert!(!require_non_null("fn", p));
        assert_eq!(last_error(), Some(ErrorCode::NullArgument));
    }
}
