//! The context stack: a LIFO of currently-executing mods, used so that
//! logging and mod-local namespacing can answer "who am I?" implicitly
//! (SPEC_FULL.md §4.2).

use std::cell::RefCell;

use mre_common::MOD_NULL;

struct ContextFrame {
    mod_index: u32,
    mod_name: String,
}

thread_local! {
    static CONTEXT_STACK: RefCell<Vec<ContextFrame>> = const { RefCell::new(Vec::new()) };
}

/// Pushes a mod onto the context stack before invoking one of its
/// callbacks. Must be paired with [`pop`].
pub fn push(mod_index: u32, mod_name: &str) {
    CONTEXT_STACK.with(|stack| {
        stack.borrow_mut().push(ContextFrame {
            mod_index,
            mod_name: mod_name.to_string(),
        })
    });
}

/// Pops the most recently pushed context frame.
pub fn pop() {
    CONTEXT_STACK.with(|stack| {
        stack.borrow_mut().pop();
    });
}

/// The currently executing mod's index, or [`MOD_NULL`] if the context
/// stack is empty (the MRE itself is executing).
pub fn current_mod_index() -> u32 {
    CONTEXT_STACK.with(|stack| {
        stack
            .borrow()
            .last()
            .map(|frame| frame.mod_index)
            .unwrap_or(MOD_NULL)
    })
}

/// The currently executing mod's name, or `"mre"` if the context stack is
/// empty.
pub fn current_mod_name() -> String {
    CONTEXT_STACK.with(|stack| {
        stack
            .borrow()
            .last()
            .map(|frame| frame.mod_name.clone())
            .unwrap_or_else(|| "mre".to_string())
    })
}

/// Runs `f` with `mod_index`/`mod_name` pushed as the current context,
/// guaranteeing the frame is popped even if `f` panics (the panic is still
/// propagated — callers at an FFI boundary are expected to wrap with
/// `catch_unwind` themselves).
pub fn with_context<T>(mod_index: u32, mod_name: &str, f: impl FnOnce() -> T) -> T {
    push(mod_index, mod_name);
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));
    pop();
    match result {
        Ok(value) => value,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_reports_mre() {
        assert_eq!(current_mod_index(), MOD_NULL);
        assert_eq!(current_mod_name(), "mre");
    }

    #[test]
    fn push_pop_nests_correctly() {
        push(0, "modA");
        assert_eq!(current_mod_name(), "modA");
        push(1, "modB");
        assert_eq!(current_mod_name(), "modB");
        pop();
        assert_eq!(current_mod_name(), "modA");
        pop();
        assert_eq!(current_mod_name(), "mre");
    }

    #[test]
    fn with_context_pops_even_on_panic() {
        let result = std::panic::catch_unwind(|| {
            with_context(2, "modC", || panic!("boom"));
        });
        assert!(result.is_err());
        assert_eq!(current_mod_name(), "mre");
    }
}
