//! Stack safety for deeply nested documents.
//!
//! Objects and arrays recurse through the grammar; macro handlers may start
//! nested parses on the same thread. Both paths go through
//! [`ensure_sufficient_stack`].

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
#[cfg(not(target_arch = "wasm32"))]
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[cfg(target_arch = "wasm32")]
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
