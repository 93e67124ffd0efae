//! Stack safety for nested message sends.
//!
//! A forwarded call is a send that performs another send, and forwarders
//! may target other forwarders. Every [`send`](crate::send) runs inside
//! [`ensure_sufficient_stack`] so long chains grow the stack on demand.
//! WASM targets call through directly.
//!
//! Growth alone never terminates a cycle (a forwarder whose receiver is
//! itself, or two forwarders pointing at each other), so sends are also
//! counted per thread. Past [`max_send_depth`] a send fails with
//! `StackOverflow` instead of recursing.

use std::cell::Cell;

use crate::errors::{recursion_limit_exceeded, EvalError};

/// Send depth allowed when no limit has been set on the current thread.
pub const DEFAULT_MAX_SEND_DEPTH: usize = 10_000;

thread_local! {
    static SEND_DEPTH: Cell<usize> = const { Cell::new(0) };
    static MAX_SEND_DEPTH: Cell<usize> = const { Cell::new(DEFAULT_MAX_SEND_DEPTH) };
}

/// Ensure sufficient stack space is available before executing `f`.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Limit on nested sends for the current thread.
pub fn max_send_depth() -> usize {
    MAX_SEND_DEPTH.with(Cell::get)
}

/// Set the nested-send limit for the current thread.
pub fn set_max_send_depth(limit: usize) {
    MAX_SEND_DEPTH.with(|max| max.set(limit));
}

/// Number of sends currently in progress on this thread.
pub fn send_depth() -> usize {
    SEND_DEPTH.with(Cell::get)
}

/// One in-progress send. Dropping the frame (on return, error or unwind)
/// releases its depth slot.
pub(crate) struct SendFrame(());

impl SendFrame {
    /// Enter a send, failing when the thread is already at its limit.
    /// The frame is not counted on failure.
    pub(crate) fn enter() -> Result<Self, EvalError> {
        let limit = max_send_depth();
        SEND_DEPTH.with(|depth| {
            let current = depth.get();
            if current >= limit {
                return Err(recursion_limit_exceeded(limit));
            }
            depth.set(current + 1);
            Ok(SendFrame(()))
        })
    }
}

impl Drop for SendFrame {
    fn drop(&mut self) {
        SEND_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

#[cfg(test)]
mod tests;
