//! Token to handler registry.
//!
//! Handlers live behind `Arc`, so a lookup clones the handler out and drops
//! the read lock before the call. A handler may therefore register new
//! macros or start nested parses that dispatch through the same registry.

use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{MacroOutcome, MacroToken};

/// Host-side implementation of a macro directive.
///
/// Implemented for every `Fn(&[u8]) -> R` where `R: Into<MacroOutcome>`, so
/// closures returning `bool`, `MacroOutcome` or `Result<(), E>` all work.
pub trait MacroFunc: Send + Sync + 'static {
    /// Decide about one directive argument. `data` is only valid during the
    /// call.
    fn call(&self, data: &[u8]) -> MacroOutcome;
}

impl<F, R> MacroFunc for F
where
    F: Fn(&[u8]) -> R + Send + Sync + 'static,
    R: Into<MacroOutcome>,
{
    fn call(&self, data: &[u8]) -> MacroOutcome {
        self(data).into()
    }
}

/// Maps tokens to handlers.
///
/// Tokens are unique for the registry's lifetime among live registrations:
/// [`register`](Self::register) issues the next token not currently in use,
/// wrapping around at `usize::MAX`.
pub struct MacroRegistry {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    handlers: FxHashMap<MacroToken, Arc<dyn MacroFunc>>,
    next: usize,
}

static GLOBAL: LazyLock<MacroRegistry> = LazyLock::new(MacroRegistry::new);

impl MacroRegistry {
    pub fn new() -> Self {
        MacroRegistry {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// The process-wide registry the bridge dispatches through.
    pub fn global() -> &'static MacroRegistry {
        &GLOBAL
    }

    /// Store `handler` under a fresh token.
    pub fn register<F, R>(&self, handler: F) -> MacroToken
    where
        F: Fn(&[u8]) -> R + Send + Sync + 'static,
        R: Into<MacroOutcome>,
    {
        self.register_handler(Arc::new(handler))
    }

    /// Store an already shared handler under a fresh token.
    pub fn register_handler(&self, handler: Arc<dyn MacroFunc>) -> MacroToken {
        let mut inner = self.inner.write();
        let token = loop {
            let candidate = MacroToken::new(inner.next);
            inner.next = inner.next.wrapping_add(1);
            if !inner.handlers.contains_key(&candidate) {
                break candidate;
            }
        };
        inner.handlers.insert(token, handler);
        debug!(%token, "registered macro handler");
        token
    }

    /// Store `handler` under a caller-chosen token, returning the handler it
    /// replaces.
    pub fn insert<F, R>(&self, token: MacroToken, handler: F) -> Option<Arc<dyn MacroFunc>>
    where
        F: Fn(&[u8]) -> R + Send + Sync + 'static,
        R: Into<MacroOutcome>,
    {
        debug!(%token, "inserted macro handler");
        self.inner.write().handlers.insert(token, Arc::new(handler))
    }

    /// Drop the handler for `token`. In-flight calls keep their clone alive.
    pub fn remove(&self, token: MacroToken) -> bool {
        let removed = self.inner.write().handlers.remove(&token).is_some();
        if removed {
            debug!(%token, "removed macro handler");
        }
        removed
    }

    /// The handler for `token`, cloned out from under the lock.
    pub fn lookup(&self, token: MacroToken) -> Option<Arc<dyn MacroFunc>> {
        self.inner.read().handlers.get(&token).cloned()
    }

    pub fn contains(&self, token: MacroToken) -> bool {
        self.inner.read().handlers.contains_key(&token)
    }

    pub fn len(&self) -> usize {
        self.inner.read().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MacroRegistry {
    fn default() -> Self {
        MacroRegistry::new()
    }
}

impl fmt::Debug for MacroRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacroRegistry")
            .field("handlers", &self.len())
            .finish_non_exhaustive()
    }
}

/// Call the handler registered for `token` with `data`.
///
/// An unknown token rejects.
pub fn dispatch(registry: &MacroRegistry, token: MacroToken, data: &[u8]) -> MacroOutcome {
    match registry.lookup(token) {
        Some(handler) => handler.call(data),
        None => {
            debug!(%token, "no macro handler for token");
            MacroOutcome::Rejected
        }
    }
}
