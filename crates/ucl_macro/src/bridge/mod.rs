//! The C-ABI invocation bridge.
//!
//! Three layers between the grammar engine and a host handler:
//!
//! 1. [`ucl_macro_trampoline`]: the [`MacroHandler`] registered with every
//!    parser. Decodes the token from the user-data slot.
//! 2. [`ucl_macro_call`]: the host entry point. Dispatches through
//!    [`MacroRegistry::global`] and returns a raw outcome byte. Never
//!    unwinds.
//! 3. [`coerce_outcome`]: raw byte back to the engine's boolean.
//!
//! The bridge keeps no state, so nested parses may re-enter it freely.

use std::ffi::c_void;
use std::panic::{self, AssertUnwindSafe};
use std::slice;

use tracing::warn;
use ucl_parse::{MacroHandler, UserData};

use crate::registry::dispatch;
use crate::{coerce_outcome, MacroRegistry, MacroToken, RAW_REJECTED};

/// Handler registered for every bridged directive.
///
/// # Safety
///
/// `data` must be valid for reads of `len` bytes for the duration of the
/// call (it may be dangling or null when `len` is 0). `user_data` is never
/// dereferenced; any value is accepted and unknown tokens reject.
pub unsafe extern "C" fn ucl_macro_trampoline(
    data: *const u8,
    len: usize,
    user_data: *mut c_void,
) -> bool {
    let token = MacroToken::from_user_data(UserData::new(user_data));
    // SAFETY: forwarded from this function's contract.
    let raw = unsafe { ucl_macro_call(token.get(), data, len) };
    coerce_outcome(raw)
}

const _: MacroHandler = ucl_macro_trampoline;

/// Run the handler registered for `token` on the argument bytes.
///
/// Returns [`RAW_ACCEPTED`](crate::RAW_ACCEPTED) or
/// [`RAW_REJECTED`]. A missing handler or a panicking one yields
/// [`RAW_REJECTED`].
///
/// # Safety
///
/// `data` must be valid for reads of `len` bytes for the duration of the
/// call, unless `len` is 0.
#[allow(unsafe_code, reason = "exported under a stable C symbol for foreign runtimes")]
#[no_mangle]
pub unsafe extern "C" fn ucl_macro_call(token: usize, data: *const u8, len: usize) -> u8 {
    let bytes: &[u8] = if len == 0 || data.is_null() {
        &[]
    } else {
        // SAFETY: the caller guarantees `data` is readable for `len` bytes,
        // and the slice does not outlive this call.
        unsafe { slice::from_raw_parts(data, len) }
    };
    let token = MacroToken::new(token);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        dispatch(MacroRegistry::global(), token, bytes)
    }));
    match outcome {
        Ok(outcome) => outcome.into_raw(),
        Err(_) => {
            warn!(%token, "macro handler panicked; rejecting directive");
            RAW_REJECTED
        }
    }
}

/// Invoke the handler for `token` through the full bridge.
pub fn invoke(token: MacroToken, data: &[u8]) -> bool {
    // SAFETY: a live slice satisfies the data/len contract, and any
    // user-data value is accepted.
    unsafe { ucl_macro_trampoline(data.as_ptr(), data.len(), token.into_user_data().as_ptr()) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
