use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::*;
use crate::RAW_ACCEPTED;
use pretty_assertions::assert_eq;

#[test]
fn invoke_passes_bytes_and_result() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let token = MacroRegistry::global().register(move |data: &[u8]| {
        sink.lock().unwrap().push(data.to_vec());
        data == b"yes"
    });
    assert!(invoke(token, b"yes"));
    assert!(!invoke(token, b"no"));
    assert_eq!(*seen.lock().unwrap(), vec![b"yes".to_vec(), b"no".to_vec()]);
    MacroRegistry::global().remove(token);
}

#[test]
fn single_invocation_per_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let token = MacroRegistry::global().register(move |_: &[u8]| {
        counter.fetch_add(1, Ordering::SeqCst);
        true
    });
    invoke(token, b"x");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    MacroRegistry::global().remove(token);
}

#[test]
fn panicking_handler_rejects() {
    let token = MacroRegistry::global().register(|_: &[u8]| -> bool { panic!("handler bug") });
    assert!(!invoke(token, b"x"));
    MacroRegistry::global().remove(token);
}

#[test]
fn unregistered_token_rejects() {
    let token = MacroRegistry::global().register(|_: &[u8]| true);
    MacroRegistry::global().remove(token);
    assert!(!invoke(token, b"x"));
}

#[test]
#[allow(unsafe_code, reason = "calls the C-ABI entry points directly")]
fn entry_points_accept_empty_null_data() {
    let token = MacroRegistry::global().register(|data: &[u8]| data.is_empty());
    // SAFETY: len is 0, so data is never read.
    let raw = unsafe { ucl_macro_call(token.get(), std::ptr::null(), 0) };
    assert_eq!(raw, RAW_ACCEPTED);
    // SAFETY: same as above.
    let accepted = unsafe {
        ucl_macro_trampoline(std::ptr::null(), 0, token.into_user_data().as_ptr())
    };
    assert!(accepted);
    MacroRegistry::global().remove(token);
}

#[test]
fn argument_is_not_retained() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let token = MacroRegistry::global().register(move |data: &[u8]| {
        sink.lock().unwrap().push(data.to_vec());
        true
    });
    let mut buffer = b"foo".to_vec();
    assert!(invoke(token, &buffer));
    buffer.fill(b'x');
    drop(buffer);
    assert_eq!(*seen.lock().unwrap(), vec![b"foo".to_vec()]);
    MacroRegistry::global().remove(token);
}

extern "C" {
    #[link_name = "ucl_macro_call"]
    fn exported_macro_call(token: usize, data: *const u8, len: usize) -> u8;
}

#[test]
fn call_is_exported_unmangled() {
    let token = MacroRegistry::global().register(|data: &[u8]| data == b"ok");
    let arg = b"ok";
    // SAFETY: `arg` is live for the duration of the call.
    let raw = unsafe { exported_macro_call(token.get(), arg.as_ptr(), arg.len()) };
    assert_eq!(raw, RAW_ACCEPTED);
    // SAFETY: as above.
    let raw = unsafe { exported_macro_call(token.get(), b"no".as_ptr(), 2) };
    assert_eq!(raw, RAW_REJECTED);
    MacroRegistry::global().remove(token);
}
