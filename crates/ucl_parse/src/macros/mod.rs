//! C-ABI macro registrations.
//!
//! A macro is a directive name bound to an [`MacroHandler`] plus one opaque
//! pointer-sized [`UserData`] slot. The grammar engine never looks inside
//! the slot; it hands it back to the handler on every call.

use std::ffi::c_void;
use std::fmt;

use rustc_hash::FxHashMap;

/// Directive handler signature.
///
/// Receives the raw argument bytes (`data`, `len`; not NUL-terminated, may
/// be empty) and the user data registered with it. Returns `true` to accept
/// the directive, `false` to abort the parse.
pub type MacroHandler =
    unsafe extern "C" fn(data: *const u8, len: usize, user_data: *mut c_void) -> bool;

/// Opaque user-data slot passed back to a [`MacroHandler`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct UserData(*mut c_void);

// SAFETY: the grammar engine never dereferences the pointer; it only copies
// it into handler calls. Whether it may cross threads is the registering
// code's contract with its handler (see `Parser::register_raw_macro`).
#[allow(unsafe_code, reason = "UserData is an opaque handle, never dereferenced")]
unsafe impl Send for UserData {}
#[allow(unsafe_code, reason = "UserData is an opaque handle, never dereferenced")]
unsafe impl Sync for UserData {}

impl UserData {
    pub const NULL: UserData = UserData(std::ptr::null_mut());

    pub const fn new(ptr: *mut c_void) -> Self {
        UserData(ptr)
    }

    pub const fn as_ptr(self) -> *mut c_void {
        self.0
    }
}

impl fmt::Debug for UserData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserData({:p})", self.0)
    }
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct MacroEntry {
    handler: MacroHandler,
    user_data: UserData,
}

impl MacroEntry {
    /// Call the handler exactly once with `data`.
    ///
    /// `data` is only borrowed for the duration of the call.
    #[allow(unsafe_code, reason = "directive handlers are C-ABI callbacks")]
    pub(crate) fn call(&self, data: &[u8]) -> bool {
        // SAFETY: `data` is a live slice for the whole call and its length is
        // passed alongside the pointer. `Parser::register_raw_macro` requires
        // the handler to be sound for any such slice and its own user data.
        unsafe { (self.handler)(data.as_ptr(), data.len(), self.user_data.as_ptr()) }
    }
}

/// Directive name to handler table, one per parser.
#[derive(Clone, Debug, Default)]
pub(crate) struct MacroTable {
    entries: FxHashMap<String, MacroEntry>,
}

impl MacroTable {
    /// Register `name`, replacing any earlier registration.
    pub(crate) fn register(&mut self, name: &str, handler: MacroHandler, user_data: UserData) {
        self.entries
            .insert(name.to_owned(), MacroEntry { handler, user_data });
    }

    pub(crate) fn get(&self, name: &str) -> Option<MacroEntry> {
        self.entries.get(name).copied()
    }

    /// Registered names, sorted for stable messages.
    pub(crate) fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
