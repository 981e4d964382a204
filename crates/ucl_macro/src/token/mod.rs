//! Handler tokens and their user-data encoding.
//!
//! This is the only place a token and a pointer meet. The token's bits are
//! stored as the pointer's address with no provenance, and read back with
//! [`pointer::addr`], so the conversion is lossless for every `usize`.

use std::ffi::c_void;
use std::fmt;
use std::ptr;

use ucl_parse::UserData;

/// Opaque identifier of a registered macro handler.
///
/// Issued by [`MacroRegistry`](crate::MacroRegistry); a plain value, not a
/// resource. Dropping a token does not unregister anything.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct MacroToken(usize);

impl MacroToken {
    #[inline]
    pub const fn new(raw: usize) -> Self {
        MacroToken(raw)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Encode into the pointer-sized user-data slot of a raw registration.
    #[inline]
    pub fn into_user_data(self) -> UserData {
        UserData::new(ptr::without_provenance_mut::<c_void>(self.0))
    }

    /// Decode a token previously produced by [`into_user_data`](Self::into_user_data).
    #[inline]
    pub fn from_user_data(user_data: UserData) -> Self {
        MacroToken(user_data.as_ptr().addr())
    }
}

impl fmt::Debug for MacroToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacroToken({})", self.0)
    }
}

impl fmt::Display for MacroToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for MacroToken {
    fn from(raw: usize) -> Self {
        MacroToken(raw)
    }
}
