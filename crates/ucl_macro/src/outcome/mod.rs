//! Handler results and the raw byte that carries them across the bridge.

use tracing::trace;

/// Raw byte for a rejected directive.
pub const RAW_REJECTED: u8 = 0;
/// Raw byte for an accepted directive.
pub const RAW_ACCEPTED: u8 = 1;

/// What a host handler decided about its argument.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MacroOutcome {
    /// Directive consumed; the parse continues.
    Accepted,
    /// The parse aborts with a macro-rejection error.
    Rejected,
}

impl MacroOutcome {
    #[inline]
    pub const fn into_raw(self) -> u8 {
        match self {
            MacroOutcome::Accepted => RAW_ACCEPTED,
            MacroOutcome::Rejected => RAW_REJECTED,
        }
    }

    #[inline]
    pub const fn is_accepted(self) -> bool {
        matches!(self, MacroOutcome::Accepted)
    }
}

impl From<bool> for MacroOutcome {
    fn from(accepted: bool) -> Self {
        if accepted {
            MacroOutcome::Accepted
        } else {
            MacroOutcome::Rejected
        }
    }
}

impl From<MacroOutcome> for bool {
    fn from(outcome: MacroOutcome) -> Self {
        outcome.is_accepted()
    }
}

/// `Ok(())` accepts; any error rejects.
impl<E> From<Result<(), E>> for MacroOutcome {
    fn from(result: Result<(), E>) -> Self {
        MacroOutcome::from(result.is_ok())
    }
}

/// Convert a raw outcome byte to the grammar engine's boolean.
///
/// Only [`RAW_ACCEPTED`] accepts. Every other value, including ones outside
/// the boolean domain, rejects.
#[inline]
pub fn coerce_outcome(raw: u8) -> bool {
    match raw {
        RAW_ACCEPTED => true,
        RAW_REJECTED => false,
        other => {
            trace!(raw = other, "out-of-domain macro outcome treated as rejection");
            false
        }
    }
}
