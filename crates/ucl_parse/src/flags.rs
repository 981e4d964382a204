//! Parser behavior flags.

use bitflags::bitflags;

bitflags! {
    /// Options fixed when a [`Parser`](crate::Parser) is created.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ParserFlags: u32 {
        /// Lowercase every key as it is stored.
        const KEY_LOWERCASE = 1 << 0;
        /// Keep time-suffixed atoms (`10s`, `5min`) as strings.
        const NO_TIME = 1 << 2;
    }
}
