//! Process exit status as independent flag bits.

use bitflags::bitflags;

bitflags! {
    /// Exit status bitmask. Empty means full success.
    ///
    /// Each failure site contributes its own bit; bits from separate
    /// failures are merged with `|`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ExitFlags: u8 {
        /// Reading the input failed.
        const INPUT = 1 << 0;
        /// Writing the output failed.
        const OUTPUT = 1 << 1;
        /// Malformed, unterminated or invalid content.
        const PROCESSING = 1 << 2;
        /// Writing a diagnostic failed.
        const GENERIC = 1 << 5;
        /// Bad arguments or unknown command.
        const INVOCATION = 1 << 6;
    }
}

impl ExitFlags {
    /// Returns the process exit code for these flags.
    pub fn code(self) -> u8 {
        self.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_values() {
        assert_eq!(ExitFlags::empty().code(), 0);
        assert_eq!(ExitFlags::INPUT.code(), 1);
        assert_eq!(ExitFlags::OUTPUT.code(), 2);
        assert_eq!(ExitFlags::PROCESSING.code(), 4);
        assert_eq!(ExitFlags::GENERIC.code(), 32);
        assert_eq!(ExitFlags::INVOCATION.code(), 64);
    }

    #[test]
    fn test_merge() {
        let flags = ExitFlags::OUTPUT | ExitFlags::GENERIC;
        assert_eq!(flags.code(), 34);
        assert!(flags.contains(ExitFlags::OUTPUT));
        assert!(!flags.contains(ExitFlags::INPUT));
    }
}
