//! A fixed 256-bit set of byte values.

use std::fmt;

/// A set of byte values, used to configure bytes a converter skips.
///
/// # Example
///
/// ```
/// use c8::ByteSet;
///
/// let set = ByteSet::whitespace();
/// assert!(set.contains(b'\n'));
/// assert!(!set.contains(b'a'));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteSet {
    bits: [u64; 4],
}

impl ByteSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self { bits: [0; 4] }
    }

    /// Builds a set from the given bytes.
    pub const fn from_bytes(bytes: &[u8]) -> Self {
        let mut set = Self::empty();
        let mut i = 0;
        while i < bytes.len() {
            set = set.with(bytes[i]);
            i += 1;
        }
        set
    }

    /// Space, tab, carriage return and line feed.
    pub const fn whitespace() -> Self {
        Self::from_bytes(b" \t\r\n")
    }

    /// Returns a copy of the set with `byte` added.
    pub const fn with(mut self, byte: u8) -> Self {
        self.bits[(byte >> 6) as usize] |= 1 << (byte & 63);
        self
    }

    /// Returns true if `byte` is in the set.
    #[inline]
    pub const fn contains(&self, byte: u8) -> bool {
        self.bits[(byte >> 6) as usize] & (1 << (byte & 63)) != 0
    }

    /// Returns the number of bytes in the set.
    pub const fn len(&self) -> usize {
        (self.bits[0].count_ones()
            + self.bits[1].count_ones()
            + self.bits[2].count_ones()
            + self.bits[3].count_ones()) as usize
    }

    /// Returns true if the set holds no bytes.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |&b| self.contains(b))
    }
}

impl fmt::Debug for ByteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|b| std::ascii::escape_default(b).to_string()))
            .finish()
    }
}
