//! Interned string handles.
//!
//! A [`Symbol`] is the 32-bit ID the [`StringInterner`](crate::StringInterner)
//! assigns to each distinct string. Comparing two symbols compares the
//! strings they stand for, in O(1).
//!
//! ```
//! use sable_mem::Symbol;
//!
//! let a = Symbol::new(3);
//! assert_eq!(a, Symbol::from(3));
//! assert!(Symbol::invalid().is_invalid());
//! ```

use std::fmt;

/// A handle to an interned string.
///
/// `u32::MAX` is reserved for [`Symbol::invalid`], the "no string" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Creates a symbol from a raw ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the raw ID as an index into the interner's string table.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// The sentinel symbol that names no string.
    #[must_use]
    pub const fn invalid() -> Self {
        Self(u32::MAX)
    }

    /// Returns true for the sentinel symbol.
    #[must_use]
    pub const fn is_invalid(self) -> bool {
        self.0 == u32::MAX
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self::invalid()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            write!(f, "Symbol(<invalid>)")
        } else {
            write!(f, "Symbol({})", self.0)
        }
    }
}

impl From<u32> for Symbol {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
