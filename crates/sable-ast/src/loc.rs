//! Source locations for declarations.
//!
//! A [`SourceLoc`] is an opaque byte offset into the compilation unit's
//! buffer. Locations are compared for identity only (a destructuring name
//! is simple exactly when its open and close locations coincide), so they
//! carry no line or column data.
//!
//! # Examples
//!
//! ```
//! use sable_ast::loc::{SourceLoc, SourceRange};
//!
//! let open = SourceLoc::new(4);
//! let close = SourceLoc::new(12);
//! let range = SourceRange::new(open, close);
//!
//! assert_eq!(range.start, open);
//! assert!(!range.is_point());
//! assert!(SourceRange::point(open).is_point());
//! ```

use std::fmt;

/// A position in the source buffer.
///
/// `SourceLoc::invalid()` marks synthesized nodes with no written location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLoc(u32);

impl SourceLoc {
    /// Creates a location at a byte offset.
    #[must_use]
    pub const fn new(offset: u32) -> Self {
        Self(offset)
    }

    /// The location of something that was never written in source.
    #[must_use]
    pub const fn invalid() -> Self {
        Self(u32::MAX)
    }

    /// Returns true unless this is the invalid location.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    /// Returns the byte offset, or `None` for the invalid location.
    #[must_use]
    pub const fn offset(self) -> Option<u32> {
        if self.is_valid() { Some(self.0) } else { None }
    }
}

impl Default for SourceLoc {
    fn default() -> Self {
        Self::invalid()
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset() {
            Some(offset) => write!(f, "@{offset}"),
            None => write!(f, "@<invalid>"),
        }
    }
}

/// An inclusive pair of locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceRange {
    /// First location of the range
    pub start: SourceLoc,
    /// Last location of the range
    pub end: SourceLoc,
}

impl SourceRange {
    /// Creates a range from its two ends.
    #[must_use]
    pub const fn new(start: SourceLoc, end: SourceLoc) -> Self {
        Self { start, end }
    }

    /// Creates a range covering a single location.
    #[must_use]
    pub const fn point(loc: SourceLoc) -> Self {
        Self {
            start: loc,
            end: loc,
        }
    }

    /// Creates a range from the start of `left` to the end of `right`.
    #[must_use]
    pub const fn merge(left: SourceRange, right: SourceRange) -> Self {
        Self {
            start: left.start,
            end: right.end,
        }
    }

    /// Returns true if both ends are the same location.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if both ends are valid locations.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Nodes that can report where they start, for diagnostics.
///
/// Each declaration kind picks its own start: the `import` keyword, the
/// `var` / `func` / `typealias` keyword, or the name for elements and
/// references.
pub trait Located {
    /// Returns the location diagnostics should point at.
    fn loc_start(&self) -> SourceLoc;
}

impl Located for SourceLoc {
    fn loc_start(&self) -> SourceLoc {
        *self
    }
}

impl Located for SourceRange {
    fn loc_start(&self) -> SourceLoc {
        self.start
    }
}
