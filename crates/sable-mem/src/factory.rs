//! Factory for per-compilation-unit arenas.
//!
//! Each compilation unit owns exactly one arena, created fresh when the unit
//! starts and dropped when the unit is done. `ArenaFactory` carries the
//! configured chunk size so drivers can hand out arenas without repeating it.
//!
//! There is no pooling or reuse: reuse would let references from one unit
//! survive into the next.
//!
//! # Examples
//!
//! ```
//! use sable_mem::factory::ArenaFactory;
//!
//! let factory = ArenaFactory::new(64 * 1024);
//!
//! let unit_a = factory.create_arena();
//! let unit_b = factory.create_arena();
//!
//! let a = unit_a.alloc(1u32);
//! let b = unit_b.alloc(2u32);
//! assert_ne!(a as *const u32, b as *const u32);
//! ```

use crate::arena::{DEFAULT_CHUNK_SIZE, LocalArena};

/// Creates one [`LocalArena`] per compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaFactory {
    /// Initial chunk size of arenas created by this factory.
    chunk_size: usize,
}

impl ArenaFactory {
    /// Creates a factory producing arenas with `chunk_size` byte chunks.
    ///
    /// The arena raises the size to at least 8 KiB and rounds it up to a
    /// power of two.
    #[must_use]
    pub const fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    /// Returns the configured chunk size.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Creates a fresh arena.
    #[must_use]
    pub fn create_arena(&self) -> LocalArena {
        LocalArena::new(self.chunk_size)
    }
}

impl Default for ArenaFactory {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}
