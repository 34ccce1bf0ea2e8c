//! Bump arena for a single compilation unit.
//!
//! Every declaration node, name tree, binding path and interned string of a
//! compilation unit lives in one [`LocalArena`]. The arena provides:
//!
//! - **Fast allocation** through a bump pointer
//! - **Stable addresses** (chunks never move or reallocate)
//! - **Shared allocation**: `alloc` takes `&self`, so nodes already handed
//!   out can be borrowed while more nodes are allocated
//! - **Bulk teardown**: there is no per-object free, dropping the arena
//!   releases every chunk at once
//!
//! Values placed in the arena are never dropped, so only types without drop
//! glue may be allocated. This is checked at compile time.
//!
//! # Examples
//!
//! ```
//! use sable_mem::arena::LocalArena;
//!
//! let arena = LocalArena::new(8192);
//!
//! let a = arena.alloc(42u32);
//! let b = arena.alloc_slice_copy(&[1u16, 2, 3]);
//! let s = arena.alloc_str("import");
//!
//! assert_eq!(*a, 42);
//! assert_eq!(b, &[1, 2, 3]);
//! assert_eq!(s, "import");
//! ```
//!
//! ## Header plus trailing array
//!
//! Variable-arity nodes are laid out as a fixed header followed by their
//! elements, in one allocation:
//!
//! ```
//! use sable_mem::arena::LocalArena;
//!
//! struct Path<'a> {
//!     segments: &'a [u32],
//! }
//!
//! let arena = LocalArena::new(8192);
//! let path = arena.alloc_with_trailing(&[7, 8, 9], |segments| Path { segments });
//!
//! assert_eq!(path.segments, &[7, 8, 9]);
//! assert_eq!(arena.stats().allocation_count, 1);
//! ```

use std::alloc::{self, Layout};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;

use sable_log::trace;

/// Error type for chunk allocation failures.
///
/// Returned when a chunk size cannot be described by a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaAllocError;

impl fmt::Display for ArenaAllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arena allocation failed: invalid chunk layout")
    }
}

impl std::error::Error for ArenaAllocError {}

/// Minimum alignment of every arena allocation (8 bytes).
const DEFAULT_ALIGNMENT: usize = 8;

/// Alignment of chunk memory itself.
const CHUNK_ALIGNMENT: usize = 16;

/// Minimum chunk size (8 KiB).
const MIN_CHUNK_SIZE: usize = 8192;

/// Maximum size a chunk grows to by doubling (1 MiB).
///
/// Larger single requests still get a dedicated chunk of their own size.
const MAX_CHUNK_SIZE: usize = 1024 * 1024;

/// Default initial chunk size for a compilation unit arena.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Arena allocation statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArenaStats {
    /// Bytes requested by callers, excluding alignment padding.
    pub total_allocated: usize,
    /// Number of allocation calls served.
    pub allocation_count: usize,
    /// Number of chunks in the arena.
    pub chunk_count: usize,
    /// Total capacity of all chunks in bytes.
    pub total_capacity: usize,
}

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("arena capacity overflow")
}

/// A fixed-size memory chunk with a non-atomic bump pointer.
///
/// # Safety
///
/// - Chunk memory is never deallocated until the `LocalChunk` is dropped
/// - All allocations are aligned to the requested alignment
/// - The bump pointer only advances and never passes `end`
struct LocalChunk {
    /// Start of the chunk's memory region.
    start: NonNull<u8>,
    /// Current bump pointer. Kept as a raw pointer to preserve provenance.
    ptr: Cell<*mut u8>,
    /// Address one past the end of the region.
    end: usize,
    /// Total capacity of the chunk in bytes.
    capacity: usize,
}

impl LocalChunk {
    fn new(size: usize) -> Result<Self, ArenaAllocError> {
        let size = size.max(MIN_CHUNK_SIZE);
        let layout = Layout::from_size_align(size, CHUNK_ALIGNMENT)
            .map_err(|_| ArenaAllocError)?;

        // SAFETY: `layout` has a non-zero size (at least MIN_CHUNK_SIZE).
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let Some(start) = NonNull::new(raw) else {
            alloc::handle_alloc_error(layout);
        };

        Ok(LocalChunk {
            start,
            ptr: Cell::new(raw),
            end: raw.addr() + size,
            capacity: size,
        })
    }

    /// Bumps `size` bytes at `align` out of this chunk, if they fit.
    #[inline(always)]
    fn alloc(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        let current = self.ptr.get();

        let aligned_start = current.addr().checked_add(align - 1)? & !(align - 1);
        let new_addr = aligned_start.checked_add(size)?;
        if new_addr > self.end {
            return None;
        }

        // with_addr keeps the provenance of the chunk allocation; both
        // addresses are inside the region (checked above).
        self.ptr.set(current.with_addr(new_addr));
        NonNull::new(current.with_addr(aligned_start))
    }

    fn contains(&self, addr: usize) -> bool {
        (self.start.as_ptr().addr()..self.end).contains(&addr)
    }
}

impl Drop for LocalChunk {
    fn drop(&mut self) {
        // SAFETY: same size and alignment as the successful allocation in new().
        unsafe {
            let layout = Layout::from_size_align_unchecked(self.capacity, CHUNK_ALIGNMENT);
            alloc::dealloc(self.start.as_ptr(), layout);
        }
    }
}

/// Single-threaded bump arena owned by one compilation unit.
///
/// All allocation methods take `&self` and hand back references tied to the
/// arena borrow, which is what lets AST nodes point at each other with plain
/// `&'a` references. Nothing is freed until the arena is dropped.
///
/// # Examples
///
/// ```
/// use sable_mem::arena::LocalArena;
///
/// let arena = LocalArena::new(8192);
/// let first = arena.alloc(1u64);
/// let second = arena.alloc(2u64);
///
/// // Both references are usable at the same time.
/// assert_eq!(*first + *second, 3);
/// ```
pub struct LocalArena {
    /// Chunks in allocation order; the last one is current.
    chunks: RefCell<Vec<LocalChunk>>,
    /// Minimum alignment for all allocations.
    alignment: usize,
    total_allocated: Cell<usize>,
    allocation_count: Cell<usize>,
}

impl LocalArena {
    /// Creates a new arena with the given initial chunk size.
    ///
    /// The size is raised to at least 8 KiB and rounded up to a power of two.
    #[must_use]
    pub fn new(initial_size: usize) -> Self {
        let size = initial_size
            .max(MIN_CHUNK_SIZE)
            .checked_next_power_of_two()
            .unwrap_or_else(|| capacity_overflow());

        let first_chunk = LocalChunk::new(size).unwrap_or_else(|_| capacity_overflow());

        LocalArena {
            chunks: RefCell::new(vec![first_chunk]),
            alignment: DEFAULT_ALIGNMENT,
            total_allocated: Cell::new(0),
            allocation_count: Cell::new(0),
        }
    }

    /// Moves `value` into the arena.
    ///
    /// `T` must not need `Drop`; the arena never runs destructors.
    #[inline(always)]
    #[allow(clippy::mut_from_ref)]
    pub fn alloc<T>(&self, value: T) -> &mut T {
        const { assert!(!mem::needs_drop::<T>(), "arena values are never dropped") };

        let ptr = self.alloc_layout(Layout::new::<T>()).cast::<T>();

        // SAFETY: `ptr` is fresh, properly aligned and sized for T, and lives
        // as long as `self`.
        unsafe {
            ptr.as_ptr().write(value);
            &mut *ptr.as_ptr()
        }
    }

    /// Copies `src` into the arena.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_slice_copy<T: Copy>(&self, src: &[T]) -> &mut [T] {
        let ptr = self.alloc_layout(Layout::for_value(src)).cast::<T>();

        // SAFETY: the destination is fresh arena memory sized and aligned for
        // `src.len()` elements; the regions cannot overlap.
        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), ptr.as_ptr(), src.len());
            slice::from_raw_parts_mut(ptr.as_ptr(), src.len())
        }
    }

    /// Allocates a header and its trailing elements in a single block.
    ///
    /// The block is laid out as `H` followed by `trailing.len()` elements of
    /// `E` (via [`Layout::extend`]). The elements are copied in first and
    /// `build` receives the arena copy so the header can refer to it.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_with_trailing<'s, H, E: Copy + 's>(
        &'s self,
        trailing: &[E],
        build: impl FnOnce(&'s [E]) -> H,
    ) -> &'s mut H {
        const { assert!(!mem::needs_drop::<H>(), "arena values are never dropped") };

        let (layout, offset) = Layout::new::<H>()
            .extend(Layout::for_value(trailing))
            .unwrap_or_else(|_| capacity_overflow());
        let base = self.alloc_layout(layout.pad_to_align());

        // SAFETY: `offset` is inside the block computed by `extend`, which is
        // aligned for `E` at that offset and has room for every element.
        let tail: &'s [E] = unsafe {
            let tail = base.as_ptr().add(offset).cast::<E>();
            ptr::copy_nonoverlapping(trailing.as_ptr(), tail, trailing.len());
            slice::from_raw_parts(tail, trailing.len())
        };

        let header = build(tail);

        // SAFETY: the block starts with room for an aligned `H`.
        unsafe {
            let ptr = base.cast::<H>().as_ptr();
            ptr.write(header);
            &mut *ptr
        }
    }

    /// Copies a string into the arena.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_str(&self, s: &str) -> &mut str {
        let bytes = self.alloc_slice_copy(s.as_bytes());

        // SAFETY: the bytes were copied verbatim from a valid `&str`.
        unsafe { std::str::from_utf8_unchecked_mut(bytes) }
    }

    /// Allocates raw memory described by `layout`.
    ///
    /// The memory is zero-initialised the first time it is handed out.
    pub fn alloc_layout(&self, layout: Layout) -> NonNull<u8> {
        let size = layout.size();
        let align = layout.align().max(self.alignment);

        let bumped = self
            .chunks
            .borrow()
            .last()
            .and_then(|chunk| chunk.alloc(size, align));

        let ptr = match bumped {
            Some(ptr) => ptr,
            None => self.grow(size, align),
        };

        self.total_allocated.set(self.total_allocated.get() + size);
        self.allocation_count.set(self.allocation_count.get() + 1);
        ptr
    }

    /// Adds a chunk big enough for the request and serves it from there.
    #[cold]
    fn grow(&self, size: usize, align: usize) -> NonNull<u8> {
        let mut chunks = self.chunks.borrow_mut();

        let needed = size
            .checked_add(align)
            .unwrap_or_else(|| capacity_overflow());
        let last_size = chunks.last().map_or(MIN_CHUNK_SIZE, |c| c.capacity);
        let new_size = last_size.saturating_mul(2).min(MAX_CHUNK_SIZE).max(needed);

        let chunk = LocalChunk::new(new_size).unwrap_or_else(|_| capacity_overflow());
        let Some(ptr) = chunk.alloc(size, align) else {
            capacity_overflow();
        };

        trace!(
            "arena grew to {} chunks (new chunk {} bytes for a {} byte request)",
            chunks.len() + 1,
            chunk.capacity,
            size
        );

        chunks.push(chunk);
        ptr
    }

    /// Returns true if `value` lives in memory handed out by this arena.
    #[must_use]
    pub fn contains<T: ?Sized>(&self, value: &T) -> bool {
        let addr = ptr::from_ref(value).addr();
        self.chunks.borrow().iter().any(|chunk| chunk.contains(addr))
    }

    /// Returns allocation statistics for this arena.
    #[must_use]
    pub fn stats(&self) -> ArenaStats {
        let chunks = self.chunks.borrow();
        ArenaStats {
            total_allocated: self.total_allocated.get(),
            allocation_count: self.allocation_count.get(),
            chunk_count: chunks.len(),
            total_capacity: chunks.iter().map(|c| c.capacity).sum(),
        }
    }
}

impl Default for LocalArena {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl fmt::Debug for LocalArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalArena")
            .field("stats", &self.stats())
            .finish()
    }
}
