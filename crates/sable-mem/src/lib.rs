//! `sable` memory management infrastructure
//!
//! This crate provides the allocation substrate of the declaration AST:
//!
//! - **Arena allocation**: [`arena::LocalArena`], a bump allocator owned by
//!   one compilation unit
//! - **Arena factory**: per-unit arena creation (requires `arena-factory`)
//! - **String interning**: the identifier table behind AST identifiers
//!   (requires `string-interner`)

pub mod arena;
pub mod symbol;

#[cfg(feature = "arena-factory")]
pub mod factory;

#[cfg(feature = "string-interner")]
pub mod interner;

pub use arena::{ArenaStats, LocalArena};
pub use symbol::Symbol;

#[cfg(feature = "arena-factory")]
pub use factory::ArenaFactory;

#[cfg(feature = "string-interner")]
pub use interner::StringInterner;
