//! The identifier table: string interning with ID-based references.
//!
//! The interner maps each distinct string to a [`Symbol`] and back. String
//! data is copied once into the interner's own arena, so resolved `&str`s
//! stay valid for as long as the interner does.
//!
//! Interning takes `&self`. The table lives inside the AST context next to
//! the node arena and is shared by every pass of a compilation unit.
//!
//! # Examples
//!
//! ```
//! use sable_mem::StringInterner;
//!
//! let interner = StringInterner::new();
//!
//! let a = interner.intern("swift");
//! let b = interner.intern("swift");
//! let c = interner.intern("int");
//!
//! assert_eq!(a, b);
//! assert_ne!(a, c);
//! assert_eq!(interner.resolve(a), Some("swift"));
//! ```
//!
//! # Performance
//!
//! - **Known string**: one hash lookup
//! - **New string**: O(n) copy into the arena plus one hash insert
//! - **Resolve**: O(1) indexing

use std::cell::RefCell;

use crate::arena::LocalArena;
use crate::symbol::Symbol;

// hashbrown when the "symbols" feature is on, std otherwise
#[cfg(feature = "symbols")]
use hashbrown::HashMap;

#[cfg(not(feature = "symbols"))]
use std::collections::HashMap;

/// Declaration keywords, pre-interned in this order so their IDs are fixed.
const KEYWORDS: &[&str] = &[
    "import", "typealias", "var", "func", "oneof", "struct", "protocol",
    "extension", "return", "if", "else", "while",
];

/// Number of pre-interned keywords.
const KEYWORD_COUNT: u32 = KEYWORDS.len() as u32;

/// String interner with bidirectional mapping.
///
/// # Examples
///
/// ```
/// use sable_mem::StringInterner;
///
/// let interner = StringInterner::new();
///
/// let import = interner.intern("import");
/// assert_eq!(import.as_u32(), 0);
/// assert!(interner.is_keyword(import));
///
/// let name = interner.intern("a");
/// assert!(!interner.is_keyword(name));
/// ```
pub struct StringInterner {
    /// Symbol ID to string slice (slices point into `arena`)
    strings: RefCell<Vec<&'static str>>,

    /// String slice to Symbol ID
    symbols: RefCell<HashMap<&'static str, Symbol>>,

    /// Backing storage for string data. Declared last so it is dropped
    /// after the tables that point into it.
    arena: LocalArena,
}

impl StringInterner {
    /// Creates a new interner with the declaration keywords pre-interned.
    #[must_use]
    pub fn new() -> Self {
        Self::with_arena(LocalArena::new(8192))
    }

    /// Creates a new interner that stores its strings in `arena`.
    #[must_use]
    pub fn with_arena(arena: LocalArena) -> Self {
        let interner = Self {
            strings: RefCell::new(Vec::new()),
            symbols: RefCell::new(HashMap::new()),
            arena,
        };

        for keyword in KEYWORDS {
            interner.insert(keyword);
        }

        interner
    }

    /// Interns a string, returning its Symbol.
    ///
    /// Returns the existing Symbol if the string was interned before.
    pub fn intern(&self, s: &str) -> Symbol {
        if let Some(&sym) = self.symbols.borrow().get(s) {
            return sym;
        }

        self.insert(s)
    }

    fn insert(&self, s: &str) -> Symbol {
        // SAFETY: the string lives in `self.arena`, which never frees
        // individual allocations and outlives both tables. The 'static
        // lifetime never escapes: `resolve` shortens it to `&self`.
        let text: &'static str = unsafe { &*(self.arena.alloc_str(s) as *const str) };

        let mut strings = self.strings.borrow_mut();
        let id = match u32::try_from(strings.len()) {
            Ok(id) if id != u32::MAX => id,
            _ => panic!("string interner exhausted its symbol space"),
        };

        let sym = Symbol::new(id);
        strings.push(text);
        self.symbols.borrow_mut().insert(text, sym);

        sym
    }

    /// Looks a string up without interning it.
    #[must_use]
    pub fn get(&self, s: &str) -> Option<Symbol> {
        self.symbols.borrow().get(s).copied()
    }

    /// Resolves a Symbol to its string.
    ///
    /// Returns `None` for the invalid symbol and for IDs this interner never
    /// handed out.
    ///
    /// ```
    /// use sable_mem::{StringInterner, Symbol};
    ///
    /// let interner = StringInterner::new();
    /// assert_eq!(interner.resolve(Symbol::new(9999)), None);
    /// assert_eq!(interner.resolve(Symbol::invalid()), None);
    /// ```
    #[must_use]
    pub fn resolve(&self, sym: Symbol) -> Option<&str> {
        self.strings.borrow().get(sym.as_usize()).copied()
    }

    /// Returns the number of interned strings, keywords included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.borrow().len()
    }

    /// Returns true if no strings are interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.borrow().is_empty()
    }

    /// Returns true if `sym` is one of the pre-interned keywords.
    #[must_use]
    pub const fn is_keyword(&self, sym: Symbol) -> bool {
        sym.as_u32() < KEYWORD_COUNT
    }

    /// Returns the Symbol of a keyword, or `None` for any other string.
    #[must_use]
    pub fn keyword_symbol(&self, keyword: &str) -> Option<Symbol> {
        self.get(keyword).filter(|&sym| self.is_keyword(sym))
    }

    /// Returns the memory statistics of the string storage.
    #[must_use]
    pub fn arena_stats(&self) -> crate::arena::ArenaStats {
        self.arena.stats()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interner_creation() {
        let interner = StringInterner::new();
        assert_eq!(interner.len(), KEYWORDS.len());
        assert!(!interner.is_empty());
    }

    #[test]
    fn test_keyword_ids() {
        let interner = StringInterner::new();

        for (i, &keyword) in KEYWORDS.iter().enumerate() {
            let sym = interner.intern(keyword);
            assert_eq!(sym.as_u32(), i as u32);
            assert!(interner.is_keyword(sym));
            assert_eq!(interner.resolve(sym), Some(keyword));
        }
        assert_eq!(interner.len(), KEYWORDS.len());
    }

    #[test]
    fn test_identifier_interning() {
        let interner = StringInterner::new();

        let sym1 = interner.intern("a");
        let sym2 = interner.intern("a");
        let sym3 = interner.intern("b");

        assert_eq!(sym1, sym2);
        assert_ne!(sym1, sym3);
        assert!(sym1.as_u32() >= KEYWORD_COUNT);
        assert!(!interner.is_keyword(sym1));
    }

    #[test]
    fn test_resolved_strings_survive_growth() {
        let interner = StringInterner::new();

        let first = interner.intern("first_identifier");
        let resolved = interner.resolve(first).unwrap();

        for i in 0..5000 {
            interner.intern(&format!("filler_{i}"));
        }

        assert_eq!(resolved, "first_identifier");
        assert_eq!(interner.resolve(first), Some("first_identifier"));
        assert!(interner.arena_stats().chunk_count > 1);
    }

    #[test]
    fn test_get_does_not_intern() {
        let interner = StringInterner::new();
        let before = interner.len();

        assert_eq!(interner.get("unseen"), None);
        assert_eq!(interner.len(), before);

        let sym = interner.intern("unseen");
        assert_eq!(interner.get("unseen"), Some(sym));
    }

    #[test]
    fn test_keyword_symbol() {
        let interner = StringInterner::new();

        assert_eq!(interner.keyword_symbol("import").map(Symbol::as_u32), Some(0));
        assert_eq!(interner.keyword_symbol("func").map(Symbol::as_u32), Some(3));

        interner.intern("notAKeyword");
        assert!(interner.keyword_symbol("notAKeyword").is_none());
    }

    #[test]
    fn test_operator_and_unicode_strings() {
        let interner = StringInterner::new();

        for text in ["+", "&&", "..", "变量", "", "a.b"] {
            let sym = interner.intern(text);
            assert_eq!(interner.resolve(sym), Some(text));
        }
    }
}
