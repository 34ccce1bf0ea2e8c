//! Interned identifiers.
//!
//! An [`Identifier`] is an interned [`Symbol`] with its operator-ness cached,
//! so `is_operator` needs no trip through the identifier table. Identifiers
//! are handed out by [`AstContext::identifier`](crate::AstContext::identifier);
//! the empty identifier stands for "no name" (for example the name of a
//! destructured `var`).

use sable_mem::Symbol;

/// Bit that carries the operator flag in the opaque representation.
const OPERATOR_BIT: u64 = 1 << 32;

/// An interned name.
///
/// Two identifiers are equal exactly when they were interned from the same
/// text in the same context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier {
    symbol: Symbol,
    operator: bool,
}

impl Identifier {
    pub(crate) const fn new(symbol: Symbol, operator: bool) -> Self {
        Self { symbol, operator }
    }

    /// The empty identifier.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            symbol: Symbol::invalid(),
            operator: false,
        }
    }

    /// Returns true for the empty identifier.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.symbol.is_invalid()
    }

    /// Returns true if the identifier spells an operator, like `+` or `&&`.
    #[must_use]
    pub const fn is_operator(self) -> bool {
        self.operator
    }

    /// Returns the underlying interned symbol.
    #[must_use]
    pub const fn symbol(self) -> Symbol {
        self.symbol
    }

    /// Packs the identifier into a plain integer.
    ///
    /// ```
    /// use sable_ast::{AstContext, Identifier};
    ///
    /// let ctx = AstContext::new();
    /// let plus = ctx.identifier("+");
    /// assert_eq!(Identifier::from_opaque(plus.as_opaque()), plus);
    /// ```
    #[must_use]
    pub const fn as_opaque(self) -> u64 {
        let operator = if self.operator { OPERATOR_BIT } else { 0 };
        self.symbol.as_u32() as u64 | operator
    }

    /// Rebuilds an identifier from [`as_opaque`](Self::as_opaque) output.
    #[must_use]
    pub const fn from_opaque(raw: u64) -> Self {
        Self {
            symbol: Symbol::new(raw as u32),
            operator: raw & OPERATOR_BIT != 0,
        }
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self::empty()
    }
}

/// Returns true if `c` can start an operator identifier.
#[must_use]
pub const fn is_operator_start(c: char) -> bool {
    matches!(
        c,
        '/' | '=' | '-' | '+' | '*' | '%' | '<' | '>' | '!' | '&' | '|' | '^' | '~' | '.'
    )
}

pub(crate) fn is_operator_text(text: &str) -> bool {
    text.chars().next().is_some_and(is_operator_start)
}
