//! Declaration attributes.
//!
//! Attributes are written in brackets before a declaration, for example
//! `[infix_left=190] func + ...`. Only the infix attribute exists today.

use crate::loc::SourceRange;

/// How an infix operator groups with operators of equal precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    /// `a op b op c` is an error
    None,
    /// `(a op b) op c`
    Left,
    /// `a op (b op c)`
    Right,
}

/// Precedence and associativity of an infix operator.
///
/// The default value is the *invalid* marker, meaning "not an infix
/// operator"; its precedence and associativity must not be read.
///
/// ```
/// use sable_ast::decl::{Associativity, InfixData};
///
/// let plus = InfixData::new(190, Associativity::Left);
/// assert!(plus.is_valid());
/// assert!(plus.is_left_associative());
/// assert_eq!(plus.precedence(), 190);
///
/// assert!(!InfixData::invalid().is_valid());
/// assert_ne!(plus, InfixData::invalid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InfixData {
    precedence: u8,
    associativity: Option<Associativity>,
}

impl InfixData {
    /// Creates infix data for an operator.
    #[must_use]
    pub const fn new(precedence: u8, associativity: Associativity) -> Self {
        Self {
            precedence,
            associativity: Some(associativity),
        }
    }

    /// The "not infix" marker.
    #[must_use]
    pub const fn invalid() -> Self {
        Self {
            precedence: 0,
            associativity: None,
        }
    }

    /// Returns true unless this is the "not infix" marker.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.associativity.is_some()
    }

    /// Returns the associativity, or `None` for the invalid marker.
    #[must_use]
    pub const fn try_associativity(self) -> Option<Associativity> {
        self.associativity
    }

    /// Returns the associativity.
    ///
    /// # Panics
    ///
    /// Panics on the invalid marker.
    #[must_use]
    pub const fn associativity(self) -> Associativity {
        match self.associativity {
            Some(assoc) => assoc,
            None => panic!("associativity of invalid infix data"),
        }
    }

    /// Returns the precedence.
    ///
    /// # Panics
    ///
    /// Panics on the invalid marker.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        assert!(self.is_valid(), "precedence of invalid infix data");
        self.precedence
    }

    /// Returns true for left-associative operators.
    #[must_use]
    pub const fn is_left_associative(self) -> bool {
        matches!(self.associativity(), Associativity::Left)
    }

    /// Returns true for right-associative operators.
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self.associativity(), Associativity::Right)
    }

    /// Returns true for non-associative operators.
    #[must_use]
    pub const fn is_non_associative(self) -> bool {
        matches!(self.associativity(), Associativity::None)
    }
}

/// The attributes written on a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeclAttributes {
    /// Location of the `[` ... `]` attribute list, if one was written
    pub bracket_range: Option<SourceRange>,
    /// Infix attribute, or the invalid marker
    pub infix: InfixData,
}

impl DeclAttributes {
    /// Attributes with nothing set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bracket_range: None,
            infix: InfixData::invalid(),
        }
    }

    /// Records where the attribute list was written.
    #[must_use]
    pub const fn with_brackets(mut self, range: SourceRange) -> Self {
        self.bracket_range = Some(range);
        self
    }

    /// Sets the infix attribute.
    #[must_use]
    pub const fn with_infix(mut self, infix: InfixData) -> Self {
        self.infix = infix;
        self
    }

    /// Returns true if the infix attribute is set.
    #[must_use]
    pub const fn is_infix(&self) -> bool {
        self.infix.is_valid()
    }

    /// Returns the infix attribute, possibly the invalid marker.
    #[must_use]
    pub const fn infix_data(&self) -> InfixData {
        self.infix
    }

    /// Returns true if no attribute is set. Brackets alone do not count.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.is_infix()
    }
}
