//! The declaration kind taxonomy.
//!
//! Every declaration carries a [`DeclKind`] tag. The abstract families
//! (named and value declarations) are contiguous, inclusive ranges of the
//! tag order, so "is this a value declaration" is two comparisons. The
//! ranges are listed once, in [`DeclFamily::range`], and checked against the
//! tag order at compile time.

use std::fmt;

/// Tag of a concrete declaration kind.
///
/// Declaration order matters: [`DeclFamily`] ranges are defined over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum DeclKind {
    /// `import a.b.c`
    Import,
    /// `typealias Name : Type`
    TypeAlias,
    /// `var name : Type = init`
    Var,
    /// `func name : Type = body`
    Func,
    /// An element of a `oneof`
    OneOfElement,
    /// A function argument
    Arg,
    /// A named leaf of a destructuring `var`
    ElementRef,
}

impl DeclKind {
    /// Every kind, in tag order.
    pub const ALL: [DeclKind; 7] = [
        DeclKind::Import,
        DeclKind::TypeAlias,
        DeclKind::Var,
        DeclKind::Func,
        DeclKind::OneOfElement,
        DeclKind::Arg,
        DeclKind::ElementRef,
    ];

    /// Returns the tag value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns true if the kind falls in `family`'s range.
    #[must_use]
    pub const fn is_in(self, family: DeclFamily) -> bool {
        let (first, last) = family.range();
        self as u8 >= first as u8 && self as u8 <= last as u8
    }

    /// Returns true for kinds that carry a name and attributes.
    #[must_use]
    pub const fn is_named(self) -> bool {
        self.is_in(DeclFamily::Named)
    }

    /// Returns true for kinds that carry a type and optional initializer.
    #[must_use]
    pub const fn is_value(self) -> bool {
        self.is_in(DeclFamily::Value)
    }

    /// Returns the source-level name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DeclKind::Import => "import",
            DeclKind::TypeAlias => "typealias",
            DeclKind::Var => "var",
            DeclKind::Func => "func",
            DeclKind::OneOfElement => "oneof element",
            DeclKind::Arg => "argument",
            DeclKind::ElementRef => "element reference",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Abstract declaration families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclFamily {
    /// Declarations with a name and attributes
    Named,
    /// Named declarations with a type and optional initializer
    Value,
}

impl DeclFamily {
    /// Every family.
    pub const ALL: [DeclFamily; 2] = [DeclFamily::Named, DeclFamily::Value];

    /// Returns the inclusive `(first, last)` kind range of the family.
    #[must_use]
    pub const fn range(self) -> (DeclKind, DeclKind) {
        match self {
            DeclFamily::Named => (DeclKind::TypeAlias, DeclKind::ElementRef),
            DeclFamily::Value => (DeclKind::Var, DeclKind::ElementRef),
        }
    }
}

// Value declarations are named declarations.
const _: () = {
    let (named_first, named_last) = DeclFamily::Named.range();
    let (value_first, value_last) = DeclFamily::Value.range();
    assert!(named_first as u8 <= named_last as u8);
    assert!(value_first as u8 <= value_last as u8);
    assert!(named_first as u8 <= value_first as u8);
    assert!(value_last as u8 <= named_last as u8);
    assert!(DeclKind::ALL.len() == DeclKind::ElementRef as usize + 1);
};
