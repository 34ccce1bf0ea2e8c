//! Declaration nodes.
//!
//! # Node families
//!
//! ```text
//! Decl
//! ├── ImportDecl
//! └── NamedDecl                 name + attributes
//!     ├── TypeAliasDecl
//!     └── ValueDecl             type + optional initializer
//!         ├── VarDecl
//!         ├── FuncDecl
//!         ├── OneOfElementDecl
//!         ├── ArgDecl
//!         └── ElementRefDecl
//! ```
//!
//! Concrete nodes are created through their `create` functions, which
//! allocate in the arena of the [`DeclContext`](crate::DeclContext) they are
//! given. A [`Decl`] is a copyable handle to any concrete node; it answers
//! the family queries and downcasts to concrete types.
//!
//! # Examples
//!
//! ```
//! use sable_ast::{AstContext, SourceLoc};
//! use sable_ast::decl::{Decl, DeclAttributes, DeclKind, FuncDecl, VarDecl};
//!
//! let ctx = AstContext::new();
//! let unit = ctx.create_translation_unit();
//! let var = VarDecl::create(unit, SourceLoc::new(0), ctx.identifier("x"), None, None, DeclAttributes::new());
//!
//! let decl = Decl::from(var);
//! assert_eq!(decl.kind(), DeclKind::Var);
//! assert!(decl.as_value().is_some());
//! assert!(decl.dyn_cast::<VarDecl>().is_some());
//! assert!(decl.dyn_cast::<FuncDecl>().is_none());
//! ```

mod attr;
mod base;
mod element_ref;
mod import;
mod kind;
mod type_alias;
mod value;
mod var_name;

use std::fmt;

pub use attr::{Associativity, DeclAttributes, InfixData};
pub use base::{DeclBase, NamedDecl, TypeState, ValueDecl};
pub use element_ref::{ElementRefDecl, PathLookup};
pub use import::{AccessPathElement, ImportDecl};
pub use kind::{DeclFamily, DeclKind};
pub use type_alias::TypeAliasDecl;
pub use value::{ArgDecl, FuncDecl, OneOfElementDecl, VarDecl, VarName};
pub use var_name::DeclVarName;

use crate::context::{AstContext, DeclContext};
use crate::loc::{Located, SourceLoc};

/// A concrete declaration type.
pub trait DeclNode<'a>: Located + Sized + 'a {
    /// The kind tag of every node of this type.
    const KIND: DeclKind;

    /// Wraps the node in a [`Decl`] handle.
    fn as_decl(&'a self) -> Decl<'a>;

    /// Downcasts a handle, `None` if it holds another kind.
    fn from_decl(decl: Decl<'a>) -> Option<&'a Self>;
}

/// A handle to any declaration.
///
/// Handles compare by identity.
#[derive(Clone, Copy)]
pub enum Decl<'a> {
    /// `import`
    Import(&'a ImportDecl<'a>),
    /// `typealias`
    TypeAlias(&'a TypeAliasDecl<'a>),
    /// `var`
    Var(&'a VarDecl<'a>),
    /// `func`
    Func(&'a FuncDecl<'a>),
    /// oneof element
    OneOfElement(&'a OneOfElementDecl<'a>),
    /// function argument
    Arg(&'a ArgDecl<'a>),
    /// destructuring leaf
    ElementRef(&'a ElementRefDecl<'a>),
}

macro_rules! impl_decl_node {
    ($($node:ident => $variant:ident),* $(,)?) => {
        $(
            impl<'a> DeclNode<'a> for $node<'a> {
                const KIND: DeclKind = DeclKind::$variant;

                fn as_decl(&'a self) -> Decl<'a> {
                    Decl::$variant(self)
                }

                fn from_decl(decl: Decl<'a>) -> Option<&'a Self> {
                    match decl {
                        Decl::$variant(node) => Some(node),
                        _ => None,
                    }
                }
            }

            impl<'a> From<&'a $node<'a>> for Decl<'a> {
                fn from(node: &'a $node<'a>) -> Self {
                    Decl::$variant(node)
                }
            }
        )*
    };
}

impl_decl_node! {
    ImportDecl => Import,
    TypeAliasDecl => TypeAlias,
    VarDecl => Var,
    FuncDecl => Func,
    OneOfElementDecl => OneOfElement,
    ArgDecl => Arg,
    ElementRefDecl => ElementRef,
}

impl<'a> Decl<'a> {
    fn base(self) -> &'a DeclBase<'a> {
        match self {
            Decl::Import(d) => d.as_base(),
            Decl::TypeAlias(d) => d.as_base(),
            Decl::Var(d) => d.as_base(),
            Decl::Func(d) => d.as_base(),
            Decl::OneOfElement(d) => d.as_base(),
            Decl::Arg(d) => d.as_base(),
            Decl::ElementRef(d) => d.as_base(),
        }
    }

    /// Returns the concrete kind.
    #[must_use]
    pub fn kind(self) -> DeclKind {
        self.base().kind()
    }

    /// Returns the owning scope.
    #[must_use]
    pub fn decl_context(self) -> &'a DeclContext<'a> {
        self.base().decl_context()
    }

    /// Moves the declaration to another scope of the same AST context.
    ///
    /// # Panics
    ///
    /// Panics if `context` belongs to a different [`AstContext`].
    pub fn set_decl_context(self, context: &'a DeclContext<'a>) {
        self.base().set_decl_context(context);
    }

    /// Returns the AST context that allocated the declaration.
    #[must_use]
    pub fn ast_context(self) -> &'a AstContext {
        self.base().ast_context()
    }

    /// Returns true if the kind is in `family`.
    #[must_use]
    pub fn is(self, family: DeclFamily) -> bool {
        self.kind().is_in(family)
    }

    /// Returns the named-declaration view, `None` for imports.
    #[must_use]
    pub fn as_named(self) -> Option<&'a NamedDecl<'a>> {
        match self {
            Decl::Import(_) => None,
            Decl::TypeAlias(d) => Some(d.as_named()),
            Decl::Var(d) => Some(d.as_named()),
            Decl::Func(d) => Some(d.as_named()),
            Decl::OneOfElement(d) => Some(d.as_named()),
            Decl::Arg(d) => Some(d.as_named()),
            Decl::ElementRef(d) => Some(d.as_named()),
        }
    }

    /// Returns the value-declaration view, `None` for imports and aliases.
    #[must_use]
    pub fn as_value(self) -> Option<&'a ValueDecl<'a>> {
        match self {
            Decl::Import(_) | Decl::TypeAlias(_) => None,
            Decl::Var(d) => Some(d.as_value()),
            Decl::Func(d) => Some(d.as_value()),
            Decl::OneOfElement(d) => Some(d.as_value()),
            Decl::Arg(d) => Some(d.as_value()),
            Decl::ElementRef(d) => Some(d.as_value()),
        }
    }

    /// Returns true if the handle holds a `T`.
    #[must_use]
    pub fn isa<T: DeclNode<'a>>(self) -> bool {
        self.kind() == T::KIND
    }

    /// Downcasts to `T`, `None` if the handle holds another kind.
    #[must_use]
    pub fn dyn_cast<T: DeclNode<'a>>(self) -> Option<&'a T> {
        T::from_decl(self)
    }

    /// Downcasts to `T`.
    ///
    /// # Panics
    ///
    /// Panics if the handle holds another kind.
    #[must_use]
    pub fn cast<T: DeclNode<'a>>(self) -> &'a T {
        match T::from_decl(self) {
            Some(node) => node,
            None => panic!("cast of {} declaration to {}", self.kind(), T::KIND),
        }
    }
}

impl Located for Decl<'_> {
    fn loc_start(&self) -> SourceLoc {
        match self {
            Decl::Import(d) => d.loc_start(),
            Decl::TypeAlias(d) => d.loc_start(),
            Decl::Var(d) => d.loc_start(),
            Decl::Func(d) => d.loc_start(),
            Decl::OneOfElement(d) => d.loc_start(),
            Decl::Arg(d) => d.loc_start(),
            Decl::ElementRef(d) => d.loc_start(),
        }
    }
}

impl PartialEq for Decl<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.base(), other.base())
    }
}

impl Eq for Decl<'_> {}

impl fmt::Debug for Decl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Decl");
        s.field("kind", &self.kind());
        if let Some(named) = self.as_named() {
            s.field("name", &named.name());
        }
        s.field("loc", &self.loc_start()).finish()
    }
}
