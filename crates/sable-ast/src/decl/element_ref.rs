//! References to the leaves of a destructuring `var`.
//!
//! `var (a, (b, c)) = f()` declares one [`VarDecl`] with an empty name plus
//! one [`ElementRefDecl`] per leaf. Each reference names its leaf and records
//! the index path from the root of the name tree: `a` is `[0]`, `c` is
//! `[1, 1]`.

use std::ops::Deref;

use sable_log::trace;

use crate::context::DeclContext;
use crate::decl::DeclNode;
use crate::decl::attr::DeclAttributes;
use crate::decl::base::ValueDecl;
use crate::decl::value::VarDecl;
use crate::identifier::Identifier;
use crate::loc::{Located, SourceLoc};
use crate::types::{Type, TypeBase};

/// Outcome of walking an access path into a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathLookup<'a> {
    /// The path leads to this type
    Resolved(Type<'a>),
    /// The path indexes into something that is not a tuple, or past the end
    /// of one
    Invalid,
    /// The path reaches a type that is not known yet
    Dependent,
}

impl<'a> PathLookup<'a> {
    /// Returns the type for [`PathLookup::Resolved`].
    #[must_use]
    pub const fn resolved(self) -> Option<Type<'a>> {
        match self {
            PathLookup::Resolved(ty) => Some(ty),
            PathLookup::Invalid | PathLookup::Dependent => None,
        }
    }
}

/// A named leaf of a destructuring `var`.
#[derive(Debug)]
pub struct ElementRefDecl<'a> {
    value: ValueDecl<'a>,
    var: &'a VarDecl<'a>,
    name_loc: SourceLoc,
    access_path: &'a [u32],
}

impl<'a> ElementRefDecl<'a> {
    /// Allocates a reference to the leaf of `var` at `access_path`.
    ///
    /// The path is copied into the same arena block as the node.
    ///
    /// # Panics
    ///
    /// Panics if `var` belongs to another AST context.
    pub fn create(
        context: &'a DeclContext<'a>,
        var: &'a VarDecl<'a>,
        name_loc: SourceLoc,
        name: Identifier,
        access_path: &[u32],
        ty: Option<Type<'a>>,
    ) -> &'a ElementRefDecl<'a> {
        assert!(
            std::ptr::eq(var.ast_context(), context.ast_context()),
            "element reference to a var of another AST context"
        );

        let decl = context
            .ast_context()
            .arena()
            .alloc_with_trailing(access_path, |access_path| ElementRefDecl {
                value: ValueDecl::new(Self::KIND, context, name, ty, None, DeclAttributes::new()),
                var,
                name_loc,
                access_path,
            });

        trace!("created element reference decl at {name_loc} (depth {})", access_path.len());
        decl
    }

    /// Creates one reference per leaf of a destructuring `var`, in source
    /// order.
    ///
    /// Leaves whose type can already be computed from the `var`'s type get
    /// it; the others are left unresolved. A `var` with a simple name has no
    /// leaves to reference.
    pub fn create_for_leaves(
        context: &'a DeclContext<'a>,
        var: &'a VarDecl<'a>,
    ) -> Vec<&'a ElementRefDecl<'a>> {
        let Some(name) = var.nested_name() else {
            return Vec::new();
        };

        let mut refs = Vec::new();
        name.visit_leaves(&mut |path, leaf, loc| {
            let ty = var
                .type_if_resolved()
                .and_then(|ty| Self::type_for_path(ty, path).resolved());
            refs.push(Self::create(context, var, loc, leaf, path, ty));
        });
        refs
    }

    /// Returns the destructuring `var` this leaf belongs to.
    #[must_use]
    pub const fn var_decl(&self) -> &'a VarDecl<'a> {
        self.var
    }

    /// Returns the location of the leaf name.
    #[must_use]
    pub const fn name_loc(&self) -> SourceLoc {
        self.name_loc
    }

    /// Returns the index path from the root of the name tree.
    #[must_use]
    pub const fn access_path(&self) -> &'a [u32] {
        self.access_path
    }

    /// Walks this leaf's path into the `var`'s current type.
    ///
    /// A `var` without a type yet yields [`PathLookup::Dependent`].
    #[must_use]
    pub fn resolved_type(&self) -> PathLookup<'a> {
        match self.var.type_if_resolved() {
            Some(ty) => Self::type_for_path(ty, self.access_path),
            None => PathLookup::Dependent,
        }
    }

    /// Walks `path` into `ty`, one tuple element per index.
    ///
    /// Aliases are looked through at every step. An empty path yields `ty`
    /// itself, sugar included. Reaching the dependent type, or an alias with
    /// no underlying type yet, yields [`PathLookup::Dependent`] even if a
    /// later index would be out of range. Indexing into anything other than
    /// a tuple, or past a tuple's last element, yields
    /// [`PathLookup::Invalid`].
    ///
    /// ```
    /// use sable_ast::{AstContext, BuiltinKind, TupleElement};
    /// use sable_ast::decl::{ElementRefDecl, PathLookup};
    ///
    /// let ctx = AstContext::new();
    /// let int = ctx.builtin_type(BuiltinKind::Int);
    /// let pair = ctx.tuple_type(&[TupleElement::unnamed(int), TupleElement::unnamed(int)]);
    ///
    /// assert_eq!(ElementRefDecl::type_for_path(pair, &[1]), PathLookup::Resolved(int));
    /// assert_eq!(ElementRefDecl::type_for_path(pair, &[2]), PathLookup::Invalid);
    /// assert_eq!(ElementRefDecl::type_for_path(pair, &[]), PathLookup::Resolved(pair));
    /// ```
    #[must_use]
    pub fn type_for_path(ty: Type<'a>, path: &[u32]) -> PathLookup<'a> {
        let mut current = ty;

        for &index in path {
            let Some(desugared) = current.desugared() else {
                return PathLookup::Dependent;
            };

            match desugared.base() {
                TypeBase::Dependent => return PathLookup::Dependent,
                TypeBase::Tuple(elements) => match elements.get(index as usize) {
                    Some(element) => current = element.ty,
                    None => return PathLookup::Invalid,
                },
                _ => return PathLookup::Invalid,
            }
        }

        if !path.is_empty() && current.is_dependent() {
            return PathLookup::Dependent;
        }
        PathLookup::Resolved(current)
    }
}

impl<'a> Deref for ElementRefDecl<'a> {
    type Target = ValueDecl<'a>;

    fn deref(&self) -> &ValueDecl<'a> {
        &self.value
    }
}

impl Located for ElementRefDecl<'_> {
    fn loc_start(&self) -> SourceLoc {
        self.name_loc
    }
}
