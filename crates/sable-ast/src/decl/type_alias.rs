//! `typealias` declarations.

use std::cell::Cell;
use std::ops::Deref;

use sable_log::trace;

use crate::context::DeclContext;
use crate::decl::DeclNode;
use crate::decl::attr::DeclAttributes;
use crate::decl::base::{NamedDecl, TypeSlot, TypeState};
use crate::error::DeclResult;
use crate::identifier::Identifier;
use crate::loc::{Located, SourceLoc};
use crate::types::Type;

/// `typealias Name : UnderlyingType`
///
/// The underlying type may be left unresolved by the parser and filled in
/// later. The alias's own sugared type is created on first request and
/// cached.
#[derive(Debug)]
pub struct TypeAliasDecl<'a> {
    named: NamedDecl<'a>,
    type_alias_loc: Cell<SourceLoc>,
    underlying: TypeSlot<'a>,
    alias_type: Cell<Option<Type<'a>>>,
}

impl<'a> TypeAliasDecl<'a> {
    /// Allocates a type alias in `context`'s arena.
    pub fn create(
        context: &'a DeclContext<'a>,
        type_alias_loc: SourceLoc,
        name: Identifier,
        underlying: Option<Type<'a>>,
        attrs: DeclAttributes,
    ) -> &'a TypeAliasDecl<'a> {
        let decl = context.ast_context().alloc(TypeAliasDecl {
            named: NamedDecl::new(Self::KIND, context, name, attrs),
            type_alias_loc: Cell::new(type_alias_loc),
            underlying: TypeSlot::new(underlying),
            alias_type: Cell::new(None),
        });

        trace!("created typealias decl at {type_alias_loc}");
        decl
    }

    /// Returns the location of the `typealias` keyword.
    #[must_use]
    pub fn type_alias_loc(&self) -> SourceLoc {
        self.type_alias_loc.get()
    }

    /// Updates the location of the `typealias` keyword.
    pub fn set_type_alias_loc(&self, loc: SourceLoc) {
        self.type_alias_loc.set(loc);
    }

    /// Returns true once the underlying type has been set.
    #[must_use]
    pub fn has_underlying_type(&self) -> bool {
        self.underlying.get().is_some()
    }

    /// Returns the underlying type.
    ///
    /// # Panics
    ///
    /// Panics if the underlying type is not resolved yet.
    #[must_use]
    pub fn underlying_type(&self) -> Type<'a> {
        match self.underlying.get() {
            Some(ty) => ty,
            None => panic!("underlying type of typealias read before resolution"),
        }
    }

    /// Returns the underlying type, or `None` if it is not resolved yet.
    #[must_use]
    pub fn underlying_type_if_resolved(&self) -> Option<Type<'a>> {
        self.underlying.get()
    }

    /// Returns the resolution state of the underlying type.
    #[must_use]
    pub fn underlying_type_state(&self) -> TypeState<'a> {
        self.underlying.state()
    }

    /// Resolves the underlying type.
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::TypeAlreadyResolved`](crate::DeclError::TypeAlreadyResolved)
    /// if it was already set.
    pub fn set_underlying_type(&self, ty: Type<'a>) -> DeclResult<()> {
        self.underlying.set(ty, Self::KIND)
    }

    /// Replaces a resolved underlying type, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::TypeNotResolved`](crate::DeclError::TypeNotResolved)
    /// if it was never set.
    pub fn overwrite_underlying_type(&self, ty: Type<'a>) -> DeclResult<Type<'a>> {
        self.underlying.overwrite(ty, Self::KIND)
    }

    /// Returns the sugared type that names this alias.
    ///
    /// Every call returns the same handle.
    pub fn alias_type(&'a self) -> Type<'a> {
        if let Some(ty) = self.alias_type.get() {
            return ty;
        }

        let ty = self.ast_context().name_alias_type(self);
        self.alias_type.set(Some(ty));
        ty
    }
}

impl<'a> Deref for TypeAliasDecl<'a> {
    type Target = NamedDecl<'a>;

    fn deref(&self) -> &NamedDecl<'a> {
        &self.named
    }
}

impl Located for TypeAliasDecl<'_> {
    fn loc_start(&self) -> SourceLoc {
        self.type_alias_loc.get()
    }
}
