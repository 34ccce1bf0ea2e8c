//! State shared by the declaration families.
//!
//! Concrete declarations embed their family state by composition and deref
//! to it: a `VarDecl` derefs to [`ValueDecl`], which derefs to [`NamedDecl`],
//! which derefs to [`DeclBase`]. Accessors of every family are therefore
//! callable on any concrete node.

use std::cell::Cell;
use std::ops::Deref;

use sable_log::{debug, warn};

use crate::context::{AstContext, DeclContext};
use crate::decl::attr::DeclAttributes;
use crate::decl::kind::DeclKind;
use crate::error::{DeclError, DeclResult};
use crate::expr::Expr;
use crate::identifier::Identifier;
use crate::types::Type;

/// State every declaration has: its kind and its owning scope.
pub struct DeclBase<'a> {
    kind: DeclKind,
    context: Cell<&'a DeclContext<'a>>,
}

impl<'a> DeclBase<'a> {
    pub(crate) const fn new(kind: DeclKind, context: &'a DeclContext<'a>) -> Self {
        Self {
            kind,
            context: Cell::new(context),
        }
    }

    pub(crate) const fn as_base(&self) -> &Self {
        self
    }

    /// Returns the concrete kind.
    #[must_use]
    pub const fn kind(&self) -> DeclKind {
        self.kind
    }

    /// Returns the scope that owns this declaration.
    #[must_use]
    pub fn decl_context(&self) -> &'a DeclContext<'a> {
        self.context.get()
    }

    /// Moves the declaration to another scope of the same AST context.
    ///
    /// # Panics
    ///
    /// Panics if `context` belongs to a different [`AstContext`].
    pub fn set_decl_context(&self, context: &'a DeclContext<'a>) {
        assert!(
            std::ptr::eq(context.ast_context(), self.ast_context()),
            "declaration moved to a scope of another AST context"
        );
        self.context.set(context);
    }

    /// Returns the AST context that allocated this declaration.
    #[must_use]
    pub fn ast_context(&self) -> &'a AstContext {
        self.decl_context().ast_context()
    }
}

impl std::fmt::Debug for DeclBase<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeclBase")
            .field("kind", &self.kind)
            .field("context", &self.decl_context().kind())
            .finish()
    }
}

/// State of a declaration that introduces a name.
#[derive(Debug)]
pub struct NamedDecl<'a> {
    base: DeclBase<'a>,
    name: Identifier,
    attrs: DeclAttributes,
}

impl<'a> NamedDecl<'a> {
    pub(crate) const fn new(
        kind: DeclKind,
        context: &'a DeclContext<'a>,
        name: Identifier,
        attrs: DeclAttributes,
    ) -> Self {
        Self {
            base: DeclBase::new(kind, context),
            name,
            attrs,
        }
    }

    pub(crate) const fn as_named(&self) -> &Self {
        self
    }

    /// Returns the declared name. Destructuring `var`s have the empty name.
    #[must_use]
    pub const fn name(&self) -> Identifier {
        self.name
    }

    /// Returns true if the name spells an operator.
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        self.name.is_operator()
    }

    /// Returns the attributes written on the declaration.
    #[must_use]
    pub const fn attrs(&self) -> &DeclAttributes {
        &self.attrs
    }
}

impl<'a> Deref for NamedDecl<'a> {
    type Target = DeclBase<'a>;

    fn deref(&self) -> &DeclBase<'a> {
        &self.base
    }
}

/// Whether a type slot has been filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeState<'a> {
    /// Waiting for the type checker
    Unresolved,
    /// Set by the parser or the type checker
    Resolved(Type<'a>),
}

/// A late-bound type field.
///
/// Slots start unresolved unless the parser saw an explicit type, are set
/// exactly once, and may then only be overwritten with another type.
pub(crate) struct TypeSlot<'a> {
    state: Cell<TypeState<'a>>,
}

impl<'a> TypeSlot<'a> {
    pub(crate) fn new(initial: Option<Type<'a>>) -> Self {
        let state = match initial {
            Some(ty) => TypeState::Resolved(ty),
            None => TypeState::Unresolved,
        };
        Self {
            state: Cell::new(state),
        }
    }

    pub(crate) fn state(&self) -> TypeState<'a> {
        self.state.get()
    }

    pub(crate) fn get(&self) -> Option<Type<'a>> {
        match self.state.get() {
            TypeState::Resolved(ty) => Some(ty),
            TypeState::Unresolved => None,
        }
    }

    pub(crate) fn set(&self, ty: Type<'a>, kind: DeclKind) -> DeclResult<()> {
        if let TypeState::Resolved(_) = self.state.get() {
            warn!("rejected second type resolution of a {kind} declaration");
            return Err(DeclError::TypeAlreadyResolved { kind });
        }
        self.state.set(TypeState::Resolved(ty));
        Ok(())
    }

    pub(crate) fn overwrite(&self, ty: Type<'a>, kind: DeclKind) -> DeclResult<Type<'a>> {
        let TypeState::Resolved(previous) = self.state.get() else {
            warn!("rejected overwrite of the unresolved type of a {kind} declaration");
            return Err(DeclError::TypeNotResolved { kind });
        };
        debug!("overwriting type of {kind} declaration: {previous:?} -> {ty:?}");
        self.state.set(TypeState::Resolved(ty));
        Ok(previous)
    }
}

impl std::fmt::Debug for TypeSlot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.state.get(), f)
    }
}

/// State of a declaration that has a type and may have an initializer.
#[derive(Debug)]
pub struct ValueDecl<'a> {
    named: NamedDecl<'a>,
    ty: TypeSlot<'a>,
    init: Cell<Option<&'a Expr<'a>>>,
}

impl<'a> ValueDecl<'a> {
    pub(crate) fn new(
        kind: DeclKind,
        context: &'a DeclContext<'a>,
        name: Identifier,
        ty: Option<Type<'a>>,
        init: Option<&'a Expr<'a>>,
        attrs: DeclAttributes,
    ) -> Self {
        if let Some(init) = init {
            assert_owned_init(context.ast_context(), init);
        }
        Self {
            named: NamedDecl::new(kind, context, name, attrs),
            ty: TypeSlot::new(ty),
            init: Cell::new(init),
        }
    }

    pub(crate) const fn as_value(&self) -> &Self {
        self
    }

    /// Returns true once a type has been set.
    #[must_use]
    pub fn has_type(&self) -> bool {
        self.ty.get().is_some()
    }

    /// Returns the type.
    ///
    /// # Panics
    ///
    /// Panics if the type is not resolved yet; see
    /// [`type_if_resolved`](Self::type_if_resolved).
    #[must_use]
    pub fn ty(&self) -> Type<'a> {
        match self.ty.get() {
            Some(ty) => ty,
            None => panic!("type of {} declaration read before resolution", self.kind()),
        }
    }

    /// Returns the type, or `None` if it is not resolved yet.
    #[must_use]
    pub fn type_if_resolved(&self) -> Option<Type<'a>> {
        self.ty.get()
    }

    /// Returns the resolution state of the type.
    #[must_use]
    pub fn type_state(&self) -> TypeState<'a> {
        self.ty.state()
    }

    /// Resolves the type.
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::TypeAlreadyResolved`] if a type was already set.
    pub fn set_type(&self, ty: Type<'a>) -> DeclResult<()> {
        self.ty.set(ty, self.kind())
    }

    /// Replaces a resolved type, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::TypeNotResolved`] if no type was set yet.
    pub fn overwrite_type(&self, ty: Type<'a>) -> DeclResult<Type<'a>> {
        self.ty.overwrite(ty, self.kind())
    }

    /// Returns the initializer, if any.
    #[must_use]
    pub fn init(&self) -> Option<&'a Expr<'a>> {
        self.init.get()
    }

    pub(crate) fn set_init(&self, init: Option<&'a Expr<'a>>) {
        if let Some(init) = init {
            assert_owned_init(self.ast_context(), init);
        }
        self.init.set(init);
    }
}

fn assert_owned_init(ast: &AstContext, init: &Expr<'_>) {
    assert!(ast.owns(init), "initializer from another AST context");
}

impl<'a> Deref for ValueDecl<'a> {
    type Target = NamedDecl<'a>;

    fn deref(&self) -> &NamedDecl<'a> {
        &self.named
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BuiltinKind;

    #[test]
    fn test_type_slot_lifecycle() {
        let ctx = AstContext::new();
        let int = ctx.builtin_type(BuiltinKind::Int);
        let bool_ty = ctx.builtin_type(BuiltinKind::Bool);

        let slot = TypeSlot::new(None);
        assert_eq!(slot.state(), TypeState::Unresolved);
        assert_eq!(
            slot.overwrite(int, DeclKind::Var),
            Err(DeclError::TypeNotResolved {
                kind: DeclKind::Var
            })
        );

        slot.set(int, DeclKind::Var).unwrap();
        assert_eq!(slot.get(), Some(int));
        assert_eq!(
            slot.set(bool_ty, DeclKind::Var),
            Err(DeclError::TypeAlreadyResolved {
                kind: DeclKind::Var
            })
        );
        assert_eq!(slot.get(), Some(int));

        assert_eq!(slot.overwrite(bool_ty, DeclKind::Var), Ok(int));
        assert_eq!(slot.state(), TypeState::Resolved(bool_ty));
    }

    #[test]
    fn test_set_decl_context_same_ast() {
        let ctx = AstContext::new();
        let unit = ctx.create_translation_unit();
        let func = unit.create_child(crate::DeclContextKind::Function);

        let base = DeclBase::new(DeclKind::Import, unit);
        base.set_decl_context(func);
        assert!(std::ptr::eq(base.decl_context(), func));
        assert!(std::ptr::eq(base.ast_context(), &ctx));
    }

    #[test]
    #[should_panic(expected = "scope of another AST context")]
    fn test_set_decl_context_other_ast_panics() {
        let first = AstContext::new();
        let second = AstContext::new();
        let unit = first.create_translation_unit();
        let other = second.create_translation_unit();

        let base = DeclBase::new(DeclKind::Import, unit);
        base.set_decl_context(other);
    }
}
