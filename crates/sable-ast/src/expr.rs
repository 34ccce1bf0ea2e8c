//! Initializer expressions.
//!
//! Declarations only need to point at their initializers, so this is the
//! smallest expression tree that lets a `var` or `func` carry one.

use crate::context::AstContext;
use crate::decl::Decl;
use crate::loc::{Located, SourceLoc};

/// The shape of an expression.
#[derive(Debug, Clone, Copy)]
pub enum ExprKind<'a> {
    /// An integer literal
    IntegerLiteral(u64),
    /// A parenthesized list of expressions
    Tuple(&'a [&'a Expr<'a>]),
    /// A reference to a declaration
    DeclRef(Decl<'a>),
}

/// An arena-allocated expression.
#[derive(Debug)]
pub struct Expr<'a> {
    kind: ExprKind<'a>,
    loc: SourceLoc,
}

impl<'a> Expr<'a> {
    /// Allocates an expression in `ctx`.
    pub fn new_in(ctx: &'a AstContext, kind: ExprKind<'a>, loc: SourceLoc) -> &'a Expr<'a> {
        ctx.alloc(Expr { kind, loc })
    }

    /// Allocates an integer literal.
    pub fn integer(ctx: &'a AstContext, value: u64, loc: SourceLoc) -> &'a Expr<'a> {
        Self::new_in(ctx, ExprKind::IntegerLiteral(value), loc)
    }

    /// Allocates a tuple expression, copying `elements` into the arena.
    ///
    /// # Panics
    ///
    /// Panics if an element was allocated by another AST context.
    pub fn tuple(ctx: &'a AstContext, elements: &[&'a Expr<'a>], loc: SourceLoc) -> &'a Expr<'a> {
        assert!(
            elements.iter().all(|e| ctx.owns(*e)),
            "tuple element from another AST context"
        );
        let elements = ctx.alloc_slice(elements);
        Self::new_in(ctx, ExprKind::Tuple(elements), loc)
    }

    /// Allocates a reference to `decl`.
    ///
    /// # Panics
    ///
    /// Panics if `decl` belongs to another AST context.
    pub fn decl_ref(ctx: &'a AstContext, decl: Decl<'a>, loc: SourceLoc) -> &'a Expr<'a> {
        assert!(
            std::ptr::eq(decl.ast_context(), ctx),
            "reference to a declaration of another AST context"
        );
        Self::new_in(ctx, ExprKind::DeclRef(decl), loc)
    }

    /// Returns the expression's shape.
    #[must_use]
    pub const fn kind(&self) -> &ExprKind<'a> {
        &self.kind
    }
}

impl Located for Expr<'_> {
    fn loc_start(&self) -> SourceLoc {
        self.loc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_expr() {
        let ctx = AstContext::new();
        let one = Expr::integer(&ctx, 1, SourceLoc::new(1));
        let two = Expr::integer(&ctx, 2, SourceLoc::new(4));
        let tuple = Expr::tuple(&ctx, &[one, two], SourceLoc::new(0));

        assert_eq!(tuple.loc_start(), SourceLoc::new(0));
        match tuple.kind() {
            ExprKind::Tuple(elements) => {
                assert_eq!(elements.len(), 2);
                assert!(matches!(elements[1].kind(), ExprKind::IntegerLiteral(2)));
            }
            other => panic!("expected tuple, got {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "tuple element from another AST context")]
    fn test_tuple_of_foreign_element_panics() {
        let ctx = AstContext::new();
        let other = AstContext::new();
        let foreign = Expr::integer(&other, 1, SourceLoc::new(1));

        Expr::tuple(&ctx, &[foreign], SourceLoc::new(0));
    }

    #[test]
    #[should_panic(expected = "reference to a declaration of another AST context")]
    fn test_decl_ref_to_foreign_decl_panics() {
        let ctx = AstContext::new();
        let other = AstContext::new();
        let unit = other.create_translation_unit();
        let import = crate::decl::ImportDecl::create(unit, SourceLoc::new(0), &[]);

        Expr::decl_ref(&ctx, import.into(), SourceLoc::new(3));
    }
}
