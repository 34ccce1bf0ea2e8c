//! Value declarations: `var`, `func`, oneof elements and arguments.

use std::ops::Deref;

use sable_log::trace;

use crate::context::DeclContext;
use crate::decl::DeclNode;
use crate::decl::attr::DeclAttributes;
use crate::decl::base::ValueDecl;
use crate::decl::var_name::DeclVarName;
use crate::expr::Expr;
use crate::identifier::Identifier;
use crate::loc::{Located, SourceLoc};
use crate::types::Type;

macro_rules! deref_to_value {
    ($($node:ident),* $(,)?) => {
        $(
            impl<'a> Deref for $node<'a> {
                type Target = ValueDecl<'a>;

                fn deref(&self) -> &ValueDecl<'a> {
                    &self.value
                }
            }
        )*
    };
}

deref_to_value!(VarDecl, FuncDecl, OneOfElementDecl, ArgDecl);

/// The name a `var` binds.
#[derive(Debug, Clone, Copy)]
pub enum VarName<'a> {
    /// `var x`
    Simple(Identifier),
    /// `var (a, (b, c))`
    Nested(&'a DeclVarName<'a>),
}

/// `var name : Type = init`
///
/// A destructuring `var` has the empty identifier as its name and keeps the
/// whole name tree in [`VarDecl::nested_name`].
#[derive(Debug)]
pub struct VarDecl<'a> {
    value: ValueDecl<'a>,
    var_loc: SourceLoc,
    var_name: VarName<'a>,
}

impl<'a> VarDecl<'a> {
    /// Allocates a `var` with a simple name.
    pub fn create(
        context: &'a DeclContext<'a>,
        var_loc: SourceLoc,
        name: Identifier,
        ty: Option<Type<'a>>,
        init: Option<&'a Expr<'a>>,
        attrs: DeclAttributes,
    ) -> &'a VarDecl<'a> {
        Self::alloc(context, var_loc, VarName::Simple(name), ty, init, attrs)
    }

    /// Allocates a destructuring `var`.
    ///
    /// # Panics
    ///
    /// Panics if `name` was allocated by another AST context.
    pub fn create_nested(
        context: &'a DeclContext<'a>,
        var_loc: SourceLoc,
        name: &'a DeclVarName<'a>,
        ty: Option<Type<'a>>,
        init: Option<&'a Expr<'a>>,
        attrs: DeclAttributes,
    ) -> &'a VarDecl<'a> {
        assert!(
            context.ast_context().owns(name),
            "var name tree from another AST context"
        );
        Self::alloc(context, var_loc, VarName::Nested(name), ty, init, attrs)
    }

    fn alloc(
        context: &'a DeclContext<'a>,
        var_loc: SourceLoc,
        var_name: VarName<'a>,
        ty: Option<Type<'a>>,
        init: Option<&'a Expr<'a>>,
        attrs: DeclAttributes,
    ) -> &'a VarDecl<'a> {
        let name = match var_name {
            VarName::Simple(name) => name,
            VarName::Nested(_) => Identifier::empty(),
        };

        let decl = context.ast_context().alloc(VarDecl {
            value: ValueDecl::new(Self::KIND, context, name, ty, init, attrs),
            var_loc,
            var_name,
        });

        trace!("created var decl at {var_loc}");
        decl
    }

    /// Returns the location of the `var` keyword.
    #[must_use]
    pub const fn var_loc(&self) -> SourceLoc {
        self.var_loc
    }

    /// Returns the bound name.
    #[must_use]
    pub const fn var_name(&self) -> VarName<'a> {
        self.var_name
    }

    /// Returns the name tree of a destructuring `var`.
    #[must_use]
    pub const fn nested_name(&self) -> Option<&'a DeclVarName<'a>> {
        match self.var_name {
            VarName::Nested(name) => Some(name),
            VarName::Simple(_) => None,
        }
    }

    /// Sets or clears the initializer.
    pub fn set_init(&self, init: Option<&'a Expr<'a>>) {
        self.value.set_init(init);
    }
}

impl Located for VarDecl<'_> {
    fn loc_start(&self) -> SourceLoc {
        self.var_loc
    }
}

/// `func name : Type = body`
#[derive(Debug)]
pub struct FuncDecl<'a> {
    value: ValueDecl<'a>,
    func_loc: SourceLoc,
}

impl<'a> FuncDecl<'a> {
    /// Allocates a function.
    pub fn create(
        context: &'a DeclContext<'a>,
        func_loc: SourceLoc,
        name: Identifier,
        ty: Option<Type<'a>>,
        init: Option<&'a Expr<'a>>,
        attrs: DeclAttributes,
    ) -> &'a FuncDecl<'a> {
        let decl = context.ast_context().alloc(FuncDecl {
            value: ValueDecl::new(Self::KIND, context, name, ty, init, attrs),
            func_loc,
        });

        trace!("created func decl at {func_loc}");
        decl
    }

    /// Returns the location of the `func` keyword.
    #[must_use]
    pub const fn func_loc(&self) -> SourceLoc {
        self.func_loc
    }

    /// Sets or clears the body.
    pub fn set_init(&self, init: Option<&'a Expr<'a>>) {
        self.value.set_init(init);
    }
}

impl Located for FuncDecl<'_> {
    fn loc_start(&self) -> SourceLoc {
        self.func_loc
    }
}

/// An element of a `oneof`, optionally carrying an argument type.
///
/// Its type is the oneof's type, or a function from the argument type to the
/// oneof's type when the element has an argument. Elements never have an
/// initializer.
#[derive(Debug)]
pub struct OneOfElementDecl<'a> {
    value: ValueDecl<'a>,
    identifier_loc: SourceLoc,
    argument_type: Option<Type<'a>>,
}

impl<'a> OneOfElementDecl<'a> {
    /// Allocates a oneof element.
    pub fn create(
        context: &'a DeclContext<'a>,
        identifier_loc: SourceLoc,
        name: Identifier,
        ty: Option<Type<'a>>,
        argument_type: Option<Type<'a>>,
    ) -> &'a OneOfElementDecl<'a> {
        let decl = context.ast_context().alloc(OneOfElementDecl {
            value: ValueDecl::new(Self::KIND, context, name, ty, None, DeclAttributes::new()),
            identifier_loc,
            argument_type,
        });

        trace!("created oneof element decl at {identifier_loc}");
        decl
    }

    /// Returns the location of the element name.
    #[must_use]
    pub const fn identifier_loc(&self) -> SourceLoc {
        self.identifier_loc
    }

    /// Returns the argument type, `None` for elements without an argument.
    #[must_use]
    pub const fn argument_type(&self) -> Option<Type<'a>> {
        self.argument_type
    }
}

impl Located for OneOfElementDecl<'_> {
    fn loc_start(&self) -> SourceLoc {
        self.identifier_loc
    }
}

/// A function argument.
///
/// Arguments start at the `func` keyword of their function and never have
/// an initializer.
#[derive(Debug)]
pub struct ArgDecl<'a> {
    value: ValueDecl<'a>,
    func_loc: SourceLoc,
}

impl<'a> ArgDecl<'a> {
    /// Allocates an argument.
    pub fn create(
        context: &'a DeclContext<'a>,
        func_loc: SourceLoc,
        name: Identifier,
        ty: Option<Type<'a>>,
    ) -> &'a ArgDecl<'a> {
        let decl = context.ast_context().alloc(ArgDecl {
            value: ValueDecl::new(Self::KIND, context, name, ty, None, DeclAttributes::new()),
            func_loc,
        });

        trace!("created argument decl at {func_loc}");
        decl
    }

    /// Returns the location of the owning function's `func` keyword.
    #[must_use]
    pub const fn func_loc(&self) -> SourceLoc {
        self.func_loc
    }
}

impl Located for ArgDecl<'_> {
    fn loc_start(&self) -> SourceLoc {
        self.func_loc
    }
}
