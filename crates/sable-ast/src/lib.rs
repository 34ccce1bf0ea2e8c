//! `sable` declaration AST
//!
//! This crate provides the declaration layer of the `sable` front end:
//! - Arena-owned declaration nodes and the [`Decl`] handle
//! - The declaration kind taxonomy with its named and value families
//! - Declaration attributes (infix precedence and associativity)
//! - Destructuring `var` names and element references into them
//! - The semantic types declarations point at
//!
//! Everything a compilation unit allocates lives in one [`AstContext`].
//!
//! # Modules
//!
//! - [`context`] - The AST context and declaration scopes
//! - [`decl`] - Declaration nodes
//! - [`types`] - Types referenced by declarations
//! - [`identifier`] - Interned identifiers
//! - [`loc`] - Source locations
//! - [`expr`] - Initializer expressions
//! - [`error`] - Declaration errors
//!
//! # Examples
//!
//! ## Building `import a.b.c`
//!
//! ```
//! use sable_ast::{AstContext, SourceLoc};
//! use sable_ast::decl::{AccessPathElement, Decl, ImportDecl};
//!
//! let ctx = AstContext::new();
//! let unit = ctx.create_translation_unit();
//!
//! let path: Vec<_> = ["a", "b", "c"]
//!     .iter()
//!     .zip([7, 9, 11])
//!     .map(|(name, at)| AccessPathElement::new(ctx.identifier(name), SourceLoc::new(at)))
//!     .collect();
//!
//! let import = ImportDecl::create(unit, SourceLoc::new(0), &path);
//! let decl = Decl::from(import);
//!
//! assert_eq!(import.access_path().len(), 3);
//! assert!(decl.as_named().is_none());
//! ```
//!
//! ## Resolving a type late
//!
//! ```
//! use sable_ast::{AstContext, BuiltinKind, DeclError, SourceLoc};
//! use sable_ast::decl::{DeclAttributes, DeclKind, VarDecl};
//!
//! let ctx = AstContext::new();
//! let unit = ctx.create_translation_unit();
//! let x = VarDecl::create(unit, SourceLoc::new(0), ctx.identifier("x"), None, None, DeclAttributes::new());
//!
//! assert!(x.type_if_resolved().is_none());
//! x.set_type(ctx.builtin_type(BuiltinKind::Int))?;
//! assert_eq!(
//!     x.set_type(ctx.builtin_type(BuiltinKind::Bool)),
//!     Err(DeclError::TypeAlreadyResolved { kind: DeclKind::Var })
//! );
//! # Ok::<(), DeclError>(())
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod decl;
pub mod error;
pub mod expr;
pub mod identifier;
pub mod loc;
pub mod types;

pub use context::{AstContext, AstContextOptions, DeclContext, DeclContextKind};
pub use decl::{Decl, DeclKind, DeclNode};
pub use error::{DeclError, DeclResult};
pub use expr::{Expr, ExprKind};
pub use identifier::Identifier;
pub use loc::{Located, SourceLoc, SourceRange};
pub use types::{BuiltinKind, TupleElement, Type, TypeBase};
