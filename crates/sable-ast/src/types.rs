//! Semantic types referenced by declarations.
//!
//! Types are allocated in the [`AstContext`](crate::AstContext) arena and
//! handed around as [`Type`], a copyable non-null handle. Two handles are
//! equal when they point at the same node: the builtin, dependent and error
//! types are per-context singletons, so they compare equal everywhere, while
//! structural types (tuples, functions) are distinct per construction.
//!
//! A declaration whose type is not resolved yet holds no `Type` at all (see
//! [`ValueDecl::type_if_resolved`](crate::decl::ValueDecl::type_if_resolved)).
//! The *dependent* type is different: it is a resolved type that stands for
//! "determined later by inference".

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;

use crate::decl::TypeAliasDecl;
use crate::identifier::Identifier;

/// Builtin scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Float,
    /// Boolean
    Bool,
    /// String
    String,
}

impl BuiltinKind {
    /// All builtin kinds, in singleton-table order.
    pub const ALL: [BuiltinKind; 4] = [
        BuiltinKind::Int,
        BuiltinKind::Float,
        BuiltinKind::Bool,
        BuiltinKind::String,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Returns the name used when printing the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            BuiltinKind::Int => "Int",
            BuiltinKind::Float => "Float",
            BuiltinKind::Bool => "Bool",
            BuiltinKind::String => "String",
        }
    }
}

/// One element of a tuple type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TupleElement<'a> {
    /// Element label, or the empty identifier for positional elements
    pub name: Identifier,
    /// Element type
    pub ty: Type<'a>,
}

impl<'a> TupleElement<'a> {
    /// Creates a positional element.
    #[must_use]
    pub const fn unnamed(ty: Type<'a>) -> Self {
        Self {
            name: Identifier::empty(),
            ty,
        }
    }

    /// Creates a labelled element.
    #[must_use]
    pub const fn named(name: Identifier, ty: Type<'a>) -> Self {
        Self { name, ty }
    }
}

/// An arena-allocated type node.
pub enum TypeBase<'a> {
    /// Produced by error recovery
    Error,
    /// To be determined by inference
    Dependent,
    /// A builtin scalar
    Builtin(BuiltinKind),
    /// An ordered list of (possibly labelled) elements
    Tuple(&'a [TupleElement<'a>]),
    /// A function from `input` to `result`
    Function {
        /// Argument type, usually a tuple
        input: Type<'a>,
        /// Return type
        result: Type<'a>,
    },
    /// The sugared name of a type alias
    NameAlias(&'a TypeAliasDecl<'a>),
}

impl fmt::Debug for TypeBase<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeBase::Error => write!(f, "Error"),
            TypeBase::Dependent => write!(f, "Dependent"),
            TypeBase::Builtin(kind) => write!(f, "{}", kind.name()),
            TypeBase::Tuple(elements) => {
                f.debug_list().entries(elements.iter().map(|e| e.ty)).finish()
            }
            TypeBase::Function { input, result } => write!(f, "{input:?} -> {result:?}"),
            // Only the name: the alias decl caches a type pointing back here.
            TypeBase::NameAlias(decl) => write!(f, "NameAlias({})", decl.name().symbol()),
        }
    }
}

/// A handle to an arena-allocated type.
#[derive(Clone, Copy)]
pub struct Type<'a>(&'a TypeBase<'a>);

impl<'a> Type<'a> {
    pub(crate) const fn new(base: &'a TypeBase<'a>) -> Self {
        Self(base)
    }

    /// Returns the node this handle points at.
    #[must_use]
    pub const fn base(self) -> &'a TypeBase<'a> {
        self.0
    }

    /// Strips alias sugar.
    ///
    /// Returns `None` when an alias in the chain has no underlying type yet.
    /// An alias chain that loops back on itself desugars to the error type.
    #[must_use]
    pub fn desugared(self) -> Option<Type<'a>> {
        let mut current = self;
        let mut seen: Vec<&'a TypeAliasDecl<'a>> = Vec::new();

        while let TypeBase::NameAlias(decl) = current.base() {
            if seen.iter().any(|d| ptr::eq(*d, *decl)) {
                return Some(decl.ast_context().error_type());
            }
            seen.push(*decl);
            current = decl.underlying_type_if_resolved()?;
        }

        Some(current)
    }

    /// Returns true if the type is, or desugars to, the dependent type, or
    /// sits on an alias that is not resolved yet.
    #[must_use]
    pub fn is_dependent(self) -> bool {
        self.desugared()
            .is_none_or(|ty| matches!(ty.base(), TypeBase::Dependent))
    }

    /// Returns true if the type desugars to the error type.
    #[must_use]
    pub fn is_error(self) -> bool {
        self.desugared()
            .is_some_and(|ty| matches!(ty.base(), TypeBase::Error))
    }

    /// Returns the elements if the type desugars to a tuple.
    #[must_use]
    pub fn as_tuple(self) -> Option<&'a [TupleElement<'a>]> {
        match self.desugared()?.base() {
            TypeBase::Tuple(elements) => Some(*elements),
            _ => None,
        }
    }

    /// Returns the builtin kind if the type desugars to a builtin.
    #[must_use]
    pub fn as_builtin(self) -> Option<BuiltinKind> {
        match self.desugared()?.base() {
            TypeBase::Builtin(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns the alias declaration if this handle is alias sugar.
    #[must_use]
    pub fn as_alias(self) -> Option<&'a TypeAliasDecl<'a>> {
        match self.base() {
            TypeBase::NameAlias(decl) => Some(*decl),
            _ => None,
        }
    }
}

impl PartialEq for Type<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.0, other.0)
    }
}

impl Eq for Type<'_> {}

impl Hash for Type<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self.0, state);
    }
}

impl fmt::Debug for Type<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0, f)
    }
}
