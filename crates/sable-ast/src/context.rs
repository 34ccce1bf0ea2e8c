//! The per-unit AST context and declaration contexts.
//!
//! An [`AstContext`] owns everything one compilation unit allocates: the
//! node arena, the identifier table and the type singletons. Every node
//! borrows from it with a single lifetime `'a` and the whole graph is
//! released at once when the context is dropped. Declarations are always
//! created from a [`DeclContext`], which pins them to that context's arena.
//!
//! # Examples
//!
//! ```
//! use sable_ast::{AstContext, BuiltinKind, DeclContextKind};
//!
//! let ctx = AstContext::new();
//! let unit = ctx.create_translation_unit();
//!
//! assert_eq!(unit.kind(), DeclContextKind::TranslationUnit);
//! assert!(std::ptr::eq(unit.ast_context(), &ctx));
//! assert_eq!(ctx.builtin_type(BuiltinKind::Int), ctx.builtin_type(BuiltinKind::Int));
//! ```

use std::fmt;
use std::ptr::NonNull;

use sable_log::{debug, warn};
use sable_mem::{ArenaFactory, ArenaStats, LocalArena, StringInterner};

use crate::decl::TypeAliasDecl;
use crate::identifier::{Identifier, is_operator_text};
use crate::types::{BuiltinKind, TupleElement, Type, TypeBase};

/// Default chunk size of a context's node arena.
pub const DEFAULT_AST_CHUNK_SIZE: usize = 64 * 1024;

/// Environment variable that overrides [`AstContextOptions::chunk_size`].
pub const ARENA_CHUNK_ENV: &str = "SABLE_ARENA_CHUNK";

/// Construction options for an [`AstContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AstContextOptions {
    /// Initial chunk size of the node arena, in bytes
    pub chunk_size: usize,
}

impl AstContextOptions {
    /// Reads options from the environment, falling back to the defaults.
    ///
    /// `SABLE_ARENA_CHUNK` sets the chunk size in bytes. Unparseable values
    /// are ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_chunk_setting(std::env::var(ARENA_CHUNK_ENV).ok().as_deref())
    }

    fn from_chunk_setting(raw: Option<&str>) -> Self {
        let mut options = Self::default();

        if let Some(raw) = raw {
            match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => options.chunk_size = size,
                _ => warn!("ignoring {ARENA_CHUNK_ENV}={raw:?}: expected a positive byte count"),
            }
        }

        options
    }
}

impl Default for AstContextOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_AST_CHUNK_SIZE,
        }
    }
}

/// Pointers to the per-context type singletons.
///
/// The nodes live in the context's arena. They are stored with a `'static`
/// parameter because none of these variants holds a reference.
struct Singletons {
    error: NonNull<TypeBase<'static>>,
    dependent: NonNull<TypeBase<'static>>,
    builtins: [NonNull<TypeBase<'static>>; BuiltinKind::ALL.len()],
}

impl Singletons {
    fn new(arena: &LocalArena) -> Self {
        let alloc = |base: TypeBase<'static>| NonNull::from(&*arena.alloc(base));

        Self {
            error: alloc(TypeBase::Error),
            dependent: alloc(TypeBase::Dependent),
            builtins: BuiltinKind::ALL.map(|kind| alloc(TypeBase::Builtin(kind))),
        }
    }
}

/// Owner of all memory for one compilation unit.
pub struct AstContext {
    arena: LocalArena,
    identifiers: StringInterner,
    singletons: Singletons,
}

impl AstContext {
    /// Creates a context with options read from the environment.
    ///
    /// See [`AstContextOptions::from_env`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(AstContextOptions::from_env())
    }

    /// Creates a context with explicit options.
    #[must_use]
    pub fn with_options(options: AstContextOptions) -> Self {
        Self::with_factory(&ArenaFactory::new(options.chunk_size))
    }

    /// Creates a context whose node arena comes from `factory`.
    #[must_use]
    pub fn with_factory(factory: &ArenaFactory) -> Self {
        let arena = factory.create_arena();
        let singletons = Singletons::new(&arena);

        debug!(
            "created AST context (chunk size {} bytes)",
            factory.chunk_size()
        );

        Self {
            arena,
            identifiers: StringInterner::new(),
            singletons,
        }
    }

    /// Moves `value` into the node arena.
    pub fn alloc<T>(&self, value: T) -> &T {
        self.arena.alloc(value)
    }

    /// Copies `values` into the node arena.
    pub fn alloc_slice<T: Copy>(&self, values: &[T]) -> &[T] {
        self.arena.alloc_slice_copy(values)
    }

    pub(crate) fn arena(&self) -> &LocalArena {
        &self.arena
    }

    /// Returns true if `node` was allocated in this context's arena.
    #[must_use]
    pub fn owns<T: ?Sized>(&self, node: &T) -> bool {
        self.arena.contains(node)
    }

    /// Interns `text`.
    ///
    /// The empty string yields [`Identifier::empty`].
    pub fn identifier(&self, text: &str) -> Identifier {
        if text.is_empty() {
            return Identifier::empty();
        }

        Identifier::new(self.identifiers.intern(text), is_operator_text(text))
    }

    /// Returns the text of an identifier interned in this context.
    #[must_use]
    pub fn identifier_text(&self, id: Identifier) -> Option<&str> {
        if id.is_empty() {
            return None;
        }
        self.identifiers.resolve(id.symbol())
    }

    /// Returns the identifier table.
    #[must_use]
    pub fn identifiers(&self) -> &StringInterner {
        &self.identifiers
    }

    fn singleton(&self, ptr: NonNull<TypeBase<'static>>) -> Type<'_> {
        // SAFETY: singletons live in `self.arena` for as long as `self`, and
        // their variants hold no references, so any lifetime parameter up to
        // the borrow of `self` describes them correctly.
        Type::new(unsafe { ptr.cast::<TypeBase<'_>>().as_ref() })
    }

    /// Returns the builtin type singleton for `kind`.
    #[must_use]
    pub fn builtin_type(&self, kind: BuiltinKind) -> Type<'_> {
        self.singleton(self.singletons.builtins[kind.index()])
    }

    /// Returns the dependent type singleton.
    #[must_use]
    pub fn dependent_type(&self) -> Type<'_> {
        self.singleton(self.singletons.dependent)
    }

    /// Returns the error type singleton.
    #[must_use]
    pub fn error_type(&self) -> Type<'_> {
        self.singleton(self.singletons.error)
    }

    /// Allocates a tuple type.
    pub fn tuple_type<'a>(&'a self, elements: &[TupleElement<'a>]) -> Type<'a> {
        let base = self
            .arena
            .alloc_with_trailing(elements, TypeBase::Tuple);
        Type::new(base)
    }

    /// Allocates a function type.
    pub fn function_type<'a>(&'a self, input: Type<'a>, result: Type<'a>) -> Type<'a> {
        Type::new(self.arena.alloc(TypeBase::Function { input, result }))
    }

    pub(crate) fn name_alias_type<'a>(&'a self, decl: &'a TypeAliasDecl<'a>) -> Type<'a> {
        Type::new(self.arena.alloc(TypeBase::NameAlias(decl)))
    }

    /// Creates the root declaration context of a compilation unit.
    pub fn create_translation_unit(&self) -> &DeclContext<'_> {
        self.alloc(DeclContext {
            kind: DeclContextKind::TranslationUnit,
            parent: None,
            ast: self,
        })
    }

    /// Returns node arena statistics.
    #[must_use]
    pub fn stats(&self) -> ArenaStats {
        self.arena.stats()
    }
}

impl Default for AstContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AstContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstContext")
            .field("stats", &self.arena.stats())
            .field("identifiers", &self.identifiers.len())
            .finish_non_exhaustive()
    }
}

/// Kinds of scope a declaration can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclContextKind {
    /// The top level of a compilation unit
    TranslationUnit,
    /// The body of a function
    Function,
    /// The body of a `oneof`
    OneOf,
}

/// A lexical scope that owns declarations.
///
/// Contexts form a tree rooted at a translation unit; each one can reach the
/// [`AstContext`] that allocated it.
pub struct DeclContext<'a> {
    kind: DeclContextKind,
    parent: Option<&'a DeclContext<'a>>,
    ast: &'a AstContext,
}

impl<'a> DeclContext<'a> {
    /// Returns the scope kind.
    #[must_use]
    pub const fn kind(&self) -> DeclContextKind {
        self.kind
    }

    /// Returns the enclosing scope, `None` for a translation unit.
    #[must_use]
    pub const fn parent(&self) -> Option<&'a DeclContext<'a>> {
        self.parent
    }

    /// Returns the AST context that owns this scope.
    #[must_use]
    pub const fn ast_context(&self) -> &'a AstContext {
        self.ast
    }

    /// Returns true for the top level of a compilation unit.
    #[must_use]
    pub fn is_module_scope(&self) -> bool {
        self.kind == DeclContextKind::TranslationUnit
    }

    /// Creates a nested scope.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is [`DeclContextKind::TranslationUnit`].
    pub fn create_child(&'a self, kind: DeclContextKind) -> &'a DeclContext<'a> {
        assert!(
            kind != DeclContextKind::TranslationUnit,
            "a translation unit cannot be nested"
        );

        self.ast.alloc(DeclContext {
            kind,
            parent: Some(self),
            ast: self.ast,
        })
    }

    /// Returns the translation unit at the root of this scope chain.
    #[must_use]
    pub fn translation_unit(&'a self) -> &'a DeclContext<'a> {
        let mut current = self;
        while let Some(parent) = current.parent {
            current = parent;
        }
        current
    }
}

impl fmt::Debug for DeclContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclContext")
            .field("kind", &self.kind)
            .field("parent", &self.parent.map(|p| p.kind))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_interning() {
        let ctx = AstContext::new();

        let a = ctx.identifier("a");
        assert_eq!(ctx.identifier("a"), a);
        assert_ne!(ctx.identifier("b"), a);
        assert_eq!(ctx.identifier_text(a), Some("a"));
        assert!(!a.is_operator());
        assert!(ctx.identifier("+").is_operator());
    }

    #[test]
    fn test_empty_identifier() {
        let ctx = AstContext::new();
        let empty = ctx.identifier("");

        assert!(empty.is_empty());
        assert_eq!(ctx.identifier_text(empty), None);
    }

    #[test]
    fn test_decl_context_tree() {
        let ctx = AstContext::new();
        let unit = ctx.create_translation_unit();
        let func = unit.create_child(DeclContextKind::Function);
        let inner = func.create_child(DeclContextKind::OneOf);

        assert!(unit.is_module_scope());
        assert!(!func.is_module_scope());
        assert!(std::ptr::eq(inner.parent().unwrap(), func));
        assert!(std::ptr::eq(inner.translation_unit(), unit));
        assert!(std::ptr::eq(inner.ast_context(), &ctx));
    }

    #[test]
    #[should_panic(expected = "cannot be nested")]
    fn test_nested_translation_unit_panics() {
        let ctx = AstContext::new();
        let unit = ctx.create_translation_unit();
        unit.create_child(DeclContextKind::TranslationUnit);
    }

    #[test]
    fn test_options() {
        let options = AstContextOptions { chunk_size: 16 * 1024 };
        let ctx = AstContext::with_options(options);
        assert!(ctx.stats().total_capacity >= 16 * 1024);
        assert_eq!(AstContextOptions::default().chunk_size, DEFAULT_AST_CHUNK_SIZE);
    }

    #[test]
    fn test_chunk_setting_valid() {
        let options = AstContextOptions::from_chunk_setting(Some(" 1048576 "));
        assert_eq!(options.chunk_size, 1024 * 1024);

        let ctx = AstContext::with_options(options);
        assert_eq!(ctx.stats().total_capacity, 1024 * 1024);
    }

    #[test]
    fn test_chunk_setting_rejected_values() {
        let default = AstContextOptions::default();

        assert_eq!(AstContextOptions::from_chunk_setting(None), default);
        assert_eq!(AstContextOptions::from_chunk_setting(Some("0")), default);
        assert_eq!(AstContextOptions::from_chunk_setting(Some("lots")), default);
        assert_eq!(AstContextOptions::from_chunk_setting(Some("-4096")), default);
    }

    #[test]
    fn test_owns() {
        let ctx = AstContext::new();
        let other = AstContext::new();
        let unit = ctx.create_translation_unit();

        assert!(ctx.owns(unit));
        assert!(ctx.owns(ctx.alloc_slice(&[1u32, 2])));
        assert!(!other.owns(unit));
        assert!(!ctx.owns(&ctx));
    }

    #[test]
    fn test_factory_contexts_are_independent() {
        let factory = ArenaFactory::new(8192);
        let first = AstContext::with_factory(&factory);
        let second = AstContext::with_factory(&factory);

        first.alloc(1u64);
        assert_eq!(
            first.stats().allocation_count,
            second.stats().allocation_count + 1
        );
    }
}
