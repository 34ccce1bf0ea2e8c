//! `import` declarations.

use sable_log::trace;

use crate::context::DeclContext;
use crate::decl::base::DeclBase;
use crate::decl::DeclNode;
use crate::identifier::Identifier;
use crate::loc::{Located, SourceLoc};

/// One dotted component of an import path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessPathElement {
    /// Component name
    pub name: Identifier,
    /// Location of the component
    pub loc: SourceLoc,
}

impl AccessPathElement {
    /// Creates a path component.
    #[must_use]
    pub const fn new(name: Identifier, loc: SourceLoc) -> Self {
        Self { name, loc }
    }
}

/// `import a.b.c`
///
/// The access path is stored directly after the node in the same arena
/// block, so an import costs one allocation regardless of path length.
///
/// ```
/// use sable_ast::{AstContext, SourceLoc};
/// use sable_ast::decl::{AccessPathElement, ImportDecl};
///
/// let ctx = AstContext::new();
/// let unit = ctx.create_translation_unit();
/// let path = [
///     AccessPathElement::new(ctx.identifier("a"), SourceLoc::new(7)),
///     AccessPathElement::new(ctx.identifier("b"), SourceLoc::new(9)),
/// ];
///
/// let import = ImportDecl::create(unit, SourceLoc::new(0), &path);
/// assert_eq!(import.access_path(), &path);
/// ```
#[derive(Debug)]
pub struct ImportDecl<'a> {
    base: DeclBase<'a>,
    import_loc: SourceLoc,
    path: &'a [AccessPathElement],
}

impl<'a> ImportDecl<'a> {
    /// Allocates an import of `path` in `context`'s arena.
    ///
    /// The path is copied; the caller's slice is not retained. An empty path
    /// is accepted.
    pub fn create(
        context: &'a DeclContext<'a>,
        import_loc: SourceLoc,
        path: &[AccessPathElement],
    ) -> &'a ImportDecl<'a> {
        let decl = context
            .ast_context()
            .arena()
            .alloc_with_trailing(path, |path| ImportDecl {
                base: DeclBase::new(Self::KIND, context),
                import_loc,
                path,
            });

        trace!("created import decl at {import_loc} ({} components)", path.len());
        decl
    }

    /// Returns the location of the `import` keyword.
    #[must_use]
    pub const fn import_loc(&self) -> SourceLoc {
        self.import_loc
    }

    /// Returns the dotted path, in source order.
    #[must_use]
    pub const fn access_path(&self) -> &'a [AccessPathElement] {
        self.path
    }
}

impl<'a> std::ops::Deref for ImportDecl<'a> {
    type Target = DeclBase<'a>;

    fn deref(&self) -> &DeclBase<'a> {
        &self.base
    }
}

impl Located for ImportDecl<'_> {
    fn loc_start(&self) -> SourceLoc {
        self.import_loc
    }
}
