//! Destructuring names of `var` declarations.
//!
//! `var (a, (b, c)) = ...` binds a tree of names. Each node of the tree is a
//! [`DeclVarName`]: either a simple identifier, or a parenthesized list of
//! further names. A node is simple exactly when its open and close locations
//! coincide. A node belongs to at most one parent list.

use std::cell::Cell;
use std::ptr;

use crate::context::AstContext;
use crate::error::{DeclError, DeclResult};
use crate::identifier::Identifier;
use crate::loc::{Located, SourceLoc, SourceRange};

#[derive(Debug, Clone, Copy)]
enum VarNameStorage<'a> {
    Name(Identifier),
    Elements(&'a [&'a DeclVarName<'a>]),
}

/// One node of a destructuring name tree.
#[derive(Debug)]
pub struct DeclVarName<'a> {
    lp_loc: SourceLoc,
    rp_loc: SourceLoc,
    storage: VarNameStorage<'a>,
    attached: Cell<bool>,
}

impl<'a> DeclVarName<'a> {
    /// Creates a leaf naming `name` at `loc`.
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::UnnamedVarNameLeaf`] for the empty identifier.
    pub fn simple(
        ctx: &'a AstContext,
        name: Identifier,
        loc: SourceLoc,
    ) -> DeclResult<&'a DeclVarName<'a>> {
        if name.is_empty() {
            return Err(DeclError::UnnamedVarNameLeaf { loc });
        }

        Ok(ctx.alloc(DeclVarName {
            lp_loc: loc,
            rp_loc: loc,
            storage: VarNameStorage::Name(name),
            attached: Cell::new(false),
        }))
    }

    /// Creates a parenthesized list, copying `elements` into the arena.
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::EmptyVarNameList`] if `elements` is empty,
    /// [`DeclError::DegenerateVarNameRange`] if `lp_loc == rp_loc` and
    /// [`DeclError::SharedVarNameElement`] if an element appears twice or
    /// already sits in another list.
    ///
    /// # Panics
    ///
    /// Panics if an element was allocated by another [`AstContext`].
    pub fn nested(
        ctx: &'a AstContext,
        lp_loc: SourceLoc,
        elements: &[&'a DeclVarName<'a>],
        rp_loc: SourceLoc,
    ) -> DeclResult<&'a DeclVarName<'a>> {
        if elements.is_empty() {
            return Err(DeclError::EmptyVarNameList { loc: lp_loc });
        }
        if lp_loc == rp_loc {
            return Err(DeclError::DegenerateVarNameRange { loc: lp_loc });
        }

        for (index, element) in elements.iter().enumerate() {
            assert!(
                ctx.owns(*element),
                "var name element from another AST context"
            );
            let repeated = elements[..index].iter().any(|e| ptr::eq(*e, *element));
            if repeated || element.attached.get() {
                return Err(DeclError::SharedVarNameElement {
                    loc: element.lp_loc,
                });
            }
        }
        for element in elements {
            element.attached.set(true);
        }

        let elements = ctx.alloc_slice(elements);
        Ok(ctx.alloc(DeclVarName {
            lp_loc,
            rp_loc,
            storage: VarNameStorage::Elements(elements),
            attached: Cell::new(false),
        }))
    }

    /// Returns the location of the name, or of the opening parenthesis.
    #[must_use]
    pub const fn location(&self) -> SourceLoc {
        self.lp_loc
    }

    /// Returns the source range, a point for simple names.
    #[must_use]
    pub const fn source_range(&self) -> SourceRange {
        SourceRange::new(self.lp_loc, self.rp_loc)
    }

    /// Returns true for a leaf.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.lp_loc == self.rp_loc
    }

    /// Returns the identifier of a leaf.
    ///
    /// # Panics
    ///
    /// Panics if the name is not simple.
    #[must_use]
    pub fn identifier(&self) -> Identifier {
        assert!(self.is_simple(), "identifier of a parenthesized var name");
        match self.storage {
            VarNameStorage::Name(name) => name,
            VarNameStorage::Elements(_) => unreachable!("simple var name without an identifier"),
        }
    }

    /// Returns the identifier of a leaf, `None` for a list.
    #[must_use]
    pub fn simple_identifier(&self) -> Option<Identifier> {
        match self.storage {
            VarNameStorage::Name(name) => Some(name),
            VarNameStorage::Elements(_) => None,
        }
    }

    /// Returns the elements of a list.
    ///
    /// # Panics
    ///
    /// Panics if the name is simple.
    #[must_use]
    pub fn elements(&self) -> &'a [&'a DeclVarName<'a>] {
        assert!(!self.is_simple(), "elements of a simple var name");
        match self.storage {
            VarNameStorage::Elements(elements) => elements,
            VarNameStorage::Name(_) => unreachable!("parenthesized var name without elements"),
        }
    }

    /// Calls `f` for every leaf in source order with the leaf's index path.
    ///
    /// ```
    /// use sable_ast::{AstContext, SourceLoc};
    /// use sable_ast::decl::DeclVarName;
    ///
    /// let ctx = AstContext::new();
    /// let a = DeclVarName::simple(&ctx, ctx.identifier("a"), SourceLoc::new(5))?;
    /// let b = DeclVarName::simple(&ctx, ctx.identifier("b"), SourceLoc::new(8))?;
    /// let name = DeclVarName::nested(&ctx, SourceLoc::new(4), &[a, b], SourceLoc::new(9))?;
    ///
    /// let mut paths = Vec::new();
    /// name.visit_leaves(&mut |path, _, _| paths.push(path.to_vec()));
    /// assert_eq!(paths, [vec![0], vec![1]]);
    /// # Ok::<(), sable_ast::DeclError>(())
    /// ```
    pub fn visit_leaves(&self, f: &mut impl FnMut(&[u32], Identifier, SourceLoc)) {
        let mut path = Vec::new();
        self.visit_leaves_at(&mut path, f);
    }

    fn visit_leaves_at(
        &self,
        path: &mut Vec<u32>,
        f: &mut impl FnMut(&[u32], Identifier, SourceLoc),
    ) {
        match self.storage {
            VarNameStorage::Name(name) => f(path, name, self.lp_loc),
            VarNameStorage::Elements(elements) => {
                for (index, element) in (0u32..).zip(elements) {
                    path.push(index);
                    element.visit_leaves_at(path, f);
                    path.pop();
                }
            }
        }
    }
}

impl Located for DeclVarName<'_> {
    fn loc_start(&self) -> SourceLoc {
        self.lp_loc
    }
}
