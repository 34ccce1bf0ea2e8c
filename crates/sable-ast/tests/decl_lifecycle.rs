// Declaration lifecycle tests
//
// These tests build small compilation units the way the parser and the
// type checker would: create declarations in a translation unit, resolve
// their types later, and query them through the `Decl` handle.

use sable_ast::decl::{
    AccessPathElement, ArgDecl, Associativity, DeclAttributes, DeclFamily, DeclVarName,
    ElementRefDecl, FuncDecl, ImportDecl, InfixData, OneOfElementDecl, PathLookup, TypeAliasDecl,
    TypeState, VarDecl,
};
use sable_ast::{
    AstContext, AstContextOptions, BuiltinKind, Decl, DeclContextKind, DeclError, DeclKind,
    Located, SourceLoc, SourceRange, TupleElement,
};

fn loc(offset: u32) -> SourceLoc {
    SourceLoc::new(offset)
}

mod import_tests {
    use super::*;

    fn dotted_path(ctx: &AstContext, len: usize) -> Vec<AccessPathElement> {
        (0..len)
            .map(|i| {
                let offset = 7 + 2 * i as u32;
                AccessPathElement::new(ctx.identifier(&format!("m{i}")), loc(offset))
            })
            .collect()
    }

    /// `import a.b.c` keeps its components and locations in order
    #[test]
    fn test_import_a_b_c() {
        let ctx = AstContext::new();
        let unit = ctx.create_translation_unit();
        let path = [
            AccessPathElement::new(ctx.identifier("a"), loc(7)),
            AccessPathElement::new(ctx.identifier("b"), loc(9)),
            AccessPathElement::new(ctx.identifier("c"), loc(11)),
        ];

        let import = ImportDecl::create(unit, loc(0), &path);
        let decl = Decl::from(import);

        assert_eq!(decl.kind(), DeclKind::Import);
        assert_eq!(decl.loc_start(), loc(0));
        assert!(decl.as_named().is_none());
        assert!(decl.as_value().is_none());
        assert!(std::ptr::eq(decl.decl_context(), unit));

        let names: Vec<_> = import
            .access_path()
            .iter()
            .map(|element| ctx.identifier_text(element.name))
            .collect();
        assert_eq!(names, [Some("a"), Some("b"), Some("c")]);
        assert_eq!(import.access_path()[2].loc, loc(11));
    }

    /// Paths of any length round-trip through a single allocation
    #[test]
    fn test_import_path_lengths() {
        let ctx = AstContext::new();
        let unit = ctx.create_translation_unit();

        for len in [0, 1, 5] {
            let path = dotted_path(&ctx, len);
            let before = ctx.stats().allocation_count;
            let import = ImportDecl::create(unit, loc(0), &path);

            assert_eq!(ctx.stats().allocation_count, before + 1);
            assert_eq!(import.access_path(), path.as_slice());
        }
    }
}

mod taxonomy_tests {
    use super::*;

    /// Every concrete kind answers the family queries from its tag range
    #[test]
    fn test_kind_sweep() {
        let ctx = AstContext::new();
        let unit = ctx.create_translation_unit();
        let name = ctx.identifier("n");
        let attrs = DeclAttributes::new();
        let var = VarDecl::create(unit, loc(0), name, None, None, attrs);

        let decls: Vec<Decl<'_>> = vec![
            ImportDecl::create(unit, loc(0), &[]).into(),
            TypeAliasDecl::create(unit, loc(0), name, None, attrs).into(),
            var.into(),
            FuncDecl::create(unit, loc(0), name, None, None, attrs).into(),
            OneOfElementDecl::create(unit, loc(0), name, None, None).into(),
            ArgDecl::create(unit, loc(0), name, None).into(),
            ElementRefDecl::create(unit, var, loc(0), name, &[], None).into(),
        ];

        let kinds: Vec<_> = decls.iter().map(|d| d.kind()).collect();
        assert_eq!(kinds, DeclKind::ALL);

        for decl in decls {
            for family in DeclFamily::ALL {
                assert_eq!(decl.is(family), decl.kind().is_in(family));
            }
            assert_eq!(decl.as_named().is_some(), decl.kind() != DeclKind::Import);
            assert_eq!(
                decl.as_value().is_some(),
                !matches!(decl.kind(), DeclKind::Import | DeclKind::TypeAlias)
            );
        }
    }
}

mod resolution_tests {
    use super::*;

    /// The parser leaves types unresolved; the checker fills them once
    #[test]
    fn test_late_resolution() {
        let ctx = AstContext::new();
        let unit = ctx.create_translation_unit();
        let int = ctx.builtin_type(BuiltinKind::Int);
        let float = ctx.builtin_type(BuiltinKind::Float);

        let x = VarDecl::create(unit, loc(0), ctx.identifier("x"), None, None, DeclAttributes::new());
        let decl = Decl::from(x);
        let value = decl.as_value().unwrap();

        assert_eq!(value.type_state(), TypeState::Unresolved);
        assert_eq!(
            value.overwrite_type(int),
            Err(DeclError::TypeNotResolved {
                kind: DeclKind::Var
            })
        );

        value.set_type(int).unwrap();
        assert_eq!(x.ty(), int);
        assert!(value.set_type(float).is_err());

        assert_eq!(value.overwrite_type(float), Ok(int));
        assert_eq!(x.ty(), float);
    }

    /// Explicit types written in source are resolved at creation
    #[test]
    fn test_explicit_types() {
        let ctx = AstContext::new();
        let unit = ctx.create_translation_unit();
        let int = ctx.builtin_type(BuiltinKind::Int);
        let unit_ty = ctx.tuple_type(&[]);
        let func_ty = ctx.function_type(ctx.tuple_type(&[TupleElement::named(ctx.identifier("x"), int)]), unit_ty);

        let body = unit.create_child(DeclContextKind::Function);
        let f = FuncDecl::create(unit, loc(0), ctx.identifier("f"), Some(func_ty), None, DeclAttributes::new());
        let arg = ArgDecl::create(body, loc(0), ctx.identifier("x"), Some(int));

        assert_eq!(f.ty(), func_ty);
        assert_eq!(arg.ty(), int);
        assert!(std::ptr::eq(arg.decl_context().parent().unwrap(), unit));
    }

    /// oneof elements pair an element type with an optional argument type
    #[test]
    fn test_oneof_elements() {
        let ctx = AstContext::new();
        let unit = ctx.create_translation_unit();
        let scope = unit.create_child(DeclContextKind::OneOf);
        let int = ctx.builtin_type(BuiltinKind::Int);
        let alias = TypeAliasDecl::create(unit, loc(0), ctx.identifier("Maybe"), None, DeclAttributes::new());
        let maybe = alias.alias_type();

        let none = OneOfElementDecl::create(scope, loc(20), ctx.identifier("None"), Some(maybe), None);
        let some = OneOfElementDecl::create(
            scope,
            loc(26),
            ctx.identifier("Some"),
            Some(ctx.function_type(int, maybe)),
            Some(int),
        );

        assert!(none.argument_type().is_none());
        assert_eq!(some.argument_type(), Some(int));
        assert!(none.ty().is_dependent());
    }
}

mod destructuring_tests {
    use super::*;

    /// `var (a, (b, c)) : (Int, (Bool, Float))` binds three element refs
    #[test]
    fn test_destructuring_var() {
        let ctx = AstContext::new();
        let unit = ctx.create_translation_unit();
        let int = ctx.builtin_type(BuiltinKind::Int);
        let bool_ty = ctx.builtin_type(BuiltinKind::Bool);
        let float = ctx.builtin_type(BuiltinKind::Float);

        let a = DeclVarName::simple(&ctx, ctx.identifier("a"), loc(5)).unwrap();
        let b = DeclVarName::simple(&ctx, ctx.identifier("b"), loc(9)).unwrap();
        let c = DeclVarName::simple(&ctx, ctx.identifier("c"), loc(12)).unwrap();
        let inner = DeclVarName::nested(&ctx, loc(8), &[b, c], loc(13)).unwrap();
        let name = DeclVarName::nested(&ctx, loc(4), &[a, inner], loc(14)).unwrap();

        let inner_ty = ctx.tuple_type(&[TupleElement::unnamed(bool_ty), TupleElement::unnamed(float)]);
        let ty = ctx.tuple_type(&[TupleElement::unnamed(int), TupleElement::unnamed(inner_ty)]);
        let var = VarDecl::create_nested(unit, loc(0), name, Some(ty), None, DeclAttributes::new());

        assert!(var.name().is_empty());
        assert_eq!(var.nested_name().unwrap().source_range(), SourceRange::new(loc(4), loc(14)));

        let refs = ElementRefDecl::create_for_leaves(unit, var);
        let summary: Vec<_> = refs
            .iter()
            .map(|r| (ctx.identifier_text(r.name()), r.access_path().to_vec(), r.type_if_resolved()))
            .collect();

        assert_eq!(
            summary,
            [
                (Some("a"), vec![0], Some(int)),
                (Some("b"), vec![1, 0], Some(bool_ty)),
                (Some("c"), vec![1, 1], Some(float)),
            ]
        );
        assert_eq!(refs[2].loc_start(), loc(12));
    }

    /// Paths of length 0, 1 and 5 through nested tuples
    #[test]
    fn test_path_depths() {
        let ctx = AstContext::new();
        let int = ctx.builtin_type(BuiltinKind::Int);

        let mut ty = int;
        for _ in 0..5 {
            ty = ctx.tuple_type(&[TupleElement::unnamed(ty)]);
        }

        assert_eq!(ElementRefDecl::type_for_path(ty, &[]), PathLookup::Resolved(ty));
        assert!(ElementRefDecl::type_for_path(ty, &[0]).resolved().unwrap().as_tuple().is_some());
        assert_eq!(ElementRefDecl::type_for_path(ty, &[0; 5]), PathLookup::Resolved(int));
        assert_eq!(ElementRefDecl::type_for_path(ty, &[0, 0, 0, 0, 1]), PathLookup::Invalid);
        assert_eq!(ElementRefDecl::type_for_path(ty, &[0; 6]), PathLookup::Invalid);
    }

    /// `{a: Int, b: {c: Bool}}` with paths `[1, 0]`, `[5]` and through a placeholder
    #[test]
    fn test_labelled_tuple_paths() {
        let ctx = AstContext::new();
        let int = ctx.builtin_type(BuiltinKind::Int);
        let bool_ty = ctx.builtin_type(BuiltinKind::Bool);
        let inner = ctx.tuple_type(&[TupleElement::named(ctx.identifier("c"), bool_ty)]);
        let ty = ctx.tuple_type(&[
            TupleElement::named(ctx.identifier("a"), int),
            TupleElement::named(ctx.identifier("b"), inner),
        ]);

        assert_eq!(ElementRefDecl::type_for_path(ty, &[1, 0]), PathLookup::Resolved(bool_ty));
        assert_eq!(ElementRefDecl::type_for_path(ty, &[5]), PathLookup::Invalid);

        let partial = ctx.tuple_type(&[
            TupleElement::unnamed(int),
            TupleElement::unnamed(ctx.dependent_type()),
        ]);
        assert_eq!(ElementRefDecl::type_for_path(partial, &[1, 5]), PathLookup::Dependent);
        assert_ne!(PathLookup::Dependent, PathLookup::Invalid);
    }

    /// Malformed names are reported, not built
    #[test]
    fn test_malformed_names() {
        let ctx = AstContext::new();

        assert_eq!(
            DeclVarName::nested(&ctx, loc(4), &[], loc(5)).unwrap_err(),
            DeclError::EmptyVarNameList { loc: loc(4) }
        );
    }
}

mod attribute_tests {
    use super::*;

    /// `[infix_left=190] func + ...`
    #[test]
    fn test_infix_operator() {
        let ctx = AstContext::new();
        let unit = ctx.create_translation_unit();
        let attrs = DeclAttributes::new()
            .with_brackets(SourceRange::new(loc(0), loc(15)))
            .with_infix(InfixData::new(190, Associativity::Left));

        let plus = FuncDecl::create(unit, loc(17), ctx.identifier("+"), None, None, attrs);
        let decl = Decl::from(plus);
        let named = decl.as_named().unwrap();

        assert!(named.is_operator());
        assert!(named.attrs().is_infix());
        assert!(named.attrs().infix_data().is_left_associative());
        assert_eq!(named.attrs().infix_data().precedence(), 190);
        assert_eq!(named.attrs().bracket_range.map(|r| r.end), Some(loc(15)));
    }
}

mod context_tests {
    use super::*;

    /// Separate contexts hand out separate singletons
    #[test]
    fn test_contexts_are_independent() {
        let first = AstContext::with_options(AstContextOptions { chunk_size: 8192 });
        let second = AstContext::new();

        assert_ne!(
            first.builtin_type(BuiltinKind::Int),
            second.builtin_type(BuiltinKind::Int)
        );
    }

    /// Building many declarations grows the arena and keeps earlier nodes
    #[test]
    fn test_many_declarations() {
        let ctx = AstContext::with_options(AstContextOptions { chunk_size: 8192 });
        let unit = ctx.create_translation_unit();

        let vars: Vec<_> = (0..2_000u32)
            .map(|i| {
                VarDecl::create(
                    unit,
                    loc(i),
                    ctx.identifier(&format!("v{i}")),
                    None,
                    None,
                    DeclAttributes::new(),
                )
            })
            .collect();

        assert!(ctx.stats().chunk_count > 1);
        assert_eq!(vars[0].loc_start(), loc(0));
        assert_eq!(ctx.identifier_text(vars[1999].name()), Some("v1999"));
    }

    /// A destructuring `var` and its element references stay in one context
    #[test]
    fn test_destructuring_stays_in_one_context() {
        let ctx = AstContext::new();
        let unit = ctx.create_translation_unit();

        let a = DeclVarName::simple(&ctx, ctx.identifier("a"), loc(5)).unwrap();
        let name = DeclVarName::nested(&ctx, loc(4), &[a], loc(6)).unwrap();
        let var = VarDecl::create_nested(unit, loc(0), name, None, None, DeclAttributes::new());
        let refs = ElementRefDecl::create_for_leaves(unit, var);

        assert!(ctx.owns(name));
        assert!(ctx.owns(var));
        assert!(refs.iter().all(|r| ctx.owns(*r)));
        assert!(std::ptr::eq(refs[0].ast_context(), var.ast_context()));
        assert_eq!(ctx.identifier_text(refs[0].name()), Some("a"));
    }

    /// A name tree from one unit cannot be bound in another
    #[test]
    #[should_panic(expected = "var name element from another AST context")]
    fn test_name_tree_across_contexts_panics() {
        let first = AstContext::new();
        let second = AstContext::new();
        let leaf = DeclVarName::simple(&second, second.identifier("a"), loc(5)).unwrap();

        let _ = DeclVarName::nested(&first, loc(4), &[leaf], loc(6));
    }

    /// An element reference cannot point at a `var` of another unit
    #[test]
    #[should_panic(expected = "element reference to a var of another AST context")]
    fn test_element_ref_across_contexts_panics() {
        let first = AstContext::new();
        let second = AstContext::new();
        let first_unit = first.create_translation_unit();
        let second_unit = second.create_translation_unit();

        let leaf = DeclVarName::simple(&second, second.identifier("a"), loc(5)).unwrap();
        let name = DeclVarName::nested(&second, loc(4), &[leaf], loc(6)).unwrap();
        let var = VarDecl::create_nested(second_unit, loc(0), name, None, None, DeclAttributes::new());

        ElementRefDecl::create(first_unit, var, loc(5), first.identifier("zz"), &[0], None);
    }

    /// A list cannot take the same element twice
    #[test]
    fn test_repeated_name_element() {
        let ctx = AstContext::new();
        let leaf = DeclVarName::simple(&ctx, ctx.identifier("a"), loc(5)).unwrap();

        assert_eq!(
            DeclVarName::nested(&ctx, loc(4), &[leaf, leaf], loc(9)).unwrap_err(),
            DeclError::SharedVarNameElement { loc: loc(5) }
        );
    }
}
