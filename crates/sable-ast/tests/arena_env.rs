// Arena chunk size from the environment
//
// `AstContext::new` reads SABLE_ARENA_CHUNK. This binary holds a single test
// so nothing else reads the environment while it is modified.

use sable_ast::AstContext;
use sable_ast::context::{ARENA_CHUNK_ENV, DEFAULT_AST_CHUNK_SIZE};

#[test]
fn test_new_context_reads_chunk_size() {
    // SAFETY: the only test in this binary, so no other thread touches the
    // environment.
    unsafe { std::env::set_var(ARENA_CHUNK_ENV, "1048576") };
    assert_eq!(AstContext::new().stats().total_capacity, 1024 * 1024);

    unsafe { std::env::set_var(ARENA_CHUNK_ENV, "0") };
    assert_eq!(AstContext::new().stats().total_capacity, DEFAULT_AST_CHUNK_SIZE);

    unsafe { std::env::set_var(ARENA_CHUNK_ENV, "plenty") };
    assert_eq!(AstContext::new().stats().total_capacity, DEFAULT_AST_CHUNK_SIZE);

    unsafe { std::env::remove_var(ARENA_CHUNK_ENV) };
    assert_eq!(AstContext::new().stats().total_capacity, DEFAULT_AST_CHUNK_SIZE);
}
