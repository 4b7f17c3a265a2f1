use crate::{AstHarness, assert_dump_eq_ref};

#[test]
fn ast_precedence() {
    assert_dump_eq_ref!(AstHarness, "1 + 2 * 3", "ast/precedence");
}

#[test]
fn ast_grouping() {
    assert_dump_eq_ref!(AstHarness, "(1 + 2) * 3", "ast/grouping");
}

#[test]
fn ast_unary() {
    assert_dump_eq_ref!(AstHarness, "-3 + 4", "ast/unary");
}

#[test]
fn ast_nested() {
    assert_dump_eq_ref!(AstHarness, "-(2.5 * (3 - 1)) / 4", "ast/nested");
}

#[test]
fn ast_missing_paren() {
    assert_dump_eq_ref!(AstHarness, "(1 + 2", "ast/missing-paren");
}

#[test]
fn ast_trailing_token() {
    assert_dump_eq_ref!(AstHarness, "1 2", "ast/trailing-token");
}

#[test]
fn ast_empty() {
    assert_dump_eq_ref!(AstHarness, "", "ast/empty");
}

#[test]
fn ast_illegal_char() {
    assert_dump_eq_ref!(AstHarness, "2 # 3", "ast/illegal-char");
}
