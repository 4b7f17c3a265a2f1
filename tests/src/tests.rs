use crate::{AstHarness, TokensHarness, assert_dump_eq_ref};

mod ast;
mod tokens;

#[test]
fn dumps_are_stable() {
    let input = "-(2.5 * (3 - 1)) / 4";
    assert_eq!(
        <AstHarness as crate::TestHarness>::dump(input),
        <AstHarness as crate::TestHarness>::dump(input)
    );
}

#[test]
fn single_number() {
    assert_dump_eq_ref!(TokensHarness, "7", "tokens/single");
    assert_dump_eq_ref!(AstHarness, "7", "ast/single");
}
