use crate::{TokensHarness, assert_dump_eq_ref};

#[test]
fn tokens_numbers() {
    assert_dump_eq_ref!(TokensHarness, "42 3.14 1.2.3", "tokens/numbers");
}

#[test]
fn tokens_operators() {
    assert_dump_eq_ref!(TokensHarness, "(1+2) * -3 / 4", "tokens/operators");
}

#[test]
fn tokens_blanks() {
    assert_dump_eq_ref!(TokensHarness, "\t 1 \t", "tokens/blanks");
}

#[test]
fn tokens_illegal() {
    assert_dump_eq_ref!(TokensHarness, "1 + $", "tokens/illegal");
}
