#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]
/*!
 * # arro
 * _arithmetic expression front end_. Turns source text into an abstract syntax tree.
 *
 * Expressions are made of integer and decimal literals, the four binary operators
 * `+ - * /`, unary signs and parentheses.
 * Multiplication and division bind tighter than addition and subtraction,
 * and all binary operators associate to the left.
 *
 * ```
 * let ast = arro::run("<stdin>", "-(1 + 2) * 3").unwrap();
 * assert_eq!(
 *     ast.to_string(),
 *     "((SUB --> (INT | 1 --> ADD --> INT | 2)) --> MUL --> INT | 3)"
 * );
 *
 * let err = arro::run("<stdin>", "(1 + 2").unwrap_err();
 * assert_eq!(err.to_string(), "Invalid Syntax | Expected ')'\nFN <stdin> | line #1");
 * ```
 *
 * ## Pipeline
 *
 * The [`lex`] module turns the text into a sequence of [`Token`]s, which always
 * ends with an `Eof` token. The [`parse`] module then builds an [`ast::Node`] out
 * of the tokens, by recursive descent.
 * Each stage stops at its first error. The parser never runs if lexing failed.
 *
 * Every token and error carries a [`Span`] of [`Pos`]itions, counted in characters.
 * [`Diagnostic`] binds an error to its [`Source`], to render it with its source name
 * and line.
 *
 * ## Crate features
 *
 *  - `diag`: implements `miette::Diagnostic` for [`Diagnostic`] and enables `run_diag`,
 *    which returns fancy reports pointing at the offending span.
 *
 * ## Logging
 *
 * Tokens and parsed productions are logged at `trace` level and the outcome of [`run`]
 * at `debug` level, through the [`log`](https://docs.rs/log) facade.
 */

pub mod ast;
mod diag;
mod input;
pub mod lex;
pub mod parse;

pub use diag::{DiagTrait, Diagnostic, ErrorKind, Source};
pub use input::{Cursor, Pos};
pub use lex::{Number, Span, Token, TokenKind};
pub use parse::{Error, Expected, Parser, parse};

/// Tokenize then parse `source_text` as a single expression.
///
/// On error, the returned [`Diagnostic`] is bound to a [`Source`] named `source_name`.
pub fn run(source_name: &str, source_text: &str) -> Result<ast::Node, Diagnostic> {
    let fail = |err: Error| {
        let diag = Diagnostic::new(err, Source::new(source_name, source_text));
        log::debug!("{}: {} at offset {}", source_name, diag.kind(), diag.start().offset);
        diag
    };

    let tokens = lex::tokenize(source_text).map_err(|err| fail(err.into()))?;
    log::debug!("{}: {} tokens", source_name, tokens.len());

    let node = Parser::new(tokens).parse().map_err(fail)?;
    let (start, end) = node.span();
    log::debug!("{}: parsed {}..{}", source_name, start.offset, end.offset);
    Ok(node)
}

#[cfg(feature = "diag")]
/// Same as [`run`], returning a `miette` report on error.
pub fn run_diag(source_name: &str, source_text: &str) -> miette::Result<ast::Node> {
    run(source_name, source_text).map_err(miette::Report::new)
}
