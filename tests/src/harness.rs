use std::path::{Path, PathBuf};

use arro::lex;

use crate::{SOURCE_NAME, dump_diag, dump_node, fmt_span};

#[cfg(feature = "regenerate-refs")]
const REGENERATE_REFS: bool = true;

#[cfg(not(feature = "regenerate-refs"))]
const REGENERATE_REFS: bool = false;

pub trait TestHarness {
    fn id() -> &'static str;
    fn dump_file_ext() -> &'static str;

    fn ref_file_path(ref_name: &str) -> PathBuf {
        let file_name = format!("{}{}", ref_name, Self::dump_file_ext());
        let tests_dir = env!("CARGO_MANIFEST_DIR");
        Path::new(tests_dir).join("refs").join(file_name)
    }

    fn actual_file_path(ref_name: &str) -> PathBuf {
        let file_name = format!("{}{}", ref_name, Self::dump_file_ext());
        let tests_dir = env!("CARGO_MANIFEST_DIR");
        Path::new(tests_dir).join("actual").join(file_name)
    }

    fn diff_file_path(ref_name: &str) -> PathBuf {
        let file_name = format!("{}{}.diff", ref_name, Self::dump_file_ext());
        let tests_dir = env!("CARGO_MANIFEST_DIR");
        Path::new(tests_dir).join("actual").join(file_name)
    }

    /// Textual dump of the pipeline stage output for `input`
    fn dump(input: &str) -> String;

    fn regenerate_refs() -> bool {
        REGENERATE_REFS || std::env::var("ARRO_TEST_REGENERATE_REFS").is_ok()
    }

    fn check_dump_eq_ref(input: &str, ref_name: &str) -> Result<(), String> {
        let ref_file = Self::ref_file_path(ref_name);
        let actual_file = Self::actual_file_path(ref_name);
        let diff_file = Self::diff_file_path(ref_name);

        let actual = Self::dump(input);

        if Self::regenerate_refs() {
            std::fs::create_dir_all(ref_file.parent().unwrap()).unwrap();
            std::fs::write(&ref_file, &actual).unwrap();
            remove_if_exists(&actual_file);
            remove_if_exists(&diff_file);
            return Ok(());
        }

        if !std::fs::exists(&ref_file).unwrap() {
            std::fs::create_dir_all(actual_file.parent().unwrap()).unwrap();
            std::fs::write(&actual_file, &actual).unwrap();
            return Err(format!(
                "No such {} ref: \"{}\"\n  Actual dump written to {}",
                Self::id(),
                ref_name,
                actual_file.display()
            ));
        }

        let expected = std::fs::read_to_string(&ref_file).unwrap();

        if actual != expected {
            let diff = similar::TextDiff::from_lines(expected.as_str(), actual.as_str());
            let udiff = diff
                .unified_diff()
                .header("ref", "actual")
                .to_string();
            std::fs::create_dir_all(actual_file.parent().unwrap()).unwrap();
            std::fs::write(&actual_file, &actual).unwrap();
            std::fs::write(&diff_file, &udiff).unwrap();

            Err(format!(
                "{} assertion failed for {:?}\n  Actual dump: {:?}\n     Ref dump: {:?}\n\n{}",
                Self::id(),
                input,
                actual_file,
                ref_file,
                udiff
            ))
        } else {
            remove_if_exists(&actual_file);
            remove_if_exists(&diff_file);
            Ok(())
        }
    }
}

fn remove_if_exists(file: &Path) {
    if std::fs::exists(file).unwrap() {
        std::fs::remove_file(file).unwrap();
    }
}

/// Dumps the token sequence, one token per line
pub struct TokensHarness;

impl TestHarness for TokensHarness {
    fn id() -> &'static str {
        "TOKENS"
    }

    fn dump_file_ext() -> &'static str {
        ".txt"
    }

    fn dump(input: &str) -> String {
        match lex::tokenize(input) {
            Ok(tokens) => tokens
                .iter()
                .map(|tok| format!("{} {}\n", fmt_span(tok.span), tok))
                .collect(),
            Err(err) => {
                let diag = arro::Diagnostic::new(err, arro::Source::new(SOURCE_NAME, input));
                dump_diag(&diag)
            }
        }
    }
}

/// Dumps the syntax tree, one node per line, children indented under their parent
pub struct AstHarness;

impl TestHarness for AstHarness {
    fn id() -> &'static str {
        "AST"
    }

    fn dump_file_ext() -> &'static str {
        ".txt"
    }

    fn dump(input: &str) -> String {
        match arro::run(SOURCE_NAME, input) {
            Ok(node) => {
                let mut out = String::new();
                dump_node(&node, 0, &mut out);
                out
            }
            Err(diag) => dump_diag(&diag),
        }
    }
}
