use core::fmt;

use crate::{Pos, Span, lex, parse};

/// Category of a pipeline error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A character that no token starts with
    IllegalCharacter,
    /// A token where the grammar does not allow it
    InvalidSyntax,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::IllegalCharacter => f.write_str("Illegal Character"),
            ErrorKind::InvalidSyntax => f.write_str("Invalid Syntax"),
        }
    }
}

pub trait DiagTrait: fmt::Debug + fmt::Display {
    fn kind(&self) -> ErrorKind;
    fn span(&self) -> Span;
    fn message(&self) -> String;
    fn help(&self) -> Option<String> {
        None
    }
}

impl DiagTrait for lex::Error {
    fn kind(&self) -> ErrorKind {
        match self {
            lex::Error::IllegalChar { .. } => ErrorKind::IllegalCharacter,
        }
    }

    fn span(&self) -> Span {
        lex::Error::span(self)
    }

    fn message(&self) -> String {
        format!("{}", self)
    }
}

/// Name and text of a parsed input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: Option<String>,
    pub src: String,
}

impl Source {
    pub fn new(name: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            src: src.into(),
        }
    }

    pub fn anonymous(src: impl Into<String>) -> Self {
        Self {
            name: None,
            src: src.into(),
        }
    }

    /// The name used in reports
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<stdin>")
    }

    /// Byte offset of the character at `offset`, or the text length past the end
    pub fn byte_offset(&self, offset: usize) -> usize {
        self.src
            .char_indices()
            .nth(offset)
            .map(|(idx, _)| idx)
            .unwrap_or(self.src.len())
    }
}

/// An error bound to the source it was found in.
///
/// Displays as:
/// ```text
/// {kind} | {message}
/// FN {source name} | line #{line}
/// ```
/// where the line is 1-based.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    error: parse::Error,
    source: Source,
}

impl Diagnostic {
    pub fn new(error: impl Into<parse::Error>, source: Source) -> Self {
        Self {
            error: error.into(),
            source,
        }
    }

    pub fn error(&self) -> &parse::Error {
        &self.error
    }

    pub fn into_error(self) -> parse::Error {
        self.error
    }

    pub fn input(&self) -> &Source {
        &self.source
    }

    pub fn source_name(&self) -> &str {
        self.source.display_name()
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    pub fn span(&self) -> Span {
        self.error.span()
    }

    pub fn start(&self) -> Pos {
        self.span().0
    }

    pub fn end(&self) -> Pos {
        self.span().1
    }

    pub fn message(&self) -> String {
        self.error.message()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.kind(), self.message())?;
        write!(
            f,
            "\nFN {} | line #{}",
            self.source_name(),
            self.start().line + 1
        )
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(feature = "diag")]
mod report {
    use core::fmt;

    use miette::MietteSpanContents;

    use super::{DiagTrait, Diagnostic, Source};

    impl miette::SourceCode for Source {
        fn read_span<'a>(
            &'a self,
            span: &miette::SourceSpan,
            context_lines_before: usize,
            context_lines_after: usize,
        ) -> Result<Box<dyn miette::SpanContents<'a> + 'a>, miette::MietteError> {
            let start = span.offset();
            let end = start + span.len();

            if start > self.src.len() || end > self.src.len() || start > end {
                return Err(miette::MietteError::OutOfBounds);
            }

            let content = <str as miette::SourceCode>::read_span(
                &self.src,
                span,
                context_lines_before,
                context_lines_after,
            )?;
            if let Some(name) = self.name.as_deref() {
                let content = MietteSpanContents::new_named(
                    name.to_string(),
                    content.data(),
                    *content.span(),
                    content.line(),
                    content.column(),
                    content.line_count(),
                )
                .with_language("arro");
                Ok(Box::new(content))
            } else {
                Ok(content)
            }
        }
    }

    impl miette::Diagnostic for Diagnostic {
        fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
            Some(Box::new(self.kind()))
        }

        fn severity(&self) -> Option<miette::Severity> {
            Some(miette::Severity::Error)
        }

        fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
            self.error
                .help()
                .map(|h| Box::new(h) as Box<dyn fmt::Display>)
        }

        fn labels<'a>(&'a self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + 'a>> {
            // positions count characters, miette wants bytes
            let (start, end) = self.span();
            let start = self.source.byte_offset(start.offset);
            let end = self.source.byte_offset(end.offset);
            let labeled_span =
                miette::LabeledSpan::new(Some(self.message()), start, end - start);
            Some(Box::new(std::iter::once(labeled_span)))
        }

        fn source_code(&self) -> Option<&dyn miette::SourceCode> {
            Some(&self.source as &dyn miette::SourceCode)
        }
    }

}
