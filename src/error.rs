//! Parse-error vocabulary.
//!
//! Tokenization never fails (see the crate-level docs); a "parse error" is
//! CSS-spec jargon for a recoverable condition that's recorded on a token
//! (`error: true`, or a `BadString`/`BadUrl` kind) and logged via
//! `log::warn!(target: "css", ...)`. This module gives those log records
//! one shared, greppable vocabulary instead of an ad hoc message per call
//! site.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ParseErrorKind {
    EofInEscapedCodepoint,
    EofInUrl,
    EofInString,
    EofInComment,
    IllegalCharacterInUrl,
    InvalidEscapeBackslash,
    NewlineInString,
}

impl ParseErrorKind {
    fn message(self) -> &'static str {
        match self {
            Self::EofInEscapedCodepoint => "EOF in escaped codepoint",
            Self::EofInUrl => "EOF in URL token",
            Self::EofInString => "EOF in string token",
            Self::EofInComment => "EOF in comment",
            Self::IllegalCharacterInUrl => "illegal character in URL token",
            Self::InvalidEscapeBackslash => "backslash does not start a valid escape",
            Self::NewlineInString => "newline in string token",
        }
    }
}

pub(crate) fn parse_error(kind: ParseErrorKind) {
    log::warn!(target: "css", "Parse Error: {}", kind.message());
}
