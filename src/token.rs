//! The [Token] type emitted by the [Tokenizer](crate::tokenizer::Tokenizer).
//!
//! A single record rather than an enum with a payload per variant: the CSS
//! Syntax Module's own per-token field tables (and this crate's
//! raw-fidelity invariant) call for a uniform `pos`/`raw`/`error` across
//! every token kind, which a payload-per-variant enum can't carry without
//! wrapping each variant individually. This module instead uses a
//! `TokenKind` discriminant plus a flat set of optional fields, with each
//! field's presence keyed to `kind` exactly as the CSS spec lays its own
//! field tables out per token type.

use crate::numeric::NumberValue;

/// The kind of a [Token], i.e. which CSS Syntax Module production it
/// represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Whitespace,
    Ident,
    Function,
    AtKeyword,
    Hash,
    String,
    BadString,
    Url,
    BadUrl,
    Delim,
    Number,
    Percentage,
    Dimension,
    UnicodeRange,
    IncludeMatch,
    DashMatch,
    PrefixMatch,
    SuffixMatch,
    SubstringMatch,
    Column,
    Cdo,
    Cdc,
    Colon,
    Semicolon,
    Comma,
    LeftSquare,
    RightSquare,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comment,
}

/// The type flag carried by a [TokenKind::Hash] token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashType {
    /// The hash's value would be a valid identifier on its own.
    Id,
    Unrestricted,
}

/// A single CSS token, produced by [tokenize](crate::tokenize) or
/// [Tokenizer::next_token](crate::tokenizer::Tokenizer::next_token).
///
/// `kind`, `pos`, and `raw` are present on every token. The remaining
/// fields are populated only for the kinds that carry them; see each
/// field's doc comment for which `kind`s set it.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,

    /// Code-point index of the start of this token in the preprocessed
    /// input.
    pub pos: usize,

    /// The literal substring of the preprocessed input this token was
    /// built from. Concatenating every emitted token's `raw` (including
    /// discarded comments and every `Whitespace` token) reproduces the
    /// preprocessed input exactly.
    pub raw: Option<Box<str>>,

    /// The decoded value: an ident/function/at-keyword/hash name, a
    /// string's or url's contents, a comment's text, or a one-character
    /// delim's character.
    pub value: Option<Box<str>>,

    /// The numeric value, set on `Number`, `Percentage`, and `Dimension`.
    pub number: Option<NumberValue>,

    /// The dimension's unit, set on `Dimension` only.
    pub unit: Option<Box<str>>,

    /// The number's original textual representation, set on `Number`,
    /// `Percentage`, and `Dimension`.
    pub repr: Option<Box<str>>,

    /// The inclusive `(start, end)` code point bounds of a `UnicodeRange`.
    pub unicode_range: Option<(u32, u32)>,

    /// Set on `Hash` tokens; see [HashType].
    pub hash_type: Option<HashType>,

    /// Whether this token represents (or was produced alongside) a parse
    /// error: set on `BadString`, `BadUrl`, on a `Delim` for a lone
    /// backslash, and on a truncated `Comment`.
    pub error: bool,
}

impl Token {
    pub(crate) fn empty(kind: TokenKind, pos: usize, raw: Option<Box<str>>) -> Self {
        Self {
            kind,
            pos,
            raw,
            value: None,
            number: None,
            unit: None,
            repr: None,
            unicode_range: None,
            hash_type: None,
            error: false,
        }
    }
}
