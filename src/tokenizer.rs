//! The CSS token state machine.
//!
//! <https://drafts.csswg.org/css-syntax/#tokenization>
//!
//! `next_token` dispatches on the current character and delegates to a
//! `consume_*` sub-routine per production (`consume_ident`,
//! `consume_escaped`, `consume_number`, `consume_numeric`, `consume_url`,
//! `consume_bad_url`, `consume_ident` for the url-function special case,
//! `consume_string`, `consume_comments`), built on the standalone [Scanner]
//! rather than inlined cursor arithmetic, and constructs a uniform [Token]
//! record instead of a payload-per-kind representation.

use crate::classify::{
    is_digit, is_name_code_point, is_name_start_code_point, is_newline,
    is_non_printable_code_point, is_plus_or_minus, is_whitespace,
};
use crate::error::{parse_error, ParseErrorKind};
use crate::numeric::{convert_string_to_number, NumberType, NumberValue};
use crate::options::TokenizeOptions;
use crate::preprocess::{preprocess, Input};
use crate::scanner::{is_valid_escape, Scanner};
use crate::token::{HashType, Token, TokenKind};

const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Tokenizes `input` in one shot, per `options`, returning every token in
/// source order.
///
/// <https://drafts.csswg.org/css-syntax/#tokenizer-definitions>
pub fn tokenize(input: impl Into<Input>, options: TokenizeOptions) -> Vec<Token> {
    Tokenizer::new(input, options).collect()
}

/// Drives the CSS token state machine over preprocessed input.
///
/// Implements [Iterator] so callers who don't want to collect a [Vec] up
/// front can pull tokens one at a time.
pub struct Tokenizer {
    scanner: Scanner,
    options: TokenizeOptions,
}

impl Tokenizer {
    pub fn new(input: impl Into<Input>, options: TokenizeOptions) -> Self {
        let code_points = preprocess(input.into());
        Self {
            scanner: Scanner::new(code_points),
            options,
        }
    }

    /// <https://drafts.csswg.org/css-syntax/#consume-a-token>
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            if self.scanner.eos() {
                return None;
            }

            self.scanner.mark();

            if let Some(comment) = self.consume_comments() {
                if self.options.preserve_comments {
                    return Some(comment);
                }
                continue;
            }

            if matches!(self.scanner.peek(), Some(c) if is_whitespace(c)) {
                self.scanner.consume();
                return Some(self.finish(TokenKind::Whitespace));
            }

            let c = self.scanner.consume().expect("checked eos() above");
            return Some(self.dispatch(c));
        }
    }

    fn finish(&mut self, kind: TokenKind) -> Token {
        Token::empty(
            kind,
            self.scanner.marker(),
            self.scanner.marked().map(String::into_boxed_str),
        )
    }

    fn delim(&mut self, c: char) -> Token {
        let mut token = self.finish(TokenKind::Delim);
        token.value = Some(c.to_string().into_boxed_str());
        token
    }

    fn dispatch(&mut self, c: char) -> Token {
        match c {
            '"' | '\'' => self.consume_string(c),
            '#' => self.consume_hash(),
            '(' => self.finish(TokenKind::LeftParen),
            ')' => self.finish(TokenKind::RightParen),
            '[' => self.finish(TokenKind::LeftSquare),
            ']' => self.finish(TokenKind::RightSquare),
            '{' => self.finish(TokenKind::LeftBrace),
            '}' => self.finish(TokenKind::RightBrace),
            ',' => self.finish(TokenKind::Comma),
            ':' => self.finish(TokenKind::Colon),
            ';' => self.finish(TokenKind::Semicolon),
            '$' => self.consume_match_operator(TokenKind::SuffixMatch, '$'),
            '^' => self.consume_match_operator(TokenKind::PrefixMatch, '^'),
            '~' => self.consume_match_operator(TokenKind::IncludeMatch, '~'),
            '*' => self.consume_star(),
            '|' => self.consume_pipe(),
            '+' | '.' => self.consume_plus_or_dot(c),
            '-' => self.consume_hyphen(),
            '<' => self.consume_lt(),
            '@' => self.consume_at(),
            '\\' => self.consume_backslash(),
            'u' | 'U' => self.consume_u(),
            c if is_digit(c) => {
                self.scanner.reconsume();
                self.consume_numeric()
            },
            c if is_name_start_code_point(c) => {
                self.scanner.reconsume();
                self.consume_ident()
            },
            c => self.delim(c),
        }
    }

    // -- comments --------------------------------------------------------

    /// <https://drafts.csswg.org/css-syntax/#consume-comment>
    ///
    /// Returns `None` if the current position doesn't start a comment.
    /// Otherwise always consumes the whole comment (through its closing
    /// `*/`, or through EOF) and returns a `Comment` token, leaving the
    /// caller to decide whether to surface or discard it per
    /// `preserve_comments`.
    fn consume_comments(&mut self) -> Option<Token> {
        if self.scanner.peek() != Some('/') || self.scanner.peek1() != Some('*') {
            return None;
        }
        self.scanner.consume();
        self.scanner.consume();

        let mut value = String::new();
        loop {
            if self.scanner.eos() {
                parse_error(ParseErrorKind::EofInComment);
                let mut token = self.finish(TokenKind::Comment);
                token.value = Some(value.into_boxed_str());
                token.error = true;
                return Some(token);
            }

            if self.scanner.scan_two_char('*', '/') {
                let mut token = self.finish(TokenKind::Comment);
                token.value = Some(value.into_boxed_str());
                return Some(token);
            }

            value.push(self.scanner.consume().expect("checked eos() above"));
        }
    }

    // -- single/double-char dispatch helpers ------------------------------

    fn consume_match_operator(&mut self, kind: TokenKind, c: char) -> Token {
        if self.scanner.peek() == Some('=') {
            self.scanner.consume();
            self.finish(kind)
        } else {
            self.delim(c)
        }
    }

    fn consume_star(&mut self) -> Token {
        if self.scanner.peek() == Some('=') {
            self.scanner.consume();
            return self.finish(TokenKind::SubstringMatch);
        }

        if self.options.preserve_hacks
            && matches!(self.scanner.peek(), Some(c) if is_name_start_code_point(c))
        {
            self.scanner.reconsume();
            return self.consume_ident();
        }

        self.delim('*')
    }

    fn consume_pipe(&mut self) -> Token {
        match self.scanner.peek() {
            Some('=') => {
                self.scanner.consume();
                self.finish(TokenKind::DashMatch)
            },
            Some('|') => {
                self.scanner.consume();
                self.finish(TokenKind::Column)
            },
            _ => self.delim('|'),
        }
    }

    fn consume_plus_or_dot(&mut self, c: char) -> Token {
        if starts_number(self.scanner.current(), self.scanner.peek(), self.scanner.peek1()) {
            self.scanner.reconsume();
            self.consume_numeric()
        } else {
            self.delim(c)
        }
    }

    fn consume_hyphen(&mut self) -> Token {
        if starts_number(self.scanner.current(), self.scanner.peek(), self.scanner.peek1()) {
            self.scanner.reconsume();
            return self.consume_numeric();
        }

        if self.scanner.peek() == Some('-') && self.scanner.peek1() == Some('>') {
            self.scanner.consume();
            self.scanner.consume();
            return self.finish(TokenKind::Cdc);
        }

        if starts_identifier(self.scanner.current(), self.scanner.peek(), self.scanner.peek1()) {
            self.scanner.reconsume();
            return self.consume_ident();
        }

        self.delim('-')
    }

    fn consume_lt(&mut self) -> Token {
        if self.scanner.peekn(3) == "!--" {
            self.scanner.consume();
            self.scanner.consume();
            self.scanner.consume();
            return self.finish(TokenKind::Cdo);
        }

        self.delim('<')
    }

    fn consume_at(&mut self) -> Token {
        if starts_identifier(
            self.scanner.peek(),
            self.scanner.peek1(),
            self.scanner.peek_at(2),
        ) {
            let value = self.consume_name();
            let mut token = self.finish(TokenKind::AtKeyword);
            token.value = Some(value.into_boxed_str());
            token
        } else {
            self.delim('@')
        }
    }

    fn consume_backslash(&mut self) -> Token {
        if is_valid_escape(self.scanner.current(), self.scanner.peek()) {
            self.scanner.reconsume();
            self.consume_ident()
        } else {
            parse_error(ParseErrorKind::InvalidEscapeBackslash);
            let mut token = self.delim('\\');
            token.error = true;
            token
        }
    }

    fn consume_u(&mut self) -> Token {
        if self.scanner.unicode_range_start() {
            self.scanner.consume();
            self.consume_unicode_range()
        } else {
            self.scanner.reconsume();
            self.consume_ident()
        }
    }

    fn consume_hash(&mut self) -> Token {
        let starts_hash = matches!(self.scanner.peek(), Some(c) if is_name_code_point(c))
            || is_valid_escape(self.scanner.peek(), self.scanner.peek1());

        if !starts_hash {
            return self.delim('#');
        }

        let hash_type = if starts_identifier(
            self.scanner.peek(),
            self.scanner.peek1(),
            self.scanner.peek_at(2),
        ) {
            HashType::Id
        } else {
            HashType::Unrestricted
        };

        let value = self.consume_name();
        let mut token = self.finish(TokenKind::Hash);
        token.value = Some(value.into_boxed_str());
        token.hash_type = Some(hash_type);
        token
    }

    // -- name / escape -----------------------------------------------------

    /// <https://drafts.csswg.org/css-syntax/#consume-an-ident-sequence>
    fn consume_name(&mut self) -> String {
        let mut result = String::new();

        loop {
            if let Some(chunk) = self.scanner.scan_while(is_name_code_point) {
                result.push_str(&chunk);
            }

            match self.scanner.peek() {
                Some(c) if is_valid_escape(Some(c), self.scanner.peek1()) => {
                    self.scanner.consume();
                    result.push(self.consume_escaped());
                },
                Some('*') if self.options.preserve_hacks => {
                    self.scanner.consume();
                    if let Some(next) = self.scanner.consume() {
                        result.push(next);
                    }
                },
                _ => break,
            }
        }

        result
    }

    /// <https://drafts.csswg.org/css-syntax/#consume-escaped-code-point>
    ///
    /// Assumes the leading `\` has already been consumed.
    fn consume_escaped(&mut self) -> char {
        if self.scanner.eos() {
            parse_error(ParseErrorKind::EofInEscapedCodepoint);
            return REPLACEMENT_CHARACTER;
        }

        if let Some(hex) = self.scanner.scan_hex() {
            if matches!(self.scanner.peek(), Some(c) if is_whitespace(c)) {
                self.scanner.consume();
            }

            let code_point = u32::from_str_radix(&hex, 16).unwrap_or(0);
            if code_point == 0 || crate::classify::is_surrogate(code_point) || code_point > 0x10FFFF
            {
                return REPLACEMENT_CHARACTER;
            }

            return char::from_u32(code_point).unwrap_or(REPLACEMENT_CHARACTER);
        }

        self.scanner.consume().unwrap_or(REPLACEMENT_CHARACTER)
    }

    fn consume_ident(&mut self) -> Token {
        let value = self.consume_name();

        if self.scanner.peek() != Some('(') {
            let mut token = self.finish(TokenKind::Ident);
            token.value = Some(value.into_boxed_str());
            return token;
        }

        self.scanner.consume();

        if value.eq_ignore_ascii_case("url") {
            while matches!(self.scanner.peek(), Some(c) if is_whitespace(c)) {
                self.scanner.consume();
            }

            if self.scanner.quoted_url_start() {
                let mut token = self.finish(TokenKind::Function);
                token.value = Some(value.into_boxed_str());
                return token;
            }

            return self.consume_url();
        }

        let mut token = self.finish(TokenKind::Function);
        token.value = Some(value.into_boxed_str());
        token
    }

    // -- numbers -------------------------------------------------------

    /// <https://drafts.csswg.org/css-syntax/#consume-a-number>
    fn consume_number(&mut self) -> (String, NumberValue, NumberType) {
        let mut repr = String::new();
        let mut number_type = NumberType::Integer;

        if matches!(self.scanner.peek(), Some(c) if is_plus_or_minus(c)) {
            repr.push(self.scanner.consume().expect("just peeked"));
        }

        if let Some(digits) = self.scanner.scan_digits() {
            repr.push_str(&digits);
        }

        if let Some(fraction) = self.scanner.scan_decimal() {
            repr.push_str(&fraction);
            number_type = NumberType::Number;
        }

        if let Some(exponent) = self.scanner.scan_number_exponent() {
            repr.push_str(&exponent);
            number_type = NumberType::Number;
        }

        let converted = convert_string_to_number(&repr);
        let value = match number_type {
            NumberType::Integer => NumberValue::Integer(converted as i64),
            NumberType::Number => NumberValue::Number(converted),
        };

        (repr, value, number_type)
    }

    /// <https://drafts.csswg.org/css-syntax/#consume-a-numeric-token>
    fn consume_numeric(&mut self) -> Token {
        let (repr, value, _number_type) = self.consume_number();

        if starts_identifier(
            self.scanner.peek(),
            self.scanner.peek1(),
            self.scanner.peek_at(2),
        ) {
            let unit = self.consume_name();
            let mut token = self.finish(TokenKind::Dimension);
            token.repr = Some(repr.into_boxed_str());
            token.number = Some(value);
            token.unit = Some(unit.into_boxed_str());
            return token;
        }

        if self.scanner.peek() == Some('%') {
            self.scanner.consume();
            let mut token = self.finish(TokenKind::Percentage);
            token.repr = Some(repr.into_boxed_str());
            token.number = Some(value);
            return token;
        }

        let mut token = self.finish(TokenKind::Number);
        token.repr = Some(repr.into_boxed_str());
        token.number = Some(value);
        token
    }

    // -- strings ---------------------------------------------------------

    /// <https://drafts.csswg.org/css-syntax/#consume-a-string-token>
    fn consume_string(&mut self, ending: char) -> Token {
        let mut value = String::new();

        loop {
            match self.scanner.consume() {
                None => {
                    parse_error(ParseErrorKind::EofInString);
                    let mut token = self.finish(TokenKind::String);
                    token.value = Some(value.into_boxed_str());
                    return token;
                },
                Some(c) if c == ending => {
                    let mut token = self.finish(TokenKind::String);
                    token.value = Some(value.into_boxed_str());
                    return token;
                },
                Some(c) if is_newline(c) => {
                    parse_error(ParseErrorKind::NewlineInString);
                    self.scanner.reconsume();
                    let mut token = self.finish(TokenKind::BadString);
                    token.value = Some(value.into_boxed_str());
                    token.error = true;
                    return token;
                },
                Some('\\') => match self.scanner.peek() {
                    None => {},
                    Some(c) if is_newline(c) => {
                        self.scanner.consume();
                    },
                    Some(_) => value.push(self.consume_escaped()),
                },
                Some(c) => value.push(c),
            }
        }
    }

    // -- urls ------------------------------------------------------------

    /// <https://drafts.csswg.org/css-syntax/#consume-a-url-token>
    ///
    /// Assumes `url(` has already been consumed.
    fn consume_url(&mut self) -> Token {
        let mut value = String::new();

        while matches!(self.scanner.peek(), Some(c) if is_whitespace(c)) {
            self.scanner.consume();
        }

        loop {
            match self.scanner.consume() {
                Some(')') => {
                    let mut token = self.finish(TokenKind::Url);
                    token.value = Some(value.into_boxed_str());
                    return token;
                },
                None => {
                    parse_error(ParseErrorKind::EofInUrl);
                    let mut token = self.finish(TokenKind::Url);
                    token.value = Some(value.into_boxed_str());
                    return token;
                },
                Some(c) if is_whitespace(c) => {
                    while matches!(self.scanner.peek(), Some(c) if is_whitespace(c)) {
                        self.scanner.consume();
                    }

                    match self.scanner.peek() {
                        None => {
                            parse_error(ParseErrorKind::EofInUrl);
                            let mut token = self.finish(TokenKind::Url);
                            token.value = Some(value.into_boxed_str());
                            return token;
                        },
                        Some(')') => {
                            self.scanner.consume();
                            let mut token = self.finish(TokenKind::Url);
                            token.value = Some(value.into_boxed_str());
                            return token;
                        },
                        _ => {
                            self.consume_bad_url();
                            let mut token = self.finish(TokenKind::BadUrl);
                            token.error = true;
                            return token;
                        },
                    }
                },
                Some(c) if matches!(c, '"' | '\'' | '(') || is_non_printable_code_point(c) => {
                    parse_error(ParseErrorKind::IllegalCharacterInUrl);
                    self.consume_bad_url();
                    let mut token = self.finish(TokenKind::BadUrl);
                    token.error = true;
                    return token;
                },
                Some('\\') => {
                    if is_valid_escape(Some('\\'), self.scanner.peek()) {
                        value.push(self.consume_escaped());
                    } else {
                        parse_error(ParseErrorKind::InvalidEscapeBackslash);
                        self.consume_bad_url();
                        let mut token = self.finish(TokenKind::BadUrl);
                        token.error = true;
                        return token;
                    }
                },
                Some(c) => value.push(c),
            }
        }
    }

    /// <https://drafts.csswg.org/css-syntax/#consume-remnants-of-bad-url>
    fn consume_bad_url(&mut self) {
        loop {
            match self.scanner.peek() {
                None => return,
                Some(')') => {
                    self.scanner.consume();
                    return;
                },
                _ if self.scanner.is_valid_escape_start() => {
                    self.scanner.consume();
                    self.consume_escaped();
                },
                _ => {
                    self.scanner.consume();
                },
            }
        }
    }

    // -- unicode-range -----------------------------------------------------

    /// <https://drafts.csswg.org/css-syntax/#consume-a-unicode-range-token>
    ///
    /// Assumes the leading `u`/`U` and `+` have already been consumed.
    fn consume_unicode_range(&mut self) -> Token {
        let mut value = self.scanner.scan_hex().unwrap_or_default();

        while value.len() < 6 && self.scanner.peek() == Some('?') {
            self.scanner.consume();
            value.push('?');
        }

        let (start, end) = if value.contains('?') {
            let lower = u32::from_str_radix(&value.replace('?', "0"), 16).unwrap_or(0);
            let upper = u32::from_str_radix(&value.replace('?', "F"), 16).unwrap_or(lower);
            (lower, upper)
        } else {
            let start = u32::from_str_radix(&value, 16).unwrap_or(0);
            let end = if self.scanner.unicode_range_end() {
                self.scanner.consume();
                let hex = self.scanner.scan_hex().unwrap_or_default();
                u32::from_str_radix(&hex, 16).unwrap_or(start)
            } else {
                start
            };
            (start, end)
        };

        let mut token = self.finish(TokenKind::UnicodeRange);
        token.unicode_range = Some((start, end));
        token
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// <https://drafts.csswg.org/css-syntax/#check-if-three-code-points-would-start-an-ident-sequence>
fn starts_identifier(c1: Option<char>, c2: Option<char>, c3: Option<char>) -> bool {
    match c1 {
        Some('-') => {
            matches!(c2, Some(c) if c == '-' || is_name_start_code_point(c))
                || is_valid_escape(c2, c3)
        },
        Some('\\') => is_valid_escape(c1, c2),
        Some(c) if is_name_start_code_point(c) => true,
        _ => false,
    }
}

/// <https://drafts.csswg.org/css-syntax/#starts-with-a-number>
fn starts_number(c1: Option<char>, c2: Option<char>, c3: Option<char>) -> bool {
    match c1 {
        Some(c) if is_plus_or_minus(c) => {
            matches!(c2, Some(d) if is_digit(d))
                || (c2 == Some('.') && matches!(c3, Some(d) if is_digit(d)))
        },
        Some('.') => matches!(c2, Some(d) if is_digit(d)),
        Some(c) if is_digit(c) => true,
        _ => false,
    }
}
