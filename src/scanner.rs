//! Character-level cursor over preprocessed input.
//!
//! Tokenization backtracks across multi-character lookaheads often enough
//! (numeric exponents, unicode-range tail digits) that the mark/rollback
//! primitives are pulled out into their own type rather than inlined on
//! the tokenizer, which only ever needs single-character lookahead for
//! everything else.

use crate::classify::{is_hex_digit, is_whitespace};

/// A saved decomposition of a CSS `<number-token>` representation, as
/// produced by [Scanner::scan_number_str].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NumberParts {
    pub sign: Option<String>,
    pub integer: Option<String>,
    pub fractional: Option<String>,
    pub exponent_sign: Option<String>,
    pub exponent: Option<String>,
}

#[derive(Clone, Debug)]
pub(crate) struct Scanner {
    source: Vec<char>,
    pos: usize,
    current: Option<char>,
    marker: usize,
}

impl Scanner {
    pub(crate) fn new(source: Vec<char>) -> Self {
        Self {
            source,
            pos: 0,
            current: None,
            marker: 0,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn eos(&self) -> bool {
        self.pos == self.source.len()
    }

    pub(crate) fn current(&self) -> Option<char> {
        self.current
    }

    /// <https://drafts.csswg.org/css-syntax/#consume-a-token>
    pub(crate) fn consume(&mut self) -> Option<char> {
        let c = self.source.get(self.pos).copied();
        if let Some(c) = c {
            self.pos += 1;
            self.current = Some(c);
        }
        c
    }

    pub(crate) fn consume_rest(&mut self) -> String {
        if self.pos >= self.source.len() {
            return String::new();
        }

        let rest: String = self.source[self.pos..].iter().collect();
        self.current = self.source.last().copied();
        self.pos = self.source.len();
        rest
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    pub(crate) fn peek1(&self) -> Option<char> {
        self.peek_at(1)
    }

    pub(crate) fn peek_at(&self, n: usize) -> Option<char> {
        self.source.get(self.pos + n).copied()
    }

    /// Returns the next `n` code points without consuming them. Shorter
    /// than `n` near the end of the stream.
    pub(crate) fn peekn(&self, n: usize) -> String {
        let end = (self.pos + n).min(self.source.len());
        self.source[self.pos..end].iter().collect()
    }

    /// Decrements `pos` by one if positive. The next [consume](Scanner::consume)
    /// re-emits the character just stepped back over.
    pub(crate) fn reconsume(&mut self) {
        if self.pos > 0 {
            self.pos -= 1;
        }
    }

    pub(crate) fn mark(&mut self) {
        self.marker = self.pos;
    }

    pub(crate) fn marker(&self) -> usize {
        self.marker
    }

    pub(crate) fn marked(&self) -> Option<String> {
        if self.marker == self.pos {
            None
        } else {
            Some(self.source[self.marker..self.pos].iter().collect())
        }
    }

    /// Runs `f` inside a save/restore of `marker`, returning [marked](Scanner::marked)
    /// unless `f` aborts (returns `None`), in which case `marker` is still
    /// restored but `None` is returned.
    pub(crate) fn marking<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<String> {
        let saved_marker = self.marker;
        self.marker = self.pos;
        let outcome = f(self);
        let result = match outcome {
            Some(_) => self.marked(),
            None => None,
        };
        self.marker = saved_marker;
        result
    }

    /// Saves `pos`, `current`, and `marker`; runs `f`; restores all three if
    /// `f` returns `None`.
    pub(crate) fn with_rollback<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let saved_pos = self.pos;
        let saved_current = self.current;
        let saved_marker = self.marker;

        let result = f(self);

        if result.is_none() {
            self.pos = saved_pos;
            self.current = saved_current;
            self.marker = saved_marker;
        }

        result
    }

    pub(crate) fn scan_digits(&mut self) -> Option<String> {
        self.marking(|s| {
            while matches!(s.peek(), Some(c) if c.is_ascii_digit()) {
                s.consume();
            }
            Some(())
        })
    }

    pub(crate) fn scan_hex(&mut self) -> Option<String> {
        self.marking(|s| {
            let mut consumed = 0;
            while consumed < 6 && matches!(s.peek(), Some(c) if is_hex_digit(c)) {
                s.consume();
                consumed += 1;
            }
            Some(())
        })
    }

    pub(crate) fn scan_while(&mut self, pred: impl Fn(char) -> bool) -> Option<String> {
        self.marking(|s| {
            while !s.eos() && pred(s.peek().unwrap()) {
                s.consume();
            }
            Some(())
        })
    }

    /// Consumes a `.` followed by one or more digits. A `.` not directly
    /// followed by a digit is left unconsumed (e.g. `"1."` stays a
    /// `number`-token `1` plus a trailing `delim`, rather than swallowing
    /// the lone dot), so the whole attempt rolls back rather than
    /// stopping mid-match.
    pub(crate) fn scan_decimal(&mut self) -> Option<String> {
        self.with_rollback(|s| {
            s.marking(|s2| {
                if s2.peek() != Some('.') || !matches!(s2.peek1(), Some(c) if c.is_ascii_digit()) {
                    return None;
                }

                s2.consume();
                while matches!(s2.peek(), Some(c) if c.is_ascii_digit()) {
                    s2.consume();
                }

                Some(())
            })
        })
    }

    /// Tries to match the two-character sequence `a`, `b` at `pos`; on
    /// success, advances past it and updates `current`.
    pub(crate) fn scan_two_char(&mut self, a: char, b: char) -> bool {
        if self.peek() == Some(a) && self.peek1() == Some(b) {
            self.consume();
            self.consume();
            true
        } else {
            false
        }
    }

    /// `e`/`E`, optional sign, then one or more digits; aborts (rolling
    /// back entirely) if no digit follows the optional sign.
    pub(crate) fn scan_number_exponent(&mut self) -> Option<String> {
        self.with_rollback(|s| {
            s.marking(|s2| {
                match s2.peek() {
                    Some('e' | 'E') => {
                        s2.consume();
                    },
                    _ => return None,
                }

                if matches!(s2.peek(), Some('+' | '-')) {
                    s2.consume();
                }

                if !matches!(s2.peek(), Some(c) if c.is_ascii_digit()) {
                    return None;
                }

                while matches!(s2.peek(), Some(c) if c.is_ascii_digit()) {
                    s2.consume();
                }

                Some(())
            })
        })
    }

    /// Parses `sign? digit* ('.' digit+)? (('e'|'E') sign? digit+)?` into
    /// its constituent parts. Used by [convert_string_to_number](crate::numeric::convert_string_to_number)
    /// to reparse a number token's `repr` precisely, rather than handing it
    /// to a generic float parser.
    pub(crate) fn scan_number_str(&mut self) -> Option<NumberParts> {
        self.with_rollback(|s| {
            let sign = match s.peek() {
                Some(c @ ('+' | '-')) => {
                    s.consume();
                    Some(c.to_string())
                },
                _ => None,
            };

            let integer = s.scan_digits();

            let fractional = if s.peek() == Some('.') {
                s.with_rollback(|s2| {
                    s2.consume();
                    s2.scan_digits()
                })
            } else {
                None
            };

            let (exponent_sign, exponent) = match s.peek() {
                Some('e' | 'E') => {
                    let result = s.with_rollback(|s2| {
                        s2.consume();
                        let exponent_sign = match s2.peek() {
                            Some(c @ ('+' | '-')) => {
                                s2.consume();
                                Some(c.to_string())
                            },
                            _ => None,
                        };
                        let digits = s2.scan_digits()?;
                        Some((exponent_sign, digits))
                    });

                    match result {
                        Some((exponent_sign, digits)) => (exponent_sign, Some(digits)),
                        None => (None, None),
                    }
                },
                _ => (None, None),
            };

            Some(NumberParts {
                sign,
                integer,
                fractional,
                exponent_sign,
                exponent,
            })
        })
    }

    /// <https://drafts.csswg.org/css-syntax/#starts-with-a-valid-escape>
    pub(crate) fn is_valid_escape_start(&self) -> bool {
        is_valid_escape(self.peek(), self.peek1())
    }

    /// True if `peek()` is a quote, or `peek()` is whitespace followed by a
    /// quote.
    pub(crate) fn quoted_url_start(&self) -> bool {
        match self.peek() {
            Some('"' | '\'') => true,
            Some(c) if is_whitespace(c) => matches!(self.peek1(), Some('"' | '\'')),
            _ => false,
        }
    }

    /// True if `peek()` is `+` and `peek1()` is a hex digit, `|`, or `?`.
    pub(crate) fn unicode_range_start(&self) -> bool {
        self.peek() == Some('+')
            && matches!(self.peek1(), Some(c) if is_hex_digit(c) || c == '|' || c == '?')
    }

    /// True if `peek()` is `-` and `peek1()` is a hex digit.
    pub(crate) fn unicode_range_end(&self) -> bool {
        self.peek() == Some('-') && matches!(self.peek1(), Some(c) if is_hex_digit(c))
    }
}

/// <https://drafts.csswg.org/css-syntax/#starts-with-a-valid-escape>
#[inline]
pub(crate) fn is_valid_escape(c1: Option<char>, c2: Option<char>) -> bool {
    if c1 != Some('\\') {
        false
    } else {
        c2 != Some('\n')
    }
}
