//! Input preprocessing.
//!
//! <https://drafts.csswg.org/css-syntax/#input-preprocessing>

/// Raw input handed to [tokenize](crate::tokenize), before preprocessing.
///
/// Accepting either bytes or already-decoded text lets callers skip the
/// UTF-8 transcoding step when they know it's already been done upstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Bytes(Vec<u8>),
    Text(String),
}

impl From<&[u8]> for Input {
    fn from(bytes: &[u8]) -> Self {
        Input::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_owned())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

/// Preprocess raw input into a code-point sequence the [Scanner](crate::scanner::Scanner)
/// can index.
///
/// * Transcodes bytes to UTF-8, substituting U+FFFD for invalid sequences
///   (text input is assumed already valid and is passed through).
/// * Folds CR LF, lone CR, and FF into LF.
/// * Replaces U+0000 with U+FFFD.
pub(crate) fn preprocess(input: Input) -> Vec<char> {
    let text = match input {
        Input::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Input::Text(text) => text,
    };
    normalize_newlines_and_nul(&text)
}

fn normalize_newlines_and_nul(text: &str) -> Vec<char> {
    let mut result = Vec::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push('\n');
            },
            '\u{000C}' => result.push('\n'),
            '\u{0000}' => result.push('\u{FFFD}'),
            other => result.push(other),
        }
    }

    result
}
