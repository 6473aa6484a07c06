pub mod issue;
pub mod lint;

use std::ops::Range;

pub use issue::TemplateIssue;
pub use lint::{lint_option, lint_option_count, lint_template};

/// Characters that submissions may space inconsistently.
pub const PUNCTUATION: &str = ",.;:()[]{}";

/// Characters that carry meaning in the pattern dialect and are escaped.
pub const ESCAPED: &str = ".$()[]{}";

/// Characters copied verbatim that still mean something to the pattern
/// engine. The compiler leaves them alone; the linter reports them.
pub const UNESCAPED_META: &str = "*+?|^\\";

/// Classification of a single template character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// One of [`PUNCTUATION`].
    Punct(char),
    /// A literal space, insignificant in the template.
    Space,
    /// `#`: the position where every ordering of the options may appear.
    Placeholder,
    /// `'`: opens or closes a key.
    KeyQuote,
    /// `"`: opens or closes a value.
    ValueQuote,
    /// Anything else, matched as written.
    Literal(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte span in the template source.
    pub span: Range<usize>,
}

impl TokenKind {
    fn classify(c: char) -> Self {
        match c {
            ' ' => TokenKind::Space,
            '#' => TokenKind::Placeholder,
            '\'' => TokenKind::KeyQuote,
            '"' => TokenKind::ValueQuote,
            c if PUNCTUATION.contains(c) => TokenKind::Punct(c),
            c => TokenKind::Literal(c),
        }
    }
}

/// Split a template into one token per character.
pub fn lex(source: &str) -> Vec<Token> {
    source
        .char_indices()
        .map(|(start, c)| Token {
            kind: TokenKind::classify(c),
            span: start..start + c.len_utf8(),
        })
        .collect()
}
