pub mod counter;

use crate::compiler::counter::GroupCounter;
use crate::permutation::permutations;
use crate::template::{ESCAPED, Token, TokenKind, lex};

// ---------------------------------------------------------------------------
// Pattern fragments
// ---------------------------------------------------------------------------

/// Zero or more whitespace characters.
const GAP: &str = r"\s*";

/// Separator between consecutive options of one ordering.
const OPTION_SEPARATOR: &str = r"\s*,\s*";

/// Start of a top-level pattern: leading whitespace is insignificant.
const ANCHOR_START: &str = r"^\s*";

/// End of a top-level pattern: optional `;`, then trailing whitespace.
const ANCHOR_END: &str = r"(?:;|)\s*$";

/// Opening key quote: `'`, `"`, or no quote at all.
const KEY_OPEN: &str = r#"('|"|)"#;

/// Opening value quote: `'` or `"`. Values cannot go unquoted.
const VALUE_OPEN: &str = r#"('|")"#;

/// Whether a compilation produces a complete pattern or a piece of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Anchored at both ends; resets the group counter.
    TopLevel,
    /// Unanchored; continues numbering groups from the caller's counter.
    Fragment,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compile `template` into a complete, anchored pattern, expanding the `#`
/// placeholder into every ordering of `options`.
pub fn compile<S: AsRef<str>>(template: &str, options: &[S]) -> String {
    let mut counter = GroupCounter::new();
    compile_with(template, options, Mode::TopLevel, &mut counter)
}

/// Compile `template` in the given mode, numbering quote groups from
/// `counter`. Top-level mode resets the counter first; fragment mode leaves
/// it where the caller's pattern is, so nested groups get fresh numbers.
pub fn compile_with<S: AsRef<str>>(
    template: &str,
    options: &[S],
    mode: Mode,
    counter: &mut GroupCounter,
) -> String {
    let mut out = String::new();

    if mode == Mode::TopLevel {
        counter.reset();
        out.push_str(ANCHOR_START);
    }

    translate(&lex(template), options, counter, &mut out);

    if mode == Mode::TopLevel {
        out.push_str(ANCHOR_END);
        tracing::debug!(
            template,
            options = options.len(),
            pattern = %out,
            "compiled answer template"
        );
    } else {
        tracing::trace!(template, fragment = %out, "compiled fragment");
    }

    out
}

// ---------------------------------------------------------------------------
// Character translation
// ---------------------------------------------------------------------------

fn translate<S: AsRef<str>>(
    tokens: &[Token],
    options: &[S],
    counter: &mut GroupCounter,
    out: &mut String,
) {
    let mut awaiting_key_open = true;
    let mut awaiting_value_open = true;

    for token in tokens {
        match token.kind {
            TokenKind::Punct(c) => {
                out.push_str(GAP);
                push_literal(c, out);
                out.push_str(GAP);
            }
            TokenKind::Space => out.push_str(GAP),
            TokenKind::Placeholder => expand_placeholder(options, counter, out),
            TokenKind::KeyQuote => {
                quote(&mut awaiting_key_open, KEY_OPEN, counter, out);
            }
            TokenKind::ValueQuote => {
                quote(&mut awaiting_value_open, VALUE_OPEN, counter, out);
            }
            TokenKind::Literal(c) => push_literal(c, out),
        }
    }
}

fn push_literal(c: char, out: &mut String) {
    if ESCAPED.contains(c) {
        out.push('\\');
    }
    out.push(c);
}

/// Emit either the opening group or the closing backreference of a quoted
/// token. The counter advances only on close.
fn quote(awaiting_open: &mut bool, open: &str, counter: &mut GroupCounter, out: &mut String) {
    if *awaiting_open {
        out.push_str(open);
    } else {
        out.push('\\');
        out.push_str(&counter.advance().to_string());
        out.push_str(GAP);
    }
    *awaiting_open = !*awaiting_open;
}

/// Replace `#` with an alternation over every ordering of the options.
/// Each option is compiled in fragment mode, in emission order, so its
/// groups are numbered where they land in the final pattern.
fn expand_placeholder<S: AsRef<str>>(
    options: &[S],
    counter: &mut GroupCounter,
    out: &mut String,
) {
    let options: Vec<&str> = options.iter().map(AsRef::as_ref).collect();
    let orderings = permutations(&options);
    let mut alternatives = Vec::with_capacity(orderings.len());

    for ordering in &orderings {
        let fragments: Vec<String> = ordering
            .iter()
            .map(|option| compile_with::<&str>(option, &[], Mode::Fragment, counter))
            .collect();
        alternatives.push(fragments.join(OPTION_SEPARATOR));
    }

    out.push_str("(?:");
    out.push_str(&alternatives.join("|"));
    out.push(')');
    out.push_str(GAP);
}
