use std::ops::Range;

use crate::MAX_OPTIONS;
use crate::template::issue::TemplateIssue;
use crate::template::{Token, TokenKind, UNESCAPED_META, lex};

/// Check a top-level template for constructs the compiler accepts but turns
/// into a wrong pattern. The compiler itself never rejects a template.
pub fn lint_template(source: &str, file_id: usize) -> Vec<TemplateIssue> {
    let tokens = lex(source);
    let mut issues = Vec::new();

    let placeholders: Vec<&Token> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Placeholder)
        .collect();
    for extra in placeholders.iter().skip(1) {
        issues.push(
            TemplateIssue::warning(
                "template has more than one `#` placeholder",
                extra.span.clone(),
                file_id,
            )
            .with_note("only one placeholder per template is supported"),
        );
    }

    check_quotes(&tokens, file_id, &mut issues);
    check_metacharacters(&tokens, file_id, &mut issues);
    issues
}

/// Check a single option fragment. Options are compiled without
/// permutation expansion, so a `#` in one expands to nothing useful.
pub fn lint_option(source: &str, file_id: usize) -> Vec<TemplateIssue> {
    let tokens = lex(source);
    let mut issues = Vec::new();

    for token in tokens.iter().filter(|t| t.kind == TokenKind::Placeholder) {
        issues.push(
            TemplateIssue::warning(
                "`#` inside an option is not expanded",
                token.span.clone(),
                file_id,
            )
            .with_note("placeholders are only supported in the top-level template"),
        );
    }

    check_quotes(&tokens, file_id, &mut issues);
    check_metacharacters(&tokens, file_id, &mut issues);
    issues
}

/// Check the option list against the template's placeholder.
/// Issues point at the `#`, or at the whole template when it has none.
pub fn lint_option_count(template: &str, count: usize, file_id: usize) -> Vec<TemplateIssue> {
    let placeholder = lex(template)
        .into_iter()
        .find(|t| t.kind == TokenKind::Placeholder)
        .map(|t| t.span);

    let mut issues = Vec::new();
    match placeholder {
        Some(span) if count > MAX_OPTIONS => {
            issues.push(
                TemplateIssue::warning(
                    format!("{} options expand into {} orderings", count, orderings(count)),
                    span,
                    file_id,
                )
                .with_note(format!("at most {} options are supported", MAX_OPTIONS)),
            );
        }
        None if count > 0 => {
            issues.push(
                TemplateIssue::warning(
                    format!("{} option(s) given but the template has no `#`", count),
                    0..template.len(),
                    file_id,
                )
                .with_note("options are only substituted at a `#` placeholder"),
            );
        }
        _ => {}
    }
    issues
}

fn orderings(count: usize) -> String {
    (1..=count as u128)
        .try_fold(1u128, |acc, n| acc.checked_mul(n))
        .map(|n| n.to_string())
        .unwrap_or_else(|| "too many".to_string())
}

fn check_quotes(tokens: &[Token], file_id: usize, issues: &mut Vec<TemplateIssue>) {
    let mut open_key: Option<Range<usize>> = None;
    let mut open_value: Option<Range<usize>> = None;

    for token in tokens {
        match token.kind {
            TokenKind::KeyQuote => match open_key.take() {
                None => open_key = Some(token.span.clone()),
                Some(_) => {
                    if let Some(value) = &open_value {
                        issues.push(overlap(value, file_id));
                    }
                }
            },
            TokenKind::ValueQuote => match open_value.take() {
                None => open_value = Some(token.span.clone()),
                Some(_) => {
                    if let Some(key) = &open_key {
                        issues.push(overlap(key, file_id));
                    }
                }
            },
            _ => {}
        }
    }

    if let Some(span) = open_key {
        issues.push(
            TemplateIssue::warning("key quote `'` is never closed", span, file_id)
                .with_note("keys are written as 'name'"),
        );
    }
    if let Some(span) = open_value {
        issues.push(
            TemplateIssue::warning("value quote `\"` is never closed", span, file_id)
                .with_note("values are written as \"text\""),
        );
    }
}

/// A quote closed while the other kind is still open. Backreferences are
/// numbered by close order, so the close refers to the wrong group.
fn overlap(still_open: &Range<usize>, file_id: usize) -> TemplateIssue {
    TemplateIssue::warning("key and value quotes overlap", still_open.clone(), file_id)
        .with_note("close a key or value before opening the other kind")
}

fn check_metacharacters(tokens: &[Token], file_id: usize, issues: &mut Vec<TemplateIssue>) {
    for token in tokens {
        if let TokenKind::Literal(c) = token.kind {
            if UNESCAPED_META.contains(c) {
                issues.push(
                    TemplateIssue::warning(
                        format!("`{}` is passed to the pattern engine unescaped", c),
                        token.span.clone(),
                        file_id,
                    )
                    .with_note("it will be read as pattern syntax, not as a literal character"),
                );
            }
        }
    }
}
