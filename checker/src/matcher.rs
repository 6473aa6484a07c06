use fancy_regex::Regex;

use answer::{GroupCounter, MAX_OPTIONS, Mode};

use crate::error::CheckError;

/// A reference answer compiled into a pattern, ready to test submissions.
#[derive(Debug, Clone)]
pub struct CompiledAnswer {
    pattern: String,
    regex: Regex,
    alternatives: usize,
}

impl CompiledAnswer {
    /// Compile `template` with `options` substituted, in every order, for
    /// its `#` placeholder.
    pub fn new<S: AsRef<str>>(template: &str, options: &[S]) -> Result<Self, CheckError> {
        check_option_count(options.len())?;

        let pattern = answer::compile(template, options);
        let regex = Regex::new(&pattern).map_err(|source| CheckError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;

        Ok(CompiledAnswer {
            pattern,
            regex,
            alternatives: (1..=options.len()).product(),
        })
    }

    /// The compiled pattern text.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Number of option orderings the placeholder accepts.
    pub fn alternatives(&self) -> usize {
        self.alternatives
    }

    /// Whether the whole of `submission` matches the answer.
    /// The pattern is anchored at both ends, so a matching prefix is not enough.
    pub fn matches(&self, submission: &str) -> Result<bool, CheckError> {
        let matched = self.regex.is_match(submission).map_err(CheckError::Match)?;
        tracing::debug!(submission, matched, "checked submission");
        Ok(matched)
    }
}

/// Compile the answer and test a single submission against it.
pub fn check_answer<S: AsRef<str>>(
    submission: &str,
    template: &str,
    options: &[S],
) -> Result<bool, CheckError> {
    CompiledAnswer::new(template, options)?.matches(submission)
}

/// Compile `template` to pattern text without building a regex, refusing
/// option lists too long to expand.
pub fn compile_pattern<S: AsRef<str>>(
    template: &str,
    options: &[S],
    mode: Mode,
) -> Result<String, CheckError> {
    check_option_count(options.len())?;
    let mut counter = GroupCounter::new();
    Ok(answer::compile_with(template, options, mode, &mut counter))
}

fn check_option_count(count: usize) -> Result<(), CheckError> {
    if count > MAX_OPTIONS {
        return Err(CheckError::TooManyOptions {
            count,
            limit: MAX_OPTIONS,
        });
    }
    Ok(())
}
