use std::path::Path;

use serde::Deserialize;

use crate::error::{CheckError, SuiteError};
use crate::matcher::CompiledAnswer;

/// A reference answer with sample submissions and their expected verdicts,
/// loaded from an `.answer.toml` file.
#[derive(Debug, Deserialize)]
pub struct AnswerFile {
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,

    /// The answer template.
    pub template: String,

    /// Fragments substituted, in any order, for the template's `#`.
    #[serde(default)]
    pub options: Vec<String>,

    #[serde(default)]
    pub submissions: Vec<Submission>,
}

#[derive(Debug, Deserialize)]
pub struct Submission {
    /// The submitted code, verbatim.
    pub text: String,

    /// Whether the submission should match the answer.
    pub accept: bool,

    /// Why the submission should (or should not) match.
    #[serde(default)]
    pub note: Option<String>,
}

/// Outcome of grading one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Position of the submission in the file.
    pub index: usize,
    pub text: String,
    pub expected: bool,
    pub actual: bool,
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        self.expected == self.actual
    }
}

impl AnswerFile {
    pub fn load(path: &Path) -> Result<Self, SuiteError> {
        let content = std::fs::read_to_string(path).map_err(|source| SuiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SuiteError> {
        let content = content.trim_start_matches('\u{feff}'); // strip BOM
        Ok(toml::from_str(content)?)
    }

    /// Compile the answer once and check every submission against it.
    pub fn grade(&self) -> Result<Vec<Verdict>, CheckError> {
        let compiled = CompiledAnswer::new(&self.template, self.options.as_slice())?;

        let mut verdicts = Vec::with_capacity(self.submissions.len());
        for (index, submission) in self.submissions.iter().enumerate() {
            let actual = compiled.matches(&submission.text)?;
            tracing::debug!(index, expected = submission.accept, actual, "graded submission");
            verdicts.push(Verdict {
                index,
                text: submission.text.clone(),
                expected: submission.accept,
                actual,
            });
        }
        Ok(verdicts)
    }
}
