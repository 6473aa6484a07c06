use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use checker::{AnswerFile, Verdict};

const ANSWER_SUFFIX: &str = ".answer.toml";

/// Answer files grouped by category (directory relative to the root; "" for
/// the root itself).
type Catalog = BTreeMap<String, Vec<PathBuf>>;

enum Outcome {
    Graded {
        answer: AnswerFile,
        verdicts: Vec<Verdict>,
    },
    /// The file could not be loaded or its answer would not compile.
    Broken(String),
}

struct FileReport {
    path: PathBuf,
    outcome: Outcome,
}

impl FileReport {
    fn grade(path: &Path) -> Self {
        let outcome = match AnswerFile::load(path) {
            Err(e) => Outcome::Broken(e.to_string()),
            Ok(answer) => match answer.grade() {
                Ok(verdicts) => Outcome::Graded { answer, verdicts },
                Err(e) => Outcome::Broken(format!("cannot compile answer: {}", e)),
            },
        };
        tracing::debug!(
            path = %path.display(),
            graded = matches!(outcome, Outcome::Graded { .. }),
            "graded answer file"
        );
        FileReport {
            path: path.to_path_buf(),
            outcome,
        }
    }

    fn label(&self) -> String {
        if let Outcome::Graded { answer, .. } = &self.outcome {
            if let Some(description) = &answer.description {
                return description.clone();
            }
        }
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        name.strip_suffix(ANSWER_SUFFIX).unwrap_or(&name).to_string()
    }

    fn wrong(&self) -> Vec<&Verdict> {
        match &self.outcome {
            Outcome::Graded { verdicts, .. } => verdicts.iter().filter(|v| !v.is_correct()).collect(),
            Outcome::Broken(_) => Vec::new(),
        }
    }

    fn passed(&self) -> bool {
        matches!(self.outcome, Outcome::Graded { .. }) && self.wrong().is_empty()
    }

    /// `right/total` submissions, or `error` for a broken file.
    fn score(&self) -> String {
        match &self.outcome {
            Outcome::Graded { verdicts, .. } => {
                format!("{}/{} submissions", verdicts.len() - self.wrong().len(), verdicts.len())
            }
            Outcome::Broken(_) => "error".to_string(),
        }
    }

    fn details(&self) -> Vec<String> {
        match &self.outcome {
            Outcome::Broken(reason) => reason.lines().map(String::from).collect(),
            Outcome::Graded { answer, .. } => self
                .wrong()
                .into_iter()
                .flat_map(|v| {
                    let mut lines = vec![format!(
                        "submission[{}]: expected {}, got {}",
                        v.index,
                        verdict_word(v.expected),
                        verdict_word(v.actual)
                    )];
                    if let Some(note) = &answer.submissions[v.index].note {
                        lines.push(format!("  note: {}", note));
                    }
                    lines.push(format!("  text: {}", v.text));
                    lines
                })
                .collect(),
        }
    }
}

fn verdict_word(matched: bool) -> &'static str {
    if matched { "match" } else { "no match" }
}

/// Submission and file counts across a whole run.
#[derive(Debug, Default)]
struct Tally {
    files: usize,
    broken: usize,
    submissions: usize,
    wrong: usize,
}

impl Tally {
    fn add(&mut self, report: &FileReport) {
        self.files += 1;
        match &report.outcome {
            Outcome::Graded { verdicts, .. } => {
                self.submissions += verdicts.len();
                self.wrong += report.wrong().len();
            }
            Outcome::Broken(_) => self.broken += 1,
        }
    }

    fn ok(&self) -> bool {
        self.broken == 0 && self.wrong == 0
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

fn catalog(root: &Path) -> Catalog {
    if root.is_file() {
        return Catalog::from([(String::new(), vec![root.to_path_buf()])]);
    }

    let mut found = Catalog::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for path in entries.flatten().map(|e| e.path()) {
            if path.is_dir() {
                pending.push(path);
            } else if path.to_string_lossy().ends_with(ANSWER_SUFFIX) {
                let category = dir
                    .strip_prefix(root)
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
                    .unwrap_or_default();
                found.entry(category).or_default().push(path);
            }
        }
    }
    found.values_mut().for_each(|files| files.sort());
    found
}

fn category_name(category: &str) -> &str {
    if category.is_empty() { "(root)" } else { category }
}

/// Keep the categories named in `requested`, including their subcategories.
/// An empty request keeps everything.
fn select(catalog: Catalog, requested: &[String]) -> Catalog {
    if requested.is_empty() {
        return catalog;
    }

    let wanted: Vec<&str> = requested.iter().map(|r| r.trim_matches('/')).collect();
    for want in &wanted {
        let known = catalog
            .keys()
            .any(|cat| cat == want || cat.starts_with(&format!("{}/", want)));
        if !known {
            let available: Vec<&str> = catalog.keys().map(|k| category_name(k)).collect();
            eprintln!(
                "warning: category '{}' not found (available: {})",
                want,
                available.join(", ")
            );
        }
    }

    catalog
        .into_iter()
        .filter(|(cat, _)| {
            wanted
                .iter()
                .any(|want| cat == want || cat.starts_with(&format!("{}/", want)))
        })
        .collect()
}

/// List available categories for the given answer path.
pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let found = catalog(path);
    if found.is_empty() {
        eprintln!("no {} files found in {}", ANSWER_SUFFIX, path.display());
        return;
    }

    eprintln!("available categories:");
    for (cat, files) in &found {
        eprintln!("  {} ({} answer files)", category_name(cat), files.len());
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Paint {
    Green,
    Red,
    Bold,
}

fn paint(text: &str, paint: Paint, no_color: bool) -> String {
    if no_color {
        return text.to_string();
    }
    let code = match paint {
        Paint::Green => "32",
        Paint::Red => "31",
        Paint::Bold => "1",
    };
    format!("\x1b[{}m{}\x1b[0m", code, text)
}

fn print_report(report: &FileReport, no_color: bool) {
    let status = if report.passed() {
        paint("PASS", Paint::Green, no_color)
    } else {
        paint("FAIL", Paint::Red, no_color)
    };
    eprintln!("  {}  {}  ({})", status, report.label(), report.score());
}

fn print_summary(tally: &Tally, no_color: bool) {
    let status = if tally.ok() {
        paint("ok", Paint::Green, no_color)
    } else {
        paint("FAILED", Paint::Red, no_color)
    };
    let mut line = format!(
        "test result: {}. {} answer files, {} submissions graded, {} wrong",
        status, tally.files, tally.submissions, tally.wrong
    );
    if tally.broken > 0 {
        line.push_str(&format!(", {} files broken", tally.broken));
    }
    eprintln!();
    eprintln!("{}", line);
}

/// Grade all `.answer.toml` files under `path` (or a single file).
/// If `categories` is non-empty, only run answers in those categories.
/// Returns exit code: 0 = every submission graded as expected, 1 otherwise.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    let found = catalog(path);
    if found.is_empty() {
        eprintln!("no {} files found in {}", ANSWER_SUFFIX, path.display());
        return 1;
    }

    let single_file = path.is_file();
    let selected = if single_file {
        found
    } else {
        select(found, categories)
    };
    if selected.is_empty() {
        eprintln!("no matching categories found");
        return 1;
    }

    let mut tally = Tally::default();
    let mut failing: Vec<FileReport> = Vec::new();

    for (cat, files) in &selected {
        if !single_file {
            eprintln!();
            eprintln!("{}", paint(category_name(cat), Paint::Bold, no_color));
        }
        for file in files {
            let report = FileReport::grade(file);
            print_report(&report, no_color);
            tally.add(&report);
            if !report.passed() {
                failing.push(report);
            }
        }
    }

    if !failing.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for report in &failing {
            eprintln!();
            eprintln!("  --- {} ---", report.path.display());
            for line in report.details() {
                eprintln!("  {}", line);
            }
        }
    }

    print_summary(&tally, no_color);
    tracing::debug!(?tally, "test run finished");
    if tally.ok() { 0 } else { 1 }
}
