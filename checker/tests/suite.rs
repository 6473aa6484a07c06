use std::io::Write;
use std::path::Path;

use checker::{AnswerFile, CheckError, SuiteError};

const RANGE_FILE: &str = r#"
description = "Score between 50 and 90"
template = "db.scores.find({'score':{#}})"
options = ["'$gt':50", "'$lt':90"]

[[submissions]]
text = "db.scores.find( { score: { $lt : 90, $gt : 50 } } );"
accept = true

[[submissions]]
text = '''db.scores.find( { 'score': { "$lt' : 90, $gt : 50 } } )'''
accept = false
note = "closing quote does not match the opening one"

[[submissions]]
text = "db.scores.find( { score: { $gt : 50 } } )"
accept = true
note = "deliberately wrong expectation"
"#;

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".answer.toml")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn loads_answer_file_from_disk() {
    let file = write_temp(RANGE_FILE);
    let answer = AnswerFile::load(file.path()).unwrap();

    assert_eq!(answer.description.as_deref(), Some("Score between 50 and 90"));
    assert_eq!(answer.template, "db.scores.find({'score':{#}})");
    assert_eq!(answer.options, vec!["'$gt':50", "'$lt':90"]);
    assert_eq!(answer.submissions.len(), 3);
    assert_eq!(
        answer.submissions[1].note.as_deref(),
        Some("closing quote does not match the opening one")
    );
}

#[test]
fn grades_every_submission() {
    let answer = AnswerFile::from_toml_str(RANGE_FILE).unwrap();
    let verdicts = answer.grade().unwrap();

    assert_eq!(verdicts.len(), 3);
    assert!(verdicts[0].actual && verdicts[0].is_correct());
    assert!(!verdicts[1].actual && verdicts[1].is_correct());
    assert!(!verdicts[2].actual);
    assert!(!verdicts[2].is_correct());
    assert_eq!(verdicts[2].index, 2);
}

#[test]
fn options_and_submissions_default_to_empty() {
    let answer = AnswerFile::from_toml_str("template = \"db.c.count()\"").unwrap();
    assert!(answer.options.is_empty());
    assert!(answer.grade().unwrap().is_empty());
}

#[test]
fn byte_order_mark_is_ignored() {
    let answer = AnswerFile::from_toml_str("\u{feff}template = \"x\"").unwrap();
    assert_eq!(answer.template, "x");
}

#[test]
fn missing_template_is_a_toml_error() {
    let err = AnswerFile::from_toml_str("options = []").unwrap_err();
    assert!(matches!(err, SuiteError::Toml(_)), "{:?}", err);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = AnswerFile::load(Path::new("/nonexistent/none.answer.toml")).unwrap_err();
    assert!(err.to_string().contains("cannot read"), "{}", err);
}

#[test]
fn invalid_template_fails_grading() {
    let answer = AnswerFile::from_toml_str(
        "template = 'abc\\'\n[[submissions]]\ntext = 'abc'\naccept = false\n",
    )
    .unwrap();
    assert!(matches!(answer.grade(), Err(CheckError::InvalidPattern { .. })));
}
