use std::path::{Path, PathBuf};

use checker::AnswerFile;

fn answer_files(dir: &Path, out: &mut Vec<PathBuf>) {
    for entry in std::fs::read_dir(dir).unwrap().flatten() {
        let path = entry.path();
        if path.is_dir() {
            answer_files(&path, out);
        } else if path.to_string_lossy().ends_with(".answer.toml") {
            out.push(path);
        }
    }
}

#[test]
fn shipped_answer_files_grade_as_expected() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../answers");
    let mut files = Vec::new();
    answer_files(&root, &mut files);
    assert!(files.len() >= 4, "found only {:?}", files);

    for path in files {
        let answer = AnswerFile::load(&path).unwrap();
        for verdict in answer.grade().unwrap() {
            assert!(
                verdict.is_correct(),
                "{}: submission[{}] expected {}, got {}: {}",
                path.display(),
                verdict.index,
                verdict.expected,
                verdict.actual,
                verdict.text
            );
        }
    }
}
