pub mod error;
pub mod matcher;
pub mod suite;

pub use error::{CheckError, SuiteError};
pub use matcher::{CompiledAnswer, check_answer, compile_pattern};
pub use suite::{AnswerFile, Submission, Verdict};
