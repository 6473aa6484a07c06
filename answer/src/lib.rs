pub mod compiler;
pub mod permutation;
pub mod template;

pub use compiler::counter::GroupCounter;
pub use compiler::{Mode, compile, compile_with};
pub use permutation::permutations;

/// Largest option list a placeholder may expand.
///
/// The pattern grows with `n!`: six options give 720 alternatives and a
/// pattern of roughly 190 KB, which takes seconds for the regex engine to
/// build. Seven options push a single check past half a minute.
pub const MAX_OPTIONS: usize = 6;
