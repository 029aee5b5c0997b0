use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InkError {
    #[error("glyph source line {line}: {reason}")]
    GlyphParse { line: usize, reason: String },
    #[error("glyph source has no placeholder glyph '{0}'")]
    MissingPlaceholder(char),
    #[error("cell {cell} has no routines")]
    EmptyRoutineList { cell: usize },
    #[error("expected {expected} routine lists, got {got}")]
    RoutineListCount { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, InkError>;
