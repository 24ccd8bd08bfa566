//! Error types used in the library.
//!
//! - Per-expression errors (format, capacity, simplification, verification) are caught by the [pipeline](crate::pipeline) and recorded against the expression.
//!   A batch is never aborted by these.
//! - Infrastructure errors ([PipelineError]) are fatal and halt a run immediately.
//! - Some errors are internal to a solve and used to control its flow --- e.g. a [SolveError::Conflict] is expected from time to time.
//!
//! Names of the error enums --- for the most part --- overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use std::path::PathBuf;

/// The kinds of error an expression may meet on its way through the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Format(FormatError),
    Capacity(CapacityError),
    Parse(ParseError),
    Simplification(SimplificationError),
    Verification(VerificationError),
    Store(StoreError),
    Narration(NarrationError),
}

impl ErrorKind {
    /// A short name for the kind of error, as used in reports.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Format(_) => "FormatError",
            Self::Capacity(_) => "CapacityError",
            Self::Parse(_) => "ParseError",
            Self::Simplification(_) => "SimplificationError",
            Self::Verification(_) => "VerificationError",
            Self::Store(_) => "StoreError",
            Self::Narration(_) => "NarrationError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format(e) => write!(f, "{e}"),
            Self::Capacity(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Simplification(e) => write!(f, "{e}"),
            Self::Verification(e) => write!(f, "{e}"),
            Self::Store(e) => write!(f, "{e}"),
            Self::Narration(e) => write!(f, "{e}"),
        }
    }
}

/// Noted errors when normalizing a raw expression.
///
/// Positions are 0-based character offsets into the raw expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// The expression was empty, or contained only whitespace.
    Empty,

    /// Some operator outside of the operator table.
    UnknownOperator { token: String, position: usize },

    /// A known token, in a place it cannot be.
    UnexpectedToken { token: String, position: usize },

    /// A character which begins no token.
    UnexpectedCharacter { character: char, position: usize },

    /// An opening parenthesis without a close, or the reverse.
    UnbalancedParenthesis { position: usize },

    /// Arithmetic, or a number, which is not part of a comparison.
    ArithmeticOutsideComparison { position: usize },

    /// Parentheses or negations nested past the configured depth.
    TooDeep { position: usize },

    /// The expression ended where an operand was required.
    UnexpectedEnd,
}

impl From<FormatError> for ErrorKind {
    fn from(e: FormatError) -> Self {
        ErrorKind::Format(e)
    }
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty expression"),
            Self::UnknownOperator { token, position } => {
                write!(f, "unknown operator '{token}' at position {position}")
            }
            Self::UnexpectedToken { token, position } => {
                write!(f, "unexpected token '{token}' at position {position}")
            }
            Self::UnexpectedCharacter {
                character,
                position,
            } => write!(f, "unexpected character '{character}' at position {position}"),
            Self::UnbalancedParenthesis { position } => {
                write!(f, "unbalanced parenthesis at position {position}")
            }
            Self::ArithmeticOutsideComparison { position } => {
                write!(f, "arithmetic outside of a comparison at position {position}")
            }
            Self::TooDeep { position } => {
                write!(f, "nesting too deep at position {position}")
            }
            Self::UnexpectedEnd => write!(f, "unexpected end of expression"),
        }
    }
}

/// Errors from the canonical alphabet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CapacityError {
    /// There are no more fresh symbols, and the alphabet may not be extended.
    AlphabetExhausted { identifier: String, capacity: usize },
}

impl From<CapacityError> for ErrorKind {
    fn from(e: CapacityError) -> Self {
        ErrorKind::Capacity(e)
    }
}

impl std::fmt::Display for CapacityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlphabetExhausted {
                identifier,
                capacity,
            } => write!(
                f,
                "no canonical symbol left for '{identifier}' (alphabet capacity {capacity})"
            ),
        }
    }
}

/// Errors when parsing an expression in canonical syntax.
///
/// Positions are 0-based character offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// An empty string, where some non-empty string was required.
    Empty,

    /// A token which is not part of canonical syntax.
    UnknownToken { token: String, position: usize },

    /// A token of canonical syntax, out of place.
    UnexpectedToken { token: String, position: usize },

    /// Parentheses or negations nested past [MAX_DEPTH](crate::structures::expression::MAX_DEPTH).
    TooDeep { position: usize },

    /// The expression ended where more was required.
    UnexpectedEnd,
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty canonical expression"),
            Self::UnknownToken { token, position } => {
                write!(f, "unknown token '{token}' at position {position}")
            }
            Self::UnexpectedToken { token, position } => {
                write!(f, "unexpected token '{token}' at position {position}")
            }
            Self::TooDeep { position } => write!(f, "nesting too deep at position {position}"),
            Self::UnexpectedEnd => write!(f, "unexpected end of canonical expression"),
        }
    }
}

/// The detail of a failure inside a simplification engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimplificationFailure {
    /// The canonical text handed to the engine did not parse.
    Parse(ParseError),

    /// More atoms than the engine is configured to enumerate.
    TooManyAtoms { count: usize, limit: usize },

    /// The engine did not finish within the time allowed.
    TimeUp,

    /// Some other failure, reported by an external engine.
    Engine(String),
}

impl std::fmt::Display for SimplificationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::TooManyAtoms { count, limit } => {
                write!(f, "{count} atoms exceeds the limit of {limit}")
            }
            Self::TimeUp => write!(f, "time limit reached"),
            Self::Engine(detail) => write!(f, "{detail}"),
        }
    }
}

/// A failure of the simplification stage, with the input which failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimplificationError {
    /// The (normalized) input given to the engine.
    pub input: String,

    /// What went wrong.
    pub failure: SimplificationFailure,
}

impl From<SimplificationError> for ErrorKind {
    fn from(e: SimplificationError) -> Self {
        ErrorKind::Simplification(e)
    }
}

impl std::fmt::Display for SimplificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to simplify '{}': {}", self.input, self.failure)
    }
}

/// Which side of an expression record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Original,
    Simplified,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::Simplified => write!(f, "simplified"),
        }
    }
}

/// Errors during verification.
///
/// Any of these is distinct from a (genuine) finding of non-equivalence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationError {
    /// One side of a record failed to parse.
    Parse { side: Side, error: ParseError },

    /// Satisfiability was not determined within the time allowed.
    TimeUp,

    /// The satisfiability context failed.
    Solver(SolveError),

    /// A verification worker failed to return a verdict.
    Worker(String),
}

impl From<VerificationError> for ErrorKind {
    fn from(e: VerificationError) -> Self {
        ErrorKind::Verification(e)
    }
}

impl From<SolveError> for VerificationError {
    fn from(e: SolveError) -> Self {
        VerificationError::Solver(e)
    }
}

impl std::fmt::Display for VerificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { side, error } => write!(f, "{side} expression: {error}"),
            Self::TimeUp => write!(f, "solver time limit reached"),
            Self::Solver(e) => write!(f, "solver failure: {e}"),
            Self::Worker(detail) => write!(f, "worker failure: {detail}"),
        }
    }
}

/// Noted errors from within a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveError {
    /// A conflict was found.
    /// This is expected from time to time, and leads to backtracking.
    Conflict(usize),

    /// An atom outside of the context.
    UnknownAtom,

    /// No fresh atoms remain.
    AtomsExhausted,

    /// A solve was requested from a state which does not permit it.
    InvalidState,
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict(key) => write!(f, "conflict on clause {key}"),
            Self::UnknownAtom => write!(f, "unknown atom"),
            Self::AtomsExhausted => write!(f, "no fresh atoms remain"),
            Self::InvalidState => write!(f, "invalid context state"),
        }
    }
}

/// Errors with the expression store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// Some I/O failure, with the path involved.
    Io { path: PathBuf, message: String },

    /// The record file is not valid CSV.
    Csv(String),

    /// A row without exactly two fields.
    FieldCount { row: usize, found: usize },

    /// Records read back from a store differ in count from those held.
    RecordCount { held: usize, read: usize },
}

impl From<StoreError> for ErrorKind {
    fn from(e: StoreError) -> Self {
        ErrorKind::Store(e)
    }
}

impl From<csv::Error> for StoreError {
    fn from(e: csv::Error) -> Self {
        StoreError::Csv(e.to_string())
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "{}: {message}", path.display()),
            Self::Csv(message) => write!(f, "malformed record file: {message}"),
            Self::FieldCount { row, found } => {
                write!(f, "row {row} has {found} fields, where 2 are required")
            }
            Self::RecordCount { held, read } => {
                write!(f, "{read} records read back, where {held} were written")
            }
        }
    }
}

/// Errors when rendering natural language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NarrationError {
    /// A canonical symbol without an entry in the mapping.
    UnmappedSymbol(String),

    /// Failure to write the narration.
    Io { path: PathBuf, message: String },
}

impl From<NarrationError> for ErrorKind {
    fn from(e: NarrationError) -> Self {
        ErrorKind::Narration(e)
    }
}

impl std::fmt::Display for NarrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnmappedSymbol(symbol) => write!(f, "no mapping for symbol '{symbol}'"),
            Self::Io { path, message } => write!(f, "{}: {message}", path.display()),
        }
    }
}

/// Fatal errors, which halt a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineError {
    /// No file was found at the input path.
    MissingInput(PathBuf),

    /// The input could not be read.
    Read { path: PathBuf, message: String },

    /// Some output could not be written.
    Write { path: PathBuf, message: String },

    /// The expression store failed.
    Store(StoreError),
}

impl From<StoreError> for PipelineError {
    fn from(e: StoreError) -> Self {
        PipelineError::Store(e)
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingInput(path) => write!(f, "no input file at {}", path.display()),
            Self::Read { path, message } => write!(f, "failed to read {}: {message}", path.display()),
            Self::Write { path, message } => {
                write!(f, "failed to write {}: {message}", path.display())
            }
            Self::Store(e) => write!(f, "{e}"),
        }
    }
}
