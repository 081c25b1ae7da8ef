//! Error types of this crate.
//!
//! Only grammar *construction* can fail. Running a built parser never
//! errors: an input that does not conform to the grammar yields the
//! [`Match::NoMatch`](crate::matcher::Match::NoMatch) value instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can appear while compiling a grammar into a parser.
///
/// Every variant identifies the rule whose definition is defective,
/// so a multi-rule grammar can be fixed without guessing.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A grammar file could not be read
    #[error("failed to read grammar from {}: {1}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    /// A line of grammar text is not of the form `NAME: expression`
    #[error("line {0}: expected 'NAME: expression', got '{1}'")]
    MalformedRule(usize, String),

    /// The same rule name was defined twice
    #[error("rule '{0}' is defined more than once")]
    DuplicateRule(String),

    /// The grammar text contains no rules at all
    #[error("the grammar does not contain any rules")]
    EmptyGrammar,

    /// The requested root rule does not exist
    #[error("the root rule '{0}' is not defined")]
    MissingRoot(String),

    /// A `(` in a rule expression has no matching `)`
    #[error("rule '{0}': unmatched '('")]
    UnmatchedOpenParen(String),

    /// A `)` in a rule expression has no matching `(`
    #[error("rule '{0}': unmatched ')'")]
    UnmatchedCloseParen(String),

    /// An operator in a rule expression is missing an operand
    #[error("rule '{0}': too few operands for '{1}'")]
    TooFewOperands(String, char),

    /// A rule expression leaves more than one value on the operand stack
    #[error("rule '{0}': too many operands")]
    TooManyOperands(String),

    /// A rule expression references a rule that is never defined
    #[error("rule '{0}': reference to undefined rule '{1}'")]
    UndefinedRule(String, String),

    /// A terminal token of a rule expression is not a valid regex
    #[error("rule '{0}': invalid pattern '{1}': {2}")]
    InvalidPattern(String, String, #[source] regex::Error),
}
