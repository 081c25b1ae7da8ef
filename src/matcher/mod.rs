//! The symbol algebra: matchers and the combinators over them.
//!
//! A [`Matcher`](MatcherSet) is one unit of parsing behavior with a
//! `parse(input) -> (remainder, result)` contract. Terminal matchers run
//! an anchored regex at the start of the remaining input; composite
//! matchers are built with [`MatcherSet::concat`], [`MatcherSet::choice`]
//! and the repetition combinators. All matchers live in a [`MatcherSet`]
//! arena and are addressed through [`MatcherId`] handles, which is what
//! lets recursive rules embed references to matchers that are compiled
//! later.
//!
//! Use it like so:
//! ```
//! use textgram::matcher::{Match, MatcherSet};
//!
//! let mut set = MatcherSet::new();
//! let word = set.terminal(r"\w+").unwrap();
//! let space = set.terminal(" ").unwrap();
//!
//! let (rest, result) = set.parse(word, "tera watt");
//! assert_eq!(result, Match::Matched("tera"));
//!
//! let (rest, _) = set.parse(space, rest);
//! assert_eq!(set.parse(word, rest), ("", Match::Matched("watt")));
//! ```

mod set;

pub use set::*;

/// The outcome of running a matcher against an input string.
///
/// A zero-width match is a success: `Matched("")` and `NoMatch` are
/// deliberately distinct values and must never be conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match<'a> {
    /// The matcher matched this prefix of the input (possibly empty).
    Matched(&'a str),

    /// The matcher did not match at the start of the input.
    NoMatch,
}

impl<'a> Match<'a> {
    /// Whether this outcome is a success, including zero-width success.
    pub fn is_match(&self) -> bool {
        matches!(self, Match::Matched(_))
    }

    /// The matched text, or `None` for [`Match::NoMatch`].
    pub fn text(&self) -> Option<&'a str> {
        match self {
            Match::Matched(text) => Some(text),
            Match::NoMatch => None,
        }
    }
}

/// Handle to one matcher inside a [`MatcherSet`].
///
/// Handles stay valid for the lifetime of their set and keep pointing at
/// the same slot even when the slot's behavior is filled in later, which
/// is how forward and recursive rule references resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatcherId(pub(crate) usize);

/// Observer for matcher evaluation.
///
/// Matchers never print anything themselves. Pass an implementation of
/// this trait to [`MatcherSet::parse_with`] or
/// [`Grammar::parse_with`](crate::grammar::Grammar::parse_with) to watch
/// every evaluation step. Both hooks default to doing nothing.
pub trait ParseTrace {
    /// Called before the matcher described by `matcher` runs against `input`.
    fn enter(&mut self, matcher: &str, input: &str) {
        let _ = (matcher, input);
    }

    /// Called after the matcher ran; `matched` is the matched text on success.
    fn leave(&mut self, matcher: &str, matched: Option<&str>) {
        let _ = (matcher, matched);
    }
}

/// A tracer that records nothing. This is what plain `parse` uses.
pub struct NoTrace;

impl ParseTrace for NoTrace {}
