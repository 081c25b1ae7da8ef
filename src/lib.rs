//! This library compiles a small textual grammar description into an
//! executable parser that consumes an input string left to right. It is
//! meant for ad-hoc structured-text extraction (log lines, tokenized
//! records), not for general language compilation.
//!
//! It consists of
//! - __matcher__: the symbol algebra. A matcher parses a prefix of the
//!   remaining input; combinators compose matchers by concatenation,
//!   ordered choice and repetition.
//! - __grammar__: the grammar compiler. It turns rule text into a
//!   linked graph of matchers, resolving forward and recursive rule
//!   references through a two-phase build.
//!
//! ## Getting started
//! A grammar is a sequence of lines `NAME: expression`. Inside an
//! expression, tokens are separated by single spaces (a doubled space
//! escapes a literal space); `\NAME` references another rule, `\0` is
//! the empty match, `+` sequences, `|` is an ordered choice, and any
//! other token is a regex matched at the current position. The first
//! rule is the root:
//! ```
//! use textgram::grammar::Grammar;
//! use textgram::matcher::Match;
//!
//! let grammar = Grammar::compile(
//!     "LINE:\\TIME  -  \\MSG\n\
//!      TIME:\\d\\d:\\d\\d\n\
//!      MSG:\\w.*",
//! ).unwrap();
//!
//! let (rest, result) = grammar.parse("03:45 - first message");
//! assert_eq!(rest, "");
//! assert_eq!(result, Match::Matched("first message"));
//! ```
//! An input that does not fit the grammar is not an error: `parse`
//! returns the [`Match::NoMatch`](matcher::Match::NoMatch) value and
//! leaves the input untouched. Malformed grammar text, on the other
//! hand, fails [`Grammar::compile`](grammar::Grammar::compile) with a
//! [`CompileError`](error::CompileError) naming the offending rule.

#![deny(missing_docs)]

pub(crate) mod parser;

pub mod error;
pub mod grammar;
pub mod matcher;

#[cfg(test)]
mod tests;
