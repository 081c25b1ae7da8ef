//! The rule table and the two-phase grammar build.
//!
//! Use it like so:
//! ```
//! use textgram::grammar::Grammar;
//! use textgram::matcher::Match;
//!
//! let grammar = Grammar::compile(
//!     "G:\\WORD \\SPACE \\G | \\WORD | \\0\n\
//!      WORD:\\w+\n\
//!      SPACE: ",
//! ).unwrap();
//!
//! let (rest, result) = grammar.parse("tera watt hours");
//! assert_eq!(rest, "");
//! assert_eq!(result, Match::Matched("hours"));
//! ```
//!
//! Construction runs in two phases. Phase 1 registers an unresolved
//! placeholder matcher for every rule name, so that any rule's
//! expression can embed a reference to a rule that is compiled later
//! (forward references, mutual recursion, self-recursion). Phase 2
//! compiles each rule's expression and resolves the rule's placeholder
//! in place. Only a fully linked grammar is ever returned, and once
//! built it is immutable and safe to parse with from multiple threads.
//!
//! Every recursive cycle of rules must offer a terminating alternative
//! (an epsilon or terminal base case). The engine does not detect
//! cycles without one; they recurse until the stack runs out.

mod builder;
mod compile;

pub use builder::*;

use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use ahash::RandomState;
use itertools::Itertools;

use crate::{
    error::CompileError,
    matcher::{Match, MatcherId, MatcherSet, NoTrace, ParseTrace},
};

struct Rule {
    name: String,
    text: String,
    slot: MatcherId,
    /// The compiled expression the slot aliases. The slot itself keeps
    /// displaying as `\name`, so this is what rule listings show.
    body: MatcherId,
}

/// A compiled grammar: a named collection of rules, each linked to its
/// matcher, plus the designated root rule.
pub struct Grammar {
    matchers: MatcherSet,
    rules: Vec<Rule>,
    index: HashMap<String, usize, RandomState>,
    root: usize,
}

impl Grammar {
    /// Start building a grammar rule by rule. See [`GrammarBuilder`].
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    /// Compile grammar text into a parser.
    ///
    /// The text is a sequence of `NAME: expression` lines, one rule per
    /// line; the first rule is the root. See the crate documentation
    /// for the expression syntax.
    pub fn compile(text: &str) -> Result<Self, CompileError> {
        Self::builder().rules_text(text)?.build()
    }

    /// The two-phase build. `defs` are `(name, expression)` pairs in
    /// declaration order, `root` an optional override of the start rule.
    pub(crate) fn link(
        defs: Vec<(String, String)>,
        root: Option<String>,
    ) -> Result<Self, CompileError> {
        if defs.is_empty() {
            return Err(CompileError::EmptyGrammar);
        }

        let mut matchers = MatcherSet::new();
        let mut rules = Vec::with_capacity(defs.len());
        let mut index: HashMap<String, usize, RandomState> = HashMap::default();
        let mut slots: HashMap<String, MatcherId, RandomState> = HashMap::default();

        // phase 1: every rule gets its placeholder before any
        // expression compiles
        for (name, text) in defs {
            if index.contains_key(&name) {
                return Err(CompileError::DuplicateRule(name));
            }
            let slot = matchers.linking(&name);
            index.insert(name.clone(), rules.len());
            slots.insert(name.clone(), slot);
            rules.push(Rule {
                name,
                text,
                slot,
                body: slot,
            });
        }

        let root = match root {
            Some(name) => match index.get(&name) {
                Some(position) => *position,
                None => return Err(CompileError::MissingRoot(name)),
            },
            None => 0,
        };

        // phase 2: compile each expression and resolve its placeholder
        // in place, so handles embedded during other compilations see it
        for rule in &mut rules {
            let compiled = compile::compile_expression(&mut matchers, &slots, &rule.name, &rule.text)?;
            matchers.resolve(rule.slot, compiled);
            rule.body = compiled;
        }

        Ok(Self {
            matchers,
            rules,
            index,
            root,
        })
    }

    /// The name of the root rule.
    pub fn root(&self) -> &str {
        &self.rules[self.root].name
    }

    /// The rule names, in declaration order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_str())
    }

    /// The raw right-hand-side text of a rule.
    pub fn rule_text(&self, name: &str) -> Option<&str> {
        let position = self.index.get(name)?;
        Some(&self.rules[*position].text)
    }

    /// The matcher a rule compiled to, for direct use with
    /// [`matchers`](Self::matchers).
    pub fn rule_matcher(&self, name: &str) -> Option<MatcherId> {
        let position = self.index.get(name)?;
        Some(self.rules[*position].slot)
    }

    /// The matcher set this grammar compiled into. New matchers cannot
    /// be added, but rule matchers can be run and inspected directly.
    pub fn matchers(&self) -> &MatcherSet {
        &self.matchers
    }

    /// Parse `input` with the root rule.
    ///
    /// Returns the remaining input and the match result. A
    /// [`Match::NoMatch`] is an expected outcome, not an error, and a
    /// non-empty remainder is a normal partial match: callers that need
    /// full consumption check `remainder.is_empty()`.
    pub fn parse<'a>(&self, input: &'a str) -> (&'a str, Match<'a>) {
        self.parse_with(input, &mut NoTrace)
    }

    /// Like [`parse`](Self::parse), reporting every matcher evaluation
    /// to the given tracer.
    pub fn parse_with<'a>(
        &self,
        input: &'a str,
        trace: &mut dyn ParseTrace,
    ) -> (&'a str, Match<'a>) {
        self.matchers.parse_with(self.rules[self.root].slot, input, trace)
    }

    /// Parse `input` starting from the named rule instead of the root.
    /// Returns `None` for an unknown rule name.
    pub fn parse_rule<'a>(&self, name: &str, input: &'a str) -> Option<(&'a str, Match<'a>)> {
        self.parse_rule_with(name, input, &mut NoTrace)
    }

    /// Like [`parse_rule`](Self::parse_rule), with a tracer.
    pub fn parse_rule_with<'a>(
        &self,
        name: &str,
        input: &'a str,
        trace: &mut dyn ParseTrace,
    ) -> Option<(&'a str, Match<'a>)> {
        let slot = self.rule_matcher(name)?;
        Some(self.matchers.parse_with(slot, input, trace))
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let lines = self
            .rules
            .iter()
            .map(|rule| format!("{}: {}", rule.name, self.matchers.display(rule.body)))
            .join("\n");
        write!(f, "{}", lines)
    }
}
