//! Evaluation of a rule's postfix stream into a matcher graph.
//!
//! A token is classified here, against the rule table: it may name a
//! rule (its placeholder slot is embedded by handle, so the rule can be
//! compiled later), stand for epsilon, or be a terminal pattern.

use std::collections::HashMap;

use ahash::RandomState;

use crate::{
    error::CompileError,
    matcher::{MatcherId, MatcherSet, EPSILON_MARKER},
    parser::{is_identifier, to_postfix, tokenize, Op, PostfixAtom},
};

/// Compile the right-hand side `text` of rule `rule` into a matcher.
///
/// `slots` maps every rule name of the grammar to its placeholder, all
/// of which exist before the first expression compiles (phase 1), so
/// forward and recursive references resolve here by handle.
pub(crate) fn compile_expression(
    matchers: &mut MatcherSet,
    slots: &HashMap<String, MatcherId, RandomState>,
    rule: &str,
    text: &str,
) -> Result<MatcherId, CompileError> {
    let postfix = to_postfix(rule, tokenize(text))?;
    let mut stack: Vec<MatcherId> = Vec::new();

    for atom in postfix {
        match atom {
            PostfixAtom::Op(op) => {
                // right operand first: the stack reverses operand order
                let Some(right) = stack.pop() else {
                    return Err(CompileError::TooFewOperands(rule.to_string(), op.symbol()));
                };
                let Some(left) = stack.pop() else {
                    return Err(CompileError::TooFewOperands(rule.to_string(), op.symbol()));
                };
                let combined = match op {
                    Op::Concat => matchers.concat(left, right),
                    Op::Choice => matchers.choice(left, right),
                };
                stack.push(combined);
            },
            PostfixAtom::Token(token) => {
                stack.push(operand(matchers, slots, rule, token)?);
            },
        }
    }

    if stack.len() > 1 {
        return Err(CompileError::TooManyOperands(rule.to_string()));
    }
    match stack.pop() {
        Some(id) => Ok(id),
        // an empty right-hand side is the empty rule
        None => Ok(matchers.epsilon()),
    }
}

fn operand(
    matchers: &mut MatcherSet,
    slots: &HashMap<String, MatcherId, RandomState>,
    rule: &str,
    token: String,
) -> Result<MatcherId, CompileError> {
    let trimmed = token.trim();
    if trimmed == EPSILON_MARKER {
        return Ok(matchers.epsilon());
    }

    let name = trimmed.trim_start_matches('\\');
    if let Some(slot) = slots.get(name) {
        return Ok(*slot);
    }

    // a sigiled multi-character identifier can only be meant as a rule
    // reference; single characters stay patterns so that regex classes
    // like \d and \w keep working
    if trimmed.starts_with('\\') && name.chars().count() > 1 && is_identifier(name) {
        return Err(CompileError::UndefinedRule(rule.to_string(), name.to_string()));
    }

    matchers
        .terminal(&token)
        .map_err(|e| CompileError::InvalidPattern(rule.to_string(), token, e))
}
