//! Infix to postfix (Reverse Polish) conversion of a rule expression.
//!
//! A plain shunting-yard pass: `+` and `|` share one precedence class
//! and are left-associative, so `a + b | c` groups as `(a + b) | c`.
//! Parentheses act as barriers on the operator stack; both mismatch
//! directions are construction errors naming the offending rule.

use crate::error::CompileError;

use super::{Atom, Op};

/// One element of the postfix stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PostfixAtom {
    Op(Op),
    Token(String),
}

enum StackEntry {
    Op(Op),
    Barrier,
}

/// Reorder the atom stream of rule `rule` into postfix form.
pub(crate) fn to_postfix(rule: &str, atoms: Vec<Atom>) -> Result<Vec<PostfixAtom>, CompileError> {
    let mut stack = Vec::new();
    let mut output = Vec::new();

    for atom in atoms {
        match atom {
            Atom::Token(token) => output.push(PostfixAtom::Token(token)),
            Atom::Op(op) => {
                // left-associative single precedence class: everything
                // down to the barrier goes out first
                while let Some(StackEntry::Op(top)) = stack.last() {
                    output.push(PostfixAtom::Op(*top));
                    stack.pop();
                }
                stack.push(StackEntry::Op(op));
            },
            Atom::Open => stack.push(StackEntry::Barrier),
            Atom::Close => loop {
                match stack.pop() {
                    Some(StackEntry::Op(op)) => output.push(PostfixAtom::Op(op)),
                    Some(StackEntry::Barrier) => break,
                    None => return Err(CompileError::UnmatchedCloseParen(rule.to_string())),
                }
            },
        }
    }

    while let Some(entry) = stack.pop() {
        match entry {
            StackEntry::Op(op) => output.push(PostfixAtom::Op(op)),
            StackEntry::Barrier => return Err(CompileError::UnmatchedOpenParen(rule.to_string())),
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;

    fn token(text: &str) -> PostfixAtom {
        PostfixAtom::Token(text.to_string())
    }

    #[test]
    fn test_left_associative_grouping() {
        // a + b | c groups as (a + b) | c
        let postfix = to_postfix("R", tokenize("a + b | c")).unwrap();
        assert_eq!(
            postfix,
            vec![
                token("a"),
                token("b"),
                PostfixAtom::Op(Op::Concat),
                token("c"),
                PostfixAtom::Op(Op::Choice),
            ],
        );
    }

    #[test]
    fn test_parens_override_order() {
        // a + ( b | c ) evaluates the choice first
        let postfix = to_postfix("R", tokenize("a + ( b | c )")).unwrap();
        assert_eq!(
            postfix,
            vec![
                token("a"),
                token("b"),
                token("c"),
                PostfixAtom::Op(Op::Choice),
                PostfixAtom::Op(Op::Concat),
            ],
        );
    }

    #[test]
    fn test_unmatched_open_paren() {
        let result = to_postfix("R", tokenize("( a"));
        assert!(matches!(result, Err(CompileError::UnmatchedOpenParen(_))));
    }

    #[test]
    fn test_unmatched_close_paren() {
        let result = to_postfix("R", tokenize("a )"));
        assert!(matches!(result, Err(CompileError::UnmatchedCloseParen(_))));
    }
}
