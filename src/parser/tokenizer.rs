//! Splits one rule's right-hand side into a stream of atoms.
//!
//! Tokens are delimited by single spaces. A doubled space escapes a
//! literal space character that attaches to the adjoining tokens, so a
//! pattern can contain a space without being split by the delimiter:
//! `\T  -  \N` produces the tokens `\T `, ` - ` and ` \N`.

/// One atom of a rule expression. A `Token` is classified further
/// during postfix evaluation: it may name a rule, stand for epsilon, or
/// be a terminal pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Atom {
    Token(String),
    Op(Op),
    Open,
    Close,
}

/// The two explicit operators of the grammar language. They share one
/// precedence class and are left-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Concat,
    Choice,
}

impl Op {
    pub(crate) fn symbol(self) -> char {
        match self {
            Op::Concat => '+',
            Op::Choice => '|',
        }
    }
}

/// Split on single spaces, honoring the doubled-space escape.
pub(crate) fn split_rhs(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        current.push(chars[i]);
        i += 1;

        if i >= chars.len() || chars[i] == ' ' {
            // two consecutive spaces: the escaped literal space belongs
            // to the current token and to the next one
            if i + 1 < chars.len() && chars[i] == ' ' && chars[i + 1] == ' ' {
                current.push(' ');
            }
            tokens.push(std::mem::take(&mut current));
            i += 1;
        }
    }

    tokens
}

/// Split a rule's right-hand side and classify each token. Two
/// consecutive non-operator atoms mean "in order", so an implicit
/// [`Op::Concat`] is inserted between them.
pub(crate) fn tokenize(text: &str) -> Vec<Atom> {
    let mut atoms = Vec::new();
    let mut last_was_operand = false;

    for token in split_rhs(text) {
        let operator = match token.trim() {
            "+" => Some(Atom::Op(Op::Concat)),
            "|" => Some(Atom::Op(Op::Choice)),
            "(" => Some(Atom::Open),
            ")" => Some(Atom::Close),
            _ => None,
        };
        match operator {
            Some(atom) => {
                last_was_operand = false;
                atoms.push(atom);
            },
            None => {
                if last_was_operand {
                    atoms.push(Atom::Op(Op::Concat));
                }
                last_was_operand = true;
                atoms.push(Atom::Token(token));
            },
        }
    }

    atoms
}
