//! The front end for the grammar language itself: splitting a rule's
//! right-hand side into atoms and reordering them into postfix form.
//! The resulting postfix stream is evaluated against the rule table in
//! [`crate::grammar`].

mod postfix;
mod tokenizer;

pub(crate) use postfix::*;
pub(crate) use tokenizer::*;

/// Whether `text` is a bare identifier, the only shape a rule name may
/// take.
pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {},
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
