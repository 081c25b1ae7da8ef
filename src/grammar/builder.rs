use std::fs;
use std::path::Path;

use crate::{
    error::CompileError,
    grammar::Grammar,
    parser::is_identifier,
};

/// The GrammarBuilder collects rule definitions and links them into a
/// [`Grammar`].
///
/// Use it like so:
/// ```no_run
/// use textgram::grammar::Grammar;
///
/// // Join rules from several sources before linking:
/// let grammar = Grammar::builder()
///     // Rules from a grammar file
///     .rules_file("my-grammar.gram").unwrap()
///     // More rules given inline
///     .rules_text("EOL:\\n").unwrap()
///     // Start somewhere other than the first rule
///     .root("RECORD")
///     .build().unwrap();
/// ```
pub struct GrammarBuilder {
    defs: Vec<(String, String)>,
    root: Option<String>,
}

impl GrammarBuilder {
    pub(crate) fn new() -> Self {
        Self {
            defs: Vec::new(),
            root: None,
        }
    }

    /// Add rules from grammar text: one `NAME: expression` per line.
    ///
    /// `NAME` is a bare identifier, optionally carrying the `\` sigil
    /// used to reference it. Everything after the first `:` is the
    /// expression, spaces included; blank lines are skipped.
    pub fn rules_text(mut self, text: &str) -> Result<Self, CompileError> {
        for (number, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let Some(colon) = line.find(':') else {
                return Err(CompileError::MalformedRule(number + 1, line.to_string()));
            };
            let name = line[..colon].trim().trim_start_matches('\\');
            if !is_identifier(name) {
                return Err(CompileError::MalformedRule(number + 1, line.to_string()));
            }
            let expression = &line[colon + 1..];
            self.defs.push((name.to_string(), expression.to_string()));
        }
        Ok(self)
    }

    /// Add rules from a grammar file in the same line format.
    pub fn rules_file<P: AsRef<Path>>(self, path: P) -> Result<Self, CompileError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| CompileError::Io(path.to_path_buf(), e))?;
        self.rules_text(&text)
    }

    /// Start parsing from the rule named `root` instead of the first
    /// rule.
    pub fn root<S: Into<String>>(mut self, root: S) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Link all collected rules into a [`Grammar`].
    pub fn build(self) -> Result<Grammar, CompileError> {
        Grammar::link(self.defs, self.root)
    }
}
