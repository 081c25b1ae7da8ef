use regex::Regex;

use super::{Match, MatcherId, NoTrace, ParseTrace};

/// The token that stands for the epsilon matcher in grammar text and in
/// matcher displays: it always matches the empty string.
pub const EPSILON_MARKER: &str = "\\0";

/// What one matcher slot does. Terminals carry their compiled pattern,
/// aggregates reference their operands by handle.
enum MatcherKind {
    /// Always matches "" without consuming input.
    Epsilon,

    /// Anchored regex match at the start of the remaining input.
    /// Covers literal and regex terminals alike.
    Terminal { regex: Regex },

    /// Left operand, then right operand on the remainder. No backtracking.
    Concat(MatcherId, MatcherId),

    /// Ordered alternative: right operand only runs if the left one
    /// returns `NoMatch` (zero-width success does not fall through).
    Choice(MatcherId, MatcherId),

    /// Right-recursive repetition of the operand.
    RepeatRight(MatcherId),

    /// Left-recursive repetition of the operand (mirrored result fold).
    RepeatLeft(MatcherId),

    /// Alias to another slot. A rule placeholder becomes a `Ref` to its
    /// compiled root, so references embedded before the rule was
    /// compiled see the resolution.
    Ref(MatcherId),

    /// A rule placeholder that has not been compiled yet. Must never be
    /// reachable from `parse` once grammar construction finished.
    Linking,
}

/// Which end of a repetition keeps its match text.
#[derive(Clone, Copy)]
enum Fold {
    KeepFirst,
    KeepLast,
}

struct Matcher {
    kind: MatcherKind,
    /// Human-readable reconstruction of the matcher, built eagerly when
    /// the matcher is created. Diagnostic only.
    display: String,
}

/// Arena of matchers.
///
/// Combinators allocate new slots and never mutate their operands, with
/// one exception: a `Linking` placeholder slot is resolved in place at
/// the end of grammar construction. After construction a set is
/// immutable, holds no per-call state and can serve `parse` calls from
/// multiple threads at once.
pub struct MatcherSet {
    slots: Vec<Matcher>,
}

impl MatcherSet {
    /// Create an empty matcher set.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
        }
    }

    fn push(&mut self, kind: MatcherKind, display: String) -> MatcherId {
        let id = MatcherId(self.slots.len());
        self.slots.push(Matcher {
            kind,
            display,
        });
        id
    }

    /// The human-readable reconstruction of a matcher's structure.
    pub fn display(&self, id: MatcherId) -> &str {
        &self.slots[id.0].display
    }

    /// Create a matcher that always matches the empty string without
    /// consuming input.
    pub fn epsilon(&mut self) -> MatcherId {
        self.push(MatcherKind::Epsilon, EPSILON_MARKER.to_string())
    }

    /// Create a terminal matcher from a regex pattern. The pattern is
    /// compiled once, anchored at the start of the remaining input.
    pub fn terminal(&mut self, pattern: &str) -> Result<MatcherId, regex::Error> {
        let regex = compile_anchored(pattern)?;
        let display = format!("r'{}'", pattern);
        Ok(self.push(MatcherKind::Terminal { regex }, display))
    }

    /// Create an unresolved placeholder slot for the rule `name`. Other
    /// matchers may embed its handle before [`resolve`](Self::resolve)
    /// fills it in; they render it as the `\name` reference.
    pub(crate) fn linking(&mut self, name: &str) -> MatcherId {
        self.push(MatcherKind::Linking, format!("\\{}", name))
    }

    /// Resolve a placeholder in place: from now on `slot` behaves like
    /// `root`. The slot object itself is never replaced, so every
    /// already-embedded handle to it sees the resolution; its by-name
    /// display stays, so embedded references keep rendering as `\name`
    /// no matter when their rule compiled.
    pub(crate) fn resolve(&mut self, slot: MatcherId, root: MatcherId) {
        self.slots[slot.0].kind = MatcherKind::Ref(root);
    }

    /// `a`, then `b` on the remainder. If `a` fails the whole
    /// combination fails with the input unchanged; if `b` fails its
    /// result and remainder are propagated as-is (no backtracking into
    /// `a`).
    pub fn concat(&mut self, a: MatcherId, b: MatcherId) -> MatcherId {
        let display = format!("{} + {}", self.display(a), self.display(b));
        self.push(MatcherKind::Concat(a, b), display)
    }

    /// Ordered alternative: `a` wins whenever it matches, even
    /// zero-width; `b` runs on the original input only when `a` returns
    /// `NoMatch`.
    pub fn choice(&mut self, a: MatcherId, b: MatcherId) -> MatcherId {
        let display = format!("({}) | ({})", self.display(a), self.display(b));
        self.push(MatcherKind::Choice(a, b), display)
    }

    /// Repeat `a` as long as it matches and consumes input, composing
    /// right-recursively: the most recent non-empty match text wins.
    pub fn one_or_more_right(&mut self, a: MatcherId) -> MatcherId {
        let display = format!("({})+", self.display(a));
        self.push(MatcherKind::RepeatRight(a), display)
    }

    /// Repeat `a` as long as it matches and consumes input, composing
    /// left-recursively: the earliest non-empty match text wins.
    pub fn one_or_more_left(&mut self, a: MatcherId) -> MatcherId {
        let display = format!("+({})", self.display(a));
        self.push(MatcherKind::RepeatLeft(a), display)
    }

    /// Run the matcher `id` against `input`.
    ///
    /// On success the matched prefix is removed from the returned
    /// remainder; on failure the input is returned unchanged together
    /// with [`Match::NoMatch`]. Partial consumption is a normal success,
    /// callers inspect the remainder.
    pub fn parse<'a>(&self, id: MatcherId, input: &'a str) -> (&'a str, Match<'a>) {
        self.parse_with(id, input, &mut NoTrace)
    }

    /// Like [`parse`](Self::parse), but reports every evaluation step to
    /// the given tracer.
    pub fn parse_with<'a>(
        &self,
        id: MatcherId,
        input: &'a str,
        trace: &mut dyn ParseTrace,
    ) -> (&'a str, Match<'a>) {
        let matcher = &self.slots[id.0];
        trace.enter(&matcher.display, input);
        let (rest, result) = self.eval(&matcher.kind, input, trace);
        trace.leave(&matcher.display, result.text());
        (rest, result)
    }

    fn eval<'a>(
        &self,
        kind: &MatcherKind,
        input: &'a str,
        trace: &mut dyn ParseTrace,
    ) -> (&'a str, Match<'a>) {
        match kind {
            MatcherKind::Epsilon => (input, Match::Matched("")),
            MatcherKind::Terminal { regex } => match regex.find(input) {
                Some(found) => (&input[found.end()..], Match::Matched(found.as_str())),
                None => (input, Match::NoMatch),
            },
            MatcherKind::Concat(a, b) => {
                let (rest, left) = self.parse_with(*a, input, trace);
                let Match::Matched(left_text) = left else {
                    return (input, Match::NoMatch);
                };
                let (rest, right) = self.parse_with(*b, rest, trace);
                match right {
                    // a zero-width right match reports the left text, so
                    // that the last token that consumed anything wins
                    Match::Matched(text) if text.is_empty() => (rest, Match::Matched(left_text)),
                    other => (rest, other),
                }
            },
            MatcherKind::Choice(a, b) => match self.parse_with(*a, input, trace) {
                (rest, Match::Matched(text)) => (rest, Match::Matched(text)),
                (_, Match::NoMatch) => self.parse_with(*b, input, trace),
            },
            MatcherKind::RepeatRight(a) => self.repeat(*a, input, trace, Fold::KeepLast),
            MatcherKind::RepeatLeft(a) => self.repeat(*a, input, trace, Fold::KeepFirst),
            MatcherKind::Ref(target) => self.parse_with(*target, input, trace),
            MatcherKind::Linking => {
                panic!("parse() reached a rule placeholder that was never compiled");
            },
        }
    }

    fn repeat<'a>(
        &self,
        item: MatcherId,
        input: &'a str,
        trace: &mut dyn ParseTrace,
        fold: Fold,
    ) -> (&'a str, Match<'a>) {
        let mut rest = input;
        let mut text: Option<&'a str> = None;

        loop {
            if rest.is_empty() {
                break;
            }
            let (next, step) = self.parse_with(item, rest, trace);
            match step {
                Match::Matched(step_text) => {
                    if !step_text.is_empty() {
                        match fold {
                            Fold::KeepLast => text = Some(step_text),
                            Fold::KeepFirst => text = text.or(Some(step_text)),
                        }
                    }
                    let progressed = next.len() < rest.len();
                    rest = next;
                    // a step that consumed nothing would repeat forever
                    if !progressed {
                        break;
                    }
                },
                Match::NoMatch => {
                    // no step made it past the first character
                    if rest.len() == input.len() {
                        return (input, Match::NoMatch);
                    }
                    break;
                },
            }
        }

        (rest, Match::Matched(text.unwrap_or("")))
    }
}

fn compile_anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})", pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_anchored() {
        let mut set = MatcherSet::new();
        let digits = set.terminal(r"\d+").unwrap();

        assert_eq!(set.parse(digits, "123abc"), ("abc", Match::Matched("123")));
        // a match anywhere but position 0 does not count
        assert_eq!(set.parse(digits, "abc123"), ("abc123", Match::NoMatch));
    }

    #[test]
    fn test_terminal_rejects_bad_pattern() {
        let mut set = MatcherSet::new();
        assert!(set.terminal("(a").is_err());
    }

    #[test]
    fn test_zero_width_is_not_failure() {
        let mut set = MatcherSet::new();
        let stars = set.terminal("a*").unwrap();

        assert_eq!(set.parse(stars, "b"), ("b", Match::Matched("")));
        assert_ne!(set.parse(stars, "b").1, Match::NoMatch);
    }

    #[test]
    fn test_epsilon() {
        let mut set = MatcherSet::new();
        let eps = set.epsilon();

        assert_eq!(set.parse(eps, "anything"), ("anything", Match::Matched("")));
        assert_eq!(set.parse(eps, ""), ("", Match::Matched("")));
    }

    #[test]
    fn test_concat_no_backtracking() {
        let mut set = MatcherSet::new();
        let word = set.terminal(r"\w+").unwrap();
        let space = set.terminal(" ").unwrap();
        let pair = set.concat(word, space);

        assert_eq!(set.parse(pair, "ab cd"), ("cd", Match::Matched(" ")));
        // first operand fails: input unchanged
        assert_eq!(set.parse(pair, " ab"), (" ab", Match::NoMatch));
        // second operand fails: its remainder is propagated as-is
        assert_eq!(set.parse(pair, "ab"), ("", Match::NoMatch));
    }

    #[test]
    fn test_concat_reports_last_consuming_match() {
        let mut set = MatcherSet::new();
        let word = set.terminal(r"\w+").unwrap();
        let eps = set.epsilon();
        let pair = set.concat(word, eps);

        // the zero-width right match does not hide what the left matched
        assert_eq!(set.parse(pair, "abc"), ("", Match::Matched("abc")));
    }

    #[test]
    fn test_concat_associative_in_effect() {
        for input in ["ab cd", "ab cd ef", "x", ""] {
            let mut set = MatcherSet::new();
            let a = set.terminal(r"\w+").unwrap();
            let b = set.epsilon();
            let c = set.terminal(r" \w+").unwrap();

            let ab = set.concat(a, b);
            let left = set.concat(ab, c);
            let bc = set.concat(b, c);
            let right = set.concat(a, bc);

            assert_eq!(set.parse(left, input), set.parse(right, input));
        }
    }

    #[test]
    fn test_choice_is_ordered() {
        let mut set = MatcherSet::new();
        let eps = set.epsilon();
        let short = set.terminal("x").unwrap();
        let long = set.terminal("xx").unwrap();

        // the first alternative wins even when the second matches more
        let first_short = set.choice(short, long);
        assert_eq!(set.parse(first_short, "xx"), ("x", Match::Matched("x")));

        // zero-width success does not fall through to the alternative
        let eps_first = set.choice(eps, long);
        assert_eq!(set.parse(eps_first, "xx"), ("xx", Match::Matched("")));
    }

    #[test]
    fn test_choice_falls_through_on_no_match() {
        let mut set = MatcherSet::new();
        let digits = set.terminal(r"\d+").unwrap();
        let word = set.terminal(r"\w+").unwrap();
        let pair = set.concat(digits, word);
        let either = set.choice(pair, word);

        // the first alternative consumed "12" before failing; the
        // second one still runs on the original input
        assert_eq!(set.parse(either, "12"), ("", Match::Matched("12")));
    }

    #[test]
    fn test_repeat_right() {
        let mut set = MatcherSet::new();
        let item = set.terminal("a.").unwrap();
        let repeated = set.one_or_more_right(item);

        // most progress, most recent match wins
        assert_eq!(set.parse(repeated, "axayb"), ("b", Match::Matched("ay")));
        assert_eq!(set.parse(repeated, "b"), ("b", Match::NoMatch));
    }

    #[test]
    fn test_repeat_left_keeps_first_match() {
        let mut set = MatcherSet::new();
        let item = set.terminal("a.").unwrap();
        let repeated = set.one_or_more_left(item);

        assert_eq!(set.parse(repeated, "axayb"), ("b", Match::Matched("ax")));
    }

    #[test]
    fn test_repeat_terminates_on_empty_input() {
        let mut set = MatcherSet::new();
        let item = set.terminal(r"\w+").unwrap();
        let repeated = set.one_or_more_right(item);

        assert_eq!(set.parse(repeated, ""), ("", Match::Matched("")));
    }

    #[test]
    fn test_repeat_terminates_on_zero_width_step() {
        let mut set = MatcherSet::new();
        let stars = set.terminal("a*").unwrap();
        let repeated = set.one_or_more_right(stars);

        // "a*" matches zero-width forever on "b"; the repetition must
        // stop after the first zero-consumption step
        assert_eq!(set.parse(repeated, "b"), ("b", Match::Matched("")));
        assert_eq!(set.parse(repeated, "aab"), ("b", Match::Matched("aa")));
    }

    #[test]
    fn test_display_reconstruction() {
        let mut set = MatcherSet::new();
        let word = set.terminal(r"\w+").unwrap();
        let eps = set.epsilon();
        let pair = set.concat(word, eps);
        let either = set.choice(pair, word);

        assert_eq!(set.display(either), r"(r'\w+' + \0) | (r'\w+')");
    }

    #[test]
    fn test_trace_observer_sees_every_step() {
        struct Count(usize);
        impl ParseTrace for Count {
            fn enter(&mut self, _matcher: &str, _input: &str) {
                self.0 += 1;
            }
        }

        let mut set = MatcherSet::new();
        let a = set.terminal("a").unwrap();
        let b = set.epsilon();
        let pair = set.concat(a, b);

        let mut count = Count(0);
        set.parse_with(pair, "a", &mut count);
        // the aggregate and both operands
        assert_eq!(count.0, 3);
    }

    #[test]
    fn test_set_is_sync() {
        fn check<T: Send + Sync>() {}
        check::<MatcherSet>();
    }
}
