//! End-to-end extraction tests over whole grammars.

use crate::grammar::Grammar;
use crate::matcher::{Match, ParseTrace};

#[test]
fn test_word_list() {
    let grammar = Grammar::compile(
        "G:\\WORD \\SPACE \\G | \\WORD | \\0\n\
         WORD:\\w+\n\
         SPACE: ",
    )
    .unwrap();

    assert_eq!(grammar.parse("first second third"), ("", Match::Matched("third")));
    assert_eq!(grammar.parse(""), ("", Match::Matched("")));
    // parsing stops where the grammar stops fitting
    assert_eq!(grammar.parse("first second!"), ("!", Match::Matched("second")));
}

#[test]
fn test_timestamped_log_lines() {
    let grammar = Grammar::compile(
        "LOG:\\LINE \\EOL \\LOG | \\LINE | \\0\n\
         LINE:\\TIME  -  \\PID  -  \\MSG\n\
         TIME:\\d\\d:\\d\\d\n\
         PID:\\d+\n\
         MSG:\\w[^\\n]*\n\
         EOL:\\n",
    )
    .unwrap();

    let input = "03:45 - 12 - first message\n04:45 - 13 - second message";
    let (rest, result) = grammar.parse(input);
    assert_eq!(rest, "");
    assert!(result.is_match());

    // individual rules can be run on their own
    assert_eq!(
        grammar.parse_rule("LINE", input),
        Some(("\n04:45 - 13 - second message", Match::Matched("first message"))),
    );

    // a line that does not fit is left over (the separator before it
    // was already consumed by EOL)
    let (rest, result) = grammar.parse("03:45 - 12 - first\nbroken line");
    assert_eq!(rest, "broken line");
    assert!(result.is_match());
}

#[test]
fn test_grammar_from_file() {
    let grammar = Grammar::builder()
        .rules_file("test-data/grammars/syslog.gram")
        .unwrap()
        .build()
        .unwrap();

    let (rest, result) = grammar.parse("12:01 - 7 - daemon started\n12:02 - 7 - listening");
    assert_eq!(rest, "");
    assert!(result.is_match());
}

#[test]
fn test_space_rule_survives_file_round_trip() {
    // the WORD/SPACE grammar keeps a trailing-space expression on disk
    let grammar = Grammar::builder()
        .rules_file("test-data/grammars/words.gram")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(grammar.rule_text("SPACE"), Some(" "));
    assert_eq!(grammar.parse("alpha beta gamma"), ("", Match::Matched("gamma")));
}

#[test]
fn test_choice_takes_first_fitting_alternative() {
    let grammar = Grammar::compile(
        "V:\\HEX | \\DEC\n\
         HEX:0x[0-9a-f]+\n\
         DEC:\\d+",
    )
    .unwrap();

    assert_eq!(grammar.parse("0x1f rest"), (" rest", Match::Matched("0x1f")));
    // DEC also matches "0" of "0x1f", but HEX comes first
    assert_eq!(grammar.parse("42 rest"), (" rest", Match::Matched("42")));
}

#[test]
fn test_trace_reaches_rule_matchers() {
    struct Names(Vec<String>);
    impl ParseTrace for Names {
        fn enter(&mut self, matcher: &str, _input: &str) {
            self.0.push(matcher.to_string());
        }
    }

    let grammar = Grammar::compile("A:\\B x\nB:y").unwrap();
    let mut names = Names(Vec::new());
    grammar.parse_with("yx", &mut names);

    assert!(names.0.iter().any(|display| display.contains("r'y'")));
    assert!(names.0.iter().any(|display| display.contains("r'x'")));
    // the rule reference itself traces by name before its expansion
    assert!(names.0.iter().any(|display| display == "\\B"));
}

#[test]
fn test_parallel_parses_share_one_grammar() {
    let grammar = Grammar::compile("G:a \\G | \\0").unwrap();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(grammar.parse("aaa"), ("", Match::Matched("a")));
            });
        }
    });
}
