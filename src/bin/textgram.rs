use std::io::BufRead;

use clap::Parser;
use textgram::{
    grammar::Grammar,
    matcher::{Match, ParseTrace},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grammar file: one 'NAME: expression' rule per line
    #[arg(long, value_name = "GRAMMAR")]
    grammar: String,

    /// Parse with this rule instead of the grammar's root
    #[arg(long)]
    rule: Option<String>,

    /// Print every matcher evaluation step to stderr
    #[arg(long)]
    trace: bool,

    /// Inputs to parse. Reads stdin lines when empty
    input: Vec<String>,
}

struct StderrTrace {
    depth: usize,
}

impl ParseTrace for StderrTrace {
    fn enter(&mut self, matcher: &str, input: &str) {
        eprintln!("{}{} ? {:?}", "  ".repeat(self.depth), matcher, input);
        self.depth += 1;
    }

    fn leave(&mut self, matcher: &str, matched: Option<&str>) {
        self.depth -= 1;
        eprintln!("{}{} -> {:?}", "  ".repeat(self.depth), matcher, matched);
    }
}

fn parse_one(grammar: &Grammar, args: &Args, input: &str) {
    let outcome = match &args.rule {
        Some(rule) => {
            if args.trace {
                grammar.parse_rule_with(rule, input, &mut StderrTrace { depth: 0 })
            } else {
                grammar.parse_rule(rule, input)
            }
        },
        None => Some(if args.trace {
            grammar.parse_with(input, &mut StderrTrace { depth: 0 })
        } else {
            grammar.parse(input)
        }),
    };

    let Some((rest, result)) = outcome else {
        eprintln!("no rule named '{}'", args.rule.as_deref().unwrap_or_default());
        std::process::exit(1);
    };

    match result {
        Match::Matched(text) => println!("match: {:?} remainder: {:?}", text, rest),
        Match::NoMatch => println!("no match"),
    }
}

fn main() {
    let args = Args::parse();

    let grammar = match Grammar::builder().rules_file(&args.grammar) {
        Ok(builder) => builder.build(),
        Err(e) => Err(e),
    };
    let grammar = match grammar {
        Ok(grammar) => grammar,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        },
    };

    if args.input.is_empty() {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            parse_one(&grammar, &args, &line.unwrap());
        }
    } else {
        for input in &args.input {
            parse_one(&grammar, &args, input);
        }
    }
}
