use std::num::NonZeroUsize;

use bfcc::{translate, DEFAULT_TAPE_SIZE};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn statements(c: &str) -> Vec<&str> {
    let body = c
        .split_once("int pos = 0;")
        .and_then(|(_, rest)| rest.strip_suffix("\n}"))
        .unwrap();
    body.split_inclusive(|ch| ch == ';' || ch == '{' || ch == '}')
        .collect()
}

#[test]
fn plus_run_is_one_statement() {
    assert_eq!(
        statements(&translate("+++", DEFAULT_TAPE_SIZE)),
        vec!["tape[pos] += 3;"]
    );
}

#[test]
fn run_breaks_on_operator_change() {
    assert_eq!(
        statements(&translate("+++--", DEFAULT_TAPE_SIZE)),
        vec!["tape[pos] += 3;", "tape[pos] -= 2;"]
    );
}

#[test]
fn output_between_pluses_breaks_the_run() {
    assert_eq!(
        statements(&translate("+.+", DEFAULT_TAPE_SIZE)),
        vec!["tape[pos] += 1;", "printf(\"%c\", tape[pos]);", "tape[pos] += 1;"]
    );
}

#[test]
fn stray_close_bracket_is_dropped() {
    let c = translate("]", DEFAULT_TAPE_SIZE);
    assert!(!c.contains("while"));
    assert_eq!(statements(&c), Vec::<&str>::new());
}

#[test]
fn unclosed_open_bracket_stays_open() {
    let c = translate("[+", DEFAULT_TAPE_SIZE);
    assert_eq!(
        statements(&c),
        vec!["while(tape[pos] != 0){", "tape[pos] += 1;"]
    );
}

#[test]
fn end_to_end_scenario_translation() {
    let c = translate("++>,[.-]", NonZeroUsize::new(10).unwrap());
    assert_eq!(
        c,
        "#include <stdio.h>\n\
         int main(){int tape[10]={0};int pos = 0;\
         tape[pos] += 2;pos += 1;tape[pos] = getchar();\
         while(tape[pos] != 0){printf(\"%c\", tape[pos]);tape[pos] -= 1;}\n}"
    );
}

#[test]
fn translation_is_deterministic() {
    let source = "++[>+<-]>.";
    assert_eq!(
        translate(source, DEFAULT_TAPE_SIZE),
        translate(source, DEFAULT_TAPE_SIZE)
    );
}

const COMMANDS: &str = "><+-.,[]";

fn command_string() -> impl Strategy<Value = String> {
    let command = proptest::sample::select(COMMANDS.as_bytes());
    proptest::collection::vec(command, 0..64)
        .prop_map(|bytes| String::from_utf8(bytes).unwrap())
}

fn comment_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 \n\t#!?]{1,8}"
}

proptest! {
    #[test]
    fn tape_size_is_always_embedded(source in ".*", size in 1usize..1_000_000) {
        let c = translate(&source, NonZeroUsize::new(size).unwrap());
        let decl = format!("int tape[{size}]={{0}};");
        prop_assert!(c.contains(&decl));
    }

    #[test]
    fn closes_never_outnumber_opens(source in command_string()) {
        let c = translate(&source, DEFAULT_TAPE_SIZE);
        let body = statements(&c);
        let opens = body.iter().filter(|s| s.ends_with('{')).count();
        let closes = body.iter().filter(|s| **s == "}").count();
        prop_assert!(closes <= opens);
    }

    // Comments inserted where two neighbouring commands differ, or at either
    // end, do not change the output. A comment inside a run splits it.
    #[test]
    fn comments_at_run_boundaries_are_ignored(
        source in command_string(),
        comments in proptest::collection::vec(comment_string(), 65),
    ) {
        let bytes = source.as_bytes();
        let mut commented = String::new();
        for (i, c) in source.chars().enumerate() {
            let splits_run = i > 0
                && bytes[i - 1] == bytes[i]
                && matches!(c, '>' | '<' | '+' | '-');
            if !splits_run {
                commented.push_str(&comments[i]);
            }
            commented.push(c);
        }
        commented.push_str(&comments[source.len()]);

        prop_assert_eq!(
            translate(&source, DEFAULT_TAPE_SIZE),
            translate(&commented, DEFAULT_TAPE_SIZE)
        );
    }
}

#[test]
fn translations_on_separate_threads_do_not_interact() {
    let sources = ["[[[", "]]]+", "++>,[.-]", "[-]"];
    let expected: Vec<String> = sources
        .iter()
        .map(|s| translate(s, DEFAULT_TAPE_SIZE))
        .collect();

    let results: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|s| scope.spawn(move || translate(s, DEFAULT_TAPE_SIZE)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, expected);
}
