use alloc::{string::ToString, vec, vec::Vec};

use rstest::rstest;

use super::utils::{document, events, run_fragments, script_text, split_into};
use crate::{ParseEvent, ParserOptions, SlideParser};

fn start(index: u64, title: &str) -> ParseEvent {
    ParseEvent::SlideStart {
        index,
        title: title.to_string(),
    }
}

fn chunk(index: u64, fragment: &str) -> ParseEvent {
    ParseEvent::SlideChunk {
        index,
        fragment: fragment.to_string(),
    }
}

#[test]
fn single_slide_split_mid_key() {
    let emitted: Vec<ParseEvent> = run_fragments(&[
        "{\"sl".to_string(),
        "ides\":[{\"sli".to_string(),
        "deNumber\":1,\"title\":\"Intro\",\"script\":\"Hi!\"}]}".to_string(),
    ])
    .into_iter()
    .collect::<Result<_, _>>()
    .unwrap();

    assert_eq!(
        emitted,
        vec![
            start(1, "Intro"),
            chunk(1, "H"),
            chunk(1, "i"),
            chunk(1, "!"),
            ParseEvent::SlideComplete { index: 1 },
        ]
    );
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(7)]
#[case(29)]
#[case(1000)]
fn fragmentation_is_invisible(#[case] parts: usize) {
    let doc = document(&[
        (1, "Intro".to_string(), "Hello there!".to_string()),
        (2, "Body".to_string(), "More \"quoted\" detail.".to_string()),
    ]);
    let whole = run_fragments(&[doc.clone()]);
    let pieces = run_fragments(&split_into(&doc, parts));
    assert_eq!(whole, pieces);
}

#[test]
fn escaped_quote_does_not_close_the_script() {
    let doc = r#"{"slides":[{"slideNumber":2,"title":"Q","script":"She said \"go\""}]}"#;
    let emitted = events(doc);

    assert_eq!(script_text(&emitted, 2), "She said \"go\"");
    assert_eq!(emitted.last(), Some(&ParseEvent::SlideComplete { index: 2 }));
    assert_eq!(
        emitted
            .iter()
            .filter(|event| matches!(event, ParseEvent::SlideComplete { .. }))
            .count(),
        1
    );
}

#[test]
fn two_slides_in_one_fragment_emit_sequential_triples() {
    let doc = document(&[
        (1, "One".to_string(), "a".to_string()),
        (2, "Two".to_string(), "bc".to_string()),
    ]);
    assert_eq!(
        events(&doc),
        vec![
            start(1, "One"),
            chunk(1, "a"),
            ParseEvent::SlideComplete { index: 1 },
            start(2, "Two"),
            chunk(2, "b"),
            chunk(2, "c"),
            ParseEvent::SlideComplete { index: 2 },
        ]
    );
}

#[test]
fn repeated_opening_sequence_starts_a_slide_once() {
    // An upstream retry repeats slide 1's opening; only one start survives.
    let doc = document(&[
        (1, "A".to_string(), "x".to_string()),
        (1, "A".to_string(), "y".to_string()),
    ]);
    let emitted = events(&doc);
    assert_eq!(
        emitted
            .iter()
            .filter(|event| matches!(event, ParseEvent::SlideStart { .. }))
            .count(),
        1
    );
    // Chunks and completions are not deduplicated.
    assert_eq!(script_text(&emitted, 1), "xy");
    assert_eq!(
        emitted
            .iter()
            .filter(|event| matches!(event, ParseEvent::SlideComplete { .. }))
            .count(),
        2
    );
}

#[test]
fn abrupt_end_mid_script_never_completes_the_slide() {
    let mut parser = SlideParser::new(ParserOptions::default());
    parser.feed(r#"{"slides":[{"slideNumber":3,"title":"T","script":"ab"#);
    let emitted: Vec<ParseEvent> = parser.finish().collect::<Result<_, _>>().unwrap();
    assert_eq!(emitted, vec![start(3, "T"), chunk(3, "a"), chunk(3, "b")]);
}

#[test]
fn whitespace_between_tokens_is_ignored() {
    let doc = "{ \"slides\" : [ { \"slideNumber\" : 7 ,\n  \"title\" : \"Pad\" ,\n  \"script\" : \"ok\" } ] }";
    let emitted = events(doc);
    assert_eq!(
        emitted,
        vec![
            start(7, "Pad"),
            chunk(7, "o"),
            chunk(7, "k"),
            ParseEvent::SlideComplete { index: 7 },
        ]
    );
}

#[test]
fn escapes_decode_before_emission() {
    let doc = r#"{"slides":[{"slideNumber":1,"title":"Café","script":"a\nbA"}]}"#;
    let emitted = events(doc);
    assert_eq!(emitted[0], start(1, "Café"));
    assert_eq!(script_text(&emitted, 1), "a\nbA");
}

#[test]
fn trailing_text_after_the_list_is_ignored() {
    let doc = document(&[(1, "A".to_string(), "x".to_string())]);
    let mut parser = SlideParser::new(ParserOptions::default());
    parser.feed(&doc);
    parser.feed("\n``` and some closing commentary");
    assert!(parser.is_complete());
    let emitted: Vec<ParseEvent> = parser.by_ref().collect::<Result<_, _>>().unwrap();
    assert_eq!(emitted.last(), Some(&ParseEvent::SlideComplete { index: 1 }));
}

#[test]
fn field_keys_are_configurable() {
    let options = ParserOptions {
        index_field: "n".to_string(),
        title_field: "heading".to_string(),
        script_field: "body".to_string(),
    };
    let mut parser = SlideParser::new(options);
    parser.feed(r#"{"items":[{"n":4,"heading":"H","body":"z"}]}"#);
    let emitted: Vec<ParseEvent> = parser.finish().collect::<Result<_, _>>().unwrap();
    assert_eq!(
        emitted,
        vec![
            start(4, "H"),
            chunk(4, "z"),
            ParseEvent::SlideComplete { index: 4 },
        ]
    );
}
