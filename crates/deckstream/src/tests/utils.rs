use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use crate::{ParseEvent, ParserError, ParserOptions, SlideParser};

/// Splits `payload` into `parts` pieces of near-equal character count.
pub fn split_into(payload: &str, parts: usize) -> Vec<String> {
    assert!(parts > 0);
    let chars: Vec<char> = payload.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }
    let per = chars.len().div_ceil(parts);
    chars.chunks(per).map(|c| c.iter().collect()).collect()
}

/// Feeds each fragment in order, draining events between feeds just as a
/// driver loop would.
pub fn run_fragments(fragments: &[String]) -> Vec<Result<ParseEvent, ParserError>> {
    let mut parser = SlideParser::new(ParserOptions::default());
    let mut out = Vec::new();
    for fragment in fragments {
        parser.feed(fragment);
        out.extend(parser.by_ref());
    }
    out.extend(parser.finish());
    out
}

/// Parses `input` in one piece, panicking on any parser error.
pub fn events(input: &str) -> Vec<ParseEvent> {
    run_fragments(&[input.to_string()])
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap()
}

/// Serializes `text` as a JSON string literal, quotes included.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Renders a full document for the given `(index, title, script)` slides.
pub fn document(slides: &[(u64, String, String)]) -> String {
    let mut out = String::from("{\"slides\":[");
    for (i, (index, title, script)) in slides.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&format!(
            "{{\"slideNumber\":{index},\"title\":{},\"script\":{}}}",
            quote(title),
            quote(script)
        ));
    }
    out.push_str("]}");
    out
}

/// Concatenates the chunk fragments attributed to `index`.
pub fn script_text(events: &[ParseEvent], index: u64) -> String {
    events
        .iter()
        .filter_map(|event| match event {
            ParseEvent::SlideChunk { index: i, fragment } if *i == index => {
                Some(fragment.as_str())
            }
            _ => None,
        })
        .collect()
}
