use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

/// Configuration for the slide parser's target schema.
///
/// The grammar is fixed — a list of flat records whose identifying fields
/// precede a streamed content field — but the key names are declarative so
/// callers using a different prompt template can rename them.
///
/// # Default
///
/// `slideNumber` / `title` / `script`, the keys the default prompt asks the
/// model to produce.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Key of the numeric field identifying a slide.
    pub index_field: String,
    /// Key of the slide's title field.
    pub title_field: String,
    /// Key of the streamed script field.
    pub script_field: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            index_field: "slideNumber".to_string(),
            title_field: "title".to_string(),
            script_field: "script".to_string(),
        }
    }
}

/// Configuration for the preamble filter's lead-in detection.
///
/// Models vary in how they introduce the structured value: some open a fenced
/// code block, some emit the bare object. Each observed heuristic is one
/// marker in this list rather than a separate filter implementation, so new
/// lead-ins are a configuration change.
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// Lead-in markers, matched against the accumulated stream prefix. The
    /// earliest match wins. A marker containing `{` gates at that brace; any
    /// other marker arms the filter, which then gates at the next `{` seen.
    pub markers: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            markers: vec![
                "```json".to_string(),
                "```".to_string(),
                "{".to_string(),
            ],
        }
    }
}
