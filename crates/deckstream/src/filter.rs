//! Gating of narrative preamble ahead of the structured value.
//!
//! Models rarely emit the target JSON object cold; they lead with commentary
//! ("Sure! Here is the result:") and often a fenced code block. The
//! [`PreambleFilter`] watches the growing stream prefix for a recognized
//! lead-in marker and splits the stream at that point: everything before it
//! is narrative text for display, everything from the object's opening brace
//! onward is parser input.
//!
//! Before recognition the filter holds back only a small tail of the stream
//! (long enough that no marker can straddle a fragment boundary undetected);
//! the rest passes through as narrative immediately. The holdback never grows
//! with stream length.

use alloc::string::{String, ToString};

use crate::options::FilterOptions;

/// Where the characters of one fragment were routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    /// No lead-in seen yet; this text (possibly empty while the filter holds
    /// back a marker-sized tail) is narrative output.
    Narrative(String),
    /// The lead-in was recognized inside this fragment. `narrative` is the
    /// text before the marker, `structured` every character from the object's
    /// opening brace onward.
    Gated {
        /// Narrative text preceding the lead-in marker.
        narrative: String,
        /// Characters belonging to the structured value.
        structured: String,
    },
    /// The filter already gated; the whole fragment is parser input.
    Structured(String),
}

/// Splits a fragment stream into narrative text and structured-value input.
///
/// # Examples
///
/// ```rust
/// use deckstream::{FilterOptions, PreambleFilter, Routed};
///
/// let mut filter = PreambleFilter::new(FilterOptions::default());
/// assert_eq!(
///     filter.feed("Here we go: {\"slides\""),
///     Routed::Gated {
///         narrative: "Here we go: ".to_string(),
///         structured: "{\"slides\"".to_string(),
///     }
/// );
/// assert_eq!(filter.feed(":["), Routed::Structured(":[".to_string()));
/// ```
#[derive(Debug)]
pub struct PreambleFilter {
    options: FilterOptions,
    /// Undecided stream tail; bounded by the longest marker while un-gated.
    window: String,
    /// A fence-style marker matched; waiting for the object's opening brace.
    armed: bool,
    gated: bool,
}

impl Default for PreambleFilter {
    fn default() -> Self {
        Self::new(FilterOptions::default())
    }
}

impl PreambleFilter {
    #[must_use]
    pub fn new(options: FilterOptions) -> Self {
        Self {
            options,
            window: String::new(),
            armed: false,
            gated: false,
        }
    }

    /// Whether the lead-in has been recognized and pass-through mode ended.
    #[must_use]
    pub fn is_gated(&self) -> bool {
        self.gated
    }

    /// Routes one incoming fragment.
    ///
    /// Fragment boundaries are arbitrary; a marker split across fragments is
    /// still recognized because the filter keeps a marker-sized holdback.
    pub fn feed(&mut self, fragment: &str) -> Routed {
        if self.gated {
            return Routed::Structured(fragment.to_string());
        }

        self.window.push_str(fragment);

        if self.armed {
            return match self.window.find('{') {
                Some(brace) => self.gate_at(String::new(), brace),
                None => {
                    // Residue of the fence line, not narrative; drop it.
                    self.window.clear();
                    Routed::Narrative(String::new())
                }
            };
        }

        match self.earliest_marker() {
            Some((pos, marker)) => match marker.find('{') {
                Some(offset) => {
                    let narrative = self.window[..pos].to_string();
                    self.gate_at(narrative, pos + offset)
                }
                None => {
                    let narrative = self.window[..pos].to_string();
                    let rest_at = pos + marker.len();
                    match self.window[rest_at..].find('{') {
                        Some(brace) => self.gate_at(narrative, rest_at + brace),
                        None => {
                            self.armed = true;
                            self.window.clear();
                            Routed::Narrative(narrative)
                        }
                    }
                }
            },
            None => Routed::Narrative(self.release_beyond_holdback()),
        }
    }

    /// Flushes the holdback at end of stream.
    ///
    /// Returns the remaining narrative text when the lead-in never appeared —
    /// a valid outcome in which the whole stream was plain narrative.
    #[must_use]
    pub fn finish(self) -> Option<String> {
        if self.gated || self.window.is_empty() {
            None
        } else {
            Some(self.window)
        }
    }

    /// Earliest marker occurrence in the window, if any.
    fn earliest_marker(&self) -> Option<(usize, String)> {
        let mut best: Option<(usize, &str)> = None;
        for marker in &self.options.markers {
            if marker.is_empty() {
                continue;
            }
            if let Some(pos) = self.window.find(marker.as_str()) {
                let better = match best {
                    Some((at, found)) => pos < at || (pos == at && marker.len() > found.len()),
                    None => true,
                };
                if better {
                    best = Some((pos, marker));
                }
            }
        }
        best.map(|(pos, marker)| (pos, marker.to_string()))
    }

    fn gate_at(&mut self, narrative: String, brace: usize) -> Routed {
        let structured = self.window[brace..].to_string();
        self.window.clear();
        self.gated = true;
        Routed::Gated {
            narrative,
            structured,
        }
    }

    /// Releases window text older than the longest marker as narrative. Any
    /// marker that could still complete with future input must start inside
    /// the retained tail, so nothing recognizable is ever released early.
    fn release_beyond_holdback(&mut self) -> String {
        let holdback = self
            .options
            .markers
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0);
        if self.window.len() <= holdback {
            return String::new();
        }
        let mut cut = self.window.len() - holdback;
        while !self.window.is_char_boundary(cut) {
            cut += 1;
        }
        let released = self.window[..cut].to_string();
        self.window.drain(..cut);
        released
    }
}
