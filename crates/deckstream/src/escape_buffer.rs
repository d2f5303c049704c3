//! Buffering and decoding of four-digit `\u` escape sequences.
//!
//! [`UnicodeEscapeBuffer`] accumulates the four hexadecimal digits that follow
//! a `\u` escape introducer and converts them to a [`char`] once the fourth
//! digit arrives. Digits may arrive one at a time across fragment boundaries;
//! the buffer carries the partial sequence between feeds and resets itself
//! after each successful conversion.

/// Reasons a `\u` escape sequence can fail to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EscapeError {
    /// A character other than `0-9`, `A-F`, `a-f` appeared inside the escape.
    #[error("expected a hex digit in unicode escape, found {0:?}")]
    NotHex(char),
    /// The four digits name a surrogate half or an out-of-range code point.
    #[error("\\u{0:04X} is not a unicode scalar value")]
    NotScalar(u32),
}

/// Accumulator for the hex digits of one `\u` escape.
#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    digits: [u8; 4],
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards any partially accumulated digits.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Feeds the next character of the escape sequence.
    ///
    /// Returns `Ok(None)` while fewer than four digits have arrived and
    /// `Ok(Some(ch))` on the fourth, resetting the buffer for the next
    /// sequence.
    pub fn feed(&mut self, c: char) -> Result<Option<char>, EscapeError> {
        let Some(digit) = c.to_digit(16) else {
            return Err(EscapeError::NotHex(c));
        };

        debug_assert!(self.len < 4);
        self.digits[usize::from(self.len)] = digit as u8;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let code = self
            .digits
            .iter()
            .fold(0u32, |acc, d| (acc << 4) | u32::from(*d));
        self.reset();
        char::from_u32(code)
            .map(Some)
            .ok_or(EscapeError::NotScalar(code))
    }
}
