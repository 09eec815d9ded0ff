//! Splitting cookie headers into `name[=value]` segments.
//!
//! Both header directions share one scanner. It never backtracks: every byte
//! is visited once, so even a pathological header is handled in linear time.
//!
//! ```text
//! header  = *( separator / WSP ) [ segment *( separator segment ) ]
//! segment = name [ "=" value ]
//! value   = DQUOTE *( qtext / "\" OCTET ) DQUOTE *trailing
//!         / plain
//! ```
//!
//! Inside a quoted value neither separators nor `=` end the value. A quote
//! that is never closed spoils only its own segment: scanning resumes after
//! the first separator following it, and from there on quotes are plain text.

mod request;
mod set_cookie;

pub use self::request::{parse_request_cookies, RequestCookies, RequestParser};
pub use self::set_cookie::parse_set_cookie_header;

use error::parser::*;
use std::borrow::Cow;

/// Whitespace allowed around names and values.
fn is_whitespace(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

/// A value that may have been quoted in the header.
#[derive(Debug, PartialEq, Eq)]
enum Quotable<'s> {
    Plain(&'s str),
    /// Quotes stripped and escaped quotes unescaped.
    Quoted(Cow<'s, str>),
}

impl<'s> Quotable<'s> {
    fn is_quoted(&self) -> bool {
        match *self {
            Quotable::Quoted(_) => true,
            Quotable::Plain(_) => false,
        }
    }

    fn as_str(&self) -> &str {
        match *self {
            Quotable::Plain(value) => value,
            Quotable::Quoted(ref value) => value,
        }
    }

    fn into_string(self) -> String {
        match self {
            Quotable::Plain(value) => value.to_owned(),
            Quotable::Quoted(value) => value.into_owned(),
        }
    }
}

/// Replace each `\"` in a quoted value with `"`.
///
/// Other backslashes are left as they are.
fn unescape_quotes(raw: &str) -> String {
    let mut unescaped = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('"') => unescaped.push('"'),
                Some(other) => {
                    unescaped.push('\\');
                    unescaped.push(other);
                }
                None => unescaped.push('\\'),
            }
        } else {
            unescaped.push(c);
        }
    }
    unescaped
}

/// One `name[=value]` segment of a header.
#[derive(Debug, PartialEq, Eq)]
struct Segment<'s> {
    /// The trimmed name, possibly empty.
    name: &'s str,
    /// `None` when the segment had no `=`.
    value: Option<Quotable<'s>>,
}

/// Position of the scanner within a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Skipping whitespace and empty segments.
    Leading,
    Name,
    /// After the `=`, before the first character of the value.
    ValueStart,
    Plain,
    Quoted,
    /// Inside quotes, directly after a backslash.
    EscapePending,
    /// The value has ended; skip to the next separator.
    Trailing,
}

/// Iterator over the segments of a single header value.
struct Segments<'s> {
    source: &'s str,
    position: usize,
    comma_separates: bool,
    equals_in_value: bool,
    /// Set once a quote has run to the end of the header.
    unclosed_quote: bool,
}

impl<'s> Segments<'s> {
    /// Create a new iterator over a header.
    ///
    /// `;` always separates segments; `,` does when `comma_separates` is set.
    /// Without `equals_in_value` a plain value ends at the first `=` and the
    /// rest of that segment is dropped.
    fn new(source: &'s str, comma_separates: bool, equals_in_value: bool) -> Segments<'s> {
        Segments {
            source,
            position: 0,
            comma_separates,
            equals_in_value,
            unclosed_quote: false,
        }
    }

    fn is_separator(&self, byte: u8) -> bool {
        byte == b';' || self.comma_separates && byte == b','
    }

    fn segment(&self, (start, end): (usize, usize), value: Option<Quotable<'s>>) -> Segment<'s> {
        Segment {
            name: self.source[start..end].trim(),
            value,
        }
    }

    fn plain(&self, start: usize, end: usize) -> Quotable<'s> {
        Quotable::Plain(self.source[start..end].trim())
    }

    fn quoted(&self, start: usize, end: usize, escaped: bool) -> Quotable<'s> {
        let raw = &self.source[start..end];
        if escaped {
            Quotable::Quoted(Cow::Owned(unescape_quotes(raw)))
        } else {
            Quotable::Quoted(Cow::Borrowed(raw))
        }
    }

    /// Scan the next segment, returning it with the position to resume from.
    fn next_segment(&self) -> Option<(Result<Segment<'s>>, usize)> {
        let bytes = self.source.as_bytes();
        let mut state = State::Leading;
        let mut name = (self.position, self.position);
        let mut value_start = self.position;
        let mut escaped = false;
        let mut value = None;
        let mut separator_in_quotes = None;

        for index in self.position..bytes.len() {
            let byte = bytes[index];
            let separator = self.is_separator(byte);

            // Where to resume should this quote never close.
            let quoted = state == State::Quoted || state == State::EscapePending;
            if quoted && separator && separator_in_quotes.is_none() {
                separator_in_quotes = Some(index);
            }

            state = match state {
                State::Leading if separator || is_whitespace(byte) => State::Leading,
                State::Leading | State::Name if byte == b'=' => {
                    if state == State::Leading {
                        name.0 = index;
                    }
                    name.1 = index;
                    value_start = index + 1;
                    State::ValueStart
                }
                State::Leading => {
                    name.0 = index;
                    State::Name
                }
                State::Name if separator => {
                    name.1 = index;
                    return Some((Ok(self.segment(name, None)), index + 1));
                }
                State::Name => State::Name,

                State::ValueStart if is_whitespace(byte) => State::ValueStart,
                State::ValueStart if byte == b'"' && !self.unclosed_quote => {
                    value_start = index + 1;
                    State::Quoted
                }
                State::ValueStart | State::Plain if separator => {
                    let value = self.plain(value_start, index);
                    return Some((Ok(self.segment(name, Some(value))), index + 1));
                }
                State::ValueStart | State::Plain if byte == b'=' && !self.equals_in_value => {
                    value = Some(self.plain(value_start, index));
                    State::Trailing
                }
                State::ValueStart | State::Plain => State::Plain,

                State::Quoted if byte == b'\\' => {
                    escaped = true;
                    State::EscapePending
                }
                State::Quoted if byte == b'"' => {
                    value = Some(self.quoted(value_start, index, escaped));
                    State::Trailing
                }
                State::Quoted => State::Quoted,
                State::EscapePending => State::Quoted,

                State::Trailing if separator => {
                    return Some((Ok(self.segment(name, value)), index + 1));
                }
                State::Trailing => State::Trailing,
            };
        }

        let end = bytes.len();
        let segment = match state {
            State::Leading => return None,
            State::Name => self.segment((name.0, end), None),
            State::ValueStart | State::Plain => {
                let value = self.plain(value_start, end);
                self.segment(name, Some(value))
            }
            State::Quoted | State::EscapePending => {
                let error: Error = ErrorKind::MissingQuote(self.source.to_owned()).into();
                let resume = separator_in_quotes.map_or(end, |index| index + 1);
                return Some((Err(error), resume));
            }
            State::Trailing => self.segment(name, value),
        };

        Some((Ok(segment), end))
    }
}

impl<'s> Iterator for Segments<'s> {
    type Item = Result<Segment<'s>>;

    fn next(&mut self) -> Option<Result<Segment<'s>>> {
        match self.next_segment() {
            Some((segment, position)) => {
                self.position = position;
                if segment.is_err() {
                    self.unclosed_quote = true;
                }
                Some(segment)
            }
            None => {
                self.position = self.source.len();
                None
            }
        }
    }
}
