//! Parsing of `Cookie` request header values.

use super::{Quotable, Segments};
use cookie::{Builder, Cookie};
use indexmap::IndexMap;

/// Cookies sent with a request, keyed by name in the order first seen.
pub type RequestCookies = IndexMap<String, Cookie>;

/// Settings for parsing `Cookie` request headers.
///
/// The default parser splits only on `;` and ends plain values at `=`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestParser {
    expected_count: usize,
    allow_equals_in_value: bool,
    allow_comma_separator: bool,
}

impl RequestParser {
    /// Create a parser with the default settings.
    pub fn new() -> RequestParser {
        Default::default()
    }

    /// Number of cookies expected, used only to size the result.
    pub fn expected_count(self, expected_count: usize) -> RequestParser {
        RequestParser {
            expected_count,
            ..self
        }
    }

    /// Let plain values contain `=`.
    ///
    /// When unset, `a=b=c` reads as `a=b` and the `=c` is dropped. Quoted
    /// values may always contain `=`.
    pub fn allow_equals_in_value(self, allow_equals_in_value: bool) -> RequestParser {
        RequestParser {
            allow_equals_in_value,
            ..self
        }
    }

    /// Treat `,` as well as `;` as a separator between cookies.
    ///
    /// When unset, commas are ordinary value characters.
    pub fn allow_comma_separator(self, allow_comma_separator: bool) -> RequestParser {
        RequestParser {
            allow_comma_separator,
            ..self
        }
    }

    /// Parse a sequence of `Cookie` header values.
    ///
    /// A cookie named in a later value replaces one of the same name from an
    /// earlier value.
    pub fn parse<I, S>(&self, headers: I) -> RequestCookies
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cookies = RequestCookies::with_capacity(self.expected_count);
        for header in headers {
            self.parse_into(header.as_ref(), &mut cookies);
        }
        cookies
    }

    /// Parse a single `Cookie` header value into an existing collection.
    ///
    /// Segments without `=` are skipped. Segments named with a leading `$`
    /// are directives rather than cookies: `$Domain`, `$Path` and `$Version`
    /// apply to the cookie just before them and to every cookie after them
    /// within this header value. A segment whose quote never closes is
    /// skipped and scanning carries on after it.
    pub fn parse_into(&self, header: &str, cookies: &mut RequestCookies) {
        let segments = Segments::new(
            header,
            self.allow_comma_separator,
            self.allow_equals_in_value,
        );
        let mut directives = Directives::default();
        let mut pending: Option<Builder> = None;

        for segment in segments {
            let segment = match segment {
                Ok(segment) => segment,
                Err(error) => {
                    debug!("Ignoring cookie with unclosed quote: {}", error);
                    continue;
                }
            };

            let value = match segment.value {
                Some(value) => value,
                None => {
                    trace!(
                        "Ignoring invalid cookie '{}' in header: {}",
                        segment.name, header
                    );
                    continue;
                }
            };

            if segment.name.starts_with('$') {
                pending = directives.apply(segment.name, value.into_string(), pending);
            } else {
                if let Some(builder) = pending.take() {
                    insert(cookies, builder);
                }
                pending = Some(directives.cookie(segment.name, value));
            }
        }

        if let Some(builder) = pending {
            insert(cookies, builder);
        }
    }
}

/// Parse a sequence of `Cookie` header values.
///
/// Shorthand for a [`RequestParser`](struct.RequestParser.html) with the given
/// settings.
pub fn parse_request_cookies<I, S>(
    expected_count: usize,
    allow_equals_in_value: bool,
    headers: I,
    allow_comma_separator: bool,
) -> RequestCookies
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    RequestParser::new()
        .expected_count(expected_count)
        .allow_equals_in_value(allow_equals_in_value)
        .allow_comma_separator(allow_comma_separator)
        .parse(headers)
}

fn insert(cookies: &mut RequestCookies, builder: Builder) {
    let cookie = builder.build();
    cookies.insert(cookie.name().to_owned(), cookie);
}

/// Directive values in force at the current point of a header value.
#[derive(Debug, Default)]
struct Directives {
    domain: Option<String>,
    path: Option<String>,
    version: Option<i32>,
}

impl Directives {
    /// Start a cookie with the directives seen so far.
    fn cookie(&self, name: &str, value: Quotable) -> Builder {
        let implied_version = if value.is_quoted() { 1 } else { 0 };
        let mut builder = Builder::new(name, value.as_str())
            .version(self.version.unwrap_or(implied_version));

        if let Some(ref domain) = self.domain {
            builder = builder.domain(domain);
        }
        if let Some(ref path) = self.path {
            builder = builder.path(path);
        }
        builder
    }

    /// Record a directive, applying it to the cookie before it.
    fn apply(&mut self, name: &str, value: String, pending: Option<Builder>) -> Option<Builder> {
        match name[1..].to_ascii_lowercase().as_str() {
            "domain" => {
                let pending = pending.map(|builder| builder.domain(&value));
                self.domain = Some(value);
                pending
            }
            "path" => {
                let pending = pending.map(|builder| builder.path(&value));
                self.path = Some(value);
                pending
            }
            "version" => match value.trim().parse() {
                Ok(version) => {
                    self.version = Some(version);
                    pending.map(|builder| builder.version(version))
                }
                Err(error) => {
                    debug!("Ignoring cookie directive {}={}: {}", name, value, error);
                    pending
                }
            },
            _ => {
                trace!("Ignoring unknown cookie directive {}={}", name, value);
                pending
            }
        }
    }
}
