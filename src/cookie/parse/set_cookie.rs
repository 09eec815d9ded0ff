//! Parsing of a single `Set-Cookie` header value.

use super::{Quotable, Segment, Segments};
use cookie::date::parse_date;
use cookie::{Builder, Cookie};
use error::parser::*;
use time::{Duration, Tm};

/// Parse one `Set-Cookie` header value into a cookie.
///
/// The first segment is the cookie itself; the remaining `;` separated
/// segments are attributes, matched case insensitively. Quotes around the
/// cookie value or an attribute value are removed, and a quoted cookie value
/// marks an RFC2965 (version 1) cookie unless a `Version` attribute says
/// otherwise. Unknown attributes, and attributes whose values cannot be read,
/// are ignored.
///
/// A first segment without `=` is taken to be a value with an empty name. The
/// only error is a double quote around the cookie value that is never closed;
/// an unclosed quote in an attribute only drops that attribute.
pub fn parse_set_cookie_header(header: &str) -> Result<Cookie> {
    let mut segments = Segments::new(header, false, true);

    let mut builder = match segments.next() {
        Some(segment) => {
            let Segment { name, value } = segment?;
            match value {
                Some(value) => {
                    let version = if value.is_quoted() { 1 } else { 0 };
                    Builder::new(name, &value.into_string()).version(version)
                }
                None => Builder::new("", name),
            }
        }
        None => Builder::new("", ""),
    };

    for segment in segments {
        let segment = match segment {
            Ok(segment) => segment,
            Err(error) => {
                debug!("Ignoring attribute of Set-Cookie header: {}", error);
                continue;
            }
        };
        match Attribute::decode(&segment) {
            Ok(attribute) => builder = attribute.apply(builder),
            Err(error) => debug!(
                "Ignoring attribute '{}' of Set-Cookie header '{}': {}",
                segment.name, header, error
            ),
        }
    }

    Ok(builder.build())
}

/// Read a `Max-Age` value in seconds.
///
/// `Duration` holds at most `i64::MAX` milliseconds either way.
fn max_age(value: &str) -> Result<Duration> {
    let seconds: i64 = value.trim().parse()?;
    let limit = ::std::i64::MAX / 1000;
    ensure!(
        seconds >= -limit && seconds <= limit,
        ErrorKind::MaxAgeOutOfRange(seconds)
    );
    Ok(Duration::seconds(seconds))
}

/// Possible attributes following the cookie pair.
#[derive(Debug, PartialEq, Eq)]
enum Attribute<'s> {
    Path(String),
    Domain(String),
    Expires(Tm),
    MaxAge(Duration),
    Version(i32),
    Comment(String),
    CommentUrl(String),
    SameSite(Option<String>),
    Secure,
    HttpOnly,
    Discard,
    Extension(&'s str),
}

impl<'s> Attribute<'s> {
    fn decode(segment: &Segment<'s>) -> Result<Attribute<'s>> {
        let value = segment.value.as_ref().map(Quotable::as_str);
        let text = || value.unwrap_or("").to_owned();

        let attribute = match segment.name.to_ascii_lowercase().as_str() {
            "path" => Attribute::Path(text()),
            "domain" => Attribute::Domain(text()),
            "expires" => match parse_date(value.unwrap_or("")) {
                Some(time) => Attribute::Expires(time),
                None => bail!(ErrorKind::InvalidDate),
            },
            "max-age" => Attribute::MaxAge(max_age(value.unwrap_or(""))?),
            "version" => Attribute::Version(value.unwrap_or("").trim().parse()?),
            "comment" => Attribute::Comment(text()),
            "commenturl" => Attribute::CommentUrl(text()),
            "samesite" => Attribute::SameSite(value.map(str::to_owned)),
            "secure" => Attribute::Secure,
            "httponly" => Attribute::HttpOnly,
            "discard" => Attribute::Discard,
            _ => Attribute::Extension(segment.name),
        };

        Ok(attribute)
    }

    fn apply(self, builder: Builder) -> Builder {
        match self {
            Attribute::Path(path) => builder.path(&path),
            Attribute::Domain(domain) => builder.domain(&domain),
            Attribute::Expires(time) => builder.expires(time),
            Attribute::MaxAge(duration) => builder.max_age(duration),
            Attribute::Version(version) => builder.version(version),
            Attribute::Comment(comment) => builder.comment(&comment),
            Attribute::CommentUrl(url) => builder.comment_url(&url),
            Attribute::SameSite(mode) => builder.same_site(mode.as_ref().map(String::as_str)),
            Attribute::Secure => builder.secure(true),
            Attribute::HttpOnly => builder.http_only(true),
            Attribute::Discard => builder.discard(true),
            Attribute::Extension(name) => {
                trace!("Ignoring unknown cookie attribute '{}'", name);
                builder
            }
        }
    }
}
