//! [RFC6265](https://tools.ietf.org/html/rfc6265) syntax checks.
//!
//! The parsers accept far more than RFC6265 allows. Callers that need strict
//! conformance run the parsed fields through these checks.

use error::validate::*;

/// Byte is a [RFC5234](https://tools.ietf.org/html/rfc5234) CTL character.
///
/// ```text
/// CTL =  %x00-1F / %x7F ; controls
/// ```
fn is_ctl(byte: u8) -> bool {
    byte <= 0x1F || byte == 0x7F
}

/// Byte is a valid [RFC6265](https://tools.ietf.org/html/rfc6265)
/// cookie-octet.
///
/// ```text
/// cookie-octet = %x21 / %x23-2B / %x2D-3A / %x3C-5B / %x5D-7E
/// ```
fn is_cookie_octet(byte: u8) -> bool {
    byte == 0x21 || (byte >= 0x23 && byte <= 0x2B) || (byte >= 0x2D && byte <= 0x3A)
        || (byte >= 0x3C && byte <= 0x5B) || (byte >= 0x5D && byte <= 0x7E)
}

/// Byte is a valid [RFC6265](https://tools.ietf.org/html/rfc6265)
/// attribute value octet.
///
/// ```text
/// av-octet = %x20-3A / %x3C-7E ; any CHAR except CTLs or ";"
/// ```
fn is_av_octet(byte: u8) -> bool {
    byte.is_ascii() && !is_ctl(byte) && byte != b';'
}

/// Find the first byte failing a test.
fn first_invalid<T>(source: &[u8], test: T) -> Option<usize>
where
    T: Fn(u8) -> bool,
{
    source.iter().position(|&byte| !test(byte))
}

/// Check a cookie value.
///
/// ```text
/// cookie-value = *cookie-octet / ( DQUOTE *cookie-octet DQUOTE )
/// ```
///
/// Whitespace, double quotes (other than one surrounding pair), commas,
/// semicolons, backslashes, control characters and non-ASCII bytes are
/// rejected.
pub fn validate_cookie_value(value: &str) -> Result<()> {
    let bytes = value.as_bytes();
    let (inner, offset) = if bytes.len() >= 2 && bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"' {
        (&bytes[1..bytes.len() - 1], 1)
    } else {
        (bytes, 0)
    };

    match first_invalid(inner, is_cookie_octet) {
        Some(index) => bail!(ErrorKind::InvalidCookieValue(value.to_owned(), index + offset)),
        None => Ok(()),
    }
}

/// Check a cookie path.
///
/// Any printable ASCII character other than `;` is allowed.
pub fn validate_path(path: &str) -> Result<()> {
    match first_invalid(path.as_bytes(), is_av_octet) {
        Some(index) => bail!(ErrorKind::InvalidPath(path.to_owned(), index)),
        None => Ok(()),
    }
}

/// Check a cookie domain.
///
/// Any printable ASCII character other than `;` is allowed.
pub fn validate_domain(domain: &str) -> Result<()> {
    match first_invalid(domain.as_bytes(), is_av_octet) {
        Some(index) => bail!(ErrorKind::InvalidDomain(domain.to_owned(), index)),
        None => Ok(()),
    }
}
