//! Reading cookies from the headers of an HTTP exchange.

use std::fmt::Display;
use std::str::FromStr;

use cookie::{parse_set_cookie_header, Cookie, RequestCookies, RequestParser};
use error::*;

/// A trait representing the source of raw cookie header values.
///
/// This is implemented by whatever holds the headers of an exchange.
pub trait HeaderSource {
    /// Every `Cookie` request header value, in the order received.
    fn cookie_headers(&self) -> Vec<&str>;

    /// Every `Set-Cookie` response header value, in the order received.
    fn set_cookie_headers(&self) -> Vec<&str>;
}

/// Parse all of the `Cookie` headers of an exchange.
pub fn request_cookies<H>(source: &H, parser: &RequestParser) -> RequestCookies
where
    H: HeaderSource + ?Sized,
{
    parser.parse(source.cookie_headers())
}

/// Look up a request cookie by name and convert its value.
///
/// A missing cookie is `Ok(None)`; a value that does not convert is an error.
pub fn cookie_param<T>(cookies: &RequestCookies, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let cookie = match cookies.get(name) {
        Some(cookie) => cookie,
        None => return Ok(None),
    };

    match cookie.value().parse() {
        Ok(value) => Ok(Some(value)),
        Err(error) => bail!(ErrorKind::Conversion(
            name.to_owned(),
            cookie.value().to_owned(),
            error.to_string(),
        )),
    }
}

/// An iterator that parses a collection of `Set-Cookie` header values.
#[derive(Debug)]
pub struct SetCookieIter<I> {
    /// The source of the header values.
    source: I,
}

impl<'h> SetCookieIter<::std::vec::IntoIter<&'h str>> {
    /// Iterate over the `Set-Cookie` headers of an exchange.
    pub fn from_source<H>(source: &'h H) -> Self
    where
        H: HeaderSource + ?Sized,
    {
        SetCookieIter::new(source.set_cookie_headers())
    }
}

impl<I, S> SetCookieIter<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    /// Create a new iterator over header values.
    pub fn new<C>(headers: C) -> SetCookieIter<I>
    where
        C: IntoIterator<Item = S, IntoIter = I>,
    {
        SetCookieIter {
            source: headers.into_iter(),
        }
    }
}

impl<I, S> Iterator for SetCookieIter<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<Cookie>;

    fn next(&mut self) -> Option<Result<Cookie>> {
        self.source
            .next()
            .map(|header| parse_set_cookie_header(header.as_ref()).map_err(Error::from))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Exchange {
        request: Vec<String>,
        response: Vec<String>,
    }

    impl HeaderSource for Exchange {
        fn cookie_headers(&self) -> Vec<&str> {
            self.request.iter().map(String::as_str).collect()
        }

        fn set_cookie_headers(&self) -> Vec<&str> {
            self.response.iter().map(String::as_str).collect()
        }
    }

    fn exchange() -> Exchange {
        Exchange {
            request: vec![
                "session=abc123; count=7".to_owned(),
                "count=x; $Path=/".to_owned(),
            ],
            response: vec![
                "SHIPPING=FEDEX; path=/foo; secure".to_owned(),
                "broken=\"value".to_owned(),
                "lang=en-US; Path=/; Domain=example.com".to_owned(),
            ],
        }
    }

    #[test]
    fn request_cookies_from_source() {
        let cookies = request_cookies(&exchange(), &RequestParser::new());
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies["session"].value(), "abc123");
        assert_eq!(cookies["count"].value(), "x");
        assert_eq!(cookies["count"].path(), Some("/"));
    }

    #[test]
    fn set_cookies_from_source() {
        let exchange = exchange();
        let parsed: Vec<_> = SetCookieIter::from_source(&exchange).collect();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].as_ref().unwrap().name(), "SHIPPING");
        assert!(parsed[1].is_err());
        assert_eq!(parsed[2].as_ref().unwrap().domain(), Some("example.com"));
    }

    #[test]
    fn set_cookies_from_strings() {
        let names: Vec<String> = SetCookieIter::new(vec!["a=1", "b=2; secure"])
            .map(|cookie| cookie.unwrap().name().to_owned())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn cookie_params() {
        let cookies = RequestParser::new().parse(&["count=7; name=coyote; bad=x"]);

        assert_eq!(cookie_param::<u32>(&cookies, "count").unwrap(), Some(7));
        assert_eq!(
            cookie_param::<String>(&cookies, "name").unwrap(),
            Some("coyote".to_owned())
        );
        assert_eq!(cookie_param::<u32>(&cookies, "missing").unwrap(), None);

        match *cookie_param::<u32>(&cookies, "bad").unwrap_err().kind() {
            ErrorKind::Conversion(ref name, ref value, _) => {
                assert_eq!(name, "bad");
                assert_eq!(value, "x");
            }
            ref other => panic!("unexpected error: {:?}", other),
        }
    }
}
