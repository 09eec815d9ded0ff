//! Representation of a parsed cookie.

pub mod date;
mod parse;

pub use self::parse::{parse_request_cookies, parse_set_cookie_header, RequestCookies,
                      RequestParser};
use time::{Duration, Tm};

/// A builder for a cookie.
///
/// The parsers fill a cookie in one field at a time as they scan a header and
/// hand over the finished `Cookie` once the scan has moved past it.
#[derive(Debug, Clone)]
pub struct Builder {
    cookie: Cookie,
}

impl Builder {
    /// Create a new cookie builder for a `name=value` pair.
    ///
    /// Every attribute starts out absent or false and the version is 0.
    pub fn new(name: &str, value: &str) -> Builder {
        Builder {
            cookie: Cookie {
                name: name.to_owned(),
                value: value.to_owned(),
                ..Default::default()
            },
        }
    }

    /// Set the domain the cookie applies to.
    pub fn domain(self, domain: &str) -> Builder {
        self.map(|cookie| Cookie {
            domain: Some(domain.to_owned()),
            ..cookie
        })
    }

    /// Set the path the cookie applies to.
    pub fn path(self, path: &str) -> Builder {
        self.map(|cookie| Cookie {
            path: Some(path.to_owned()),
            ..cookie
        })
    }

    /// Set the RFC2965 comment.
    pub fn comment(self, comment: &str) -> Builder {
        self.map(|cookie| Cookie {
            comment: Some(comment.to_owned()),
            ..cookie
        })
    }

    /// Set the RFC2965 comment URL.
    pub fn comment_url(self, comment_url: &str) -> Builder {
        self.map(|cookie| Cookie {
            comment_url: Some(comment_url.to_owned()),
            ..cookie
        })
    }

    /// Set the expiry time of a cookie.
    pub fn expires(self, time: Tm) -> Builder {
        self.map(|cookie| Cookie {
            expires: Some(time),
            ..cookie
        })
    }

    /// Set the lifetime of a cookie relative to when it was received.
    pub fn max_age(self, max_age: Duration) -> Builder {
        self.map(|cookie| Cookie {
            max_age: Some(max_age),
            ..cookie
        })
    }

    /// Set the cookie syntax version.
    pub fn version(self, version: i32) -> Builder {
        self.map(|cookie| Cookie { version, ..cookie })
    }

    /// Set whether or not the cookie requires a secure connection.
    pub fn secure(self, secure: bool) -> Builder {
        self.map(|cookie| Cookie { secure, ..cookie })
    }

    /// Set whether a cookie should only be sent over HTTP/HTTPS connections.
    pub fn http_only(self, http_only: bool) -> Builder {
        self.map(|cookie| Cookie { http_only, ..cookie })
    }

    /// Set whether the cookie should be discarded when the user agent exits.
    pub fn discard(self, discard: bool) -> Builder {
        self.map(|cookie| Cookie { discard, ..cookie })
    }

    /// Mark the cookie as same-site, optionally with a mode such as `Strict`.
    ///
    /// The mode is kept exactly as received.
    pub fn same_site(self, mode: Option<&str>) -> Builder {
        self.map(|cookie| Cookie {
            same_site: true,
            same_site_mode: mode.map(str::to_owned),
            ..cookie
        })
    }

    /// Build the Cookie.
    pub fn build(self) -> Cookie {
        self.cookie
    }

    fn map<F>(self, f: F) -> Builder
    where
        F: FnOnce(Cookie) -> Cookie,
    {
        Builder {
            cookie: f(self.cookie),
        }
    }
}

/// A single cookie read from a `Set-Cookie` or `Cookie` header.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    value: String,
    domain: Option<String>,
    path: Option<String>,
    comment: Option<String>,
    comment_url: Option<String>,

    /// The expiration time of the cookie in UTC.
    expires: Option<Tm>,

    max_age: Option<Duration>,

    /// 0 for old Netscape style cookies, 1 for RFC2965 style cookies.
    version: i32,

    /// The cookie can only be sent over a TLS connection.
    secure: bool,

    /// The cookie can only be sent via a HTTP (or HTTPS) connection.
    http_only: bool,

    discard: bool,
    same_site: bool,
    same_site_mode: Option<String>,
}

impl Cookie {
    /// Get the name of the cookie.
    ///
    /// This may be empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the value of a cookie, without any surrounding quotes.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the (name, value) pair of a cookie.
    pub fn pair(&self) -> (&str, &str) {
        (self.name(), self.value())
    }

    /// Get the domain the cookie applies to.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_ref().map(String::as_str)
    }

    /// Get the path the cookie applies to.
    pub fn path(&self) -> Option<&str> {
        self.path.as_ref().map(String::as_str)
    }

    /// Get the RFC2965 comment.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_ref().map(String::as_str)
    }

    /// Get the RFC2965 comment URL.
    pub fn comment_url(&self) -> Option<&str> {
        self.comment_url.as_ref().map(String::as_str)
    }

    /// Get the expiry of the cookie, if one was given and could be read.
    pub fn expires(&self) -> Option<&Tm> {
        self.expires.as_ref()
    }

    /// Get the maximum age of the cookie.
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    /// Get the cookie syntax version.
    pub fn version(&self) -> i32 {
        self.version
    }

    /// Check if the cookie requires a secure connection.
    pub fn secure(&self) -> bool {
        self.secure
    }

    /// Check if the cookie should only be sent over http requests.
    pub fn http_only(&self) -> bool {
        self.http_only
    }

    /// Check if the cookie should be discarded when the user agent exits.
    pub fn discard(&self) -> bool {
        self.discard
    }

    /// Check if a `SameSite` attribute was present.
    pub fn same_site(&self) -> bool {
        self.same_site
    }

    /// Get the `SameSite` mode as received.
    ///
    /// The mode is not checked against the known `Strict`, `Lax` and `None`
    /// values.
    pub fn same_site_mode(&self) -> Option<&str> {
        self.same_site_mode.as_ref().map(String::as_str)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let cookie = Builder::new("SID", "31d4d96e407aad42").build();
        assert_eq!(cookie.pair(), ("SID", "31d4d96e407aad42"));
        assert_eq!(cookie.domain(), None);
        assert_eq!(cookie.path(), None);
        assert_eq!(cookie.comment(), None);
        assert_eq!(cookie.comment_url(), None);
        assert_eq!(cookie.expires(), None);
        assert_eq!(cookie.max_age(), None);
        assert_eq!(cookie.version(), 0);
        assert!(!cookie.secure());
        assert!(!cookie.http_only());
        assert!(!cookie.discard());
        assert!(!cookie.same_site());
        assert_eq!(cookie.same_site_mode(), None);
    }

    #[test]
    fn builder_sets_fields() {
        let cookie = Builder::new("", "")
            .domain("example.com")
            .path("/")
            .comment("a comment")
            .comment_url("http://example.com/comment")
            .max_age(Duration::seconds(3200))
            .version(1)
            .secure(true)
            .http_only(true)
            .discard(true)
            .same_site(Some("Lax"))
            .build();

        assert_eq!(cookie.name(), "");
        assert_eq!(cookie.domain(), Some("example.com"));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.comment(), Some("a comment"));
        assert_eq!(cookie.comment_url(), Some("http://example.com/comment"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(3200)));
        assert_eq!(cookie.version(), 1);
        assert!(cookie.secure());
        assert!(cookie.http_only());
        assert!(cookie.discard());
        assert!(cookie.same_site());
        assert_eq!(cookie.same_site_mode(), Some("Lax"));
    }

    #[test]
    fn later_settings_win() {
        let cookie = Builder::new("a", "b")
            .path("/first")
            .path("/second")
            .same_site(Some("Strict"))
            .same_site(None)
            .build();

        assert_eq!(cookie.path(), Some("/second"));
        assert!(cookie.same_site());
        assert_eq!(cookie.same_site_mode(), None);
    }
}
