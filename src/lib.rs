//! Tolerant parsing of HTTP cookie headers.
//!
//! Two directions are handled:
//!
//! * `Set-Cookie` response header values, one cookie per value, see
//!   [`parse_set_cookie_header`](fn.parse_set_cookie_header.html).
//! * `Cookie` request header values, any number of cookies per value, see
//!   [`parse_request_cookies`](fn.parse_request_cookies.html).
//!
//! Old Netscape style, [RFC2965][rfc2965] and [RFC6265][rfc6265] syntax are all
//! accepted. The parsers extract what they can and skip what they cannot;
//! strict syntax checks live in the [`validate`](validate/index.html) module.
//!
//! [rfc2965]: https://tools.ietf.org/html/rfc2965
//! [rfc6265]: https://tools.ietf.org/html/rfc6265

#![deny(missing_docs)]

#[macro_use]
extern crate error_chain;
extern crate indexmap;
#[macro_use]
extern crate log;
#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;
extern crate time;

pub mod cookie;
pub mod error;
pub mod source;
pub mod validate;

pub use cookie::{parse_request_cookies, parse_set_cookie_header, RequestCookies, RequestParser};
pub use cookie::{Builder, Cookie};
