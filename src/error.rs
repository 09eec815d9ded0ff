//! Errors produced while parsing and validating cookies.

#![allow(missing_docs)]

error_chain!{
    // Links to other error chains.
    links {
        CookieParse(parser::Error, parser::ErrorKind);
        Validation(validate::Error, validate::ErrorKind);
    }

    // Internal error forms.
    errors {
        Conversion(name: String, value: String, reason: String) {
            description("The value of a cookie could not be converted"),
            display("Cookie '{}' has value '{}' which could not be converted: {}", name, value, reason),
        }
    }
}

/// Errors specific to parsing the cookie.
pub mod parser {
    error_chain!{
        foreign_links {
            ParseInt(::std::num::ParseIntError);
        }

        errors {
            MissingQuote(header: String) {
                description("The trailing quote to a quoted section was not present"),
                display("Unterminated quoted value in cookie header: {}", header),
            }
            IncompleteDate {
                description("The provided date was incomplete"),
            }
            InvalidDate {
                description("The date provided was invalid"),
            }
            MaxAgeOutOfRange(seconds: i64) {
                description("The max-age was too large to represent"),
                display("Max-Age of {} seconds is out of range", seconds),
            }
        }
    }
}

/// Errors raised by the [RFC6265](https://tools.ietf.org/html/rfc6265) syntax checks.
pub mod validate {
    error_chain!{
        errors {
            InvalidCookieValue(value: String, index: usize) {
                description("The cookie value contained a disallowed character"),
                display("Invalid character at index {} of cookie value: {}", index, value),
            }
            InvalidPath(path: String, index: usize) {
                description("The cookie path contained a disallowed character"),
                display("Invalid character at index {} of cookie path: {}", index, path),
            }
            InvalidDomain(domain: String, index: usize) {
                description("The cookie domain contained a disallowed character"),
                display("Invalid character at index {} of cookie domain: {}", index, domain),
            }
        }
    }
}
