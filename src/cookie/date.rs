//! Dates in `expires` attributes.
//!
//! Three historical layouts are seen on the wire and are tried in order:
//!
//! ```text
//! rfc850-date  = weekday "," SP 1*2DIGIT "-" month "-" 2DIGIT SP time SP "GMT"
//! rfc1123-date = wkday "," SP 1*2DIGIT SP month SP 4DIGIT SP time SP "GMT"
//! asctime-date = wkday SP month 1*SP 1*2DIGIT SP time SP 4DIGIT
//!
//! time         = 1*2DIGIT ":" 1*2DIGIT ":" 1*2DIGIT
//! wkday        = "Mon" / "Tue" / "Wed" / "Thu" / "Fri" / "Sat" / "Sun"
//! weekday      = "Monday" / "Tuesday" / "Wednesday" / "Thursday"
//!              / "Friday" / "Saturday" / "Sunday"
//! month        = "Jan" / "Feb" / "Mar" / "Apr" / "May" / "Jun"
//!              / "Jul" / "Aug" / "Sep" / "Oct" / "Nov" / "Dec"
//! ```
//!
//! Either weekday form is accepted in every layout and names match case
//! insensitively. All dates are in GMT.

use error::parser::*;
use time::{at_utc, Tm};

/// Parse the value of an `expires` attribute.
///
/// Anything from the first `;` onwards is discarded before parsing, as some
/// clients append parameters such as `; length=142951` to the date. Returns
/// `None` if no known layout matches the whole of the remaining text.
pub fn parse_date(text: &str) -> Option<Tm> {
    let date = match text.find(';') {
        Some(end) => &text[..end],
        None => text,
    };

    match parse_layouts(date.trim().as_bytes()) {
        Ok(time) => Some(time),
        Err(error) => {
            trace!("Ignoring unparsable date '{}': {}", text, error);
            None
        }
    }
}

/// Try each layout in turn, keeping the error from the last.
fn parse_layouts(source: &[u8]) -> Result<Tm> {
    parse_rfc850(source)
        .or_else(|_| parse_rfc1123(source))
        .or_else(|_| parse_asctime(source))
}

/// `Friday, 16-Mar-18 23:12:40 GMT`
fn parse_rfc850(source: &[u8]) -> Result<Tm> {
    let mut reader = DateReader::new(source);
    reader.weekday()?;
    reader.literal(b',')?;
    reader.spaces()?;
    let day = reader.digits(1, 2)?;
    reader.literal(b'-')?;
    let month = reader.month()?;
    reader.literal(b'-')?;
    let year = reader.short_year()?;
    reader.spaces()?;
    let time = reader.time()?;
    reader.spaces()?;
    reader.gmt()?;
    reader.end()?;

    build_time(year, month, day, time)
}

/// `Wed, 12 Feb 2014 04:43:29 GMT`
fn parse_rfc1123(source: &[u8]) -> Result<Tm> {
    let mut reader = DateReader::new(source);
    reader.weekday()?;
    reader.literal(b',')?;
    reader.spaces()?;
    let day = reader.digits(1, 2)?;
    reader.spaces()?;
    let month = reader.month()?;
    reader.spaces()?;
    let year = reader.digits(4, 4)?;
    reader.spaces()?;
    let time = reader.time()?;
    reader.spaces()?;
    reader.gmt()?;
    reader.end()?;

    build_time(year, month, day, time)
}

/// `Sun Nov  6 08:49:37 1994`
fn parse_asctime(source: &[u8]) -> Result<Tm> {
    let mut reader = DateReader::new(source);
    reader.weekday()?;
    reader.spaces()?;
    let month = reader.month()?;
    reader.spaces()?;
    let day = reader.digits(1, 2)?;
    reader.spaces()?;
    let time = reader.time()?;
    reader.spaces()?;
    let year = reader.digits(4, 4)?;
    reader.end()?;

    build_time(year, month, day, time)
}

/// Determine if a year is a leap year.
fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || year % 100 != 0 && year % 4 == 0
}

/// Number of days in a zero-based month.
fn days_in_month(month: i32, year: i32) -> i32 {
    const MONTH_DAYS: [i32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    if month == 1 && is_leap_year(year) {
        29
    } else {
        MONTH_DAYS[month as usize]
    }
}

/// Validate the gathered fields and normalise them into a UTC time.
fn build_time(year: i32, month: i32, day: i32, (hour, minute, second): (i32, i32, i32)) -> Result<Tm> {
    ensure!(
        hour < 24 && minute < 60 && second < 60,
        ErrorKind::InvalidDate
    );
    ensure!(
        day >= 1 && day <= days_in_month(month, year),
        ErrorKind::InvalidDate
    );

    let time = Tm {
        tm_sec: second,
        tm_min: minute,
        tm_hour: hour,
        tm_mday: day,
        tm_mon: month,
        tm_year: year - 1900,
        tm_wday: 0,
        tm_yday: 0,
        tm_isdst: 0,
        tm_utcoff: 0,
        tm_nsec: 0,
    };

    // Round trip through a timestamp to fill in the weekday and day of year.
    Ok(at_utc(time.to_timespec()))
}

/// Reads the fields of a date from left to right.
struct DateReader<'s> {
    remaining: &'s [u8],
}

impl<'s> DateReader<'s> {
    fn new(source: &'s [u8]) -> DateReader<'s> {
        DateReader { remaining: source }
    }

    /// Take the longest prefix matching a character set.
    fn take_while<T>(&mut self, mut test: T) -> &'s [u8]
    where
        T: FnMut(u8) -> bool,
    {
        let len = self.remaining
            .iter()
            .take_while(|&&byte| test(byte))
            .count();
        let (taken, remaining) = self.remaining.split_at(len);
        self.remaining = remaining;
        taken
    }

    fn literal(&mut self, expected: u8) -> Result<()> {
        match self.remaining.first() {
            Some(&byte) if byte == expected => {
                self.remaining = &self.remaining[1..];
                Ok(())
            }
            Some(_) => bail!(ErrorKind::InvalidDate),
            None => bail!(ErrorKind::IncompleteDate),
        }
    }

    /// At least one space.
    fn spaces(&mut self) -> Result<()> {
        if self.take_while(|byte| byte == b' ').is_empty() {
            self.incomplete_or_invalid()
        } else {
            Ok(())
        }
    }

    /// Between `min` and `max` decimal digits.
    fn digits(&mut self, min: usize, max: usize) -> Result<i32> {
        let mut taken = 0;
        let digits = self.take_while(|byte| {
            taken += 1;
            taken <= max && byte.is_ascii_digit()
        });

        if digits.len() < min {
            return self.incomplete_or_invalid();
        }

        Ok(digits
            .iter()
            .fold(0, |value, digit| value * 10 + (digit - b'0') as i32))
    }

    /// A two digit year within the 2000s, or a full four digit year.
    fn short_year(&mut self) -> Result<i32> {
        let year = self.digits(2, 4)?;
        match year {
            0..=99 => Ok(2000 + year),
            1000..=9999 => Ok(year),
            _ => bail!(ErrorKind::InvalidDate),
        }
    }

    fn time(&mut self) -> Result<(i32, i32, i32)> {
        let hour = self.digits(1, 2)?;
        self.literal(b':')?;
        let minute = self.digits(1, 2)?;
        self.literal(b':')?;
        let second = self.digits(1, 2)?;
        Ok((hour, minute, second))
    }

    /// An English weekday, abbreviated or in full.
    fn weekday(&mut self) -> Result<()> {
        const WEEKDAYS: [&str; 7] = [
            "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
        ];

        let name = self.take_while(|byte| byte.is_ascii_alphabetic());
        let known = WEEKDAYS.iter().any(|weekday| {
            name.eq_ignore_ascii_case(weekday.as_bytes())
                || name.eq_ignore_ascii_case(&weekday.as_bytes()[..3])
        });

        if known {
            Ok(())
        } else {
            self.incomplete_or_invalid()
        }
    }

    /// An abbreviated English month, as a zero based index.
    fn month(&mut self) -> Result<i32> {
        const MONTHS: [&[u8]; 12] = [
            b"jan", b"feb", b"mar", b"apr", b"may", b"jun",
            b"jul", b"aug", b"sep", b"oct", b"nov", b"dec",
        ];

        let name = self.take_while(|byte| byte.is_ascii_alphabetic());
        match MONTHS.iter().position(|month| name.eq_ignore_ascii_case(month)) {
            Some(index) => Ok(index as i32),
            None => self.incomplete_or_invalid(),
        }
    }

    fn gmt(&mut self) -> Result<()> {
        let zone = self.take_while(|byte| byte.is_ascii_alphabetic());
        if zone.eq_ignore_ascii_case(b"GMT") {
            Ok(())
        } else {
            self.incomplete_or_invalid()
        }
    }

    /// The whole date must be consumed.
    fn end(&self) -> Result<()> {
        ensure!(self.remaining.is_empty(), ErrorKind::InvalidDate);
        Ok(())
    }

    fn incomplete_or_invalid<T>(&self) -> Result<T> {
        if self.remaining.is_empty() {
            bail!(ErrorKind::IncompleteDate)
        } else {
            bail!(ErrorKind::InvalidDate)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn timestamp(text: &str) -> Option<i64> {
        parse_date(text).map(|time| time.to_timespec().sec)
    }

    #[test]
    fn old_school_date() {
        assert_eq!(timestamp("Friday, 16-Mar-18 23:12:40 GMT"), Some(1521241960));
    }

    #[test]
    fn browser_dates() {
        let checks = &[
            ("Mon, 31 Mar 2014 09:24:49 GMT", 1396257889),
            ("Wed, 12 Feb 2014 04:43:29 GMT", 1392180209),
            ("Sun Nov  6 08:49:37 1994", 784111777),
            ("Sunday, 06-Nov-1994 08:49:37 GMT", 784111777),
        ];

        for &(text, expected) in checks {
            assert_eq!(timestamp(text), Some(expected), "{}", text);
        }
    }

    #[test]
    fn trailing_parameters_are_discarded() {
        assert_eq!(
            timestamp("Wed, 12 Feb 2014 04:43:29 GMT; length=142951"),
            Some(1392180209)
        );
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(timestamp("FRIDAY, 16-mar-18 23:12:40 gmt"), Some(1521241960));
        assert_eq!(timestamp("Fri, 16-Mar-18 23:12:40 GMT"), Some(1521241960));
    }

    #[test]
    fn normalised_fields() {
        let time = parse_date("Friday, 16-Mar-18 23:12:40 GMT").unwrap();
        assert_eq!(time.tm_year, 118);
        assert_eq!(time.tm_mon, 2);
        assert_eq!(time.tm_mday, 16);
        assert_eq!(time.tm_wday, 5);
    }

    #[test]
    fn leap_days() {
        assert!(parse_date("Thu, 29 Feb 2024 00:00:00 GMT").is_some());
        assert!(parse_date("Thu, 29 Feb 2023 00:00:00 GMT").is_none());
        assert!(parse_date("Tue, 29 Feb 2000 00:00:00 GMT").is_some());
        assert!(parse_date("Thu, 29 Feb 1900 00:00:00 GMT").is_none());
    }

    #[test]
    fn unparsable_dates() {
        let checks = &[
            "",
            ";",
            "tomorrow",
            "Wed, 12 Feb 2014",
            "Wed, 12 Feb 2014 04:43:29",
            "Wed, 12 Feb 2014 04:43:29 PST",
            "Wed, 12 Foo 2014 04:43:29 GMT",
            "Wed, 32 Jan 2014 04:43:29 GMT",
            "Wed, 12 Feb 2014 24:00:00 GMT",
            "Wed, 12 Feb 2014 04:43:29 GMT trailing",
            "Someday, 16-Mar-18 23:12:40 GMT",
        ];

        for text in checks {
            assert_eq!(parse_date(text), None, "{}", text);
        }
    }

    #[test]
    fn two_digit_years_are_in_this_century() {
        let time = parse_date("Sunday, 06-Nov-94 08:49:37 GMT").unwrap();
        assert_eq!(time.tm_year + 1900, 2094);
    }

    #[test]
    fn reader_errors() {
        match *parse_rfc1123(b"Wed, 12 Feb").unwrap_err().kind() {
            ErrorKind::IncompleteDate => {}
            ref other => panic!("unexpected error: {:?}", other),
        }
        match *parse_rfc1123(b"Wed, 12 Feb 2014 04:43:29 GMT!").unwrap_err().kind() {
            ErrorKind::InvalidDate => {}
            ref other => panic!("unexpected error: {:?}", other),
        }
    }
}
