use std::fmt;
use std::str::FromStr;

/// A threshold range in the monitoring-plugins notation.
///
/// A range describes the interval of *acceptable* values; a value outside
/// of it triggers the alert level the range is attached to:
///
/// * `"1:"` accepts every value >= 1
/// * `":5"` and `"5"` accept every value in `[0, 5]`
/// * `"2:8"` accepts every value in `[2, 8]`
/// * `"~:5"` accepts every value <= 5
/// * `"@2:8"` inverts: values *inside* `[2, 8]` alert
/// * `""` accepts every value >= 0
#[derive(Clone, Debug, PartialEq)]
pub struct Range {
    start: f64,
    end: f64,
    invert: bool,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RangeParseError {
    #[error("invalid range bound '{0}'")]
    InvalidBound(String),
    #[error("range start {0} must not be greater than end {1}")]
    StartGreaterThanEnd(f64, f64),
}

impl Range {
    /// Returns true if the value lies in the acceptable interval.
    pub fn contains(&self, value: f64) -> bool {
        let inside = self.start <= value && value <= self.end;
        inside != self.invert
    }
}

impl Default for Range {
    /// The empty range spec: every value >= 0 is acceptable.
    fn default() -> Self {
        Range {
            start: 0.0,
            end: f64::INFINITY,
            invert: false,
        }
    }
}

impl FromStr for Range {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (invert, spec) = match s.strip_prefix('@') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (start, end) = match spec.split_once(':') {
            Some(("", end)) => (0.0, parse_end(end)?),
            Some(("~", end)) => (f64::NEG_INFINITY, parse_end(end)?),
            Some((start, end)) => (parse_bound(start)?, parse_end(end)?),
            // No colon: the spec is just an upper bound.
            None => (0.0, parse_end(spec)?),
        };

        if start > end {
            return Err(RangeParseError::StartGreaterThanEnd(start, end));
        }

        Ok(Range { start, end, invert })
    }
}

fn parse_bound(s: &str) -> Result<f64, RangeParseError> {
    s.parse()
        .map_err(|_| RangeParseError::InvalidBound(s.to_owned()))
}

fn parse_end(s: &str) -> Result<f64, RangeParseError> {
    if s.is_empty() {
        Ok(f64::INFINITY)
    } else {
        parse_bound(s)
    }
}

impl fmt::Display for Range {
    /// Writes the canonical spec string, as it appears in perfdata.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.invert {
            f.write_str("@")?;
        }

        if self.start == f64::NEG_INFINITY {
            f.write_str("~:")?;
        } else if self.start != 0.0 {
            write!(f, "{}:", Bound(self.start))?;
        }

        if self.end != f64::INFINITY {
            write!(f, "{}", Bound(self.end))?;
        } else if self.start == 0.0 {
            // "0:" and "" both normalize to the explicit open-ended form.
            f.write_str(":")?;
        }

        Ok(())
    }
}

/// Prints whole-numbered bounds without a decimal point.
struct Bound(f64);

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Range, RangeParseError};

    fn range(s: &str) -> Range {
        s.parse().unwrap()
    }

    #[test]
    fn test_lower_bound_only() {
        let r = range("1:");
        assert!(r.contains(1.0));
        assert!(r.contains(5.0));
        assert!(!r.contains(0.0));
    }

    #[test]
    fn test_upper_bound_only() {
        let r = range(":5");
        assert!(r.contains(0.0));
        assert!(r.contains(5.0));
        assert!(!r.contains(6.0));

        // A bare number is an upper bound with an implicit start of 0.
        let r = range("5");
        assert!(r.contains(5.0));
        assert!(!r.contains(6.0));
        assert!(!r.contains(-1.0));
    }

    #[test]
    fn test_closed_interval() {
        let r = range("2:8");
        assert!(!r.contains(1.0));
        assert!(r.contains(2.0));
        assert!(r.contains(8.0));
        assert!(!r.contains(9.0));
    }

    #[test]
    fn test_negative_infinity_start() {
        let r = range("~:3");
        assert!(r.contains(-100.0));
        assert!(r.contains(3.0));
        assert!(!r.contains(4.0));
    }

    #[test]
    fn test_inverted() {
        let r = range("@2:8");
        assert!(!r.contains(2.0));
        assert!(!r.contains(8.0));
        assert!(r.contains(1.0));
        assert!(r.contains(9.0));
    }

    #[test]
    fn test_empty_spec() {
        let r = range("");
        assert!(r.contains(0.0));
        assert!(r.contains(1000.0));
        assert!(!r.contains(-1.0));
        assert_eq!(r, Range::default());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "abc".parse::<Range>(),
            Err(RangeParseError::InvalidBound("abc".to_owned()))
        );
        assert_eq!(
            "1:x".parse::<Range>(),
            Err(RangeParseError::InvalidBound("x".to_owned()))
        );
        assert_eq!(
            "8:2".parse::<Range>(),
            Err(RangeParseError::StartGreaterThanEnd(8.0, 2.0))
        );
    }

    #[test]
    fn test_display_canonical() {
        assert_eq!(&range("1:").to_string(), "1:");
        assert_eq!(&range("2:8").to_string(), "2:8");
        assert_eq!(&range("0:5").to_string(), "5");
        assert_eq!(&range(":5").to_string(), "5");
        assert_eq!(&range("~:3").to_string(), "~:3");
        assert_eq!(&range("@2:8").to_string(), "@2:8");
        assert_eq!(&range("").to_string(), ":");
        assert_eq!(&range("1.5:").to_string(), "1.5:");
    }
}
