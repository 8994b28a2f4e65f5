//! APOD dates: strict `YYYY-MM-DD`, defaulting to today.

use anyhow::anyhow;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// A calendar date identifying one APOD entry.
///
/// Parsing goes through [`chrono::NaiveDate`], so impossible dates like
/// `2022-13-45` are rejected, not just malformed strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApodDate(NaiveDate);

impl ApodDate {
    /// Today's local date, the default when the CLI date argument is absent.
    pub fn today() -> Self {
        ApodDate(chrono::Local::now().date_naive())
    }
}

impl FromStr for ApodDate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(ApodDate)
            .map_err(|_| anyhow!("invalid date {:?}; expected YYYY-MM-DD", s))
    }
}

impl fmt::Display for ApodDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        let d: ApodDate = "2022-01-01".parse().unwrap();
        assert_eq!(d.to_string(), "2022-01-01");
    }

    #[test]
    fn rejects_impossible_date() {
        assert!("2022-13-45".parse::<ApodDate>().is_err());
        assert!("2021-02-30".parse::<ApodDate>().is_err());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("01/01/2022".parse::<ApodDate>().is_err());
        assert!("yesterday".parse::<ApodDate>().is_err());
        assert!("".parse::<ApodDate>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let d: ApodDate = "1995-06-16".parse().unwrap();
        let again: ApodDate = d.to_string().parse().unwrap();
        assert_eq!(d, again);
    }
}
