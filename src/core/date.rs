use chrono::{Local, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses the `YYYY-MM-DD` value a date input submits.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Source of "today" for date rules.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the running host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock, parse_date};
    use chrono::NaiveDate;

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(parse_date("2025-01-10"), NaiveDate::from_ymd_opt(2025, 1, 10));
        assert_eq!(parse_date(" 2024-02-29 "), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_date("2025-02-29"), None);
        assert_eq!(parse_date("10/01/2025"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn fixed_clock_reports_its_date() {
        let clock = FixedClock::ymd(2025, 1, 1).expect("valid date");
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 1, 1).expect("date"));
    }
}
