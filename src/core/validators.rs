use crate::core::date::parse_date;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

pub type Validator = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

pub const MIN_PHONE_LENGTH: usize = 10;

/// Run a list of validators against `value`, returning the first error.
pub fn run_validators(validators: &[Validator], value: &str) -> Result<(), String> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

/// `local@domain.tld`: no whitespace, one `@`, a dot somewhere after it.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Optional leading `+`, digits otherwise, at least ten characters once trimmed.
pub fn is_valid_phone(value: &str) -> bool {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && trimmed.chars().count() >= MIN_PHONE_LENGTH
}

pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.trim().is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn min_length(min_len: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.trim().chars().count() < min_len {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn email(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if is_valid_email(value.trim()) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

pub fn phone(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if is_valid_phone(value) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

pub fn date_not_before(
    earliest: NaiveDate,
    invalid_message: impl Into<String>,
    past_message: impl Into<String>,
) -> Validator {
    let invalid_message = invalid_message.into();
    let past_message = past_message.into();
    Box::new(move |value: &str| match parse_date(value) {
        None => Err(invalid_message.clone()),
        Some(date) if date < earliest => Err(past_message.clone()),
        Some(_) => Ok(()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_examples() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("@b.com"));
    }

    #[test]
    fn phone_examples() {
        assert!(is_valid_phone("9876543210"));
        assert!(is_valid_phone("+919876543210"));
        assert!(is_valid_phone("  9876543210 "));
        assert!(!is_valid_phone("12345"));
        assert!(is_valid_phone("+123456789"));
        assert!(!is_valid_phone("+12345678"));
        assert!(!is_valid_phone("98765-43210"));
        assert!(!is_valid_phone("+"));
    }

    #[test]
    fn min_length_counts_trimmed_chars() {
        let check = min_length(2, "too short");
        assert_eq!(check(" a "), Err("too short".to_string()));
        assert_eq!(check("Jo"), Ok(()));
        assert_eq!(check("Zoë"), Ok(()));
    }

    #[test]
    fn required_rejects_whitespace() {
        let check = required("required");
        assert!(check("   ").is_err());
        assert!(check("\t\n").is_err());
        assert!(check("x").is_ok());
    }

    #[test]
    fn date_not_before_distinguishes_invalid_and_past() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).expect("date");
        let check = date_not_before(today, "invalid", "past");
        assert_eq!(check("2025-01-10"), Ok(()));
        assert_eq!(check("2025-01-09"), Err("past".to_string()));
        assert_eq!(check("2025-13-01"), Err("invalid".to_string()));
    }

    #[test]
    fn run_validators_stops_at_first_error() {
        let validators = vec![required("empty"), min_length(5, "short")];
        assert_eq!(run_validators(&validators, ""), Err("empty".to_string()));
        assert_eq!(run_validators(&validators, "abc"), Err("short".to_string()));
        assert_eq!(run_validators(&validators, "abcdef"), Ok(()));
    }
}
