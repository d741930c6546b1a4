//! Common validation utilities.

use chrono::{Datelike, NaiveDate};
use validator::ValidationError;

/// Maximum number of days a record date may lie in the future.
///
/// Attendance and ledger entries are occasionally pre-filled for the next
/// day, anything beyond that is a typo.
const MAX_FUTURE_DAYS: i64 = 1;

/// Earliest accepted record year.
const MIN_RECORD_YEAR: i32 = 2000;

/// Validates that a monetary amount (in minor currency units) is positive.
pub fn validate_positive_amount(amount: i64) -> Result<(), ValidationError> {
    if amount > 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("amount_positive");
        err.message = Some("Amount must be positive".into());
        Err(err)
    }
}

/// Validates that a contact number looks like a phone number.
///
/// Digits, spaces, `+` and `-` only, between 5 and 20 characters.
pub fn validate_contact_number(contact: &str) -> Result<(), ValidationError> {
    let ok_chars = contact
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ');
    if ok_chars && (5..=20).contains(&contact.len()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("contact_number");
        err.message = Some("Contact number must be 5-20 digits".into());
        Err(err)
    }
}

/// Validates that a record date is plausible: not before 2000 and not more
/// than one day in the future.
pub fn validate_record_date(date: &NaiveDate) -> Result<(), ValidationError> {
    let today = chrono::Utc::now().date_naive();
    if date.year() < MIN_RECORD_YEAR {
        let mut err = ValidationError::new("date_too_old");
        err.message = Some("Date is before year 2000".into());
        return Err(err);
    }
    if *date - today > chrono::Duration::days(MAX_FUTURE_DAYS) {
        let mut err = ValidationError::new("date_in_future");
        err.message = Some("Date is too far in the future".into());
        return Err(err);
    }
    Ok(())
}

/// Validates an academic year label such as `2024-2025`.
pub fn validate_academic_year(year: &str) -> Result<(), ValidationError> {
    let parts: Vec<&str> = year.split('-').collect();
    let valid = parts.len() == 2
        && parts
            .iter()
            .all(|p| p.len() == 4 && p.chars().all(|c| c.is_ascii_digit()));
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("academic_year");
        err.message = Some("Academic year must look like 2024-2025".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_amount_accepted() {
        assert!(validate_positive_amount(1).is_ok());
        assert!(validate_positive_amount(250_000).is_ok());
    }

    #[test]
    fn zero_and_negative_amounts_rejected() {
        assert!(validate_positive_amount(0).is_err());
        assert!(validate_positive_amount(-5).is_err());
    }

    #[test]
    fn contact_number_accepts_common_formats() {
        assert!(validate_contact_number("+92 300 1234567").is_ok());
        assert!(validate_contact_number("0300-1234567").is_ok());
    }

    #[test]
    fn contact_number_rejects_letters_and_short_input() {
        assert!(validate_contact_number("call me").is_err());
        assert!(validate_contact_number("123").is_err());
    }

    #[test]
    fn record_date_bounds() {
        assert!(validate_record_date(&NaiveDate::from_ymd_opt(1999, 12, 31).unwrap()).is_err());
        assert!(validate_record_date(&NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).is_ok());

        let far_future = chrono::Utc::now().date_naive() + chrono::Duration::days(30);
        assert!(validate_record_date(&far_future).is_err());
    }

    #[test]
    fn record_date_validates_through_a_derived_struct() {
        use validator::Validate;

        #[derive(Validate)]
        struct Entry {
            #[validate(custom(function = "validate_record_date"))]
            date: NaiveDate,
        }

        let entry = Entry {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert!(entry.validate().is_ok());

        let entry = Entry {
            date: NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(),
        };
        assert!(entry.validate().is_err());
    }

    #[test]
    fn academic_year_format() {
        assert!(validate_academic_year("2024-2025").is_ok());
        assert!(validate_academic_year("2024").is_err());
        assert!(validate_academic_year("24-25").is_err());
        assert!(validate_academic_year("2024-25").is_err());
    }
}
