//! Row validation and cleaning
//!
//! Turns a [`RawRow`] into an [`EndUserRecord`] or the first [`SkipReason`]
//! that applies. Checks run in a fixed order: missing username, username
//! pattern, then email.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{EndUserRecord, RawRow, SkipReason};

/// Letters, whitespace and periods only
static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s.]+$").expect("username pattern is valid"));

/// local-part@domain.tld, lowercase only
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("email pattern is valid")
});

/// Cell text that spreadsheet exports use for a missing value
const NA_PLACEHOLDERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Validates rows and stamps each accepted record with the default password
#[derive(Debug, Clone)]
pub struct RowValidator {
    default_password: String,
}

impl RowValidator {
    pub fn new(default_password: impl Into<String>) -> Self {
        Self {
            default_password: default_password.into(),
        }
    }

    pub fn validate(&self, row: &RawRow) -> Result<EndUserRecord, SkipReason> {
        let Some(username) = present(&row.username) else {
            return Err(SkipReason::MissingUsername);
        };

        if !USERNAME_PATTERN.is_match(username) {
            return Err(SkipReason::InvalidUsername(username.to_string()));
        }

        let email = match present(&row.email) {
            Some(raw) => Some(clean_email(raw)?),
            None => None,
        };

        Ok(EndUserRecord {
            username: username.to_string(),
            section: present(&row.section).map(str::to_string),
            email,
            mobile: present(&row.mobile).map(str::to_string),
            employee_id: present(&row.employee_id).map(str::to_string),
            password: self.default_password.clone(),
        })
    }
}

/// Strip quote characters and check the address shape
fn clean_email(raw: &str) -> Result<String, SkipReason> {
    let email: String = raw.chars().filter(|c| *c != '\'' && *c != '"').collect();
    if EMAIL_PATTERN.is_match(&email) {
        Ok(email)
    } else {
        Err(SkipReason::InvalidEmail(email))
    }
}

/// Trimmed value, or `None` when absent, blank or a missing-value placeholder
fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !NA_PLACEHOLDERS.contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(username: &str) -> RawRow {
        RawRow {
            row_number: 2,
            username: Some(username.to_string()),
            ..Default::default()
        }
    }

    fn validator() -> RowValidator {
        RowValidator::new("admin")
    }

    #[test]
    fn test_valid_row_is_cleaned() {
        let raw = RawRow {
            row_number: 2,
            username: Some("  J. R. Smith ".to_string()),
            section: Some(" Stores ".to_string()),
            email: Some(" 'jr.smith@example.com' ".to_string()),
            mobile: Some(" +91 98765 43210 ".to_string()),
            employee_id: Some(" E1024 ".to_string()),
        };

        let record = validator().validate(&raw).unwrap();
        assert_eq!(record.username, "J. R. Smith");
        assert_eq!(record.section.as_deref(), Some("Stores"));
        assert_eq!(record.email.as_deref(), Some("jr.smith@example.com"));
        assert_eq!(record.mobile.as_deref(), Some("+91 98765 43210"));
        assert_eq!(record.employee_id.as_deref(), Some("E1024"));
        assert_eq!(record.password, "admin");
    }

    #[test]
    fn test_missing_username_is_skipped() {
        let validator = validator();
        for username in ["", "   ", "\t", "nan"] {
            assert_eq!(
                validator.validate(&row(username)),
                Err(SkipReason::MissingUsername),
                "username {:?}",
                username
            );
        }
        let absent = RawRow {
            row_number: 5,
            ..Default::default()
        };
        assert_eq!(validator.validate(&absent), Err(SkipReason::MissingUsername));
    }

    #[test]
    fn test_username_with_digits_or_symbols_is_skipped() {
        let validator = validator();
        for username in ["R2D2", "Jane_Doe", "O'Brien", "Anna-Maria", "user@site"] {
            assert_eq!(
                validator.validate(&row(username)),
                Err(SkipReason::InvalidUsername(username.to_string()))
            );
        }
    }

    #[test]
    fn test_username_letters_spaces_periods_pass() {
        let validator = validator();
        for username in ["Jane", "Jane Doe", "Dr. A.K. Rao"] {
            assert!(validator.validate(&row(username)).is_ok(), "{}", username);
        }
    }

    #[test]
    fn test_email_requires_tld() {
        let validator = validator();
        let mut raw = row("Jane");

        raw.email = Some("a.b@example.com".to_string());
        assert!(validator.validate(&raw).is_ok());

        raw.email = Some("a.b@example".to_string());
        assert_eq!(
            validator.validate(&raw),
            Err(SkipReason::InvalidEmail("a.b@example".to_string()))
        );
    }

    #[test]
    fn test_email_is_case_sensitive() {
        let mut raw = row("Jane");
        raw.email = Some("Jane@Example.com".to_string());
        assert!(matches!(
            validator().validate(&raw),
            Err(SkipReason::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_email_of_only_quotes_is_invalid() {
        let mut raw = row("Jane");
        raw.email = Some("\"\"".to_string());
        assert_eq!(
            validator().validate(&raw),
            Err(SkipReason::InvalidEmail(String::new()))
        );
    }

    #[test]
    fn test_username_checked_before_email() {
        let mut raw = row("R2D2");
        raw.email = Some("broken".to_string());
        assert!(matches!(
            validator().validate(&raw),
            Err(SkipReason::InvalidUsername(_))
        ));
    }

    #[test]
    fn test_blank_optionals_become_none() {
        let raw = RawRow {
            row_number: 2,
            username: Some("Jane".to_string()),
            section: Some("  ".to_string()),
            email: Some(" ".to_string()),
            mobile: Some(String::new()),
            employee_id: Some("nan".to_string()),
        };

        let record = validator().validate(&raw).unwrap();
        assert_eq!(record.section, None);
        assert_eq!(record.email, None);
        assert_eq!(record.mobile, None);
        assert_eq!(record.employee_id, None);
    }

    #[test]
    fn test_placeholder_username_is_missing() {
        let validator = validator();
        for username in ["None", "NULL", "null", "NA", "NaN", "N/A", "#N/A", " <NA> "] {
            assert_eq!(
                validator.validate(&row(username)),
                Err(SkipReason::MissingUsername),
                "username {:?}",
                username
            );
        }
    }

    #[test]
    fn test_placeholder_optionals_become_none() {
        let raw = RawRow {
            row_number: 2,
            username: Some("Jane".to_string()),
            section: Some("NULL".to_string()),
            email: Some("N/A".to_string()),
            mobile: Some("#N/A".to_string()),
            employee_id: Some("None".to_string()),
        };

        let record = validator().validate(&raw).unwrap();
        assert_eq!(record.section, None);
        assert_eq!(record.email, None);
        assert_eq!(record.mobile, None);
        assert_eq!(record.employee_id, None);
    }

    #[test]
    fn test_placeholder_match_is_exact() {
        // Only whole-cell placeholders count as missing
        let validator = validator();
        assert!(validator.validate(&row("Nana")).is_ok());
        assert!(validator.validate(&row("Na")).is_ok());
    }
}
