use crate::domain::payment::CardDetails;
use crate::domain::ports::{CardValidation, CardValidator};
use crate::domain::step::FieldError;

/// Deterministic field checks for a new card.
///
/// Errors are reported in field order: name, number, cvc, zip, expiration.
/// Expiry is checked for shape only, not against the current date.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicCardValidator;

impl BasicCardValidator {
    pub fn new() -> Self {
        Self
    }
}

impl CardValidator for BasicCardValidator {
    fn validate(&self, details: &CardDetails) -> CardValidation {
        let mut errors = Vec::new();

        if details.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Missing required field"));
        }

        let number: String = details
            .number
            .chars()
            .filter(|c| *c != ' ' && *c != '-')
            .collect();
        if number.is_empty() {
            errors.push(FieldError::new("number", "Missing required field"));
        } else if !is_digits(&number) || !(12..=19).contains(&number.len()) {
            errors.push(FieldError::new("number", "Card number is not valid"));
        } else if !luhn_valid(&number) {
            errors.push(FieldError::new("number", "Card number failed checksum"));
        }

        if !(is_digits(&details.cvc) && (3..=4).contains(&details.cvc.len())) {
            errors.push(FieldError::new("cvc", "CVC must be 3 or 4 digits"));
        }

        if details.zip.trim().is_empty() {
            errors.push(FieldError::new("zip", "Missing required field"));
        }

        if !is_expiration(&details.expiration_date) {
            errors.push(FieldError::new(
                "expiration-date",
                "Expiration must be MM/YY",
            ));
        }

        CardValidation { errors }
    }
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn is_expiration(value: &str) -> bool {
    let Some((month, year)) = value.split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 2 || !is_digits(month) || !is_digits(year) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}

fn luhn_valid(number: &str) -> bool {
    let sum: u32 = number
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, digit)| {
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum();
    sum % 10 == 0
}
