use std::borrow::Cow;

use validator::ValidationError;

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Person numbers are `yyyymmdd-nnnn`.
pub fn is_valid_pnr(pnr: &str) -> bool {
    let bytes = pnr.as_bytes();
    bytes.len() == 13
        && bytes[8] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 8 || b.is_ascii_digit())
}

pub fn validate_pnr(pnr: &str) -> Result<(), ValidationError> {
    if is_valid_pnr(pnr) {
        Ok(())
    } else {
        Err(failure(
            "pnr_format",
            "Person number must have the format yyyymmdd-nnnn",
        ))
    }
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(failure("blank", "Value must not be blank"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pnr_format() {
        assert!(is_valid_pnr("20070114-1252"));
        assert!(!is_valid_pnr("200701141252"));
        assert!(!is_valid_pnr("2007011-41252"));
        assert!(!is_valid_pnr("2007a114-1252"));
        assert!(!is_valid_pnr("20070114-125"));
        assert!(validate_pnr("testsson").is_err());
    }

    #[test]
    fn blank_values_are_rejected() {
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
        assert!(not_blank("Leroy").is_ok());
    }
}
