use shared::{Error, Result};

/// Trimmed value of a required text field.
pub fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Optional text: blank strings collapse to `None`.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn email(value: &str) -> Result<String> {
    let email = required("email", value)?.to_ascii_lowercase();

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(Error::validation(format!("'{}' is not a valid email", value.trim())));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims_and_rejects_blank() {
        assert_eq!(required("title", "  Hall  ").unwrap(), "Hall");
        assert!(matches!(required("title", "   "), Err(Error::Validation(_))));
    }

    #[test]
    fn test_optional_collapses_blank() {
        assert_eq!(optional(Some(" ".into())), None);
        assert_eq!(optional(Some(" x ".into())), Some("x".into()));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn test_email_validation() {
        assert_eq!(email(" Ana@Studio.org ").unwrap(), "ana@studio.org");
        assert!(email("ana@studio").is_err());
        assert!(email("@studio.org").is_err());
        assert!(email("ana@@studio.org").is_err());
        assert!(email("ana studio@x.org").is_err());
        assert!(email("ana@.org").is_err());
    }
}
