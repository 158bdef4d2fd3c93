use crate::utils::error::{Result, TravelyError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn rejected(field: &str, value: impl ToString, reason: impl Into<String>) -> TravelyError {
    TravelyError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Image and page references must be absolute http(s) URLs.
pub fn validate_url(field: &str, reference: &str) -> Result<()> {
    let url = Url::parse(reference).map_err(|e| rejected(field, reference, format!("not a URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(rejected(field, reference, format!("scheme '{}' is not http or https", url.scheme())));
    }
    Ok(())
}

pub fn validate_path(field: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(rejected(field, path, "path is empty"));
    }
    if path.contains('\0') {
        return Err(rejected(field, path.escape_default(), "path contains a NUL byte"));
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| TravelyError::MissingConfigError {
        field: field.to_string(),
    })
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(rejected(field, value, "must not be blank"));
    }
    Ok(())
}

/// Inclusive bounds check. NaN is out of every range.
pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(field: &str, value: T, min: T, max: T) -> Result<()> {
    if !(min <= value && value <= max) {
        return Err(rejected(field, value, format!("expected {} to {}", min, max)));
    }
    Ok(())
}

/// Converts a signed input into the unsigned storage type, rejecting negatives.
pub fn validate_non_negative(field: &str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| rejected(field, value, "must not be negative"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_references() {
        assert!(validate_url("image_url", "https://images.unsplash.com/photo-1").is_ok());
        assert!(validate_url("image_url", "http://example.com").is_ok());
        assert!(validate_url("image_url", "").is_err());
        assert!(validate_url("image_url", "not a url").is_err());
        assert!(validate_url("image_url", "ftp://example.com/a.jpg").is_err());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_range("rating", 4.7, 0.0, 5.0).is_ok());
        assert!(validate_range("rating", 5.0, 0.0, 5.0).is_ok());
        assert!(validate_range("rating", 5.1, 0.0, 5.0).is_err());
        assert!(validate_range("rating", f64::NAN, 0.0, 5.0).is_err());
    }

    #[test]
    fn test_signed_counts() {
        assert_eq!(validate_non_negative("nights", 0).unwrap(), 0);
        assert_eq!(validate_non_negative("nights", 4).unwrap(), 4);
        let err = validate_non_negative("nights", -1).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for nights: '-1' (must not be negative)");
    }

    #[test]
    fn test_blank_strings_and_paths() {
        assert!(validate_non_empty_string("title", "Asia Adventure").is_ok());
        assert!(validate_non_empty_string("title", "   ").is_err());
        assert!(validate_path("catalog.path", "catalog.toml").is_ok());
        assert!(validate_path("catalog.path", "").is_err());
        assert!(validate_path("catalog.path", "a\0b").is_err());
    }
}
