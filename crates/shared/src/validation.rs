//! Common validation utilities.

use validator::ValidationError;

/// Maximum length for group and live titles.
const MAX_TITLE_LENGTH: usize = 120;

lazy_static::lazy_static! {
    static ref SLUG_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Validates that a slug is lowercase alphanumeric with single hyphens.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.len() >= 3 && slug.len() <= 50 && SLUG_REGEX.is_match(slug) {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug_format");
        err.message =
            Some("Slug must be 3-50 chars of lowercase letters, digits and hyphens".into());
        Err(err)
    }
}

/// Validates that a title is non-empty (after trimming) and within bounds.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let trimmed = title.trim();
    if !trimmed.is_empty() && trimmed.len() <= MAX_TITLE_LENGTH {
        Ok(())
    } else {
        let mut err = ValidationError::new("title_length");
        err.message = Some("Title must be 1-120 characters".into());
        Err(err)
    }
}

/// Validates that a ticket price is non-negative.
pub fn validate_price(price: i64) -> Result<(), ValidationError> {
    if price >= 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("price_range");
        err.message = Some("Price must be non-negative".into());
        Err(err)
    }
}
