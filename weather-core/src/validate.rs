use crate::error::WeatherError;

/// Which characters a location query may contain beyond letters, whitespace,
/// hyphens, apostrophes and periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub allow_digits: bool,
}

impl ValidationPolicy {
    fn permits(&self, c: char) -> bool {
        c.is_alphabetic()
            || c.is_whitespace()
            || matches!(c, '-' | '\'' | '.')
            || (self.allow_digits && c.is_ascii_digit())
    }
}

/// Trim and check a raw location query. Returns the trimmed text.
pub fn validate_location(raw: &str, policy: ValidationPolicy) -> Result<String, WeatherError> {
    if raw.is_empty() {
        return Err(WeatherError::validation("City name is required"));
    }

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(WeatherError::validation("City name cannot be empty"));
    }

    if !trimmed.chars().all(|c| policy.permits(c)) {
        return Err(WeatherError::validation("City name contains invalid characters"));
    }

    Ok(trimmed.to_string())
}
