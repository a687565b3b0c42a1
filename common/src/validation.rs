//! Field rules shared by the wizard forms and the backend handlers.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Joins a list of errors into one line for HTTP responses.
pub fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn required(field: &str, value: &str, message: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, message));
    }
}

pub fn rtsp_url(value: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new("rtspUrl", "RTSP URL is required."));
    } else if !is_rtsp_url(value) {
        errors.push(ValidationError::new(
            "rtspUrl",
            "Invalid RTSP URL format. Must start with rtsp://",
        ));
    }
}

pub fn is_rtsp_url(value: &str) -> bool {
    value.trim().to_ascii_lowercase().starts_with("rtsp://")
}

/// Parses a numeric form field. Blank input is `Ok(None)`.
pub fn optional_number(
    field: &str,
    value: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            errors.push(ValidationError::new(field, "Must be a number"));
            None
        }
    }
}

/// Parses a numeric form field that must be present.
pub fn number(
    field: &str,
    value: &str,
    missing: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<f64> {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, missing));
        return None;
    }
    optional_number(field, value, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rtsp_prefix_is_case_insensitive() {
        assert!(is_rtsp_url("RTSP://cam.local/stream"));
        assert!(!is_rtsp_url("http://cam.local/stream"));
    }

    #[test]
    fn numbers_reject_garbage_but_allow_blank() {
        let mut errors = Vec::new();
        assert_eq!(optional_number("n", "  ", &mut errors), None);
        assert!(errors.is_empty());
        assert_eq!(optional_number("n", "2.5", &mut errors), Some(2.5));
        assert_eq!(optional_number("n", "ten", &mut errors), None);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "n: Must be a number");
    }

    #[test]
    fn required_number_reports_missing() {
        let mut errors = Vec::new();
        assert_eq!(number("numFrames", "", "Number of frames is required.", &mut errors), None);
        assert_eq!(describe(&errors), "numFrames: Number of frames is required.");
    }
}
