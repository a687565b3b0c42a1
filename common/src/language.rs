//! Response language selection for AI suggestions.

/// Language code used when a request does not name one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Serde default for `language` fields.
pub fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// The locales that have translated error texts.
///
/// Any other code is still passed to the model verbatim, but local messages
/// fall back to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    English,
    Spanish,
    Portuguese,
}

impl Locale {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "es" => Locale::Spanish,
            "pt" => Locale::Portuguese,
            _ => Locale::English,
        }
    }

    /// Picks the text matching this locale.
    pub fn pick<'a>(self, en: &'a str, es: &'a str, pt: &'a str) -> &'a str {
        match self {
            Locale::English => en,
            Locale::Spanish => es,
            Locale::Portuguese => pt,
        }
    }
}
