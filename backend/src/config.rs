//! Runtime configuration read from the environment at startup.

use log::warn;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE: &str = "octavision.sqlite";
pub const DEFAULT_JSON_LIMIT: usize = 10 * 1024 * 1024; // 10 MB
pub const DEFAULT_UPLOAD_LIMIT: usize = 512 * 1024 * 1024; // 512 MB
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-pro";
pub const DEFAULT_VISION_MODEL: &str = "gemini-pro-vision";
pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_VSS_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_VSS_TIMEOUT_SECS: u64 = 540;

#[derive(Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_url: String,
    pub text_model: String,
    pub vision_model: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VssConfig {
    /// Used when no server is marked as system default.
    pub fallback_base_url: Option<String>,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub json_limit: usize,
    /// Largest file accepted by the VSS upload proxy.
    pub upload_limit: usize,
    /// `None` runs the suggestion flows against the simulated model.
    pub gemini: Option<GeminiConfig>,
    pub vss: VssConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let gemini = text("GEMINI_API_KEY").map(|api_key| GeminiConfig {
            api_key,
            api_url: text("GEMINI_API_URL").unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string()),
            text_model: text("GEMINI_TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            vision_model: text("GEMINI_VISION_MODEL")
                .unwrap_or_else(|| DEFAULT_VISION_MODEL.to_string()),
            request_timeout: Duration::from_secs(parsed(
                &text,
                "GEMINI_REQUEST_TIMEOUT_SECS",
                DEFAULT_GEMINI_TIMEOUT_SECS,
            )),
        });

        AppConfig {
            host: text("OCTAVISION_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parsed(&text, "OCTAVISION_PORT", DEFAULT_PORT),
            database: text("OCTAVISION_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            json_limit: parsed(&text, "OCTAVISION_JSON_LIMIT", DEFAULT_JSON_LIMIT),
            upload_limit: parsed(&text, "OCTAVISION_UPLOAD_LIMIT", DEFAULT_UPLOAD_LIMIT),
            gemini,
            vss: VssConfig {
                fallback_base_url: text("VSS_API_BASE_URL"),
                cache_ttl: Duration::from_secs(parsed(
                    &text,
                    "VSS_URL_CACHE_TTL_SECS",
                    DEFAULT_VSS_CACHE_TTL_SECS,
                )),
                request_timeout: Duration::from_secs(parsed(
                    &text,
                    "VSS_REQUEST_TIMEOUT_SECS",
                    DEFAULT_VSS_TIMEOUT_SECS,
                )),
            },
        }
    }

    pub fn bind_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parsed<T: FromStr + Copy>(text: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match text(key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid value {raw:?} for {key}");
            default
        }),
    }
}
