use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Base64 media sent inline with a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMedia {
    pub mime_type: String,
    /// Standard base64, without the `data:` prefix.
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("image data is missing")]
    Missing,
    #[error("image data is not valid base64")]
    InvalidBase64,
    #[error("image data is not a base64 data URI")]
    NotBase64Uri,
}

impl InlineMedia {
    /// Accepts `data:<mime>;base64,<data>` or bare base64, which is taken to
    /// be a JPEG image.
    pub fn parse(input: &str) -> Result<Self, MediaError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(MediaError::Missing);
        }
        let (mime_type, data) = match input.strip_prefix("data:") {
            Some(rest) => {
                let (meta, data) = rest.split_once(',').ok_or(MediaError::NotBase64Uri)?;
                let mut params = meta.split(';');
                let mime_type = params.next().unwrap_or_default().trim();
                if mime_type.is_empty() || !params.any(|p| p.trim() == "base64") {
                    return Err(MediaError::NotBase64Uri);
                }
                (mime_type.to_string(), data)
            }
            None => ("image/jpeg".to_string(), input),
        };
        let data: String = data.chars().filter(|c| !c.is_whitespace()).collect();
        if data.is_empty() {
            return Err(MediaError::Missing);
        }
        STANDARD
            .decode(&data)
            .map_err(|_| MediaError::InvalidBase64)?;
        Ok(Self { mime_type, data })
    }

    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        }
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_data_uri() {
        let media = InlineMedia::parse("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(media.mime_type, "image/png");
        assert_eq!(media.data, "aGVsbG8=");
        assert_eq!(media.to_data_uri(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn bare_base64_is_jpeg() {
        let media = InlineMedia::parse("aGVsbG8=").unwrap();
        assert_eq!(media.mime_type, "image/jpeg");
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert_eq!(InlineMedia::parse("  "), Err(MediaError::Missing));
        assert_eq!(InlineMedia::parse("data:image/jpeg;base64,"), Err(MediaError::Missing));
        assert_eq!(InlineMedia::parse("not base64!"), Err(MediaError::InvalidBase64));
        assert_eq!(
            InlineMedia::parse("data:text/plain,hello"),
            Err(MediaError::NotBase64Uri)
        );
    }
}
