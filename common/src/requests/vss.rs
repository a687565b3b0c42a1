use serde::{Deserialize, Serialize};

/// Body of every `/api/vss` proxy response:
/// `{"status":"success","data":...}` or `{"status":"error","message":...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum VssEnvelope<T> {
    Success { data: T },
    Error { message: String },
}

/// Body of `POST /api/vss/summarize`. Only `id`, `prompt` and `model` are
/// checked; the whole object is forwarded unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummarizeFields {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFilesQuery {
    #[serde(default)]
    pub purpose: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_shapes() {
        let ok: VssEnvelope<u32> = VssEnvelope::Success { data: 3 };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"status": "success", "data": 3})
        );
        let err: VssEnvelope<u32> = VssEnvelope::Error {
            message: "down".into(),
        };
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"status": "error", "message": "down"})
        );
    }
}
