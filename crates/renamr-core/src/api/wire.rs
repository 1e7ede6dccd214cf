//! JSON shapes of the generateContent endpoint.
//!
//! Response types are lenient: every level is optional so that a body with
//! the wrong shape parses and is then rejected by [`GenerateResponse::first_text`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestPart {
    pub text: String,
}

impl GenerateRequest {
    /// Single-turn request carrying one text part.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Text at `candidates[0].content.parts[0].text`, if present and non-empty.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
    }
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Why the endpoint refused a request, from `error.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Unauthenticated,
    PermissionDenied,
    Other,
}

impl ErrorEnvelope {
    /// Parses an error body; anything unparseable yields an empty envelope.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn message(&self) -> Option<&str> {
        self.error.as_ref()?.message.as_deref()
    }

    pub fn rejection(&self) -> Rejection {
        match self.error.as_ref().and_then(|e| e.status.as_deref()) {
            Some("UNAUTHENTICATED") => Rejection::Unauthenticated,
            Some("PERMISSION_DENIED") => Rejection::PermissionDenied,
            _ => Rejection::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(GenerateRequest::from_prompt("hi")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "contents": [ { "parts": [ { "text": "hi" } ] } ] })
        );
    }

    #[test]
    fn first_text_found() {
        let r: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Quarterly Report.txt"}],"role":"model"}}]}"#,
        )
        .unwrap();
        assert_eq!(r.first_text(), Some("Quarterly Report.txt"));
    }

    #[test]
    fn first_text_missing_or_empty() {
        for body in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{}]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#,
        ] {
            let r: GenerateResponse = serde_json::from_str(body).unwrap();
            assert_eq!(r.first_text(), None, "{body}");
        }
    }

    #[test]
    fn error_envelope_statuses() {
        let e = ErrorEnvelope::parse(
            br#"{"error":{"code":401,"message":"API key not valid","status":"UNAUTHENTICATED"}}"#,
        );
        assert_eq!(e.message(), Some("API key not valid"));
        assert_eq!(e.rejection(), Rejection::Unauthenticated);

        let e = ErrorEnvelope::parse(br#"{"error":{"status":"PERMISSION_DENIED"}}"#);
        assert_eq!(e.rejection(), Rejection::PermissionDenied);
        assert_eq!(e.message(), None);
    }

    #[test]
    fn error_envelope_garbage() {
        let e = ErrorEnvelope::parse(b"<html>bad gateway</html>");
        assert_eq!(e.message(), None);
        assert_eq!(e.rejection(), Rejection::Other);
    }
}
