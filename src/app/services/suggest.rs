//! Client for the generative-AI suggestion service.
//!
//! Two operations: suggest a heading level for a piece of text, and suggest
//! alt text for an image given as a base64 data URL. Both are best-effort -
//! every failure mode (network, HTTP status, malformed body, out-of-range
//! answer) collapses to a documented fallback value and never reaches the
//! block store as an error.

use std::sync::OnceLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::app::domain::block::{MAX_HEADING_LEVEL, MIN_HEADING_LEVEL};
use crate::app::error::{AppError, Result};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Level returned whenever a heading suggestion cannot be made.
pub const FALLBACK_HEADING_LEVEL: u8 = 1;

// ---------------------------------------------------------------------------
// Wire types for the generateContent endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl RequestPart {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn inline_data(mime_type: String, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData { mime_type, data }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
    #[serde(rename = "responseSchema")]
    pub response_schema: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: String,
}

impl GenerateResponse {
    /// Text of the first candidate part, if any.
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()
            .map(|p| p.text.as_str())
    }
}

/// Shape of the structured heading-level answer.
#[derive(Debug, Deserialize)]
struct LevelAnswer {
    level: i64,
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// How requests reach the service. Production uses [`HttpTransport`]; tests
/// substitute a scripted transport and count calls.
pub trait GenerateTransport {
    fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse>;
}

pub struct HttpTransport {
    endpoint: String,
    api_key: String,
    timeout_secs: u64,
}

impl HttpTransport {
    pub fn new(model: &str, api_key: &str, timeout_secs: u64) -> Self {
        Self {
            endpoint: format!("{API_BASE}/{model}:generateContent"),
            api_key: api_key.to_string(),
            timeout_secs,
        }
    }
}

impl GenerateTransport for HttpTransport {
    fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let response = minreq::post(&self.endpoint)
            .with_param("key", &self.api_key)
            .with_header("Content-Type", "application/json")
            .with_timeout(self.timeout_secs)
            .with_json(request)?
            .send()?;

        if !(200..300).contains(&response.status_code) {
            return Err(AppError::Suggest(format!(
                "suggestion service returned status {}",
                response.status_code
            )));
        }

        Ok(response.json()?)
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct SuggestClient {
    transport: Box<dyn GenerateTransport>,
}

impl SuggestClient {
    pub fn new(model: &str, api_key: &str, timeout_secs: u64) -> Self {
        Self {
            transport: Box::new(HttpTransport::new(model, api_key, timeout_secs)),
        }
    }

    pub fn with_transport(transport: Box<dyn GenerateTransport>) -> Self {
        Self { transport }
    }

    /// Suggest a heading level (1-6) for the given text.
    ///
    /// Empty or whitespace-only text short-circuits to 1 without contacting
    /// the service. Any failure, or an answer outside 1-6, falls back to 1.
    pub fn suggest_heading_level(&self, text: &str) -> u8 {
        if text.trim().is_empty() {
            return FALLBACK_HEADING_LEVEL;
        }

        match self.request_heading_level(text) {
            Ok(level) if (MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL).contains(&level) => level,
            Ok(_) => FALLBACK_HEADING_LEVEL,
            Err(e) => {
                eprintln!("Heading level suggestion failed: {}. Using default.", e);
                FALLBACK_HEADING_LEVEL
            }
        }
    }

    fn request_heading_level(&self, text: &str) -> Result<u8> {
        let prompt = format!(
            "Based on the following text, what is the most appropriate HTML heading level (1-6)? \
             For example, a main title should be 1, a major section 2, and a subsection 3.\n\nText: \"{text}\""
        );
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart::text(prompt)],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: serde_json::json!({
                    "type": "OBJECT",
                    "properties": {
                        "level": {
                            "type": "INTEGER",
                            "description": "An integer between 1 and 6.",
                        },
                    },
                    "required": ["level"],
                }),
            }),
        };

        let response = self.transport.generate(&request)?;
        let body = response
            .first_text()
            .ok_or_else(|| AppError::Suggest("empty response from suggestion service".to_string()))?;
        let answer: LevelAnswer = serde_json::from_str(body.trim())?;
        u8::try_from(answer.level)
            .map_err(|_| AppError::Suggest(format!("level out of range: {}", answer.level)))
    }

    /// Suggest descriptive alt text for an image given as a base64 data URL.
    ///
    /// Empty input short-circuits to an empty string without contacting the
    /// service; so does a malformed data URL. Any request failure also falls
    /// back to an empty string.
    pub fn suggest_image_alt_text(&self, data_url: &str) -> String {
        if data_url.is_empty() {
            return String::new();
        }

        match self.request_alt_text(data_url) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Alt text suggestion failed: {}. Leaving alt text empty.", e);
                String::new()
            }
        }
    }

    fn request_alt_text(&self, data_url: &str) -> Result<String> {
        let (mime_type, data) = parse_data_url(data_url)?;
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::text(
                        "Describe this image to be used as alt text for web accessibility. \
                         Be concise and descriptive.",
                    ),
                    RequestPart::inline_data(mime_type, data),
                ],
            }],
            generation_config: None,
        };

        let response = self.transport.generate(&request)?;
        let text = response
            .first_text()
            .ok_or_else(|| AppError::Suggest("empty response from suggestion service".to_string()))?;
        Ok(text.trim().to_string())
    }
}

/// Split a `data:<mime>;base64,<payload>` URL into MIME type and payload.
/// The payload must be valid base64; the decoded bytes are discarded, only
/// the still-encoded payload travels in the request.
pub fn parse_data_url(data_url: &str) -> Result<(String, String)> {
    static MIME_RE: OnceLock<Regex> = OnceLock::new();

    let (header, data) = data_url
        .split_once(',')
        .ok_or_else(|| AppError::Suggest("invalid base64 data URL".to_string()))?;
    if header.is_empty() || data.is_empty() {
        return Err(AppError::Suggest("invalid base64 data URL".to_string()));
    }

    let re = MIME_RE.get_or_init(|| Regex::new(r":(.*?);").expect("mime pattern is valid"));
    let mime_type = re
        .captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|m| !m.is_empty())
        .ok_or_else(|| {
            AppError::Suggest("could not determine MIME type from data URL".to_string())
        })?;

    BASE64
        .decode(data)
        .map_err(|e| AppError::Suggest(format!("invalid base64 payload: {e}")))?;

    Ok((mime_type, data.to_string()))
}
