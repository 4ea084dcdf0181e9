//! Structured-output model seam
//!
//! [`StructuredModel`] is the one outbound dependency of the extraction flow.
//! [`GeminiModel`] talks to the Gemini `generateContent` REST endpoint with a
//! blocking client; tests substitute their own implementation.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::ExtractionSettings;
use crate::error::{FiscalError, FiscalResult};

use super::data_uri::DataUri;

/// Everything a model needs to produce structured output for one image
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub prompt: &'a str,
    pub image: &'a DataUri,
    pub input_schema: &'a Value,
    pub output_schema: &'a Value,
}

pub trait StructuredModel {
    /// Run the request and return the model's raw JSON output
    fn generate(&self, request: &GenerationRequest<'_>) -> FiscalResult<Value>;
}

impl<M: StructuredModel + ?Sized> StructuredModel for &M {
    fn generate(&self, request: &GenerationRequest<'_>) -> FiscalResult<Value> {
        (**self).generate(request)
    }
}

impl<M: StructuredModel + ?Sized> StructuredModel for Box<M> {
    fn generate(&self, request: &GenerationRequest<'_>) -> FiscalResult<Value> {
        (**self).generate(request)
    }
}

/// Gemini `generateContent` over HTTPS
pub struct GeminiModel {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiModel {
    /// Build a client from settings; the API key is read from the configured
    /// environment variable
    pub fn from_settings(settings: &ExtractionSettings) -> FiscalResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| FiscalError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: settings.api_key()?,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// The input schema travels as a system instruction; the output schema
    /// constrains the response.
    fn body(request: &GenerationRequest<'_>) -> Value {
        json!({
            "systemInstruction": {
                "parts": [{
                    "text": format!(
                        "The user message is an input matching this JSON schema: {}",
                        request.input_schema
                    )
                }]
            },
            "contents": [{
                "role": "user",
                "parts": [
                    { "text": request.prompt },
                    {
                        "inline_data": {
                            "mime_type": request.image.mime_type(),
                            "data": request.image.payload()
                        }
                    }
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": to_gemini_schema(request.output_schema)
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text)
    }
}

impl StructuredModel for GeminiModel {
    fn generate(&self, request: &GenerationRequest<'_>) -> FiscalResult<Value> {
        tracing::info!(model = %self.model, mime_type = request.image.mime_type(), "requesting receipt extraction");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::body(request))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            let detail: String = detail.chars().take(300).collect();
            return Err(FiscalError::Extraction(format!(
                "service returned {}: {}",
                status, detail
            )));
        }

        let text = response
            .json::<GenerateResponse>()?
            .first_text()
            .ok_or_else(|| FiscalError::Extraction("service returned no content".into()))?;
        tracing::debug!(bytes = text.len(), "received extraction response");

        serde_json::from_str(&text)
            .map_err(|e| FiscalError::Extraction(format!("response is not JSON: {}", e)))
    }
}

/// Gemini spells JSON Schema types in upper case (`OBJECT`, `STRING`, ...)
fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let value = match (key.as_str(), value) {
                        ("type", Value::String(t)) => Value::String(t.to_ascii_uppercase()),
                        _ => to_gemini_schema(value),
                    };
                    (key.clone(), value)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}
