use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Wire request for Ollama's `/api/generate`.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Wire response. Only `response` matters; everything else is ignored.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Blocking client for an Ollama-compatible generation endpoint.
///
/// One request at a time, no retries, no caching: the caller decides what a
/// failed generation degrades to.
#[derive(Debug)]
pub struct OllamaClient {
    endpoint: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl OllamaClient {
    pub fn new(host: &str, port: u16, model: &str) -> Result<Self> {
        // The blocking client defaults to a 30 second timeout; local models
        // routinely take longer than that, so requests wait indefinitely.
        let client = reqwest::blocking::Client::builder().timeout(None).build()?;
        Ok(OllamaClient {
            endpoint: format!("http://{host}:{port}/api/generate"),
            model: model.to_owned(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one prompt and return the trimmed completion.
    pub fn generate(&self, prompt: &str) -> Result<String> {
        debug!("[generate] POST {} ({} prompt bytes)", self.endpoint, prompt.len());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()?
            .error_for_status()?;

        let body: GenerateResponse = response.json()?;
        Ok(body.response.trim().to_owned())
    }
}
