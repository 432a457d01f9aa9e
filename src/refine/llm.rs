//! OpenAI-compatible chat refiner.
//!
//! Works with OpenAI, OpenRouter, vLLM and anything else implementing the
//! chat completions API. The model is asked for a strict JSON array; replies
//! wrapped in prose or code fences are tolerated by extracting the outermost
//! array before parsing.

use super::{RefineError, RefinedCandidate, Refiner};
use crate::config::RefinerSettings;
use crate::matcher::FontRecommendation;
use crate::selection::SelectionCriteria;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const SYSTEM_PROMPT: &str = "You are a typography consultant. You re-rank font \
candidates for a brand. Reply with nothing but a JSON array of objects, best \
candidate first, each with keys \"family\", \"confidence\" (a number between 0 \
and 1) and \"rationale\" (one sentence). Never invent families that are not in \
the candidate list.";

pub struct LlmRefiner {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl LlmRefiner {
    pub fn new(settings: &RefinerSettings) -> Result<Self, RefineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| RefineError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    fn build_user_prompt(
        candidates: &[FontRecommendation],
        criteria: &SelectionCriteria,
    ) -> String {
        let families: Vec<serde_json::Value> = candidates
            .iter()
            .map(|rec| {
                serde_json::json!({
                    "family": rec.font.family,
                    "category": rec.font.category,
                    "confidence": rec.confidence_score,
                })
            })
            .collect();
        let payload = serde_json::json!({
            "personality_traits": criteria.normalized_traits(),
            "target_audience": criteria.target_audience,
            "candidates": families,
        });
        format!("Re-rank these font candidates for the brand below.\n\n{}", payload)
    }
}

#[async_trait]
impl Refiner for LlmRefiner {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    async fn refine(
        &self,
        candidates: &[FontRecommendation],
        criteria: &SelectionCriteria,
    ) -> Result<Vec<RefinedCandidate>, RefineError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Self::build_user_prompt(candidates, criteria),
                },
            ],
            temperature: 0.2,
        };

        debug!(
            model = %self.model,
            candidates = candidates.len(),
            "Sending refinement request"
        );

        let mut req_builder = self.client.post(&url).json(&request);
        if let Some(api_key) = &self.api_key {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                RefineError::Timeout
            } else {
                RefineError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(RefineError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RefineError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            RefineError::InvalidResponse(format!("Failed to parse chat response: {}", e))
        })?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        parse_refinement(&content)
    }
}

/// Parse a model reply into refined candidates. Tolerates prose and code
/// fences around the array but rejects replies with no usable array.
fn parse_refinement(content: &str) -> Result<Vec<RefinedCandidate>, RefineError> {
    let json = extract_json_array(content).ok_or_else(|| {
        RefineError::InvalidResponse("no JSON array in refiner reply".to_string())
    })?;
    let refined: Vec<RefinedCandidate> = serde_json::from_str(json)
        .map_err(|e| RefineError::InvalidResponse(format!("unparseable refinement: {}", e)))?;
    if refined.is_empty() {
        return Err(RefineError::InvalidResponse(
            "refiner returned an empty ranking".to_string(),
        ));
    }
    Ok(refined)
}

fn extract_json_array(content: &str) -> Option<&str> {
    let start = content.find('[')?;
    let end = content.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&content[start..=end])
}

// Chat completions wire types, trimmed to what the refiner uses.

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}
