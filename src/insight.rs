// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;

use crate::models::{Insight, InsightStatus, Transaction};
use crate::store::{self, KvStore};
use crate::utils::http_client;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const API_KEY_SETTING: &str = "api-key";
pub const MODEL_SETTING: &str = "insight-model";

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("an analysis request is already in flight")]
    Busy,
    #[error("no API key configured; set GEMINI_API_KEY or run 'kasbook config set-key'")]
    MissingApiKey,
}

pub struct InsightClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    model: String,
    in_flight: AtomicBool,
}

impl InsightClient {
    pub fn new(api_key: &str, model: &str) -> Result<Self> {
        Ok(Self {
            http: http_client()?,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            in_flight: AtomicBool::new(false),
        })
    }

    /// Key resolution order: environment, then the stored setting.
    pub fn from_store(store: &dyn KvStore) -> Result<Self> {
        let api_key = match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => store::get_setting(store, API_KEY_SETTING)?
                .ok_or(InsightError::MissingApiKey)?,
        };
        let model = store::get_setting(store, MODEL_SETTING)?
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self::new(&api_key, &model)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(self)
    }

    /// Produces an insight for the collection. An empty collection
    /// short-circuits to the fixed "no data" insight without any network
    /// call; transport and parse failures substitute the fixed fallback
    /// instead of propagating. Only one request may be in flight at a time.
    pub fn analyze(&self, transactions: &[Transaction]) -> Result<Insight> {
        if transactions.is_empty() {
            return Ok(no_data_insight());
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(InsightError::Busy.into());
        }
        let insight = self.request(transactions).unwrap_or_else(|err| {
            tracing::warn!(%err, "analysis failed, substituting fallback insight");
            fallback_insight()
        });
        self.in_flight.store(false, Ordering::SeqCst);
        Ok(insight)
    }

    fn request(&self, transactions: &[Transaction]) -> Result<Insight> {
        let data = serde_json::to_string(transactions)?;
        let prompt = format!(
            "Here is my cash book data: {data}. Give me a summary of my \
             financial health and concrete money strategy advice."
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: json!({
                    "type": "OBJECT",
                    "properties": {
                        "status": {"type": "STRING"},
                        "message": {"type": "STRING"},
                        "recommendations": {"type": "ARRAY", "items": {"type": "STRING"}}
                    },
                    "required": ["status", "message", "recommendations"]
                }),
            },
        };
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let resp: GenerateContentResponse = self
            .http
            .post(url)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;
        let text = resp
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| anyhow!("empty model response"))?;
        serde_json::from_str(text).context("model response did not match the insight schema")
    }
}

pub fn no_data_insight() -> Insight {
    Insight {
        status: InsightStatus::Good,
        message: "There is no data to analyze yet.".to_string(),
        recommendations: vec!["Start recording your daily transactions.".to_string()],
    }
}

pub fn fallback_insight() -> Insight {
    Insight {
        status: InsightStatus::Warning,
        message: "Could not analyze your data right now.".to_string(),
        recommendations: vec![
            "Try again later or check your internet connection.".to_string(),
        ],
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}
