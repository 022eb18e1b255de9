// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Summarization collaborator
//!
//! The coordinator only sees the [`Summarizer`] trait. [`AnthropicSummarizer`]
//! is the production implementation backed by the Anthropic Messages API.

use std::time::Duration;

use async_trait::async_trait;
use chrono_tz::Tz;
use recap_git::ActivityRecord;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{SummarizationError, truncate_body};
use crate::report::render_activity;
use crate::settings::{Secret, Settings};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Turns one day's activity into summary text
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `activity`
    ///
    /// # Errors
    ///
    /// Returns `SummarizationError` when no summary could be produced.
    async fn summarize(&self, activity: &ActivityRecord) -> Result<String, SummarizationError>;
}

/// Build the prompt for a raw activity report
#[must_use]
pub fn build_prompt(raw_activity: &str) -> String {
    format!(
        "You are a helpful assistant that summarizes daily development work.

Below is the raw git activity data collected from the developer's repositories today.
Please analyze this data and create a professional, concise summary that:

1. **Work Summary**: Provide a high-level overview of what was accomplished today (2-3 sentences)
2. **Key Accomplishments**: List the main things achieved, grouped by project/repository
3. **Technical Details**: Brief mention of significant code changes or files modified
4. **Suggested Talking Points**: 2-3 bullet points suitable for a morning standup meeting

The summary should be suitable for sharing in a morning meeting to report on yesterday's work.
If there was no activity, say so briefly instead of inventing work.

Here is the raw git data:

{raw_activity}

Please generate the summary in Markdown format."
    )
}

/// Summarizer backed by the Anthropic Messages API
#[derive(Debug, Clone)]
pub struct AnthropicSummarizer {
    client: Client,
    api_key: Option<Secret>,
    base_url: String,
    model: String,
    max_tokens: u32,
    timezone: Tz,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicSummarizer {
    /// Create a summarizer from settings
    ///
    /// # Errors
    ///
    /// Returns `SummarizationError::Http` if the HTTP client cannot be built.
    pub fn from_settings(settings: &Settings) -> Result<Self, SummarizationError> {
        let client = Client::builder()
            .timeout(settings.summarizer_timeout + Duration::from_secs(5))
            .build()?;
        Ok(Self {
            client,
            api_key: settings.anthropic_api_key.clone(),
            base_url: settings.anthropic_base_url.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            timezone: settings.timezone,
        })
    }

    fn api_url(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Summarizer for AnthropicSummarizer {
    async fn summarize(&self, activity: &ActivityRecord) -> Result<String, SummarizationError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(SummarizationError::MissingApiKey)?;
        let prompt = build_prompt(&render_activity(activity, self.timezone));

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{ "role": "user", "content": prompt }],
        });

        debug!(model = %self.model, "Requesting summary");
        let response = self
            .client
            .post(self.api_url())
            .header("x-api-key", api_key.expose())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SummarizationError::Api {
                status: status.as_u16(),
                body: truncate_body(&text, 500),
            });
        }

        let parsed: MessagesResponse = response.json().await?;
        extract_text(parsed)
    }
}

fn extract_text(response: MessagesResponse) -> Result<String, SummarizationError> {
    let text = response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect::<Vec<_>>()
        .join("\n");
    if text.trim().is_empty() {
        return Err(SummarizationError::EmptyResponse);
    }
    Ok(text)
}
