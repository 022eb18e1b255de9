// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Notion database sink
//!
//! Each run becomes one page in a database. The page body is the report
//! converted to Notion blocks; a few database properties are filled from
//! the activity and the summary text.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{info, warn};

use super::{Sink, SinkReceipt, SummaryEntry};
use crate::error::{SinkError, truncate_body};
use crate::settings::{Secret, Settings};

const NOTION_API: &str = "https://api.notion.com";
const NOTION_VERSION: &str = "2022-06-28";
const MAX_BLOCKS: usize = 100;
const MAX_PARAGRAPH_CHARS: usize = 1900;
const MAX_RICH_TEXT_CHARS: usize = 2000;
const MAX_REPOSITORY_TAGS: usize = 10;

/// Saves summaries as pages in a Notion database
#[derive(Debug, Clone)]
pub struct NotionSink {
    client: Client,
    api_base: String,
    api_key: Secret,
    database_id: String,
}

impl NotionSink {
    /// Create a sink from settings
    ///
    /// # Errors
    ///
    /// Returns `SinkError::MissingCredentials` without an API key or database
    /// id, or `SinkError::Http` if the HTTP client cannot be built.
    pub fn from_settings(settings: &Settings) -> Result<Self, SinkError> {
        let api_key = settings
            .notion_api_key
            .clone()
            .ok_or(SinkError::MissingCredentials("NOTION_API_KEY"))?;
        let database_id = settings
            .notion_database_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or(SinkError::MissingCredentials("NOTION_DATABASE_ID"))?;
        let client = Client::builder().timeout(settings.sink_timeout).build()?;
        Ok(Self {
            client,
            api_base: NOTION_API.to_string(),
            api_key,
            database_id,
        })
    }

    /// Use a different API origin
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn page_request(&self, entry: &SummaryEntry, minimal: bool) -> Value {
        let title = format!("Daily Summary - {}", entry.date.format("%Y-%m-%d"));
        let mut properties = json!({
            "Name": { "title": [{ "text": { "content": title } }] }
        });

        if !minimal {
            properties["Date"] = json!({ "date": { "start": entry.date.format("%Y-%m-%d").to_string() } });

            let repos: Vec<Value> = entry
                .repository_names()
                .into_iter()
                .take(MAX_REPOSITORY_TAGS)
                .map(|name| json!({ "name": name }))
                .collect();
            if !repos.is_empty() {
                properties["Repositories"] = json!({ "multi_select": repos });
            }

            if let Some(summary) = extract_work_summary(&entry.summary) {
                properties["Summary"] = json!({
                    "rich_text": [{ "text": { "content": summary } }]
                });
            }
        }

        json!({
            "parent": { "database_id": self.database_id },
            "properties": properties,
            "children": markdown_to_blocks(&entry.report),
        })
    }

    async fn create_page(&self, body: &Value) -> Result<String, SinkError> {
        let response = self
            .client
            .post(format!("{}/v1/pages", self.api_base.trim_end_matches('/')))
            .bearer_auth(self.api_key.expose())
            .header("Notion-Version", NOTION_VERSION)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SinkError::Api {
                status: status.as_u16(),
                body: truncate_body(&text, 500),
            });
        }

        let page: Value = response.json().await?;
        Ok(page
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}

#[async_trait]
impl Sink for NotionSink {
    fn name(&self) -> &str {
        "notion"
    }

    async fn persist(&self, entry: &SummaryEntry) -> Result<SinkReceipt, SinkError> {
        let url = match self.create_page(&self.page_request(entry, false)).await {
            Ok(url) => url,
            // Databases without the optional properties reject the full request
            Err(SinkError::Api { status, body }) => {
                warn!(status, body = %body, "Notion rejected page properties, retrying with title only");
                self.create_page(&self.page_request(entry, true)).await?
            }
            Err(e) => return Err(e),
        };
        info!(url = %url, "Summary saved to Notion");
        Ok(SinkReceipt::at(url))
    }
}

fn text_block(kind: &str, content: &str) -> Value {
    let mut block = json!({ "object": "block", "type": kind });
    block[kind] = json!({ "rich_text": [{ "type": "text", "text": { "content": content } }] });
    block
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect::<String>() + "..."
    }
}

fn strip_numbered(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..]
        .strip_prefix(". ")
        .or_else(|| line[digits..].strip_prefix(".\t"))
}

/// Convert markdown to Notion blocks
///
/// Handles headings 1-3, bullets, numbered items, fenced code, dividers and
/// bold lines; anything else becomes a paragraph. At most 100 blocks are
/// produced.
#[must_use]
pub fn markdown_to_blocks(markdown: &str) -> Vec<Value> {
    let mut blocks = Vec::new();
    let mut lines = markdown.lines();

    while let Some(line) = lines.next() {
        if blocks.len() >= MAX_BLOCKS {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let block = if let Some(rest) = line.strip_prefix("### ") {
            text_block("heading_3", rest.trim())
        } else if let Some(rest) = line.strip_prefix("## ") {
            text_block("heading_2", rest.trim())
        } else if let Some(rest) = line.strip_prefix("# ") {
            text_block("heading_1", rest.trim())
        } else if let Some(rest) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            text_block("bulleted_list_item", rest)
        } else if let Some(rest) = strip_numbered(trimmed) {
            text_block("numbered_list_item", rest)
        } else if trimmed.starts_with("```") {
            let code: Vec<&str> = lines
                .by_ref()
                .take_while(|l| !l.trim().starts_with("```"))
                .collect();
            json!({
                "object": "block",
                "type": "code",
                "code": {
                    "rich_text": [{
                        "type": "text",
                        "text": { "content": truncate_chars(&code.join("\n"), MAX_PARAGRAPH_CHARS) }
                    }],
                    "language": "plain text"
                }
            })
        } else if trimmed == "---" {
            json!({ "object": "block", "type": "divider", "divider": {} })
        } else if trimmed.starts_with("**") {
            json!({
                "object": "block",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [{
                        "type": "text",
                        "text": { "content": trimmed.replace("**", "") },
                        "annotations": { "bold": true }
                    }]
                }
            })
        } else {
            text_block("paragraph", &truncate_chars(trimmed, MAX_PARAGRAPH_CHARS))
        };
        blocks.push(block);
    }

    blocks
}

/// Pull the "Work Summary" section out of a generated summary
///
/// The section starts after a line mentioning "Work Summary" (or a bare
/// "Summary" heading) and runs until the next heading or bold line.
#[must_use]
pub fn extract_work_summary(summary: &str) -> Option<String> {
    let mut lines = summary.lines();
    lines.by_ref().find(|line| {
        let lower = line.to_lowercase();
        let bare = lower.trim_start_matches('#').trim().trim_matches('*').trim();
        lower.contains("work summary") || bare.trim_end_matches(':') == "summary"
    })?;

    let body: Vec<&str> = lines
        .skip_while(|l| l.trim().is_empty())
        .take_while(|l| !l.starts_with('#') && !l.trim_start().starts_with("**"))
        .collect();
    let text = body.join("\n").trim().to_string();
    (!text.is_empty()).then(|| text.chars().take(MAX_RICH_TEXT_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn kinds(blocks: &[Value]) -> Vec<&str> {
        blocks.iter().map(|b| b["type"].as_str().unwrap()).collect()
    }

    #[test]
    fn test_markdown_to_blocks_kinds() {
        let md = "# Title\n\n**Date:** 2026-03-10\n\n## Work\n### Sub\n- one\n* two\n1. first\n---\n```\nlet x = 1;\n```\nplain text";
        let blocks = markdown_to_blocks(md);
        assert_eq!(
            kinds(&blocks),
            vec![
                "heading_1",
                "paragraph",
                "heading_2",
                "heading_3",
                "bulleted_list_item",
                "bulleted_list_item",
                "numbered_list_item",
                "divider",
                "code",
                "paragraph",
            ]
        );
        assert_eq!(blocks[1]["paragraph"]["rich_text"][0]["text"]["content"], "Date: 2026-03-10");
        assert_eq!(blocks[1]["paragraph"]["rich_text"][0]["annotations"]["bold"], true);
        assert_eq!(blocks[6]["numbered_list_item"]["rich_text"][0]["text"]["content"], "first");
        assert_eq!(blocks[8]["code"]["rich_text"][0]["text"]["content"], "let x = 1;");
    }

    #[test]
    fn test_long_paragraph_truncated() {
        let long = "x".repeat(2500);
        let blocks = markdown_to_blocks(&long);
        let content = blocks[0]["paragraph"]["rich_text"][0]["text"]["content"]
            .as_str()
            .unwrap();
        assert_eq!(content.chars().count(), MAX_PARAGRAPH_CHARS + 3);
        assert!(content.ends_with("..."));
    }

    #[test]
    fn test_block_limit() {
        let md = (0..250).map(|i| format!("- item {i}")).collect::<Vec<_>>().join("\n");
        assert_eq!(markdown_to_blocks(&md).len(), MAX_BLOCKS);
    }

    #[test]
    fn test_numbered_requires_dot_space() {
        assert_eq!(strip_numbered("12. twelve"), Some("twelve"));
        assert_eq!(strip_numbered("2026-03-10"), None);
        assert_eq!(strip_numbered("no number"), None);
    }

    #[test]
    fn test_extract_work_summary() {
        let summary = "# Daily Summary\n\n## Work Summary\n\nFixed the scheduler.\nAdded tests.\n\n## Key Accomplishments\n- stuff";
        assert_eq!(
            extract_work_summary(summary).as_deref(),
            Some("Fixed the scheduler.\nAdded tests.")
        );
    }

    #[test]
    fn test_extract_work_summary_bold_heading() {
        let summary = "**Work Summary**: \nShipped v1.\n**Key Accomplishments**\n- a";
        assert_eq!(extract_work_summary(summary).as_deref(), Some("Shipped v1."));
    }

    #[test]
    fn test_extract_work_summary_absent() {
        assert_eq!(extract_work_summary("## Accomplishments\n- a"), None);
    }

    #[test]
    fn test_minimal_request_has_only_name() {
        use crate::sink::SummaryEntry;
        use chrono::{NaiveDate, TimeZone};
        use recap_git::{TimeWindow, aggregate};
        use std::sync::Arc;

        let settings = Settings {
            notion_api_key: Some(Secret::new("secret")),
            notion_database_id: Some("db".into()),
            ..Settings::default()
        };
        let sink = NotionSink::from_settings(&settings).unwrap();
        let tz = chrono_tz::UTC;
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let entry = SummaryEntry {
            activity: Arc::new(aggregate(TimeWindow::for_date(date, tz), Vec::new())),
            summary: "## Work Summary\nNothing.".into(),
            report: "# Daily Work Summary".into(),
            date,
            generated_at: tz.with_ymd_and_hms(2026, 3, 10, 18, 0, 0).unwrap(),
        };

        let full = sink.page_request(&entry, false);
        assert_eq!(
            full["properties"]["Name"]["title"][0]["text"]["content"],
            "Daily Summary - 2026-03-10"
        );
        assert_eq!(full["properties"]["Date"]["date"]["start"], "2026-03-10");
        assert_eq!(full["properties"]["Summary"]["rich_text"][0]["text"]["content"], "Nothing.");
        assert!(full["properties"].get("Repositories").is_none());

        let minimal = sink.page_request(&entry, true);
        assert_eq!(minimal["properties"].as_object().unwrap().len(), 1);
        assert_eq!(minimal["parent"]["database_id"], "db");
        assert_eq!(minimal["children"][0]["type"], "heading_1");
    }
}
