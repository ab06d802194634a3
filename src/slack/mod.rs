use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::json;

use crate::summary::SummaryPair;

/// Slack mrkdwn link line, then the Korean summary, then the English one.
pub fn format_message(title: &str, link: &str, summary: &SummaryPair) -> String {
    format!("<{}|{}>\n\n{}\n\n{}", link, title, summary.korean, summary.english)
}

/// POST {"text": ...} to the incoming webhook; Slack answers with a plain
/// "ok" body, returned for logging.
pub async fn post_message(client: &Client, webhook_url: &str, text: &str) -> Result<String> {
    let payload = json!({ "text": text });
    let response = client
        .post(webhook_url)
        .json(&payload)
        .send()
        .await
        .context("post to slack webhook")?;
    let response = response
        .error_for_status()
        .context("slack webhook rejected the message")?;
    let body = response.text().await.context("read slack webhook response")?;
    Ok(body)
}
