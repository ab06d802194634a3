use anyhow::{Context, Result};
use regex::Regex;

use crate::llm::openai::{ChatMessage, ChatRole, LlmClient, OpenAiError};
use crate::telemetry::{self};
use crate::telemetry::ops::brief::Phase as BriefPhase;

const SYSTEM_PROMPT: &str = "You are a helpful assistant for text summarization.";

/// The prompts fence the payload with triple single quotes; the model
/// sometimes echoes the fence back around its answer.
const DELIMITER: &str = "'''";

#[derive(Clone, Debug, PartialEq)]
pub struct SummaryPair {
    pub english: String,
    pub korean: String,
}

pub struct Summarizer<'a> {
    llm: &'a dyn LlmClient,
    delim: Regex,
}

impl<'a> Summarizer<'a> {
    pub fn new(llm: &'a dyn LlmClient) -> Result<Self> {
        // one fence at each end, nothing in between
        let delim = Regex::new(r"^'''|'''$")?;
        Ok(Self { llm, delim })
    }

    /// English bullet summary first, then its Korean translation. Two
    /// sequential completions against the same model and sampling settings.
    pub async fn summarize(&self, text: &str) -> Result<SummaryPair> {
        let log = telemetry::brief();

        let english = {
            let _s = log.span(&BriefPhase::Summarize).entered();
            self.complete(format!(
                "Summarize the text delimited by triple single quotes and use bullet points for each sentence. {DELIMITER}{text}{DELIMITER}"
            ))
            .await
            .context("summarize article")?
        };
        log.info(format!("🧾 english: {english}"));

        let korean = {
            let _s = log.span(&BriefPhase::Translate).entered();
            let raw = self
                .complete(format!(
                    "Translate the text delimited by triple single quotes into Korean. {DELIMITER}{english}{DELIMITER}"
                ))
                .await
                .context("translate summary")?;
            self.delim.replace_all(&raw, "").to_string()
        };
        log.info(format!("🇰🇷 korean: {korean}"));

        Ok(SummaryPair { english, korean })
    }

    async fn complete(&self, user_prompt: String) -> Result<String, OpenAiError> {
        self.llm
            .chat_completion(vec![
                ChatMessage::new(ChatRole::System, SYSTEM_PROMPT),
                ChatMessage::new(ChatRole::User, user_prompt),
            ])
            .await
    }
}
