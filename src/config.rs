use std::env;
use std::time::Duration;

use anyhow::{Result, bail};

/// Fixed feed source; the briefing always reads the top of this feed.
pub const COINDESK_FEED_URL: &str = "https://www.coindesk.com/arc/outboundfeeds/rss/";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TOP_P: f32 = 0.5;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, Debug)]
pub struct Config {
    pub feed_url: String,
    pub slack_webhook_url: String,
    pub openai: OpenAiConfig,
}

#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub timeout: Duration,
}

impl Config {
    /// Resolve everything required up front so a missing variable fails the
    /// run before any network traffic happens.
    pub fn from_env() -> Result<Self> {
        let api_key = match env::var("OPENAI_API_KEY") {
            Ok(v) if !v.is_empty() => v,
            _ => bail!("OPENAI_API_KEY is not set"),
        };
        let slack_webhook_url = match env::var("SLACK_WEBHOOK_URL") {
            Ok(v) if !v.is_empty() => v,
            _ => bail!("SLACK_WEBHOOK_URL is not set"),
        };

        Ok(Self {
            feed_url: COINDESK_FEED_URL.to_string(),
            slack_webhook_url,
            openai: OpenAiConfig::from_env(api_key),
        })
    }
}

impl OpenAiConfig {
    pub fn from_env(api_key: String) -> Self {
        let mut cfg = Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        if let Ok(base) = env::var("OPENAI_BASE_URL") {
            cfg.base_url = base;
        }
        if let Ok(model) = env::var("OPENAI_MODEL") {
            cfg.model = model;
        }
        cfg
    }
}
