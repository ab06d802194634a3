use anyhow::{Context, Result};
use reqwest::Client;
use url::Url;

use crate::config::Config;
use crate::ingestion::{extractor, fetch, parse};
use crate::llm::openai::OpenAiClient;
use crate::slack;
use crate::summary::Summarizer;
use crate::telemetry::ops::brief::Phase as BriefPhase;
use crate::telemetry::{self};

pub mod types;
use types::RunSummary;

/// The briefing covers the top of the feed only.
pub const ITEM_LIMIT: usize = 10;

/// One full run: fetch and parse the feed once, then walk the first ten
/// items through extract → summarize → notify. The first fault anywhere
/// aborts the run; an unreadable article is the one case that only skips
/// the item.
pub async fn run(cfg: &Config) -> Result<RunSummary> {
    let log = telemetry::brief();
    let _g = log
        .root_span_kv([
            ("feed_url", cfg.feed_url.clone()),
            ("limit", ITEM_LIMIT.to_string()),
        ])
        .entered();

    let client = Client::new();
    let llm = OpenAiClient::new(cfg.openai.clone()).context("build openai client")?;
    let summarizer = Summarizer::new(&llm).context("build summarizer")?;

    // fetch and parse the feed once per run
    let xml = {
        let _s = log.span(&BriefPhase::FetchRss).entered();
        fetch::fetch_rss(&client, &cfg.feed_url).await.context("fetch rss feed")?
    };
    let channel = {
        let _s = log.span(&BriefPhase::ParseRss).entered();
        parse::parse_channel(&xml).context("parse rss feed")?
    };

    let items = channel.items().len().min(ITEM_LIMIT);
    let mut notified = 0usize;
    let mut skipped = 0usize;

    for item in channel.items().iter().take(ITEM_LIMIT) {
        let Some(news) = parse::news_item(item) else {
            skipped += 1;
            log.warn_kv("↩️ skip", [("reason", "no-link".to_string())]);
            continue;
        };
        log.info_kv("📰 item", [
            ("title", news.title.clone()),
            ("published", format!("{:?}", news.published_at)),
        ]);

        let html = {
            let _s = log.span_kv(&BriefPhase::FetchItem, [("url", news.link.clone())]).entered();
            fetch::fetch_article(&client, &news.link)
                .await
                .with_context(|| format!("fetch article {}", news.link))?
        };

        let host = Url::parse(&news.link)
            .ok()
            .and_then(|u| u.host_str().map(|s| s.to_string()))
            .unwrap_or_default();
        let extracted = {
            let _s = log.span_kv(&BriefPhase::Extract, [("host", host.clone())]).entered();
            extractor::extract(&host, &html)
        };
        let Some(text) = extracted else {
            skipped += 1;
            log.warn_kv("↩️ skip", [
                ("reason", "no-readable-content".to_string()),
                ("url", news.link.clone()),
            ]);
            continue;
        };

        let summary = summarizer
            .summarize(&text)
            .await
            .with_context(|| format!("summarize article {}", news.link))?;

        let message = slack::format_message(&news.title, &news.link, &summary);
        let response = {
            let _s = log.span_kv(&BriefPhase::Notify, [("url", news.link.clone())]).entered();
            slack::post_message(&client, &cfg.slack_webhook_url, &message)
                .await
                .with_context(|| format!("notify slack for {}", news.link))?
        };
        log.info(format!("📨 slack response: {response}"));
        notified += 1;
    }

    log.totals(items, notified, skipped);

    let summary = RunSummary { items, notified, skipped };
    if telemetry::config::json_mode() {
        log.result(&summary)?;
    }
    Ok(summary)
}
