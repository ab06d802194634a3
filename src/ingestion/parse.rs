use anyhow::Result;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use rss::{Channel, Item};

use super::types::NewsItem;

pub fn parse_channel(xml: &Bytes) -> Result<Channel> {
    let ch = Channel::read_from(&xml[..])?;
    Ok(ch)
}

/// Normalization boundary: downstream code only ever sees plain strings, the
/// rss crate has already absorbed the feed's element-wrapping conventions.
/// An item without a `<link>` cannot be processed and maps to None.
pub fn news_item(item: &Item) -> Option<NewsItem> {
    let link = item.link()?.to_string();
    Some(NewsItem {
        title: item.title().unwrap_or("").to_string(),
        link,
        published_at: extract_published_at(item),
    })
}

pub fn extract_published_at(item: &Item) -> Option<DateTime<Utc>> {
    if let Some(pub_date) = item.pub_date() {
        if let Ok(dt) = DateTime::parse_from_rfc2822(pub_date) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    // Attempt Dublin Core date if available (RFC3339)
    if let Some(dc) = item.dublin_core_ext() {
        if let Some(first) = dc.dates().first() {
            if let Ok(dt) = DateTime::parse_from_rfc3339(first) {
                return Some(dt.with_timezone(&Utc));
            }
        }
    }
    None
}
