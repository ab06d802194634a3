use chrono::{DateTime, Utc};

/// One feed entry after normalization: a link is guaranteed, the title may be
/// empty, the publication date is best-effort.
#[derive(Clone, Debug, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub published_at: Option<DateTime<Utc>>,
}
