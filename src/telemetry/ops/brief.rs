use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Brief;

#[derive(Copy, Clone, Debug)]
pub enum Phase {
    FetchRss,
    ParseRss,
    FetchItem,
    Extract,
    Summarize,
    Translate,
    Notify,
}

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::FetchRss => "fetch_rss",
            Phase::ParseRss => "parse_rss",
            Phase::FetchItem => "fetch_item",
            Phase::Extract => "extract",
            Phase::Summarize => "summarize",
            Phase::Translate => "translate",
            Phase::Notify => "notify",
        }
    }
    fn span(&self) -> Span {
        match self {
            Phase::FetchRss => info_span!("fetch_rss"),
            Phase::ParseRss => info_span!("parse_rss"),
            Phase::FetchItem => info_span!("fetch_item"),
            Phase::Extract => info_span!("extract"),
            Phase::Summarize => info_span!("summarize"),
            Phase::Translate => info_span!("translate"),
            Phase::Notify => info_span!("notify"),
        }
    }
}

impl OpMarker for Brief {
    const NAME: &'static str = "brief";
    type Phase = Phase;
    fn root_span() -> Span {
        info_span!("brief")
    }
}
