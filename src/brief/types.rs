use serde::Serialize;

/// Counters for one whole run; `items` is the size of the processed slice,
/// so `notified + skipped == items`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub items: usize,
    pub notified: usize,
    pub skipped: usize,
}
