mod generic;

/// Per-host dispatch so site-specific extractors can slot in later,
/// e.g. "www.coindesk.com" => sites::coindesk::extract(html)
pub fn extract(host: &str, html: &str) -> Option<String> {
    match host {
        _ => generic::extract_readable(html),
    }
}
