use scraper::{Html, Selector};

// A candidate container shorter than this is probably a teaser or a nav
// block, not the article body.
const MIN_CANDIDATE_LEN: usize = 200;

const CANDIDATES: &[&str] = &[
    "article",
    "main",
    "[role=main]",
    "#content",
    "[itemprop=articleBody]",
    ".post-content",
];

/// Readability pass: try likely article containers first, then fall back to
/// stitching together every paragraph on the page. None means the page had no
/// readable body at all.
pub fn extract_readable(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);

    for sel in CANDIDATES {
        if let Some(text) = node_text(&doc, sel) {
            if text.len() >= MIN_CANDIDATE_LEN {
                return Some(text);
            }
        }
    }

    let p_sel = Selector::parse("p").ok()?;
    let paragraphs: Vec<String> = doc
        .select(&p_sel)
        .map(|p| collapse(&p.text().collect::<String>()))
        .filter(|s| !s.is_empty())
        .collect();
    let joined = paragraphs.join("\n");
    if joined.trim().is_empty() { None } else { Some(joined) }
}

fn node_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let node = doc.select(&sel).next()?;
    let text = collapse(&node.text().collect::<String>());
    if text.trim().is_empty() { None } else { Some(text) }
}

// scraper keeps the source document's indentation; trim line-wise and drop
// blanks
fn collapse(s: &str) -> String {
    let mut out = String::new();
    for line in s.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(trimmed);
    }
    out
}
