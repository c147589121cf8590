//! Best-effort metadata extraction from hand-written post HTML.
//!
//! Posts are not produced by this tool, so nothing here can assume a parse
//! tree. Each field is recovered from a fixed chain of sources (JSON-LD first,
//! then meta tags and markup) and every step has a fallback, so extraction
//! never fails.

use std::borrow::Cow;
use std::sync::LazyLock;

use quick_xml::escape::resolve_html5_entity;
use regex::Regex;
use serde_json::Value;

/// Title used when a post has no usable `<title>`.
pub const UNTITLED: &str = "(untitled)";

/// JSON-LD `@type` values that count as a blog post.
const ARTICLE_TYPES: [&str; 2] = ["Article", "BlogPosting"];

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title>(.*?)</title>").unwrap());
static META_DESC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s+name="description"\s+content="(.*?)"\s*/?>"#).unwrap()
});
static META_KEYWORDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s+name="keywords"\s+content="(.*?)"\s*/?>"#).unwrap()
});
static JSONLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script\s+type="application/ld\+json"[^>]*>(.*?)</script>"#).unwrap()
});
static FIRST_P_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<div class="post-content"[\s\S]*?<p>([\s\S]*?)</p>"#).unwrap()
});
// A trailing `T` admits full timestamps such as `2024-03-05T10:00:00Z`.
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(20\d{2}-\d{2}-\d{2})(?:T|\b)").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Metadata recovered from one post document. Tags are raw labels in source
/// order; normalization happens in [`crate::content::tags`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub title: String,
    pub excerpt: String,
    pub date: Option<String>,
    pub tags: Vec<String>,
}

/// Field extractor configured with the site name to strip from titles.
pub struct Extractor {
    title_suffix: Option<Regex>,
}

impl Extractor {
    /// Build an extractor that removes a trailing `| <site_name>` from titles.
    /// Whitespace inside the site name matches any whitespace run.
    pub fn new(site_name: &str) -> Self {
        let words: Vec<String> = site_name.split_whitespace().map(regex::escape).collect();
        let title_suffix = if words.is_empty() {
            None
        } else {
            Regex::new(&format!(r"\s*\|\s*{}\s*$", words.join(r"\s*"))).ok()
        };
        Self { title_suffix }
    }

    pub fn extract(&self, html: &str) -> Extracted {
        let blocks = parse_jsonld(html);
        Extracted {
            title: self.title(html),
            excerpt: excerpt(html),
            date: date(html, &blocks),
            tags: tags(html, &blocks),
        }
    }

    pub fn title(&self, html: &str) -> String {
        let Some(caps) = TITLE_RE.captures(html) else {
            return UNTITLED.to_string();
        };
        let mut title = strip_tags(&caps[1]);
        if let Some(re) = &self.title_suffix {
            title = re.replace(&title, "").into_owned();
        }
        let title = title.trim();
        if title.is_empty() {
            UNTITLED.to_string()
        } else {
            title.to_string()
        }
    }
}

/// Description meta tag, else the first paragraph of the post body.
pub fn excerpt(html: &str) -> String {
    if let Some(caps) = META_DESC_RE.captures(html) {
        return strip_tags(&caps[1]);
    }
    if let Some(caps) = FIRST_P_RE.captures(html) {
        return strip_tags(&caps[1]);
    }
    String::new()
}

/// Publication date as `YYYY-MM-DD`, preferring JSON-LD over a document scan.
pub fn date(html: &str, blocks: &[Value]) -> Option<String> {
    for block in articles(blocks) {
        let published = block
            .get("datePublished")
            .filter(|v| is_truthy(v))
            .or_else(|| block.get("dateCreated"));
        if let Some(found) = published.and_then(Value::as_str).and_then(first_date) {
            return Some(found);
        }
    }
    first_date(html)
}

/// Raw tag labels from JSON-LD `keywords`, else the keywords meta tag.
pub fn tags(html: &str, blocks: &[Value]) -> Vec<String> {
    for block in articles(blocks) {
        match block.get("keywords") {
            Some(Value::String(s)) if !s.trim().is_empty() => return split_keywords(s),
            Some(Value::Array(items)) => {
                return items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.trim().to_string(),
                        other => other.to_string(),
                    })
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            _ => {}
        }
    }
    if let Some(caps) = META_KEYWORDS_RE.captures(html) {
        return split_keywords(&strip_tags(&caps[1]));
    }
    Vec::new()
}

fn split_keywords(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

fn first_date(s: &str) -> Option<String> {
    DATE_RE.captures(s).map(|caps| caps[1].to_string())
}

/// Parse every JSON-LD block independently. Blank or malformed blocks are
/// skipped; arrays contribute their object members.
pub fn parse_jsonld(html: &str) -> Vec<Value> {
    let mut out = Vec::new();
    for caps in JSONLD_RE.captures_iter(html) {
        let block = caps[1].trim();
        if block.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(block) {
            Ok(Value::Object(map)) => out.push(Value::Object(map)),
            Ok(Value::Array(items)) => out.extend(items.into_iter().filter(Value::is_object)),
            Ok(_) => {}
            Err(e) => tracing::debug!("skipping malformed JSON-LD block: {e}"),
        }
    }
    out
}

fn articles(blocks: &[Value]) -> impl Iterator<Item = &Value> {
    blocks.iter().filter(|b| {
        b.get("@type")
            .and_then(Value::as_str)
            .is_some_and(|t| ARTICLE_TYPES.contains(&t))
    })
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
    }
}

/// Reduce a markup fragment to plain text: drop tags, decode entities,
/// collapse whitespace.
pub fn strip_tags(s: &str) -> String {
    let without_tags = TAG_RE.replace_all(s, "");
    let decoded = decode_entities(&without_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode named and numeric character references. Anything that does not
/// resolve is copied through unchanged.
pub fn decode_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let resolved = tail
            .find(';')
            .filter(|&end| end > 0 && end <= 32)
            .and_then(|end| resolve_entity(&tail[..end]).map(|text| (end, text)));
        match resolved {
            Some((end, text)) => {
                out.push_str(&text);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn resolve_entity(name: &str) -> Option<Cow<'static, str>> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(|c| Cow::Owned(c.to_string()));
    }
    resolve_html5_entity(name).map(Cow::Borrowed)
}
