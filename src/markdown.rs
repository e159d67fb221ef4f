//! Converts the small Markdown subset the completion model is asked to produce into HTML.
//!
//! The conversion is an ordered chain of substitutions over the whole text:
//! headings (`###`, then `##`, then `#`), bold, italic, list items, list wrapping, line breaks.
//! Source text is HTML-escaped before any substitution so model output can never inject markup.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ESCAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);|[&<>"']"#).unwrap()
});
static H3_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?im)^### (.*)$").unwrap());
static H2_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?im)^## (.*)$").unwrap());
static H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?im)^# (.*)$").unwrap());
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static LIST_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*-[ \t]+(.*)$").unwrap());
static LIST_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^<li>.*</li>(?:\n<li>.*</li>)*").unwrap());

/// Escapes `& < > " '`, leaving `&` alone when it already starts an entity reference.
pub fn escape_html(text: &str) -> String {
    ESCAPE_RE
        .replace_all(text, |caps: &Captures| {
            let matched = &caps[0];
            match matched {
                "&" => "&amp;".to_string(),
                "<" => "&lt;".to_string(),
                ">" => "&gt;".to_string(),
                "\"" => "&quot;".to_string(),
                "'" => "&#39;".to_string(),
                entity => entity.to_string(),
            }
        })
        .into_owned()
}

pub fn render(markdown: &str) -> String {
    let text = markdown.replace("\r\n", "\n").replace('\r', "\n");
    let html = escape_html(&text);

    let html = H3_RE.replace_all(&html, "<h3>$1</h3>");
    let html = H2_RE.replace_all(&html, "<h2>$1</h2>");
    let html = H1_RE.replace_all(&html, "<h1>$1</h1>");

    let html = BOLD_RE.replace_all(&html, "<b>$1</b>");
    let html = ITALIC_RE.replace_all(&html, "<i>$1</i>");

    let html = LIST_ITEM_RE.replace_all(&html, "<li>$1</li>");
    let html = LIST_RUN_RE.replace_all(&html, |caps: &Captures| {
        format!("<ul>{}</ul>", caps[0].replace('\n', ""))
    });

    html.replace('\n', "<br>").trim().to_string()
}
