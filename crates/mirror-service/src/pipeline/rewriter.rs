//! Link rewriter
//!
//! Applies the ordered link rules to a piece of HTML markup.
//!
//! - Anchors (`<a href="…">…</a>`): the `href` is rewritten by every matching
//!   rule in order, and the anchor text is replaced by the last matching rule
//!   that carries a display text.
//! - Bare `http(s)://` URLs outside anchors and outside tags get the URL
//!   replacement only.
//!
//! Everything else in the markup is copied through untouched. Patterns are
//! matched case-insensitively against the unescaped URL (`&amp;` reads as
//! `&`); replacement templates use `$1` / `${name}` group references. A URL
//! no rule matched is copied byte for byte.

use std::borrow::Cow;
use std::sync::LazyLock;

use mirror_core::LinkRule;
use regex::{Captures, Regex, RegexBuilder};
use tracing::warn;

/// Opening tag up to the href value, the value, rest of the opening tag,
/// anchor text, closing tag
static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)(<a\b[^>]*?\bhref\s*=\s*")([^"]*)("[^>]*>)(.*?)(</a\s*>)"#).unwrap()
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s<>"]+"#).unwrap());

/// Upper bound on the compiled size of a single admin-supplied pattern
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Compile a link-rule pattern the way the rewriter matches it
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
}

/// Escape text for inclusion in the platform's HTML subset
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escape an attribute value for a double-quoted attribute
pub fn escape_attr(value: &str) -> String {
    escape_html(value).replace('"', "&quot;")
}

/// Reverse of [`escape_attr`] for the entities the platform emits
pub fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Rewrite `markup` with `rules`, compiling them for this call only
pub fn rewrite(markup: &str, rules: &[LinkRule]) -> String {
    LinkRewriter::new(rules).rewrite(markup)
}

struct CompiledRule<'r> {
    regex: Regex,
    replacement: &'r str,
    text: Option<&'r str>,
}

/// URL after the matching rules ran, with the display text they chose
struct Rewritten<'r> {
    url: String,
    text: Option<&'r str>,
}

/// A rule snapshot compiled once and applied to every markup of a post
pub struct LinkRewriter<'r> {
    rules: Vec<CompiledRule<'r>>,
}

impl<'r> LinkRewriter<'r> {
    /// Compile `rules` in order; rules whose pattern does not compile are
    /// skipped with a warning.
    pub fn new(rules: &'r [LinkRule]) -> Self {
        let rules = rules
            .iter()
            .filter_map(|rule| match compile_pattern(&rule.pattern) {
                Ok(regex) => Some(CompiledRule {
                    regex,
                    replacement: &rule.replacement,
                    text: rule
                        .text_replacement
                        .as_deref()
                        .filter(|text| !text.is_empty()),
                }),
                Err(err) => {
                    warn!(
                        rule_id = rule.id,
                        pattern = %rule.pattern,
                        error = %err,
                        "Skipping link rule with invalid pattern"
                    );
                    None
                }
            })
            .collect();

        Self { rules }
    }

    /// Number of usable rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rewrite(&self, markup: &str) -> String {
        if markup.is_empty() || self.rules.is_empty() {
            return markup.to_string();
        }

        let mut out = String::with_capacity(markup.len());
        let mut last = 0;
        for caps in ANCHOR_RE.captures_iter(markup) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            self.rewrite_outside_anchors(&markup[last..whole.start()], &mut out);
            self.rewrite_anchor(&caps, &mut out);
            last = whole.end();
        }
        self.rewrite_outside_anchors(&markup[last..], &mut out);
        out
    }

    fn rewrite_anchor(&self, caps: &Captures<'_>, out: &mut String) {
        let href = &caps[2];
        let (url, text) = match self.apply(&unescape_html(href)) {
            Some(rewritten) => (Cow::Owned(escape_attr(&rewritten.url)), rewritten.text),
            None => (Cow::Borrowed(href), None),
        };

        out.push_str(&caps[1]);
        out.push_str(&url);
        out.push_str(&caps[3]);
        match text {
            Some(text) => out.push_str(&escape_html(text)),
            None => out.push_str(&caps[4]),
        }
        out.push_str(&caps[5]);
    }

    /// Tags outside anchors (`<b>`, `<pre>`, …) are copied as-is; only the
    /// text between them is scanned for bare URLs.
    fn rewrite_outside_anchors(&self, segment: &str, out: &mut String) {
        let mut last = 0;
        for tag in TAG_RE.find_iter(segment) {
            self.rewrite_bare_urls(&segment[last..tag.start()], out);
            out.push_str(tag.as_str());
            last = tag.end();
        }
        self.rewrite_bare_urls(&segment[last..], out);
    }

    fn rewrite_bare_urls(&self, text: &str, out: &mut String) {
        let rewritten = URL_RE.replace_all(text, |caps: &Captures<'_>| {
            let url = &caps[0];
            self.apply(&unescape_html(url))
                .map_or_else(|| url.to_string(), |rewritten| escape_html(&rewritten.url))
        });
        out.push_str(&rewritten);
    }

    /// Run every rule over `url` in order; `None` when no rule matched
    fn apply(&self, url: &str) -> Option<Rewritten<'r>> {
        let mut current = Cow::Borrowed(url);
        let mut matched = false;
        let mut text = None;
        for rule in &self.rules {
            if rule.regex.is_match(&current) {
                current = Cow::Owned(rule.regex.replace_all(&current, rule.replacement).into_owned());
                matched = true;
                if rule.text.is_some() {
                    text = rule.text;
                }
            }
        }

        matched.then(|| Rewritten {
            url: current.into_owned(),
            text,
        })
    }
}
