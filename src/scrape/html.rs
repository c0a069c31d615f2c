// src/scrape/html.rs
// =============================================================================
// This module pulls the useful parts out of an HTML page.
//
// Steps, in order:
// 1. Remove noise: scripts, styles, navigation, headers/footers, iframes
// 2. Find a title (<title>, falling back to the first <h1>)
// 3. Pick the content root (main / article / role=main / common ids and
//    classes, falling back to <body>)
// 4. Collect every http(s) link on what is left of the page
//
// We use the `scraper` crate for parsing and CSS selectors, and the `url`
// crate to resolve relative links against the page they were found on.
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

// Elements that are presentation or navigation, never content
static NOISE: LazyLock<Selector> =
    LazyLock::new(|| selector("script, style, nav, footer, header, iframe, noscript"));
static IMAGES: LazyLock<Selector> = LazyLock::new(|| selector("img"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static BODY: LazyLock<Selector> = LazyLock::new(|| selector("body"));
static LINKS: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));

/// Where pages usually keep their real content, most specific first.
const CONTENT_SELECTORS: [&str; 7] = [
    "main",
    "article",
    "[role=\"main\"]",
    ".content",
    ".main-content",
    "#content",
    "#main",
];

static CONTENT_ROOTS: LazyLock<Vec<Selector>> =
    LazyLock::new(|| CONTENT_SELECTORS.iter().map(|css| selector(css)).collect());

// All selectors above are compile-time constants, so a parse failure is a bug
fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector is valid")
}

/// The pieces of a page we keep after cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    pub title: Option<String>,
    /// Serialized HTML of the content root, noise already removed.
    pub content_html: String,
    /// Absolute http(s) links, first-seen order, no duplicates.
    pub links: Vec<String>,
}

/// Cleans `html` and splits it into title, content and links.
///
/// `page_url` is the page's own address; relative links resolve against it.
pub fn parse_page(html: &str, page_url: &Url, include_images: bool) -> ParsedPage {
    // Parse the HTML into a document we can edit
    let mut document = Html::parse_document(html);

    // Noise goes first, so nothing below can see it
    remove_matching(&mut document, &NOISE);
    if !include_images {
        remove_matching(&mut document, &IMAGES);
    }

    // Title: <title> first, then the first <h1> that survived cleaning
    let title = first_text(&document, &TITLE).or_else(|| first_text(&document, &HEADING));

    // Serialize only the content root; html2text renders it later
    let content_html = content_root(&document).html();

    // Links come from the whole (cleaned) page, not just the content root
    let links = extract_links(&document, page_url);

    ParsedPage {
        title,
        content_html,
        links,
    }
}

// Elements matching `selector` that are still attached to the document.
//
// Html::select walks every node the parser ever created, detached ones
// included. Selecting from the root element only walks the live tree.
fn select_attached<'a, 'b>(
    document: &'a Html,
    selector: &'b Selector,
) -> impl Iterator<Item = ElementRef<'a>> + 'b
where
    'a: 'b,
{
    document.root_element().select(selector)
}

// Detaches every element matching `selector`, subtree included
fn remove_matching(document: &mut Html, selector: &Selector) {
    // Collect ids first: we can't edit the tree while iterating over it
    let ids: Vec<_> = select_attached(document, selector)
        .map(|element| element.id())
        .collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

// Text of the first element matching `selector`, whitespace collapsed.
// Empty text counts as no match.
fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    let element = select_attached(document, selector).next()?;

    // Text nodes are concatenated as-is: <b>Java</b>Script stays one word
    let text = element.text().collect::<String>();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

// First content selector with a match wins; otherwise <body>, otherwise <html>
fn content_root(document: &Html) -> ElementRef<'_> {
    CONTENT_ROOTS
        .iter()
        .find_map(|selector| select_attached(document, selector).next())
        .or_else(|| select_attached(document, &BODY).next())
        .unwrap_or_else(|| document.root_element())
}

/// Collects all crawlable links in `document`, resolved against `base`.
pub fn extract_links(document: &Html, base: &Url) -> Vec<String> {
    // HashSet remembers what we've already kept; the Vec keeps the order
    let mut seen = HashSet::new();

    select_attached(document, &LINKS)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(base, href))
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

// Resolves a possibly-relative href to an absolute URL we are willing to crawl.
//
// Returns None for:
// - hrefs that don't resolve at all
// - non-http(s) schemes (mailto:, tel:, javascript:, data:, ...)
// - anything carrying a #fragment
//
// Examples (base = "https://example.com/docs/page"):
//   "intro"             -> Some("https://example.com/docs/intro")
//   "/about"            -> Some("https://example.com/about")
//   "/faq#billing"      -> None
//   "mailto:a@b.com"    -> None
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    // join() handles both relative and absolute hrefs, like a browser would
    let url = base.join(href.trim()).ok()?;

    if !is_crawlable(&url) || url.fragment().is_some() {
        return None;
    }

    Some(url.into())
}

fn is_crawlable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is LazyLock?
//    - A value built the first time it is used, then shared forever after
//    - Parsing a CSS selector takes work, so we do it once, not per page
//
// 2. Why detach() instead of deleting nodes?
//    - scraper stores the whole document in one arena (an ego_tree Tree)
//    - detach() unhooks a node and its children from their parent
//    - The node still exists in the arena, so every later lookup has to start
//      from the root element to skip it (see select_attached)
//
// 3. What is ElementRef<'_>?
//    - A borrowed view of one element inside the document
//    - The lifetime ties it to the Html it came from, so the document can't
//      be dropped or edited while we still hold it
// -----------------------------------------------------------------------------
