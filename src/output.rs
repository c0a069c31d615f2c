// src/output.rs
// =============================================================================
// Formats crawl results as the plain-text blob handed to the embedder.
//
// Each page becomes one section:
//
//   === Page <n>: <title or url> ===
//   URL: <url>
//
//   <extracted text>
//
// Sections are separated by a blank line. Numbering is 1-based, in the order
// pages were fetched.
// =============================================================================

use crate::crawl::PageResult;

/// Renders all pages into one string. No pages gives an empty string.
pub fn render_pages(pages: &[PageResult]) -> String {
    pages
        .iter()
        .enumerate()
        .map(|(index, page)| render_section(index + 1, page))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_section(ordinal: usize, page: &PageResult) -> String {
    let heading = page.title.as_deref().unwrap_or(&page.url);
    format!(
        "=== Page {}: {} ===\nURL: {}\n\n{}",
        ordinal, heading, page.url, page.content
    )
}

/// Renders one page the way `quick_scrape` reports it.
pub fn render_single(url: &str, title: Option<&str>, content: &str) -> String {
    format!("# {}\nURL: {}\n\n{}", title.unwrap_or(url), url, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str, title: Option<&str>, content: &str) -> PageResult {
        PageResult {
            url: url.to_string(),
            title: title.map(str::to_string),
            content: content.to_string(),
            links: Vec::new(),
            depth: 0,
        }
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(render_pages(&[]), "");
    }

    #[test]
    fn test_sections_numbered_and_separated() {
        let pages = vec![
            page("https://example.com/", Some("Home"), "Welcome."),
            page("https://example.com/faq", None, "Questions."),
        ];

        let expected = "=== Page 1: Home ===\n\
                        URL: https://example.com/\n\
                        \n\
                        Welcome.\n\
                        \n\
                        === Page 2: https://example.com/faq ===\n\
                        URL: https://example.com/faq\n\
                        \n\
                        Questions.";
        assert_eq!(render_pages(&pages), expected);
    }

    #[test]
    fn test_single_page_falls_back_to_url() {
        assert_eq!(
            render_single("https://example.com/", None, "Body"),
            "# https://example.com/\nURL: https://example.com/\n\nBody"
        );
    }
}
