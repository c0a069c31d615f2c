// src/scrape/text.rs
// =============================================================================
// Turns the cleaned content HTML into plain prose for embedding.
//
// html2text does the layout (paragraphs, lists, tables, wrapping). We use its
// undecorated mode so links keep only their text: hrefs are collected
// separately by the html module, not interleaved into the prose.
// =============================================================================

use crate::error::FetchError;

/// Column at which extracted text is wrapped.
pub const WRAP_WIDTH: usize = 130;

/// Renders `html` to word-wrapped plain text, trimmed of surrounding blank lines.
pub fn html_to_text(html: &str) -> Result<String, FetchError> {
    // plain_no_decorate: no link footnotes, no *emphasis* markers
    let text = html2text::config::plain_no_decorate()
        .string_from_read(html.as_bytes(), WRAP_WIDTH)
        .map_err(|e| FetchError::Render(e.to_string()))?;

    // html2text leaves blank lines around blocks; the caller adds its own spacing
    Ok(text.trim().to_string())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why html.as_bytes()?
//    - string_from_read() reads from anything implementing std::io::Read
//    - A &[u8] slice implements Read, so the string's bytes work directly
//
// 2. Why map the error to a String?
//    - FetchError::Render only needs the message
//    - It keeps html2text's error type out of our public API
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paragraphs() {
        let text = html_to_text("<main><p>First paragraph.</p><p>Second paragraph.</p></main>").unwrap();
        assert!(text.contains("First paragraph."));
        assert!(text.contains("Second paragraph."));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_link_text_kept_href_dropped() {
        let text = html_to_text(r#"<p>Read the <a href="https://example.com/guide">guide</a> first.</p>"#).unwrap();
        assert!(text.contains("guide"));
        assert!(!text.contains("https://example.com/guide"));
    }

    #[test]
    fn test_long_lines_wrapped() {
        let sentence = "word ".repeat(100);
        let text = html_to_text(&format!("<p>{}</p>", sentence)).unwrap();
        assert!(text.lines().count() > 1);
        assert!(text.lines().all(|line| line.chars().count() <= WRAP_WIDTH));
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let text = html_to_text("<div>\n\n<p>  Body  </p>\n\n</div>").unwrap();
        assert_eq!(text, "Body");
    }
}
