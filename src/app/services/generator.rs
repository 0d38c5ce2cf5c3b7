//! Pure rendering from a [`Page`] to a complete HTML5 document string.
//!
//! Deterministic: identical input always produces byte-identical output.
//! Block text, link hrefs and embed code pass through verbatim - the page
//! author is trusted, nothing is escaped.

use crate::app::domain::block::{BlockContent, ContentBlock};
use crate::app::domain::page::Page;

/// Stylesheet embedded into every generated document. Typography, link and
/// image styling, and the 16:9 responsive embed container.
pub const PAGE_STYLES: &str = r#"    body {
      font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
      line-height: 1.6;
      color: #333;
      max-width: 800px;
      margin: 2rem auto;
      padding: 0 1rem;
      background-color: #f9fafb;
    }
    h1, h2, h3, h4, h5, h6 { color: #111; }
    a { color: #007bff; text-decoration: none; }
    a:hover { text-decoration: underline; }
    img { border-radius: 8px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }
    hr { border: 0; height: 1px; background: #ddd; margin: 2rem 0; }
    .embed-container {
      position: relative;
      overflow: hidden;
      max-width: 100%;
      padding-bottom: 56.25%; /* 16:9 Aspect Ratio */
      height: 0;
      margin: 1rem 0;
    }
    .embed-container iframe,
    .embed-container object,
    .embed-container embed {
      position: absolute;
      top: 0;
      left: 0;
      width: 100%;
      height: 100%;
      border: 0;
      border-radius: 8px;
      box-shadow: 0 4px 6px rgba(0,0,0,0.1);
    }"#;

/// Render the HTML fragment for a single block.
///
/// A link block whose text and href are both empty contributes nothing, not
/// even an empty tag. An image with an empty src still emits the (broken)
/// `<img>` tag; that matches the editor's behavior before a file is chosen.
pub fn render_block(block: &ContentBlock) -> String {
    match block.content() {
        BlockContent::Heading { text, level } => {
            // Levels are clamped on every store write; a value outside 1-6
            // here means a store invariant was broken upstream.
            debug_assert!((1..=6).contains(level), "heading level out of range: {level}");
            format!("<h{level}>{text}</h{level}>")
        }
        BlockContent::Paragraph { text } => {
            format!("<p>{}</p>", text.replace('\n', "<br>"))
        }
        BlockContent::Link { text, href } => {
            let display = if text.is_empty() { href } else { text };
            if display.is_empty() {
                return String::new();
            }
            let href = if href.is_empty() { "#" } else { href.as_str() };
            format!(
                "<p><a href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\">{display}</a></p>"
            )
        }
        BlockContent::Image { src, alt } => {
            format!(
                "<img src=\"{src}\" alt=\"{alt}\" style=\"max-width: 100%; height: auto; margin: 1rem 0;\">"
            )
        }
        BlockContent::Embed { code } => {
            format!("<div class=\"embed-container\">{code}</div>")
        }
        BlockContent::Separator {} => "<hr>".to_string(),
    }
}

/// Render the whole page into one self-contained HTML5 document.
///
/// Fragments are emitted in sequence order, joined with newlines, and
/// wrapped in a fixed document skeleton carrying the title and
/// [`PAGE_STYLES`]. An empty block sequence still yields a valid document
/// with an empty body region.
pub fn generate_document(page: &Page) -> String {
    let body_content = page
        .blocks()
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
{styles}
  </style>
</head>
<body>
{body_content}
</body>
</html>"#,
        title = page.title(),
        styles = PAGE_STYLES,
    )
}
