pub mod details;
pub mod name;
pub mod price;

pub use details::*;
pub use name::*;
pub use price::*;

use html_escape::decode_html_entities;

/// Clean and normalize text by removing extra whitespace and decoding HTML entities
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed value, or `None` for blank text
pub fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_text_decodes_and_collapses() {
        assert_eq!(clean_text("  Ferrari &amp;\n  Co   "), "Ferrari & Co");
    }

    #[test]
    fn non_blank_rejects_whitespace() {
        assert_eq!(non_blank("   "), None);
        assert_eq!(non_blank(" 2019 "), Some("2019"));
    }
}
