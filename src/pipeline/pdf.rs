//! PDF text extraction for `POST /parse-pdf`.
//!
//! ## Why spawn_blocking?
//!
//! Parsing a PDF and decoding its content streams is CPU-bound and can take
//! a noticeable amount of time on large uploads. Running it inside
//! `tokio::task::spawn_blocking` keeps the async worker threads free to serve
//! other requests meanwhile.
//!
//! Extraction is all-or-nothing: one unreadable page fails the whole upload.

use crate::error::SahaayError;
use lopdf::Document;
use tracing::{debug, info};

/// Every PDF file starts with these bytes.
const PDF_MAGIC: &[u8] = b"%PDF";

/// Extract the text of every page, in page order.
///
/// Each page's text is followed by a single `\n`, including the last one.
/// Only the line breaks `lopdf` leaves at the end of a page are dropped, so
/// an N-page document yields N lines when no page contains a line break of
/// its own. Leading whitespace is kept.
pub async fn extract_text(bytes: Vec<u8>) -> Result<String, SahaayError> {
    tokio::task::spawn_blocking(move || extract_text_blocking(&bytes))
        .await
        .map_err(|e| SahaayError::Internal(format!("PDF task panicked: {}", e)))?
}

/// Blocking implementation of text extraction.
pub fn extract_text_blocking(bytes: &[u8]) -> Result<String, SahaayError> {
    check_magic(bytes)?;

    let document = Document::load_mem(bytes).map_err(|e| SahaayError::CorruptPdf {
        detail: e.to_string(),
    })?;

    // `get_pages` is keyed by 1-based page number, so iteration is in order.
    let pages = document.get_pages();
    info!("PDF loaded: {} pages, {} bytes", pages.len(), bytes.len());

    let mut text = String::new();
    for &page_num in pages.keys() {
        let page_text =
            document
                .extract_text(&[page_num])
                .map_err(|e| SahaayError::CorruptPdf {
                    detail: format!("page {}: {}", page_num, e),
                })?;
        debug!("Page {}: {} chars", page_num, page_text.len());
        text.push_str(page_text.trim_end_matches(['\r', '\n']));
        text.push('\n');
    }

    Ok(text)
}

/// Reject uploads that are obviously not PDFs before handing them to the parser.
fn check_magic(bytes: &[u8]) -> Result<(), SahaayError> {
    if bytes.starts_with(PDF_MAGIC) {
        Ok(())
    } else {
        Err(SahaayError::NotAPdf {
            magic: bytes.iter().take(4).copied().collect(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/common/pdf.rs"]
pub(crate) mod test_support;

#[cfg(test)]
mod tests {
    use super::test_support::pdf_with_pages;
    use super::*;

    #[test]
    fn extracts_pages_in_order_with_trailing_newlines() {
        let pdf = pdf_with_pages(&["First page", "Second page", "Third page"]);
        let text = extract_text_blocking(&pdf).unwrap();
        assert!(text.ends_with('\n'));
        let lines: Vec<&str> = text.split_terminator('\n').collect();
        assert_eq!(lines.len(), 3, "got: {text:?}");
        assert!(lines[0].contains("First page"));
        assert!(lines[1].contains("Second page"));
        assert!(lines[2].contains("Third page"));
    }

    #[test]
    fn single_page_document() {
        let pdf = pdf_with_pages(&["Only page"]);
        let text = extract_text_blocking(&pdf).unwrap();
        assert_eq!(text.split_terminator('\n').count(), 1);
        assert!(text.contains("Only page"));
    }

    #[test]
    fn keeps_leading_whitespace_and_empty_pages() {
        let pdf = pdf_with_pages(&["", "  indented", "last"]);
        let text = extract_text_blocking(&pdf).unwrap();
        assert_eq!(text, "\n  indented\nlast\n");
    }

    #[test]
    fn rejects_non_pdf_bytes() {
        let err = extract_text_blocking(b"PK\x03\x04 zip archive").unwrap_err();
        assert!(matches!(err, SahaayError::NotAPdf { ref magic } if magic == b"PK\x03\x04"));
    }

    #[test]
    fn rejects_empty_upload() {
        assert!(matches!(
            extract_text_blocking(b""),
            Err(SahaayError::NotAPdf { .. })
        ));
    }

    #[test]
    fn rejects_corrupt_pdf() {
        let err = extract_text_blocking(b"%PDF-1.5\nthis is not really a pdf").unwrap_err();
        assert!(matches!(err, SahaayError::CorruptPdf { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn async_wrapper_matches_blocking() {
        let pdf = pdf_with_pages(&["a", "b"]);
        let expected = extract_text_blocking(&pdf).unwrap();
        assert_eq!(extract_text(pdf).await.unwrap(), expected);
    }
}
