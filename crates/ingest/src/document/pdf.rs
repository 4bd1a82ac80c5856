use super::{ExtractionError, PageContent};

pub(super) fn extract_pdf(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    // pdf-extract returns all text as one string. Form feed characters
    // (\x0C) separate pages when the producer emitted them.
    if text.contains('\x0C') {
        Ok(split_pages(&text))
    } else {
        // No page breaks found, treat as a single page.
        Ok(vec![PageContent {
            page_number: 1,
            text: normalize(&text),
        }])
    }
}

/// Split concatenated page text on form feeds, keeping 1-based numbering
/// aligned with the physical pages (blank pages stay in the sequence).
fn split_pages(text: &str) -> Vec<PageContent> {
    text.split('\x0C')
        .enumerate()
        .map(|(i, page_text)| PageContent {
            page_number: i + 1,
            text: normalize(page_text),
        })
        .collect()
}

fn normalize(page_text: &str) -> String {
    page_text.replace('\r', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_form_feed() {
        let pages = split_pages("Page one.\x0CPage two.\x0CPage three.");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[2].page_number, 3);
        assert_eq!(pages[1].text, "Page two.");
    }

    #[test]
    fn strips_carriage_returns_and_trims() {
        let pages = split_pages("  line\r\nnext\r\n  \x0Cother");
        assert_eq!(pages[0].text, "line\nnext");
        assert_eq!(pages[1].text, "other");
    }

    #[test]
    fn blank_pages_keep_their_number() {
        let pages = split_pages("one\x0C\x0Cthree");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].text, "");
        assert_eq!(pages[2].page_number, 3);
    }
}
