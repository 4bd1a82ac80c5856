use super::PageContent;

pub(super) fn extract_txt(bytes: &[u8]) -> Vec<PageContent> {
    // Try UTF-8 first, fall back to lossy conversion
    let text = String::from_utf8(bytes.to_vec())
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned());

    vec![PageContent {
        page_number: 1,
        text: text.replace('\r', "").trim().to_string(),
    }]
}
