// Title reconciliation helpers for finished loads.

use crate::error::BrowserError;
use crate::modules::navigation::host_of;

/// Extracts `<title>` from a relay document. Case-insensitive, entity
/// decoding limited to the common five. `None` when absent or blank.
pub fn document_title(html: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<title")?;
    let start = open + lower[open..].find('>')? + 1;
    let end = start + lower[start..].find("</title")?;

    let text = decode_entities(&html[start..end]);
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

fn decode_entities(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Label used when the document title cannot be read.
pub fn hostname_fallback(url: &str) -> String {
    host_of(url).unwrap_or_else(|| url.to_string())
}

/// New title for a session at `url` given the probe result, or `None` to
/// keep the current one. Unreadable titles fall back to the hostname.
pub fn reconcile(url: &str, probe: Result<String, BrowserError>) -> Option<String> {
    match probe {
        Ok(title) => {
            let title = title.trim();
            if title.is_empty() {
                None
            } else {
                Some(title.to_string())
            }
        }
        Err(e) => {
            log::debug!("[Title] {} for {}, using hostname", e, url);
            Some(hostname_fallback(url))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("<html><head><title>Hello</title></head></html>", Some("Hello"))]
    #[case("<TITLE lang=\"en\">  Mixed\n  Case </TITLE>", Some("Mixed Case"))]
    #[case("<title>Fish &amp; Chips &lt;3</title>", Some("Fish & Chips <3"))]
    #[case("<title>   </title>", None)]
    #[case("<title>unterminated", None)]
    #[case("<html><body>no title</body></html>", None)]
    fn test_document_title(#[case] html: &str, #[case] expected: Option<&str>) {
        assert_eq!(document_title(html).as_deref(), expected);
    }

    #[test]
    fn test_reconcile() {
        let url = "https://news.a.test/story/1";
        assert_eq!(reconcile(url, Ok("Story".into())).as_deref(), Some("Story"));
        assert_eq!(reconcile(url, Ok("  ".into())), None);
        assert_eq!(
            reconcile(url, Err(BrowserError::TitleUnreadable("cross-origin".into()))).as_deref(),
            Some("news.a.test")
        );
    }

    #[test]
    fn test_hostname_fallback_without_host() {
        assert_eq!(hostname_fallback("about:blank"), "about:blank");
    }
}
