// Relay client - wraps target URLs into requests against the rewriting relay.
// Stateless: no retries, no caching. A failing relay shows up as whatever
// the embedded view renders.

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayClient {
    base: String,
}

impl RelayClient {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// `GET <relay-base>/?url=<percent-encoded target>`
    pub fn wrap(&self, url: &str) -> String {
        format!("{}/?url={}", self.base, urlencoding::encode(url))
    }

    /// True when `url` lives on the relay's own origin, i.e. the document
    /// is relay output the host may introspect.
    pub fn serves(&self, url: &Url) -> bool {
        match Url::parse(&self.base) {
            Ok(base) => base.origin() == url.origin(),
            Err(_) => false,
        }
    }
}
