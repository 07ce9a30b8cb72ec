// Favicon lookup: URL -> icon URL on the configured favicon service.
// The service is only ever referenced, never fetched here; a missing icon
// simply renders as no icon.

use crate::modules::navigation::host_of;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaviconResolver {
    service: String,
}

impl FaviconResolver {
    pub fn new(service: impl Into<String>) -> Self {
        let service = service.into();
        Self {
            service: service.trim_end_matches('/').to_string(),
        }
    }

    /// `<favicon-service>/?domain=<hostname>`, or `None` for host-less URLs
    /// such as `about:blank`.
    pub fn resolve(&self, url: &str) -> Option<String> {
        let host = host_of(url)?;
        Some(format!("{}/?domain={}", self.service, urlencoding::encode(&host)))
    }
}
