//! URL to network classification.

use std::sync::Arc;

use crate::domain::registry::{Classification, PlatformRegistry};
use crate::utils::domain_extractor::extract_domain;

/// Maps URLs to affiliate networks using the platform registry.
#[derive(Debug, Clone)]
pub struct DomainClassifier {
    registry: Arc<PlatformRegistry>,
}

impl DomainClassifier {
    pub fn new(registry: Arc<PlatformRegistry>) -> Self {
        Self { registry }
    }

    /// Classifies the host of `url`.
    ///
    /// URLs without a recognisable host classify as
    /// [`Classification::Unknown`].
    pub fn classify_url(&self, url: &str) -> Classification {
        let domain = extract_domain(url);
        if domain.is_empty() {
            tracing::debug!(url = %url, "Could not extract a host");
        }
        self.registry.classify(&domain)
    }
}
