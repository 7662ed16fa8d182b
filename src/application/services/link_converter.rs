//! Whole-message conversion.

use std::ops::Range;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::services::{
    AffiliateTransformer, DomainClassifier, MappingStore, StatsCounter, Transformation,
};
use crate::domain::entities::{AffiliateIds, ConversionStats, Network, StatsReport};
use crate::domain::registry::{Classification, PlatformRegistry, PlatformRule};
use crate::domain::repositories::MappingRepository;
use crate::utils::url_scanner::{replace_spans, scan_urls};

/// Result of one [`LinkConverter::convert_all`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// Input text with converted URLs substituted in place.
    pub text: String,
    /// Conversions made during this call.
    pub delta: ConversionStats,
}

/// Converts every supported link in a message.
///
/// Owns the mapping store and counters for its lifetime; `convert_all`
/// takes `&mut self`, so batches never interleave.
///
/// # Pipeline
///
/// 1. Scan the text for URLs, classify each by host and rewrite it
/// 2. Sweep the partially converted text once per network with the
///    registry's combined patterns, catching links embedded where the
///    scanner saw a different host
/// 3. Save the mapping store
///
/// Both passes substitute by byte span, so identical URLs elsewhere in the
/// text are never touched by accident.
pub struct LinkConverter<R: MappingRepository> {
    repository: Arc<R>,
    registry: Arc<PlatformRegistry>,
    classifier: DomainClassifier,
    transformer: AffiliateTransformer,
    store: MappingStore,
    stats: StatsCounter,
}

impl<R: MappingRepository> LinkConverter<R> {
    /// Creates a converter and loads existing mappings from `repository`.
    pub async fn initialize(ids: AffiliateIds, repository: Arc<R>) -> Self {
        let registry = Arc::new(PlatformRegistry::new());
        let store = MappingStore::load(repository.as_ref()).await;

        for network in Network::ALL {
            if ids.id_for(network).is_none() {
                info!(network = %network, "No affiliate id, conversions disabled");
            }
        }
        info!(mappings = store.len(), "Link converter ready");

        Self {
            repository,
            classifier: DomainClassifier::new(Arc::clone(&registry)),
            registry,
            transformer: AffiliateTransformer::new(ids),
            store,
            stats: StatsCounter::new(),
        }
    }

    /// Converts every supported link in `text` and saves the mappings.
    ///
    /// Text outside converted URLs is returned unchanged. A failure on one
    /// URL leaves that URL as it was and does not stop the batch; a failed
    /// save is logged and retried with the next batch.
    pub async fn convert_all(&mut self, text: &str) -> ConversionReport {
        if text.is_empty() {
            return ConversionReport {
                text: String::new(),
                delta: ConversionStats::default(),
            };
        }

        let before = self.stats.snapshot();

        let mut converted = self.convert_scanned(text);
        for network in Network::ALL {
            converted = self.sweep(network, &converted);
        }

        if let Err(e) = self.store.save(self.repository.as_ref()).await {
            error!(error = %e, "Failed to save mappings");
        }

        let delta = self.stats.snapshot().since(&before);
        info!(
            amazon = delta.amazon,
            earnpe = delta.earnpe,
            earnkaro = delta.earnkaro,
            total = delta.total,
            "Message converted"
        );

        ConversionReport {
            text: converted,
            delta,
        }
    }

    /// Counters since start or the last reset, plus registry size.
    pub fn get_stats(&self) -> StatsReport {
        StatsReport {
            conversions: self.stats.snapshot(),
            platforms: self.registry.platform_counts(),
        }
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
        info!("Conversion stats reset");
    }

    pub fn mappings(&self) -> &MappingStore {
        &self.store
    }

    /// First pass: every URL the scanner finds, classified by host.
    fn convert_scanned(&mut self, text: &str) -> String {
        let mut replacements = Vec::new();

        for found in scan_urls(text) {
            let classification = self.classifier.classify_url(found.url);
            let Some(rule) = self.registry.rule_for(classification) else {
                warn!(url = %found.url, "No affiliate program for link, leaving unchanged");
                continue;
            };
            if let Classification::Likely(network) = classification {
                debug!(url = %found.url, network = %network, "Matched by keyword");
            }

            if let Some(url) = self.apply(found.url, rule) {
                replacements.push((found.span, url));
            }
        }

        replace_spans(text, &replacements)
    }

    /// Backup pass for one network over the whole text.
    fn sweep(&mut self, network: Network, text: &str) -> String {
        if self.transformer.ids().id_for(network).is_none() {
            return text.to_string();
        }

        let registry = Arc::clone(&self.registry);
        let matches: Vec<(Range<usize>, &str)> = registry
            .sweep_pattern(network)
            .find_iter(text)
            .map(|m| (m.range(), m.as_str()))
            .collect();

        let mut replacements = Vec::new();
        for (span, url) in matches {
            let rule = registry
                .match_url(network, url)
                .unwrap_or_else(|| registry.fallback(network));

            if let Some(converted) = self.apply(url, rule) {
                debug!(url = %url, network = %network, "Converted by sweep");
                replacements.push((span, converted));
            }
        }

        replace_spans(text, &replacements)
    }

    /// Runs the transformer on one URL, counting a conversion.
    ///
    /// Returns the new URL, or `None` when the URL stays as it is.
    fn apply(&mut self, url: &str, rule: &PlatformRule) -> Option<String> {
        match self.transformer.transform(url, rule, &mut self.store) {
            Ok(Transformation::Converted { url, network }) => {
                self.stats.record(network);
                Some(url)
            }
            Ok(Transformation::Unchanged(_)) => None,
            Err(e) => {
                error!(url = %url, error = %e, "Failed to convert link");
                None
            }
        }
    }
}
