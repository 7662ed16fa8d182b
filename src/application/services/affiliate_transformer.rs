//! Per-network affiliate rewrites.
//!
//! Each rewrite takes one URL and the rule it matched, and either produces a
//! tagged URL (recording a mapping) or leaves the URL alone. Three shapes of
//! rewrite exist, selected by [`RewriteKind`]:
//!
//! - **Deep-link append**: `affid=<id>` is added to the retailer URL
//! - **Shortened redirect**: the URL is replaced by `https://<alias>.io/<code>`,
//!   resolved by the network's redirect service from the stored mapping
//! - **Canonical rewrite**: marketplace links are stripped of tracking
//!   parameters, pointed at the right storefront and tagged
//!
//! Links that already carry the network's marker are never rewritten again,
//! which keeps a second pass over converted text a no-op.

use std::sync::LazyLock;

use tracing::{debug, error, warn};

use crate::application::services::MappingStore;
use crate::domain::entities::{AffiliateIds, Network, NewConversionRecord, Region, RewriteKind};
use crate::domain::registry::{AMAZON_SHORT_DOMAIN, PLATFORMS, PlatformRule, host_matches};
use crate::error::AppError;
use crate::utils::domain_extractor::extract_domain;
use crate::utils::query_params::{append_query, has_param, strip_tracking_params};

/// Attribution suffix required on marketplace links besides the tag itself.
const AMAZON_LINK_PARAMS: &str = "ref_=as_li_ss_tl&linkCode=ogi";

const DOMESTIC_STOREFRONT: &str = "amazon.in";
const GLOBAL_STOREFRONT: &str = "amazon.com";

/// Marketplace domains that name a country other than the domestic one.
static INTERNATIONAL_STOREFRONTS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PLATFORMS
        .iter()
        .filter(|rule| rule.network == Network::Amazon)
        .map(|rule| rule.domain)
        .filter(|domain| *domain != DOMESTIC_STOREFRONT && *domain != AMAZON_SHORT_DOMAIN)
        .collect()
});

/// Why a URL was left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No identifier is configured for the network.
    MissingId,
    /// The URL already carries the network's affiliate marker.
    AlreadyTagged,
}

/// Outcome of transforming one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transformation {
    Converted { url: String, network: Network },
    Unchanged(SkipReason),
}

/// Rewrites URLs for the configured affiliate identifiers.
#[derive(Debug, Clone)]
pub struct AffiliateTransformer {
    ids: AffiliateIds,
}

impl AffiliateTransformer {
    pub fn new(ids: AffiliateIds) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &AffiliateIds {
        &self.ids
    }

    /// Rewrites `url` according to `rule`.
    ///
    /// A successful conversion stores exactly one record in `store`. Skips
    /// store nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Transform`] when no short code can be allocated
    /// and [`AppError::Verification`] when a rewritten marketplace link lost
    /// its tag. Nothing is stored in either case.
    pub fn transform(
        &self,
        url: &str,
        rule: &PlatformRule,
        store: &mut MappingStore,
    ) -> Result<Transformation, AppError> {
        let Some(id) = self.ids.id_for(rule.network) else {
            warn!(
                url = %url,
                network = %rule.network,
                "No affiliate id configured, leaving link unchanged"
            );
            return Ok(Transformation::Unchanged(SkipReason::MissingId));
        };

        if is_tagged(rule.network, url, id) {
            debug!(url = %url, network = %rule.network, "Link already tagged");
            return Ok(Transformation::Unchanged(SkipReason::AlreadyTagged));
        }

        let converted = match rule.kind {
            RewriteKind::DeepLinkAppend => deep_link(url, rule, id, store)?,
            RewriteKind::ShortenedRedirect => shortened_redirect(url, rule, id, store)?,
            RewriteKind::CanonicalRewrite => canonical(url, rule, id, store)?,
        };

        debug!(
            original = %url,
            converted = %converted,
            platform = rule.platform,
            kind = %rule.kind,
            "Link converted"
        );

        Ok(Transformation::Converted {
            url: converted,
            network: rule.network,
        })
    }
}

fn is_tagged(network: Network, url: &str, id: &str) -> bool {
    match network {
        Network::Amazon => has_param(url, "tag", id),
        Network::EarnPe | Network::EarnKaro => {
            let lower = url.to_ascii_lowercase();
            lower.contains("affid=") || lower.contains("earnpe") || lower.contains("earnkaro")
        }
    }
}

fn new_record(
    url: &str,
    affiliate_url: String,
    rule: &PlatformRule,
    id: &str,
    region: Option<Region>,
) -> NewConversionRecord {
    NewConversionRecord {
        original_url: url.to_string(),
        affiliate_url: Some(affiliate_url),
        affiliate_id: id.to_string(),
        platform: rule.platform.to_string(),
        network: rule.network,
        region,
    }
}

fn deep_link(
    url: &str,
    rule: &PlatformRule,
    id: &str,
    store: &mut MappingStore,
) -> Result<String, AppError> {
    let affiliate_url = append_query(url, &format!("affid={id}"));
    store.record(new_record(url, affiliate_url.clone(), rule, id, None))?;
    Ok(affiliate_url)
}

fn shortened_redirect(
    url: &str,
    rule: &PlatformRule,
    id: &str,
    store: &mut MappingStore,
) -> Result<String, AppError> {
    let code = store.allocate_code(url)?;
    let affiliate_url = format!("https://{}.io/{}", rule.alias, code);
    store.insert(code, new_record(url, affiliate_url.clone(), rule, id, None));
    Ok(affiliate_url)
}

fn canonical(
    url: &str,
    rule: &PlatformRule,
    id: &str,
    store: &mut MappingStore,
) -> Result<String, AppError> {
    let attribution = format!("tag={id}&{AMAZON_LINK_PARAMS}");
    let host = extract_domain(url);

    // Short links are tagged as-is; expanding them needs a network round trip.
    if host_matches(&host, AMAZON_SHORT_DOMAIN) {
        let affiliate_url = append_query(url, &attribution);
        verify_tag(url, &affiliate_url, id)?;
        store.record(new_record(
            url,
            affiliate_url.clone(),
            rule,
            id,
            Some(Region::Domestic),
        ))?;
        return Ok(affiliate_url);
    }

    let region = detect_region(url);
    let cleaned = strip_tracking_params(url);
    let retargeted = match region {
        Region::Domestic => replace_host_suffix(&cleaned, GLOBAL_STOREFRONT, DOMESTIC_STOREFRONT),
        Region::International => {
            replace_host_suffix(&cleaned, DOMESTIC_STOREFRONT, GLOBAL_STOREFRONT)
        }
    };
    let base = retargeted.unwrap_or(cleaned);

    let affiliate_url = append_query(&base, &attribution);
    verify_tag(url, &affiliate_url, id)?;

    store.record(new_record(
        url,
        affiliate_url.clone(),
        rule,
        id,
        Some(region),
    ))?;
    Ok(affiliate_url)
}

/// Picks the storefront a marketplace link should point at.
///
/// Any mention of the domestic storefront wins; otherwise an explicit foreign
/// storefront means international. Links naming no storefront default to
/// domestic.
fn detect_region(url: &str) -> Region {
    let lower = url.to_ascii_lowercase();

    if lower.contains(DOMESTIC_STOREFRONT) {
        Region::Domestic
    } else if INTERNATIONAL_STOREFRONTS.iter().any(|d| lower.contains(d)) {
        Region::International
    } else {
        Region::Domestic
    }
}

/// Swaps the `from` registrable domain of the URL's host for `to`.
///
/// Returns `None` when the host is not `from` or a subdomain of it, so
/// `amazon.com.au` is never mistaken for `amazon.com`.
fn replace_host_suffix(url: &str, from: &str, to: &str) -> Option<String> {
    let authority_start = url.find("://")? + 3;
    let authority_len = url[authority_start..]
        .find(['/', '?', '#'])
        .unwrap_or(url.len() - authority_start);
    let host_end = authority_start
        + url[authority_start..authority_start + authority_len]
            .find(':')
            .unwrap_or(authority_len);

    let host = &url[authority_start..host_end];
    if !host_matches(&host.to_ascii_lowercase(), from) {
        return None;
    }

    let suffix_start = host_end - from.len();
    Some(format!("{}{}{}", &url[..suffix_start], to, &url[host_end..]))
}

fn verify_tag(original: &str, converted: &str, id: &str) -> Result<(), AppError> {
    if has_param(converted, "tag", id) {
        return Ok(());
    }

    error!(url = %original, "Tag missing from rewritten link, keeping original");
    Err(AppError::verification(
        original,
        format!("rewritten link does not carry tag={id}"),
    ))
}
