//! Known retailer domains per affiliate network.
//!
//! The registry is an ordered rule table evaluated first-match-wins. The same
//! table drives both the per-URL classification and the whole-text backup
//! sweeps, so the two passes cannot disagree about which network owns a domain.
//! Adding a platform is a one-line change to [`PLATFORMS`].

use crate::domain::entities::{Network, PlatformCounts, RewriteKind};
use regex::Regex;

/// Characters that terminate a URL inside message text.
pub const URL_TAIL: &str = r"[^\s\]})>]*";

/// Host of the marketplace's own link shortener.
pub const AMAZON_SHORT_DOMAIN: &str = "amzn.to";

/// Alias used for synthesized links of platforms without a dedicated one.
pub const GENERIC_ALIAS: &str = "short";

/// One registered retailer domain and how its links are rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformRule {
    pub domain: &'static str,
    pub platform: &'static str,
    pub alias: &'static str,
    pub network: Network,
    pub kind: RewriteKind,
}

const fn rule(
    domain: &'static str,
    platform: &'static str,
    alias: &'static str,
    network: Network,
    kind: RewriteKind,
) -> PlatformRule {
    PlatformRule {
        domain,
        platform,
        alias,
        network,
        kind,
    }
}

use Network::{Amazon, EarnKaro, EarnPe};
use RewriteKind::{CanonicalRewrite, DeepLinkAppend, ShortenedRedirect};

#[rustfmt::skip]
pub static PLATFORMS: &[PlatformRule] = &[
    rule("amazon.in",          "amazon",    "amazon",    Amazon,   CanonicalRewrite),
    rule("amazon.com",         "amazon",    "amazon",    Amazon,   CanonicalRewrite),
    rule("amazon.co.uk",       "amazon",    "amazon",    Amazon,   CanonicalRewrite),
    rule("amazon.de",          "amazon",    "amazon",    Amazon,   CanonicalRewrite),
    rule("amazon.fr",          "amazon",    "amazon",    Amazon,   CanonicalRewrite),
    rule("amazon.it",          "amazon",    "amazon",    Amazon,   CanonicalRewrite),
    rule("amazon.es",          "amazon",    "amazon",    Amazon,   CanonicalRewrite),
    rule("amazon.co.jp",       "amazon",    "amazon",    Amazon,   CanonicalRewrite),
    rule("amazon.ca",          "amazon",    "amazon",    Amazon,   CanonicalRewrite),
    rule("amazon.com.au",      "amazon",    "amazon",    Amazon,   CanonicalRewrite),
    rule("amazon.com.mx",      "amazon",    "amazon",    Amazon,   CanonicalRewrite),
    rule("amazon.com.br",      "amazon",    "amazon",    Amazon,   CanonicalRewrite),
    rule("amazon.ae",          "amazon",    "amazon",    Amazon,   CanonicalRewrite),
    rule("amazon.sa",          "amazon",    "amazon",    Amazon,   CanonicalRewrite),
    rule("amazon.sg",          "amazon",    "amazon",    Amazon,   CanonicalRewrite),
    rule("amazon.com.tr",      "amazon",    "amazon",    Amazon,   CanonicalRewrite),
    rule(AMAZON_SHORT_DOMAIN,  "amazon",    "amazon",    Amazon,   CanonicalRewrite),

    rule("flipkart.com",       "flipkart",  "fkrt",      EarnPe,   DeepLinkAppend),
    rule("fkrt.to",            "flipkart",  "fkrt",      EarnPe,   DeepLinkAppend),
    rule("myntra.com",         "myntra",    "myntra",    EarnPe,   DeepLinkAppend),
    rule("mynt.ro",            "myntra",    "myntra",    EarnPe,   DeepLinkAppend),
    rule("ajio.com",           "ajio",      "ajio",      EarnPe,   DeepLinkAppend),
    rule("tatacliq.com",       "tatacliq",  "tatacliq",  EarnPe,   DeepLinkAppend),
    rule("boat-lifestyle.com", "boat",      "boat",      EarnPe,   ShortenedRedirect),
    rule("nykaa.com",          "nykaa",     "nykaa",     EarnPe,   ShortenedRedirect),
    rule("croma.com",          "croma",     "croma",     EarnPe,   ShortenedRedirect),
    rule("samsung.com",        "samsung",   "samsung",   EarnPe,   ShortenedRedirect),
    rule("oneplus.in",         "oneplus",   "oneplus",   EarnPe,   ShortenedRedirect),
    rule("gonoise.com",        "gonoise",   "gonoise",   EarnPe,   ShortenedRedirect),
    rule("firstcry.com",       "firstcry",  "firstcry",  EarnPe,   ShortenedRedirect),
    rule("realme.com",         "realme",    "realme",    EarnPe,   ShortenedRedirect),
    rule("mi.com",             "mi",        "mi",        EarnPe,   ShortenedRedirect),
    rule("vivo.com",           "vivo",      "vivo",      EarnPe,   ShortenedRedirect),
    rule("tinyurl.com",        "tinyurl",   GENERIC_ALIAS, EarnPe, ShortenedRedirect),
    rule("bitl.li",            "bitli",     GENERIC_ALIAS, EarnPe, ShortenedRedirect),

    rule("meesho.com",         "meesho",    "meesho",    EarnKaro, DeepLinkAppend),
    rule("paytmmall.com",      "paytmmall", "paytm",     EarnKaro, DeepLinkAppend),
    rule("bigbasket.com",      "bigbasket", "bigbasket", EarnKaro, DeepLinkAppend),
    rule("swiggy.com",         "swiggy",    "swiggy",    EarnKaro, DeepLinkAppend),
    rule("zomato.com",         "zomato",    "zomato",    EarnKaro, DeepLinkAppend),
    rule("makemytrip.com",     "makemytrip","makemytrip",EarnKaro, ShortenedRedirect),
    rule("goibibo.com",        "goibibo",   "goibibo",   EarnKaro, ShortenedRedirect),
    rule("lenskart.com",       "lenskart",  "lenskart",  EarnKaro, ShortenedRedirect),
    rule("bewakoof.com",       "bewakoof",  "bewakoof",  EarnKaro, ShortenedRedirect),
    rule("pharmeasy.in",       "pharmeasy", "pharmeasy", EarnKaro, ShortenedRedirect),
    rule("1mg.com",            "1mg",       "1mg",       EarnKaro, ShortenedRedirect),
    rule("netmeds.com",        "netmeds",   "netmeds",   EarnKaro, ShortenedRedirect),
    rule("shopclues.com",      "shopclues", "shopclues", EarnKaro, ShortenedRedirect),
];

/// Fallback rules for domains that only matched a keyword, or that a sweep
/// matched without a table entry.
static FALLBACKS: [PlatformRule; 3] = [
    rule("", "amazon", "amazon", Amazon, CanonicalRewrite),
    rule("", "earnpe", GENERIC_ALIAS, EarnPe, ShortenedRedirect),
    rule("", "earnkaro", GENERIC_ALIAS, EarnKaro, ShortenedRedirect),
];

/// Domain fragments that suggest an EarnPe-style retailer.
pub const EARNPE_KEYWORDS: &[&str] = &[
    "fashion", "clothing", "beauty", "cosmetics", "apparel", "purplle", "snapdeal", "limeroad",
    "koovs",
];

/// Domain fragments that suggest an EarnKaro-style retailer.
pub const EARNKARO_KEYWORDS: &[&str] = &[
    "food", "grocery", "delivery", "transport", "travel", "dunzo", "grofers", "blinkit", "zepto",
    "rapido",
];

/// Result of looking up a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The domain is in the rule table.
    Registered(&'static PlatformRule),
    /// The domain is not registered but contains a network keyword.
    Likely(Network),
    /// Neither registered nor recognised by keyword.
    Unknown,
}

impl Classification {
    pub fn network(&self) -> Option<Network> {
        match self {
            Classification::Registered(rule) => Some(rule.network),
            Classification::Likely(network) => Some(*network),
            Classification::Unknown => None,
        }
    }
}

/// A registered rule with its URL matcher.
#[derive(Debug)]
struct RuleMatcher {
    rule: &'static PlatformRule,
    pattern: Regex,
}

/// Static rule table with compiled matchers.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug)]
pub struct PlatformRegistry {
    matchers: Vec<RuleMatcher>,
    sweeps: [Regex; 3],
}

impl PlatformRegistry {
    /// Compiles the rule table.
    pub fn new() -> Self {
        let matchers = PLATFORMS
            .iter()
            .map(|rule| RuleMatcher {
                rule,
                pattern: compile(&format!(
                    r"(?i)^https?://{}{}/",
                    SUBDOMAINS,
                    regex::escape(rule.domain)
                )),
            })
            .collect();

        let sweeps = Network::ALL.map(|network| {
            let domains = PLATFORMS
                .iter()
                .filter(|rule| rule.network == network)
                .map(|rule| regex::escape(rule.domain))
                .collect::<Vec<_>>()
                .join("|");
            compile(&format!(
                r"(?i)https?://{}(?:{})/{}",
                SUBDOMAINS, domains, URL_TAIL
            ))
        });

        Self { matchers, sweeps }
    }

    /// Classifies a lower-cased host name.
    ///
    /// Registered domains match exactly or as a parent of the host
    /// (`dl.flipkart.com` matches `flipkart.com`). Keyword lists are only
    /// consulted when no rule matches. An empty host is always unknown.
    pub fn classify(&self, domain: &str) -> Classification {
        let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();
        if domain.is_empty() {
            return Classification::Unknown;
        }

        if let Some(rule) = PLATFORMS.iter().find(|rule| host_matches(&domain, rule.domain)) {
            return Classification::Registered(rule);
        }

        if EARNPE_KEYWORDS.iter().any(|k| domain.contains(k)) {
            return Classification::Likely(Network::EarnPe);
        }
        if EARNKARO_KEYWORDS.iter().any(|k| domain.contains(k)) {
            return Classification::Likely(Network::EarnKaro);
        }

        Classification::Unknown
    }

    /// Finds the rule whose matcher accepts `url`, limited to `network`.
    pub fn match_url(&self, network: Network, url: &str) -> Option<&'static PlatformRule> {
        self.matchers
            .iter()
            .filter(|m| m.rule.network == network)
            .find(|m| m.pattern.is_match(url))
            .map(|m| m.rule)
    }

    /// Whole-text sweep pattern for `network`.
    pub fn sweep_pattern(&self, network: Network) -> &Regex {
        &self.sweeps[slot(network)]
    }

    /// Generic rule used when only the network is known.
    pub fn fallback(&self, network: Network) -> &'static PlatformRule {
        &FALLBACKS[slot(network)]
    }

    /// Resolves a classification to the rule that should rewrite the URL.
    pub fn rule_for(&self, classification: Classification) -> Option<&'static PlatformRule> {
        match classification {
            Classification::Registered(rule) => Some(rule),
            Classification::Likely(network) => Some(self.fallback(network)),
            Classification::Unknown => None,
        }
    }

    /// Registered rules, in table order.
    pub fn rules(&self) -> impl Iterator<Item = &'static PlatformRule> {
        PLATFORMS.iter()
    }

    /// Number of registered domains per aggregator network.
    pub fn platform_counts(&self) -> PlatformCounts {
        let count = |network| PLATFORMS.iter().filter(|r| r.network == network).count();
        PlatformCounts {
            earnpe: count(Network::EarnPe),
            earnkaro: count(Network::EarnKaro),
        }
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Optional subdomain labels in front of a registered domain.
const SUBDOMAINS: &str = r"(?:[a-z0-9-]+\.)*";

/// Position of `network` in [`Network::ALL`].
fn slot(network: Network) -> usize {
    match network {
        Network::Amazon => 0,
        Network::EarnPe => 1,
        Network::EarnKaro => 2,
    }
}

/// Returns true if `host` is `domain` or one of its subdomains.
pub fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

fn compile(pattern: &str) -> Regex {
    // Patterns are built from the static table and escaped domains.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid platform pattern {pattern}: {e}"))
}
