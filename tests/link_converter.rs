mod common;

use affiliate_linker::domain::entities::{AffiliateIds, ConversionStats, Network};
use common::{AMAZON_TAG, TestStore, all_ids};

#[tokio::test]
async fn test_amazon_link_is_cleaned_and_tagged() {
    let store = TestStore::new();
    let mut converter = store.converter(all_ids()).await;

    let report = converter
        .convert_all("https://www.amazon.in/dp/B000ABCDEF?ref=xyz&psc=1")
        .await;

    assert!(report.text.contains(&format!("tag={AMAZON_TAG}")));
    assert!(!report.text.contains("ref=xyz"));
    assert!(!report.text.contains("psc=1"));
    assert_eq!(report.delta.amazon, 1);
}

#[tokio::test]
async fn test_reconverting_output_is_noop() {
    let store = TestStore::new();
    let mut converter = store.converter(all_ids()).await;

    let first = converter
        .convert_all(
            "A https://www.amazon.in/dp/B000ABCDEF?ref=xyz&psc=1 \
             B https://www.flipkart.com/item/p/xyz \
             C https://amzn.to/abc123 \
             D https://www.bigbasket.com/pd/1",
        )
        .await;
    let mappings_after_first = converter.mappings().len();

    let second = converter.convert_all(&first.text).await;

    assert_eq!(second.text, first.text);
    assert_eq!(second.delta, ConversionStats::default());
    assert_eq!(converter.mappings().len(), mappings_after_first);
}

#[tokio::test]
async fn test_amzn_to_short_link() {
    let store = TestStore::new();
    let mut converter = store.converter(all_ids()).await;

    let report = converter.convert_all("https://amzn.to/abc123").await;

    assert_eq!(
        report.text,
        "https://amzn.to/abc123?tag=mytag-21&ref_=as_li_ss_tl&linkCode=ogi"
    );
}

#[tokio::test]
async fn test_flipkart_deep_link() {
    let store = TestStore::new();
    let mut converter = store.converter(all_ids()).await;

    let report = converter
        .convert_all("https://www.flipkart.com/item/p/xyz")
        .await;

    assert_eq!(report.text, "https://www.flipkart.com/item/p/xyz?affid=E123");
    assert_eq!(report.delta, ConversionStats::new(0, 1, 0));
}

#[tokio::test]
async fn test_missing_amazon_tag_passes_through() {
    let store = TestStore::new();
    let ids = AffiliateIds::new(None, Some("E123".to_string()), Some("K456".to_string()));
    let mut converter = store.converter(ids).await;

    let text = "Buy https://www.amazon.in/dp/B000ABCDEF?psc=1 and https://amzn.to/x1";
    let report = converter.convert_all(text).await;

    assert_eq!(report.text, text);
    assert_eq!(converter.get_stats().conversions.amazon, 0);
}

#[tokio::test]
async fn test_unknown_domain_is_untouched() {
    let store = TestStore::new();
    let mut converter = store.converter(all_ids()).await;

    let text = "Read https://docs.rs/regex and https://github.com/rust-lang/rust";
    let report = converter.convert_all(text).await;

    assert_eq!(report.text, text);
    assert_eq!(report.delta.total, 0);
    assert!(converter.mappings().is_empty());
}

#[tokio::test]
async fn test_text_outside_links_is_preserved() {
    let store = TestStore::new();
    let mut converter = store.converter(all_ids()).await;

    let text = "🔥 Loot deal!\n[https://www.myntra.com/shoes/1]\n\tPrice: ₹499 (limited)";
    let report = converter.convert_all(text).await;

    assert_eq!(
        report.text,
        "🔥 Loot deal!\n[https://www.myntra.com/shoes/1?affid=E123]\n\tPrice: ₹499 (limited)"
    );
}

#[tokio::test]
async fn test_total_is_sum_of_networks() {
    let store = TestStore::new();
    let mut converter = store.converter(all_ids()).await;

    converter
        .convert_all(
            "https://www.amazon.de/dp/X https://www.nykaa.com/p/1 \
             https://www.goibibo.com/hotels https://www.zomato.com/r/2",
        )
        .await;

    let stats = converter.get_stats().conversions;
    assert_eq!(stats, ConversionStats::new(1, 1, 2));
    assert_eq!(stats.total, stats.amazon + stats.earnpe + stats.earnkaro);
}

#[tokio::test]
async fn test_every_conversion_is_persisted() {
    let store = TestStore::new();
    let mut converter = store.converter(all_ids()).await;

    let report = converter
        .convert_all("https://www.lenskart.com/frames/1 https://amzn.to/abc123")
        .await;

    let json = store.read_json();
    let entries = json.as_object().unwrap();
    assert_eq!(entries.len(), 2);

    let lenskart = entries
        .values()
        .find(|v| v["platform"] == "lenskart")
        .unwrap();
    assert_eq!(lenskart["affiliateNetwork"], "earnkaro");
    assert_eq!(lenskart["affiliateId"], "K456");
    assert_eq!(lenskart["originalUrl"], "https://www.lenskart.com/frames/1");

    let short_link = report.text.split(' ').next().unwrap();
    let code = short_link.strip_prefix("https://lenskart.io/").unwrap();
    assert_eq!(entries[code]["affiliateUrl"], short_link);

    let amazon = entries.values().find(|v| v["platform"] == "amazon").unwrap();
    assert_eq!(amazon["region"], "india");
}

#[tokio::test]
async fn test_mappings_survive_restart() {
    let store = TestStore::new();

    let codes: Vec<String> = {
        let mut converter = store.converter(all_ids()).await;
        converter
            .convert_all("https://www.croma.com/tv/1 https://www.1mg.com/drugs/2")
            .await;
        converter
            .mappings()
            .records()
            .map(|r| r.short_code.clone())
            .collect()
    };
    assert_eq!(codes.len(), 2);

    let converter = store.converter(all_ids()).await;

    assert_eq!(converter.mappings().len(), 2);
    for code in &codes {
        assert!(converter.mappings().get(code).is_some(), "{code}");
    }
    let counts = converter.mappings().count_by_network();
    assert_eq!(counts.get(&Network::EarnPe), Some(&1));
    assert_eq!(counts.get(&Network::EarnKaro), Some(&1));
}

#[tokio::test]
async fn test_stats_report_shape() {
    let store = TestStore::new();
    let converter = store.converter(all_ids()).await;

    let report = serde_json::to_value(converter.get_stats()).unwrap();

    assert_eq!(report["total"], 0);
    assert_eq!(report["platforms"]["earnpe"], 18);
    assert_eq!(report["platforms"]["earnkaro"], 13);
}

#[tokio::test]
async fn test_ampersand_in_marketplace_path_survives() {
    let store = TestStore::new();
    let mut converter = store.converter(all_ids()).await;

    let report = converter
        .convert_all(
            "https://www.amazon.in/Tom&Jerry-DVD/dp/B0X and \
             https://www.amazon.in/Tom&Jerry-DVD/dp/B0X?psc=1&color=red",
        )
        .await;

    assert_eq!(
        report.text,
        "https://www.amazon.in/Tom&Jerry-DVD/dp/B0X?tag=mytag-21&ref_=as_li_ss_tl&linkCode=ogi and \
         https://www.amazon.in/Tom&Jerry-DVD/dp/B0X?color=red&tag=mytag-21&ref_=as_li_ss_tl&linkCode=ogi"
    );
    assert_eq!(report.delta.amazon, 2);
}
