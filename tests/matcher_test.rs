//! 照合の結合テスト
//!
//! JSONカタログファイルから照合器を組み立て、レシート明細の照合を検証

use chrono::{TimeZone, Utc};
use fridge_buddy::config::CatalogPaths;
use fridge_buddy::matcher::{self, GroceryMatcher, MatchKind};
use fridge_buddy::normalizer::normalize_text;
use fridge_buddy_common::{Catalog, ScannedItem, Unit};
use tempfile::tempdir;

const ITEMS_JSON: &str = r#"{
    "00000000-0000-0000-0000-000000000001": {"name": "Apple", "defaultExpInterval": 604800, "imageName": "apple", "type": "Fruits"},
    "00000000-0000-0000-0000-000000000002": {"name": "Chicken breast", "defaultExpInterval": 172800, "imageName": "chickenBreast", "type": "Meat"},
    "00000000-0000-0000-0000-000000000003": {"name": "Milk", "defaultExpInterval": 432000, "imageName": "milk", "type": "Dairy"},
    "00000000-0000-0000-0000-000000000004": {"name": "Egg", "defaultExpInterval": 1209600, "type": "Dairy"},
    "00000000-0000-0000-0000-000000000005": {"name": "Eggplant", "defaultExpInterval": 604800, "type": "Vegetables"}
}"#;

const NAMES_JSON: &str = r#"{
    "apple": "00000000-0000-0000-0000-000000000001",
    "jabuka": "00000000-0000-0000-0000-000000000001",
    "chicken breast": "00000000-0000-0000-0000-000000000002",
    "pileći file": "00000000-0000-0000-0000-000000000002",
    "mleko": "00000000-0000-0000-0000-000000000003",
    "egg": "00000000-0000-0000-0000-000000000004",
    "eggplant": "00000000-0000-0000-0000-000000000005"
}"#;

fn matcher() -> GroceryMatcher {
    let catalog = Catalog::from_json_str(ITEMS_JSON, NAMES_JSON).expect("catalog");
    GroceryMatcher::new(catalog)
}

/// 単語境界での一致（apples は apple に一致しない）
#[test]
fn test_whole_word_exact_match() {
    let m = matcher();

    let found = m.find_match("3 apples chicken breast fillet 500g").unwrap();
    assert_eq!(found.name, "chicken breast");
    assert_eq!(found.kind, MatchKind::ExactPhrase);

    let found = m.find_match("fresh apple juice").unwrap();
    assert_eq!(found.name, "apple");
    assert_eq!(found.distance, 0.0);
}

/// 記号だらけの明細も正規化して一致
#[test]
fn test_punctuation_heavy_name() {
    let found = matcher().find_match("MLEKO 2.8%").unwrap();
    assert_eq!(found.name, "mleko");
    assert_eq!(found.distance, 0.0);
}

/// 近い名前がない明細は在庫にならない
#[test]
fn test_nonsense_is_not_matched() {
    let m = matcher();
    assert!(m.find_match("xyzzyzzy nonsense").is_none());
    assert!(m
        .match_item(&ScannedItem::new("xyzzyzzy nonsense", 1.0), Utc::now())
        .is_none());
}

/// 数量は小数2桁に丸める
#[test]
fn test_amount_rounding() {
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
    let item = matcher()
        .match_item(&ScannedItem::new("JABUKA AJDARED", 1.005), now)
        .unwrap();

    assert_eq!(item.amount, 1.0);
    assert_eq!(item.unit, Unit::Kg);
    assert_eq!(item.name, "Apple");
    assert_eq!(item.image_name, "apple");
    assert_eq!(item.expiration_date, Utc.with_ymd_and_hms(2024, 3, 17, 12, 0, 0).unwrap());
}

#[test]
fn test_egg_is_not_eggplant() {
    let m = matcher();
    assert_eq!(m.find_match("EGGPLANT 1KG").unwrap().name, "eggplant");
    assert_eq!(m.find_match("EGG L 10 KOM").unwrap().name, "egg");
}

/// ダイアクリティカルマーク付きの照合名も明細と同じ形に揃う
#[test]
fn test_diacritic_catalog_name() {
    let found = matcher().find_match("PILECI FILE (Е)").unwrap();
    assert_eq!(found.name, "pileci file");
    assert_eq!(found.kind, MatchKind::ExactPhrase);
}

#[test]
fn test_fuzzy_typo() {
    let found = matcher().find_match("CHIKEN BREAST 500G").unwrap();
    assert_eq!(found.name, "chicken breast");
    assert_eq!(found.kind, MatchKind::Fuzzy);
    assert!(found.distance > 0.0 && found.distance < 0.2);
}

/// 正規化は冪等
#[test]
fn test_normalize_idempotent() {
    for raw in ["MLEKO 2.8%", "Pileći  file (Е)", "", "  a--b  "] {
        let once = normalize_text(raw);
        assert_eq!(normalize_text(&once), once);
    }
}

/// 一致した明細は常にカタログに存在する
#[test]
fn test_match_always_in_catalog() {
    let m = matcher();
    let inputs = ["MLEKO", "APPEL", "EGGPLANTS", "KESA", "chicken brest", "foo bar baz"];
    for raw in inputs {
        if let Some(found) = m.find_match(raw) {
            assert!(m.catalog().lookup(&found.name).is_some(), "{raw}");
        }
    }
}

#[test]
fn test_intake_order() {
    let items = vec![
        ScannedItem::new("KESA", 1.0),
        ScannedItem::new("MLEKO 2.8% 1L", 2.0),
        ScannedItem::new("JABUKA", 0.538),
    ];
    let report = matcher().intake(&items, Utc::now());

    let names: Vec<&str> = report.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Milk", "Apple"]);
    assert_eq!(report.items[1].amount, 0.54);
    assert_eq!(report.unmatched.len(), 1);
}

/// 保存期間が範囲外の食品は読み込まれず、照合も止まらない
#[test]
fn test_out_of_range_interval_does_not_abort_intake() {
    let items_json = r#"{
        "00000000-0000-0000-0000-000000000001": {"name": "Salt", "defaultExpInterval": 9000000000000000, "type": "Spices"},
        "00000000-0000-0000-0000-000000000002": {"name": "Milk", "defaultExpInterval": 432000, "type": "Dairy"}
    }"#;
    let matcher = GroceryMatcher::new(Catalog::from_items_json(items_json).unwrap());

    let items = vec![ScannedItem::new("SALT 1KG", 1.0), ScannedItem::new("MILK 1L", 1.0)];
    let report = matcher.intake(&items, Utc::now());

    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].name, "Milk");
    assert_eq!(report.unmatched, vec![ScannedItem::new("SALT 1KG", 1.0)]);
}

#[test]
fn test_load_catalog_from_files() {
    let dir = tempdir().expect("Failed to create temp dir");
    let items = dir.path().join("groceryItems.json");
    let names = dir.path().join("groceryItemsSr.json");
    std::fs::write(&items, ITEMS_JSON).unwrap();
    std::fs::write(&names, NAMES_JSON).unwrap();

    let catalog = matcher::load_catalog(&CatalogPaths {
        items: items.clone(),
        names: Some(names),
    })
    .unwrap();
    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.name_count(), 7);
    assert_eq!(catalog.max_words(), 2);

    // 照合名ファイルなしでは食品名をそのまま使う
    let catalog = matcher::load_catalog(&CatalogPaths { items, names: None }).unwrap();
    assert_eq!(catalog.name_count(), 5);
    assert!(catalog.lookup("chicken breast").is_some());
}
