//! レシート読み込みテスト

use fridge_buddy::scanner::{self, ReceiptFormat};
use fridge_buddy_common::ScannedItem;
use tempfile::tempdir;

const JOURNAL: &str = "========================================\n\
Назив   Цена         Кол.         Укупно\n\
MLEKO 2.8% 1L (Е)\n\
         129,99          2        259,98\n\
JABUKA AJDARED (Е)\n\
          89,99      0,538         48,41\n\
----------------------------------------\n\
Укупан износ:                     308,39\n";

#[test]
fn test_scan_folder_sorted_and_filtered() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("b.txt"), JOURNAL).unwrap();
    std::fs::write(dir.path().join("a.json"), "[]").unwrap();
    std::fs::write(dir.path().join("photo.jpg"), "").unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    std::fs::write(dir.path().join("nested").join("c.txt"), JOURNAL).unwrap();

    let receipts = scanner::scan_folder(dir.path()).unwrap();
    let names: Vec<&str> = receipts.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(names, vec!["a.json", "b.txt"]);
    assert_eq!(receipts[0].format, ReceiptFormat::Json);
    assert_eq!(receipts[1].format, ReceiptFormat::Journal);
}

#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    assert!(scanner::scan_folder(dir.path()).unwrap().is_empty());
}

#[test]
fn test_load_journal() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("receipt.txt");
    std::fs::write(&path, JOURNAL).unwrap();

    let receipts = scanner::collect_receipts(&[path]).unwrap();
    let items = scanner::load_items(&receipts[0]).unwrap();
    assert_eq!(
        items,
        vec![
            ScannedItem::new("MLEKO 2.8% 1L (Е)", 2.0),
            ScannedItem::new("JABUKA AJDARED (Е)", 0.538),
        ]
    );
}

#[test]
fn test_load_json_items() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("items.json");
    std::fs::write(&path, r#"[{"name": "MLEKO 2.8%", "amount": 1.0}, {"name": "KESA", "amount": 1}]"#)
        .unwrap();

    let receipts = scanner::collect_receipts(&[path]).unwrap();
    let items = scanner::load_items(&receipts[0]).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1], ScannedItem::new("KESA", 1.0));
}

/// ファイルとフォルダを混ぜて指定できる
#[test]
fn test_collect_mixed_inputs() {
    let dir = tempdir().expect("Failed to create temp dir");
    let folder = dir.path().join("receipts");
    std::fs::create_dir(&folder).unwrap();
    std::fs::write(folder.join("1.txt"), JOURNAL).unwrap();
    std::fs::write(folder.join("2.txt"), JOURNAL).unwrap();
    let single = dir.path().join("extra.receipt");
    std::fs::write(&single, JOURNAL).unwrap();

    let receipts = scanner::collect_receipts(&[folder, single]).unwrap();
    assert_eq!(receipts.len(), 3);
    // 拡張子が不明な単独ファイルはジャーナルとして扱う
    assert_eq!(receipts[2].format, ReceiptFormat::Journal);
}
