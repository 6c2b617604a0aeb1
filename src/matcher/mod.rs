//! レシート明細の食品照合モジュール
//!
//! ## 処理フロー
//! 1. 明細名を正規化（`normalizer::normalize_text`）
//! 2. 照合方式を順に試す（完全一致 → n-gram あいまい照合）
//! 3. 一致したカタログ食品から在庫アイテムを作る
//!
//! どの方式でも一致しない明細（レジ袋・値引き行など）は結果に含めない。

pub mod exact;
pub mod fuzzy;
pub mod types;

pub use exact::ExactPhraseStrategy;
pub use fuzzy::{NgramFuzzyStrategy, DEFAULT_THRESHOLD};
pub use types::{Match, MatchKind};

use crate::config::CatalogPaths;
use crate::error::{FridgeBuddyError, Result};
use crate::normalizer::{normalize_name, normalize_text};
use chrono::{DateTime, Utc};
use fridge_buddy_common::{Catalog, FridgeItem, ScannedItem, Unit};
use tracing::{debug, info};

/// レシート数量の単位
///
/// レシートの数量は商品の種類に関係なく kg として扱う。
pub const SCANNED_UNIT: Unit = Unit::Kg;

/// カタログファイルを読み込む
pub fn load_catalog(paths: &CatalogPaths) -> Result<Catalog> {
    let files = std::iter::once(&paths.items).chain(paths.names.as_ref());
    for path in files {
        if !path.exists() {
            return Err(FridgeBuddyError::FileNotFound(path.display().to_string()));
        }
    }

    let catalog = Catalog::from_files(&paths.items, paths.names.as_deref())
        .map_err(|e| FridgeBuddyError::InvalidCatalog(e.to_string()))?;

    if catalog.name_count() == 0 {
        return Err(FridgeBuddyError::InvalidCatalog(format!(
            "照合名が1件もありません: {}",
            paths.items.display()
        )));
    }

    info!(items = catalog.len(), names = catalog.name_count(), "catalog loaded");
    Ok(catalog)
}

/// 照合方式の共通インターフェース
///
/// `text` は正規化済みの明細名。
pub trait MatchStrategy: Send + Sync {
    fn kind(&self) -> MatchKind;

    fn find_match(&self, catalog: &Catalog, text: &str) -> Option<Match>;
}

/// 照合結果の集計
#[derive(Debug, Clone, Default)]
pub struct IntakeReport {
    /// 在庫アイテム（入力順）
    pub items: Vec<FridgeItem>,
    /// 一致しなかった明細（入力順）
    pub unmatched: Vec<ScannedItem>,
}

impl IntakeReport {
    pub fn total(&self) -> usize {
        self.items.len() + self.unmatched.len()
    }
}

/// カタログと照合方式の列を持つ照合器
pub struct GroceryMatcher {
    catalog: Catalog,
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl GroceryMatcher {
    /// 標準の照合方式（完全一致 → あいまい照合、閾値0.2）で作る
    pub fn new(catalog: Catalog) -> Self {
        Self::with_threshold(catalog, DEFAULT_THRESHOLD)
    }

    /// あいまい照合の閾値を指定して作る
    pub fn with_threshold(catalog: Catalog, threshold: f32) -> Self {
        Self::with_strategies(
            catalog,
            vec![
                Box::new(ExactPhraseStrategy),
                Box::new(NgramFuzzyStrategy::new(threshold)),
            ],
        )
    }

    /// 照合方式の列を指定して作る
    ///
    /// カタログの照合名は明細と同じ規則で正規化し直す。
    pub fn with_strategies(catalog: Catalog, strategies: Vec<Box<dyn MatchStrategy>>) -> Self {
        Self {
            catalog: catalog.with_normalized_names(normalize_name),
            strategies,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 明細名に一致する照合名を探す
    pub fn find_match(&self, raw_name: &str) -> Option<Match> {
        let text = normalize_text(raw_name);
        let found = self
            .strategies
            .iter()
            .find_map(|strategy| strategy.find_match(&self.catalog, &text));

        match &found {
            Some(m) => debug!(
                raw = raw_name,
                matched = %m.name,
                kind = %m.kind,
                distance = m.distance,
                "best match"
            ),
            None => debug!(raw = raw_name, "no match"),
        }

        found
    }

    /// 1明細を在庫アイテムに変換する（一致しなければ `None`）
    pub fn match_item(&self, item: &ScannedItem, now: DateTime<Utc>) -> Option<FridgeItem> {
        let found = self.find_match(&item.name)?;
        let entry = self.catalog.lookup(&found.name)?;
        Some(FridgeItem::from_entry(entry, item.amount, SCANNED_UNIT, now))
    }

    /// 明細一覧を照合し、一致した分と一致しなかった分に分ける
    pub fn intake(&self, items: &[ScannedItem], now: DateTime<Utc>) -> IntakeReport {
        let mut report = IntakeReport::default();

        for item in items {
            match self.match_item(item, now) {
                Some(fridge_item) => report.items.push(fridge_item),
                None => report.unmatched.push(item.clone()),
            }
        }

        info!(
            total = report.total(),
            matched = report.items.len(),
            unmatched = report.unmatched.len(),
            "receipt items matched"
        );
        report
    }

    /// 明細一覧を在庫アイテムに変換する（一致しない明細は除く）
    pub fn to_fridge_items(&self, items: &[ScannedItem], now: DateTime<Utc>) -> Vec<FridgeItem> {
        self.intake(items, now).items
    }
}
