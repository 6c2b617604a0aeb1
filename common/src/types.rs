//! 在庫登録の型定義
//!
//! CLIと将来のフロントエンドで共有される型:
//! - ScannedItem: レシート1行分の入力（品名と数量）
//! - FridgeItem: マッチング結果から作る在庫アイテム

use crate::catalog::CatalogEntry;
use crate::unit::Unit;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// レシートから読み取った1明細
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScannedItem {
    pub name: String,
    pub amount: f64,
}

impl ScannedItem {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// 冷蔵庫の在庫アイテム
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FridgeItem {
    pub id: Uuid,
    pub grocery_item_id: Uuid,
    pub expiration_date: DateTime<Utc>,
    pub amount: f64,
    pub unit: Unit,

    // カタログから展開した表示用の値
    pub name: String,
    pub image_name: String,
    pub grocery_type: String,
}

impl FridgeItem {
    /// カタログエントリから在庫アイテムを作る
    ///
    /// 賞味期限は `now` にエントリの標準保存期間を足したもの
    /// （表現できない日時になる場合は最大日時で止める）。
    /// 数量は小数第2位で丸める。
    pub fn from_entry(entry: &CatalogEntry, amount: f64, unit: Unit, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            grocery_item_id: entry.id,
            expiration_date: expiration_from(now, entry.default_exp_interval),
            amount: round_amount(amount),
            unit,
            name: entry.name.clone(),
            image_name: entry.image_name.clone(),
            grocery_type: entry.grocery_type.clone(),
        }
    }

    /// 別の食品に付け替える（数量・単位・期限はそのまま）
    pub fn reassign(&mut self, entry: &CatalogEntry) {
        self.grocery_item_id = entry.id;
        self.name = entry.name.clone();
        self.image_name = entry.image_name.clone();
        self.grocery_type = entry.grocery_type.clone();
    }
}

fn expiration_from(now: DateTime<Utc>, interval_secs: i64) -> DateTime<Utc> {
    Duration::try_seconds(interval_secs)
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(if interval_secs < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

/// 数量を小数第2位に丸める
pub fn round_amount(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
