//! 食品カタログモジュール
//!
//! レシート照合に使う参照カタログを管理する。
//! `groceryItems.json`（ID→食品情報）と `groceryItemsSr.json`（照合名→ID）
//! から読み込み、起動後は読み取り専用で使う。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use tracing::warn;
use uuid::Uuid;

/// 常に選択肢に含める食品種別
pub const DISHES_TYPE: &str = "Dishes";

const NO_IMAGE: &str = "noImage";

/// 標準保存期間の上限（100年、秒）
pub const MAX_EXP_INTERVAL: i64 = 100 * 365 * 24 * 60 * 60;

/// カタログの1食品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: Uuid,
    pub name: String,
    /// 標準保存期間（秒）
    pub default_exp_interval: i64,
    pub image_name: String,
    pub grocery_type: String,
}

/// `groceryItems.json` の1レコード
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGroceryItem {
    name: String,
    default_exp_interval: i64,
    #[serde(default)]
    image_name: Option<String>,
    #[serde(rename = "type")]
    grocery_type: String,
}

/// 食品カタログ全体
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// ID→食品
    entries: HashMap<Uuid, CatalogEntry>,
    /// 照合名→ID（辞書順で走査される）
    names: BTreeMap<String, Uuid>,
    /// 照合名の最大単語数
    max_words: usize,
}

impl Catalog {
    /// エントリと照合名の組から構築
    ///
    /// 空の照合名と、存在しないIDを指す照合名は読み飛ばす。
    pub fn from_entries<E, N>(entries: E, names: N) -> Self
    where
        E: IntoIterator<Item = CatalogEntry>,
        N: IntoIterator<Item = (String, Uuid)>,
    {
        let entries: HashMap<Uuid, CatalogEntry> =
            entries.into_iter().map(|e| (e.id, e)).collect();

        let mut table = BTreeMap::new();
        for (name, id) in names {
            let key = collapse_name(&name);
            if key.is_empty() {
                warn!(id = %id, "empty catalog name skipped");
                continue;
            }
            if !entries.contains_key(&id) {
                warn!(name = %key, id = %id, "catalog name points to unknown grocery item");
                continue;
            }
            table.entry(key).or_insert(id);
        }

        let max_words = table
            .keys()
            .map(|n| n.split_whitespace().count())
            .max()
            .unwrap_or(0);

        Self {
            entries,
            names: table,
            max_words,
        }
    }

    /// 食品JSONと照合名JSONの文字列から読み込み
    pub fn from_json_str(items_json: &str, names_json: &str) -> Result<Self> {
        let entries = parse_items(items_json)?;
        let raw_names: BTreeMap<String, String> = serde_json::from_str(names_json)?;

        let mut names = Vec::with_capacity(raw_names.len());
        for (name, id) in raw_names {
            match Uuid::parse_str(&id) {
                Ok(id) => names.push((name, id)),
                Err(e) => warn!(name = %name, id = %id, error = %e, "invalid grocery id in name table"),
            }
        }

        Ok(Self::from_entries(entries, names))
    }

    /// 食品JSONのみから読み込み（照合名は食品名から作る）
    pub fn from_items_json(items_json: &str) -> Result<Self> {
        let entries = parse_items(items_json)?;
        let names: Vec<(String, Uuid)> = entries
            .iter()
            .map(|e| (e.name.to_lowercase(), e.id))
            .collect();
        Ok(Self::from_entries(entries, names))
    }

    /// ファイルから読み込み
    pub fn from_files(items_path: &Path, names_path: Option<&Path>) -> Result<Self> {
        let items_json = std::fs::read_to_string(items_path)?;
        match names_path {
            Some(path) => {
                let names_json = std::fs::read_to_string(path)?;
                Self::from_json_str(&items_json, &names_json)
            }
            None => Self::from_items_json(&items_json),
        }
    }

    /// 照合名を指定の正規化関数で付け直す
    ///
    /// 正規化後に同じ名前になったものは辞書順で先の方を残す。
    pub fn with_normalized_names<F>(self, normalize: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        let names: Vec<(String, Uuid)> = self
            .names
            .iter()
            .map(|(name, id)| (normalize(name), *id))
            .collect();
        Self::from_entries(self.entries.into_values(), names)
    }

    /// 照合名から食品を引く
    pub fn lookup(&self, name: &str) -> Option<&CatalogEntry> {
        self.names.get(name).and_then(|id| self.entries.get(id))
    }

    /// IDから食品を引く
    pub fn get(&self, id: &Uuid) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    /// 表示名から食品を引く（大文字小文字は区別しない）
    pub fn find_by_display_name(&self, name: &str) -> Option<&CatalogEntry> {
        let name = name.trim().to_lowercase();
        self.entries_sorted()
            .into_iter()
            .find(|e| e.name.to_lowercase() == name)
    }

    /// 照合名一覧（辞書順）
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(|s| s.as_str())
    }

    /// 表示名順の食品一覧
    pub fn entries_sorted(&self) -> Vec<&CatalogEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        entries
    }

    /// 照合名の最大単語数
    pub fn max_words(&self) -> usize {
        self.max_words
    }

    /// 食品数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 照合名の数
    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    /// 食品種別の一覧（"Dishes" を含む、辞書順）
    pub fn grocery_types(&self) -> Vec<String> {
        let mut types: BTreeSet<String> = self
            .entries
            .values()
            .map(|e| e.grocery_type.clone())
            .filter(|t| !t.is_empty())
            .collect();
        types.insert(DISHES_TYPE.to_string());
        types.into_iter().collect()
    }
}

/// 食品JSONをパースする（不正な行は読み飛ばす）
fn parse_items(items_json: &str) -> Result<Vec<CatalogEntry>> {
    let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(items_json)?;
    if raw.is_empty() {
        return Err(Error::Catalog("grocery item list is empty".into()));
    }

    let mut entries = Vec::with_capacity(raw.len());
    for (key, value) in raw {
        let id = match Uuid::parse_str(&key) {
            Ok(id) => id,
            Err(e) => {
                warn!(id = %key, error = %e, "invalid grocery id skipped");
                continue;
            }
        };
        let item: RawGroceryItem = match serde_json::from_value(value) {
            Ok(item) => item,
            Err(e) => {
                warn!(id = %key, error = %e, "malformed grocery item skipped");
                continue;
            }
        };
        if !(0..=MAX_EXP_INTERVAL).contains(&item.default_exp_interval) {
            warn!(
                id = %key,
                interval = item.default_exp_interval,
                "grocery item with out-of-range expiration interval skipped"
            );
            continue;
        }

        entries.push(CatalogEntry {
            id,
            name: item.name,
            default_exp_interval: item.default_exp_interval,
            image_name: item.image_name.unwrap_or_else(|| NO_IMAGE.to_string()),
            grocery_type: item.grocery_type,
        });
    }

    Ok(entries)
}

/// 前後の空白を除き、連続空白を1つにして小文字化
fn collapse_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
