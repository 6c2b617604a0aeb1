//! レシートファイルの収集と読み込み
//!
//! - `.txt`: 電子レシートのジャーナル本文
//! - `.json`: `[{"name": ..., "amount": ...}]` 形式の明細一覧

use crate::error::{FridgeBuddyError, Result};
use fridge_buddy_common::{parse_journal, ScannedItem};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptFormat {
    Journal,
    Json,
}

impl ReceiptFormat {
    /// 拡張子から形式を判定
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "txt" => Some(ReceiptFormat::Journal),
            "json" => Some(ReceiptFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReceiptFile {
    pub path: PathBuf,
    pub file_name: String,
    pub format: ReceiptFormat,
}

/// 入力パス（ファイルまたはフォルダ）からレシートファイルを集める
///
/// フォルダは直下のみ走査し、ファイル名順に並べる。
pub fn collect_receipts(inputs: &[PathBuf]) -> Result<Vec<ReceiptFile>> {
    let mut receipts = Vec::new();

    for input in inputs {
        if input.is_dir() {
            receipts.extend(scan_folder(input)?);
        } else if input.is_file() {
            let format = ReceiptFormat::from_path(input).unwrap_or(ReceiptFormat::Journal);
            receipts.push(receipt_file(input, format));
        } else {
            return Err(FridgeBuddyError::FileNotFound(input.display().to_string()));
        }
    }

    Ok(receipts)
}

/// フォルダ直下のレシートファイルを列挙
pub fn scan_folder(folder: &Path) -> Result<Vec<ReceiptFile>> {
    if !folder.exists() {
        return Err(FridgeBuddyError::FolderNotFound(folder.display().to_string()));
    }

    let mut receipts: Vec<ReceiptFile> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| {
            let format = ReceiptFormat::from_path(e.path())?;
            Some(receipt_file(e.path(), format))
        })
        .collect();

    receipts.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(receipts)
}

/// レシートファイルから明細を読み込む
pub fn load_items(receipt: &ReceiptFile) -> Result<Vec<ScannedItem>> {
    let content = std::fs::read_to_string(&receipt.path)?;
    let items = match receipt.format {
        ReceiptFormat::Journal => parse_journal(&content).map_err(|source| FridgeBuddyError::Receipt {
            path: receipt.path.display().to_string(),
            source,
        })?,
        ReceiptFormat::Json => serde_json::from_str(&content)?,
    };

    tracing::debug!(file = %receipt.file_name, items = items.len(), "receipt loaded");
    Ok(items)
}

fn receipt_file(path: &Path, format: ReceiptFormat) -> ReceiptFile {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    ReceiptFile {
        path: path.to_path_buf(),
        file_name,
        format,
    }
}
