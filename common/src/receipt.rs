//! 電子レシート（ジャーナル）パーサー
//!
//! QRコードから取得したレシート本文（プレーンテキスト）から、
//! 明細行を品名と数量の組として取り出す。
//!
//! ジャーナルの明細部は次の形をしている:
//! ```text
//! ========================================
//! Назив   Цена         Кол.         Укупно
//! MLEKO 2.8% 1L (Е)
//!          129,99          1        129,99
//! ----------------------------------------
//! ```

use crate::error::{Error, Result};
use crate::types::ScannedItem;

/// 区切り線の最小長
const SEPARATOR_LEN: usize = 40;

/// ジャーナル本文から明細を取り出す
///
/// # Arguments
/// * `journal` - レシート本文
///
/// # Returns
/// * `Ok(Vec<ScannedItem>)` - 明細（レシート記載順）
/// * `Err` - 明細部の区切り線が見つからない場合
///
/// # Examples
/// ```
/// use fridge_buddy_common::receipt::parse_journal;
///
/// let journal = "========================================\n\
///                Назив   Цена         Кол.         Укупно\n\
///                JABUKA AJDARED (Е)\n\
///                      89,99      0,538         48,41\n\
///                ----------------------------------------\n";
/// let items = parse_journal(journal).unwrap();
/// assert_eq!(items[0].name, "JABUKA AJDARED (Е)");
/// assert_eq!(items[0].amount, 0.538);
/// ```
pub fn parse_journal(journal: &str) -> Result<Vec<ScannedItem>> {
    let mut lines = journal.lines();

    // 明細部の開始（=の区切り線）まで読み飛ばす
    if !lines.by_ref().any(|line| is_separator(line, '=')) {
        return Err(Error::Parse("item section start ('=' separator) not found".into()));
    }

    let mut section = Vec::new();
    let mut closed = false;
    for line in lines {
        if is_separator(line, '-') {
            closed = true;
            break;
        }
        let line = line.trim();
        if !line.is_empty() {
            section.push(line);
        }
    }

    if !closed {
        return Err(Error::Parse("item section end ('-' separator) not found".into()));
    }

    // 先頭は列見出し
    let rows = section.get(1..).unwrap_or_default();

    let mut items = Vec::with_capacity(rows.len() / 2);
    for pair in rows.chunks_exact(2) {
        let name = collapse_whitespace(pair[0]);
        match parse_quantity(pair[1]) {
            Some(amount) => items.push(ScannedItem { name, amount }),
            None => tracing::debug!(line = pair[1], "receipt row without quantity skipped"),
        }
    }

    Ok(items)
}

/// 価格行から数量（2列目）を取り出す
///
/// 小数点はカンマ表記も受け付ける。
pub fn parse_quantity(line: &str) -> Option<f64> {
    line.split_whitespace()
        .nth(1)
        .and_then(|token| token.replace(',', ".").parse::<f64>().ok())
}

fn is_separator(line: &str, ch: char) -> bool {
    let line = line.trim();
    line.chars().count() >= SEPARATOR_LEN && line.chars().all(|c| c == ch)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
