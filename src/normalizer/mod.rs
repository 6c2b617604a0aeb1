//! テキスト正規化モジュール
//!
//! レシート明細の生テキストを照合用の形に揃える。
//!
//! ## 処理フロー
//! 1. ダイアクリティカルマークの除去（č → c など）
//! 2. `[a-zA-Z0-9 ]` 以外の文字を空白に置換
//! 3. 連続する空白を1つに統一

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref SPECIAL_CHAR_RE: Regex = Regex::new(r"[^a-zA-Z0-9 ]+").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// 生テキストを照合用に正規化する
///
/// 大文字小文字は保持する。空文字列は空文字列のまま。
///
/// # Examples
/// ```
/// use fridge_buddy::normalizer::normalize_text;
///
/// assert_eq!(normalize_text("MLEKO 2.8%"), "MLEKO 2 8 ");
/// assert_eq!(normalize_text("Čokolada  (Е)"), "Cokolada ");
/// ```
pub fn normalize_text(input: &str) -> String {
    let folded = fold_diacritics(input);
    let sanitized = SPECIAL_CHAR_RE.replace_all(&folded, " ");
    WHITESPACE_RE.replace_all(&sanitized, " ").into_owned()
}

/// カタログの照合名を正規化する（小文字化・前後空白除去）
pub fn normalize_name(name: &str) -> String {
    normalize_text(name).trim().to_lowercase()
}

/// ダイアクリティカルマークを除去して基本ラテン文字に寄せる
///
/// NFD分解で結合文字を落とす。分解できない字（đ, ł, ø など）は個別に置換。
pub fn fold_diacritics(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.nfd().filter(|c| !is_combining_mark(*c)) {
        match c {
            'đ' => out.push('d'),
            'Đ' => out.push('D'),
            'ł' => out.push('l'),
            'Ł' => out.push('L'),
            'ø' => out.push('o'),
            'Ø' => out.push('O'),
            'ħ' => out.push('h'),
            'Ħ' => out.push('H'),
            'ß' => out.push_str("ss"),
            _ => out.push(c),
        }
    }
    out
}

/// 小文字化した単語列に分割する（空の単語は含めない）
pub fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(|w| w.to_lowercase()).collect()
}
