//! 完全一致照合
//!
//! 正規化済みテキストに単語境界で現れるカタログ照合名のうち、最長のものを選ぶ。

use super::types::{Match, MatchKind};
use super::MatchStrategy;
use crate::normalizer::words;
use fridge_buddy_common::Catalog;

/// 単語境界での完全一致による照合
///
/// 同じ長さの候補が複数ある場合は辞書順で先の照合名を返す。
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactPhraseStrategy;

impl MatchStrategy for ExactPhraseStrategy {
    fn kind(&self) -> MatchKind {
        MatchKind::ExactPhrase
    }

    fn find_match(&self, catalog: &Catalog, text: &str) -> Option<Match> {
        let text_words = words(text);
        if text_words.is_empty() {
            return None;
        }

        let mut longest: Option<(&str, usize)> = None;
        for name in catalog.names() {
            let len = name.chars().count();
            if longest.map_or(true, |(_, best)| len > best) && contains_phrase(&text_words, name) {
                longest = Some((name, len));
            }
        }

        longest.map(|(name, _)| Match {
            name: name.to_string(),
            distance: 0.0,
            kind: MatchKind::ExactPhrase,
        })
    }
}

/// 単語列の中に語句が連続して現れるか判定
///
/// "egg" は "eggplant" には一致しない。
pub fn contains_phrase(text_words: &[String], phrase: &str) -> bool {
    let phrase: Vec<&str> = phrase.split_whitespace().collect();
    if phrase.is_empty() || phrase.len() > text_words.len() {
        return false;
    }

    text_words
        .windows(phrase.len())
        .any(|window| window.iter().zip(&phrase).all(|(w, p)| w == p))
}
