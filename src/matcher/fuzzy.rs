//! n-gram あいまい照合
//!
//! 完全一致が見つからなかった明細について、テキストの連続する n 単語と
//! 同じ単語数のカタログ照合名を編集距離で比較する。

use super::types::{Match, MatchKind};
use super::MatchStrategy;
use crate::normalizer::words;
use fridge_buddy_common::Catalog;

/// 採用する正規化編集距離の上限（この値未満のみ採用）
pub const DEFAULT_THRESHOLD: f32 = 0.2;

/// n-gram と編集距離による照合
#[derive(Debug, Clone, Copy)]
pub struct NgramFuzzyStrategy {
    threshold: f32,
}

impl Default for NgramFuzzyStrategy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl NgramFuzzyStrategy {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// 距離が閾値未満か判定（閾値ちょうどは不採用）
    pub fn accepts(&self, distance: f32) -> bool {
        distance < self.threshold
    }
}

impl MatchStrategy for NgramFuzzyStrategy {
    fn kind(&self) -> MatchKind {
        MatchKind::Fuzzy
    }

    fn find_match(&self, catalog: &Catalog, text: &str) -> Option<Match> {
        let text_words = words(text);
        let max_n = catalog.max_words();
        if text_words.is_empty() || max_n == 0 {
            return None;
        }

        // ngrams_by_len[n - 1] = n単語の n-gram
        let ngrams_by_len: Vec<Vec<String>> = (1..=max_n).map(|n| ngrams(&text_words, n)).collect();

        let mut best: Option<(&str, f32)> = None;
        for name in catalog.names() {
            let n = name.split_whitespace().count();
            if n == 0 || n > max_n {
                continue;
            }

            for gram in &ngrams_by_len[n - 1] {
                let distance = normalized_distance(gram, name);
                if self.accepts(distance) && best.map_or(true, |(_, d)| distance < d) {
                    best = Some((name, distance));
                }
            }
        }

        best.map(|(name, distance)| Match {
            name: name.to_string(),
            distance,
            kind: MatchKind::Fuzzy,
        })
    }
}

/// 連続する n 単語を空白で連結した列を返す
///
/// 単語数が n 未満なら空。
///
/// # Panics
/// `n` が0の場合
pub fn ngrams<S: AsRef<str>>(text_words: &[S], n: usize) -> Vec<String> {
    assert!(n > 0, "n must be a positive integer");
    if text_words.len() < n {
        return Vec::new();
    }

    text_words
        .windows(n)
        .map(|window| {
            window
                .iter()
                .map(|w| w.as_ref())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// 照合名の文字数で割った編集距離
pub fn normalized_distance(candidate: &str, reference: &str) -> f32 {
    let reference_len = reference.chars().count();
    if reference_len == 0 {
        return f32::INFINITY;
    }
    levenshtein(candidate, reference) as f32 / reference_len as f32
}

/// レーベンシュタイン距離を計算（文字単位）
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    let mut dp = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        dp[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let insertion = dp[i][j - 1] + 1;
            let deletion = dp[i - 1][j] + 1;
            let substitution = dp[i - 1][j - 1] + usize::from(a_chars[i - 1] != b_chars[j - 1]);
            dp[i][j] = insertion.min(deletion).min(substitution);
        }
    }

    dp[a_len][b_len]
}
