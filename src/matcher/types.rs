/// 照合方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// 単語境界での完全一致
    ExactPhrase,
    /// n-gram + 編集距離
    Fuzzy,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchKind::ExactPhrase => write!(f, "exact"),
            MatchKind::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// 照合結果
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// 一致したカタログ照合名
    pub name: String,
    /// 正規化編集距離（完全一致は0）
    pub distance: f32,
    pub kind: MatchKind,
}
