use thiserror::Error;

#[derive(Error, Debug)]
pub enum FridgeBuddyError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("カタログが設定されていません。`fridge-buddy config --set-catalog groceryItems.json` で設定してください")]
    MissingCatalog,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("カタログファイルが不正: {0}")]
    InvalidCatalog(String),

    #[error("レシートが見つかりません: {0}")]
    NoReceiptsFound(String),

    #[error("レシートの読み込みに失敗 ({path}): {source}")]
    Receipt {
        path: String,
        source: fridge_buddy_common::Error,
    },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("対話入力エラー: {0}")]
    Dialog(String),
}

impl From<dialoguer::Error> for FridgeBuddyError {
    fn from(e: dialoguer::Error) -> Self {
        FridgeBuddyError::Dialog(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FridgeBuddyError>;
