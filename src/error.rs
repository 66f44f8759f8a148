use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidthSyncError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("タグパターンのコンパイルに失敗: {0}")]
    Pattern(#[from] regex::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WidthSyncError>;
