use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("プロジェクトIDが設定されていません。`feedback-widget config --set-project-id YOUR_ID` で設定してください")]
    MissingProjectId,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("スクリーンショット読み込みエラー: {0}")]
    ScreenshotLoad(String),

    #[error("data URIの形式が不正: {0}")]
    InvalidDataUri(String),

    #[error("注釈エンジンエラー: {0}")]
    Engine(#[from] feedback_widget_common::Error),

    #[error("コレクタ送信エラー: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("送信エラー: {0}")]
    Submission(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FeedbackError>;
