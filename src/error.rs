//! エラー型モジュール
//!
//! Display の文言はそのまま画面のエラーバナーに表示される

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("GEMINI_API_KEY is missing")]
    MissingApiKey,

    #[error("Please provide instructions before generating code.")]
    EmptyInstructions,

    /// fetch 失敗など、レスポンスを受け取る前のエラー
    #[error("{0}")]
    Request(String),

    #[error("Gemini API error ({status}): {message}")]
    Http { status: u16, message: String },

    #[error("The request was blocked by Gemini: {0}")]
    Blocked(String),

    #[error("Gemini returned an empty response")]
    EmptyResponse,

    #[error("Failed to read the generated code: {0}")]
    Decode(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// メッセージが取れなかったときに表示する文言
pub const GENERATE_FALLBACK_MESSAGE: &str =
    "Failed to generate code. Please check your API key and try again.";

/// 空のメッセージはバナーが空になるので既定文言に置き換える
pub fn message_or_fallback(message: Option<String>) -> String {
    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERATE_FALLBACK_MESSAGE.to_string())
}
