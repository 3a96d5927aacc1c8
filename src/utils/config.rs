//! 設定読み込み
//!
//! 値は build.rs がビルド時に埋め込む環境変数から取る

use crate::error::{AppError, AppResult};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone, PartialEq)]
pub struct AppConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

// APIキーがログやパニックメッセージに出ないよう Debug は手書き
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.masked_key())
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl AppConfig {
    pub fn from_values(
        api_key: Option<&str>,
        model: Option<&str>,
        api_base: Option<&str>,
    ) -> AppResult<Self> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(AppError::MissingApiKey)?;

        let model = model
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MODEL);

        let api_base = api_base
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/');

        Ok(Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            api_base: api_base.to_string(),
        })
    }

    /// ビルド時の環境変数から読み込み
    pub fn from_build_env() -> AppResult<Self> {
        Self::from_values(
            option_env!("GEMINI_API_KEY"),
            option_env!("GEMINI_MODEL"),
            option_env!("GEMINI_API_BASE"),
        )
    }

    /// 先頭4文字以外を伏せたキー
    pub fn masked_key(&self) -> String {
        let visible: String = self.api_key.chars().take(4).collect();
        format!("{}****", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_error() {
        assert_eq!(AppConfig::from_values(None, None, None), Err(AppError::MissingApiKey));
        assert_eq!(AppConfig::from_values(Some("  "), None, None), Err(AppError::MissingApiKey));
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_values(Some("AIzaTEST"), None, Some("")).unwrap();
        assert_eq!(config.api_key, "AIzaTEST");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = AppConfig::from_values(
            Some(" key "),
            Some("gemini-2.5-pro"),
            Some("http://localhost:8080/v1beta/"),
        )
        .unwrap();
        assert_eq!(config.api_key, "key");
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.api_base, "http://localhost:8080/v1beta");
    }

    #[test]
    fn test_debug_masks_key() {
        let config = AppConfig::from_values(Some("AIzaSECRETVALUE"), None, None).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("SECRETVALUE"));
        assert!(debug.contains("AIza****"));
    }
}
