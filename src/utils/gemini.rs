//! Gemini API 連携
//!
//! generateContent を1回だけ呼び出し、3ファイル分の更新結果を受け取る

use serde::{Deserialize, Serialize};
use serde_json::json;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::error::{message_or_fallback, AppError, AppResult};
use crate::models::{GeneratedCode, GenerationRequest};
use crate::utils::config::AppConfig;
use crate::utils::log_trace::{log_error_with_data, log_info, log_info_with_data};
use crate::utils::prompt::build_prompt;

const CATEGORY: &str = "gemini";

// ============================================
// リクエスト型
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub role: String,
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

impl GeminiRequest {
    pub fn new(prompt: String) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        }
    }
}

/// 3ファイルすべてを必須にしたレスポンススキーマ
fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "updatedJson": { "type": "STRING" },
            "updatedFunctions": { "type": "STRING" },
            "updatedIndex": { "type": "STRING" }
        },
        "required": ["updatedJson", "updatedFunctions", "updatedIndex"]
    })
}

pub fn endpoint_url(config: &AppConfig) -> String {
    format!("{}/models/{}:generateContent", config.api_base, config.model)
}

// ============================================
// レスポンス型
// ============================================

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
}

/// エラーレスポンスから message を取り出す
pub fn error_message(value: &serde_json::Value) -> Option<String> {
    value
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(|m| m.to_string())
}

/// JS側の例外から画面に出すメッセージを取り出す
fn js_error_message(e: &JsValue) -> Option<String> {
    e.dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| e.as_string())
}

/// 詳細はログにだけ残し、画面にはメッセージ文字列を返す
fn request_error(context: &str, e: JsValue) -> AppError {
    log_error_with_data(CATEGORY, context, json!({ "detail": format!("{:?}", e) }));
    AppError::Request(message_or_fallback(js_error_message(&e)))
}

/// ```json ... ``` で囲まれていたら外す
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let body = match trimmed.find('\n') {
        Some(pos) => &trimmed[pos + 1..],
        None => return trimmed.trim_start_matches('`'),
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// generateContent のレスポンスJSONから生成結果を取り出す
pub fn parse_generate_response(value: serde_json::Value) -> AppResult<GeneratedCode> {
    let response: GenerateResponse = serde_json::from_value(value)
        .map_err(|e| AppError::Decode(format!("unexpected response shape: {}", e)))?;

    if let Some(err) = response.error {
        let message = message_or_fallback(err.message);
        return Err(match err.code {
            Some(status) => AppError::Http { status, message },
            None => AppError::Request(message),
        });
    }

    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(AppError::Blocked(reason));
    }

    let candidate = response.candidates.into_iter().next().ok_or(AppError::EmptyResponse)?;
    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(match candidate.finish_reason.as_deref() {
            Some("SAFETY") | Some("RECITATION") | Some("PROHIBITED_CONTENT") => {
                AppError::Blocked(candidate.finish_reason.unwrap_or_default())
            }
            _ => AppError::EmptyResponse,
        });
    }

    serde_json::from_str(strip_code_fence(&text)).map_err(|e| AppError::Decode(e.to_string()))
}

// ============================================
// API呼び出し
// ============================================

pub async fn generate_updates(
    config: &AppConfig,
    request: &GenerationRequest,
) -> AppResult<GeneratedCode> {
    let body = GeminiRequest::new(build_prompt(request));
    let body = serde_json::to_string(&body)
        .map_err(|e| AppError::Request(format!("Failed to build the request: {}", e)))?;

    log_info_with_data(
        CATEGORY,
        "generateContent 呼び出し",
        json!({
            "model": config.model,
            "task": request.task_type.label(),
            "prompt_bytes": body.len(),
        }),
    );

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&endpoint_url(config), &opts)
        .map_err(|e| request_error("Request作成失敗", e))?;

    let headers = request.headers();
    headers
        .set("Content-Type", "application/json")
        .map_err(|e| request_error("ヘッダー設定失敗", e))?;
    headers
        .set("x-goog-api-key", &config.api_key)
        .map_err(|e| request_error("ヘッダー設定失敗", e))?;

    let window = web_sys::window().ok_or_else(|| AppError::Request("No browser window available".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| request_error("fetch失敗", e))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| AppError::Request("Unexpected fetch result".to_string()))?;

    let status = resp.status();
    let json = match resp.json() {
        Ok(promise) => JsFuture::from(promise).await.ok(),
        Err(_) => None,
    };
    let value: Option<serde_json::Value> = json.and_then(|j| serde_wasm_bindgen::from_value(j).ok());

    if !resp.ok() {
        let message = message_or_fallback(
            value
                .as_ref()
                .and_then(error_message)
                .or_else(|| Some(resp.status_text())),
        );
        log_error_with_data(CATEGORY, "APIエラー", json!({ "status": status, "message": message }));
        return Err(AppError::Http { status, message });
    }

    let value = value.ok_or_else(|| AppError::Decode("response body is not JSON".to_string()))?;
    match parse_generate_response(value) {
        Ok(code) => {
            log_info(CATEGORY, "生成結果を受信");
            Ok(code)
        }
        Err(e) => {
            log_error_with_data(CATEGORY, "レスポンス解析失敗", json!({ "error": e.to_string() }));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GENERATE_FALLBACK_MESSAGE;

    fn text_response(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GeminiRequest::new("hello".to_string())).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["required"],
            json!(["updatedJson", "updatedFunctions", "updatedIndex"])
        );
    }

    #[test]
    fn test_endpoint_url() {
        let config = AppConfig::from_values(Some("k"), Some("gemini-2.5-flash"), None).unwrap();
        assert_eq!(
            endpoint_url(&config),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert!(!endpoint_url(&config).contains("key="));
    }

    #[test]
    fn test_parse_success() {
        let inner = r#"{"updatedJson":"{\"faq\":[]}","updatedFunctions":"<?php","updatedIndex":"<html>"}"#;
        let code = parse_generate_response(text_response(inner)).unwrap();
        assert_eq!(code.updated_json, "{\"faq\":[]}");
        assert_eq!(code.updated_functions, "<?php");
        assert_eq!(code.updated_index, "<html>");
    }

    #[test]
    fn test_parse_joins_parts_and_strips_fence() {
        let value = json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "```json\n{\"updatedJson\":\"a\"," },
                    { "text": "\"updatedFunctions\":\"b\",\"updatedIndex\":\"c\"}\n```" }
                ]}
            }]
        });
        let code = parse_generate_response(value).unwrap();
        assert_eq!(code.updated_index, "c");
    }

    #[test]
    fn test_parse_api_error() {
        let value = json!({ "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" } });
        assert_eq!(error_message(&value).as_deref(), Some("API key not valid"));
        assert_eq!(
            parse_generate_response(value),
            Err(AppError::Http { status: 400, message: "API key not valid".to_string() })
        );
    }

    #[test]
    fn test_parse_api_error_without_message_uses_fallback() {
        let value = json!({ "error": { "status": "UNAVAILABLE" } });
        let err = parse_generate_response(value).unwrap_err();
        assert_eq!(err, AppError::Request(GENERATE_FALLBACK_MESSAGE.to_string()));
        assert_eq!(err.to_string(), GENERATE_FALLBACK_MESSAGE);
    }

    #[test]
    fn test_parse_api_error_with_code_and_empty_message() {
        let value = json!({ "error": { "code": 503, "message": "" } });
        assert_eq!(
            parse_generate_response(value),
            Err(AppError::Http { status: 503, message: GENERATE_FALLBACK_MESSAGE.to_string() })
        );
    }

    #[test]
    fn test_parse_blocked_prompt() {
        let value = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert_eq!(parse_generate_response(value), Err(AppError::Blocked("SAFETY".to_string())));
    }

    #[test]
    fn test_parse_empty_candidates() {
        assert_eq!(parse_generate_response(json!({ "candidates": [] })), Err(AppError::EmptyResponse));
        assert_eq!(parse_generate_response(json!({})), Err(AppError::EmptyResponse));
    }

    #[test]
    fn test_parse_safety_finish_without_text() {
        let value = json!({ "candidates": [{ "finishReason": "SAFETY" }] });
        assert_eq!(parse_generate_response(value), Err(AppError::Blocked("SAFETY".to_string())));
    }

    #[test]
    fn test_parse_missing_field_is_decode_error() {
        let result = parse_generate_response(text_response(r#"{"updatedJson":"a"}"#));
        assert!(matches!(result, Err(AppError::Decode(_))));
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{}\n```\n"), "{}");
    }
}
