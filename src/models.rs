//! データ構造体モジュール

use serde::{Deserialize, Serialize};

use crate::constants::{INITIAL_JSON, INITIAL_PHP_FUNCTIONS, INITIAL_PHP_INDEX};
use crate::error::{AppError, AppResult};

// ============================================
// タスク種別
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskType {
    #[default]
    AddFaq,
    UpdateSchema,
    UpdateBlog,
}

impl TaskType {
    pub fn all() -> [TaskType; 3] {
        [TaskType::AddFaq, TaskType::UpdateSchema, TaskType::UpdateBlog]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskType::AddFaq => "Add FAQ",
            TaskType::UpdateSchema => "Update Schema",
            TaskType::UpdateBlog => "Update Blog Content",
        }
    }

    /// サイドバーに表示する説明
    pub fn description(&self) -> &'static str {
        match self {
            TaskType::AddFaq => "Add FAQ entries and render them on the page",
            TaskType::UpdateSchema => "Change the data structure or JSON-LD markup",
            TaskType::UpdateBlog => "Update blog posts and their listing",
        }
    }
}

// ============================================
// 入力ファイル
// ============================================

#[derive(Debug, Clone, PartialEq)]
pub struct SourceFiles {
    pub json_content: String,
    pub functions_content: String,
    pub index_content: String,
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            json_content: INITIAL_JSON.to_string(),
            functions_content: INITIAL_PHP_FUNCTIONS.to_string(),
            index_content: INITIAL_PHP_INDEX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub task_type: TaskType,
    pub instructions: String,
    pub files: SourceFiles,
}

/// 送信前チェック。空白だけの指示はネットワークに出さずに弾く
pub fn validate_request(
    task_type: TaskType,
    instructions: &str,
    files: SourceFiles,
) -> AppResult<GenerationRequest> {
    if instructions.trim().is_empty() {
        return Err(AppError::EmptyInstructions);
    }
    Ok(GenerationRequest {
        task_type,
        instructions: instructions.to_string(),
        files,
    })
}

// ============================================
// 生成結果
// ============================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCode {
    pub updated_json: String,
    pub updated_functions: String,
    pub updated_index: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationPhase {
    #[default]
    Idle,
    Processing,
    Success,
    Error,
}

/// 生成処理のUI状態
///
/// 失敗しても前回の結果は残す
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationState {
    pub phase: GenerationPhase,
    pub error: Option<String>,
    pub results: Option<GeneratedCode>,
}

impl GenerationState {
    pub fn is_processing(&self) -> bool {
        self.phase == GenerationPhase::Processing
    }

    pub fn begin(&mut self) {
        self.phase = GenerationPhase::Processing;
        self.error = None;
    }

    pub fn complete(&mut self, code: GeneratedCode) {
        self.phase = GenerationPhase::Success;
        self.error = None;
        self.results = Some(code);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = GenerationPhase::Error;
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_code() -> GeneratedCode {
        GeneratedCode {
            updated_json: "{\"faq\": [1]}".to_string(),
            updated_functions: "<?php".to_string(),
            updated_index: "<html>".to_string(),
        }
    }

    #[test]
    fn test_task_labels() {
        let labels: Vec<_> = TaskType::all().iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["Add FAQ", "Update Schema", "Update Blog Content"]);
        assert_eq!(TaskType::default(), TaskType::AddFaq);
    }

    #[test]
    fn test_validate_rejects_blank_instructions() {
        for input in ["", "   ", "\n\t "] {
            let result = validate_request(TaskType::AddFaq, input, SourceFiles::default());
            assert_eq!(result, Err(AppError::EmptyInstructions));
        }
    }

    #[test]
    fn test_validate_keeps_instructions_verbatim() {
        let req = validate_request(TaskType::UpdateBlog, "  add a post \n", SourceFiles::default()).unwrap();
        assert_eq!(req.instructions, "  add a post \n");
        assert_eq!(req.task_type, TaskType::UpdateBlog);
        assert_eq!(req.files, SourceFiles::default());
    }

    #[test]
    fn test_generated_code_field_names() {
        let json = r#"{"updatedJson":"a","updatedFunctions":"b","updatedIndex":"c"}"#;
        let code: GeneratedCode = serde_json::from_str(json).unwrap();
        assert_eq!(code.updated_json, "a");
        assert_eq!(code.updated_functions, "b");
        assert_eq!(code.updated_index, "c");
    }

    #[test]
    fn test_state_transitions() {
        let mut state = GenerationState::default();
        assert_eq!(state.phase, GenerationPhase::Idle);

        state.begin();
        assert!(state.is_processing());

        state.complete(sample_code());
        assert_eq!(state.phase, GenerationPhase::Success);
        assert_eq!(state.results, Some(sample_code()));
    }

    #[test]
    fn test_failure_keeps_previous_results() {
        let mut state = GenerationState::default();
        state.begin();
        state.complete(sample_code());

        state.begin();
        assert_eq!(state.results, Some(sample_code()));
        state.fail("network down");

        assert_eq!(state.phase, GenerationPhase::Error);
        assert_eq!(state.error.as_deref(), Some("network down"));
        assert_eq!(state.results, Some(sample_code()));
        assert!(!state.is_processing());
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let mut state = GenerationState::default();
        state.fail(AppError::EmptyInstructions.to_string());
        state.begin();
        assert_eq!(state.error, None);
    }
}
