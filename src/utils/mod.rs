//! ユーティリティモジュール

pub mod config;
pub mod gemini;
pub mod log_trace;
pub mod prompt;
