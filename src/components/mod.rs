//! UIコンポーネントモジュール

pub mod code_block;
pub mod file_editor;
pub mod sidebar;

pub use code_block::CodeBlock;
pub use file_editor::FileEditor;
pub use sidebar::Sidebar;
