//! Gemini に渡すプロンプトの組み立て

use crate::constants::{FUNCTIONS_FILE_NAME, INDEX_FILE_NAME, JSON_FILE_NAME};
use crate::models::{GenerationRequest, TaskType};

const SYSTEM_PREAMBLE: &str = "You are an expert PHP and JSON developer maintaining a small website. \
The site stores its content in data.json, loads it through helper functions in functions.php, \
and renders it in index.php.";

const OUTPUT_CONTRACT: &str = "Return a single JSON object with exactly these string properties:\n\
- \"updatedJson\": the complete updated contents of data.json\n\
- \"updatedFunctions\": the complete updated contents of functions.php\n\
- \"updatedIndex\": the complete updated contents of index.php\n\
Each value must be the full file text, not a diff or an excerpt. \
If a file needs no change, return it exactly as given. \
Do not wrap the values in Markdown code fences.";

fn task_guidance(task_type: TaskType) -> &'static str {
    match task_type {
        TaskType::AddFaq => "Add the requested FAQ entries to data.json, make sure functions.php exposes them, \
and render them on index.php as a question/answer list. Keep existing entries intact.",
        TaskType::UpdateSchema => "Update the data structure in data.json as requested, keep functions.php in sync \
with the new shape, and update any structured data (JSON-LD) or markup on index.php that depends on it.",
        TaskType::UpdateBlog => "Update the blog content stored in data.json as requested, adjust helper functions \
in functions.php if needed, and make sure index.php renders the updated posts.",
    }
}

fn fenced_file(name: &str, language: &str, content: &str) -> String {
    format!("### {}\n```{}\n{}\n```\n", name, language, content)
}

pub fn build_prompt(request: &GenerationRequest) -> String {
    let mut prompt = String::new();
    prompt.push_str(SYSTEM_PREAMBLE);
    prompt.push_str("\n\n");

    prompt.push_str(&format!("## Task: {}\n", request.task_type.label()));
    prompt.push_str(task_guidance(request.task_type));
    prompt.push_str("\n\n");

    prompt.push_str("## Instructions\n");
    prompt.push_str(&request.instructions);
    prompt.push_str("\n\n");

    prompt.push_str("## Current files\n");
    prompt.push_str(&fenced_file(JSON_FILE_NAME, "json", &request.files.json_content));
    prompt.push_str(&fenced_file(FUNCTIONS_FILE_NAME, "php", &request.files.functions_content));
    prompt.push_str(&fenced_file(INDEX_FILE_NAME, "php", &request.files.index_content));
    prompt.push('\n');

    prompt.push_str("## Output\n");
    prompt.push_str(OUTPUT_CONTRACT);
    prompt
}
