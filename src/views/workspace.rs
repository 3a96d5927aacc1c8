//! メイン画面
//!
//! 入力ファイル3つと指示文を受け取り、Gemini で更新版を生成して表示する

use leptos::*;
use web_sys::HtmlTextAreaElement;

use crate::components::{CodeBlock, FileEditor};
use crate::constants::{
    FUNCTIONS_FILE_NAME, INDEX_FILE_NAME, INSTRUCTIONS_PLACEHOLDER, JSON_FILE_NAME,
};
use crate::models::{validate_request, GeneratedCode, GenerationState, SourceFiles};
use crate::utils::gemini::generate_updates;
use crate::utils::log_trace::{log_error, log_info, log_warn};
use crate::AppContext;

/// 結果が変わったときだけ更新される派生シグナル
///
/// 処理中フラグやエラーの変化で結果ペインを作り直さない
pub fn create_results_memo(state: ReadSignal<GenerationState>) -> Memo<Option<GeneratedCode>> {
    create_memo(move |_| state.with(|s| s.results.clone()))
}

#[component]
pub fn Workspace() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");
    let task_type = ctx.task_type;
    let config = ctx.config;

    // 入力（初期値はテンプレート）
    let initial = SourceFiles::default();
    let (json_content, set_json_content) = create_signal(initial.json_content);
    let (functions_content, set_functions_content) = create_signal(initial.functions_content);
    let (index_content, set_index_content) = create_signal(initial.index_content);
    let (instructions, set_instructions) = create_signal(String::new());

    // 処理状態
    let (state, set_state) = create_signal(GenerationState::default());
    let is_processing = move || state.with(|s| s.is_processing());
    let results = create_results_memo(state);

    let on_generate = move |_| {
        if is_processing() {
            return;
        }

        let files = SourceFiles {
            json_content: json_content.get(),
            functions_content: functions_content.get(),
            index_content: index_content.get(),
        };

        let request = match validate_request(task_type.get(), &instructions.get(), files) {
            Ok(r) => r,
            Err(e) => {
                log_warn("ui-action", &e.to_string());
                set_state.update(|s| s.fail(e.to_string()));
                return;
            }
        };

        log_info("ui-action", &format!("生成開始: {}", request.task_type.label()));
        set_state.update(|s| s.begin());

        let config = config.get_value();
        spawn_local(async move {
            match generate_updates(&config, &request).await {
                Ok(code) => {
                    set_state.update(|s| s.complete(code));
                }
                Err(e) => {
                    log_error("ui-action", &format!("生成失敗: {}", e));
                    set_state.update(|s| s.fail(e.to_string()));
                }
            }
        });
    };

    view! {
        <main class="workspace">
            <header class="workspace-header">
                <div class="header-title">
                    <h2>{move || task_type.get().label()}</h2>
                    <p class="header-hint">"Provide your files and instructions below."</p>
                </div>
                <div class="powered-badge">"⚡ Powered by Gemini"</div>
            </header>

            <div class="workspace-body">
                <section class="source-files">
                    <h3 class="section-title">"Source Files"</h3>
                    <div class="editor-grid">
                        <FileEditor label="Data File" file_name=JSON_FILE_NAME
                            content=json_content set_content=set_json_content />
                        <FileEditor label="Functions" file_name=FUNCTIONS_FILE_NAME
                            content=functions_content set_content=set_functions_content />
                        <FileEditor label="Index Page" file_name=INDEX_FILE_NAME
                            content=index_content set_content=set_index_content />
                    </div>
                </section>

                <section class="instructions">
                    <h3 class="section-title">"Instructions"</h3>
                    <textarea
                        class="instructions-input"
                        placeholder=INSTRUCTIONS_PLACEHOLDER
                        prop:value=move || instructions.get()
                        on:input=move |ev| {
                            let target: HtmlTextAreaElement = event_target(&ev);
                            set_instructions.set(target.value());
                        }
                    ></textarea>
                </section>

                <section class="action-area">
                    {move || state.with(|s| s.error.clone()).map(|e| view! {
                        <div class="status error">
                            <span class="error-icon">"!"</span>
                            {e}
                        </div>
                    })}

                    <button class="generate-btn" on:click=on_generate disabled=is_processing>
                        {move || if is_processing() {
                            view! { <span class="spinner"></span>"Processing Updates..." }.into_view()
                        } else {
                            view! { "⚡ Generate Updated Code" }.into_view()
                        }}
                    </button>
                </section>

                {move || results.get().map(|results| view! {
                    <section class="results">
                        <h3 class="results-title">
                            <span class="success-icon">"✓"</span>
                            "Generated Results"
                        </h3>
                        <div class="results-grid">
                            <CodeBlock title="Updated JSON Code" language="json" content=results.updated_json />
                            <CodeBlock title="Updated PHP Functions" language="php" content=results.updated_functions />
                            <CodeBlock title="Updated Page Code" language="php" content=results.updated_index />
                        </div>
                    </section>
                })}
            </div>
        </main>
    }
}
