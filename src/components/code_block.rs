//! 生成結果の表示（読み取り専用）

use leptos::*;
use wasm_bindgen_futures::JsFuture;

use crate::utils::log_trace::{log_error, log_info};

#[component]
pub fn CodeBlock(
    title: &'static str,
    language: &'static str,
    content: String,
) -> impl IntoView {
    let (copied, set_copied) = create_signal(false);
    let line_count = content.lines().count();
    let text = store_value(content.clone());

    let on_copy = move |_| {
        let Some(window) = web_sys::window() else { return };
        let promise = window.navigator().clipboard().write_text(&text.get_value());
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => {
                    log_info("ui-action", &format!("{} をコピーしました", title));
                    set_copied.set(true);
                    // 2秒後にリセット
                    gloo::timers::future::TimeoutFuture::new(2000).await;
                    set_copied.set(false);
                }
                Err(e) => log_error("ui-action", &format!("クリップボードへのコピー失敗: {:?}", e)),
            }
        });
    };

    view! {
        <div class="code-block">
            <div class="code-block-header">
                <span class="code-title">{title}</span>
                <span class=format!("language-badge lang-{}", language)>{language}</span>
                <span class="line-count">{line_count}" lines"</span>
                <button class="copy-btn" on:click=on_copy>
                    {move || if copied.get() { "Copied!" } else { "Copy" }}
                </button>
            </div>
            <pre class="code-block-body"><code>{content}</code></pre>
        </div>
    }
}
