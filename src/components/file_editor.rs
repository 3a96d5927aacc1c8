//! 入力ファイルのエディタ

use leptos::*;
use web_sys::HtmlTextAreaElement;

#[component]
pub fn FileEditor(
    label: &'static str,
    file_name: &'static str,
    content: ReadSignal<String>,
    set_content: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div class="file-editor">
            <div class="file-editor-header">
                <span class="file-label">{label}</span>
                <span class="file-name">{file_name}</span>
            </div>
            <textarea
                class="file-editor-body"
                spellcheck="false"
                prop:value=move || content.get()
                on:input=move |ev| {
                    let target: HtmlTextAreaElement = event_target(&ev);
                    set_content.set(target.value());
                }
            ></textarea>
        </div>
    }
}
