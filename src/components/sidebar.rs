//! サイドバー（タスク種別の選択）

use leptos::*;

use crate::models::TaskType;
use crate::utils::log_trace::{clear_logs, download_logs, log_info};

#[component]
pub fn Sidebar(
    current_task: ReadSignal<TaskType>,
    on_task_change: Callback<TaskType>,
    is_open: ReadSignal<bool>,
    set_is_open: WriteSignal<bool>,
) -> impl IntoView {
    view! {
        // モバイル用の開閉ボタン
        <button
            class="sidebar-toggle"
            on:click=move |_| set_is_open.update(|open| *open = !*open)
        >
            {move || if is_open.get() { "×" } else { "☰" }}
        </button>

        // 開いている間は背景クリックで閉じる
        {move || is_open.get().then(|| view! {
            <div class="sidebar-backdrop" on:click=move |_| set_is_open.set(false)></div>
        })}

        <aside class=move || format!("sidebar {}", if is_open.get() { "open" } else { "" })>
            <div class="sidebar-header">
                <h1>"Site Update Maker"</h1>
                <p class="sidebar-subtitle">"Choose a task"</p>
            </div>

            <nav class="task-list">
                {TaskType::all().into_iter().map(move |task| view! {
                    <button
                        class=move || format!("task-item {}", if current_task.get() == task { "active" } else { "" })
                        on:click=move |_| {
                            on_task_change.call(task);
                            set_is_open.set(false);
                        }
                    >
                        <span class="task-label">{task.label()}</span>
                        <span class="task-description">{task.description()}</span>
                    </button>
                }).collect_view()}
            </nav>

            <div class="sidebar-footer">
                <button class="log-btn" on:click=move |_| download_logs()>"Download logs"</button>
                <button class="log-btn" on:click=move |_| {
                    clear_logs();
                    log_info("ui-action", "ログをクリアしました");
                }>"Clear logs"</button>
            </div>
        </aside>
    }
}
