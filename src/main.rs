use leptos::*;

mod components;
mod constants;
mod error;
mod models;
mod utils;
mod views;

use components::Sidebar;
use models::TaskType;
use utils::config::AppConfig;
use utils::log_trace::{log_error, log_info, log_info_with_data};
use views::Workspace;

// ============================================
// アプリ全体の状態
// ============================================

#[derive(Clone, Copy)]
pub struct AppContext {
    pub config: StoredValue<AppConfig>,
    pub task_type: ReadSignal<TaskType>,
}

#[component]
fn App(config: AppConfig) -> impl IntoView {
    let (task_type, set_task_type) = create_signal(TaskType::default());
    let (sidebar_open, set_sidebar_open) = create_signal(false);

    provide_context(AppContext {
        config: store_value(config),
        task_type,
    });

    let on_task_change = Callback::new(move |task: TaskType| {
        log_info("ui-action", &format!("タスク切替: {}", task.label()));
        set_task_type.set(task);
    });

    view! {
        <div class="app">
            <Sidebar
                current_task=task_type
                on_task_change=on_task_change
                is_open=sidebar_open
                set_is_open=set_sidebar_open
            />
            <Workspace />
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    // APIキーがなければ起動しない
    let config = match AppConfig::from_build_env() {
        Ok(config) => config,
        Err(e) => {
            log_error("config", &e.to_string());
            panic!("{}", e);
        }
    };

    log_info_with_data(
        "config",
        "設定を読み込みました",
        serde_json::json!({
            "model": config.model,
            "api_base": config.api_base,
            "api_key": config.masked_key(),
        }),
    );

    mount_to_body(move || view! { <App config=config /> });
}
