//! Panel showing the last analysis kept in local storage.

use leptos::*;
use serde_json::Value;

use crate::storage::{ResultStore, SharedStore};

#[component]
pub fn ResultPanel(
    parsed_data: ReadSignal<Option<Value>>,
    analyzed_count: ReadSignal<u64>,
    last_file_name: ReadSignal<Option<String>>,
    set_parsed_data: WriteSignal<Option<Value>>,
    set_analyzed_count: WriteSignal<u64>,
    set_last_file_name: WriteSignal<Option<String>>,
    results: ResultStore<SharedStore>,
) -> impl IntoView {
    let on_clear = move |_| {
        log::info!("🧹 Clearing stored analysis");
        if let Err(e) = results.clear() {
            log::warn!("⚠️  {}", e);
        }
        set_parsed_data.set(None);
        set_analyzed_count.set(0);
        set_last_file_name.set(None);
    };

    let pretty = move || {
        parsed_data
            .get()
            .and_then(|data| serde_json::to_string_pretty(&data).ok())
            .unwrap_or_default()
    };

    view! {
        <div class="result-panel">
            <div class="result-header">
                <span class="result-count">
                    "Resumes analyzed: " {move || analyzed_count.get()}
                </span>
                <Show
                    when=move || last_file_name.get().is_some()
                    fallback=|| view! { }
                >
                    <span class="result-file">
                        "Last file: " {move || last_file_name.get().unwrap_or_default()}
                    </span>
                </Show>
                <button class="result-clear" on:click=on_clear>
                    "Clear"
                </button>
            </div>
            <Show
                when=move || parsed_data.get().is_some()
                fallback=|| view! { <p class="result-empty">"No resume analyzed yet."</p> }
            >
                <pre class="result-json">{pretty}</pre>
            </Show>
        </div>
    }
}
