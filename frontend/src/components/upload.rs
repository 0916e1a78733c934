//! Resume upload component with drag & drop support.
//!
//! Validates the chosen file, sends it to the analyzer and hands the
//! parsed result to the parent signals.

use leptos::*;
use serde_json::Value;
use web_sys::{Event, File, HtmlInputElement};

use crate::config::{max_size_label, ACCEPT_ATTR};
use crate::error::{TransportError, UploadResult};
use crate::services::{AnalyzerClient, HttpAnalyzer};
use crate::state::{UploadListener, UploadState};
use crate::storage::{KeyValueStore, ResultStore, SharedStore};
use crate::types::{ResumeFile, UploadResponse};

/// Parent signals written after a successful analysis.
#[derive(Clone, Copy)]
pub struct SignalListener {
    pub parsed_data: WriteSignal<Option<Value>>,
    pub analyzed_count: WriteSignal<u64>,
    pub last_file_name: Option<WriteSignal<Option<String>>>,
}

impl UploadListener for SignalListener {
    fn set_parsed_data(&self, data: Value) {
        self.parsed_data.set(Some(data));
    }

    fn set_analyzed_count(&self, count: u64) {
        self.analyzed_count.set(count);
    }

    fn set_last_file_name(&self, name: &str) {
        if let Some(setter) = self.last_file_name {
            setter.set(Some(name.to_string()));
        }
    }
}

/// Write the request outcome back into the widget state, then notify the
/// parent.
///
/// The parent callbacks run after `state` is released, so they may read it.
/// Returns `None` if the widget was disposed before the reply arrived.
pub fn settle_upload<F, S, L>(
    state: RwSignal<UploadState<F>>,
    uploaded: &F,
    outcome: Result<UploadResponse, TransportError>,
    results: &ResultStore<S>,
    listener: &L,
) -> Option<UploadResult<()>>
where
    F: ResumeFile + 'static,
    S: KeyValueStore,
    L: UploadListener + ?Sized,
{
    let result = state.try_update(|s| s.finish_upload(uploaded, outcome, results))?;
    Some(result.map(|analysis| analysis.notify(listener)))
}

#[component]
pub fn UploadForm(
    set_parsed_data: WriteSignal<Option<Value>>,
    set_analyzed_count: WriteSignal<u64>,
    /// Persisted results shared with the rest of the page
    results: ResultStore<SharedStore>,
    #[prop(optional)] set_last_file_name: Option<WriteSignal<Option<String>>>,
    /// Analyzer to talk to, the configured one by default
    #[prop(optional)]
    analyzer: Option<HttpAnalyzer>,
) -> impl IntoView {
    let state = create_rw_signal(UploadState::<File>::new());
    let file_input = create_node_ref::<html::Input>();
    let analyzer = analyzer.unwrap_or_default();
    let listener = SignalListener {
        parsed_data: set_parsed_data,
        analyzed_count: set_analyzed_count,
        last_file_name: set_last_file_name,
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let file = input.files().and_then(|files| files.get(0));
        state.update(|s| s.select(file));
    };

    let on_drag_over = move |ev: ev::DragEvent| {
        ev.prevent_default();
        state.update(|s| s.drag_over());
    };

    let on_drag_leave = move |_: ev::DragEvent| {
        state.update(|s| s.drag_leave());
    };

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        let file = ev
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .and_then(|files| files.get(0));
        state.update(|s| s.drop_file(file));
    };

    // Clicking anywhere on the drop zone opens the browser
    let open_file_browser = move |_| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let on_upload = move |_| {
        let Some(file) = state.try_update(|s| s.begin_upload()).flatten() else {
            return;
        };

        let analyzer = analyzer.clone();
        let results = results.clone();
        spawn_local(async move {
            let outcome = analyzer.upload(&file).await;
            if let Some(Err(e)) = settle_upload(state, &file, outcome, &results, &listener) {
                log::debug!("Upload of {} ended with: {}", file.file_name(), e);
            }
        });
    };

    let is_loading = move || state.with(|s| s.is_loading());
    let is_dragging = move || state.with(|s| s.is_dragging());
    let selected_name = move || state.with(|s| s.file().map(ResumeFile::file_name));
    let error = move || state.with(|s| s.error_message());

    view! {
        <div class="upload-card">
            <h2 class="upload-title">"Upload Resume"</h2>

            <div
                class="drop-zone"
                class:dragging=is_dragging
                on:click=open_file_browser
                on:dragover=on_drag_over
                on:dragleave=on_drag_leave
                on:drop=on_drop
            >
                <p class="drop-title">"Drag & drop your resume here"</p>
                <p class="drop-hint">"or click to browse"</p>
                <p class="drop-formats">
                    {format!("Accepted formats: .pdf, .docx (Max: {})", max_size_label())}
                </p>
            </div>

            <input
                type="file"
                accept=ACCEPT_ATTR
                style="display:none"
                node_ref=file_input
                on:change=on_file_change
            />

            <Show
                when=move || selected_name().is_some()
                fallback=|| view! { }
            >
                <p class="selected-file">
                    "Selected file: " {move || selected_name().unwrap_or_default()}
                </p>
            </Show>

            <Show
                when=move || error().is_some()
                fallback=|| view! { }
            >
                <p class="error-message">{move || error().unwrap_or_default()}</p>
            </Show>

            <button
                class="upload-button"
                on:click=on_upload
                disabled=is_loading
            >
                {move || if is_loading() { "Uploading..." } else { "Upload & Analyze" }}
            </button>
        </div>
    }
}
