//! Resume Analyzer - Frontend Rust/Leptos Application
//!
//! A WebAssembly widget for uploading a resume to the analyzer API and
//! keeping the parsed result in browser local storage.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent (parsed data, analyzed count, last file name)  │
//! │  ├── Hero (title, description)                              │
//! │  ├── UploadForm (validation, drag & drop, upload)           │
//! │  └── ResultPanel (stored analysis)                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Endpoint, limits and storage keys
//! - [`error`] - Error types
//! - [`types`] - `ResumeFile` and API response types
//! - [`validation`] - Client-side file checks
//! - [`storage`] - Local storage access
//! - [`state`] - Upload widget state machine
//! - [`components`] - UI components
//! - [`services`] - Analyzer communication

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod types;
pub mod validation;
pub mod storage;
pub mod state;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{ResumeFile, UploadResponse};

// Errors
pub use error::{StorageError, TransportError, UploadError, UploadResult};

// State
pub use state::{Analysis, UploadListener, UploadState};

// Storage
pub use storage::{KeyValueStore, LocalStorage, MemoryStore, ResultStore, SharedStore};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Mount the application on `<body>`.
///
/// Called by the trunk binary, and exported for hosts loading the cdylib.
#[wasm_bindgen]
pub fn start() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Resume Analyzer - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Resume Analyzer"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // Seed the page from whatever a previous session stored
    let results = ResultStore::new(storage::open_store());
    let (parsed_data, set_parsed_data) = create_signal(results.parsed_data());
    let (analyzed_count, set_analyzed_count) = create_signal(results.analyzed_count());
    let (last_file_name, set_last_file_name) = create_signal(results.last_file_name());

    view! {
        <div class="container">
            <Hero/>

            <UploadForm
                set_parsed_data=set_parsed_data
                set_analyzed_count=set_analyzed_count
                set_last_file_name=set_last_file_name
                results=results.clone()
            />

            <ResultPanel
                parsed_data=parsed_data
                analyzed_count=analyzed_count
                last_file_name=last_file_name
                set_parsed_data=set_parsed_data
                set_analyzed_count=set_analyzed_count
                set_last_file_name=set_last_file_name
                results=results
            />
        </div>

        <Footer/>
    }
}
