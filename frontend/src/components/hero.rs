//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Resume Analyzer"</h1>
            <p class="subtitle">
                "Upload your resume as PDF or DOCX. "
                "The analyzer extracts its content and the result stays available in this browser."
            </p>
        </div>
    }
}
