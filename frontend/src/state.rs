//! Upload widget state.
//!
//! [`UploadState`] holds everything the widget renders from: the selected
//! file, the active error, the loading flag and the drag highlight.
//! Uploading is split around the network call so no borrow of the state
//! lives across an `.await`:
//!
//! ```text
//!   Idle ──begin_upload()──▶ Uploading ──finish_upload(outcome)──▶ Idle
//! ```
//!
//! A successful finish yields an [`Analysis`]; the parent is notified from
//! it once the state has been written back.

use serde_json::Value;

use crate::error::{TransportError, UploadError, UploadResult};
use crate::storage::{KeyValueStore, ResultStore};
use crate::types::{ResumeFile, UploadResponse};
use crate::validation::validate_file;

/// Parent-side callbacks notified after a successful analysis.
pub trait UploadListener {
    fn set_parsed_data(&self, data: Value);
    fn set_analyzed_count(&self, count: u64);
    fn set_last_file_name(&self, name: &str);
}

/// A stored analysis, ready to hand to the parent.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub data: Value,
    pub analyzed_count: u64,
    pub file_name: String,
}

impl Analysis {
    /// Push the result to the parent callbacks.
    pub fn notify<L: UploadListener + ?Sized>(self, listener: &L) {
        listener.set_parsed_data(self.data);
        listener.set_analyzed_count(self.analyzed_count);
        listener.set_last_file_name(&self.file_name);
    }
}

/// Local UI state of the upload widget.
#[derive(Clone, Debug)]
pub struct UploadState<F> {
    file: Option<F>,
    error: Option<UploadError>,
    loading: bool,
    dragging: bool,
}

impl<F> Default for UploadState<F> {
    fn default() -> Self {
        Self {
            file: None,
            error: None,
            loading: false,
            dragging: false,
        }
    }
}

impl<F: ResumeFile> UploadState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn error(&self) -> Option<&UploadError> {
        self.error.as_ref()
    }

    /// Error text to render, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Validate and select a file; on failure the selection is cleared
    /// and the error is kept for display.
    pub fn select(&mut self, file: Option<F>) {
        match validate_file(file.as_ref()) {
            Ok(()) => {
                if let Some(f) = &file {
                    log::debug!("📄 Selected {} ({} bytes)", f.file_name(), f.byte_size());
                }
                self.file = file;
                self.error = None;
            }
            Err(e) => {
                log::debug!("🚫 Rejected file: {}", e);
                self.file = None;
                self.error = Some(e);
            }
        }
    }

    pub fn drag_over(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Dropped files go through the same path as selected ones.
    pub fn drop_file(&mut self, file: Option<F>) {
        self.dragging = false;
        self.select(file);
    }

    /// Enter the uploading state and hand out the file to send.
    ///
    /// Returns `None` (and makes no request) when nothing valid is selected
    /// or a request is already in flight.
    pub fn begin_upload(&mut self) -> Option<F> {
        if self.loading {
            return None;
        }
        match &self.file {
            Some(file) => {
                self.loading = true;
                self.error = None;
                Some(file.clone())
            }
            None => {
                self.error = Some(UploadError::NothingToUpload);
                None
            }
        }
    }

    /// Apply the outcome of the request started by [`begin_upload`](Self::begin_upload)
    /// and persist a successful result.
    ///
    /// `uploaded` is the file that was sent, which may differ from the
    /// current selection if the user picked another one meanwhile.
    pub fn finish_upload<S: KeyValueStore>(
        &mut self,
        uploaded: &F,
        outcome: Result<UploadResponse, TransportError>,
        results: &ResultStore<S>,
    ) -> UploadResult<Analysis> {
        self.loading = false;

        let result = match outcome {
            Ok(response) if response.success => {
                log::info!("✅ Analyzed {}", uploaded.file_name());
                Ok(persist(uploaded, response.payload(), results))
            }
            Ok(_) => {
                log::warn!("⚠️  Analyzer could not parse {}", uploaded.file_name());
                Err(UploadError::ParsingFailed)
            }
            Err(e) => {
                log::error!("❌ Upload failed: {}", e);
                Err(UploadError::from(e))
            }
        };

        self.error = result.as_ref().err().cloned();
        result
    }
}

/// Write a successful result to storage.
///
/// Storage failures are logged; the analysis still counts.
fn persist<F, S>(uploaded: &F, data: Value, results: &ResultStore<S>) -> Analysis
where
    F: ResumeFile,
    S: KeyValueStore,
{
    if let Err(e) = results.save_parsed_data(&data) {
        log::warn!("⚠️  {}", e);
    }

    let analyzed_count = results.increment_analyzed_count().unwrap_or_else(|e| {
        log::warn!("⚠️  {}", e);
        results.analyzed_count().saturating_add(1)
    });

    let file_name = uploaded.file_name();
    if let Err(e) = results.save_last_file_name(&file_name) {
        log::warn!("⚠️  {}", e);
    }

    Analysis {
        data,
        analyzed_count,
        file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use futures::executor::block_on;
    use serde_json::json;

    use crate::config::{storage_keys, MAX_FILE_SIZE};
    use crate::error::GENERIC_NETWORK_ERROR;
    use crate::services::analyzer::tests::ScriptedAnalyzer;
    use crate::services::AnalyzerClient;
    use crate::storage::tests::FlakyStore;
    use crate::storage::MemoryStore;
    use crate::validation::tests::TestFile;

    #[derive(Default)]
    struct RecordingListener {
        parsed: RefCell<Vec<Value>>,
        counts: RefCell<Vec<u64>>,
        names: RefCell<Vec<String>>,
    }

    impl UploadListener for RecordingListener {
        fn set_parsed_data(&self, data: Value) {
            self.parsed.borrow_mut().push(data);
        }

        fn set_analyzed_count(&self, count: u64) {
            self.counts.borrow_mut().push(count);
        }

        fn set_last_file_name(&self, name: &str) {
            self.names.borrow_mut().push(name.to_string());
        }
    }

    /// Same sequence the component runs on click.
    fn run_upload<S: KeyValueStore>(
        state: &mut UploadState<TestFile>,
        analyzer: &ScriptedAnalyzer,
        results: &ResultStore<S>,
        listener: &RecordingListener,
    ) -> Option<UploadResult<()>> {
        let file = state.begin_upload()?;
        assert!(state.is_loading());
        let outcome = block_on(analyzer.upload(&file));
        let result = state.finish_upload(&file, outcome, results);
        Some(result.map(|analysis| analysis.notify(listener)))
    }

    fn selected(name: &str) -> UploadState<TestFile> {
        let mut state = UploadState::new();
        state.select(Some(TestFile::pdf(name, 1024)));
        assert_eq!(state.error(), None);
        state
    }

    fn success(data: Value) -> Result<UploadResponse, TransportError> {
        Ok(UploadResponse {
            success: true,
            data: Some(data),
            error: None,
        })
    }

    #[test]
    fn test_select_valid_pdf() {
        let file = TestFile::pdf("cv.pdf", MAX_FILE_SIZE);
        let mut state = UploadState::new();
        state.select(Some(file.clone()));

        assert_eq!(state.file(), Some(&file));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_select_invalid_clears_previous_file() {
        let mut state = selected("cv.pdf");
        state.select(Some(TestFile::new("photo.png", "image/png", 10)));

        assert_eq!(state.error(), Some(&UploadError::InvalidType));
        assert_eq!(state.file(), None);
        assert_eq!(state.error_message().as_deref(), Some("Only PDF or DOCX files are allowed."));
    }

    #[test]
    fn test_select_oversized() {
        let mut state = UploadState::new();
        state.select(Some(TestFile::pdf("cv.pdf", MAX_FILE_SIZE + 1)));

        assert_eq!(state.file(), None);
        assert_eq!(state.error(), Some(&UploadError::TooLarge));
    }

    #[test]
    fn test_valid_selection_clears_error() {
        let mut state = UploadState::new();
        state.select(None);
        assert_eq!(state.error(), Some(&UploadError::NoFileSelected));

        state.select(Some(TestFile::pdf("cv.pdf", 10)));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_drag_flag() {
        let mut state = UploadState::<TestFile>::new();
        state.drag_over();
        assert!(state.is_dragging());
        state.drag_leave();
        assert!(!state.is_dragging());

        state.drag_over();
        state.drop_file(None);
        assert!(!state.is_dragging());
        assert_eq!(state.error(), Some(&UploadError::NoFileSelected));
    }

    #[test]
    fn test_drop_matches_select() {
        let candidates = [
            None,
            Some(TestFile::pdf("cv.pdf", 10)),
            Some(TestFile::new("cv.txt", "text/plain", 10)),
            Some(TestFile::pdf("cv.pdf", MAX_FILE_SIZE + 1)),
        ];

        for candidate in candidates {
            let mut selected = UploadState::new();
            let mut dropped = UploadState::new();
            dropped.drag_over();

            selected.select(candidate.clone());
            dropped.drop_file(candidate.clone());

            assert_eq!(selected.file(), dropped.file());
            assert_eq!(selected.error(), dropped.error());
        }
    }

    #[test]
    fn test_upload_without_file_makes_no_request() {
        let mut state = UploadState::new();
        let analyzer = ScriptedAnalyzer::replying(success(json!({})));
        let results = ResultStore::new(MemoryStore::new());
        let listener = RecordingListener::default();

        assert!(run_upload(&mut state, &analyzer, &results, &listener).is_none());
        assert_eq!(analyzer.calls.get(), 0);
        assert!(!state.is_loading());
        assert_eq!(state.error_message().as_deref(), Some("Please select a resume file first."));
    }

    #[test]
    fn test_upload_after_rejected_file_makes_no_request() {
        let mut state = UploadState::new();
        state.select(Some(TestFile::new("cv.odt", "application/vnd.oasis.opendocument.text", 10)));
        let analyzer = ScriptedAnalyzer::replying(success(json!({})));
        let results = ResultStore::new(MemoryStore::new());

        assert!(run_upload(&mut state, &analyzer, &results, &RecordingListener::default()).is_none());
        assert_eq!(analyzer.calls.get(), 0);
    }

    #[test]
    fn test_begin_is_inert_while_loading() {
        let mut state = selected("cv.pdf");
        assert!(state.begin_upload().is_some());
        assert!(state.begin_upload().is_none());
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_successful_upload() {
        let mut state = selected("ada.pdf");
        let analyzer = ScriptedAnalyzer::replying(success(json!({"x": 1})));
        let store = MemoryStore::new();
        store.set_item(storage_keys::ANALYZED_COUNT, "3").unwrap();
        let results = ResultStore::new(store);
        let listener = RecordingListener::default();

        let result = run_upload(&mut state, &analyzer, &results, &listener);

        assert_eq!(result, Some(Ok(())));
        assert_eq!(*analyzer.sent.borrow(), vec!["ada.pdf".to_string()]);
        assert_eq!(*listener.parsed.borrow(), vec![json!({"x": 1})]);
        assert_eq!(*listener.counts.borrow(), vec![4]);
        assert_eq!(*listener.names.borrow(), vec!["ada.pdf".to_string()]);

        let store = results.inner();
        assert_eq!(store.get_item(storage_keys::PARSED_DATA).as_deref(), Some(r#"{"x":1}"#));
        assert_eq!(store.get_item(storage_keys::ANALYZED_COUNT).as_deref(), Some("4"));
        assert_eq!(store.get_item(storage_keys::LAST_FILE_NAME).as_deref(), Some("ada.pdf"));

        assert!(!state.is_loading());
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_storage_failures_do_not_fail_the_analysis() {
        let mut state = selected("ada.pdf");
        let analyzer = ScriptedAnalyzer::replying(success(json!({"x": 1})));
        let store = FlakyStore::rejecting_all();
        store.seed(storage_keys::ANALYZED_COUNT, "5");
        let results = ResultStore::new(store);
        let listener = RecordingListener::default();

        let result = run_upload(&mut state, &analyzer, &results, &listener);

        assert_eq!(result, Some(Ok(())));
        assert_eq!(state.error(), None);
        assert!(!state.is_loading());
        assert_eq!(*listener.parsed.borrow(), vec![json!({"x": 1})]);
        assert_eq!(*listener.counts.borrow(), vec![6]);
        assert_eq!(*listener.names.borrow(), vec!["ada.pdf".to_string()]);
        // nothing could be written
        assert_eq!(results.analyzed_count(), 5);
        assert_eq!(results.parsed_data(), None);
    }

    #[test]
    fn test_count_write_failure_still_counts_from_stored_value() {
        let mut state = selected("cv.pdf");
        let store = FlakyStore::rejecting(&[storage_keys::ANALYZED_COUNT]);
        store.seed(storage_keys::ANALYZED_COUNT, "9");
        let results = ResultStore::new(store);

        let sent = state.begin_upload().unwrap();
        let analysis = state
            .finish_upload(&sent, success(json!({"x": 1})), &results)
            .unwrap();

        assert_eq!(analysis.analyzed_count, 10);
        assert_eq!(results.parsed_data(), Some(json!({"x": 1})));
        assert_eq!(results.last_file_name().as_deref(), Some("cv.pdf"));
    }

    #[test]
    fn test_parsing_failure_leaves_store_untouched() {
        let mut state = selected("cv.pdf");
        let analyzer = ScriptedAnalyzer::replying(Ok(UploadResponse::default()));
        let store = MemoryStore::new();
        store.set_item(storage_keys::PARSED_DATA, r#"{"old":true}"#).unwrap();
        store.set_item(storage_keys::ANALYZED_COUNT, "7").unwrap();
        let results = ResultStore::new(store);
        let listener = RecordingListener::default();

        let result = run_upload(&mut state, &analyzer, &results, &listener);

        assert_eq!(result, Some(Err(UploadError::ParsingFailed)));
        assert_eq!(state.error_message().as_deref(), Some("Parsing failed. Try again."));
        assert_eq!(results.parsed_data(), Some(json!({"old": true})));
        assert_eq!(results.analyzed_count(), 7);
        assert_eq!(results.last_file_name(), None);
        assert!(listener.parsed.borrow().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_network_failure_uses_generic_message() {
        let mut state = selected("cv.pdf");
        let analyzer = ScriptedAnalyzer::replying(Err(TransportError::network("connection refused")));
        let results = ResultStore::new(MemoryStore::new());
        let listener = RecordingListener::default();

        run_upload(&mut state, &analyzer, &results, &listener);

        assert_eq!(state.error_message().as_deref(), Some(GENERIC_NETWORK_ERROR));
        assert_eq!(results.analyzed_count(), 0);
        assert!(!state.is_loading());
        // the selection survives so the user can try again
        assert!(state.file().is_some());
    }

    #[test]
    fn test_server_failure_shows_server_message() {
        let mut state = selected("cv.pdf");
        let analyzer = ScriptedAnalyzer::replying(Err(TransportError::status(
            400,
            Some("Resume text could not be extracted".into()),
        )));
        let results = ResultStore::new(MemoryStore::new());

        run_upload(&mut state, &analyzer, &results, &RecordingListener::default());

        assert_eq!(
            state.error_message().as_deref(),
            Some("Resume text could not be extracted")
        );
    }

    #[test]
    fn test_records_file_that_was_sent() {
        let mut state = selected("first.pdf");
        let sent = state.begin_upload().unwrap();
        state.select(Some(TestFile::pdf("second.pdf", 10)));

        let results = ResultStore::new(MemoryStore::new());
        let analysis = state
            .finish_upload(&sent, success(json!({"ok": 1})), &results)
            .unwrap();

        assert_eq!(analysis.file_name, "first.pdf");
        assert_eq!(results.last_file_name().as_deref(), Some("first.pdf"));
        assert_eq!(state.file().map(|f| f.name.as_str()), Some("second.pdf"));
    }

    #[test]
    fn test_consecutive_uploads_count_up() {
        let mut state = selected("cv.pdf");
        let analyzer = ScriptedAnalyzer::replying(success(json!({"x": 1})));
        let results = ResultStore::new(MemoryStore::new());
        let listener = RecordingListener::default();

        run_upload(&mut state, &analyzer, &results, &listener);
        run_upload(&mut state, &analyzer, &results, &listener);

        assert_eq!(analyzer.calls.get(), 2);
        assert_eq!(*listener.counts.borrow(), vec![1, 2]);
        assert_eq!(results.analyzed_count(), 2);
    }
}
