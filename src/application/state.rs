//! Application state management for the conversion workflow.
//!
//! This module contains the conversion workflow state machine and the
//! application state that drives the terminal user interface.

use crate::domain::{ConversionError, ConversionResult, TransformService};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Represents where the current conversion stands.
///
/// `Idle`, `Succeeded` and `Failed` are rest states; a new submission may
/// begin from any of them. `Pending` means exactly one request is
/// outstanding and the submit affordance is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    /// No conversion has been attempted since startup
    Idle,
    /// A request is outstanding; its resolution has not been applied yet
    Pending,
    /// The latest request resolved with a ghanam result
    Succeeded,
    /// The latest request resolved with a failure message
    Failed,
}

impl ConversionStatus {
    /// Short label for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            ConversionStatus::Idle => "Idle",
            ConversionStatus::Pending => "Converting",
            ConversionStatus::Succeeded => "Succeeded",
            ConversionStatus::Failed => "Failed",
        }
    }
}

/// Snapshot of the conversion workflow, rendered by the view each frame.
///
/// Invariants maintained by [`App`]:
/// - `status == Succeeded` implies `output_text` holds the latest result
///   and `error_message` is empty.
/// - `status == Failed` implies `error_message` is non-empty and
///   `output_text` is empty.
/// - Starting a new submission clears both `output_text` and
///   `error_message` before the request is dispatched.
///
/// # Examples
///
/// ```
/// use m2g::application::{ConversionStatus, WorkflowState};
///
/// let workflow = WorkflowState::default();
/// assert_eq!(workflow.status, ConversionStatus::Idle);
/// assert!(workflow.input_text.is_empty());
/// assert!(!workflow.submit_disabled());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowState {
    /// Current content of the mantra input buffer
    pub input_text: String,
    /// Ghanam text from the latest successful conversion
    pub output_text: String,
    /// Where the workflow stands
    pub status: ConversionStatus,
    /// Failure message from the latest failed conversion
    pub error_message: String,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self {
            input_text: String::new(),
            output_text: String::new(),
            status: ConversionStatus::Idle,
            error_message: String::new(),
        }
    }
}

impl WorkflowState {
    /// Whether the submit affordance is disabled.
    ///
    /// True exactly while a request is outstanding. This is the guard that
    /// keeps at most one request in flight.
    pub fn submit_disabled(&self) -> bool {
        self.status == ConversionStatus::Pending
    }
}

/// Main application state: the conversion workflow plus UI concerns.
///
/// The workflow state is mutated only through methods on this type
/// (submission, resolution, input edits); the view reads it through
/// [`App::workflow`] and never writes it.
///
/// # Examples
///
/// ```
/// use m2g::application::{App, ConversionStatus};
/// use m2g::domain::{ConversionResult, TransformService};
/// use std::sync::Arc;
///
/// struct Echo;
/// impl TransformService for Echo {
///     fn transform(&self, mantra: &str) -> ConversionResult {
///         Ok(mantra.to_string())
///     }
/// }
///
/// let app = App::new(Arc::new(Echo));
/// assert_eq!(app.workflow().status, ConversionStatus::Idle);
/// assert!(!app.show_instructions);
/// ```
pub struct App {
    /// Conversion workflow snapshot, single-writer via this type's methods
    workflow: WorkflowState,
    /// Cursor position in the input buffer, counted in characters
    pub cursor_position: usize,
    /// Whether the collapsible instructions panel is expanded
    pub show_instructions: bool,
    /// Temporary status message to display (clipboard feedback and the like)
    pub status_message: Option<String>,
    /// The external transformation collaborator
    service: Arc<dyn TransformService>,
    /// Receiving end for the outstanding request, if any
    inflight: Option<Receiver<ConversionResult>>,
}

impl App {
    /// Creates the application state with an empty workflow.
    ///
    /// # Arguments
    ///
    /// * `service` - Transformation service used for every submission
    pub fn new(service: Arc<dyn TransformService>) -> Self {
        Self {
            workflow: WorkflowState::default(),
            cursor_position: 0,
            show_instructions: false,
            status_message: None,
            service,
            inflight: None,
        }
    }

    /// Read-only view of the conversion workflow for rendering.
    pub fn workflow(&self) -> &WorkflowState {
        &self.workflow
    }

    /// Submits the current input text for transformation.
    ///
    /// No-op while a request is already outstanding. Otherwise clears the
    /// previous output and error, transitions to `Pending` synchronously,
    /// and dispatches the request on a worker thread. The request payload
    /// captures the input text as it stands right now; later edits do not
    /// affect it. The input buffer itself is not touched.
    pub fn submit(&mut self) {
        if self.workflow.submit_disabled() {
            return;
        }

        self.workflow.output_text.clear();
        self.workflow.error_message.clear();
        self.workflow.status = ConversionStatus::Pending;
        self.status_message = None;

        let mantra = self.workflow.input_text.clone();
        let service = Arc::clone(&self.service);
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // The receiver may only disappear if the app is shutting down.
            let _ = tx.send(service.transform(&mantra));
        });
        self.inflight = Some(rx);
    }

    /// Applies the outstanding request's resolution if it has arrived.
    ///
    /// Called once per event-loop tick. Returns `true` when a
    /// `Pending -> Succeeded/Failed` transition was applied this call.
    /// Each request resolves exactly once: the receiver is dropped as soon
    /// as its result is consumed. A worker that died without replying
    /// resolves the request as a transport failure, so the workflow never
    /// sticks in `Pending`.
    pub fn poll_conversion(&mut self) -> bool {
        let result = match &self.inflight {
            Some(receiver) => match receiver.try_recv() {
                Ok(result) => result,
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => {
                    Err(ConversionError::transport("Conversion was interrupted"))
                }
            },
            None => return false,
        };

        self.inflight = None;
        self.resolve(result);
        true
    }

    /// Applies a request resolution to the workflow state.
    fn resolve(&mut self, result: ConversionResult) {
        match result {
            Ok(ghanam) => {
                self.workflow.output_text = ghanam;
                self.workflow.error_message.clear();
                self.workflow.status = ConversionStatus::Succeeded;
            }
            Err(error) => {
                self.workflow.output_text.clear();
                self.workflow.error_message = error.to_string();
                self.workflow.status = ConversionStatus::Failed;
            }
        }
    }

    /// Toggles the collapsible instructions panel.
    ///
    /// Purely presentational; independent of the conversion workflow.
    pub fn toggle_instructions(&mut self) {
        self.show_instructions = !self.show_instructions;
    }

    /// Inserts a character at the cursor.
    ///
    /// Input edits are always allowed, including while a request is
    /// outstanding; the in-flight payload already captured its text.
    pub fn insert_char(&mut self, c: char) {
        let offset = self.cursor_byte_offset();
        self.workflow.input_text.insert(offset, c);
        self.cursor_position += 1;
    }

    /// Inserts a block of text at the cursor (paste).
    pub fn insert_str(&mut self, text: &str) {
        let offset = self.cursor_byte_offset();
        self.workflow.input_text.insert_str(offset, text);
        self.cursor_position += text.chars().count();
    }

    /// Inserts a line break at the cursor.
    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Removes the character before the cursor, if any.
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let offset = self.cursor_byte_offset();
            self.workflow.input_text.remove(offset);
        }
    }

    /// Removes the character under the cursor, if any.
    pub fn delete_forward(&mut self) {
        let offset = self.cursor_byte_offset();
        if offset < self.workflow.input_text.len() {
            self.workflow.input_text.remove(offset);
        }
    }

    /// Moves the cursor one character left.
    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    /// Moves the cursor one character right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.workflow.input_text.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Moves the cursor to the start of the input.
    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    /// Moves the cursor to the end of the input.
    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.workflow.input_text.chars().count();
    }

    /// Clears the entire input buffer.
    pub fn clear_input(&mut self) {
        self.workflow.input_text.clear();
        self.cursor_position = 0;
    }

    /// Byte offset of the cursor within the input buffer.
    ///
    /// The cursor is tracked in characters so mantras with diacritics
    /// (multi-byte in UTF-8) edit correctly.
    fn cursor_byte_offset(&self) -> usize {
        self.workflow
            .input_text
            .char_indices()
            .nth(self.cursor_position)
            .map(|(offset, _)| offset)
            .unwrap_or(self.workflow.input_text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::Sender;
    use std::time::Duration;

    /// Resolves a transformation by echoing the mantra uppercased.
    struct EchoUpper;

    impl TransformService for EchoUpper {
        fn transform(&self, mantra: &str) -> ConversionResult {
            Ok(mantra.to_uppercase())
        }
    }

    /// Resolves every transformation with a fixed error.
    struct AlwaysFail(ConversionError);

    impl TransformService for AlwaysFail {
        fn transform(&self, _mantra: &str) -> ConversionResult {
            Err(self.0.clone())
        }
    }

    /// Records the mantra it was called with, then echoes it uppercased.
    struct Recording {
        seen: Mutex<Vec<String>>,
    }

    impl Recording {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl TransformService for Recording {
        fn transform(&self, mantra: &str) -> ConversionResult {
            self.seen.lock().unwrap().push(mantra.to_string());
            Ok(mantra.to_uppercase())
        }
    }

    /// Blocks each transformation until the test releases it, counting calls.
    struct Gated {
        calls: AtomicUsize,
        gate: Mutex<Receiver<()>>,
    }

    impl Gated {
        fn new() -> (Arc<Self>, Sender<()>) {
            let (tx, rx) = mpsc::channel();
            let service = Arc::new(Self {
                calls: AtomicUsize::new(0),
                gate: Mutex::new(rx),
            });
            (service, tx)
        }
    }

    impl TransformService for Gated {
        fn transform(&self, mantra: &str) -> ConversionResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.lock().unwrap().recv().expect("gate closed");
            Ok(mantra.to_uppercase())
        }
    }

    /// Fails the first call, succeeds afterwards.
    struct FailThenSucceed {
        calls: AtomicUsize,
    }

    impl TransformService for FailThenSucceed {
        fn transform(&self, mantra: &str) -> ConversionResult {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ConversionError::Service("bad input".to_string()))
            } else {
                Ok(mantra.to_uppercase())
            }
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.insert_char(c);
        }
    }

    fn wait_for_resolution(app: &mut App) {
        for _ in 0..1000 {
            if app.poll_conversion() {
                return;
            }
            thread::sleep(Duration::from_millis(2));
        }
        panic!("conversion did not resolve");
    }

    #[test]
    fn test_new_app_is_idle_and_empty() {
        let app = App::new(Arc::new(EchoUpper));
        let workflow = app.workflow();
        assert_eq!(workflow.status, ConversionStatus::Idle);
        assert!(workflow.input_text.is_empty());
        assert!(workflow.output_text.is_empty());
        assert!(workflow.error_message.is_empty());
        assert!(!workflow.submit_disabled());
        assert_eq!(app.cursor_position, 0);
        assert!(!app.show_instructions);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_submit_transitions_to_pending_synchronously() {
        let (service, release) = Gated::new();
        let mut app = App::new(service);
        type_text(&mut app, "om");

        app.submit();

        // Observable before the request resolves.
        assert_eq!(app.workflow().status, ConversionStatus::Pending);
        assert!(app.workflow().submit_disabled());

        release.send(()).unwrap();
        wait_for_resolution(&mut app);
        assert_eq!(app.workflow().status, ConversionStatus::Succeeded);
    }

    #[test]
    fn test_roundtrip_uppercase_echo() {
        let mut app = App::new(Arc::new(EchoUpper));
        type_text(&mut app, "om");

        app.submit();
        wait_for_resolution(&mut app);

        let workflow = app.workflow();
        assert_eq!(workflow.status, ConversionStatus::Succeeded);
        assert_eq!(workflow.output_text, "OM");
        assert_eq!(workflow.error_message, "");
    }

    #[test]
    fn test_empty_input_is_a_legal_request() {
        let service = Recording::new();
        let mut app = App::new(Arc::clone(&service) as Arc<dyn TransformService>);

        app.submit();
        wait_for_resolution(&mut app);

        assert_eq!(*service.seen.lock().unwrap(), vec![String::new()]);
        assert_eq!(app.workflow().status, ConversionStatus::Succeeded);
    }

    #[test]
    fn test_payload_captures_input_at_submit_time() {
        let service = Recording::new();
        let mut app = App::new(Arc::clone(&service) as Arc<dyn TransformService>);
        type_text(&mut app, "om namah");

        app.submit();

        // Edits while the request is outstanding must not affect it.
        type_text(&mut app, " shivaya");
        wait_for_resolution(&mut app);

        assert_eq!(*service.seen.lock().unwrap(), vec!["om namah".to_string()]);
        assert_eq!(app.workflow().output_text, "OM NAMAH");
        assert_eq!(app.workflow().input_text, "om namah shivaya");
    }

    #[test]
    fn test_submit_does_not_touch_input_text() {
        let mut app = App::new(Arc::new(EchoUpper));
        type_text(&mut app, "  om \n ");

        app.submit();
        assert_eq!(app.workflow().input_text, "  om \n ");
        wait_for_resolution(&mut app);
        assert_eq!(app.workflow().input_text, "  om \n ");
    }

    #[test]
    fn test_resubmit_while_pending_is_a_noop() {
        let (service, release) = Gated::new();
        let mut app = App::new(Arc::clone(&service) as Arc<dyn TransformService>);
        type_text(&mut app, "om");

        app.submit();
        let before = app.workflow().clone();

        app.submit();
        app.submit();

        // State unchanged and nothing new dispatched.
        assert_eq!(*app.workflow(), before);
        assert!(!app.poll_conversion());

        release.send(()).unwrap();
        wait_for_resolution(&mut app);
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.workflow().status, ConversionStatus::Succeeded);
    }

    #[test]
    fn test_resolution_applies_exactly_once() {
        let mut app = App::new(Arc::new(EchoUpper));
        type_text(&mut app, "om");

        app.submit();
        wait_for_resolution(&mut app);
        assert!(!app.poll_conversion());
        assert!(!app.poll_conversion());
    }

    #[test]
    fn test_http_failure_resolves_failed_with_message() {
        let mut app = App::new(Arc::new(AlwaysFail(ConversionError::NonOkStatus)));
        type_text(&mut app, "anything");

        app.submit();
        wait_for_resolution(&mut app);

        let workflow = app.workflow();
        assert_eq!(workflow.status, ConversionStatus::Failed);
        assert!(!workflow.error_message.is_empty());
        assert_eq!(workflow.output_text, "");
    }

    #[test]
    fn test_service_error_message_is_verbatim() {
        let error = ConversionError::Service("bad input".to_string());
        let mut app = App::new(Arc::new(AlwaysFail(error)));
        type_text(&mut app, "om");

        app.submit();
        wait_for_resolution(&mut app);

        assert_eq!(app.workflow().status, ConversionStatus::Failed);
        assert_eq!(app.workflow().error_message, "bad input");
    }

    #[test]
    fn test_unexpected_response_uses_fixed_message() {
        let mut app = App::new(Arc::new(AlwaysFail(ConversionError::UnexpectedResponse)));
        app.submit();
        wait_for_resolution(&mut app);

        assert_eq!(app.workflow().status, ConversionStatus::Failed);
        assert_eq!(
            app.workflow().error_message,
            "Unexpected response from server."
        );
    }

    #[test]
    fn test_new_submission_clears_previous_failure() {
        let service = Arc::new(FailThenSucceed {
            calls: AtomicUsize::new(0),
        });
        let mut app = App::new(service);
        type_text(&mut app, "om");

        app.submit();
        wait_for_resolution(&mut app);
        assert_eq!(app.workflow().status, ConversionStatus::Failed);
        assert_eq!(app.workflow().error_message, "bad input");

        app.submit();

        // Both residues are gone at the instant of the new submission.
        assert_eq!(app.workflow().status, ConversionStatus::Pending);
        assert_eq!(app.workflow().output_text, "");
        assert_eq!(app.workflow().error_message, "");

        wait_for_resolution(&mut app);
        assert_eq!(app.workflow().status, ConversionStatus::Succeeded);
        assert_eq!(app.workflow().output_text, "OM");
    }

    #[test]
    fn test_new_submission_clears_previous_success() {
        let (service, release) = Gated::new();
        let mut app = App::new(Arc::clone(&service) as Arc<dyn TransformService>);
        type_text(&mut app, "om");

        app.submit();
        release.send(()).unwrap();
        wait_for_resolution(&mut app);
        assert_eq!(app.workflow().output_text, "OM");

        app.submit();
        assert_eq!(app.workflow().status, ConversionStatus::Pending);
        assert_eq!(app.workflow().output_text, "");

        release.send(()).unwrap();
        wait_for_resolution(&mut app);
        assert_eq!(app.workflow().status, ConversionStatus::Succeeded);
    }

    #[test]
    fn test_toggle_instructions_is_pure_negation() {
        let mut app = App::new(Arc::new(EchoUpper));
        let before = app.workflow().clone();

        app.toggle_instructions();
        assert!(app.show_instructions);
        app.toggle_instructions();
        assert!(!app.show_instructions);

        // No interaction with the conversion workflow.
        assert_eq!(*app.workflow(), before);
    }

    #[test]
    fn test_insert_and_move() {
        let mut app = App::new(Arc::new(EchoUpper));
        type_text(&mut app, "om");
        app.move_cursor_home();
        app.insert_char('A');
        assert_eq!(app.workflow().input_text, "Aom");
        assert_eq!(app.cursor_position, 1);

        app.move_cursor_end();
        assert_eq!(app.cursor_position, 3);
        app.move_cursor_right();
        assert_eq!(app.cursor_position, 3);
        app.move_cursor_left();
        assert_eq!(app.cursor_position, 2);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut app = App::new(Arc::new(EchoUpper));
        type_text(&mut app, "oom");
        app.move_cursor_home();
        app.backspace();
        assert_eq!(app.workflow().input_text, "oom");

        app.delete_forward();
        assert_eq!(app.workflow().input_text, "om");

        app.move_cursor_end();
        app.backspace();
        assert_eq!(app.workflow().input_text, "o");
        assert_eq!(app.cursor_position, 1);
        app.delete_forward();
        assert_eq!(app.workflow().input_text, "o");
    }

    #[test]
    fn test_editing_handles_multibyte_characters() {
        let mut app = App::new(Arc::new(EchoUpper));
        type_text(&mut app, "gaṇānāṁ");
        assert_eq!(app.cursor_position, 7);

        app.backspace();
        assert_eq!(app.workflow().input_text, "gaṇānā");

        app.move_cursor_home();
        app.move_cursor_right();
        app.move_cursor_right();
        app.insert_char('ṇ');
        assert_eq!(app.workflow().input_text, "gaṇṇānā");
    }

    #[test]
    fn test_paste_inserts_at_cursor() {
        let mut app = App::new(Arc::new(EchoUpper));
        type_text(&mut app, "om om");
        app.move_cursor_home();
        app.move_cursor_right();
        app.move_cursor_right();
        app.insert_str(" tat sat");
        assert_eq!(app.workflow().input_text, "om tat sat om");
        assert_eq!(app.cursor_position, 10);
    }

    #[test]
    fn test_clear_input() {
        let mut app = App::new(Arc::new(EchoUpper));
        type_text(&mut app, "om namah");
        app.clear_input();
        assert!(app.workflow().input_text.is_empty());
        assert_eq!(app.cursor_position, 0);
    }

    #[test]
    fn test_newline_insertion_for_multiline_mantras() {
        let mut app = App::new(Arc::new(EchoUpper));
        type_text(&mut app, "line one");
        app.insert_newline();
        type_text(&mut app, "line two");
        assert_eq!(app.workflow().input_text, "line one\nline two");
    }
}
