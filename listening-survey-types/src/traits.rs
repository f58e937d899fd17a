use crate::{Item, LoadError, Questionnaire, SubmitError, TestKind};

/// A validator decides whether the respondent may leave an item.
///
/// Returns `Err(message)` with the text shown in the blocking dialog.
pub type Validator = Box<dyn Fn(&Item) -> Result<(), String>>;

/// Fetches the questionnaire a respondent is about to take.
pub trait Loader {
    /// Load the questionnaire of the given test.
    fn load(&self, kind: TestKind, id: &str) -> Result<Questionnaire, LoadError>;
}

/// Acknowledgement returned by a [`Submitter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    /// Identifier the stored response was given, if the receiver reports one.
    pub response_id: Option<String>,
}

/// Receives completed questionnaires.
pub trait Submitter {
    /// Submit the full questionnaire, answers and recorded times included.
    fn submit(&mut self, kind: TestKind, payload: &Questionnaire) -> Result<Ack, SubmitError>;
}

/// Shows modal messages to the respondent.
///
/// The dialog blocks further navigation until it is dismissed. It never
/// changes survey state.
pub trait Dialog {
    fn show_blocking(&mut self, message: &str, title: &str);
}

/// Presents items and collects their answers.
///
/// Implementations dispatch over [`ItemKind`](crate::ItemKind); the survey
/// controller never looks inside an item beyond what the validator checks.
pub trait ItemRenderer {
    /// The error type for this renderer.
    type Error: Into<anyhow::Error>;

    /// Show an item. `active` is true for the item whose panel is open.
    fn render(&mut self, item: &Item, active: bool) -> Result<(), Self::Error>;

    /// Collect answers for the open item, writing them into `item`.
    fn collect(&mut self, item: &mut Item) -> Result<(), Self::Error>;
}

/// Source of wall-clock time in milliseconds.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// [`Clock`] backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
