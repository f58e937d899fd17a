//! Test doubles for driving surveys without a respondent.
//!
//! These stand in for the loader, submitter, dialog and clock so a survey
//! session can be scripted step by step.
//!
//! # Example
//!
//! ```rust,ignore
//! use listening_survey::{ManualClock, RecordingDialog, RecordingSubmitter, SurveyController};
//!
//! let clock = ManualClock::new(0);
//! let mut dialog = RecordingDialog::new();
//! let mut submitter = RecordingSubmitter::new();
//! let mut survey = SurveyController::interactive(questionnaire, TestKind::AcrTest)
//!     .with_clock(clock.clone());
//!
//! survey.next(&mut dialog)?;
//! clock.advance(1_500);
//! survey.submit(&mut submitter, &mut dialog)?;
//!
//! assert_eq!(submitter.payloads().len(), 1);
//! ```

use std::{cell::Cell, collections::HashMap, rc::Rc};

use listening_survey_types::{
    Ack, Clock, Dialog, LoadError, Loader, Questionnaire, SubmitError, Submitter, TestKind,
};

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle while the
/// controller owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_millis)),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
    }

    pub fn set(&self, millis: i64) {
        self.now.set(millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}

/// A dialog that records every `(message, title)` it was asked to show.
#[derive(Debug, Clone, Default)]
pub struct RecordingDialog {
    shown: Vec<(String, String)>,
}

impl RecordingDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> &[(String, String)] {
        &self.shown
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}

impl Dialog for RecordingDialog {
    fn show_blocking(&mut self, message: &str, title: &str) {
        self.shown.push((message.to_string(), title.to_string()));
    }
}

/// A submitter that keeps every payload, optionally refusing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingSubmitter {
    payloads: Vec<(TestKind, Questionnaire)>,
    refuse_with: Option<String>,
}

impl RecordingSubmitter {
    /// Create a submitter that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a submitter that refuses every payload with `reason`.
    pub fn refusing(reason: impl Into<String>) -> Self {
        Self {
            payloads: Vec::new(),
            refuse_with: Some(reason.into()),
        }
    }

    /// Start accepting payloads.
    pub fn accept(&mut self) {
        self.refuse_with = None;
    }

    /// Every payload received, refused ones included.
    pub fn payloads(&self) -> &[(TestKind, Questionnaire)] {
        &self.payloads
    }
}

impl Submitter for RecordingSubmitter {
    fn submit(&mut self, kind: TestKind, payload: &Questionnaire) -> Result<Ack, SubmitError> {
        self.payloads.push((kind, payload.clone()));
        match &self.refuse_with {
            Some(reason) => Err(SubmitError::Refused(reason.clone())),
            None => Ok(Ack {
                response_id: Some(format!("response-{}", self.payloads.len())),
            }),
        }
    }
}

/// A loader backed by a fixed set of questionnaires.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    questionnaires: HashMap<(TestKind, String), Questionnaire>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_questionnaire(
        mut self,
        kind: TestKind,
        id: impl Into<String>,
        questionnaire: Questionnaire,
    ) -> Self {
        self.questionnaires.insert((kind, id.into()), questionnaire);
        self
    }
}

impl Loader for StaticLoader {
    fn load(&self, kind: TestKind, id: &str) -> Result<Questionnaire, LoadError> {
        self.questionnaires
            .get(&(kind, id.to_string()))
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                kind,
                id: id.to_string(),
            })
    }
}
