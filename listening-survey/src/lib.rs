//! # listening-survey
//!
//! Drives a respondent through a listening-test questionnaire.
//!
//! The [`SurveyController`] owns one survey session: which panel is open,
//! when each item was opened, whether the open item may be left, and when
//! the questionnaire may be handed to a [`Submitter`]. Rendering, loading
//! and submitting are left to collaborators.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use listening_survey::{SurveyPage, TestKind};
//!
//! let page = SurveyPage::open(&loader, TestKind::AcrTest, "5f1d");
//! let SurveyPage::Ready(mut survey) = page else { return };
//!
//! survey.next(&mut dialog)?;             // cover -> first item
//! survey.collect_open(&mut renderer)?;     // answers the open item
//! survey.next(&mut dialog)?;             // blocked with a dialog if item 0 is incomplete
//! // ...
//! survey.submit(&mut submitter, &mut dialog)?;
//! ```
//!
//! ## Presentation modes
//!
//! - Individual: a cover step, then one item at a time, forward only.
//! - Accordion: any panel can be opened or collapsed from its header.
//!
//! Both modes validate the open item before any transition, and validate
//! every item on submit.

// Re-export all types from listening-survey-types
pub use listening_survey_types::*;

mod panel;
pub use panel::{OpenedPanel, PanelAction, PanelChange};

mod controller;
pub use controller::{Mode, SubmitOutcome, SubmitState, Submission, SurveyController};

mod page;
pub use page::SurveyPage;

// Test doubles for driving surveys without a respondent
mod test_backend;
pub use test_backend::{ManualClock, RecordingDialog, RecordingSubmitter, StaticLoader};
