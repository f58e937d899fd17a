//! # listening-dialoguer-wizard
//!
//! Dialoguer front-end for listening-survey.
//!
//! Takes a respondent through a [`SurveyController`](listening_survey::SurveyController)
//! in the terminal. Individual surveys are presented step by step in a classic
//! CLI wizard style; accordion surveys get a menu of panel headers.
//!
//! ## Example
//!
//! ```rust,ignore
//! use listening_survey::{SurveyController, TestKind};
//! use listening_dialoguer_wizard::DialoguerBackend;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut survey = SurveyController::interactive(questionnaire, TestKind::AbTest);
//!     let outcome = DialoguerBackend::new().run(&mut survey, &mut submitter)?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{
    DialoguerBackend, DialoguerError, RunOutcome, TerminalDialog, TerminalRenderer, summarize,
};
