use listening_survey_types::{Loader, Questionnaire, TestKind};
use tracing::{info, warn};

use crate::SurveyController;

/// A survey page: either a session ready to be taken, or the loading error
/// shown in its place.
#[derive(Debug)]
pub enum SurveyPage {
    Ready(SurveyController),
    Failed(String),
}

impl SurveyPage {
    /// Load a questionnaire and start an interactive session.
    ///
    /// Loading is attempted once; a failure is kept as the page's error
    /// message.
    pub fn open(loader: &dyn Loader, kind: TestKind, id: &str) -> Self {
        match loader.load(kind, id) {
            Ok(questionnaire) => {
                info!(%kind, id, items = questionnaire.len(), "questionnaire loaded");
                Self::Ready(SurveyController::interactive(questionnaire, kind))
            }
            Err(err) => {
                warn!(%kind, id, error = %err, "failed to load questionnaire");
                Self::Failed(err.to_string())
            }
        }
    }

    /// Show a submitted response without allowing changes.
    pub fn review(response: Questionnaire) -> Self {
        Self::Ready(SurveyController::read_only(response))
    }

    pub fn controller(&self) -> Option<&SurveyController> {
        match self {
            Self::Ready(controller) => Some(controller),
            Self::Failed(_) => None,
        }
    }

    pub fn controller_mut(&mut self) -> Option<&mut SurveyController> {
        match self {
            Self::Ready(controller) => Some(controller),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Failed(message) => Some(message),
        }
    }

    /// Convert into the controller, or the loading error.
    pub fn into_result(self) -> Result<SurveyController, String> {
        match self {
            Self::Ready(controller) => Ok(controller),
            Self::Failed(message) => Err(message),
        }
    }
}
