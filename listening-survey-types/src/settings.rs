use serde::{Deserialize, Serialize};

/// Presentation settings of a questionnaire.
///
/// Missing keys resolve to `false` when the questionnaire is deserialized,
/// so callers never have to re-check for absent settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Show one item at a time, forward only, starting from a cover step.
    pub is_individual: bool,

    /// Record the seconds spent on each item.
    pub is_timed: bool,
}

impl Settings {
    /// Settings for an accordion-style, untimed survey.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable individual (one item at a time) presentation.
    pub fn individual(mut self) -> Self {
        self.is_individual = true;
        self
    }

    /// Enable per-item timing.
    pub fn timed(mut self) -> Self {
        self.is_timed = true;
        self
    }
}
