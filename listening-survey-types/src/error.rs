use crate::TestKind;

/// Error type for survey controller operations.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// An item failed validation; a blocking dialog has already been shown.
    #[error("{title}: {message}")]
    Invalid { title: String, message: String },

    /// The survey was opened for review and cannot be submitted.
    #[error("Survey is read-only")]
    ReadOnly,

    /// A submission is still outstanding.
    #[error("A submission is already in flight")]
    InFlight,

    /// A result was reported but no submission is outstanding.
    #[error("No submission is in flight")]
    NothingInFlight,

    /// In individual mode, submitting is only offered on the last item.
    #[error("Submit is only available on the last item")]
    NotAtLastItem,

    /// The survey was accepted by the submitter already.
    #[error("Survey has already been submitted")]
    AlreadySubmitted,

    /// A panel was requested that does not exist.
    #[error("No item at index {0}")]
    NoSuchItem(usize),

    /// The submitter refused the payload. The survey stays open for a retry.
    #[error("Submission rejected: {0}")]
    Rejected(#[from] SubmitError),

    /// A renderer or another collaborator failed.
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl SurveyError {
    /// Wrap a collaborator failure.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// Check if this error can be fixed by the respondent and retried.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Invalid { .. } | Self::Rejected(_))
    }
}

/// Error returned by a [`Loader`](crate::Loader).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("No {kind} with id '{id}'")]
    NotFound { kind: TestKind, id: String },

    #[error("Malformed questionnaire: {0}")]
    Malformed(String),

    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Error returned by a [`Submitter`](crate::Submitter).
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The receiving side answered but refused the response.
    #[error("{0}")]
    Refused(String),

    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}
