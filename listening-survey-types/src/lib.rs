//! Core types for the listening-survey crates.
//!
//! This crate provides the foundational types for taking a listening test:
//! - `Questionnaire` and `Settings` - The survey as loaded from the backend
//! - `Item` and `ItemKind` - Individual questions and audio examples
//! - `validate_item` - The default validator used to gate navigation
//! - `Loader`, `Submitter`, `Dialog`, `ItemRenderer` and `Clock` - The
//!   collaborators a survey controller talks to

mod settings;
pub use settings::Settings;

mod test_kind;
pub use test_kind::{ParseTestKindError, TestKind};

mod item;
pub use item::{
    AbExample, AcrExample, AudioFile, ControlKind, Item, ItemKind, SurveyControl, TrainingExample,
};

mod questionnaire;
pub use questionnaire::Questionnaire;

mod validation;
pub use validation::{validate_control, validate_item};

mod error;
pub use error::{LoadError, SubmitError, SurveyError};

mod traits;
pub use traits::{Ack, Clock, Dialog, ItemRenderer, Loader, Submitter, SystemClock, Validator};
