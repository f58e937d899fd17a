use serde::{Deserialize, Serialize};

/// A single unit of a questionnaire: one question or one audio example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Identifier, unique within the questionnaire.
    pub id: String,

    /// Header text shown on the item's panel.
    pub title: String,

    /// Seconds spent on this item. Set when the respondent moves on from a
    /// timed item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,

    /// What the item asks for.
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    /// Create a new item.
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            time: None,
            kind,
        }
    }

    /// Create a question item wrapping a single control.
    pub fn question(id: impl Into<String>, title: impl Into<String>, control: SurveyControl) -> Self {
        Self::new(id, title, ItemKind::Question { control })
    }

    /// Get the item kind.
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Get a mutable reference to the item kind.
    pub fn kind_mut(&mut self) -> &mut ItemKind {
        &mut self.kind
    }
}

/// The kind of item, determining how it is rendered and validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ItemKind {
    /// A standalone survey question.
    Question {
        #[serde(rename = "questionControl")]
        control: SurveyControl,
    },

    /// Audio example scored on an absolute category scale.
    AcrExample { example: AcrExample },

    /// Audio example where the respondent picks the preferred sample.
    AbExample { example: AbExample },

    /// Familiarisation example. Nothing is scored, only its fields are asked.
    Training { example: TrainingExample },
}

impl ItemKind {
    /// Questions attached to this item, in presentation order.
    pub fn fields(&self) -> &[SurveyControl] {
        match self {
            Self::Question { control } => std::slice::from_ref(control),
            Self::AcrExample { example } => &example.fields,
            Self::AbExample { example } => &example.fields,
            Self::Training { example } => &example.fields,
        }
    }

    /// Mutable access to the questions attached to this item.
    pub fn fields_mut(&mut self) -> &mut [SurveyControl] {
        match self {
            Self::Question { control } => std::slice::from_mut(control),
            Self::AcrExample { example } => &mut example.fields,
            Self::AbExample { example } => &mut example.fields,
            Self::Training { example } => &mut example.fields,
        }
    }

    /// Check if this item carries audio.
    pub fn is_example(&self) -> bool {
        !matches!(self, Self::Question { .. })
    }
}

/// An uploaded audio file referenced by an example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFile {
    pub filename: String,

    #[serde(default)]
    pub url: String,

    /// Score given by the respondent (ACR examples only).
    #[serde(default, rename = "value", skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl AudioFile {
    pub fn new(filename: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            url: url.into(),
            score: None,
        }
    }
}

/// An ACR example: every audio is scored independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcrExample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_ref: Option<AudioFile>,

    #[serde(default)]
    pub audios: Vec<AudioFile>,

    #[serde(default)]
    pub fields: Vec<SurveyControl>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// An AB example: the respondent chooses one of the audios.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbExample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_ref: Option<AudioFile>,

    #[serde(default)]
    pub audios: Vec<AudioFile>,

    /// Index into `audios` of the preferred sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice: Option<usize>,

    #[serde(default)]
    pub fields: Vec<SurveyControl>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// A training example, played for familiarisation before the scored items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingExample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_ref: Option<AudioFile>,

    #[serde(default)]
    pub audios: Vec<AudioFile>,

    #[serde(default)]
    pub fields: Vec<SurveyControl>,
}

/// The input widget a survey control is answered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    /// Pick exactly one option.
    Radio,
    /// Pick any number of options; stored comma-separated.
    Checkbox,
    /// Free text.
    Text,
    /// Numeric value.
    Slider,
    /// Read-only text, nothing to answer.
    Description,
}

/// A single question control with its current answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyControl {
    #[serde(rename = "type")]
    pub kind: ControlKind,

    pub question: String,

    #[serde(default)]
    pub options: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default = "required_by_default")]
    pub required: bool,
}

fn required_by_default() -> bool {
    true
}

impl SurveyControl {
    /// Create a required control without options.
    pub fn new(kind: ControlKind, question: impl Into<String>) -> Self {
        Self {
            kind,
            question: question.into(),
            options: Vec::new(),
            value: None,
            required: true,
        }
    }

    /// Create a required radio control.
    pub fn radio(question: impl Into<String>, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::new(ControlKind::Radio, question).with_options(options)
    }

    /// Create a required free text control.
    pub fn text(question: impl Into<String>) -> Self {
        Self::new(ControlKind::Text, question)
    }

    /// Set the options.
    pub fn with_options(mut self, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Make the control optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set the answer.
    pub fn answered(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// The answer, if any non-blank value was given.
    pub fn answer(&self) -> Option<&str> {
        self.value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// The selected entries of a checkbox answer.
    pub fn checked(&self) -> impl Iterator<Item = &str> {
        self.answer()
            .into_iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
    }
}
