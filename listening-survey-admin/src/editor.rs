use std::fmt;

use listening_survey_types::{AudioFile, Item, ItemKind, SurveyControl};
use tracing::debug;

use crate::AdminError;

/// Where an audio sits inside an example.
///
/// Editors address audios by a signed index where `-1` is the reference
/// audio and `0..` are the samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioSlot {
    Reference,
    Sample(usize),
}

impl AudioSlot {
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            -1 => Some(Self::Reference),
            i if i >= 0 => usize::try_from(i).ok().map(Self::Sample),
            _ => None,
        }
    }

    pub fn index(self) -> i64 {
        match self {
            Self::Reference => -1,
            Self::Sample(i) => i64::try_from(i).unwrap_or(i64::MAX),
        }
    }
}

impl fmt::Display for AudioSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => f.write_str("reference"),
            Self::Sample(i) => write!(f, "sample {i}"),
        }
    }
}

/// Mutable view of the parts every example kind shares.
struct ExampleParts<'a> {
    audio_ref: &'a mut Option<AudioFile>,
    audios: &'a mut Vec<AudioFile>,
    fields: &'a mut Vec<SurveyControl>,
    tags: Option<&'a mut Vec<String>>,
    choice: Option<&'a mut Option<usize>>,
}

impl<'a> ExampleParts<'a> {
    fn of(kind: &'a mut ItemKind) -> Option<Self> {
        match kind {
            ItemKind::Question { .. } => None,
            ItemKind::AcrExample { example } => Some(Self {
                audio_ref: &mut example.audio_ref,
                audios: &mut example.audios,
                fields: &mut example.fields,
                tags: Some(&mut example.tags),
                choice: None,
            }),
            ItemKind::AbExample { example } => Some(Self {
                audio_ref: &mut example.audio_ref,
                audios: &mut example.audios,
                fields: &mut example.fields,
                tags: Some(&mut example.tags),
                choice: Some(&mut example.choice),
            }),
            ItemKind::Training { example } => Some(Self {
                audio_ref: &mut example.audio_ref,
                audios: &mut example.audios,
                fields: &mut example.fields,
                tags: None,
                choice: None,
            }),
        }
    }
}

/// The item list of a test being edited.
#[derive(Debug, Clone, Default)]
pub struct TestEditor {
    items: Vec<Item>,
}

impl TestEditor {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove an item, returning it.
    pub fn delete_item(&mut self, index: usize) -> Result<Item, AdminError> {
        if index >= self.items.len() {
            return Err(AdminError::UnknownItem(index));
        }
        let item = self.items.remove(index);
        debug!(index, item = %item.id, "item deleted");
        Ok(item)
    }

    pub fn set_title(&mut self, index: usize, title: impl Into<String>) -> Result<(), AdminError> {
        self.item_mut(index)?.title = title.into();
        Ok(())
    }

    /// Replace the control of a question item.
    pub fn set_question(&mut self, index: usize, question: SurveyControl) -> Result<(), AdminError> {
        match self.item_mut(index)?.kind_mut() {
            ItemKind::Question { control } => {
                *control = question;
                Ok(())
            }
            _ => Err(AdminError::NotAQuestion(index)),
        }
    }

    /// Add an audio to an example. A reference replaces the current one;
    /// samples are appended.
    pub fn add_audio(&mut self, index: usize, audio: AudioFile, reference: bool) -> Result<(), AdminError> {
        let parts = self.example(index)?;
        if reference {
            *parts.audio_ref = Some(audio);
        } else {
            parts.audios.push(audio);
        }
        Ok(())
    }

    /// Swap the audio in `slot` for another upload.
    pub fn replace_audio(&mut self, index: usize, slot: AudioSlot, audio: AudioFile) -> Result<(), AdminError> {
        let parts = self.example(index)?;
        let target = match slot {
            AudioSlot::Reference => parts.audio_ref.as_mut(),
            AudioSlot::Sample(i) => parts.audios.get_mut(i),
        };
        let target = target.ok_or(AdminError::NoSuchAudio { item: index, slot })?;
        *target = audio;
        Ok(())
    }

    /// Remove the audio in `slot`. A recorded AB choice keeps pointing at
    /// the same sample, or is cleared if that sample was removed.
    pub fn delete_audio(&mut self, index: usize, slot: AudioSlot) -> Result<AudioFile, AdminError> {
        let parts = self.example(index)?;
        let missing = AdminError::NoSuchAudio { item: index, slot };
        match slot {
            AudioSlot::Reference => parts.audio_ref.take().ok_or(missing),
            AudioSlot::Sample(i) => {
                if i >= parts.audios.len() {
                    return Err(missing);
                }
                if let Some(choice) = parts.choice {
                    *choice = match *choice {
                        Some(c) if c == i => None,
                        Some(c) if c > i => Some(c - 1),
                        other => other,
                    };
                }
                Ok(parts.audios.remove(i))
            }
        }
    }

    /// Replace the tag list of an example. Training items carry no tags.
    pub fn set_tags(&mut self, index: usize, tags: Vec<String>) -> Result<(), AdminError> {
        let parts = self.example(index)?;
        let current = parts.tags.ok_or(AdminError::NoTags(index))?;
        *current = tags;
        Ok(())
    }

    /// Replace one of the questions asked alongside an example.
    pub fn set_field(&mut self, index: usize, field: usize, control: SurveyControl) -> Result<(), AdminError> {
        let parts = self.example(index)?;
        let target = parts
            .fields
            .get_mut(field)
            .ok_or(AdminError::NoSuchField { item: index, field })?;
        *target = control;
        Ok(())
    }

    pub fn add_field(&mut self, index: usize, control: SurveyControl) -> Result<(), AdminError> {
        self.example(index)?.fields.push(control);
        Ok(())
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut Item, AdminError> {
        self.items.get_mut(index).ok_or(AdminError::UnknownItem(index))
    }

    fn example(&mut self, index: usize) -> Result<ExampleParts<'_>, AdminError> {
        ExampleParts::of(self.item_mut(index)?.kind_mut()).ok_or(AdminError::NotAnExample(index))
    }
}
