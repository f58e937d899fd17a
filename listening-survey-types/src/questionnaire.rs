use serde::{Deserialize, Serialize};

use crate::{Item, Settings};

/// A listening test as presented to a respondent.
///
/// The same structure is loaded from the backend, mutated while the survey
/// is taken, and posted back as the response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    /// Backend identifier of the test, if it has been stored.
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    /// Shown under the name, and on the cover step in individual mode.
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub settings: Settings,

    /// Items in presentation order.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Questionnaire {
    /// Create a new questionnaire with the given items and default settings.
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            settings: Settings::default(),
            items,
        }
    }

    /// Set the backend identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the presentation settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Get the items.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Get a mutable reference to the items.
    pub fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }

    /// Get the item at `index`.
    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Index of the terminal item, which carries the submit action.
    pub fn last_index(&self) -> Option<usize> {
        self.items.len().checked_sub(1)
    }

    /// Check if the questionnaire has any items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
