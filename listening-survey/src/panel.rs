/// Which disclosure panel is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OpenedPanel {
    /// Title and description, before the first item (individual mode only).
    Cover,
    /// The item at this index.
    Item(usize),
    /// Every panel collapsed (accordion mode only).
    Closed,
}

impl OpenedPanel {
    /// Index of the open item, if an item is open.
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Item(index) => Some(index),
            Self::Cover | Self::Closed => None,
        }
    }

    /// Index reached by the "Next" action from this panel.
    pub fn successor(self) -> Option<usize> {
        match self {
            Self::Cover => Some(0),
            Self::Item(index) => Some(index + 1),
            Self::Closed => None,
        }
    }

    /// Stepper position: `-1` on the cover, the item index otherwise.
    pub fn step(self) -> Option<i64> {
        match self {
            Self::Cover => Some(-1),
            Self::Item(index) => i64::try_from(index).ok(),
            Self::Closed => None,
        }
    }
}

/// The button in an item's action slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// Move on to the following item.
    Next,
    /// Submit the questionnaire (terminal item only).
    Submit { enabled: bool },
}

/// Result of a panel open/close request.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelChange {
    /// The panel at `to` is now open.
    Opened { from: OpenedPanel, to: usize },
    /// The open panel was collapsed (accordion mode).
    Collapsed { index: Option<usize> },
    /// The open item failed validation; the respondent stays on it.
    Blocked { index: usize, message: String },
    /// Nothing to do (collapse in individual mode, non-forward requests).
    Unchanged,
}

impl PanelChange {
    /// Check if the request moved the survey to another panel.
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Opened { .. } | Self::Collapsed { .. })
    }

    /// Check if validation blocked the request.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}
