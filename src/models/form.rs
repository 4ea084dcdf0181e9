//! Create-or-edit form mode
//!
//! Every entity editor works in one of two modes. Keeping the mode explicit
//! means the write path never has to guess from half-filled fields whether a
//! record is new.

/// Whether a form submission creates a record or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode<Id> {
    Creating,
    Editing(Id),
}

impl<Id> FormMode<Id> {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    /// The id being edited, if any
    pub fn editing_id(&self) -> Option<&Id> {
        match self {
            Self::Creating => None,
            Self::Editing(id) => Some(id),
        }
    }
}

impl<Id> From<Option<Id>> for FormMode<Id> {
    fn from(id: Option<Id>) -> Self {
        match id {
            Some(id) => Self::Editing(id),
            None => Self::Creating,
        }
    }
}
