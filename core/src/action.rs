//! Card-level actions.

use serde::Deserialize;
use serde_json::Value;

use crate::element::AdaptiveCard;

keyword_enum! {
    /// Sentiment of an action, used to pick button colors.
    pub enum ActionStyle {
        /// Neutral.
        Default => "default",
        /// Confirms or proceeds.
        Positive => "positive",
        /// Deletes or cancels.
        Destructive => "destructive",
    }
    default Default
}

/// A button attached to a card.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Host-visible identifier.
    pub id: Option<String>,
    /// Button label.
    pub title: String,
    /// Sentiment.
    pub style: ActionStyle,
    /// Optional icon URI.
    pub icon_url: Option<String>,
    /// What happens when the button is pressed.
    pub kind: ActionKind,
}

/// Behavior of an [`Action`].
#[derive(Debug, Clone, PartialEq)]
pub enum ActionKind {
    /// Opens a URL.
    OpenUrl {
        /// Target URL.
        url: String,
    },
    /// Submits the card's inputs along with optional extra data.
    Submit {
        /// Data merged into the submitted payload.
        data: Option<Value>,
    },
    /// Reveals a nested card.
    ShowCard {
        /// The nested card.
        card: Box<AdaptiveCard>,
    },
}

impl Action {
    /// Type identifier of [`ActionKind::OpenUrl`].
    pub const OPEN_URL: &'static str = "Action.OpenUrl";
    /// Type identifier of [`ActionKind::Submit`].
    pub const SUBMIT: &'static str = "Action.Submit";
    /// Type identifier of [`ActionKind::ShowCard`].
    pub const SHOW_CARD: &'static str = "Action.ShowCard";

    /// Creates an action with default style.
    pub fn new(title: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            id: None,
            title: title.into(),
            style: ActionStyle::Default,
            icon_url: None,
            kind,
        }
    }

    /// Returns a copy with the given style.
    #[must_use]
    pub fn with_style(mut self, style: ActionStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns the type identifier of this action.
    #[must_use]
    pub const fn type_id(&self) -> &'static str {
        match self.kind {
            ActionKind::OpenUrl { .. } => Self::OPEN_URL,
            ActionKind::Submit { .. } => Self::SUBMIT,
            ActionKind::ShowCard { .. } => Self::SHOW_CARD,
        }
    }
}

/// Properties shared by every action type, as they appear in JSON.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ActionFields {
    pub id: Option<String>,
    pub title: String,
    pub style: ActionStyle,
    pub icon_url: Option<String>,
    pub url: Option<String>,
    pub data: Option<Value>,
}
