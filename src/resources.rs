//! Style resources.
//!
//! A [`ResourceDictionary`] maps resource keys to resolved values. Renderers
//! read them through [`StyleResources`], which looks a key up in the host's
//! override dictionary first and falls back to the built-in defaults.
//!
//! The action sentiment dictionary is derived from [`HostConfig`] whenever the
//! configuration is replaced; see [`action_sentiment`].

use alloc::sync::Arc;
use std::collections::HashMap;

use watercard_core::{
    Color, ConfigError, HostConfig,
    element::{ContainerStyle, ForegroundColor},
};

/// Keys of the action sentiment dictionary.
pub mod keys {
    /// Background of positive buttons.
    pub const POSITIVE_BACKGROUND: &str = "Adaptive.Action.Positive.Button.Static.Background";
    /// Background of positive buttons under the pointer.
    pub const POSITIVE_HOVER_BACKGROUND: &str =
        "Adaptive.Action.Positive.Button.MouseOver.Background";
    /// Foreground of destructive buttons.
    pub const DESTRUCTIVE_FOREGROUND: &str = "Adaptive.Action.Destructive.Button.Foreground";
    /// Foreground of destructive buttons under the pointer.
    pub const DESTRUCTIVE_HOVER_FOREGROUND: &str =
        "Adaptive.Action.Destructive.Button.MouseOver.Foreground";

    /// Corner radius of the card surface.
    pub const CARD_CORNER_RADIUS: &str = "Adaptive.Card.CornerRadius";
    /// Background of neutral buttons.
    pub const BUTTON_BACKGROUND: &str = "Adaptive.Action.Button.Background";
    /// Foreground of neutral buttons.
    pub const BUTTON_FOREGROUND: &str = "Adaptive.Action.Button.Foreground";
    /// Corner radius of buttons.
    pub const BUTTON_CORNER_RADIUS: &str = "Adaptive.Action.Button.CornerRadius";
    /// Border of input controls.
    pub const INPUT_BORDER: &str = "Adaptive.Input.Border";
    /// Minimum height of input controls.
    pub const INPUT_MIN_HEIGHT: &str = "Adaptive.Input.MinHeight";
}

/// A resolved style value.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    /// Solid color brush.
    Brush(Color),
    /// Length or other scalar.
    Number(f64),
    /// Free-form text, e.g. a font family.
    Text(String),
}

impl Resource {
    /// Returns the brush color, if this is a brush.
    #[must_use]
    pub const fn as_brush(&self) -> Option<Color> {
        match self {
            Self::Brush(color) => Some(*color),
            _ => None,
        }
    }

    /// Returns the number, if this is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }
}

/// Mapping from resource key to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceDictionary {
    entries: HashMap<String, Resource>,
}

impl ResourceDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: Resource) -> Option<Resource> {
        self.entries.insert(key.into(), value)
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Resource) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Resource> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resource)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the dictionary is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Resource)> for ResourceDictionary {
    fn from_iter<I: IntoIterator<Item = (K, Resource)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(key, value)| (key.into(), value)).collect(),
        }
    }
}

/// The built-in style resources.
#[must_use]
pub fn default_resources() -> ResourceDictionary {
    ResourceDictionary::new()
        .with(keys::CARD_CORNER_RADIUS, Resource::Number(4.0))
        .with(
            keys::BUTTON_BACKGROUND,
            Resource::Brush(Color::from_hex("#FFF3F3F3")),
        )
        .with(
            keys::BUTTON_FOREGROUND,
            Resource::Brush(Color::from_hex("#FF000000")),
        )
        .with(keys::BUTTON_CORNER_RADIUS, Resource::Number(2.0))
        .with(keys::INPUT_BORDER, Resource::Brush(Color::from_hex("#FF8A8A8A")))
        .with(keys::INPUT_MIN_HEIGHT, Resource::Number(32.0))
}

/// Effective style resources: an optional override chained in front of the
/// defaults.
#[derive(Debug, Clone)]
pub struct StyleResources {
    overrides: Option<Arc<ResourceDictionary>>,
    defaults: Arc<ResourceDictionary>,
}

impl Default for StyleResources {
    fn default() -> Self {
        Self::new(Arc::new(default_resources()))
    }
}

impl StyleResources {
    /// Creates a set with no overrides.
    #[must_use]
    pub const fn new(defaults: Arc<ResourceDictionary>) -> Self {
        Self {
            overrides: None,
            defaults,
        }
    }

    /// Returns a copy whose lookups consult `overrides` first.
    #[must_use]
    pub fn with_overrides(&self, overrides: Option<Arc<ResourceDictionary>>) -> Self {
        Self {
            overrides,
            defaults: Arc::clone(&self.defaults),
        }
    }

    /// Looks `key` up in the overrides, then in the defaults.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Resource> {
        self.overrides
            .as_deref()
            .and_then(|overrides| overrides.get(key))
            .or_else(|| self.defaults.get(key))
    }

    /// Looks up a brush.
    #[must_use]
    pub fn brush(&self, key: &str) -> Option<Color> {
        self.get(key).and_then(Resource::as_brush)
    }

    /// Returns the override dictionary, if one is set.
    #[must_use]
    pub fn overrides(&self) -> Option<&Arc<ResourceDictionary>> {
        self.overrides.as_ref()
    }

    /// Returns the default dictionary.
    #[must_use]
    pub const fn defaults(&self) -> &Arc<ResourceDictionary> {
        &self.defaults
    }
}

/// Derives the action sentiment brushes from `host_config`.
///
/// Positive buttons use the accent color, destructive buttons the attention
/// color; hover variants are the same colors made [lighter](Color::lighter).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidColor`] if the accent or attention color
/// cannot be parsed.
pub fn action_sentiment(host_config: &HostConfig) -> Result<ResourceDictionary, ConfigError> {
    let accent =
        host_config.foreground_color(ForegroundColor::Accent, ContainerStyle::Default, false)?;
    let attention =
        host_config.foreground_color(ForegroundColor::Attention, ContainerStyle::Default, false)?;

    Ok(ResourceDictionary::new()
        .with(keys::POSITIVE_BACKGROUND, Resource::Brush(accent))
        .with(keys::POSITIVE_HOVER_BACKGROUND, Resource::Brush(accent.lighter()))
        .with(keys::DESTRUCTIVE_FOREGROUND, Resource::Brush(attention))
        .with(
            keys::DESTRUCTIVE_HOVER_FOREGROUND,
            Resource::Brush(attention.lighter()),
        ))
}
