//! Host configuration: the styling and behavior settings a host applies to
//! every card it renders.
//!
//! The schema follows the Adaptive Cards host config JSON (camelCase keys).
//! Every section is defaulted, so a partial document only overrides what it
//! names. Colors stay strings until they are resolved, which is where a bad
//! value surfaces as a [`ConfigError`].

use serde::Deserialize;
use watercard_color::{Color, ColorError};

use crate::element::{ContainerStyle, ForegroundColor, ImageSize, Spacing, TextSize, TextWeight};

/// Errors produced while loading or resolving host configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The host config JSON could not be read.
    #[error("invalid host config JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A color entry could not be parsed.
    #[error("invalid color at `{path}`: {source}")]
    InvalidColor {
        /// Dotted JSON path of the offending entry.
        path: String,
        /// Underlying parse failure.
        source: ColorError,
    },
}

/// Top-level host configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostConfig {
    /// Font family used for all text.
    pub font_family: String,
    /// Whether actions and inputs are rendered.
    pub supports_interactivity: bool,
    /// Point sizes per [`TextSize`].
    pub font_sizes: FontSizesConfig,
    /// Weights per [`TextWeight`].
    pub font_weights: FontWeightsConfig,
    /// Pixel spacing per [`Spacing`].
    pub spacing: SpacingConfig,
    /// Separator line appearance.
    pub separator: SeparatorConfig,
    /// Colors per container style.
    pub container_styles: ContainerStylesConfig,
    /// Pixel sizes per [`ImageSize`].
    pub image_sizes: ImageSizesConfig,
    /// Image set defaults.
    pub image_set: ImageSetConfig,
    /// Fact set text styling.
    pub fact_set: FactSetConfig,
    /// Action bar settings.
    pub actions: ActionsConfig,
    /// Media element settings.
    pub media: MediaConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            font_family: "Segoe UI".to_owned(),
            supports_interactivity: true,
            font_sizes: FontSizesConfig::default(),
            font_weights: FontWeightsConfig::default(),
            spacing: SpacingConfig::default(),
            separator: SeparatorConfig::default(),
            container_styles: ContainerStylesConfig::default(),
            image_sizes: ImageSizesConfig::default(),
            image_set: ImageSetConfig::default(),
            fact_set: FactSetConfig::default(),
            actions: ActionsConfig::default(),
            media: MediaConfig::default(),
        }
    }
}

impl HostConfig {
    /// Reads a host config from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the text is not a valid host config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves a semantic foreground color.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidColor`] if the configured value is not a
    /// hex color.
    pub fn foreground_color(
        &self,
        color: ForegroundColor,
        style: ContainerStyle,
        subtle: bool,
    ) -> Result<Color, ConfigError> {
        let definition = self.container_styles.get(style).foreground_colors.get(color);
        let (raw, variant) = if subtle {
            (&definition.subtle, "subtle")
        } else {
            (&definition.default, "default")
        };
        parse_color(raw, || {
            format!(
                "containerStyles.{style}.foregroundColors.{color}.{variant}"
            )
        })
    }

    /// Resolves the background color of a container style.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidColor`] if the configured value is not a
    /// hex color.
    pub fn background_color(&self, style: ContainerStyle) -> Result<Color, ConfigError> {
        parse_color(&self.container_styles.get(style).background_color, || {
            format!("containerStyles.{style}.backgroundColor")
        })
    }

    /// Resolves the separator line color.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidColor`] if the configured value is not a
    /// hex color.
    pub fn separator_color(&self) -> Result<Color, ConfigError> {
        parse_color(&self.separator.line_color, || "separator.lineColor".to_owned())
    }
}

fn parse_color(raw: &str, path: impl FnOnce() -> String) -> Result<Color, ConfigError> {
    Color::try_from_hex(raw).map_err(|source| ConfigError::InvalidColor {
        path: path(),
        source,
    })
}

/// Point sizes per [`TextSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct FontSizesConfig {
    pub small: u32,
    pub default: u32,
    pub medium: u32,
    pub large: u32,
    pub extra_large: u32,
}

impl Default for FontSizesConfig {
    fn default() -> Self {
        Self {
            small: 12,
            default: 14,
            medium: 17,
            large: 21,
            extra_large: 26,
        }
    }
}

impl FontSizesConfig {
    /// Returns the point size for `size`.
    #[must_use]
    pub const fn resolve(&self, size: TextSize) -> u32 {
        match size {
            TextSize::Small => self.small,
            TextSize::Default => self.default,
            TextSize::Medium => self.medium,
            TextSize::Large => self.large,
            TextSize::ExtraLarge => self.extra_large,
        }
    }
}

/// Numeric weights per [`TextWeight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct FontWeightsConfig {
    pub lighter: u16,
    pub default: u16,
    pub bolder: u16,
}

impl Default for FontWeightsConfig {
    fn default() -> Self {
        Self {
            lighter: 200,
            default: 400,
            bolder: 600,
        }
    }
}

impl FontWeightsConfig {
    /// Returns the numeric weight for `weight`.
    #[must_use]
    pub const fn resolve(&self, weight: TextWeight) -> u16 {
        match weight {
            TextWeight::Lighter => self.lighter,
            TextWeight::Default => self.default,
            TextWeight::Bolder => self.bolder,
        }
    }
}

/// Pixel spacing per [`Spacing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct SpacingConfig {
    pub small: u32,
    pub default: u32,
    pub medium: u32,
    pub large: u32,
    pub extra_large: u32,
    pub padding: u32,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            small: 3,
            default: 8,
            medium: 20,
            large: 30,
            extra_large: 40,
            padding: 15,
        }
    }
}

impl SpacingConfig {
    /// Returns the pixel spacing for `spacing`.
    #[must_use]
    pub const fn resolve(&self, spacing: Spacing) -> u32 {
        match spacing {
            Spacing::None => 0,
            Spacing::Small => self.small,
            Spacing::Default => self.default,
            Spacing::Medium => self.medium,
            Spacing::Large => self.large,
            Spacing::ExtraLarge => self.extra_large,
            Spacing::Padding => self.padding,
        }
    }
}

/// Separator line appearance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeparatorConfig {
    /// Line thickness in pixels.
    pub line_thickness: u32,
    /// Line color as `#AARRGGBB`.
    pub line_color: String,
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            line_thickness: 1,
            line_color: "#B2000000".to_owned(),
        }
    }
}

/// Color definitions for every container style.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerStylesConfig {
    /// Colors for [`ContainerStyle::Default`].
    pub default: ContainerStyleDefinition,
    /// Colors for [`ContainerStyle::Emphasis`].
    pub emphasis: ContainerStyleDefinition,
}

impl Default for ContainerStylesConfig {
    fn default() -> Self {
        Self {
            default: ContainerStyleDefinition::default(),
            emphasis: ContainerStyleDefinition {
                background_color: "#08000000".to_owned(),
                foreground_colors: ForegroundColorsConfig::default(),
            },
        }
    }
}

impl ContainerStylesConfig {
    /// Returns the definition for `style`.
    #[must_use]
    pub const fn get(&self, style: ContainerStyle) -> &ContainerStyleDefinition {
        match style {
            ContainerStyle::Default => &self.default,
            ContainerStyle::Emphasis => &self.emphasis,
        }
    }
}

/// Colors of one container style.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerStyleDefinition {
    /// Background as `#AARRGGBB`.
    pub background_color: String,
    /// Foreground palette.
    pub foreground_colors: ForegroundColorsConfig,
}

impl Default for ContainerStyleDefinition {
    fn default() -> Self {
        Self {
            background_color: "#FFFFFFFF".to_owned(),
            foreground_colors: ForegroundColorsConfig::default(),
        }
    }
}

/// Foreground palette with one entry per [`ForegroundColor`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ForegroundColorsConfig {
    pub default: ColorConfig,
    pub dark: ColorConfig,
    pub light: ColorConfig,
    pub accent: ColorConfig,
    pub good: ColorConfig,
    pub warning: ColorConfig,
    pub attention: ColorConfig,
}

impl Default for ForegroundColorsConfig {
    fn default() -> Self {
        Self {
            default: ColorConfig::new("#FF000000", "#B2000000"),
            dark: ColorConfig::new("#FF101010", "#B2101010"),
            light: ColorConfig::new("#FFFFFFFF", "#B2FFFFFF"),
            accent: ColorConfig::new("#FF0000FF", "#B20000FF"),
            good: ColorConfig::new("#FF008000", "#B2008000"),
            warning: ColorConfig::new("#FFFFD700", "#B2FFD700"),
            attention: ColorConfig::new("#FF8B0000", "#B28B0000"),
        }
    }
}

impl ForegroundColorsConfig {
    /// Returns the entry for `color`.
    #[must_use]
    pub const fn get(&self, color: ForegroundColor) -> &ColorConfig {
        match color {
            ForegroundColor::Default => &self.default,
            ForegroundColor::Dark => &self.dark,
            ForegroundColor::Light => &self.light,
            ForegroundColor::Accent => &self.accent,
            ForegroundColor::Good => &self.good,
            ForegroundColor::Warning => &self.warning,
            ForegroundColor::Attention => &self.attention,
        }
    }
}

/// A color with its subtle variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorConfig {
    /// Regular color as `#AARRGGBB`.
    pub default: String,
    /// Subtle color as `#AARRGGBB`.
    pub subtle: String,
}

impl ColorConfig {
    /// Creates an entry from two hex strings.
    pub fn new(default: impl Into<String>, subtle: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            subtle: subtle.into(),
        }
    }
}

/// Pixel sizes per [`ImageSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ImageSizesConfig {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
}

impl Default for ImageSizesConfig {
    fn default() -> Self {
        Self {
            small: 40,
            medium: 80,
            large: 160,
        }
    }
}

impl ImageSizesConfig {
    /// Returns the fixed pixel size for `size`, or `None` for sizes that follow
    /// the image or its container.
    #[must_use]
    pub const fn resolve(&self, size: ImageSize) -> Option<u32> {
        match size {
            ImageSize::Small => Some(self.small),
            ImageSize::Medium => Some(self.medium),
            ImageSize::Large => Some(self.large),
            ImageSize::Auto | ImageSize::Stretch => None,
        }
    }
}

/// Image set defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageSetConfig {
    /// Size applied to images that do not set one.
    pub image_size: ImageSize,
    /// Upper bound for image height.
    pub max_image_height: u32,
}

impl Default for ImageSetConfig {
    fn default() -> Self {
        Self {
            image_size: ImageSize::Medium,
            max_image_height: 100,
        }
    }
}

/// Fact set styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FactSetConfig {
    /// Styling of fact titles.
    pub title: FactTextConfig,
    /// Styling of fact values.
    pub value: FactTextConfig,
    /// Horizontal gap between title and value.
    pub spacing: u32,
}

impl Default for FactSetConfig {
    fn default() -> Self {
        Self {
            title: FactTextConfig {
                weight: TextWeight::Bolder,
                max_width: Some(150),
                ..FactTextConfig::default()
            },
            value: FactTextConfig::default(),
            spacing: 10,
        }
    }
}

/// Text styling for one fact column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct FactTextConfig {
    pub size: TextSize,
    pub weight: TextWeight,
    pub color: ForegroundColor,
    pub is_subtle: bool,
    pub wrap: bool,
    pub max_width: Option<u32>,
}

impl Default for FactTextConfig {
    fn default() -> Self {
        Self {
            size: TextSize::Default,
            weight: TextWeight::Default,
            color: ForegroundColor::Default,
            is_subtle: false,
            wrap: true,
            max_width: None,
        }
    }
}

/// Action bar settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionsConfig {
    /// Maximum number of actions rendered; the rest are dropped with a warning.
    pub max_actions: u32,
    /// Gap between buttons.
    pub button_spacing: u32,
    /// Spacing above the action bar.
    pub spacing: Spacing,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            max_actions: 5,
            button_spacing: 10,
            spacing: Spacing::Default,
        }
    }
}

/// Media element settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaConfig {
    /// Poster shown when a media element does not declare one.
    pub default_poster: Option<String>,
    /// Whether media may play inside the card.
    pub allow_inline_playback: bool,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            default_poster: None,
            allow_inline_playback: true,
        }
    }
}
