/// Declares a keyword enum as used by Adaptive Card JSON.
///
/// Keywords are matched case-insensitively. Unknown keywords fall back to the
/// declared default instead of failing the whole element, mirroring how hosts
/// treat forward-compatible payloads.
///
/// # Usage
///
/// ```ignore
/// keyword_enum! {
///     /// Horizontal alignment of an element.
///     pub enum HorizontalAlignment {
///         Left => "left",
///         Center => "center",
///         Right => "right",
///     }
///     default Left
/// }
/// ```
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl $name {
            /// Returns the JSON keyword for this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }

            /// Parses a keyword, ignoring ASCII case.
            #[must_use]
            pub fn from_keyword(keyword: &str) -> Option<Self> {
                $(
                    if keyword.eq_ignore_ascii_case($text) {
                        return Some(Self::$variant);
                    }
                )+
                None
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let keyword = <String as serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from_keyword(&keyword).unwrap_or_default())
            }
        }
    };
}
