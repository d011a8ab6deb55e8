//! Category enum representing the four prompt domains.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The generative tool family a prompt is written for.
///
/// Selects both the elicitation text shown to the user and the system
/// instruction sent to the completion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Image,
    Code,
    Video,
    Text,
}

impl Category {
    /// Returns all categories in menu order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Image,
            Category::Code,
            Category::Video,
            Category::Text,
        ]
    }

    /// Returns the stable identifier used in button payloads and history.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Image => "image",
            Category::Code => "code",
            Category::Video => "video",
            Category::Text => "text",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Image => "Image",
            Category::Code => "Code",
            Category::Video => "Video",
            Category::Text => "Text",
        }
    }

    /// Returns the emoji shown next to the category in menus.
    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Image => "🖼",
            Category::Code => "💻",
            Category::Video => "🎬",
            Category::Text => "✍️",
        }
    }

    /// Returns the button label, emoji included.
    pub fn button_label(&self) -> String {
        format!("{} {}", self.emoji(), self.display_name())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("category", format!("unknown value '{}'", s)))
    }
}
