//! Label model.

use serde::{Deserialize, Serialize};

/// A repository label as attached to an issue.
///
/// GitHub returns full label objects almost everywhere, but some payloads
/// (webhooks, older endpoints) carry bare label names. Both forms decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LabelRepr")]
pub struct Label {
    /// Label ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Label name (e.g., "bug", "priority:high").
    pub name: String,

    /// Hex color without the leading `#`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Label description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether this is one of the repository's default labels.
    pub default: bool,
}

impl Label {
    /// Create a label that carries only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: None,
            description: None,
            default: false,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelRepr {
    Name(String),
    Full {
        #[serde(default)]
        id: Option<u64>,
        name: String,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        default: bool,
    },
}

impl From<LabelRepr> for Label {
    fn from(repr: LabelRepr) -> Self {
        match repr {
            LabelRepr::Name(name) => Label::named(name),
            LabelRepr::Full {
                id,
                name,
                color,
                description,
                default,
            } => Label {
                id,
                name,
                color,
                description,
                default,
            },
        }
    }
}
