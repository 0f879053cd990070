use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Color used for any category outside the fixed palette.
pub(crate) const DEFAULT_COLOR: &str = "#95A5A6";
/// Emoji used for any category outside the fixed palette.
pub(crate) const DEFAULT_EMOJI: &str = "💰";

/// Custom labels compare case-insensitively, so "Family" and "family" are the
/// same category for filters and rollups. The first spelling seen is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub(crate) enum Category {
    Food,
    Transport,
    Rent,
    Education,
    Entertainment,
    Bills,
    Shopping,
    Health,
    Other,
    Uncategorized,
    /// A label outside the fixed vocabulary, e.g. "Family" on income.
    Custom(String),
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => a.to_lowercase() == b.to_lowercase(),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        if let Self::Custom(label) = self {
            label.to_lowercase().hash(state);
        }
    }
}

impl Category {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Rent => "Rent",
            Self::Education => "Education",
            Self::Entertainment => "Entertainment",
            Self::Bills => "Bills",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Other => "Other",
            Self::Uncategorized => "Uncategorized",
            Self::Custom(label) => label,
        }
    }

    /// Parse a display label. Matching is case-insensitive; anything outside
    /// the vocabulary is kept verbatim as `Custom`.
    pub(crate) fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "food" => Self::Food,
            "transport" => Self::Transport,
            "rent" => Self::Rent,
            "education" => Self::Education,
            "entertainment" | "fun" => Self::Entertainment,
            "bills" => Self::Bills,
            "shopping" => Self::Shopping,
            "health" => Self::Health,
            "other" => Self::Other,
            "" | "uncategorized" => Self::Uncategorized,
            _ => Self::Custom(trimmed.to_string()),
        }
    }

    /// Resolve a form chip id (`"food"`, `"entertainment"`, ...). Unknown ids
    /// land in `Other`, matching what the add-transaction form records.
    pub(crate) fn from_form_id(id: &str) -> Self {
        Self::all()
            .iter()
            .find(|c| c.form_id() == Some(id.trim()))
            .cloned()
            .unwrap_or(Self::Other)
    }

    pub(crate) fn form_id(&self) -> Option<&'static str> {
        match self {
            Self::Food => Some("food"),
            Self::Transport => Some("transport"),
            Self::Rent => Some("rent"),
            Self::Education => Some("education"),
            Self::Entertainment => Some("entertainment"),
            Self::Bills => Some("bills"),
            Self::Shopping => Some("shopping"),
            Self::Health => Some("health"),
            Self::Other => Some("other"),
            Self::Uncategorized | Self::Custom(_) => None,
        }
    }

    /// The selectable vocabulary, in form order.
    pub(crate) fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::Rent,
            Self::Education,
            Self::Entertainment,
            Self::Bills,
            Self::Shopping,
            Self::Health,
            Self::Other,
        ]
    }

    pub(crate) fn color(&self) -> &'static str {
        match self {
            Self::Food => "#FF8042",
            Self::Transport => "#0088FE",
            Self::Rent => "#00C49F",
            Self::Education => "#8884D8",
            Self::Entertainment => "#FFBB28",
            Self::Bills => "#82CA9D",
            Self::Shopping => "#FFC658",
            Self::Health => "#FF6B6B",
            Self::Other | Self::Uncategorized | Self::Custom(_) => DEFAULT_COLOR,
        }
    }

    pub(crate) fn emoji(&self) -> &'static str {
        match self {
            Self::Food => "🍕",
            Self::Transport => "🚗",
            Self::Rent => "🏠",
            Self::Education => "📚",
            Self::Entertainment => "🎬",
            Self::Bills => "📄",
            Self::Shopping => "🛒",
            Self::Health => "💊",
            Self::Uncategorized => "❓",
            Self::Other | Self::Custom(_) => DEFAULT_EMOJI,
        }
    }

    pub(crate) fn is_uncategorized(&self) -> bool {
        matches!(self, Self::Uncategorized)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}
