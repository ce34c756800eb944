//! Resource registry.
//!
//! The browsable collections are a closed set of three, so their
//! definitions live in a compile-time table rather than anything loaded at
//! runtime: key, label, request path, and the columns the result table
//! renders. Styling tables for character status and gender live here too
//! so every view colors values the same way.

use ratatui::style::Color;

/// The three browsable collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Character,
    Location,
    Episode,
}

impl ResourceKind {
    /// All kinds, in tab order.
    pub const ALL: [ResourceKind; 3] = [Self::Character, Self::Location, Self::Episode];

    /// Static definition backing this kind.
    pub fn def(self) -> &'static ResourceDef {
        match self {
            Self::Character => &CHARACTERS,
            Self::Location => &LOCATIONS,
            Self::Episode => &EPISODES,
        }
    }

    /// Only the character endpoint accepts a name filter.
    pub fn supports_search(self) -> bool {
        matches!(self, Self::Character)
    }

    /// Look up a kind by its registry key. Used by the command box.
    pub fn from_key(key: &str) -> Option<ResourceKind> {
        Self::ALL.into_iter().find(|kind| kind.def().key == key)
    }
}

/// How a column's raw value is turned into a styled cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnStyle {
    /// Plain text.
    Text,
    /// Indicator dot colored from the status table.
    Status,
    /// Symbol from the gender icon table.
    Gender,
    /// Length of the array at the column path.
    Count,
}

/// One column of the result table.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub header: &'static str,
    /// Dot-notation path into the result item.
    pub json_path: &'static str,
    /// Relative width in percent. Columns of a resource sum to 100.
    pub width: u16,
    pub style: ColumnStyle,
}

/// Definition of one browsable resource.
#[derive(Debug)]
pub struct ResourceDef {
    pub kind: ResourceKind,
    /// Registry key, doubles as the command-box name.
    pub key: &'static str,
    pub display_name: &'static str,
    /// Singular label, used by the detail view title.
    pub singular: &'static str,
    pub icon: &'static str,
    /// Path segment under the API base URL.
    pub path: &'static str,
    pub columns: &'static [ColumnDef],
}

pub static CHARACTERS: ResourceDef = ResourceDef {
    kind: ResourceKind::Character,
    key: "characters",
    display_name: "Characters",
    singular: "Character",
    icon: "👤",
    path: "character",
    columns: &[
        ColumnDef { header: "Name", json_path: "name", width: 24, style: ColumnStyle::Text },
        ColumnDef { header: "Status", json_path: "status", width: 12, style: ColumnStyle::Status },
        ColumnDef { header: "Species", json_path: "species", width: 14, style: ColumnStyle::Text },
        ColumnDef { header: "Gender", json_path: "gender", width: 10, style: ColumnStyle::Gender },
        ColumnDef { header: "Origin", json_path: "origin.name", width: 20, style: ColumnStyle::Text },
        ColumnDef { header: "Last location", json_path: "location.name", width: 20, style: ColumnStyle::Text },
    ],
};

pub static LOCATIONS: ResourceDef = ResourceDef {
    kind: ResourceKind::Location,
    key: "locations",
    display_name: "Locations",
    singular: "Location",
    icon: "🌍",
    path: "location",
    columns: &[
        ColumnDef { header: "Name", json_path: "name", width: 28, style: ColumnStyle::Text },
        ColumnDef { header: "Type", json_path: "type", width: 22, style: ColumnStyle::Text },
        ColumnDef { header: "Dimension", json_path: "dimension", width: 30, style: ColumnStyle::Text },
        ColumnDef { header: "Residents", json_path: "residents", width: 20, style: ColumnStyle::Count },
    ],
};

pub static EPISODES: ResourceDef = ResourceDef {
    kind: ResourceKind::Episode,
    key: "episodes",
    display_name: "Episodes",
    singular: "Episode",
    icon: "📺",
    path: "episode",
    columns: &[
        ColumnDef { header: "Name", json_path: "name", width: 38, style: ColumnStyle::Text },
        ColumnDef { header: "Air date", json_path: "air_date", width: 22, style: ColumnStyle::Text },
        ColumnDef { header: "Episode", json_path: "episode", width: 16, style: ColumnStyle::Text },
        ColumnDef { header: "Characters", json_path: "characters", width: 24, style: ColumnStyle::Count },
    ],
};

/// Status indicator colors, matched case-insensitively.
const STATUS_COLORS: &[(&str, Color)] = &[
    ("alive", Color::Green),
    ("dead", Color::Red),
    ("unknown", Color::DarkGray),
];

/// Color for a character status value. Values outside the table get the
/// "unknown" styling.
pub fn status_color(status: &str) -> Color {
    STATUS_COLORS
        .iter()
        .find(|(value, _)| value.eq_ignore_ascii_case(status))
        .map(|(_, color)| *color)
        .unwrap_or(Color::DarkGray)
}

/// Gender symbols, matched case-insensitively.
const GENDER_ICONS: &[(&str, &str)] = &[
    ("female", "♀"),
    ("male", "♂"),
    ("genderless", "⚲"),
    ("unknown", "?"),
];

/// Symbol for a character gender value, with "?" for anything unlisted.
pub fn gender_icon(gender: &str) -> &'static str {
    GENDER_ICONS
        .iter()
        .find(|(value, _)| value.eq_ignore_ascii_case(gender))
        .map(|(_, icon)| *icon)
        .unwrap_or("?")
}
