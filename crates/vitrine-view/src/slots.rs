//! Metadata slot resolution for card and list rows.
//!
//! Cards carry up to four configurable metadata positions; the schema
//! evolved from two slots (left/right) to four with optional side-by-side
//! pairing, and both modes remain supported. Identical non-empty choices
//! within a pair collapse to one shown slot, the earlier-indexed slot
//! winning the tie.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use vitrine_core::SortMethod;

use crate::config::EffectiveSettings;
use crate::settings::TimestampSource;

// =============================================================================
// SLOT CHOICES
// =============================================================================

/// What one metadata slot displays.
///
/// The built-in choices have reserved literals (with the `file tags` /
/// `file path` aliases the settings UI historically offered); anything else
/// names a frontmatter property to resolve per card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum MetadataChoice {
    /// Nothing in this slot.
    #[default]
    None,
    /// Formatted timestamp per the active sort method.
    Timestamp,
    /// The note's full tag set.
    Tags,
    /// The note's containing-folder path.
    Path,
    /// An arbitrary frontmatter property, by name.
    Property(String),
}

impl MetadataChoice {
    /// Parse a stored slot literal. Never fails: unknown literals are
    /// property names.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "" | "none" => Self::None,
            "timestamp" => Self::Timestamp,
            "tags" | "file tags" => Self::Tags,
            "path" | "file path" => Self::Path,
            other => Self::Property(other.to_string()),
        }
    }

    /// Canonical stored literal.
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Timestamp => "timestamp",
            Self::Tags => "tags",
            Self::Path => "path",
            Self::Property(name) => name,
        }
    }

    /// Whether this slot displays nothing.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl std::fmt::Display for MetadataChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for MetadataChoice {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl Serialize for MetadataChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MetadataChoice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value.as_str() {
            Some(s) => Ok(Self::parse(s)),
            None => Err(D::Error::custom("metadata choice must be a string")),
        }
    }
}

// =============================================================================
// SLOT RESOLUTION
// =============================================================================

/// Resolved four-slot layout handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotLayout {
    /// Slots 1–4 after duplicate suppression.
    pub slots: [MetadataChoice; 4],
    /// Render slots 1 and 2 horizontally.
    pub pair_12_side_by_side: bool,
    /// Render slots 3 and 4 horizontally.
    pub pair_34_side_by_side: bool,
}

/// Apply the two-slot duplicate rule to a pair of choices.
///
/// Equal non-none choices collapse: the earlier slot always wins and the
/// later one is forced to none.
pub fn resolve_pair(
    first: &MetadataChoice,
    second: &MetadataChoice,
) -> (MetadataChoice, MetadataChoice) {
    let duplicate = !first.is_none() && first == second;
    (
        first.clone(),
        if duplicate {
            MetadataChoice::None
        } else {
            second.clone()
        },
    )
}

/// Resolve the four-slot layout for a view.
///
/// Duplicate suppression applies independently within each declared pair:
/// (1,2) is one pair, (3,4) the other. Cross-pair duplicates (slot 1 equal
/// to slot 3, say) are permitted and both rendered.
pub fn resolve_slots(settings: &EffectiveSettings) -> SlotLayout {
    let (s1, s2) = resolve_pair(&settings.metadata_display_1, &settings.metadata_display_2);
    let (s3, s4) = resolve_pair(&settings.metadata_display_3, &settings.metadata_display_4);
    SlotLayout {
        slots: [s1, s2, s3, s4],
        pair_12_side_by_side: settings.metadata_layout_12_side_by_side,
        pair_34_side_by_side: settings.metadata_layout_34_side_by_side,
    }
}

/// Two-slot legacy view (list rows): slot 1 maps to the left position,
/// slot 3 to the right, with the duplicate rule applied across them.
pub fn legacy_slots(settings: &EffectiveSettings) -> (MetadataChoice, MetadataChoice) {
    resolve_pair(&settings.metadata_display_1, &settings.metadata_display_3)
}

// =============================================================================
// TIMESTAMP FIELD SELECTION
// =============================================================================

/// Concrete file time the timestamp slot reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampField {
    Ctime,
    Mtime,
}

/// Pick the file time the timestamp slot reflects.
///
/// Created-time sorts show created time and modified-time sorts show
/// modified time when the configured mode is sort-based; title, size and
/// random sorts fall back to modified time. Explicit modes override the
/// sort method entirely.
pub fn timestamp_field_for(display: TimestampSource, sort_method: SortMethod) -> TimestampField {
    match display {
        TimestampSource::Ctime => TimestampField::Ctime,
        TimestampSource::Mtime => TimestampField::Mtime,
        TimestampSource::SortBased => {
            if sort_method.is_ctime() {
                TimestampField::Ctime
            } else {
                TimestampField::Mtime
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
