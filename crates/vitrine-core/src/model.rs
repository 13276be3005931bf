//! Presentation-ready card model and collection ordering types.

use serde::{Deserialize, Serialize};

// =============================================================================
// SORT METHODS
// =============================================================================

/// Total orders a card collection can be arranged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortMethod {
    /// Most recently modified first.
    #[default]
    MtimeDesc,
    /// Least recently modified first.
    MtimeAsc,
    /// Most recently created first.
    CtimeDesc,
    /// Least recently created first.
    CtimeAsc,
    /// Case-insensitive lexical ascending by title.
    Title,
    /// Largest file first.
    Size,
    /// Stable per-build random order.
    Random,
}

impl SortMethod {
    /// Whether this method orders by created time.
    pub fn is_ctime(&self) -> bool {
        matches!(self, Self::CtimeDesc | Self::CtimeAsc)
    }

    /// Whether this method orders by modified time.
    pub fn is_mtime(&self) -> bool {
        matches!(self, Self::MtimeDesc | Self::MtimeAsc)
    }
}

impl std::fmt::Display for SortMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MtimeDesc => write!(f, "mtime-desc"),
            Self::MtimeAsc => write!(f, "mtime-asc"),
            Self::CtimeDesc => write!(f, "ctime-desc"),
            Self::CtimeAsc => write!(f, "ctime-asc"),
            Self::Title => write!(f, "title"),
            Self::Size => write!(f, "size"),
            Self::Random => write!(f, "random"),
        }
    }
}

impl std::str::FromStr for SortMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mtime-desc" => Ok(Self::MtimeDesc),
            "mtime-asc" => Ok(Self::MtimeAsc),
            "ctime-desc" => Ok(Self::CtimeDesc),
            "ctime-asc" => Ok(Self::CtimeAsc),
            "title" => Ok(Self::Title),
            "size" => Ok(Self::Size),
            "random" => Ok(Self::Random),
            _ => Err(format!("Invalid sort method: {}", s)),
        }
    }
}

// =============================================================================
// SORT KEYS
// =============================================================================

/// Pipeline-owned comparable attached to each card at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Epoch milliseconds for the time-based methods.
    Time(i64),
    /// Lowercased title for lexical ordering.
    Title(String),
    /// File size in bytes.
    Size(u64),
    /// Per-build random key.
    Random(u64),
}

// =============================================================================
// CARD MODEL
// =============================================================================

/// The normalized, presentation-ready representation of one note.
///
/// Owned by the collection pipeline once produced and immutable after
/// creation: any settings or data change re-derives the whole model rather
/// than patching fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardModel {
    /// Vault-relative path; also the card's link target.
    pub path: String,
    /// Display title.
    pub title: String,
    /// Timestamp to show, if any. Absent means the slot renders empty,
    /// never the epoch.
    pub timestamp_ms: Option<i64>,
    /// Tags, verbatim as stored (leading `#` preserved).
    pub tags: Vec<String>,
    /// Containing-folder path; empty for root notes.
    pub folder: String,
    /// Thumbnail/gallery image paths, possibly empty.
    pub images: Vec<String>,
    /// Preview text, if any.
    pub preview: Option<String>,
    /// File creation time, epoch milliseconds.
    pub ctime_ms: i64,
    /// File modification time, epoch milliseconds.
    pub mtime_ms: i64,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Comparable assigned by the pipeline for the active sort method.
    pub sort_key: SortKey,
}

impl CardModel {
    /// Tags with any leading `#` stripped, for the render boundary.
    pub fn display_tags(&self) -> Vec<&str> {
        self.tags.iter().map(|t| display_tag(t)).collect()
    }
}

/// Strip a single leading `#` from a tag for display.
pub fn display_tag(tag: &str) -> &str {
    tag.strip_prefix('#').unwrap_or(tag)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_sort_method_round_trip() {
        for method in [
            SortMethod::MtimeDesc,
            SortMethod::MtimeAsc,
            SortMethod::CtimeDesc,
            SortMethod::CtimeAsc,
            SortMethod::Title,
            SortMethod::Size,
            SortMethod::Random,
        ] {
            let parsed = SortMethod::from_str(&method.to_string()).unwrap();
            assert_eq!(parsed, method);
        }
    }

    #[test]
    fn test_sort_method_invalid() {
        assert!(SortMethod::from_str("newest").is_err());
    }

    #[test]
    fn test_sort_method_serde_literals() {
        let json = serde_json::to_string(&SortMethod::MtimeDesc).unwrap();
        assert_eq!(json, "\"mtime-desc\"");
        let back: SortMethod = serde_json::from_str("\"ctime-asc\"").unwrap();
        assert_eq!(back, SortMethod::CtimeAsc);
    }

    #[test]
    fn test_time_classification() {
        assert!(SortMethod::CtimeAsc.is_ctime());
        assert!(!SortMethod::CtimeAsc.is_mtime());
        assert!(SortMethod::MtimeDesc.is_mtime());
        assert!(!SortMethod::Title.is_ctime());
        assert!(!SortMethod::Title.is_mtime());
    }

    #[test]
    fn test_display_tag_strips_hash() {
        assert_eq!(display_tag("#project"), "project");
        assert_eq!(display_tag("plain"), "plain");
        // Only one leading hash is render decoration.
        assert_eq!(display_tag("##nested"), "#nested");
    }
}
