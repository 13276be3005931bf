//! Note record model for the two query backends.
//!
//! The same logical note arrives in two structurally different shapes
//! depending on which backend produced it:
//!
//! - The **index** backend (Variant A) wraps every property in a
//!   discriminated value object: date-likes as `{date: ...}`, everything
//!   else as `{data: ...}` with a JSON payload.
//! - The **scan** backend (Variant B) hands out raw values directly, with
//!   link-valued entries carrying a target `path` instead of a string and
//!   date-likes exposing a millisecond conversion.
//!
//! The two variants are modeled as a tagged union rather than a common base
//! type: their value-shape rules genuinely differ, and resolution code must
//! branch on shape at the boundary instead of pretending they are the same.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

// =============================================================================
// FILE METADATA
// =============================================================================

/// File-level metadata shared by both backend shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    /// File creation time, epoch milliseconds.
    pub ctime_ms: i64,
    /// File modification time, epoch milliseconds.
    pub mtime_ms: i64,
    /// File size in bytes.
    pub size_bytes: u64,
}

// =============================================================================
// BACKEND VALUE SHAPES
// =============================================================================

/// Variant A property value: a discriminated value object.
///
/// The index backend guarantees exactly these two shapes; anything else is
/// treated as an absent property at the resolver boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexValue {
    /// Date or datetime property: `{date: ...}`.
    Date { date: DateTime<Utc> },
    /// Scalar or list property: `{data: ...}` with a JSON payload.
    Data { data: JsonValue },
}

/// Variant B property value: a raw value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScanValue {
    /// Date or datetime property (carries millisecond conversion).
    Date(DateTime<Utc>),
    /// Link to another note or asset.
    Link { path: String },
    /// List property; items may themselves be links.
    List(Vec<ScanValue>),
    /// Plain text.
    Text(String),
    /// Numeric property.
    Number(f64),
    /// Checkbox property.
    Bool(bool),
}

// =============================================================================
// RECORDS
// =============================================================================

/// A note as returned by the index backend (Variant A).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Vault-relative path, e.g. `"projects/alpha/kickoff.md"`.
    pub path: String,
    /// File name without folder or extension.
    pub name: String,
    /// Tags stored verbatim (leading `#` preserved).
    #[serde(default)]
    pub tags: Vec<String>,
    /// File-level timestamps and size.
    #[serde(default)]
    pub stat: FileStat,
    /// Frontmatter properties keyed by property name.
    #[serde(default)]
    pub properties: BTreeMap<String, IndexValue>,
}

/// A note as returned by the scan backend (Variant B).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanPage {
    /// Vault-relative path.
    pub path: String,
    /// File name without folder or extension.
    pub name: String,
    /// Tags stored verbatim (leading `#` preserved).
    #[serde(default)]
    pub tags: Vec<String>,
    /// File-level timestamps and size.
    #[serde(default)]
    pub stat: FileStat,
    /// Frontmatter properties keyed by property name.
    #[serde(default)]
    pub properties: BTreeMap<String, ScanValue>,
}

/// One note from either backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum NoteRecord {
    /// Variant A: discriminated value objects.
    Index(IndexEntry),
    /// Variant B: raw values.
    Scan(ScanPage),
}

impl IndexEntry {
    /// Create an entry with the given path; the name is derived from the
    /// final path segment with its extension removed.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = file_stem(&path);
        Self {
            path,
            name,
            ..Self::default()
        }
    }

    /// Attach a property value.
    pub fn with_property(mut self, name: impl Into<String>, value: IndexValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Set the tag list.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set file metadata.
    pub fn with_stat(mut self, stat: FileStat) -> Self {
        self.stat = stat;
        self
    }
}

impl ScanPage {
    /// Create a page with the given path; the name is derived from the
    /// final path segment with its extension removed.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = file_stem(&path);
        Self {
            path,
            name,
            ..Self::default()
        }
    }

    /// Attach a property value.
    pub fn with_property(mut self, name: impl Into<String>, value: ScanValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Set the tag list.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set file metadata.
    pub fn with_stat(mut self, stat: FileStat) -> Self {
        self.stat = stat;
        self
    }
}

impl NoteRecord {
    /// Vault-relative path of the note.
    pub fn path(&self) -> &str {
        match self {
            Self::Index(e) => &e.path,
            Self::Scan(p) => &p.path,
        }
    }

    /// File name without folder or extension.
    pub fn name(&self) -> &str {
        match self {
            Self::Index(e) => &e.name,
            Self::Scan(p) => &p.name,
        }
    }

    /// Tags, verbatim.
    pub fn tags(&self) -> &[String] {
        match self {
            Self::Index(e) => &e.tags,
            Self::Scan(p) => &p.tags,
        }
    }

    /// File-level timestamps and size.
    pub fn stat(&self) -> FileStat {
        match self {
            Self::Index(e) => e.stat,
            Self::Scan(p) => p.stat,
        }
    }

    /// Containing-folder path: everything before the final path segment.
    /// Empty for notes at the vault root.
    pub fn folder(&self) -> &str {
        let path = self.path();
        match path.rfind('/') {
            Some(idx) => &path[..idx],
            None => "",
        }
    }
}

fn file_stem(path: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.rfind('.') {
        Some(idx) if idx > 0 => file[..idx].to_string(),
        _ => file.to_string(),
    }
}

// =============================================================================
// NORMALIZED PROPERTY VALUES
// =============================================================================

/// A property value normalized across both backend shapes.
///
/// This is what the property resolver hands to the normalizer: the backend
/// wrapping is gone, but the value's structure (list vs scalar, link vs
/// text, date vs data) is preserved for the caller to interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Date or datetime value.
    Date(DateTime<Utc>),
    /// Link value, carrying the target path.
    Link { path: String },
    /// List value.
    List(Vec<PropertyValue>),
    /// Text value. May be empty: an empty string is a present value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Checkbox value.
    Bool(bool),
    /// Present but empty (a `{data: null}` payload).
    Null,
}

impl PropertyValue {
    /// Normalize a Variant A value.
    pub fn from_index(value: &IndexValue) -> Self {
        match value {
            IndexValue::Date { date } => Self::Date(*date),
            IndexValue::Data { data } => Self::from_json(data),
        }
    }

    /// Normalize a Variant B value.
    pub fn from_scan(value: &ScanValue) -> Self {
        match value {
            ScanValue::Date(d) => Self::Date(*d),
            ScanValue::Link { path } => Self::Link { path: path.clone() },
            ScanValue::List(items) => Self::List(items.iter().map(Self::from_scan).collect()),
            ScanValue::Text(s) => Self::Text(s.clone()),
            ScanValue::Number(n) => Self::Number(*n),
            ScanValue::Bool(b) => Self::Bool(*b),
        }
    }

    /// Normalize a JSON payload from a Variant A `{data}` wrapper.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(*b),
            JsonValue::Number(n) => Self::Number(n.as_f64().unwrap_or(0.0)),
            JsonValue::String(s) => Self::Text(s.clone()),
            JsonValue::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            // Objects with a `path` key are link-shaped; anything else is
            // opaque and coerces to empty.
            JsonValue::Object(map) => match map.get("path").and_then(JsonValue::as_str) {
                Some(path) => Self::Link {
                    path: path.to_string(),
                },
                None => Self::Null,
            },
        }
    }

    /// First element of a list value, or the value itself.
    pub fn first(&self) -> &PropertyValue {
        static NULL_VALUE: PropertyValue = PropertyValue::Null;
        match self {
            Self::List(items) => items.first().unwrap_or(&NULL_VALUE),
            other => other,
        }
    }

    /// Epoch milliseconds, for date values only.
    pub fn as_millis(&self) -> Option<i64> {
        match self {
            Self::Date(d) => Some(d.timestamp_millis()),
            _ => None,
        }
    }

    /// String coercion with the host platform's display semantics: lists
    /// join with `,`, links coerce to their path, null coerces to empty,
    /// whole numbers render without a fractional part.
    pub fn coerce_string(&self) -> String {
        match self {
            Self::Date(d) => d.to_rfc3339(),
            Self::Link { path } => path.clone(),
            Self::List(items) => items
                .iter()
                .map(|v| v.coerce_string())
                .collect::<Vec<_>>()
                .join(","),
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Bool(b) => b.to_string(),
            Self::Null => String::new(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

// =============================================================================
// TESTS
// =============================================================================
