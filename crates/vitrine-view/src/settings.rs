//! Settings schema for vitrine views.
//!
//! Configuration lives in three layers: plugin-wide [`GlobalSettings`],
//! per-view-type [`ViewDefaults`], and per-instance raw overrides (untyped
//! JSON from the host's key-value settings store). [`crate::config`] merges
//! the three into an effective configuration; this module defines the typed
//! shapes and their persisted string literals.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

use vitrine_core::defaults;
use vitrine_core::{Error, SortMethod};

use crate::slots::MetadataChoice;

// =============================================================================
// SETTINGS ENUMS
// =============================================================================

/// Which side of a card the thumbnail sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThumbnailPosition {
    Left,
    #[default]
    Right,
}

impl std::fmt::Display for ThumbnailPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

impl std::str::FromStr for ThumbnailPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(format!("Invalid thumbnail position: {}", s)),
        }
    }
}

/// Size budget for the host's thumbnail cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThumbnailCacheSize {
    Minimal,
    Small,
    #[default]
    Balanced,
    Large,
    Unlimited,
}

impl std::fmt::Display for ThumbnailCacheSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minimal => write!(f, "minimal"),
            Self::Small => write!(f, "small"),
            Self::Balanced => write!(f, "balanced"),
            Self::Large => write!(f, "large"),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

impl std::str::FromStr for ThumbnailCacheSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimal" => Ok(Self::Minimal),
            "small" => Ok(Self::Small),
            "balanced" => Ok(Self::Balanced),
            "large" => Ok(Self::Large),
            "unlimited" => Ok(Self::Unlimited),
            _ => Err(format!("Invalid thumbnail cache size: {}", s)),
        }
    }
}

/// Which file time the timestamp slot reflects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampSource {
    /// Always created time.
    Ctime,
    /// Always modified time.
    Mtime,
    /// Follow the active sort method.
    #[default]
    SortBased,
}

impl std::fmt::Display for TimestampSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ctime => write!(f, "ctime"),
            Self::Mtime => write!(f, "mtime"),
            Self::SortBased => write!(f, "sort-based"),
        }
    }
}

impl std::str::FromStr for TimestampSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ctime" => Ok(Self::Ctime),
            "mtime" => Ok(Self::Mtime),
            "sort-based" => Ok(Self::SortBased),
            _ => Err(format!("Invalid timestamp source: {}", s)),
        }
    }
}

/// Marker style for list view rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ListMarker {
    #[default]
    Bullet,
    Number,
    None,
}

impl std::fmt::Display for ListMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullet => write!(f, "bullet"),
            Self::Number => write!(f, "number"),
            Self::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for ListMarker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bullet" => Ok(Self::Bullet),
            "number" => Ok(Self::Number),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid list marker: {}", s)),
        }
    }
}

/// What the randomize command does to the active view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RandomizeAction {
    /// Toggle the persistent shuffle flag.
    #[default]
    Shuffle,
    /// Open a random note from the visible list.
    Random,
}

impl std::fmt::Display for RandomizeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shuffle => write!(f, "shuffle"),
            Self::Random => write!(f, "random"),
        }
    }
}

impl std::str::FromStr for RandomizeAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shuffle" => Ok(Self::Shuffle),
            "random" => Ok(Self::Random),
            _ => Err(format!("Invalid randomize action: {}", s)),
        }
    }
}

/// Which part of a card opens the note when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OpenFileAction {
    /// The whole card is a link target.
    #[default]
    Card,
    /// Only the title is.
    Title,
}

impl std::fmt::Display for OpenFileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::Title => write!(f, "title"),
        }
    }
}

impl std::str::FromStr for OpenFileAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "title" => Ok(Self::Title),
            _ => Err(format!("Invalid open file action: {}", s)),
        }
    }
}

/// Card background treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CardBackground {
    None,
    Solid,
    /// Tinted by the thumbnail's ambient color.
    #[default]
    Tinted,
}

// Hand-written to keep reading the boolean this field used to be.
impl<'de> Deserialize<'de> for CardBackground {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let value = JsonValue::deserialize(deserializer)?;
        match &value {
            JsonValue::Bool(true) => Ok(Self::Tinted),
            JsonValue::Bool(false) => Ok(Self::None),
            JsonValue::String(s) => s.parse().map_err(D::Error::custom),
            _ => Err(D::Error::custom("invalid card background")),
        }
    }
}

impl std::fmt::Display for CardBackground {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Solid => write!(f, "solid"),
            Self::Tinted => write!(f, "tinted"),
        }
    }
}

impl std::str::FromStr for CardBackground {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "solid" => Ok(Self::Solid),
            "tinted" => Ok(Self::Tinted),
            _ => Err(format!("Invalid card background: {}", s)),
        }
    }
}

/// Layout mode for a view instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    Card,
    Masonry,
    List,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::Masonry => write!(f, "masonry"),
            Self::List => write!(f, "list"),
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "masonry" => Ok(Self::Masonry),
            "list" => Ok(Self::List),
            _ => Err(format!("Invalid view mode: {}", s)),
        }
    }
}

/// Width mode for a view instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WidthMode {
    #[default]
    Normal,
    Wide,
    Max,
}

impl std::fmt::Display for WidthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Wide => write!(f, "wide"),
            Self::Max => write!(f, "max"),
        }
    }
}

impl std::str::FromStr for WidthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "wide" => Ok(Self::Wide),
            "max" => Ok(Self::Max),
            _ => Err(format!("Invalid width mode: {}", s)),
        }
    }
}

// =============================================================================
// GLOBAL SETTINGS
// =============================================================================

/// Plugin-wide configuration.
///
/// The bottom layer of the precedence chain, and the only source for fields
/// flagged global-only (layout minimums, thumbnail side and cache size,
/// timestamp-reflects mode, created/modified property lists, open-file
/// behavior, card background).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    pub min_card_width: u32,
    pub title_property: String,
    pub description_property: String,
    pub image_property: String,
    pub created_property: String,
    pub modified_property: String,
    pub omit_first_line: bool,
    pub show_text_preview: bool,
    pub show_thumbnails: bool,
    pub thumbnail_position: ThumbnailPosition,
    pub fallback_to_content: bool,
    pub fallback_to_embeds: bool,
    pub fallback_to_ctime: bool,
    pub fallback_to_mtime: bool,
    #[serde(alias = "metadataDisplayLeft")]
    pub metadata_display_1: MetadataChoice,
    pub metadata_display_2: MetadataChoice,
    #[serde(alias = "metadataDisplayRight")]
    pub metadata_display_3: MetadataChoice,
    pub metadata_display_4: MetadataChoice,
    pub metadata_layout_12_side_by_side: bool,
    pub metadata_layout_34_side_by_side: bool,
    pub timestamp_display: TimestampSource,
    pub list_marker: ListMarker,
    pub show_timestamp_icon: bool,
    pub min_masonry_columns: u32,
    pub min_grid_columns: u32,
    pub randomize_action: RandomizeAction,
    pub thumbnail_cache_size: ThumbnailCacheSize,
    pub query_height: u32,
    pub open_file_action: OpenFileAction,
    pub open_random_in_new_pane: bool,
    #[serde(rename = "addCardBackground")]
    pub card_background: CardBackground,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            min_card_width: defaults::MIN_CARD_WIDTH,
            title_property: String::new(),
            description_property: String::new(),
            image_property: String::new(),
            created_property: String::new(),
            modified_property: String::new(),
            omit_first_line: false,
            show_text_preview: true,
            show_thumbnails: true,
            thumbnail_position: ThumbnailPosition::Right,
            fallback_to_content: true,
            fallback_to_embeds: true,
            fallback_to_ctime: true,
            fallback_to_mtime: true,
            metadata_display_1: MetadataChoice::Timestamp,
            metadata_display_2: MetadataChoice::None,
            metadata_display_3: MetadataChoice::Path,
            metadata_display_4: MetadataChoice::None,
            metadata_layout_12_side_by_side: false,
            metadata_layout_34_side_by_side: false,
            timestamp_display: TimestampSource::SortBased,
            list_marker: ListMarker::Bullet,
            show_timestamp_icon: true,
            min_masonry_columns: defaults::MIN_MASONRY_COLUMNS,
            min_grid_columns: defaults::MIN_GRID_COLUMNS,
            randomize_action: RandomizeAction::Shuffle,
            thumbnail_cache_size: ThumbnailCacheSize::Balanced,
            query_height: defaults::QUERY_HEIGHT,
            open_file_action: OpenFileAction::Card,
            open_random_in_new_pane: true,
            card_background: CardBackground::Tinted,
        }
    }
}

// =============================================================================
// PER-VIEW-TYPE DEFAULTS
// =============================================================================

/// Defaults applied to newly created views, between per-instance overrides
/// and global settings in the precedence chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewDefaults {
    pub title_property: String,
    pub description_property: String,
    pub image_property: String,
    #[serde(alias = "metadataDisplayLeft")]
    pub metadata_display_1: MetadataChoice,
    pub metadata_display_2: MetadataChoice,
    #[serde(alias = "metadataDisplayRight")]
    pub metadata_display_3: MetadataChoice,
    pub metadata_display_4: MetadataChoice,
    pub metadata_layout_12_side_by_side: bool,
    pub metadata_layout_34_side_by_side: bool,
    pub show_text_preview: bool,
    pub fallback_to_content: bool,
    pub show_thumbnails: bool,
    pub fallback_to_embeds: bool,
    pub query_height: u32,
    pub list_marker: ListMarker,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            title_property: String::new(),
            description_property: String::new(),
            image_property: String::new(),
            metadata_display_1: MetadataChoice::Timestamp,
            metadata_display_2: MetadataChoice::None,
            metadata_display_3: MetadataChoice::Path,
            metadata_display_4: MetadataChoice::None,
            metadata_layout_12_side_by_side: false,
            metadata_layout_34_side_by_side: false,
            show_text_preview: true,
            fallback_to_content: true,
            show_thumbnails: true,
            fallback_to_embeds: true,
            query_height: defaults::QUERY_HEIGHT,
            list_marker: ListMarker::Bullet,
        }
    }
}

// =============================================================================
// PER-INSTANCE UI STATE
// =============================================================================

/// Persisted per-view-instance state.
///
/// `search_query` is passthrough state for the host's search box; the
/// engine stores it but never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiState {
    pub sort_method: SortMethod,
    pub view_mode: ViewMode,
    pub search_query: String,
    pub result_limit: String,
    pub width_mode: WidthMode,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            sort_method: SortMethod::MtimeDesc,
            view_mode: ViewMode::Card,
            search_query: String::new(),
            result_limit: String::new(),
            width_mode: WidthMode::Normal,
        }
    }
}

impl UiState {
    /// Display cutoff parsed from the free-form limit field. Empty or
    /// unparsable limits mean no cutoff.
    pub fn displayed_count(&self) -> Option<usize> {
        let trimmed = self.result_limit.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<usize>().ok()
    }
}

// =============================================================================
// PERSISTED AGGREGATE
// =============================================================================

/// The persisted aggregate the host's settings store holds for the plugin.
///
/// Per-instance view settings stay untyped here: they are the raw-config
/// input to [`crate::config::read_config`], which owns coercion and
/// migration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginData {
    pub global_settings: GlobalSettings,
    pub default_view_settings: ViewDefaults,
    pub query_states: HashMap<String, UiState>,
    pub view_settings: HashMap<String, JsonValue>,
}

impl PluginData {
    /// Deserialize from the host's stored JSON value.
    pub fn from_value(value: JsonValue) -> vitrine_core::Result<Self> {
        serde_json::from_value(value).map_err(Error::from)
    }

    /// Serialize for the host's settings store.
    pub fn to_value(&self) -> vitrine_core::Result<JsonValue> {
        serde_json::to_value(self).map_err(Error::from)
    }
}

// =============================================================================
// TESTS
// =============================================================================
