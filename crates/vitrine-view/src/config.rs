//! Layered configuration resolution and schema migration.
//!
//! [`read_config`] merges three sources into one typed
//! [`EffectiveSettings`], highest precedence first: the per-instance raw
//! config (only where a value is present and type-correct), the
//! per-view-type defaults, and the global settings. Fields flagged
//! global-only ignore the first two layers entirely.
//!
//! A value of the wrong type is demoted to "absent" and falls through the
//! chain; nothing in here ever fails on malformed input. The one observable
//! side effect is a warning when migrating a legacy metadata configuration
//! forces a duplicate slot to none.

use serde_json::Value as JsonValue;
use std::str::FromStr;
use tracing::warn;

use serde::{Deserialize, Serialize};

use crate::settings::{
    CardBackground, GlobalSettings, ListMarker, OpenFileAction, RandomizeAction,
    ThumbnailCacheSize, ThumbnailPosition, TimestampSource, ViewDefaults,
};
use crate::slots::{resolve_pair, MetadataChoice};

// =============================================================================
// EFFECTIVE SETTINGS
// =============================================================================

/// Fully merged, typed configuration for one view instance.
///
/// Recomputed on every render pass and never mutated in place; field names
/// serialize to the same camelCase keys the raw store uses, so feeding a
/// serialized value back through [`read_config`] is a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveSettings {
    // Content resolution
    pub title_property: String,
    pub description_property: String,
    pub image_property: String,
    /// Global-only.
    pub created_property: String,
    /// Global-only.
    pub modified_property: String,

    // Preview text
    pub show_text_preview: bool,
    pub fallback_to_content: bool,
    pub omit_first_line: bool,

    // Thumbnails
    pub show_thumbnails: bool,
    pub fallback_to_embeds: bool,
    /// Global-only.
    pub thumbnail_position: ThumbnailPosition,
    /// Global-only.
    pub thumbnail_cache_size: ThumbnailCacheSize,

    // Timestamps
    pub fallback_to_ctime: bool,
    pub fallback_to_mtime: bool,
    /// Global-only.
    pub timestamp_display: TimestampSource,
    pub show_timestamp_icon: bool,

    // Metadata slots
    pub metadata_display_1: MetadataChoice,
    pub metadata_display_2: MetadataChoice,
    pub metadata_display_3: MetadataChoice,
    pub metadata_display_4: MetadataChoice,
    pub metadata_layout_12_side_by_side: bool,
    pub metadata_layout_34_side_by_side: bool,

    // Layout, all global-only
    pub min_card_width: u32,
    pub min_masonry_columns: u32,
    pub min_grid_columns: u32,
    #[serde(rename = "addCardBackground")]
    pub card_background: CardBackground,

    // Behavior
    pub list_marker: ListMarker,
    pub query_height: u32,
    pub randomize_action: RandomizeAction,
    /// Global-only.
    pub open_file_action: OpenFileAction,
    /// Global-only.
    pub open_random_in_new_pane: bool,
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        read_config(
            &JsonValue::Null,
            &GlobalSettings::default(),
            &ViewDefaults::default(),
        )
    }
}

// =============================================================================
// RAW VALUE ACCESS
// =============================================================================

/// Non-empty string value, or absent.
fn raw_str(raw: &JsonValue, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(JsonValue::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Boolean value, or absent.
fn raw_bool(raw: &JsonValue, key: &str) -> Option<bool> {
    raw.get(key).and_then(JsonValue::as_bool)
}

/// Non-negative integer value, or absent.
fn raw_u32(raw: &JsonValue, key: &str) -> Option<u32> {
    raw.get(key)
        .and_then(JsonValue::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

/// Enum value parsed from a string literal; unknown literals and wrong
/// types are absent.
fn raw_parse<T: FromStr>(raw: &JsonValue, key: &str) -> Option<T> {
    raw.get(key)
        .and_then(JsonValue::as_str)
        .and_then(|s| s.parse().ok())
}

/// Metadata slot choice. Unlike [`raw_str`], an empty string is a present
/// value here: it is the four-slot era's spelling of "none".
fn raw_choice(raw: &JsonValue, key: &str) -> Option<MetadataChoice> {
    raw.get(key)
        .and_then(JsonValue::as_str)
        .map(MetadataChoice::parse)
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// =============================================================================
// METADATA SLOT MIGRATION
// =============================================================================

/// Resolve the four metadata slots from a raw config, walking the schema
/// generations newest-first:
///
/// 1. four-slot keys (`metadataDisplay1..4`) win when slots 1 and 3 are
///    both defined;
/// 2. otherwise the two-slot keys (`metadataDisplayLeft`/`Right`) win when
///    both are defined;
/// 3. otherwise the deprecated `showTimestamp` + `cardBottomDisplay` pair
///    is migrated when either key is present;
/// 4. otherwise the per-view-type defaults apply.
///
/// Duplicate suppression is re-applied after every path, so re-running the
/// migration over already-migrated config is a no-op.
fn resolve_metadata_slots(raw: &JsonValue, view_defaults: &ViewDefaults) -> [MetadataChoice; 4] {
    let slot1 = raw_choice(raw, "metadataDisplay1");
    let slot3 = raw_choice(raw, "metadataDisplay3");

    let (slots, migrated) = if let (Some(s1), Some(s3)) = (slot1, slot3) {
        let s2 = raw_choice(raw, "metadataDisplay2").unwrap_or_default();
        let s4 = raw_choice(raw, "metadataDisplay4").unwrap_or_default();
        ([s1, s2, s3, s4], false)
    } else {
        let left = raw_choice(raw, "metadataDisplayLeft");
        let right = raw_choice(raw, "metadataDisplayRight");

        if let (Some(left), Some(right)) = (left, right) {
            // Two-slot era: left maps to slot 1, right to slot 3. The
            // two-slot duplicate rule applies across them at migration time.
            let (left, right) = migrate_pair(&left, &right);
            (
                [left, MetadataChoice::None, right, MetadataChoice::None],
                true,
            )
        } else if raw.get("showTimestamp").is_some() || raw.get("cardBottomDisplay").is_some() {
            // Oldest era: one boolean plus one three-way enum.
            let left = if raw_bool(raw, "showTimestamp") == Some(true) {
                MetadataChoice::Timestamp
            } else {
                MetadataChoice::None
            };
            let right = match raw_str(raw, "cardBottomDisplay").as_deref() {
                Some("tags") => MetadataChoice::Tags,
                Some("path") => MetadataChoice::Path,
                _ => MetadataChoice::None,
            };
            let (left, right) = migrate_pair(&left, &right);
            (
                [left, MetadataChoice::None, right, MetadataChoice::None],
                true,
            )
        } else {
            (
                [
                    view_defaults.metadata_display_1.clone(),
                    view_defaults.metadata_display_2.clone(),
                    view_defaults.metadata_display_3.clone(),
                    view_defaults.metadata_display_4.clone(),
                ],
                false,
            )
        }
    };

    apply_pair_suppression(slots, migrated)
}

/// Two-slot duplicate rule for migration paths. A correction here is the
/// one event worth surfacing to operators, so it warns.
fn migrate_pair(
    left: &MetadataChoice,
    right: &MetadataChoice,
) -> (MetadataChoice, MetadataChoice) {
    let (left, corrected) = resolve_pair(left, right);
    if corrected.is_none() && !right.is_none() {
        warn!(
            subsystem = "settings",
            component = "migration",
            config_key = "metadataDisplayRight",
            "duplicate metadata slot suppressed while migrating legacy config"
        );
    }
    (left, corrected)
}

/// Within-pair duplicate suppression over the four resolved slots.
fn apply_pair_suppression(slots: [MetadataChoice; 4], migrated: bool) -> [MetadataChoice; 4] {
    let [s1, s2, s3, s4] = slots;
    let (s1, s2c) = resolve_pair(&s1, &s2);
    let (s3, s4c) = resolve_pair(&s3, &s4);
    if migrated && ((s2c.is_none() && !s2.is_none()) || (s4c.is_none() && !s4.is_none())) {
        warn!(
            subsystem = "settings",
            component = "migration",
            "duplicate metadata slot suppressed while migrating legacy config"
        );
    }
    [s1, s2c, s3, s4c]
}

// =============================================================================
// CONFIG RESOLUTION
// =============================================================================

/// Resolve the effective configuration for one view instance.
///
/// Pure apart from the migration warning; called once per render pass.
pub fn read_config(
    raw: &JsonValue,
    global: &GlobalSettings,
    view_defaults: &ViewDefaults,
) -> EffectiveSettings {
    let [s1, s2, s3, s4] = resolve_metadata_slots(raw, view_defaults);

    EffectiveSettings {
        title_property: raw_str(raw, "titleProperty")
            .or_else(|| non_empty(&view_defaults.title_property))
            .unwrap_or_else(|| global.title_property.clone()),
        description_property: raw_str(raw, "descriptionProperty")
            .or_else(|| non_empty(&view_defaults.description_property))
            .unwrap_or_else(|| global.description_property.clone()),
        image_property: raw_str(raw, "imageProperty")
            .or_else(|| non_empty(&view_defaults.image_property))
            .unwrap_or_else(|| global.image_property.clone()),
        created_property: global.created_property.clone(),
        modified_property: global.modified_property.clone(),

        show_text_preview: raw_bool(raw, "showTextPreview").unwrap_or(view_defaults.show_text_preview),
        fallback_to_content: raw_bool(raw, "fallbackToContent")
            .unwrap_or(view_defaults.fallback_to_content),
        omit_first_line: raw_bool(raw, "omitFirstLine")
            .or_else(|| raw_bool(raw, "alwaysOmitFirstLine"))
            .unwrap_or(global.omit_first_line),

        show_thumbnails: raw_bool(raw, "showThumbnails").unwrap_or(view_defaults.show_thumbnails),
        fallback_to_embeds: raw_bool(raw, "fallbackToEmbeds")
            .unwrap_or(view_defaults.fallback_to_embeds),
        thumbnail_position: global.thumbnail_position,
        thumbnail_cache_size: global.thumbnail_cache_size,

        fallback_to_ctime: raw_bool(raw, "fallbackToCtime").unwrap_or(global.fallback_to_ctime),
        fallback_to_mtime: raw_bool(raw, "fallbackToMtime").unwrap_or(global.fallback_to_mtime),
        timestamp_display: global.timestamp_display,
        show_timestamp_icon: raw_bool(raw, "showTimestampIcon")
            .unwrap_or(global.show_timestamp_icon),

        metadata_display_1: s1,
        metadata_display_2: s2,
        metadata_display_3: s3,
        metadata_display_4: s4,
        metadata_layout_12_side_by_side: raw_bool(raw, "metadataLayout12SideBySide")
            .unwrap_or(view_defaults.metadata_layout_12_side_by_side),
        metadata_layout_34_side_by_side: raw_bool(raw, "metadataLayout34SideBySide")
            .unwrap_or(view_defaults.metadata_layout_34_side_by_side),

        min_card_width: global.min_card_width,
        min_masonry_columns: global.min_masonry_columns,
        min_grid_columns: global.min_grid_columns,
        card_background: global.card_background,

        list_marker: raw_parse(raw, "listMarker").unwrap_or(view_defaults.list_marker),
        query_height: raw_u32(raw, "queryHeight").unwrap_or(view_defaults.query_height),
        randomize_action: raw_parse(raw, "randomizeAction").unwrap_or(global.randomize_action),
        open_file_action: global.open_file_action,
        open_random_in_new_pane: global.open_random_in_new_pane,
    }
}

// =============================================================================
// TESTS
// =============================================================================
