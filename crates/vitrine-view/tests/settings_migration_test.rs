//! Settings layering and legacy-schema migration scenarios.

use serde_json::json;

use vitrine_view::{
    legacy_slots, read_config, GlobalSettings, MetadataChoice, PluginData, SortMethod, UiState,
    ViewDefaults,
};

fn read(raw: serde_json::Value) -> vitrine_view::EffectiveSettings {
    read_config(&raw, &GlobalSettings::default(), &ViewDefaults::default())
}

#[test]
fn test_oldest_era_show_timestamp_false_with_path_bottom() {
    // showTimestamp: false + cardBottomDisplay: "path" must land as
    // left none / right path.
    let settings = read(json!({
        "showTimestamp": false,
        "cardBottomDisplay": "path",
    }));

    let (left, right) = legacy_slots(&settings);
    assert_eq!(left, MetadataChoice::None);
    assert_eq!(right, MetadataChoice::Path);
}

#[test]
fn test_two_slot_duplicate_resolves_left_wins() {
    let settings = read(json!({
        "metadataDisplayLeft": "tags",
        "metadataDisplayRight": "tags",
    }));

    let (left, right) = legacy_slots(&settings);
    assert_eq!(left, MetadataChoice::Tags);
    assert_eq!(right, MetadataChoice::None);
}

#[test]
fn test_migration_is_idempotent_over_its_own_output() {
    let raw = json!({
        "showTimestamp": true,
        "cardBottomDisplay": "tags",
        "titleProperty": "headline",
        "queryHeight": 640,
        "showThumbnails": false,
    });
    let first = read(raw);

    // Treat the resolved settings as brand-new raw config.
    let second = read(serde_json::to_value(&first).unwrap());
    assert_eq!(first, second);

    // And once more for good measure.
    let third = read(serde_json::to_value(&second).unwrap());
    assert_eq!(second, third);
}

#[test]
fn test_precedence_instance_over_view_over_global() {
    let mut global = GlobalSettings::default();
    global.description_property = "globalDesc".to_string();
    let mut view = ViewDefaults::default();
    view.description_property = "viewDesc".to_string();

    // All three layers present: the instance wins.
    let settings = read_config(&json!({"descriptionProperty": "mine"}), &global, &view);
    assert_eq!(settings.description_property, "mine");

    // Instance absent: the view-type default wins.
    let settings = read_config(&serde_json::Value::Null, &global, &view);
    assert_eq!(settings.description_property, "viewDesc");

    // Both absent: global shows through.
    let settings = read_config(
        &serde_json::Value::Null,
        &global,
        &ViewDefaults::default(),
    );
    assert_eq!(settings.description_property, "globalDesc");
}

#[test]
fn test_global_only_fields_resist_overrides() {
    let mut global = GlobalSettings::default();
    global.modified_property = "edited".to_string();
    global.min_masonry_columns = 4;

    let raw = json!({
        "modifiedProperty": "hacked",
        "minMasonryColumns": 1,
        "timestampDisplay": "ctime",
        "openFileAction": "title",
    });
    let settings = read_config(&raw, &global, &ViewDefaults::default());

    assert_eq!(settings.modified_property, "edited");
    assert_eq!(settings.min_masonry_columns, 4);
    assert_eq!(
        settings.timestamp_display,
        vitrine_view::TimestampSource::SortBased
    );
    assert_eq!(
        settings.open_file_action,
        vitrine_view::OpenFileAction::Card
    );
}

#[test]
fn test_malformed_values_never_fail() {
    // Wrong types everywhere: resolution degrades, never panics or errors.
    let settings = read(json!({
        "titleProperty": ["not", "a", "string"],
        "showTextPreview": "maybe",
        "queryHeight": -3,
        "metadataDisplay1": 17,
        "metadataDisplay3": null,
        "listMarker": {"style": "dots"},
    }));

    assert_eq!(settings.title_property, "");
    assert!(settings.show_text_preview);
    assert_eq!(settings.query_height, 0);
    // Slot keys of the wrong type count as absent, so defaults apply.
    assert_eq!(settings.metadata_display_1, MetadataChoice::Timestamp);
    assert_eq!(settings.metadata_display_3, MetadataChoice::Path);
}

#[test]
fn test_plugin_data_loads_legacy_persisted_shape() {
    // A stored blob from an older release: two-slot metadata keys and a
    // boolean card background.
    let stored = json!({
        "globalSettings": {
            "metadataDisplayLeft": "tags",
            "metadataDisplayRight": "path",
            "addCardBackground": false,
            "thumbnailCacheSize": "large",
        },
        "defaultViewSettings": {
            "metadataDisplayLeft": "timestamp",
        },
        "queryStates": {
            "view-1": {"sortMethod": "title", "resultLimit": "25"}
        },
        "viewSettings": {
            "view-1": {"titleProperty": "headline"}
        }
    });

    let data = PluginData::from_value(stored).unwrap();
    assert_eq!(data.global_settings.metadata_display_1, MetadataChoice::Tags);
    assert_eq!(data.global_settings.metadata_display_3, MetadataChoice::Path);
    assert_eq!(
        data.global_settings.card_background,
        vitrine_view::CardBackground::None
    );
    assert_eq!(
        data.default_view_settings.metadata_display_1,
        MetadataChoice::Timestamp
    );

    let state = data.query_states.get("view-1").unwrap();
    assert_eq!(state.sort_method, SortMethod::Title);
    assert_eq!(state.displayed_count(), Some(25));

    // The per-instance blob stays raw until read_config resolves it.
    let raw = data.view_settings.get("view-1").unwrap();
    let settings = read_config(raw, &data.global_settings, &data.default_view_settings);
    assert_eq!(settings.title_property, "headline");
    assert_eq!(
        settings.thumbnail_cache_size,
        vitrine_view::ThumbnailCacheSize::Large
    );
}

#[test]
fn test_plugin_data_round_trip_preserves_state() {
    let mut data = PluginData::default();
    data.query_states.insert(
        "grid".to_string(),
        UiState {
            sort_method: SortMethod::CtimeAsc,
            result_limit: "100".to_string(),
            ..UiState::default()
        },
    );

    let value = data.to_value().unwrap();
    let back = PluginData::from_value(value).unwrap();
    assert_eq!(back, data);
}
