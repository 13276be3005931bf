//! Record-to-card normalization.
//!
//! One backend record plus the effective settings in, one presentation-ready
//! [`CardModel`] out. Every resolution step degrades to "nothing to show"
//! rather than failing; the only records that produce no card at all are
//! those without a resolvable path, which are dropped silently.

use vitrine_core::{
    resolve_all_images, resolve_first, resolve_first_date, CardModel, NoteRecord, SortKey,
    SortMethod,
};

use crate::config::EffectiveSettings;
use crate::content::{derive_preview, first_embedded_image, ContentProvider};
use crate::slots::{timestamp_field_for, TimestampField};

/// Normalize one record into a card model.
///
/// Returns `None` for records with no path: a card without a link target
/// is worse than no card.
pub fn normalize_record(
    record: &NoteRecord,
    settings: &EffectiveSettings,
    sort_method: SortMethod,
    content: &dyn ContentProvider,
) -> Option<CardModel> {
    let path = record.path();
    if path.is_empty() {
        return None;
    }

    let stat = record.stat();
    let title = resolve_title(record, settings);
    let timestamp_ms = resolve_timestamp(record, settings, sort_method);
    let preview = resolve_preview(record, settings, &title, content);
    let images = resolve_images(record, settings, content);

    let sort_key = match sort_method {
        SortMethod::MtimeDesc | SortMethod::MtimeAsc => SortKey::Time(stat.mtime_ms),
        SortMethod::CtimeDesc | SortMethod::CtimeAsc => SortKey::Time(stat.ctime_ms),
        SortMethod::Title => SortKey::Title(title.to_lowercase()),
        SortMethod::Size => SortKey::Size(stat.size_bytes),
        // Assigned per build by the pipeline.
        SortMethod::Random => SortKey::Random(0),
    };

    Some(CardModel {
        path: path.to_string(),
        title,
        timestamp_ms,
        tags: record.tags().to_vec(),
        folder: record.folder().to_string(),
        images,
        preview,
        ctime_ms: stat.ctime_ms,
        mtime_ms: stat.mtime_ms,
        size_bytes: stat.size_bytes,
        sort_key,
    })
}

/// Title resolution: first configured property, list head for list values,
/// file name when everything else comes up empty.
fn resolve_title(record: &NoteRecord, settings: &EffectiveSettings) -> String {
    let resolved = resolve_first(record, &settings.title_property)
        .map(|value| value.first().coerce_string())
        .unwrap_or_default();

    let trimmed = resolved.trim();
    if trimmed.is_empty() {
        record.name().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Timestamp resolution per the sort-aware source rule: property list first,
/// file time fallback only where its flag allows, absent otherwise (never
/// the epoch).
fn resolve_timestamp(
    record: &NoteRecord,
    settings: &EffectiveSettings,
    sort_method: SortMethod,
) -> Option<i64> {
    let stat = record.stat();
    match timestamp_field_for(settings.timestamp_display, sort_method) {
        TimestampField::Ctime => resolve_first_date(record, &settings.created_property)
            .map(|d| d.timestamp_millis())
            .or_else(|| settings.fallback_to_ctime.then_some(stat.ctime_ms)),
        TimestampField::Mtime => resolve_first_date(record, &settings.modified_property)
            .map(|d| d.timestamp_millis())
            .or_else(|| settings.fallback_to_mtime.then_some(stat.mtime_ms)),
    }
}

fn resolve_preview(
    record: &NoteRecord,
    settings: &EffectiveSettings,
    title: &str,
    content: &dyn ContentProvider,
) -> Option<String> {
    if !settings.show_text_preview {
        return None;
    }

    let from_property = resolve_first(record, &settings.description_property)
        .map(|value| value.coerce_string())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if from_property.is_some() {
        return from_property;
    }

    if !settings.fallback_to_content {
        return None;
    }
    let raw = content.raw_content(record.path())?;
    derive_preview(raw, title, record.name(), settings.omit_first_line)
}

fn resolve_images(
    record: &NoteRecord,
    settings: &EffectiveSettings,
    content: &dyn ContentProvider,
) -> Vec<String> {
    if !settings.show_thumbnails {
        return Vec::new();
    }

    let images = resolve_all_images(record, &settings.image_property);
    if !images.is_empty() {
        return images;
    }

    if !settings.fallback_to_embeds {
        return Vec::new();
    }
    content
        .raw_content(record.path())
        .and_then(first_embedded_image)
        .map(|image| vec![image])
        .unwrap_or_default()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::NoContent;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::collections::HashMap;
    use vitrine_core::{FileStat, IndexEntry, IndexValue, ScanPage, ScanValue};

    fn stat() -> FileStat {
        FileStat {
            ctime_ms: 1_700_000_000_000,
            mtime_ms: 1_710_000_000_000,
            size_bytes: 2048,
        }
    }

    fn base_settings() -> EffectiveSettings {
        let mut settings = EffectiveSettings::default();
        settings.title_property = "title".to_string();
        settings.description_property = "description".to_string();
        settings.image_property = "cover".to_string();
        settings
    }

    #[test]
    fn test_title_from_property() {
        let record = NoteRecord::Scan(
            ScanPage::new("n/a.md")
                .with_stat(stat())
                .with_property("title", ScanValue::Text("Custom Title".to_string())),
        );
        let card = normalize_record(&record, &base_settings(), SortMethod::MtimeDesc, &NoContent)
            .unwrap();
        assert_eq!(card.title, "Custom Title");
    }

    #[test]
    fn test_title_list_takes_head_then_falls_back_to_name() {
        let record = NoteRecord::Index(
            IndexEntry::new("n/buried-name.md")
                .with_stat(stat())
                .with_property("title", IndexValue::Data { data: json!(["Head", "Tail"]) }),
        );
        let card = normalize_record(&record, &base_settings(), SortMethod::MtimeDesc, &NoContent)
            .unwrap();
        assert_eq!(card.title, "Head");

        let record = NoteRecord::Index(
            IndexEntry::new("n/buried-name.md")
                .with_stat(stat())
                .with_property("title", IndexValue::Data { data: json!("   ") }),
        );
        let card = normalize_record(&record, &base_settings(), SortMethod::MtimeDesc, &NoContent)
            .unwrap();
        assert_eq!(card.title, "buried-name");
    }

    #[test]
    fn test_pathless_record_dropped() {
        let record = NoteRecord::Scan(ScanPage::new(""));
        assert!(
            normalize_record(&record, &base_settings(), SortMethod::MtimeDesc, &NoContent)
                .is_none()
        );
    }

    #[test]
    fn test_timestamp_follows_sort_method() {
        let record = NoteRecord::Scan(ScanPage::new("n/a.md").with_stat(stat()));
        let settings = base_settings();

        let card =
            normalize_record(&record, &settings, SortMethod::CtimeAsc, &NoContent).unwrap();
        assert_eq!(card.timestamp_ms, Some(stat().ctime_ms));

        let card =
            normalize_record(&record, &settings, SortMethod::MtimeDesc, &NoContent).unwrap();
        assert_eq!(card.timestamp_ms, Some(stat().mtime_ms));

        // Title sort falls back to modified time.
        let card = normalize_record(&record, &settings, SortMethod::Title, &NoContent).unwrap();
        assert_eq!(card.timestamp_ms, Some(stat().mtime_ms));
    }

    #[test]
    fn test_timestamp_property_beats_file_time() {
        let date = Utc.with_ymd_and_hms(2023, 1, 15, 9, 0, 0).unwrap();
        let record = NoteRecord::Scan(
            ScanPage::new("n/a.md")
                .with_stat(stat())
                .with_property("modified", ScanValue::Date(date)),
        );
        let mut settings = base_settings();
        settings.modified_property = "modified".to_string();

        let card =
            normalize_record(&record, &settings, SortMethod::MtimeDesc, &NoContent).unwrap();
        assert_eq!(card.timestamp_ms, Some(date.timestamp_millis()));
    }

    #[test]
    fn test_timestamp_absent_when_fallback_disabled() {
        let record = NoteRecord::Scan(ScanPage::new("n/a.md").with_stat(stat()));
        let mut settings = base_settings();
        settings.fallback_to_mtime = false;

        let card =
            normalize_record(&record, &settings, SortMethod::MtimeDesc, &NoContent).unwrap();
        // Absent, not zero.
        assert_eq!(card.timestamp_ms, None);
    }

    #[test]
    fn test_preview_property_then_content_fallback() {
        let record = NoteRecord::Scan(
            ScanPage::new("n/a.md")
                .with_stat(stat())
                .with_property("description", ScanValue::Text("From property".to_string())),
        );
        let card = normalize_record(&record, &base_settings(), SortMethod::MtimeDesc, &NoContent)
            .unwrap();
        assert_eq!(card.preview.as_deref(), Some("From property"));

        // No property: fall back to raw content.
        let record = NoteRecord::Scan(ScanPage::new("n/a.md").with_stat(stat()));
        let mut content = HashMap::new();
        content.insert("n/a.md".to_string(), "Body text here.".to_string());
        let card =
            normalize_record(&record, &base_settings(), SortMethod::MtimeDesc, &content).unwrap();
        assert_eq!(card.preview.as_deref(), Some("Body text here."));
    }

    #[test]
    fn test_preview_disabled_entirely() {
        let record = NoteRecord::Scan(
            ScanPage::new("n/a.md")
                .with_stat(stat())
                .with_property("description", ScanValue::Text("Ignored".to_string())),
        );
        let mut settings = base_settings();
        settings.show_text_preview = false;
        let card =
            normalize_record(&record, &settings, SortMethod::MtimeDesc, &NoContent).unwrap();
        assert!(card.preview.is_none());
    }

    #[test]
    fn test_images_property_then_embed_fallback() {
        let record = NoteRecord::Scan(
            ScanPage::new("n/a.md")
                .with_stat(stat())
                .with_property("cover", ScanValue::Text("img/cover.png".to_string())),
        );
        let card = normalize_record(&record, &base_settings(), SortMethod::MtimeDesc, &NoContent)
            .unwrap();
        assert_eq!(card.images, vec!["img/cover.png"]);

        // No property: first embedded image wins.
        let record = NoteRecord::Scan(ScanPage::new("n/a.md").with_stat(stat()));
        let mut content = HashMap::new();
        content.insert(
            "n/a.md".to_string(),
            "text ![[banner.webp]] ![[second.png]]".to_string(),
        );
        let card =
            normalize_record(&record, &base_settings(), SortMethod::MtimeDesc, &content).unwrap();
        assert_eq!(card.images, vec!["banner.webp"]);
    }

    #[test]
    fn test_images_empty_when_thumbnails_disabled() {
        let record = NoteRecord::Scan(
            ScanPage::new("n/a.md")
                .with_stat(stat())
                .with_property("cover", ScanValue::Text("img/cover.png".to_string())),
        );
        let mut settings = base_settings();
        settings.show_thumbnails = false;
        let card =
            normalize_record(&record, &settings, SortMethod::MtimeDesc, &NoContent).unwrap();
        assert!(card.images.is_empty());
    }

    #[test]
    fn test_tags_and_folder_carried_verbatim() {
        let record = NoteRecord::Scan(
            ScanPage::new("projects/alpha/log.md")
                .with_stat(stat())
                .with_tags(vec!["#work".to_string(), "plain".to_string()]),
        );
        let card = normalize_record(&record, &base_settings(), SortMethod::MtimeDesc, &NoContent)
            .unwrap();
        assert_eq!(card.tags, vec!["#work", "plain"]);
        assert_eq!(card.folder, "projects/alpha");
        assert_eq!(card.display_tags(), vec!["work", "plain"]);
    }

    #[test]
    fn test_sort_keys_match_method() {
        let record = NoteRecord::Scan(
            ScanPage::new("n/a.md")
                .with_stat(stat())
                .with_property("title", ScanValue::Text("MiXeD".to_string())),
        );
        let settings = base_settings();

        let card = normalize_record(&record, &settings, SortMethod::Title, &NoContent).unwrap();
        assert_eq!(card.sort_key, SortKey::Title("mixed".to_string()));

        let card = normalize_record(&record, &settings, SortMethod::Size, &NoContent).unwrap();
        assert_eq!(card.sort_key, SortKey::Size(2048));

        let card = normalize_record(&record, &settings, SortMethod::CtimeDesc, &NoContent).unwrap();
        assert_eq!(card.sort_key, SortKey::Time(stat().ctime_ms));
    }
}
