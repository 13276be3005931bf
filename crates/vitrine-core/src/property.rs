//! Multi-property fallback resolution.
//!
//! Users configure content sources as comma-separated property lists
//! ("try each named property in order; first present wins"). This module
//! implements that contract over both backend record shapes, plus the two
//! type-constrained variants:
//!
//! - [`resolve_first_date`] skips non-date properties instead of matching
//!   them, so a text property earlier in the list never shadows a real date
//!   later in it.
//! - [`resolve_all_images`] deliberately does **not** stop at the first
//!   match: image properties are cumulative, so a gallery can be assembled
//!   from several cover properties in list order.

use chrono::{DateTime, Utc};

use crate::record::{IndexValue, NoteRecord, PropertyValue, ScanValue};

/// Split a comma-separated property list into candidate names.
///
/// Segments are trimmed and empty segments dropped; an empty or
/// whitespace-only list yields no candidates.
pub fn parse_property_list(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Resolve the first present property from a comma-separated candidate list.
///
/// Presence follows each backend's own rules: the index backend requires one
/// of the two discriminated value shapes, the scan backend requires the key
/// to exist at all. Returns `None` when no candidate matches or the list is
/// empty.
pub fn resolve_first(record: &NoteRecord, list: &str) -> Option<PropertyValue> {
    for prop in parse_property_list(list) {
        let value = match record {
            NoteRecord::Index(entry) => entry.properties.get(prop).map(PropertyValue::from_index),
            NoteRecord::Scan(page) => page.properties.get(prop).map(PropertyValue::from_scan),
        };
        if let Some(value) = value {
            return Some(value);
        }
    }
    None
}

/// Resolve the first date-valued property from a candidate list.
///
/// Candidates whose value is present but not date-shaped are skipped, not
/// treated as a match.
pub fn resolve_first_date(record: &NoteRecord, list: &str) -> Option<DateTime<Utc>> {
    for prop in parse_property_list(list) {
        let date = match record {
            NoteRecord::Index(entry) => match entry.properties.get(prop) {
                Some(IndexValue::Date { date }) => Some(*date),
                _ => None,
            },
            NoteRecord::Scan(page) => match page.properties.get(prop) {
                Some(ScanValue::Date(date)) => Some(*date),
                _ => None,
            },
        };
        if date.is_some() {
            return date;
        }
    }
    None
}

/// Collect image paths from **every** property in a candidate list.
///
/// List-valued properties are flattened, link-shaped items unwrapped to
/// their target path, and whitespace-only entries excluded. Returns an
/// empty vector (never an absent value) when nothing matches.
pub fn resolve_all_images(record: &NoteRecord, list: &str) -> Vec<String> {
    let mut images = Vec::new();

    for prop in parse_property_list(list) {
        match record {
            NoteRecord::Index(entry) => {
                // Date-shaped values cannot hold image paths; skip them.
                let Some(IndexValue::Data { data }) = entry.properties.get(prop) else {
                    continue;
                };
                collect_images(&PropertyValue::from_json(data), &mut images);
            }
            NoteRecord::Scan(page) => {
                let Some(value) = page.properties.get(prop) else {
                    continue;
                };
                collect_images(&PropertyValue::from_scan(value), &mut images);
            }
        }
    }

    images
}

fn collect_images(value: &PropertyValue, out: &mut Vec<String>) {
    match value {
        PropertyValue::List(items) => {
            for item in items {
                push_image(item, out);
            }
        }
        other => push_image(other, out),
    }
}

fn push_image(value: &PropertyValue, out: &mut Vec<String>) {
    let s = match value {
        PropertyValue::Link { path } => path.clone(),
        other => other.coerce_string(),
    };
    let trimmed = s.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{IndexEntry, ScanPage};
    use chrono::TimeZone;
    use serde_json::json;

    fn index_record() -> NoteRecord {
        let date = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
        NoteRecord::Index(
            IndexEntry::new("notes/alpha.md")
                .with_property("title", IndexValue::Data { data: json!("Alpha") })
                .with_property("subtitle", IndexValue::Data { data: json!("Sub") })
                .with_property("published", IndexValue::Date { date })
                .with_property("cover", IndexValue::Data { data: json!("img/a.png") })
                .with_property(
                    "gallery",
                    IndexValue::Data {
                        data: json!(["img/b.png", "  ", "img/c.png"]),
                    },
                ),
        )
    }

    fn scan_record() -> NoteRecord {
        let date = Utc.with_ymd_and_hms(2024, 12, 24, 18, 0, 0).unwrap();
        NoteRecord::Scan(
            ScanPage::new("notes/beta.md")
                .with_property("title", ScanValue::Text("Beta".to_string()))
                .with_property("updated", ScanValue::Date(date))
                .with_property(
                    "cover",
                    ScanValue::Link {
                        path: "img/link.png".to_string(),
                    },
                )
                .with_property(
                    "gallery",
                    ScanValue::List(vec![
                        ScanValue::Link {
                            path: "img/d.png".to_string(),
                        },
                        ScanValue::Text("img/e.png".to_string()),
                    ]),
                ),
        )
    }

    #[test]
    fn test_parse_property_list() {
        assert_eq!(parse_property_list("a, b , ,c"), vec!["a", "b", "c"]);
        assert!(parse_property_list("").is_empty());
        assert!(parse_property_list("   ").is_empty());
        assert!(parse_property_list(",,,").is_empty());
    }

    #[test]
    fn test_resolve_first_takes_first_present() {
        let record = index_record();
        // "missing" is absent; "subtitle" wins over the later "title".
        let value = resolve_first(&record, "missing, subtitle, title").unwrap();
        assert_eq!(value.coerce_string(), "Sub");
    }

    #[test]
    fn test_resolve_first_ignores_later_values() {
        let record = scan_record();
        let value = resolve_first(&record, "title, cover").unwrap();
        assert_eq!(value.coerce_string(), "Beta");
    }

    #[test]
    fn test_resolve_first_empty_list_is_none() {
        let record = index_record();
        assert!(resolve_first(&record, "").is_none());
        assert!(resolve_first(&record, "   ").is_none());
    }

    #[test]
    fn test_resolve_first_no_match() {
        let record = scan_record();
        assert!(resolve_first(&record, "nope, nothing").is_none());
    }

    #[test]
    fn test_resolve_first_null_data_is_present() {
        let record = NoteRecord::Index(
            IndexEntry::new("n.md").with_property("empty", IndexValue::Data { data: json!(null) }),
        );
        let value = resolve_first(&record, "empty").unwrap();
        assert_eq!(value.coerce_string(), "");
    }

    #[test]
    fn test_resolve_first_date_skips_non_dates() {
        let record = index_record();
        // "title" is present but text-shaped; the resolver must skip it.
        let date = resolve_first_date(&record, "title, published").unwrap();
        assert_eq!(date.timestamp_millis() % 1000, 0);

        let record = scan_record();
        let date = resolve_first_date(&record, "title, updated");
        assert!(date.is_some());
    }

    #[test]
    fn test_resolve_first_date_none_when_only_text() {
        let record = scan_record();
        assert!(resolve_first_date(&record, "title").is_none());
    }

    #[test]
    fn test_resolve_all_images_concatenates() {
        let record = index_record();
        let images = resolve_all_images(&record, "cover, gallery");
        assert_eq!(images, vec!["img/a.png", "img/b.png", "img/c.png"]);
    }

    #[test]
    fn test_resolve_all_images_unwraps_links() {
        let record = scan_record();
        let images = resolve_all_images(&record, "cover, gallery");
        assert_eq!(images, vec!["img/link.png", "img/d.png", "img/e.png"]);
    }

    #[test]
    fn test_resolve_all_images_monotonic_in_list_length() {
        let record = index_record();
        let short = resolve_all_images(&record, "cover");
        let long = resolve_all_images(&record, "cover, gallery");
        assert_eq!(&long[..short.len()], &short[..]);
        assert!(long.len() >= short.len());
    }

    #[test]
    fn test_resolve_all_images_skips_dates_and_blanks() {
        let record = index_record();
        // "published" is date-shaped and contributes nothing; whitespace-only
        // gallery entries are excluded.
        let images = resolve_all_images(&record, "published, gallery");
        assert_eq!(images, vec!["img/b.png", "img/c.png"]);
    }

    #[test]
    fn test_resolve_all_images_empty_never_null() {
        let record = scan_record();
        assert!(resolve_all_images(&record, "").is_empty());
        assert!(resolve_all_images(&record, "missing").is_empty());
    }
}
