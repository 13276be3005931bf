//! # vitrine-core
//!
//! Core types and resolution primitives for vitrine views.
//!
//! This crate provides the foundational data structures the view engine is
//! built on: the polymorphic note record model for the two query backends,
//! multi-property fallback resolution, timestamp formatting, and the
//! presentation-ready card model.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod model;
pub mod property;
pub mod record;
pub mod timestamp;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use model::{display_tag, CardModel, SortKey, SortMethod};
pub use property::{parse_property_list, resolve_all_images, resolve_first, resolve_first_date};
pub use record::{
    FileStat, IndexEntry, IndexValue, NoteRecord, PropertyValue, ScanPage, ScanValue,
};
pub use timestamp::{format_timestamp, now_ms, timestamp_glyph, TimestampGlyph};
