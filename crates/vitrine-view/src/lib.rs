//! # vitrine-view
//!
//! Settings resolution and card pipeline for vitrine views.
//!
//! This crate turns heterogeneous backend note records plus layered user
//! configuration into ordered, presentation-ready card models:
//!
//! - Layered configuration with backward-compatible schema migration
//! - Metadata slot resolution with duplicate suppression
//! - Record-to-card normalization with multi-property fallback chains
//! - Sorting, shuffle state, and display cutoff
//!
//! ## Example
//!
//! ```
//! use vitrine_core::SortMethod;
//! use vitrine_view::{
//!     read_config, CardPipeline, GlobalSettings, NoContent, ShuffleState, ViewDefaults,
//! };
//!
//! let raw = serde_json::json!({"titleProperty": "headline"});
//! let settings = read_config(&raw, &GlobalSettings::default(), &ViewDefaults::default());
//!
//! let pipeline = CardPipeline::new(&settings, SortMethod::MtimeDesc).with_limit(Some(50));
//! let cards = pipeline.build(
//!     &[],
//!     &NoContent,
//!     &mut ShuffleState::new(),
//!     &mut rand::thread_rng(),
//! );
//! assert!(cards.is_empty());
//! ```

pub mod config;
pub mod content;
pub mod normalize;
pub mod pipeline;
pub mod settings;
pub mod slots;

// Re-export core types
pub use vitrine_core::*;

// Re-export view types
pub use config::{read_config, EffectiveSettings};
pub use content::{derive_preview, first_embedded_image, is_image_path, ContentProvider, NoContent};
pub use normalize::normalize_record;
pub use pipeline::{fisher_yates, pick_random, CardPipeline, ShuffleState};
pub use settings::{
    CardBackground, GlobalSettings, ListMarker, OpenFileAction, PluginData, RandomizeAction,
    ThumbnailCacheSize, ThumbnailPosition, TimestampSource, UiState, ViewDefaults, ViewMode,
    WidthMode,
};
pub use slots::{
    legacy_slots, resolve_pair, resolve_slots, timestamp_field_for, MetadataChoice, SlotLayout,
    TimestampField,
};
