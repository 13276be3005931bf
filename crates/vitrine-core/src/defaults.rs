//! Centralized default constants for the vitrine engine.
//!
//! **This module is the single source of truth** for all shared default
//! values. Both crates reference these constants instead of defining their
//! own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// TIMESTAMPS
// =============================================================================

/// Recency window in milliseconds. Timestamps strictly newer than this
/// (relative to "now") render with hours and minutes; older ones render
/// date-only.
pub const RECENT_WINDOW_MS: i64 = 86_400_000;

// =============================================================================
// PREVIEW TEXT
// =============================================================================

/// Maximum preview length in characters. Previews accumulate whole lines
/// until this budget is reached.
pub const SNIPPET_LENGTH: usize = 200;

/// Maximum number of content lines folded into a preview.
pub const SNIPPET_MAX_LINES: usize = 3;

// =============================================================================
// THUMBNAILS
// =============================================================================

/// Accepted image file extensions for embed fallback, lowercase with dot.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    ".avif", ".bmp", ".gif", ".jpeg", ".jpg", ".png", ".svg", ".webp",
];

// =============================================================================
// LAYOUT
// =============================================================================

/// Default minimum card width in pixels for grid layout.
pub const MIN_CARD_WIDTH: u32 = 400;

/// Default minimum number of masonry columns.
pub const MIN_MASONRY_COLUMNS: u32 = 2;

/// Default minimum number of grid columns.
pub const MIN_GRID_COLUMNS: u32 = 1;

/// Default maximum height of the results area in pixels. Zero means
/// unlimited.
pub const QUERY_HEIGHT: u32 = 0;
