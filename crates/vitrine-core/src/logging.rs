//! Structured logging schema and field name constants for vitrine.
//!
//! Both crates use these constants for consistent structured logging fields,
//! so the host application's log aggregation can query by standardized names
//! across the whole engine.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | WARN  | Recoverable issue, automatic correction applied (e.g. migrated config) |
//! | INFO  | Lifecycle events, rarely used by this library |
//! | DEBUG | Decision points, build completions, config choices |
//! | TRACE | Per-record iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "settings", "pipeline", "resolver"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "migration", "slots", "normalize", "shuffle"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "read_config", "build", "resolve_first"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Path of the note record being operated on.
pub const NOTE_PATH: &str = "note_path";

/// Identifier of the view instance the settings belong to.
pub const VIEW_ID: &str = "view_id";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Number of records supplied to a pipeline build.
pub const RECORD_COUNT: &str = "record_count";

/// Number of cards produced by a pipeline build.
pub const CARD_COUNT: &str = "card_count";

/// Number of records dropped for having no resolvable path.
pub const DROPPED_COUNT: &str = "dropped_count";

// ─── Pipeline fields ───────────────────────────────────────────────────────

/// Sort method applied to a build.
pub const SORT_METHOD: &str = "sort_method";

/// Whether the shuffle flag was active for a build.
pub const SHUFFLED: &str = "shuffled";

/// Display cutoff applied after ordering.
pub const DISPLAY_LIMIT: &str = "display_limit";

// ─── Settings fields ───────────────────────────────────────────────────────

/// Configuration key involved in a migration or coercion event.
pub const CONFIG_KEY: &str = "config_key";

/// Metadata slot index corrected by duplicate suppression.
pub const SLOT_INDEX: &str = "slot_index";
