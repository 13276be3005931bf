//! Collection pipeline: ordering, shuffle, and display cutoff.
//!
//! Normalizes a record list, applies the active sort method, honors the
//! per-view shuffle flag, and truncates to the display cutoff — strictly in
//! that order, since truncating before ordering would silently bias random
//! and shuffled results.
//!
//! Shuffle state is owned by the caller, one value per visible view, and
//! passed in by `&mut`: the pipeline itself holds no state between builds,
//! so two views on screen keep independent shuffle behavior by
//! construction.

use rand::Rng;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use vitrine_core::{CardModel, NoteRecord, SortKey, SortMethod};

use crate::config::EffectiveSettings;
use crate::content::ContentProvider;
use crate::normalize::normalize_record;

// =============================================================================
// SHUFFLE STATE
// =============================================================================

/// Per-view shuffle state, owned by the caller.
///
/// While the flag is set, the retained pre-shuffle order is never
/// overwritten and the shuffled order is reused across builds so re-renders
/// do not reshuffle. Clearing the flag reverts the view to the underlying
/// sort order on the next build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShuffleState {
    is_shuffled: bool,
    base_order: Vec<String>,
    shuffled_order: Vec<String>,
}

impl ShuffleState {
    /// Fresh, unshuffled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the view is currently shuffled.
    pub fn is_shuffled(&self) -> bool {
        self.is_shuffled
    }

    /// Set the shuffle flag.
    pub fn set_shuffled(&mut self, shuffled: bool) {
        self.is_shuffled = shuffled;
    }

    /// Flip the shuffle flag and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.is_shuffled = !self.is_shuffled;
        self.is_shuffled
    }

    /// The order the view had before shuffling (paths, in order). Empty
    /// when the view has never been shuffled or was un-shuffled.
    pub fn base_order(&self) -> &[String] {
        &self.base_order
    }

    fn shuffled_order_matches(&self, paths: &[String]) -> bool {
        if self.shuffled_order.len() != paths.len() {
            return false;
        }
        let stored: BTreeSet<&str> = self.shuffled_order.iter().map(String::as_str).collect();
        let current: BTreeSet<&str> = paths.iter().map(String::as_str).collect();
        stored == current
    }

    fn clear_orders(&mut self) {
        self.base_order.clear();
        self.shuffled_order.clear();
    }
}

// =============================================================================
// PIPELINE
// =============================================================================

/// One build pass over a record list.
#[derive(Debug, Clone)]
pub struct CardPipeline<'a> {
    settings: &'a EffectiveSettings,
    sort_method: SortMethod,
    display_limit: Option<usize>,
}

impl<'a> CardPipeline<'a> {
    /// Pipeline over the given effective settings and sort method.
    pub fn new(settings: &'a EffectiveSettings, sort_method: SortMethod) -> Self {
        Self {
            settings,
            sort_method,
            display_limit: None,
        }
    }

    /// Truncate output to at most `limit` cards, applied after ordering.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.display_limit = limit;
        self
    }

    /// Build the ordered card list.
    ///
    /// Records that normalize to no path are dropped. The same inputs (and
    /// the same random source state) always produce the same output.
    pub fn build<R: Rng + ?Sized>(
        &self,
        records: &[NoteRecord],
        content: &dyn ContentProvider,
        shuffle: &mut ShuffleState,
        rng: &mut R,
    ) -> Vec<CardModel> {
        let record_count = records.len();
        let mut cards: Vec<CardModel> = records
            .iter()
            .filter_map(|record| {
                normalize_record(record, self.settings, self.sort_method, content)
            })
            .collect();
        let dropped_count = record_count - cards.len();

        if self.sort_method == SortMethod::Random {
            // Stable per-build key: assigned once, then sorted like any
            // other method.
            for card in &mut cards {
                card.sort_key = SortKey::Random(rng.gen());
            }
        }
        sort_cards(&mut cards, self.sort_method);

        if shuffle.is_shuffled {
            let paths: Vec<String> = cards.iter().map(|c| c.path.clone()).collect();
            if shuffle.shuffled_order_matches(&paths) {
                reorder_by(&mut cards, &shuffle.shuffled_order);
            } else {
                shuffle.base_order = paths;
                fisher_yates(&mut cards, rng);
                shuffle.shuffled_order = cards.iter().map(|c| c.path.clone()).collect();
            }
        } else {
            shuffle.clear_orders();
        }

        if let Some(limit) = self.display_limit {
            cards.truncate(limit);
        }

        debug!(
            sort_method = %self.sort_method,
            record_count,
            card_count = cards.len(),
            dropped_count,
            shuffled = shuffle.is_shuffled,
            "card pipeline build complete"
        );

        cards
    }
}

fn sort_cards(cards: &mut [CardModel], method: SortMethod) {
    // Rust's sort_by is stable: equal keys keep their input order.
    match method {
        SortMethod::MtimeDesc => cards.sort_by(|a, b| b.mtime_ms.cmp(&a.mtime_ms)),
        SortMethod::MtimeAsc => cards.sort_by(|a, b| a.mtime_ms.cmp(&b.mtime_ms)),
        SortMethod::CtimeDesc => cards.sort_by(|a, b| b.ctime_ms.cmp(&a.ctime_ms)),
        SortMethod::CtimeAsc => cards.sort_by(|a, b| a.ctime_ms.cmp(&b.ctime_ms)),
        SortMethod::Title => cards.sort_by(|a, b| title_key(a).cmp(title_key(b))),
        SortMethod::Size => cards.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes)),
        SortMethod::Random => cards.sort_by(|a, b| random_key(a).cmp(&random_key(b))),
    }
}

fn title_key(card: &CardModel) -> &str {
    match &card.sort_key {
        SortKey::Title(key) => key,
        _ => &card.title,
    }
}

fn random_key(card: &CardModel) -> u64 {
    match card.sort_key {
        SortKey::Random(key) => key,
        _ => 0,
    }
}

fn reorder_by(cards: &mut [CardModel], order: &[String]) {
    let position: HashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(index, path)| (path.as_str(), index))
        .collect();
    cards.sort_by_key(|card| position.get(card.path.as_str()).copied().unwrap_or(usize::MAX));
}

/// Standard in-place Fisher–Yates shuffle over the inclusive range `[0, i]`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Pick a uniformly random card from the visible list.
pub fn pick_random<'c, R: Rng + ?Sized>(
    cards: &'c [CardModel],
    rng: &mut R,
) -> Option<&'c CardModel> {
    if cards.is_empty() {
        return None;
    }
    cards.get(rng.gen_range(0..cards.len()))
}

// =============================================================================
// TESTS
// =============================================================================
