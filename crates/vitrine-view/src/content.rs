//! Raw-content fallbacks for preview text and thumbnails.
//!
//! The host supplies raw note text through [`ContentProvider`]; this module
//! owns the decisions layered on top of it: which lines make up a text
//! preview, and which embedded image reference is accepted as a thumbnail.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use vitrine_core::defaults::{IMAGE_EXTENSIONS, SNIPPET_LENGTH, SNIPPET_MAX_LINES};

// =============================================================================
// CONTENT PROVIDER
// =============================================================================

/// Source of raw note text, keyed by vault-relative path.
///
/// The engine never reads disk itself; one of these is handed in per build.
pub trait ContentProvider {
    /// Raw markdown content for a note, if the host has it.
    fn raw_content(&self, path: &str) -> Option<&str>;
}

/// Provider with no content; every fallback resolves to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl ContentProvider for NoContent {
    fn raw_content(&self, _path: &str) -> Option<&str> {
        None
    }
}

impl ContentProvider for HashMap<String, String> {
    fn raw_content(&self, path: &str) -> Option<&str> {
        self.get(path).map(String::as_str)
    }
}

// =============================================================================
// PREVIEW TEXT DERIVATION
// =============================================================================

/// Derive preview text from raw note content.
///
/// Takes the first non-empty lines after the YAML frontmatter, skipping a
/// leading line (plain or heading) that duplicates the title or file name,
/// and one further line when `omit_extra_line` is set. Lines accumulate up
/// to the snippet budget. Returns `None` when nothing usable remains.
pub fn derive_preview(
    raw: &str,
    title: &str,
    file_name: &str,
    omit_extra_line: bool,
) -> Option<String> {
    let body = skip_frontmatter(raw);

    let mut lines = body
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !is_embed_line(l));

    let mut first = lines.next()?;
    if duplicates_title(first, title, file_name) {
        first = lines.next()?;
    }
    if omit_extra_line {
        first = lines.next()?;
    }

    let mut preview = String::new();
    let mut count = 0;
    for line in std::iter::once(first).chain(lines) {
        if count >= SNIPPET_MAX_LINES || preview.len() >= SNIPPET_LENGTH {
            break;
        }
        if !preview.is_empty() {
            preview.push(' ');
        }
        preview.push_str(line);
        count += 1;
    }

    if preview.len() > SNIPPET_LENGTH {
        let cut = preview
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|&i| i <= SNIPPET_LENGTH)
            .last()
            .unwrap_or(0);
        preview.truncate(cut);
    }

    if preview.is_empty() {
        None
    } else {
        Some(preview)
    }
}

/// Everything after a leading YAML frontmatter block, or the whole text.
fn skip_frontmatter(raw: &str) -> &str {
    let trimmed = raw.trim_start_matches('\u{feff}');
    if !trimmed.starts_with("---") {
        return raw;
    }
    let after_open = match trimmed.split_once('\n') {
        Some((first, rest)) if first.trim_end() == "---" => rest,
        _ => return raw,
    };
    for (offset, line) in line_spans(after_open) {
        if line.trim_end() == "---" {
            return &after_open[offset + line.len()..];
        }
    }
    raw
}

fn line_spans(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |line| {
        let start = offset;
        offset += line.len();
        (start, line)
    })
}

/// Whether a line is nothing but an image/asset embed. Such lines make
/// useless previews and are passed over.
fn is_embed_line(line: &str) -> bool {
    let full_match = |re: &Regex| {
        re.find(line)
            .map_or(false, |m| m.start() == 0 && m.end() == line.len())
    };
    full_match(&WIKILINK_EMBED) || full_match(&MARKDOWN_EMBED)
}

/// Whether a content line merely repeats the note's title or file name.
/// Heading markers are ignored for the comparison.
fn duplicates_title(line: &str, title: &str, file_name: &str) -> bool {
    let stripped = line.trim_start_matches('#').trim();
    let title = title.trim();
    let file_name = file_name.trim();

    (!title.is_empty() && stripped.eq_ignore_ascii_case(title))
        || (!file_name.is_empty() && stripped.eq_ignore_ascii_case(file_name))
}

// =============================================================================
// EMBEDDED IMAGE DETECTION
// =============================================================================

static WIKILINK_EMBED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[\[([^\]\|#]+)(?:[\|#][^\]]*)?\]\]").unwrap());

static MARKDOWN_EMBED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\(<?([^)>\s]+)>?[^)]*\)").unwrap());

/// Whether a path has an accepted image extension.
pub fn is_image_path(path: &str) -> bool {
    let lower = path.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// First embedded image reference in raw note content.
///
/// Both wikilink (`![[cover.png]]`) and markdown (`![alt](cover.png)`)
/// syntax are scanned; the earliest match with an accepted extension wins.
pub fn first_embedded_image(raw: &str) -> Option<String> {
    let mut candidates: Vec<(usize, &str)> = Vec::new();

    for cap in WIKILINK_EMBED.captures_iter(raw) {
        let whole = cap.get(0)?;
        if let Some(target) = cap.get(1) {
            candidates.push((whole.start(), target.as_str()));
        }
    }
    for cap in MARKDOWN_EMBED.captures_iter(raw) {
        let whole = cap.get(0)?;
        if let Some(target) = cap.get(1) {
            candidates.push((whole.start(), target.as_str()));
        }
    }

    candidates.sort_by_key(|(start, _)| *start);
    candidates
        .into_iter()
        .map(|(_, target)| target.trim())
        .find(|target| is_image_path(target))
        .map(str::to_string)
}

// =============================================================================
// TESTS
// =============================================================================
