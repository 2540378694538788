use crate::foundation::error::{LyricframeError, LyricframeResult};
use crate::foundation::math::clamp01;

/// Default section tag for entries that arrive without one.
pub const DEFAULT_SECTION: &str = "verse";

fn default_section() -> String {
    DEFAULT_SECTION.to_string()
}

/// One timed unit of lyric text.
///
/// The wire shape matches what upstream sync pipelines produce: `line`,
/// `section`, `startTime`, `endTime` and an optional `glyph`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricEntry {
    /// Lyric text for this window.
    #[serde(rename = "line")]
    pub text: String,
    /// Structural tag grouping entries for background/theme purposes.
    #[serde(default = "default_section")]
    pub section: String,
    /// Window start in seconds (inclusive).
    pub start_time: f64,
    /// Window end in seconds (exclusive).
    pub end_time: f64,
    /// Optional decorative glyph spawned as particles when the entry
    /// becomes active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyph: Option<String>,
}

impl LyricEntry {
    /// Window length in seconds. Negative for malformed entries.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Entries with a zero or negative window are never active.
    pub fn is_degenerate(&self) -> bool {
        self.end_time <= self.start_time
    }

    /// Elapsed fraction of the entry's active window at time `t`, clamped to
    /// `[0, 1]`. Degenerate windows report `1.0`.
    pub fn progress_at(&self, t: f64) -> f64 {
        if self.is_degenerate() {
            return 1.0;
        }
        clamp01((t - self.start_time) / self.duration())
    }
}

/// Ordered lyric timeline with active-entry lookup.
///
/// The editing collaborators are responsible for handing over sorted,
/// non-overlapping entries; violations are tolerated (first match wins) and
/// logged once at construction.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    entries: Vec<LyricEntry>,
}

impl Timeline {
    pub fn new(entries: Vec<LyricEntry>) -> Self {
        warn_on_suspect_entries(&entries);
        Self { entries }
    }

    pub fn entries(&self) -> &[LyricEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LyricEntry> {
        self.entries.get(index)
    }

    /// Replace the whole entry list (live timing edits land between ticks).
    pub fn replace_entries(&mut self, entries: Vec<LyricEntry>) {
        warn_on_suspect_entries(&entries);
        self.entries = entries;
    }

    /// Index of the first entry with `start_time <= t < end_time`.
    ///
    /// Linear scan: entry counts are small and the first-match rule keeps the
    /// result stable under overlapping windows.
    pub fn active_index(&self, t: f64) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| t >= e.start_time && t < e.end_time)
    }

    /// Active entry at time `t`, if any.
    pub fn active_entry(&self, t: f64) -> Option<(usize, &LyricEntry)> {
        let idx = self.active_index(t)?;
        Some((idx, &self.entries[idx]))
    }

    /// Entries carrying the given section tag, in timeline order.
    pub fn entries_in_section<'a>(&'a self, section: &str) -> Vec<&'a LyricEntry> {
        self.entries
            .iter()
            .filter(|e| e.section == section)
            .collect()
    }

    /// Rank of the entry at `index` within its section, normalized to
    /// `[0, 1]`. Sections with a single entry report `0.0`.
    pub fn section_progress(&self, index: usize) -> f64 {
        let Some(entry) = self.entries.get(index) else {
            return 0.0;
        };
        let mut rank = 0usize;
        let mut count = 0usize;
        for (i, e) in self.entries.iter().enumerate() {
            if e.section != entry.section {
                continue;
            }
            if i < index {
                rank += 1;
            }
            count += 1;
        }
        if count <= 1 {
            0.0
        } else {
            rank as f64 / (count - 1) as f64
        }
    }

    /// Section of the earliest entry, used as a fallback before anything has
    /// played.
    pub fn first_section(&self) -> Option<&str> {
        self.entries.first().map(|e| e.section.as_str())
    }
}

/// Parse a timed lyric list from the upstream JSON wire format
/// (`[{"line", "section", "startTime", "endTime", "glyph"?}, ...]`).
pub fn entries_from_json(json: &str) -> LyricframeResult<Vec<LyricEntry>> {
    serde_json::from_str(json).map_err(|e| LyricframeError::serde(e.to_string()))
}

fn warn_on_suspect_entries(entries: &[LyricEntry]) {
    for (i, e) in entries.iter().enumerate() {
        if e.is_degenerate() {
            tracing::warn!(index = i, "lyric entry has a zero or negative window");
        }
        if let Some(next) = entries.get(i + 1)
            && next.start_time < e.end_time
        {
            tracing::warn!(index = i, "lyric entries overlap; first match wins");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
