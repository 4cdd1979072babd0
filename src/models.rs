//! Core data models for lyrics analysis.
//!
//! This module contains the song records read from the lyrics document,
//! the derived statistics records, and the per-run summary.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::AnalyzeError;

// ============================================================================
// Input Models
// ============================================================================

/// Album metadata as scraped alongside the lyrics. Carried through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub name: String,
    pub id: Option<i64>,
    pub full_title: Option<String>,
    pub url: Option<String>,
    pub cover_art_url: Option<String>,
    pub api_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date_for_display: Option<String>,
}

/// Song record exactly as it appears in the lyrics document.
/// `title` and `lyrics` may be null or absent in scraped data.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSong {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<Album>,
    pub year: Option<String>,
    pub lyrics: Option<String>,
    pub url: Option<String>,
}

/// Well-formed song ready for analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<Album>,
    pub year: Option<String>,
    pub lyrics: String,
    pub url: Option<String>,
}

impl Song {
    /// Minimal constructor; metadata fields start empty.
    pub fn new(id: i64, title: impl Into<String>, lyrics: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: None,
            album: None,
            year: None,
            lyrics: lyrics.into(),
            url: None,
        }
    }

    /// Album name for display, "Unknown" when the song has no album.
    pub fn album_name(&self) -> &str {
        match &self.album {
            Some(album) if !album.name.is_empty() => &album.name,
            _ => "Unknown",
        }
    }

    /// Validate a raw record. `position` is the 1-based index in the document
    /// and stands in for a missing id.
    pub fn from_raw(raw: RawSong, position: usize) -> Result<Self, AnalyzeError> {
        let id = raw.id.unwrap_or(position as i64);
        let title = raw
            .title
            .ok_or(AnalyzeError::InvalidInput { id, field: "title" })?;
        let lyrics = raw
            .lyrics
            .ok_or(AnalyzeError::InvalidInput { id, field: "lyrics" })?;

        Ok(Self {
            id,
            title,
            artist: raw.artist,
            album: raw.album,
            year: raw.year,
            lyrics,
            url: raw.url,
        })
    }
}

// ============================================================================
// Output Models
// ============================================================================

/// Song plus the derived title statistics.
///
/// Serialized with the song fields flattened so the document keeps the shape
/// the front end reads (`titleMentionCount`, `titleMentionPercentage`,
/// `totalWords`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongStats {
    #[serde(flatten)]
    pub song: Song,
    pub title_mention_count: usize,
    pub title_mention_percentage: f64,
    pub total_words: usize,
}

/// Record that could not be analyzed, kept for reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedSong {
    pub position: usize,
    pub reason: AnalyzeError,
}

// ============================================================================
// Statistics (Instrumentation)
// ============================================================================

/// Per-run counts for instrumentation.
#[derive(Default, Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub songs_loaded: usize,
    pub songs_skipped: usize,
    pub songs_analyzed: usize,
    pub songs_with_mentions: usize,
    pub total_words: usize,
    pub total_title_mentions: usize,
    pub max_title_mentions: usize,

    // Timing
    pub elapsed_seconds: f64,
}

impl AnalysisSummary {
    pub fn from_stats(
        songs_loaded: usize,
        songs_skipped: usize,
        stats: &[SongStats],
        elapsed: Duration,
    ) -> Self {
        Self {
            songs_loaded,
            songs_skipped,
            songs_analyzed: stats.len(),
            songs_with_mentions: stats.iter().filter(|s| s.title_mention_count > 0).count(),
            total_words: stats.iter().map(|s| s.total_words).sum(),
            total_title_mentions: stats.iter().map(|s| s.title_mention_count).sum(),
            max_title_mentions: stats.iter().map(|s| s.title_mention_count).max().unwrap_or(0),
            elapsed_seconds: elapsed.as_secs_f64(),
        }
    }

    /// Share of analyzed songs that mention their title at least once, as a percentage
    pub fn mention_rate(&self) -> f64 {
        if self.songs_analyzed == 0 {
            0.0
        } else {
            100.0 * self.songs_with_mentions as f64 / self.songs_analyzed as f64
        }
    }

    /// Log summary in JSON format
    pub fn log_phase(&self, phase: &str) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            log::info!("[STATS:{}]\n{}", phase, json);
        }
    }

    /// Write summary to a JSON file
    pub fn write_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
