//! Reading the scraped lyrics document.
//!
//! The document is a JSON array of song objects. Each record is decoded on its
//! own: records with mistyped fields or missing `title`/`lyrics` are skipped and
//! reported; they never abort the rest of the batch.

use anyhow::{Context, Result};
use std::path::Path;

use crate::error::AnalyzeError;
use crate::models::{RawSong, SkippedSong, Song};

/// Songs that passed validation plus the records that did not.
#[derive(Debug, Default)]
pub struct LoadedSongs {
    pub songs: Vec<Song>,
    pub skipped: Vec<SkippedSong>,
}

impl LoadedSongs {
    /// Total records seen in the document.
    pub fn total(&self) -> usize {
        self.songs.len() + self.skipped.len()
    }
}

/// Parse a lyrics document from a JSON string.
pub fn parse_songs(json: &str) -> Result<LoadedSongs> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(json).context("Lyrics document is not a JSON array")?;
    Ok(validate_songs(records))
}

/// Read and parse a lyrics document from disk.
pub fn load_songs(path: &Path) -> Result<LoadedSongs> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read lyrics document {}", path.display()))?;
    parse_songs(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Decode one record and check it carries the fields analysis needs.
fn decode_record(record: serde_json::Value, position: usize) -> Result<Song, AnalyzeError> {
    let raw: RawSong = serde_json::from_value(record).map_err(|e| AnalyzeError::InvalidRecord {
        position,
        message: e.to_string(),
    })?;
    Song::from_raw(raw, position)
}

/// Split records into well-formed songs and skipped entries, keeping order.
pub fn validate_songs(records: Vec<serde_json::Value>) -> LoadedSongs {
    let mut loaded = LoadedSongs::default();

    for (idx, record) in records.into_iter().enumerate() {
        let position = idx + 1;
        match decode_record(record, position) {
            Ok(song) => loaded.songs.push(song),
            Err(reason) => {
                log::warn!("Skipping record #{}: {}", position, reason);
                loaded.skipped.push(SkippedSong { position, reason });
            }
        }
    }

    loaded
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"[
        {
            "id": 101,
            "title": "Robot Stop",
            "artist": "King Gizzard & the Lizard Wizard",
            "album": {
                "api_path": "/albums/1",
                "cover_art_url": "https://example.com/nonagon.jpg",
                "full_title": "Nonagon Infinity by King Gizzard & the Lizard Wizard",
                "id": 1,
                "name": "Nonagon Infinity",
                "url": "https://example.com/nonagon"
            },
            "year": "2016",
            "lyrics": "Robot stop. Robot stop now.",
            "url": "https://example.com/robot-stop"
        },
        { "id": 102, "title": "Untitled", "lyrics": null },
        { "title": "Gamma Knife", "lyrics": "", "album": null, "year": null }
    ]"#;

    #[test]
    fn test_parse_songs_skips_malformed() {
        let loaded = parse_songs(DOCUMENT).unwrap();
        assert_eq!(loaded.total(), 3);
        assert_eq!(loaded.songs.len(), 2);
        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.skipped[0].position, 2);
        assert_eq!(
            loaded.skipped[0].reason,
            AnalyzeError::InvalidInput { id: 102, field: "lyrics" }
        );
    }

    #[test]
    fn test_parse_songs_carries_metadata() {
        let loaded = parse_songs(DOCUMENT).unwrap();
        let first = &loaded.songs[0];
        assert_eq!(first.id, 101);
        assert_eq!(first.album_name(), "Nonagon Infinity");
        assert_eq!(first.year.as_deref(), Some("2016"));
        assert_eq!(first.url.as_deref(), Some("https://example.com/robot-stop"));

        // Missing id falls back to the 1-based position
        let third = &loaded.songs[1];
        assert_eq!(third.id, 3);
        assert!(third.album.is_none());
    }

    #[test]
    fn test_mistyped_record_skipped_between_good_ones() {
        let loaded = parse_songs(
            r#"[
                { "id": 1, "title": "Robot Stop", "lyrics": "robot stop" },
                { "id": 2, "title": 12345, "lyrics": "numbers" },
                { "id": 3, "title": "Hot Water", "lyrics": "hot water", "album": "not an object" },
                { "id": 4, "title": "Hot Water", "lyrics": "hot water hot water" }
            ]"#,
        )
        .unwrap();
        assert_eq!(loaded.total(), 4);
        let ids: Vec<i64> = loaded.songs.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(loaded.skipped.len(), 2);
        assert_eq!(loaded.skipped[0].position, 2);
        assert_eq!(loaded.skipped[1].position, 3);
        assert!(matches!(
            &loaded.skipped[0].reason,
            AnalyzeError::InvalidRecord { position: 2, message } if message.contains("invalid type")
        ));
    }

    #[test]
    fn test_parse_songs_rejects_non_array() {
        assert!(parse_songs(r#"{"title": "x"}"#).is_err());
    }

    #[test]
    fn test_load_songs_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyrics.json");
        std::fs::write(&path, DOCUMENT).unwrap();
        let loaded = load_songs(&path).unwrap();
        assert_eq!(loaded.songs.len(), 2);
    }
}
