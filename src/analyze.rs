//! Title mention analysis.
//!
//! This module contains the counting and scoring functions:
//! - Sliding-window phrase counting (overlapping and non-overlapping)
//! - Title-to-lyrics percentage
//! - Per-song and batch analysis
//! - Stable descending sorts for the stats tables

use rayon::prelude::*;
use serde::Deserialize;

use crate::models::{Song, SongStats};
use crate::normalize::Normalizer;

/// How repeated title phrases are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Every window position is checked: [a,a,a] holds [a,a] twice.
    #[default]
    Overlapping,
    /// After a match the window jumps past it: [a,a,a] holds [a,a] once.
    NonOverlapping,
}

// ============================================================================
// Counting
// ============================================================================

/// Count every start offset where `title` matches `lyrics` token for token.
/// Overlapping matches count independently. An empty title never matches.
pub fn count_phrase_occurrences(title: &[String], lyrics: &[String]) -> usize {
    if title.is_empty() || title.len() > lyrics.len() {
        return 0;
    }

    lyrics
        .windows(title.len())
        .filter(|window| *window == title)
        .count()
}

/// Like `count_phrase_occurrences`, but resumes after the end of each match.
pub fn count_non_overlapping(title: &[String], lyrics: &[String]) -> usize {
    if title.is_empty() || title.len() > lyrics.len() {
        return 0;
    }

    let mut count = 0;
    let mut i = 0;
    while i + title.len() <= lyrics.len() {
        if lyrics[i..i + title.len()] == *title {
            count += 1;
            i += title.len();
        } else {
            i += 1;
        }
    }
    count
}

// ============================================================================
// Percentage
// ============================================================================

/// Round to 2 decimal places, ties away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of lyric words taken up by title mentions, as a percentage.
/// Not capped at 100: overlapping mentions can claim the same word twice.
pub fn title_percentage(mention_count: usize, title_word_count: usize, total_words: usize) -> f64 {
    if total_words == 0 {
        return 0.0;
    }

    let title_words_in_lyrics = (mention_count * title_word_count) as f64;
    round2(title_words_in_lyrics / total_words as f64 * 100.0)
}

// ============================================================================
// Analyzer
// ============================================================================

/// Turns songs into title statistics. Holds no mutable state, so one analyzer
/// can be shared across the rayon pool.
#[derive(Debug, Clone, Default)]
pub struct LyricsAnalyzer {
    normalizer: Normalizer,
    match_mode: MatchMode,
}

impl LyricsAnalyzer {
    pub fn new(normalizer: Normalizer, match_mode: MatchMode) -> Self {
        Self {
            normalizer,
            match_mode,
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Count title mentions using the configured mode.
    pub fn count_mentions(&self, title: &[String], lyrics: &[String]) -> usize {
        match self.match_mode {
            MatchMode::Overlapping => count_phrase_occurrences(title, lyrics),
            MatchMode::NonOverlapping => count_non_overlapping(title, lyrics),
        }
    }

    /// Analyze a single song. Always succeeds for a well-formed `Song`.
    pub fn analyze(&self, song: &Song) -> SongStats {
        let title_tokens = self.normalizer.normalize(&song.title);
        let lyrics_tokens = self.normalizer.normalize(&song.lyrics);

        let title_mention_count = self.count_mentions(&title_tokens, &lyrics_tokens);
        let total_words = lyrics_tokens.len();

        SongStats {
            song: song.clone(),
            title_mention_count,
            title_mention_percentage: title_percentage(
                title_mention_count,
                title_tokens.len(),
                total_words,
            ),
            total_words,
        }
    }

    /// Analyze every song in parallel. Output order matches input order.
    pub fn analyze_all(&self, songs: &[Song]) -> Vec<SongStats> {
        songs.par_iter().map(|song| self.analyze(song)).collect()
    }
}

// ============================================================================
// Sorting
// ============================================================================

/// Most title mentions first. Ties keep input order.
pub fn sort_by_title_mentions(stats: &[SongStats]) -> Vec<SongStats> {
    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.title_mention_count.cmp(&a.title_mention_count));
    sorted
}

/// Highest title-to-lyrics percentage first. Ties keep input order.
pub fn sort_by_title_percentage(stats: &[SongStats]) -> Vec<SongStats> {
    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.title_mention_percentage.total_cmp(&a.title_mention_percentage));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn stats_with(id: i64, count: usize, pct: f64) -> SongStats {
        SongStats {
            song: Song::new(id, format!("Song {}", id), ""),
            title_mention_count: count,
            title_mention_percentage: pct,
            total_words: 0,
        }
    }

    fn ids(stats: &[SongStats]) -> Vec<i64> {
        stats.iter().map(|s| s.song.id).collect()
    }

    #[test]
    fn test_count_overlapping() {
        assert_eq!(count_phrase_occurrences(&tokens(&["a", "a"]), &tokens(&["a", "a", "a"])), 2);
        assert_eq!(
            count_phrase_occurrences(
                &tokens(&["robot", "stop"]),
                &tokens(&["robot", "stop", "the", "robot", "stop", "now"])
            ),
            2
        );
    }

    #[test]
    fn test_count_non_overlapping() {
        assert_eq!(count_non_overlapping(&tokens(&["a", "a"]), &tokens(&["a", "a", "a"])), 1);
        assert_eq!(count_non_overlapping(&tokens(&["a", "a"]), &tokens(&["a", "a", "a", "a"])), 2);
        assert_eq!(count_non_overlapping(&tokens(&["b"]), &tokens(&["a", "b", "b"])), 2);
    }

    #[test]
    fn test_count_guards() {
        assert_eq!(count_phrase_occurrences(&[], &tokens(&["a"])), 0);
        assert_eq!(count_phrase_occurrences(&[], &[]), 0);
        assert_eq!(count_phrase_occurrences(&tokens(&["a", "b"]), &tokens(&["a"])), 0);
        assert_eq!(count_non_overlapping(&[], &tokens(&["a"])), 0);
        assert_eq!(count_non_overlapping(&tokens(&["a", "b"]), &tokens(&["a"])), 0);
    }

    #[test]
    fn test_title_percentage() {
        assert_eq!(title_percentage(2, 2, 7), 57.14);
        assert_eq!(title_percentage(3, 2, 100), 6.0);
        assert_eq!(title_percentage(0, 1, 10), 0.0);
        assert_eq!(title_percentage(5, 1, 0), 0.0);
        // Overlapping mentions can exceed 100
        assert_eq!(title_percentage(2, 2, 3), 133.33);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.0 / 3.0 * 100.0), 33.33);
        assert_eq!(round2(2.0 / 3.0 * 100.0), 66.67);
        assert_eq!(round2(12.5), 12.5);
    }

    #[test]
    fn test_analyze_end_to_end() {
        let analyzer = LyricsAnalyzer::default();
        let song = Song::new(1, "Robot Stop", "Robot stop. Robot stop now. Keep going.");
        let stats = analyzer.analyze(&song);
        assert_eq!(stats.total_words, 7);
        assert_eq!(stats.title_mention_count, 2);
        assert_eq!(stats.title_mention_percentage, 57.14);
        assert_eq!(stats.song, song);
    }

    #[test]
    fn test_analyze_carries_metadata() {
        use crate::models::Album;

        let song = Song {
            id: 2009617,
            title: "Gila Monster".to_string(),
            artist: Some("King Gizzard & the Lizard Wizard".to_string()),
            album: Some(Album {
                name: "Infest the Rats' Nest".to_string(),
                id: Some(533021),
                full_title: Some("Infest the Rats' Nest by King Gizzard".to_string()),
                url: Some("https://example.com/albums/infest".to_string()),
                cover_art_url: Some("https://example.com/infest.jpg".to_string()),
                api_path: Some("/albums/533021".to_string()),
                release_date_for_display: Some("August 16, 2019".to_string()),
            }),
            year: Some("2019".to_string()),
            lyrics: "Gila monster, gila monster!".to_string(),
            url: Some("https://example.com/gila-monster-lyrics".to_string()),
        };
        let stats = LyricsAnalyzer::default().analyze(&song);
        assert_eq!(stats.song, song);
        assert_eq!(stats.title_mention_count, 2);
        assert_eq!(stats.total_words, 4);
        assert_eq!(stats.title_mention_percentage, 100.0);
    }

    #[test]
    fn test_analyze_empty_lyrics() {
        let stats = LyricsAnalyzer::default().analyze(&Song::new(2, "X", ""));
        assert_eq!(stats.total_words, 0);
        assert_eq!(stats.title_mention_count, 0);
        assert_eq!(stats.title_mention_percentage, 0.0);
    }

    #[test]
    fn test_analyze_punctuation_only_title() {
        let stats = LyricsAnalyzer::default().analyze(&Song::new(3, "?!", "what ?! now"));
        assert_eq!(stats.title_mention_count, 0);
        assert_eq!(stats.title_mention_percentage, 0.0);
        assert_eq!(stats.total_words, 2);
    }

    #[test]
    fn test_analyze_symbol_title() {
        let song = Song::new(4, "Danger $$$", "danger money, DANGER $$$ danger");
        let stats = LyricsAnalyzer::default().analyze(&song);
        assert_eq!(stats.title_mention_count, 2);
        assert_eq!(stats.total_words, 5);
        assert_eq!(stats.title_mention_percentage, 80.0);
    }

    #[test]
    fn test_analyze_non_overlapping_mode() {
        let analyzer = LyricsAnalyzer::new(Normalizer::default(), MatchMode::NonOverlapping);
        let stats = analyzer.analyze(&Song::new(5, "Go Go", "go go go"));
        assert_eq!(stats.title_mention_count, 1);
        assert_eq!(stats.title_mention_percentage, 66.67);
    }

    #[test]
    fn test_analyze_all_preserves_order() {
        let songs: Vec<Song> = (1..=50)
            .map(|i| Song::new(i, "la", "la ".repeat(i as usize)))
            .collect();
        let stats = LyricsAnalyzer::default().analyze_all(&songs);
        assert_eq!(stats.len(), 50);
        for (i, s) in stats.iter().enumerate() {
            assert_eq!(s.song.id, i as i64 + 1);
            assert_eq!(s.title_mention_count, i + 1);
        }
    }

    #[test]
    fn test_analyze_all_empty() {
        assert!(LyricsAnalyzer::default().analyze_all(&[]).is_empty());
    }

    #[test]
    fn test_sort_by_title_mentions_stable() {
        let input = vec![
            stats_with(1, 2, 0.0),
            stats_with(2, 5, 0.0),
            stats_with(3, 2, 0.0),
            stats_with(4, 5, 0.0),
            stats_with(5, 0, 0.0),
        ];
        let sorted = sort_by_title_mentions(&input);
        assert_eq!(ids(&sorted), vec![2, 4, 1, 3, 5]);
        // Input untouched
        assert_eq!(ids(&input), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sort_by_title_percentage_stable() {
        let input = vec![
            stats_with(1, 0, 10.5),
            stats_with(2, 0, 57.14),
            stats_with(3, 0, 10.5),
            stats_with(4, 0, 0.0),
            stats_with(5, 0, 57.14),
        ];
        let sorted = sort_by_title_percentage(&input);
        assert_eq!(ids(&sorted), vec![2, 5, 1, 3, 4]);
    }
}
