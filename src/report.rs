//! Plain-text stats tables.
//!
//! Two views over the same stats: the songs that say their title most often,
//! and the songs whose lyrics are most made up of their title.

use std::fmt::Write;

use crate::analyze::{sort_by_title_mentions, sort_by_title_percentage};
use crate::models::SongStats;

const SONG_WIDTH: usize = 36;
const ALBUM_WIDTH: usize = 30;

/// Truncate to `width` characters, marking the cut with "~".
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('~');
        cut
    }
}

fn header(out: &mut String, title: &str, columns: &str) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{:-<80}", "");
    let _ = writeln!(out, "{}", columns);
    let _ = writeln!(out, "{:-<80}", "");
}

/// "Most Title Mentions": Song, Album, Mentions, Total Words.
pub fn mentions_table(stats: &[SongStats], limit: usize) -> String {
    let mut out = String::new();
    header(
        &mut out,
        "Most Title Mentions",
        &format!(
            "{:<3} {:<sw$} {:<aw$} {:>8} {:>11}",
            "#",
            "Song",
            "Album",
            "Mentions",
            "Total Words",
            sw = SONG_WIDTH,
            aw = ALBUM_WIDTH
        ),
    );

    let sorted = sort_by_title_mentions(stats);
    if sorted.is_empty() || limit == 0 {
        out.push_str("No songs to show.\n");
        return out;
    }

    for (rank, s) in sorted.iter().take(limit).enumerate() {
        let _ = writeln!(
            out,
            "{:<3} {:<sw$} {:<aw$} {:>8} {:>11}",
            rank + 1,
            fit(&s.song.title, SONG_WIDTH),
            fit(s.song.album_name(), ALBUM_WIDTH),
            s.title_mention_count,
            s.total_words,
            sw = SONG_WIDTH,
            aw = ALBUM_WIDTH
        );
    }
    out
}

/// "Highest Title-to-Lyrics Ratio": Song, Album, Percentage, Mentions.
pub fn percentage_table(stats: &[SongStats], limit: usize) -> String {
    let mut out = String::new();
    header(
        &mut out,
        "Highest Title-to-Lyrics Ratio",
        &format!(
            "{:<3} {:<sw$} {:<aw$} {:>10} {:>8}",
            "#",
            "Song",
            "Album",
            "Percentage",
            "Mentions",
            sw = SONG_WIDTH,
            aw = ALBUM_WIDTH
        ),
    );

    let sorted = sort_by_title_percentage(stats);
    if sorted.is_empty() || limit == 0 {
        out.push_str("No songs to show.\n");
        return out;
    }

    for (rank, s) in sorted.iter().take(limit).enumerate() {
        let _ = writeln!(
            out,
            "{:<3} {:<sw$} {:<aw$} {:>10} {:>8}",
            rank + 1,
            fit(&s.song.title, SONG_WIDTH),
            fit(s.song.album_name(), ALBUM_WIDTH),
            format!("{:.2}%", s.title_mention_percentage),
            s.title_mention_count,
            sw = SONG_WIDTH,
            aw = ALBUM_WIDTH
        );
    }
    out
}
