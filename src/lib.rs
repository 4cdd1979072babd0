//! Lyrics statistics library - shared modules for all binaries.

pub mod analyze;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod progress;
pub mod report;
pub mod safety;

pub use analyze::LyricsAnalyzer;
pub use error::AnalyzeError;
pub use models::{Album, Song, SongStats};

/// Application name for XDG paths
pub const APP_NAME: &str = "lyrics-stats";
