//! Safety utilities to prevent clobbering the lyrics document.
//!
//! The scraped lyrics are slow to re-fetch, so the stats writer refuses any
//! output path that could be one of the source documents.

use anyhow::{bail, Result};
use std::path::Path;

/// File names the scraper writes; never valid as stats output.
const SOURCE_DOCUMENT_NAMES: [&str; 2] = ["lyrics.json", "lyrics_temp.json"];

/// Validates that an output path is safe to overwrite.
///
/// Checks:
/// - Output cannot be named like a scraped lyrics document
/// - Output filename must contain the required pattern (e.g., "stats")
/// - Output cannot be the same as any of the provided source paths
pub fn validate_output_path(
    output: &Path,
    required_pattern: &str,
    source_paths: &[&Path],
) -> Result<()> {
    let output_name = output.file_name().and_then(|n| n.to_str()).unwrap_or("");

    if SOURCE_DOCUMENT_NAMES.contains(&output_name) {
        bail!(
            "Safety check failed: output '{}' is named like a lyrics document",
            output.display()
        );
    }

    if !output_name.contains(required_pattern) {
        bail!(
            "Safety check failed: output file '{}' must contain '{}' in the name",
            output.display(),
            required_pattern
        );
    }

    for source in source_paths {
        if output == *source {
            bail!(
                "Safety check failed: output '{}' cannot be the same as source '{}'",
                output.display(),
                source.display()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_valid_output_stats() {
        let output = PathBuf::from("/tmp/lyrics_stats.json");
        let source = PathBuf::from("/data/lyrics.json");
        assert!(validate_output_path(&output, "stats", &[&source]).is_ok());
    }

    #[test]
    fn test_missing_pattern() {
        let output = PathBuf::from("/tmp/output.json");
        let source = PathBuf::from("/data/lyrics.json");
        let result = validate_output_path(&output, "stats", &[&source]);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must contain 'stats'"));
    }

    #[test]
    fn test_output_equals_source() {
        let path = PathBuf::from("/data/song_stats.json");
        let result = validate_output_path(&path, "stats", &[&path]);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("cannot be the same as source"));
    }

    #[test]
    fn test_lyrics_document_name_blocked() {
        let source = PathBuf::from("/data/other.json");
        for name in ["/tmp/lyrics.json", "/tmp/lyrics_temp.json"] {
            let result = validate_output_path(&PathBuf::from(name), "stats", &[&source]);
            assert!(result
                .unwrap_err()
                .to_string()
                .contains("named like a lyrics document"));
        }
    }
}
