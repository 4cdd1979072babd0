//! Text normalization for title/lyrics matching.
//! Titles and lyrics go through the same pipeline so their tokens compare directly.
//!
//! CRITICAL: Any change here shifts every count and percentage. Run tests after changes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::AnalyzeError;

// ============================================================================
// REGEX PATTERNS
// ============================================================================

/// Anything that is not a letter, digit or whitespace.
/// Combining marks stay with their base letter so decomposed (NFD) text is not split.
pub static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{M}\p{N}\s]").unwrap());

/// Regex to collapse runs of whitespace into a single space
pub static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// ============================================================================
// SYMBOL SUBSTITUTIONS
// ============================================================================

/// Built-in symbol table, in application order.
/// e.g., "Danger $$$" → "Danger  money " → ["danger", "money"]
pub const DEFAULT_SYMBOLS: &[(&str, &str)] = &[
    ("$$$", "money"),
    ("$$", "money"),
    ("$", "dollar"),
    ("€", "euro"),
    ("£", "pound"),
    ("&", "and"),
    ("%", "percent"),
    ("#", "number"),
    ("@", "at"),
];

/// Order in which symbol entries are applied.
///
/// `TableOrder` replays the table as written. A key that is a substring of a
/// later key shadows it: with `$` listed before `$$$`, "$$$" becomes three
/// "dollar" tokens. `LongestFirst` avoids that by applying longer keys first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubstitutionOrder {
    #[default]
    TableOrder,
    LongestFirst,
}

/// One `symbol → word` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SymbolEntry {
    pub symbol: String,
    pub word: String,
}

/// Ordered symbol substitution table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
}

impl SymbolTable {
    /// Build a table, rejecting empty keys (they would match between every character).
    pub fn new(
        entries: Vec<SymbolEntry>,
        order: SubstitutionOrder,
    ) -> Result<Self, AnalyzeError> {
        if let Some(pos) = entries.iter().position(|e| e.symbol.is_empty()) {
            return Err(AnalyzeError::InvalidSymbolTable(format!(
                "entry {} has an empty symbol (word '{}')",
                pos + 1,
                entries[pos].word
            )));
        }

        let mut entries = entries;
        if order == SubstitutionOrder::LongestFirst {
            // Stable: equal lengths keep table order
            entries.sort_by(|a, b| b.symbol.chars().count().cmp(&a.symbol.chars().count()));
        }
        Ok(Self { entries })
    }

    /// Table with no substitutions.
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every occurrence of each symbol with its space-padded word.
    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for entry in &self.entries {
            if result.contains(entry.symbol.as_str()) {
                result = result.replace(entry.symbol.as_str(), &format!(" {} ", entry.word));
            }
        }
        result
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self {
            entries: default_symbol_entries(),
        }
    }
}

/// Built-in table as owned entries.
pub fn default_symbol_entries() -> Vec<SymbolEntry> {
    DEFAULT_SYMBOLS
        .iter()
        .map(|&(symbol, word)| SymbolEntry {
            symbol: symbol.to_string(),
            word: word.to_string(),
        })
        .collect()
}

// ============================================================================
// NORMALIZATION FUNCTIONS
// ============================================================================

/// Normalizes titles and lyrics against a fixed symbol table.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    symbols: SymbolTable,
}

impl Normalizer {
    pub fn new(symbols: SymbolTable) -> Self {
        Self { symbols }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Substitute symbols, lowercase, strip punctuation, collapse whitespace.
    /// e.g., "Robot, STOP!!" → "robot stop"
    pub fn normalize_text(&self, text: &str) -> String {
        let substituted = self.symbols.apply(text);
        let lowered = substituted.to_lowercase();
        let stripped = NON_WORD.replace_all(&lowered, " ");
        MULTI_SPACE.replace_all(&stripped, " ").trim().to_string()
    }

    /// Normalized token sequence. Empty or whitespace-only input yields no tokens.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        self.normalize_text(text)
            .split(' ')
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
