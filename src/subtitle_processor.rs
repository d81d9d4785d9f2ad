use std::fmt;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use anyhow::{Context, Result};
use log::{debug, warn};

use crate::errors::SubtitleError;

// @module: Subtitle parsing, serialization and chunking

// @const: Blank-line block separator
static BLOCK_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r?\n\s*\r?\n").unwrap()
});

// @struct: Single subtitle entry
//
// The index and timing line are kept as opaque strings and passed through
// untouched; only the text ever crosses the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleEntry {
    // @field: Index string, numeric and unique within a file
    pub index: String,

    // @field: Timing range line, e.g. "00:00:01,000 --> 00:00:04,000"
    pub time: String,

    // @field: Subtitle text, may span multiple lines
    pub text: String,
}

impl SubtitleEntry {
    /// Create a new subtitle entry
    pub fn new(index: impl Into<String>, time: impl Into<String>, text: impl Into<String>) -> Self {
        SubtitleEntry {
            index: index.into(),
            time: time.into(),
            text: text.into(),
        }
    }

    /// Numeric value of the index, used for ordering. Non-numeric indices
    /// sort last.
    pub fn numeric_index(&self) -> u64 {
        parse_numeric_index(&self.index)
    }
}

/// Parse an index string to its numeric value, defaulting to u64::MAX so
/// malformed indices sort after well-formed ones.
pub fn parse_numeric_index(index: &str) -> u64 {
    index.trim().parse().unwrap_or(u64::MAX)
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{}", self.time)?;
        writeln!(f, "{}", self.text)
    }
}

/// Collection of subtitle entries with their source file
#[derive(Debug, Clone)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries in original order
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create a new subtitle collection
    pub fn new(source_file: PathBuf, entries: Vec<SubtitleEntry>) -> Self {
        SubtitleCollection { source_file, entries }
    }

    /// Parse an SRT file into a collection
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;

        let collection = Self::parse_srt_string(path.to_path_buf(), &content)?;
        Ok(collection)
    }

    /// Parse SRT format content into a collection
    ///
    /// Blocks are separated by blank lines. A block is an index line, a timing
    /// line, and one or more text lines; anything shorter is skipped with a
    /// warning. Recovering zero entries is an error.
    pub fn parse_srt_string(source_file: PathBuf, content: &str) -> Result<Self, SubtitleError> {
        let mut entries = Vec::new();

        for block in BLOCK_SEPARATOR.split(content.trim()) {
            let lines: Vec<&str> = block.trim().lines().collect();
            if lines.len() < 3 {
                if !block.trim().is_empty() {
                    warn!("Skipping malformed subtitle block: {:?}", block.trim());
                }
                continue;
            }

            entries.push(SubtitleEntry {
                index: lines[0].trim().to_string(),
                time: lines[1].trim().to_string(),
                text: lines[2..].join("\n"),
            });
        }

        if entries.is_empty() {
            return Err(SubtitleError::NoEntries);
        }

        debug!("Parsed {} subtitle entries from {:?}", entries.len(), source_file);
        Ok(SubtitleCollection { source_file, entries })
    }

    /// Write the collection to an SRT file
    ///
    /// One block per entry, blocks separated by a single empty line with no
    /// trailing separator after the last entry.
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(file)?;
            }
            write!(file, "{}", entry)?;
        }

        Ok(())
    }

    /// Split subtitle entries into chunks for translation
    ///
    /// When chunking is disabled, or the whole collection fits within the
    /// limit, a single chunk holds every entry. Otherwise entries are
    /// partitioned in original order into chunks of exactly `max_entries`
    /// each, the last chunk holding the remainder. No entry is duplicated or
    /// dropped.
    pub fn split_into_chunks(
        &self,
        max_entries: usize,
        enabled: bool,
    ) -> Result<Vec<Vec<SubtitleEntry>>, SubtitleError> {
        chunk_entries(&self.entries, max_entries, enabled)
    }
}

/// Partition a slice of entries into order-preserving chunks
pub fn chunk_entries(
    entries: &[SubtitleEntry],
    max_entries: usize,
    enabled: bool,
) -> Result<Vec<Vec<SubtitleEntry>>, SubtitleError> {
    if max_entries == 0 {
        return Err(SubtitleError::InvalidChunkSize);
    }

    if !enabled || entries.len() <= max_entries {
        return Ok(vec![entries.to_vec()]);
    }

    Ok(entries
        .chunks(max_entries)
        .map(|chunk| chunk.to_vec())
        .collect())
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
