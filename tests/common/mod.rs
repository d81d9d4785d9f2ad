/*!
 * Common test utilities for the aisubtrans test suite
 */

use std::fs;
use std::path::PathBuf;
use anyhow::Result;
use tempfile::TempDir;

use aisubtrans::subtitle_processor::{SubtitleCollection, SubtitleEntry};


/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A small well-formed SRT document with three entries
pub const SAMPLE_SRT: &str = "1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries,
some spanning two lines.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
";

/// Build a collection of `count` sequential entries with distinct timings
pub fn make_collection(count: usize) -> SubtitleCollection {
    let entries = (1..=count)
        .map(|i| {
            SubtitleEntry::new(
                i.to_string(),
                format!("00:00:{:02},000 --> 00:00:{:02},500", i % 60, i % 60),
                format!("Subtitle line {}", i),
            )
        })
        .collect();

    SubtitleCollection::new(PathBuf::from("test.srt"), entries)
}
