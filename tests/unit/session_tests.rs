/*!
 * Tests for per-run debug artifact logging
 */

use anyhow::Result;

use aisubtrans::session::SessionLogger;
use crate::common;

/// Test that creating a session makes a timestamped directory under the root
#[test]
fn test_create_withWritableRoot_shouldMakeSessionDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let session = SessionLogger::create(temp_dir.path())?;

    assert!(session.session_dir().is_dir());
    assert!(session.session_dir().starts_with(temp_dir.path()));
    assert_eq!(
        session.session_dir().file_name().unwrap().to_string_lossy(),
        session.session_id()
    );

    Ok(())
}

/// Test that recorded artifacts land inside the session directory
#[test]
fn test_record_withContent_shouldWriteArtifactIntoSessionDir() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let session = SessionLogger::create(temp_dir.path())?;

    session.record("note.txt", "hello");

    let written = std::fs::read_to_string(session.session_dir().join("note.txt"))?;
    assert_eq!(written, "hello");

    Ok(())
}

/// Test that JSON artifacts round-trip through the pretty printer
#[test]
fn test_record_json_withSerializableValue_shouldWriteDecodableJson() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let session = SessionLogger::create(temp_dir.path())?;

    let value = vec!["uno".to_string(), "dos".to_string()];
    session.record_json("data.json", &value);

    let written = std::fs::read_to_string(session.session_dir().join("data.json"))?;
    let decoded: Vec<String> = serde_json::from_str(&written)?;
    assert_eq!(decoded, value);

    Ok(())
}
