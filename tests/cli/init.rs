use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["dictionarySuffix"], "_en.json");
    assert_eq!(parsed["defaultNamespace"], "common");
    assert_eq!(parsed["discovery"], "fd");
    assert_eq!(parsed["candidateTtlSecs"], 300);
    assert_eq!(parsed["dictionaryMaxAgeSecs"], 3600);
    assert_eq!(parsed["enableDiagnostics"], true);

    // Verify formatting (2-space indentation)
    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "\u{2713} Created .langlsprc.json\n");
    assert!(test.root().join(".langlsprc.json").exists());

    let content = test.read_file(".langlsprc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".langlsprc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".langlsprc.json already exists"));
    assert_eq!(test.read_file(".langlsprc.json")?, "{}");

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Usage:"));
    Ok(())
}
