use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tempfile::TempDir;

mod tools;

/// Test fixture for MCP integration tests
///
/// Manages a temporary project with `<namespace>_en.json` dictionaries and a
/// config that discovers them in-process.
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create an empty test project using walk discovery
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;

        let fixture = Self {
            _temp_dir: temp_dir,
            project_root,
        };
        fixture.write_config(&json!({ "discovery": "walk" }))?;
        Ok(fixture)
    }

    /// Create a test project with dictionaries
    ///
    /// # Example
    /// ```ignore
    /// let fixture = McpTestFixture::with_dictionaries(vec![
    ///     ("locales/messages_en.json", json!({"user.welcome": "Welcome!"})),
    /// ])?;
    /// ```
    pub fn with_dictionaries(dictionaries: Vec<(&str, Value)>) -> Result<Self> {
        let fixture = Self::new()?;
        for (path, content) in dictionaries {
            fixture.write_dictionary(path, &content)?;
        }
        Ok(fixture)
    }

    /// Write a dictionary JSON file relative to the project root
    pub fn write_dictionary(&self, relative_path: &str, content: &Value) -> Result<()> {
        let json_str = serde_json::to_string_pretty(content)
            .with_context(|| format!("Failed to serialize JSON for: {}", relative_path))?;
        self.write_source_file(relative_path, &format!("{}\n", json_str))
    }

    /// Write any file relative to the project root
    pub fn write_source_file(&self, relative_path: &str, content: &str) -> Result<()> {
        let path = self.project_root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(())
    }

    /// Write a .langlsprc.json config file
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let path = self.project_root.join(".langlsprc.json");
        let json_str = serde_json::to_string_pretty(content)?;
        fs::write(&path, format!("{}\n", json_str))?;
        Ok(())
    }

    /// Get the project root path as a string (for MCP parameters)
    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }

    /// Get the project root path as a Path reference
    pub fn root_path(&self) -> &Path {
        &self.project_root
    }
}

// ============================================================================
// Fixture Generators
// ============================================================================

/// Two namespaces, one of which shadows a key of the other
pub fn fixture_two_namespaces() -> Result<McpTestFixture> {
    McpTestFixture::with_dictionaries(vec![
        (
            "locales/messages_en.json",
            json!({
                "user.welcome": "Welcome!",
                "user.bye": "Goodbye",
                "shared.title": "Messages title"
            }),
        ),
        (
            "locales/settings_en.json",
            json!({
                "settings.save": "Save",
                "shared.title": "Settings title",
                "count": 3
            }),
        ),
    ])
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert pagination fields in a find_language_strings result
pub fn assert_pagination(
    result: &Value,
    expected_offset: usize,
    expected_limit: usize,
    expected_has_more: bool,
) {
    let pagination = &result["pagination"];
    assert_eq!(
        pagination["offset"].as_u64().unwrap(),
        expected_offset as u64,
        "Pagination offset mismatch"
    );
    assert_eq!(
        pagination["limit"].as_u64().unwrap(),
        expected_limit as u64,
        "Pagination limit mismatch"
    );
    assert_eq!(
        pagination["hasMore"].as_bool().unwrap(),
        expected_has_more,
        "Pagination hasMore mismatch"
    );
}

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let content_item = &result.content[0];
    let text_content = content_item
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
