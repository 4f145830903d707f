use lang_lsp::mcp::{
    LangLspMcpServer,
    types::{FindLanguageStringsParams, GetTranslationParams},
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, assert_pagination, extract_tool_result_json, fixture_two_namespaces};

fn find_params(fixture: &McpTestFixture, text: &str) -> FindLanguageStringsParams {
    FindLanguageStringsParams {
        project_root_path: fixture.root(),
        file_path: None,
        text: Some(text.to_string()),
        limit: None,
        offset: None,
    }
}

// ============================================================================
// find_language_strings tests
// ============================================================================

#[tokio::test]
async fn test_find_language_strings_in_file() {
    let fixture = fixture_two_namespaces().unwrap();
    fixture
        .write_source_file(
            "src/app.ts",
            "const x = \"user.welcome\";\nsave(t('settings.save'), 'unknown');\n",
        )
        .unwrap();

    let server = LangLspMcpServer::new();
    let params = Parameters(FindLanguageStringsParams {
        file_path: Some("src/app.ts".to_string()),
        text: None,
        ..find_params(&fixture, "")
    });

    let result = server.find_language_strings(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 2);
    assert_pagination(&json_result, 0, 50, false);

    let items = json_result["items"].as_array().unwrap();
    assert_eq!(
        items[0],
        json!({
            "line": 0,
            "startCol": 11,
            "endCol": 23,
            "key": "user.welcome",
            "translation": "Welcome!",
            "namespace": "messages"
        })
    );
    assert_eq!(items[1]["line"], 1);
    assert_eq!(items[1]["key"], "settings.save");
    assert_eq!(items[1]["namespace"], "settings");
}

#[tokio::test]
async fn test_find_language_strings_first_namespace_wins() {
    let fixture = fixture_two_namespaces().unwrap();
    let server = LangLspMcpServer::new();

    let params = Parameters(find_params(&fixture, "title('shared.title')"));
    let result = server.find_language_strings(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["items"][0]["translation"], "Messages title");
    assert_eq!(json_result["items"][0]["namespace"], "messages");
}

#[tokio::test]
async fn test_find_language_strings_pagination() {
    let fixture = fixture_two_namespaces().unwrap();
    let server = LangLspMcpServer::new();
    let text = "'user.welcome'\n'user.bye'\n'settings.save'\n'user.welcome'";

    let params = Parameters(FindLanguageStringsParams {
        limit: Some(2),
        offset: Some(1),
        ..find_params(&fixture, text)
    });
    let result = server.find_language_strings(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 4);
    assert_pagination(&json_result, 1, 2, true);
    let keys: Vec<&str> = json_result["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["user.bye", "settings.save"]);

    let params = Parameters(FindLanguageStringsParams {
        limit: Some(10),
        offset: Some(3),
        ..find_params(&fixture, text)
    });
    let result = server.find_language_strings(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_pagination(&json_result, 3, 10, false);
    assert_eq!(json_result["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_find_language_strings_limit_is_capped() {
    let fixture = fixture_two_namespaces().unwrap();
    let server = LangLspMcpServer::new();

    let params = Parameters(FindLanguageStringsParams {
        limit: Some(10_000),
        ..find_params(&fixture, "'user.bye'")
    });
    let result = server.find_language_strings(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_pagination(&json_result, 0, 200, false);
}

#[tokio::test]
async fn test_find_language_strings_requires_source() {
    let fixture = fixture_two_namespaces().unwrap();
    let server = LangLspMcpServer::new();

    let params = Parameters(FindLanguageStringsParams {
        text: None,
        ..find_params(&fixture, "")
    });
    let err = server.find_language_strings(params).await.unwrap_err();

    assert!(err.message.contains("either filePath or text"));
}

#[tokio::test]
async fn test_find_language_strings_missing_file() {
    let fixture = fixture_two_namespaces().unwrap();
    let server = LangLspMcpServer::new();

    let params = Parameters(FindLanguageStringsParams {
        file_path: Some("missing.ts".to_string()),
        text: None,
        ..find_params(&fixture, "")
    });
    let err = server.find_language_strings(params).await.unwrap_err();

    assert!(err.message.contains("Failed to read"));
}

#[tokio::test]
async fn test_find_language_strings_without_dictionaries() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LangLspMcpServer::new();

    let params = Parameters(find_params(&fixture, "'user.welcome'"));
    let result = server.find_language_strings(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 0);
    assert_eq!(json_result["items"], json!([]));
}

// ============================================================================
// get_translation tests
// ============================================================================

fn translation_params(
    fixture: &McpTestFixture,
    text: &str,
    line: u32,
    character: u32,
) -> GetTranslationParams {
    GetTranslationParams {
        project_root_path: fixture.root(),
        file_path: None,
        text: Some(text.to_string()),
        line,
        character,
    }
}

#[tokio::test]
async fn test_get_translation_at_position() {
    let fixture = fixture_two_namespaces().unwrap();
    let server = LangLspMcpServer::new();
    let text = "// header\nconst x = \"user.welcome\";";

    let params = Parameters(translation_params(&fixture, text, 1, 16));
    let result = server.get_translation(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["found"], true);
    assert_eq!(json_result["match"]["translation"], "Welcome!");
    assert_eq!(json_result["match"]["startCol"], 11);
    assert_eq!(json_result["match"]["endCol"], 23);
}

#[tokio::test]
async fn test_get_translation_column_boundaries() {
    let fixture = fixture_two_namespaces().unwrap();
    let server = LangLspMcpServer::new();
    let text = "const x = \"user.welcome\";";

    for (character, found) in [(10, false), (11, true), (23, true), (24, false)] {
        let params = Parameters(translation_params(&fixture, text, 0, character));
        let result = server.get_translation(params).await.unwrap();
        let json_result = extract_tool_result_json(&result);
        assert_eq!(json_result["found"], found, "character {}", character);
    }
}

#[tokio::test]
async fn test_get_translation_utf16_columns() {
    let fixture = fixture_two_namespaces().unwrap();
    let server = LangLspMcpServer::new();
    // The emoji occupies two UTF-16 code units.
    let text = "😀 t('user.bye')";

    let params = Parameters(translation_params(&fixture, text, 0, 6));
    let result = server.get_translation(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["found"], true);
    assert_eq!(json_result["match"]["startCol"], 6);
    assert_eq!(json_result["match"]["endCol"], 14);
}

#[tokio::test]
async fn test_get_translation_not_found() {
    let fixture = fixture_two_namespaces().unwrap();
    let server = LangLspMcpServer::new();

    let params = Parameters(translation_params(&fixture, "t('nope')", 0, 4));
    let result = server.get_translation(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result, json!({ "found": false }));

    let params = Parameters(translation_params(&fixture, "t('user.bye')", 5, 4));
    let result = server.get_translation(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["found"], false);
}
